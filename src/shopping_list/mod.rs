//! Shopping-list slice: ingredient list with single-slot edit-mode
//! arbitration.

mod actions;
mod reducer;
mod state;

pub use actions::ShoppingListAction;
pub use reducer::ShoppingListReducer;
pub use state::{EditSlot, Ingredient, IngredientPatch, ShoppingListState};
