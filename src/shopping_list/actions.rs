use super::state::{Ingredient, IngredientPatch};

/// Events accepted by the shopping-list slice.
#[derive(Debug, Clone)]
pub enum ShoppingListAction {
    /// Append one ingredient to the end of the list.
    AddIngredient(Ingredient),
    /// Append several ingredients, preserving their order.
    AddIngredients(Vec<Ingredient>),
    /// Enter edit mode for the row at `index`, snapshotting its value.
    StartEdit { index: usize },
    /// Merge the patch over the edited row, write it back, leave edit
    /// mode. Requires an active edit.
    UpdateIngredient(IngredientPatch),
    /// Remove the edited row and leave edit mode. The sole deletion
    /// path: callers must `StartEdit` the target row first.
    DeleteIngredient,
    /// Leave edit mode, discarding the unsaved snapshot. Idempotent.
    StopEdit,
}
