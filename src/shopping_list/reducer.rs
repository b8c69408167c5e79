use crate::store::Reducer;

use super::actions::ShoppingListAction;
use super::state::{EditSlot, ShoppingListState};

/// Pure, total reducer for the shopping-list slice.
///
/// Precondition violations (out-of-range `StartEdit`, `UpdateIngredient`
/// or `DeleteIngredient` with no active edit) are caller misuse and
/// reduce to safe no-ops; the reducer never fails.
pub struct ShoppingListReducer;

impl Reducer for ShoppingListReducer {
    type State = ShoppingListState;
    type Action = ShoppingListAction;

    fn reduce(state: ShoppingListState, action: ShoppingListAction) -> ShoppingListState {
        match action {
            ShoppingListAction::AddIngredient(ingredient) => {
                let mut ingredients = state.ingredients;
                ingredients.push(ingredient);
                ShoppingListState {
                    ingredients,
                    edit: state.edit,
                }
            }
            ShoppingListAction::AddIngredients(batch) => {
                let mut ingredients = state.ingredients;
                ingredients.extend(batch);
                ShoppingListState {
                    ingredients,
                    edit: state.edit,
                }
            }
            ShoppingListAction::StartEdit { index } => {
                match state.ingredients.get(index).cloned() {
                    Some(snapshot) => ShoppingListState {
                        edit: Some(EditSlot { index, snapshot }),
                        ..state
                    },
                    None => state,
                }
            }
            ShoppingListAction::UpdateIngredient(patch) => {
                match state.edit.as_ref().map(|slot| slot.index) {
                    Some(index) => {
                        let mut ingredients = state.ingredients;
                        if let Some(row) = ingredients.get_mut(index) {
                            *row = patch.apply_to(row);
                        }
                        ShoppingListState {
                            ingredients,
                            edit: None,
                        }
                    }
                    None => state,
                }
            }
            ShoppingListAction::DeleteIngredient => {
                match state.edit.as_ref().map(|slot| slot.index) {
                    Some(index) => {
                        let mut ingredients = state.ingredients;
                        if index < ingredients.len() {
                            ingredients.remove(index);
                        }
                        ShoppingListState {
                            ingredients,
                            edit: None,
                        }
                    }
                    None => state,
                }
            }
            ShoppingListAction::StopEdit => ShoppingListState {
                edit: None,
                ..state
            },
        }
    }
}
