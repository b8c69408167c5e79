//! Root composition: one store over the auth and shopping-list slices.

use crate::auth::{AuthAction, AuthReducer, AuthState};
use crate::shopping_list::{ShoppingListAction, ShoppingListReducer, ShoppingListState};
use crate::store::Reducer;

/// Whole-application state; each field is an independently reduced
/// slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub auth: AuthState,
    pub shopping_list: ShoppingListState,
}

/// Union of all slice actions; the sole input to the store.
#[derive(Debug, Clone)]
pub enum AppAction {
    Auth(AuthAction),
    ShoppingList(ShoppingListAction),
}

impl From<AuthAction> for AppAction {
    fn from(action: AuthAction) -> Self {
        Self::Auth(action)
    }
}

impl From<ShoppingListAction> for AppAction {
    fn from(action: ShoppingListAction) -> Self {
        Self::ShoppingList(action)
    }
}

/// Routes each action to its slice's reducer; the other slice passes
/// through untouched.
pub struct AppReducer;

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;

    fn reduce(state: AppState, action: AppAction) -> AppState {
        match action {
            AppAction::Auth(action) => AppState {
                auth: AuthReducer::reduce(state.auth, action),
                ..state
            },
            AppAction::ShoppingList(action) => AppState {
                shopping_list: ShoppingListReducer::reduce(state.shopping_list, action),
                ..state
            },
        }
    }
}
