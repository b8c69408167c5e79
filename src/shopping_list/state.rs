//! Value types for the ingredient list and its edit mode.

/// A single shopping-list entry.
///
/// Immutable value; list position is meaningful (rows are addressed by
/// index).
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    pub name: String,
    pub amount: f64,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// Field-wise override applied to the edited ingredient.
///
/// Unspecified fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientPatch {
    pub name: Option<String>,
    pub amount: Option<f64>,
}

impl IngredientPatch {
    /// Merge the patch over `base`.
    pub fn apply_to(&self, base: &Ingredient) -> Ingredient {
        Ingredient {
            name: self.name.clone().unwrap_or_else(|| base.name.clone()),
            amount: self.amount.unwrap_or(base.amount),
        }
    }
}

/// Edit-mode slot: at most one row is "being edited" at a time.
///
/// `snapshot` is the row's value at the moment edit mode was entered,
/// not a live reference to the list.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSlot {
    pub index: usize,
    pub snapshot: Ingredient,
}

/// Shopping-list slice of the store.
///
/// `edit` being `None` is the "no row selected" state; a populated slot
/// always refers to a row that existed when editing started.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoppingListState {
    pub ingredients: Vec<Ingredient>,
    pub edit: Option<EditSlot>,
}

impl ShoppingListState {
    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }
}
