//! Reducer trait for the unidirectional data-flow core.

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Action) -> State
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: Clone + Default + Send + 'static;

    /// The action type this reducer handles.
    type Action: Clone + Send + 'static;

    /// Process an action and return the new state.
    ///
    /// This must be a pure function: no side effects, no I/O, no
    /// randomness. Action kinds the reducer does not recognize are
    /// passed through as the identity on the input state.
    fn reduce(state: Self::State, action: Self::Action) -> Self::State;
}
