//! Unidirectional data-flow primitives.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Store ──→ Reducer ──→ State ──→ Subscribers
//!    ↑                                          │
//!    └───── Effects (async follow-up dispatch) ─┘
//! ```
//!
//! - **State**: immutable snapshot of a slice of the application
//! - **Action**: user actions or system events
//! - **Reducer**: pure function that transforms state based on actions
//! - **Store**: single writer applying reducers and fanning state out

mod dispatch;
mod reducer;

pub use dispatch::{Store, Subscription};
pub use reducer::Reducer;
