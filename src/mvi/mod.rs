//! Contracts for unidirectional data flow.
//!
//! This module provides the base traits every piece of the container is
//! written against.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ Listeners
//!    ↑                                 │
//!    └──── dispatch ←── get_state ─────┘
//! ```
//!
//! - **State**: Immutable value, shared as `Arc<State>`
//! - **Action**: Plain data describing an intended change
//! - **Reducer**: Pure function that transforms state based on actions

mod action;
mod reducer;
mod state;

pub use action::{Action, ReservedAction, INIT_ACTION_TYPE, PROBE_ACTION_TYPE};
pub use reducer::{reducer_fn, FnReducer, Reducer};
pub use state::State;
