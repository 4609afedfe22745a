//! Reducer composition.
//!
//! Combines independently testable slice reducers, each owning one named
//! field of a [`CombinedState`], into a single root reducer with the same
//! contract. Compositions nest: a [`Combination`] is itself a reducer and can
//! own a slice of an outer one.

mod state;

use std::any::type_name;
use std::sync::Arc;

use crate::error::ConfigurationError;
use crate::mvi::{Action, Reducer, ReservedAction, State};

pub use state::CombinedState;

use state::SliceValue;

/// Object-safe view of a slice reducer, hiding its state type.
trait ErasedReducer<A>: Send + Sync {
    fn reduce_erased(&self, name: &str, state: Option<&SliceValue>, action: &A) -> SliceValue;

    fn validate_erased(&self, name: &str, value: &SliceValue) -> Result<(), ConfigurationError>;

    fn probe(&self, name: &str) -> Result<(), ConfigurationError>;
}

impl<R: Reducer> ErasedReducer<R::Action> for R {
    fn reduce_erased(
        &self,
        name: &str,
        state: Option<&SliceValue>,
        action: &R::Action,
    ) -> SliceValue {
        let prior = state.and_then(|value| match value.clone().downcast::<R::State>() {
            Ok(prior) => Some(prior),
            Err(_) => {
                tracing::warn!(
                    slice = name,
                    expected = type_name::<R::State>(),
                    "Slice holds a value of another type; reinitializing"
                );
                None
            }
        });

        let next = self.reduce(prior.as_ref(), action);
        if next.is_undefined() {
            panic!(
                "reducer for slice '{}' returned an undefined state for action {:?}",
                name,
                action.action_type()
            );
        }
        next
    }

    fn validate_erased(&self, name: &str, value: &SliceValue) -> Result<(), ConfigurationError> {
        match value.clone().downcast::<R::State>() {
            Ok(typed) => self.validate(&typed),
            Err(_) => Err(ConfigurationError::SliceTypeMismatch {
                slice: name.to_string(),
                expected: type_name::<R::State>(),
            }),
        }
    }

    fn probe(&self, name: &str) -> Result<(), ConfigurationError> {
        for kind in [ReservedAction::Init, ReservedAction::ProbeUnknown] {
            let initial = self.reduce(None, &R::Action::reserved(kind));
            if initial.is_undefined() {
                return Err(ConfigurationError::UndefinedInitialState {
                    slice: name.to_string(),
                    action_type: kind.action_type().to_string(),
                });
            }
        }
        Ok(())
    }
}

struct Slice<A> {
    name: String,
    reducer: Box<dyn ErasedReducer<A>>,
}

/// Root reducer over a [`CombinedState`].
///
/// For every registered slice `k`, the result's `k` equals
/// `reducer_k(state.k, action)`. Slices are evaluated in registration order.
/// When no slice changes (every result is the same `Arc` as before), the
/// input record itself is returned.
pub struct Combination<A: Action> {
    slices: Vec<Slice<A>>,
}

/// Collects slice reducers for a [`Combination`].
pub struct CombinationBuilder<A: Action> {
    slices: Vec<Slice<A>>,
}

impl<A: Action> Combination<A> {
    pub fn builder() -> CombinationBuilder<A> {
        CombinationBuilder { slices: Vec::new() }
    }

    /// Registered slice names in evaluation order.
    pub fn slice_names(&self) -> impl Iterator<Item = &str> {
        self.slices.iter().map(|slice| slice.name.as_str())
    }
}

impl<A: Action> CombinationBuilder<A> {
    /// Registers `reducer` as the owner of slice `name`.
    pub fn slice<R>(mut self, name: impl Into<String>, reducer: R) -> Self
    where
        R: Reducer<Action = A>,
    {
        self.slices.push(Slice {
            name: name.into(),
            reducer: Box::new(reducer),
        });
        self
    }

    /// Finishes the composition.
    ///
    /// Every slice reducer is probed once, with no state, against the
    /// reserved init and unknown-action probes. A reducer that answers with
    /// an undefined value has no default branch and is rejected here rather
    /// than on some later dispatch.
    pub fn build(self) -> Result<Combination<A>, ConfigurationError> {
        for (index, slice) in self.slices.iter().enumerate() {
            if self.slices[..index].iter().any(|seen| seen.name == slice.name) {
                return Err(ConfigurationError::DuplicateSlice {
                    slice: slice.name.clone(),
                });
            }
            slice.reducer.probe(&slice.name)?;
        }

        if self.slices.is_empty() {
            tracing::warn!("Reducer composition has no slices; its state will always be empty");
        }

        let combination = Combination {
            slices: self.slices,
        };
        tracing::debug!(
            slices = ?combination.slice_names().collect::<Vec<_>>(),
            "Reducer composition built"
        );
        Ok(combination)
    }
}

impl<A: Action> Reducer for Combination<A> {
    type State = CombinedState;
    type Action = A;

    fn reduce(&self, state: Option<&Arc<CombinedState>>, action: &A) -> Arc<CombinedState> {
        // A record with extra or missing keys must be rebuilt even when every
        // slice comes back unchanged.
        let mut changed = state.map_or(true, |prior| prior.len() != self.slices.len());
        let mut next = Vec::with_capacity(self.slices.len());

        for slice in &self.slices {
            let prior = state.and_then(|record| record.get_raw(&slice.name));
            let value = slice.reducer.reduce_erased(&slice.name, prior, action);
            changed = changed || prior.map_or(true, |prior| !Arc::ptr_eq(prior, &value));
            next.push((slice.name.clone(), value));
        }

        match state {
            Some(prior) if !changed => Arc::clone(prior),
            _ => Arc::new(CombinedState::from_slices(next)),
        }
    }

    fn validate(&self, state: &CombinedState) -> Result<(), ConfigurationError> {
        for key in state.keys() {
            if !self.slices.iter().any(|slice| slice.name == key) {
                tracing::warn!(
                    slice = key,
                    expected = ?self.slice_names().collect::<Vec<_>>(),
                    "Unexpected key in preloaded state; it will be ignored"
                );
            }
        }

        for slice in &self.slices {
            if let Some(value) = state.get_raw(&slice.name) {
                slice.reducer.validate_erased(&slice.name, value)?;
            }
        }
        Ok(())
    }
}
