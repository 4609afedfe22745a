//! Record of named slices produced by a [`Combination`](super::Combination).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::mvi::State;

/// Type-erased slice value. Each slice keeps its own allocation so an
/// untouched slice can be carried over into the next record by pointer.
pub(crate) type SliceValue = Arc<dyn Any + Send + Sync>;

/// Ordered record whose fields are the slices of a composed state.
///
/// The shape of each slice belongs to the reducer registered under its name;
/// read it back with [`CombinedState::get`] using that reducer's state type.
#[derive(Clone, Default)]
pub struct CombinedState {
    slices: Vec<(String, SliceValue)>,
}

impl CombinedState {
    /// An empty record, typically the start of a preloaded state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets slice `name` to `value`, replacing any previous value.
    pub fn with<T: State>(self, name: impl Into<String>, value: T) -> Self {
        self.with_arc(name, Arc::new(value))
    }

    /// Like [`with`](Self::with) for a value that is already shared.
    pub fn with_arc<T: State>(mut self, name: impl Into<String>, value: Arc<T>) -> Self {
        let name = name.into();
        let value: SliceValue = value;
        match self.slices.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.slices.push((name, value)),
        }
        self
    }

    /// The slice stored under `name`, if present and of type `T`.
    pub fn get<T: State>(&self, name: &str) -> Option<Arc<T>> {
        self.get_raw(name)?.clone().downcast::<T>().ok()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_raw(name).is_some()
    }

    /// Slice names in record order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slices.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub(crate) fn get_raw(&self, name: &str) -> Option<&SliceValue> {
        self.slices
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub(crate) fn from_slices(slices: Vec<(String, SliceValue)>) -> Self {
        Self { slices }
    }
}

impl State for CombinedState {}

impl fmt::Debug for CombinedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinedState")
            .field("slices", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_typed_slice() {
        let state = CombinedState::new()
            .with("count", 3i64)
            .with("name", "todo".to_string());
        assert_eq!(state.get::<i64>("count").as_deref(), Some(&3));
        assert_eq!(state.get::<String>("name").as_deref().map(String::as_str), Some("todo"));
    }

    #[test]
    fn get_with_wrong_type_is_none() {
        let state = CombinedState::new().with("count", 3i64);
        assert!(state.get::<String>("count").is_none());
        assert!(state.contains("count"));
    }

    #[test]
    fn with_replaces_in_place() {
        let state = CombinedState::new()
            .with("a", 1i64)
            .with("b", 2i64)
            .with("a", 10i64);
        assert_eq!(state.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(state.get::<i64>("a").as_deref(), Some(&10));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn get_shares_the_stored_allocation() {
        let value = Arc::new(vec![1u8, 2, 3]);
        let state = CombinedState::new().with_arc("bytes", Arc::clone(&value));
        let read = state.get::<Vec<u8>>("bytes").expect("slice present");
        assert!(Arc::ptr_eq(&value, &read));
    }

    #[test]
    fn debug_lists_slice_names() {
        let state = CombinedState::new().with("todos", 0i64);
        assert_eq!(format!("{:?}", state), r#"CombinedState { slices: ["todos"] }"#);
    }
}
