//! Base trait for state values.

use serde_json::Value;

/// Marker trait for state objects.
///
/// States should be:
/// - Immutable (shared as `Arc<Self>`, replaced rather than edited)
/// - Self-contained (everything a listener needs to refresh itself)
/// - Thread-safe (the store hands them to readers on any thread)
pub trait State: Send + Sync + 'static {
    /// Whether this value stands for "no value at all".
    ///
    /// Reducers must never produce an undefined value for their slice.
    /// Only dynamic value types can represent one.
    fn is_undefined(&self) -> bool {
        false
    }
}

macro_rules! impl_state {
    ($($ty:ty),* $(,)?) => {
        $(impl State for $ty {})*
    };
}

impl_state!(bool, char, i32, i64, u32, u64, usize, f64, String);

impl<T: Send + Sync + 'static> State for Vec<T> {}

impl<T: Send + Sync + 'static> State for Option<T> {
    fn is_undefined(&self) -> bool {
        self.is_none()
    }
}

impl State for Value {
    fn is_undefined(&self) -> bool {
        self.is_null()
    }
}
