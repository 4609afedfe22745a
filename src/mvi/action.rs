//! Base trait for actions (intended state changes).

use std::fmt;

use serde_json::Value;

/// Type of the action the store dispatches once at construction.
pub const INIT_ACTION_TYPE: &str = "@@unistate/INIT";

/// Type of the action a composition sends to probe for unhandled defaults.
pub const PROBE_ACTION_TYPE: &str = "@@unistate/PROBE_UNKNOWN_ACTION";

/// Actions the container itself dispatches.
///
/// Their types live under the `@@unistate/` namespace so that no application
/// reducer ever recognizes them; every reducer must answer them with its
/// default (or unchanged) state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedAction {
    /// Populates every slice with its initial value.
    Init,
    /// Checks that a reducer has a default branch for unknown actions.
    ProbeUnknown,
}

impl ReservedAction {
    pub const fn action_type(self) -> &'static str {
        match self {
            ReservedAction::Init => INIT_ACTION_TYPE,
            ReservedAction::ProbeUnknown => PROBE_ACTION_TYPE,
        }
    }
}

impl fmt::Display for ReservedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action_type())
    }
}

/// An immutable fact about intent.
///
/// Actions represent:
/// - User requests (add an item, change a filter)
/// - System events forwarded by the caller
///
/// They carry no behavior; reducers turn them into new states.
pub trait Action: fmt::Debug + Send + Sync + 'static {
    /// The discriminant of this action, or `None` if it has none.
    ///
    /// Actions without a discriminant are rejected by `Store::dispatch`.
    fn action_type(&self) -> Option<&str>;

    /// Builds one of the container's reserved actions.
    fn reserved(kind: ReservedAction) -> Self;
}

/// JSON records are actions when they carry a string `"type"` field.
impl Action for Value {
    fn action_type(&self) -> Option<&str> {
        self.get("type").and_then(Value::as_str)
    }

    fn reserved(kind: ReservedAction) -> Self {
        serde_json::json!({ "type": kind.action_type() })
    }
}
