//! State for the todo application.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mvi::State;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub completed: bool,
}

impl Todo {
    /// A new, not yet completed todo.
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }
}

/// Which todos a view should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisibilityFilter {
    #[default]
    ShowAll,
    ShowActive,
    ShowCompleted,
}

impl State for VisibilityFilter {}

impl VisibilityFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            VisibilityFilter::ShowAll => "SHOW_ALL",
            VisibilityFilter::ShowActive => "SHOW_ACTIVE",
            VisibilityFilter::ShowCompleted => "SHOW_COMPLETED",
        }
    }

    /// Whether `todo` is visible under this filter.
    pub fn admits(self, todo: &Todo) -> bool {
        match self {
            VisibilityFilter::ShowAll => true,
            VisibilityFilter::ShowActive => !todo.completed,
            VisibilityFilter::ShowCompleted => todo.completed,
        }
    }
}

impl fmt::Display for VisibilityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown visibility filter '{0}' (expected SHOW_ALL, SHOW_ACTIVE or SHOW_COMPLETED)")]
pub struct UnknownFilter(pub String);

/// Accepts the wire names (`SHOW_ACTIVE`) and the short forms (`active`).
impl FromStr for VisibilityFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SHOW_ALL" | "ALL" => Ok(VisibilityFilter::ShowAll),
            "SHOW_ACTIVE" | "ACTIVE" => Ok(VisibilityFilter::ShowActive),
            "SHOW_COMPLETED" | "COMPLETED" => Ok(VisibilityFilter::ShowCompleted),
            _ => Err(UnknownFilter(s.to_string())),
        }
    }
}
