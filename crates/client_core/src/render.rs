use std::fmt;

use shared::domain::Value;

use crate::LoadPhase;

pub const HEADING: &str = "My Values";
pub const LOADING_TEXT: &str = "Loading values...";
pub const ERROR_PREFIX: &str = "Error fetching values: ";
pub const EMPTY_TEXT: &str = "No values found. You can add some via the API!";

/// What the values section shows for a given phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValuesView {
    Loading,
    Error(String),
    Empty,
    List(Vec<String>),
}

impl ValuesView {
    pub fn from_phase(phase: &LoadPhase) -> Self {
        match phase {
            LoadPhase::Loading => Self::Loading,
            LoadPhase::Failed(message) => Self::Error(message.clone()),
            LoadPhase::Loaded(values) if values.is_empty() => Self::Empty,
            LoadPhase::Loaded(values) => Self::List(values.iter().map(list_item).collect()),
        }
    }

    pub fn shows_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

pub fn list_item(value: &Value) -> String {
    format!("{}: {}", value.name, value.description)
}

impl fmt::Display for ValuesView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADING}")?;
        match self {
            Self::Loading => writeln!(f, "{LOADING_TEXT}"),
            Self::Error(message) => writeln!(f, "{ERROR_PREFIX}{message}"),
            Self::Empty => writeln!(f, "{EMPTY_TEXT}"),
            Self::List(items) => {
                for item in items {
                    writeln!(f, "  - {item}")?;
                }
                Ok(())
            }
        }
    }
}
