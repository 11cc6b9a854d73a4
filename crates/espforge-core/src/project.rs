//! The project configuration the form edits and the prompt embeds.
//!
//! Nothing here validates its input: every field accepts any string,
//! including the empty string, and forwards it unchanged to the prompt.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Catalog;

/// Board value that switches the prompt to the free-text board description.
pub const CUSTOM_BOARD: &str = "Custom";

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Firmware language for the generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "Arduino C++")]
    ArduinoCpp,
    #[serde(rename = "MicroPython")]
    MicroPython,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::ArduinoCpp, Language::MicroPython];

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::ArduinoCpp => "Arduino C++",
            Language::MicroPython => "MicroPython",
        }
    }

    /// The other language. There are only two, so this is a toggle.
    pub fn other(&self) -> Self {
        match self {
            Language::ArduinoCpp => Language::MicroPython,
            Language::MicroPython => Language::ArduinoCpp,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Error)]
#[error("unknown language {0:?} (expected arduino or micropython)")]
pub struct ParseLanguageError(String);

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arduino" | "arduino c++" | "arduino-c++" | "arduino-cpp" | "cpp" | "c++" => {
                Ok(Language::ArduinoCpp)
            }
            "micropython" | "python" | "mpy" => Ok(Language::MicroPython),
            _ => Err(ParseLanguageError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Field updates
// ---------------------------------------------------------------------------

/// The two list-valued fields that support toggling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListField {
    Modules,
    Communication,
}

/// Whole-field replacement for one [`ProjectConfig`] field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Board(String),
    CustomBoardConfig(String),
    Goal(String),
    Modules(Vec<String>),
    Communication(Vec<String>),
    Language(Language),
    Power(String),
    CustomDescription(String),
}

// ---------------------------------------------------------------------------
// ProjectConfig
// ---------------------------------------------------------------------------

/// Everything the user has chosen about the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub board: String,
    pub custom_board_config: String,
    pub goal: String,
    pub modules: Vec<String>,
    pub communication: Vec<String>,
    pub language: Language,
    pub power: String,
    pub custom_description: String,
}

impl ProjectConfig {
    /// Initial configuration: the catalog defaults with the first seed goal.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let defaults = &catalog.defaults;
        Self {
            board: defaults.board.clone(),
            custom_board_config: String::new(),
            goal: catalog.goals.first().cloned().unwrap_or_default(),
            modules: defaults.modules.clone(),
            communication: defaults.communication.clone(),
            language: defaults.language,
            power: defaults.power.clone(),
            custom_description: String::new(),
        }
    }

    pub fn is_custom_board(&self) -> bool {
        self.board == CUSTOM_BOARD
    }

    /// Return a copy with exactly one field replaced.
    pub fn with_update(&self, update: FieldUpdate) -> Self {
        let mut next = self.clone();
        match update {
            FieldUpdate::Board(v) => next.board = v,
            FieldUpdate::CustomBoardConfig(v) => next.custom_board_config = v,
            FieldUpdate::Goal(v) => next.goal = v,
            FieldUpdate::Modules(v) => next.modules = v,
            FieldUpdate::Communication(v) => next.communication = v,
            FieldUpdate::Language(v) => next.language = v,
            FieldUpdate::Power(v) => next.power = v,
            FieldUpdate::CustomDescription(v) => next.custom_description = v,
        }
        next
    }

    /// Return a copy with `value` added to `field` if absent, or removed if
    /// present. Remaining items keep their relative order.
    pub fn with_toggled(&self, field: ListField, value: &str) -> Self {
        let current = self.list(field);
        let toggled: Vec<String> = if current.iter().any(|v| v == value) {
            current.iter().filter(|v| *v != value).cloned().collect()
        } else {
            let mut items = current.to_vec();
            items.push(value.to_string());
            items
        };
        let update = match field {
            ListField::Modules => FieldUpdate::Modules(toggled),
            ListField::Communication => FieldUpdate::Communication(toggled),
        };
        self.with_update(update)
    }

    pub fn list(&self, field: ListField) -> &[String] {
        match field {
            ListField::Modules => &self.modules,
            ListField::Communication => &self.communication,
        }
    }
}

// ---------------------------------------------------------------------------
// GoalList
// ---------------------------------------------------------------------------

/// Ordered goal choices. Newly suggested goals go to the front; an exact
/// duplicate is never inserted twice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GoalList {
    goals: Vec<String>,
}

impl GoalList {
    pub fn new(goals: Vec<String>) -> Self {
        Self { goals }
    }

    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::new(catalog.goals.clone())
    }

    /// Prepend `goal` unless an identical entry exists. Returns `true` if the
    /// list changed.
    pub fn offer(&mut self, goal: &str) -> bool {
        if self.contains(goal) {
            return false;
        }
        self.goals.insert(0, goal.to_string());
        true
    }

    pub fn contains(&self, goal: &str) -> bool {
        self.goals.iter().any(|g| g == goal)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.goals
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
