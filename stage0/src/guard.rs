//! Raw guard verdicts.

use serde::{Deserialize, Serialize};

/// What a `can_activate` / `can_deactivate` hook answers.
///
/// Hooks may answer with a plain boolean or with text, typically the
/// result of a confirmation prompt. The activator normalizes the value
/// through its configured interpreter; [`GuardValue::interpret`] is the
/// default one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GuardValue {
    /// A definite answer.
    Bool(bool),
    /// A textual answer such as `"Yes"`, `"No"` or `"Cancel"`.
    Text(String),
}

impl GuardValue {
    /// Default interpretation: `"Yes"` and `"Ok"` approve, any other text
    /// refuses, booleans pass through unchanged.
    pub fn interpret(&self) -> bool {
        match self {
            GuardValue::Bool(value) => *value,
            GuardValue::Text(text) => text == "Yes" || text == "Ok",
        }
    }
}

impl Default for GuardValue {
    fn default() -> Self {
        GuardValue::Bool(true)
    }
}

impl From<bool> for GuardValue {
    fn from(value: bool) -> Self {
        GuardValue::Bool(value)
    }
}

impl From<&str> for GuardValue {
    fn from(text: &str) -> Self {
        GuardValue::Text(text.to_owned())
    }
}

impl From<String> for GuardValue {
    fn from(text: String) -> Self {
        GuardValue::Text(text)
    }
}
