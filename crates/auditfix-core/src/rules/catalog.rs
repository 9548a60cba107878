use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Severity as reported by an upstream audit producer.
///
/// Producers disagree on vocabulary, so this is a closed set of the
/// labels that carry meaning plus two catch-alls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Serious,
    High,
    Moderate,
    Medium,
    /// A string severity outside the known vocabulary (`"low"`, `"minor"`, ...).
    Unrecognized,
    /// No `severity` key, or a value that is not a string.
    Unspecified,
}

impl Severity {
    /// Case-insensitive parse of a severity label. Never fails.
    pub fn parse(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "critical" => Self::Critical,
            "serious" => Self::Serious,
            "high" => Self::High,
            "moderate" => Self::Moderate,
            "medium" => Self::Medium,
            _ => Self::Unrecognized,
        }
    }

    /// Read the severity carried by an issue item's `severity` value.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some(label) => Self::parse(label),
            None => Self::Unspecified,
        }
    }
}

/// Remediation priority stored with every normalized issue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Add,
    Update,
    Review,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Add => "add",
            Priority::Update => "update",
            Priority::Review => "review",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority `{0}`; expected one of: add, update, review")]
pub struct UnknownPriority(pub String);

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Priority::Add),
            "update" => Ok(Priority::Update),
            "review" => Ok(Priority::Review),
            other => Err(UnknownPriority(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Severity::parse("CRITICAL"), Severity::Critical);
        assert_eq!(Severity::parse("Serious"), Severity::Serious);
        assert_eq!(Severity::parse("hIgH"), Severity::High);
        assert_eq!(Severity::parse("MEDIUM"), Severity::Medium);
    }

    #[test]
    fn unknown_labels_are_unrecognized() {
        assert_eq!(Severity::parse("low"), Severity::Unrecognized);
        assert_eq!(Severity::parse(""), Severity::Unrecognized);
        // Whitespace is not stripped.
        assert_eq!(Severity::parse(" critical"), Severity::Unrecognized);
    }

    #[test]
    fn non_string_values_are_unspecified() {
        assert_eq!(Severity::from_value(None), Severity::Unspecified);
        assert_eq!(Severity::from_value(Some(&json!(3))), Severity::Unspecified);
        assert_eq!(Severity::from_value(Some(&json!(null))), Severity::Unspecified);
        assert_eq!(Severity::from_value(Some(&json!(["high"]))), Severity::Unspecified);
        assert_eq!(Severity::from_value(Some(&json!("High"))), Severity::High);
    }

    #[test]
    fn priority_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::Add).unwrap(), "\"add\"");
        assert_eq!(serde_json::to_string(&Priority::Review).unwrap(), "\"review\"");
    }

    #[test]
    fn priority_parses_its_own_display() {
        for p in [Priority::Add, Priority::Update, Priority::Review] {
            assert_eq!(p.to_string().parse::<Priority>(), Ok(p));
        }
        assert!("ADD".parse::<Priority>().is_err());
    }
}
