//! Severity → remediation priority classification.
//!
//! The policy is a fixed lookup:
//!
//!   - critical, serious, high  → add
//!   - moderate, medium         → update
//!   - anything else, or absent → review
//!
//! Unknown input never fails; it lands on the `review` default so that a
//! producer with its own vocabulary still gets its findings stored.

use crate::rules::catalog::{Priority, Severity};

/// Map a parsed severity to the priority stored with the issue.
pub fn classify(severity: Severity) -> Priority {
    match severity {
        Severity::Critical | Severity::Serious | Severity::High => Priority::Add,
        Severity::Moderate | Severity::Medium => Priority::Update,
        Severity::Unrecognized | Severity::Unspecified => Priority::Review,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_label(label: &str) -> Priority {
        classify(Severity::parse(label))
    }

    #[test]
    fn urgent_severities_map_to_add() {
        for label in ["CRITICAL", "critical", "Serious", "High"] {
            assert_eq!(classify_label(label), Priority::Add, "{label}");
        }
    }

    #[test]
    fn middling_severities_map_to_update() {
        for label in ["Moderate", "MEDIUM", "medium"] {
            assert_eq!(classify_label(label), Priority::Update, "{label}");
        }
    }

    #[test]
    fn everything_else_maps_to_review() {
        for label in ["low", "minor", "info", "", "severe"] {
            assert_eq!(classify_label(label), Priority::Review, "{label}");
        }
        assert_eq!(classify(Severity::Unspecified), Priority::Review);
    }
}
