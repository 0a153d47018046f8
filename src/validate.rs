//! Form validation: per-field rules, error slots, and the overall signal.
//!
//! This is the narrow contract the edit form consumes: rules are declared
//! per field together with the message shown in that field's error slot;
//! every run re-evaluates all fields against the current draft and reports
//! one overall valid/invalid signal. The form enables or disables its
//! submit control purely from that signal — it never evaluates rules
//! itself.

use crate::model::{EditDraft, Field};

/// A single rule on a field's raw control value.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// The value must be non-empty after trimming.
    Required,

    /// The value must satisfy the predicate.
    Predicate(fn(&str) -> bool),
}

impl Rule {
    fn passes(self, value: &str) -> bool {
        match self {
            Rule::Required => !value.trim().is_empty(),
            Rule::Predicate(check) => check(value),
        }
    }
}

/// The declared rules for one field, plus its error slot.
#[derive(Debug)]
struct FieldRules {
    field: Field,
    rules: Vec<(Rule, &'static str)>,
    error: Option<&'static str>,
}

/// Evaluates declared field rules and drives the submit signal.
#[derive(Debug, Default)]
pub struct FormValidator {
    fields: Vec<FieldRules>,
}

impl FormValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares rules for a field, each with the message its failure shows.
    ///
    /// Rules are checked in declaration order; the first failure fills the
    /// field's error slot.
    #[must_use]
    pub fn add_field(mut self, field: Field, rules: Vec<(Rule, &'static str)>) -> Self {
        self.fields.push(FieldRules {
            field,
            rules,
            error: None,
        });
        self
    }

    /// Re-evaluates every rule against the draft, fills the error slots,
    /// and returns the overall signal.
    pub fn run(&mut self, draft: &EditDraft) -> bool {
        let mut valid = true;
        for entry in &mut self.fields {
            let value = draft.value(entry.field);
            entry.error = entry
                .rules
                .iter()
                .find(|(rule, _)| !rule.passes(value))
                .map(|&(_, message)| message);
            valid &= entry.error.is_none();
        }
        valid
    }

    /// The message currently in a field's error slot.
    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|entry| entry.field == field)
            .and_then(|entry| entry.error)
    }

    /// Whether the last run left every error slot empty.
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|entry| entry.error.is_none())
    }
}

/// The rule set for the delivery edit form: name and address required,
/// distance required and greater than zero.
pub fn delivery_rules() -> FormValidator {
    FormValidator::new()
        .add_field(Field::Name, vec![(Rule::Required, "Enter a name")])
        .add_field(Field::Address, vec![(Rule::Required, "Enter an address")])
        .add_field(
            Field::Distance,
            vec![
                (Rule::Required, "Enter a distance"),
                (
                    Rule::Predicate(|value| {
                        value.trim().parse::<f64>().is_ok_and(|distance| distance > 0.0)
                    }),
                    "Distance must be greater than 0",
                ),
            ],
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, address: &str, distance: &str) -> EditDraft {
        let mut draft = EditDraft::default();
        draft.set_value(Field::Name, name);
        draft.set_value(Field::Address, address);
        draft.set_value(Field::Distance, distance);
        draft.set_value(Field::Status, "in_transit");
        draft
    }

    #[test]
    fn complete_draft_passes() {
        let mut validator = delivery_rules();
        assert!(validator.run(&draft("Olga", "12 Vymyslov St", "8")));
        assert!(validator.is_valid());
        assert_eq!(validator.error(Field::Name), None);
    }

    #[test]
    fn required_rejects_blank_values() {
        let mut validator = delivery_rules();
        assert!(!validator.run(&draft("   ", "12 Vymyslov St", "8")));
        assert_eq!(validator.error(Field::Name), Some("Enter a name"));
        assert_eq!(validator.error(Field::Address), None);
    }

    #[test]
    fn distance_must_be_positive() {
        let mut validator = delivery_rules();

        assert!(!validator.run(&draft("Olga", "12 Vymyslov St", "0")));
        assert_eq!(
            validator.error(Field::Distance),
            Some("Distance must be greater than 0")
        );

        assert!(!validator.run(&draft("Olga", "12 Vymyslov St", "-3")));
        assert!(!validator.run(&draft("Olga", "12 Vymyslov St", "eight")));
        assert!(validator.run(&draft("Olga", "12 Vymyslov St", "0.5")));
    }

    #[test]
    fn empty_distance_reports_the_required_message_first() {
        let mut validator = delivery_rules();
        assert!(!validator.run(&draft("Olga", "12 Vymyslov St", "")));
        assert_eq!(validator.error(Field::Distance), Some("Enter a distance"));
    }

    #[test]
    fn error_slots_clear_once_fixed() {
        let mut validator = delivery_rules();
        validator.run(&draft("", "", ""));
        assert_eq!(validator.error(Field::Name), Some("Enter a name"));

        validator.run(&draft("Olga", "12 Vymyslov St", "8"));
        assert_eq!(validator.error(Field::Name), None);
        assert!(validator.is_valid());
    }

    #[test]
    fn signal_is_false_while_any_field_fails() {
        let mut validator = delivery_rules();
        assert!(!validator.run(&draft("Olga", "", "8")));
        assert!(!validator.is_valid());
    }
}
