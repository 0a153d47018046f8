//! The modal popup hosting one edit form.
//!
//! A popup is built for exactly one record and owns the form bound to it.
//! Opening without a target is a precondition violation; closing is
//! idempotent and every close route (overlay click, Esc, successful
//! submit) funnels through the same `close` call.

use crate::capability::{EditCapability, StatusLabels};
use crate::form::EditForm;
use crate::model::EditableDelivery;

/// Errors from the popup lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum PopupError {
    #[error("popup opened without a target record")]
    MissingTarget,
}

/// A modal popup: one form, one target record, open until closed.
#[derive(Debug)]
pub struct EditPopup {
    target: usize,
    form: EditForm,
    labels: StatusLabels,
    open: bool,
}

impl EditPopup {
    /// Opens a popup hosting a form bound to `record`.
    ///
    /// `target` is the record's position in the board's collection, kept so
    /// submit can find it again. Fails when the record is absent.
    pub fn open(
        target: usize,
        record: Option<&EditableDelivery>,
        capability: &EditCapability,
    ) -> Result<Self, PopupError> {
        let record = record.ok_or(PopupError::MissingTarget)?;
        Ok(Self {
            target,
            form: EditForm::bind(record, capability),
            labels: capability.labels().clone(),
            open: true,
        })
    }

    /// Closes the popup. A no-op when already closed.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Position of the edited record in the board's collection.
    pub fn target(&self) -> usize {
        self.target
    }

    pub fn form(&self) -> &EditForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EditForm {
        &mut self.form
    }

    /// Localized labels for painting the status selector.
    pub fn labels(&self) -> &StatusLabels {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{DeliveryStatus, Field};

    fn record() -> EditableDelivery {
        EditableDelivery::new("Olga", "12 Vymyslov St", 8.0, DeliveryStatus::InTransit)
    }

    #[test]
    fn open_without_a_target_is_a_precondition_violation() {
        let err = EditPopup::open(0, None, &EditCapability::default()).unwrap_err();
        assert!(matches!(err, PopupError::MissingTarget));
    }

    #[test]
    fn open_binds_a_form_to_the_record() {
        let record = record();
        let popup = EditPopup::open(2, Some(&record), &EditCapability::default()).unwrap();

        assert!(popup.is_open());
        assert_eq!(popup.target(), 2);
        assert_eq!(popup.form().value(Field::Name), "Olga");
    }

    #[test]
    fn close_is_idempotent() {
        let record = record();
        let mut popup = EditPopup::open(0, Some(&record), &EditCapability::default()).unwrap();

        popup.close();
        assert!(!popup.is_open());
        popup.close();
        assert!(!popup.is_open());
    }
}
