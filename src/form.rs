//! The delivery edit form: draft state, validation wiring, and submit.
//!
//! The form owns a draft of the target record's fields and never touches
//! the record itself until submit. Keystrokes edit the draft; every edit
//! re-runs the validator, whose single overall signal enables or disables
//! the submit control.

use crate::capability::EditCapability;
use crate::model::{DeliveryStatus, EditDraft, EditableDelivery, Field, ValidationError};
use crate::validate::FormValidator;

/// Focusable form controls, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Field(Field),
    Submit,
}

impl Control {
    /// Tab order: one control per field, submit last.
    pub const TAB_ORDER: [Control; 5] = [
        Control::Field(Field::Name),
        Control::Field(Field::Address),
        Control::Field(Field::Distance),
        Control::Field(Field::Status),
        Control::Submit,
    ];

    fn position(self) -> usize {
        Control::TAB_ORDER
            .iter()
            .position(|&control| control == self)
            .unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Control::TAB_ORDER[(self.position() + 1) % Control::TAB_ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Control::TAB_ORDER.len();
        Control::TAB_ORDER[(self.position() + len - 1) % len]
    }
}

/// Outcome of a submit attempt.
#[derive(Debug)]
pub enum SubmitResult {
    /// The full draft was applied; the popup should close.
    Committed,

    /// Validation is failing; nothing was applied.
    Invalid,

    /// A field assignment was rejected partway through the apply step.
    /// Earlier assignments stay applied; later ones were skipped.
    Rejected(ValidationError),
}

/// An edit form bound to one delivery's draft.
#[derive(Debug)]
pub struct EditForm {
    draft: EditDraft,
    validator: FormValidator,
    focus: Control,
    submit_enabled: bool,
}

impl EditForm {
    /// Binds a fresh form: the draft mirrors the record's current values
    /// and validation runs once to set the initial submit signal.
    pub fn bind(record: &EditableDelivery, capability: &EditCapability) -> Self {
        let draft = EditDraft::from_record(record);
        let mut validator = capability.validator();
        let submit_enabled = validator.run(&draft);
        Self {
            draft,
            validator,
            focus: Control::Field(Field::Name),
            submit_enabled,
        }
    }

    pub fn value(&self, field: Field) -> &str {
        self.draft.value(field)
    }

    pub fn focus(&self) -> Control {
        self.focus
    }

    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.validator.error(field)
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// Replaces one control's value programmatically, as a keystroke would.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set_value(field, value);
        self.revalidate();
    }

    /// A character typed into the focused control.
    ///
    /// The status selector takes no text; characters are ignored there and
    /// on the submit control.
    pub fn on_char(&mut self, c: char) {
        if let Control::Field(field) = self.focus
            && field != Field::Status
        {
            self.draft.push_char(field, c);
            self.revalidate();
        }
    }

    /// Backspace in the focused control.
    pub fn on_backspace(&mut self) {
        if let Control::Field(field) = self.focus
            && field != Field::Status
        {
            self.draft.pop_char(field);
            self.revalidate();
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Cycles the status selector. Ignored unless it has focus.
    pub fn cycle_status(&mut self, forward: bool) {
        if self.focus != Control::Field(Field::Status) {
            return;
        }
        let current = DeliveryStatus::parse(self.draft.value(Field::Status)).unwrap_or_default();
        let selected = if forward { current.next() } else { current.prev() };
        self.draft.set_value(Field::Status, selected.as_str());
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.submit_enabled = self.validator.run(&self.draft);
    }

    /// Applies the whole draft onto the target record.
    ///
    /// Validation runs once more on the attempt; a failing signal applies
    /// nothing. Otherwise every draft entry goes through the record's
    /// constrained setter in field order, status last. The first rejected
    /// assignment aborts the rest — earlier assignments are not rolled
    /// back. On success the target's card style is re-derived.
    pub fn on_submit(&mut self, target: &mut EditableDelivery) -> SubmitResult {
        self.revalidate();
        if !self.submit_enabled {
            return SubmitResult::Invalid;
        }

        for (field, value) in self.draft.entries() {
            if let Err(err) = target.apply(field, value) {
                return SubmitResult::Rejected(err);
            }
        }
        target.restyle();
        SubmitResult::Committed
    }
}
