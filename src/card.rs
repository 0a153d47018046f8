//! Retained card views: the display side of a delivery record.
//!
//! A `CardView` holds the text actually shown for a record — one label/value
//! line per display field plus derived style flags. The entity model pushes
//! freshly formatted values into the bound view on every mutation; the TUI
//! paints views, never records.

use std::cell::RefCell;
use std::rc::Rc;

use crate::model::{Delivery, DeliveryStatus, EditableDelivery, Field};

/// Display-only state derived from a delivery's status.
///
/// Never stored on the record: derived fresh after every status change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardStyle {
    pub delivered: bool,
    pub canceled: bool,
}

impl CardStyle {
    pub fn derive(status: DeliveryStatus) -> Self {
        Self {
            delivered: status == DeliveryStatus::Delivered,
            canceled: status == DeliveryStatus::Canceled,
        }
    }
}

/// What the card renderer needs from a record, whatever its shape.
pub trait CardSource {
    /// Display text for one card field.
    fn field_text(&self, field: Field) -> String;

    /// Derived display state; plain records have none.
    fn style(&self) -> CardStyle {
        CardStyle::default()
    }

    /// Whether the card carries an edit control.
    fn editable(&self) -> bool {
        false
    }
}

impl CardSource for Delivery {
    fn field_text(&self, field: Field) -> String {
        Delivery::field_text(self, field)
    }
}

impl CardSource for EditableDelivery {
    fn field_text(&self, field: Field) -> String {
        EditableDelivery::field_text(self, field)
    }

    fn style(&self) -> CardStyle {
        CardStyle::derive(self.status())
    }

    fn editable(&self) -> bool {
        true
    }
}

/// One label/value line on a card, keyed by the record field it displays.
#[derive(Debug, Clone)]
pub struct CardLine {
    field: Field,
    value: String,
}

impl CardLine {
    /// The stable field key, for styling and test hooks.
    pub fn key(&self) -> &'static str {
        self.field.key()
    }

    pub fn label(&self) -> &'static str {
        self.field.label()
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// The rendered representation of one delivery.
#[derive(Debug)]
pub struct CardView {
    lines: Vec<CardLine>,
    style: CardStyle,
    edit_control: bool,
}

impl CardView {
    /// Builds a card for `source`.
    ///
    /// Each call yields an independent view; a record only updates the view
    /// it was explicitly bound to afterwards.
    pub fn render(source: &impl CardSource) -> Rc<RefCell<CardView>> {
        let lines = Field::CARD
            .iter()
            .map(|&field| CardLine {
                field,
                value: source.field_text(field),
            })
            .collect();

        Rc::new(RefCell::new(CardView {
            lines,
            style: source.style(),
            edit_control: source.editable(),
        }))
    }

    pub fn lines(&self) -> &[CardLine] {
        &self.lines
    }

    /// The displayed text for one field, if the card has a line for it.
    pub fn field_text(&self, field: Field) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.field == field)
            .map(CardLine::value)
    }

    pub fn style(&self) -> CardStyle {
        self.style
    }

    pub fn has_edit_control(&self) -> bool {
        self.edit_control
    }

    /// Replaces the displayed text for one field.
    ///
    /// Fields without a card line (status) are ignored; status reaches the
    /// card only through its derived style.
    pub(crate) fn set_field_text(&mut self, field: Field, text: String) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.field == field) {
            line.value = text;
        }
    }

    pub(crate) fn set_style(&mut self, style: CardStyle) {
        self.style = style;
    }
}
