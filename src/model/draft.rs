//! The transient, editable copy of a record's fields while a popup is open.

use super::{EditableDelivery, Field};

/// Raw control values for each form field.
///
/// Values live here as the strings the controls hold; nothing is parsed or
/// validated until the draft is applied on submit. Distance is kept without
/// its unit suffix — the suffix belongs to card display, not editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDraft {
    name: String,
    address: String,
    distance: String,
    status: String,
}

impl EditDraft {
    /// Copies the record's current values into a fresh draft.
    pub fn from_record(record: &EditableDelivery) -> Self {
        Self {
            name: record.name().to_string(),
            address: record.address().to_string(),
            distance: record.distance().to_string(),
            status: record.status().as_str().to_string(),
        }
    }

    /// The raw control value for one field.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Address => &self.address,
            Field::Distance => &self.distance,
            Field::Status => &self.status,
        }
    }

    /// Replaces one control value.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Address => self.address = value,
            Field::Distance => self.distance = value,
            Field::Status => self.status = value,
        }
    }

    /// Appends a typed character to one control value.
    pub fn push_char(&mut self, field: Field, c: char) {
        match field {
            Field::Name => self.name.push(c),
            Field::Address => self.address.push(c),
            Field::Distance => self.distance.push(c),
            Field::Status => self.status.push(c),
        }
    }

    /// Removes the last character from one control value.
    pub fn pop_char(&mut self, field: Field) {
        match field {
            Field::Name => {
                self.name.pop();
            }
            Field::Address => {
                self.address.pop();
            }
            Field::Distance => {
                self.distance.pop();
            }
            Field::Status => {
                self.status.pop();
            }
        }
    }

    /// The flat field→value map read at submit, in apply order.
    pub fn entries(&self) -> [(Field, &str); 4] {
        [
            (Field::Name, self.name.as_str()),
            (Field::Address, self.address.as_str()),
            (Field::Distance, self.distance.as_str()),
            (Field::Status, self.status.as_str()),
        ]
    }
}
