//! Delivery records: the base card data and the editable variant.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::card::{CardStyle, CardView};

/// Fields of a delivery record, in the order the edit form applies them.
///
/// `status` is deliberately last: a rejected status assignment aborts the
/// submit without touching it, while the plain fields before it stay applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Address,
    Distance,
    Status,
}

impl Field {
    /// All fields, in form/apply order.
    pub const ALL: [Field; 4] = [Field::Name, Field::Address, Field::Distance, Field::Status];

    /// The fields displayed as label/value lines on a card.
    pub const CARD: [Field; 3] = [Field::Name, Field::Address, Field::Distance];

    /// Stable identifying key, used for card lines and form controls.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Address => "address",
            Field::Distance => "distance",
            Field::Status => "status",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Address => "Address",
            Field::Distance => "Distance",
            Field::Status => "Status",
        }
    }
}

/// Where a delivery stands in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// On its way to the customer.
    #[default]
    InTransit,

    /// Handed over.
    Delivered,

    /// Called off; excluded from distance totals.
    Canceled,
}

impl DeliveryStatus {
    /// All statuses, in selector order.
    pub const ALL: [DeliveryStatus; 3] = [
        DeliveryStatus::InTransit,
        DeliveryStatus::Delivered,
        DeliveryStatus::Canceled,
    ];

    /// The serialized name, as stored in config files and form values.
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryStatus::InTransit => "in_transit",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Canceled => "canceled",
        }
    }

    /// Parses a serialized status name against the closed vocabulary.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        DeliveryStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ValidationError::InvalidStatus {
                value: value.to_string(),
            })
    }

    /// The next status in selector order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            DeliveryStatus::InTransit => DeliveryStatus::Delivered,
            DeliveryStatus::Delivered => DeliveryStatus::Canceled,
            DeliveryStatus::Canceled => DeliveryStatus::InTransit,
        }
    }

    /// The previous status in selector order, wrapping around.
    pub fn prev(self) -> Self {
        self.next().next()
    }
}

/// A rejected field assignment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid status {value:?}: allowed values are in_transit, delivered, canceled")]
    InvalidStatus { value: String },
}

/// A customer delivery: the data shown on a card.
///
/// Holds at most one weak reference to the card view currently displaying it.
/// Every successful field mutation pushes the freshly formatted value into
/// that view, so displayed text never goes stale.
#[derive(Debug, Default)]
pub struct Delivery {
    name: String,
    address: String,
    distance: f64,
    card: Option<Weak<RefCell<CardView>>>,
}

impl Delivery {
    pub fn new(name: impl Into<String>, address: impl Into<String>, distance: f64) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            distance,
            card: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
        self.sync(Field::Name);
    }

    pub fn set_address(&mut self, value: impl Into<String>) {
        self.address = value.into();
        self.sync(Field::Address);
    }

    pub fn set_distance(&mut self, value: f64) {
        self.distance = value;
        self.sync(Field::Distance);
    }

    /// Binds this record to the card view that displays it.
    ///
    /// The record keeps only a weak reference; the board owns the view.
    pub fn bind_card(&mut self, card: &Rc<RefCell<CardView>>) {
        self.card = Some(Rc::downgrade(card));
    }

    /// The bound card view, if one is still alive.
    pub fn card(&self) -> Option<Rc<RefCell<CardView>>> {
        self.card.as_ref().and_then(Weak::upgrade)
    }

    /// Display text for one card field. Distance carries the unit suffix.
    pub fn field_text(&self, field: Field) -> String {
        match field {
            Field::Name => self.name.clone(),
            Field::Address => self.address.clone(),
            Field::Distance => format!("{} km", self.distance),
            Field::Status => String::new(),
        }
    }

    /// Pushes the current value of `field` into the bound card view, if any.
    fn sync(&self, field: Field) {
        if let Some(card) = self.card() {
            card.borrow_mut().set_field_text(field, self.field_text(field));
        }
    }
}

/// A delivery that can be edited: the base record plus a status.
#[derive(Debug, Default)]
pub struct EditableDelivery {
    base: Delivery,
    status: DeliveryStatus,
}

impl EditableDelivery {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        distance: f64,
        status: DeliveryStatus,
    ) -> Self {
        Self {
            base: Delivery::new(name, address, distance),
            status,
        }
    }

    pub fn name(&self) -> &str {
        self.base.name()
    }

    pub fn address(&self) -> &str {
        self.base.address()
    }

    pub fn distance(&self) -> f64 {
        self.base.distance()
    }

    pub fn status(&self) -> DeliveryStatus {
        self.status
    }

    pub fn field_text(&self, field: Field) -> String {
        self.base.field_text(field)
    }

    pub fn bind_card(&mut self, card: &Rc<RefCell<CardView>>) {
        self.base.bind_card(card);
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.base.set_name(value);
    }

    pub fn set_address(&mut self, value: impl Into<String>) {
        self.base.set_address(value);
    }

    pub fn set_distance(&mut self, value: f64) {
        self.base.set_distance(value);
    }

    pub fn set_status(&mut self, status: DeliveryStatus) {
        self.status = status;
        self.restyle();
    }

    /// Recomputes the derived card style from the current status.
    ///
    /// Style is never stored on the record; this pushes a fresh derivation
    /// into the bound view.
    pub fn restyle(&self) {
        if let Some(card) = self.base.card() {
            card.borrow_mut().set_style(CardStyle::derive(self.status));
        }
    }

    /// Constrained setter for one field from a raw form value.
    ///
    /// `name` and `address` store the raw string verbatim, `distance` coerces
    /// it to a number, `status` must parse against the status vocabulary.
    /// A rejected status leaves the record (and its card) untouched.
    pub fn apply(&mut self, field: Field, raw: &str) -> Result<(), ValidationError> {
        match field {
            Field::Name => self.base.set_name(raw),
            Field::Address => self.base.set_address(raw),
            Field::Distance => self.base.set_distance(coerce_distance(raw)),
            Field::Status => self.set_status(DeliveryStatus::parse(raw)?),
        }
        Ok(())
    }
}

/// Numeric coercion for raw distance input: empty is zero, anything that
/// does not parse becomes NaN and is caught by the aggregate calculator.
fn coerce_distance(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        0.0
    } else {
        trimmed.parse().unwrap_or(f64::NAN)
    }
}
