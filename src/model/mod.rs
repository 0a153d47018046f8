//! Core data model: delivery records, their status vocabulary, and the
//! edit draft that mirrors a record while its popup is open.

mod delivery;
mod draft;

pub use delivery::{Delivery, DeliveryStatus, EditableDelivery, Field, ValidationError};
pub use draft::EditDraft;
