//! The controls panel: total-distance trigger and result slot.

use crate::distance;
use crate::model::EditableDelivery;

/// Displays the distance total, or a retry message when it cannot be
/// computed.
///
/// This is the single place a calculation failure is downgraded to a
/// non-fatal user message; the underlying error goes to the log.
#[derive(Debug, Default)]
pub struct ControlsPanel {
    result: Option<String>,
}

impl ControlsPanel {
    /// Clears any previous result, totals the collection, and stores the
    /// outcome text.
    pub fn on_calculate(&mut self, deliveries: &[EditableDelivery]) {
        self.reset();
        match distance::total_distance(deliveries) {
            Ok(total) => {
                self.result = Some(format!("Total distance: {total} km"));
            }
            Err(e) => {
                tracing::error!(error = %e, "distance calculation failed");
                self.result = Some("Could not calculate, try again".to_string());
            }
        }
    }

    /// Clears the displayed result.
    pub fn reset(&mut self) {
        self.result = None;
    }

    /// The current result text, if a calculation has run since the last
    /// reset.
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::DeliveryStatus;

    fn delivery(distance: f64, status: DeliveryStatus) -> EditableDelivery {
        EditableDelivery::new("Olga", "12 Vymyslov St", distance, status)
    }

    #[test]
    fn shows_the_total_with_unit() {
        let deliveries = vec![
            delivery(8.0, DeliveryStatus::InTransit),
            delivery(3.0, DeliveryStatus::Delivered),
            delivery(11.0, DeliveryStatus::Canceled),
        ];

        let mut panel = ControlsPanel::default();
        panel.on_calculate(&deliveries);

        assert_eq!(panel.result(), Some("Total distance: 11 km"));
    }

    #[test]
    fn failure_downgrades_to_the_retry_message() {
        let deliveries = vec![delivery(f64::NAN, DeliveryStatus::InTransit)];

        let mut panel = ControlsPanel::default();
        panel.on_calculate(&deliveries);

        assert_eq!(panel.result(), Some("Could not calculate, try again"));
    }

    #[test]
    fn calculate_replaces_the_previous_result() {
        let mut deliveries = vec![delivery(8.0, DeliveryStatus::InTransit)];

        let mut panel = ControlsPanel::default();
        panel.on_calculate(&deliveries);
        assert_eq!(panel.result(), Some("Total distance: 8 km"));

        deliveries[0].set_status(DeliveryStatus::Canceled);
        panel.on_calculate(&deliveries);
        assert_eq!(panel.result(), Some("Total distance: 0 km"));
    }

    #[test]
    fn reset_clears_the_slot() {
        let mut panel = ControlsPanel::default();
        panel.on_calculate(&[]);
        assert!(panel.result().is_some());

        panel.reset();
        assert_eq!(panel.result(), None);
    }
}
