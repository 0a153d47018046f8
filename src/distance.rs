//! Total distance over a set of deliveries.

use crate::model::{DeliveryStatus, EditableDelivery};

/// A distance total that could not be computed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DistanceError {
    #[error("invalid distance value: {value}")]
    InvalidDistance { value: f64 },
}

/// Sums the distances of all non-canceled deliveries.
///
/// Canceled deliveries are excluded before their distances are read, so
/// whatever values they hold never affect the result. A non-finite distance
/// on any remaining delivery fails the whole call naming the offending
/// value; no partial total is returned. The result depends only on field
/// values at call time — nothing is cached between calls.
pub fn total_distance(deliveries: &[EditableDelivery]) -> Result<f64, DistanceError> {
    let mut total = 0.0;
    for delivery in deliveries {
        if delivery.status() == DeliveryStatus::Canceled {
            continue;
        }
        let distance = delivery.distance();
        if !distance.is_finite() {
            return Err(DistanceError::InvalidDistance { value: distance });
        }
        total += distance;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delivery(distance: f64, status: DeliveryStatus) -> EditableDelivery {
        EditableDelivery::new("Olga", "12 Vymyslov St", distance, status)
    }

    #[test]
    fn empty_collection_totals_zero() {
        assert_eq!(total_distance(&[]).unwrap(), 0.0);
    }

    #[test]
    fn sums_non_canceled_deliveries() {
        let deliveries = vec![
            delivery(8.0, DeliveryStatus::InTransit),
            delivery(3.0, DeliveryStatus::Delivered),
            delivery(11.0, DeliveryStatus::Canceled),
        ];

        assert_eq!(total_distance(&deliveries).unwrap(), 11.0);
    }

    #[test]
    fn canceled_distances_never_matter() {
        let deliveries = vec![
            delivery(2.0, DeliveryStatus::InTransit),
            delivery(f64::NAN, DeliveryStatus::Canceled),
            delivery(-100.0, DeliveryStatus::Canceled),
        ];

        assert_eq!(total_distance(&deliveries).unwrap(), 2.0);
    }

    #[test]
    fn non_finite_active_distance_fails_the_whole_call() {
        let deliveries = vec![
            delivery(2.0, DeliveryStatus::Delivered),
            delivery(f64::NAN, DeliveryStatus::InTransit),
        ];

        let err = total_distance(&deliveries).unwrap_err();
        assert!(matches!(err, DistanceError::InvalidDistance { value } if value.is_nan()));
    }

    #[test]
    fn infinite_distance_is_rejected() {
        let deliveries = vec![delivery(f64::INFINITY, DeliveryStatus::InTransit)];
        assert!(total_distance(&deliveries).is_err());
    }

    #[test]
    fn negative_active_distances_are_summed_as_is() {
        // The model layer does not enforce positivity; only the form does.
        let deliveries = vec![
            delivery(5.0, DeliveryStatus::InTransit),
            delivery(-2.0, DeliveryStatus::InTransit),
        ];

        assert_eq!(total_distance(&deliveries).unwrap(), 3.0);
    }

    #[test]
    fn recomputes_from_current_values() {
        let mut deliveries = vec![delivery(8.0, DeliveryStatus::InTransit)];
        assert_eq!(total_distance(&deliveries).unwrap(), 8.0);

        deliveries[0].set_status(DeliveryStatus::Canceled);
        assert_eq!(total_distance(&deliveries).unwrap(), 0.0);
    }
}
