//! The delivery board: collection owner and top-level wiring.
//!
//! The board exclusively owns the record collection, the card container,
//! the controls panel, the popup slot, and the in-flight capability load.
//! Every container is an explicit field; nothing is looked up ambiently.
//! Interaction failures are logged and isolated — a rejected submit or a
//! failed capability load never takes the board down.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::capability::{self, EditCapability, LoadingIndicator, PendingLoad};
use crate::card::CardView;
use crate::controls::ControlsPanel;
use crate::form::SubmitResult;
use crate::model::EditableDelivery;
use crate::popup::EditPopup;

/// An edit request waiting on the capability load.
#[derive(Debug)]
struct PendingEdit {
    target: usize,
    load: PendingLoad,
}

/// Owns the deliveries and everything rendered from them.
#[derive(Debug)]
pub struct DeliveryBoard {
    deliveries: Vec<EditableDelivery>,
    cards: Vec<Rc<RefCell<CardView>>>,
    controls: ControlsPanel,
    popup: Option<EditPopup>,
    pending: Option<PendingEdit>,
    indicator: LoadingIndicator,
    capability: Option<EditCapability>,
    labels_path: Option<PathBuf>,
}

impl DeliveryBoard {
    /// Builds the board: renders one card per record and binds each record
    /// to its card so mutations repaint immediately.
    pub fn new(mut deliveries: Vec<EditableDelivery>, labels_path: Option<PathBuf>) -> Self {
        let cards: Vec<Rc<RefCell<CardView>>> = deliveries
            .iter_mut()
            .map(|record| {
                let card = CardView::render(record);
                record.bind_card(&card);
                card
            })
            .collect();

        Self {
            deliveries,
            cards,
            controls: ControlsPanel::default(),
            popup: None,
            pending: None,
            indicator: LoadingIndicator::default(),
            capability: None,
            labels_path,
        }
    }

    pub fn deliveries(&self) -> &[EditableDelivery] {
        &self.deliveries
    }

    /// The card container, in record order.
    pub fn cards(&self) -> &[Rc<RefCell<CardView>>] {
        &self.cards
    }

    pub fn controls(&self) -> &ControlsPanel {
        &self.controls
    }

    pub fn popup(&self) -> Option<&EditPopup> {
        self.popup.as_ref()
    }

    pub fn popup_mut(&mut self) -> Option<&mut EditPopup> {
        self.popup.as_mut()
    }

    /// Whether a capability load is showing the loading indicator.
    pub fn is_loading(&self) -> bool {
        self.indicator.is_visible()
    }

    /// Asks to edit the record at `index`.
    ///
    /// Ignored while a popup is already open or a load is in flight — the
    /// board hosts at most one edit at a time. The first request pays the
    /// capability load under the loading indicator; afterwards the cached
    /// capability opens the popup immediately.
    pub fn request_edit(&mut self, index: usize) {
        if self.popup.is_some() || self.pending.is_some() {
            tracing::debug!(index, "edit request ignored: an edit is already in progress");
            return;
        }

        if let Some(capability) = self.capability.clone() {
            self.open_popup(index, &capability);
        } else {
            let load = capability::load_in_background(self.labels_path.clone(), &self.indicator);
            self.pending = Some(PendingEdit {
                target: index,
                load,
            });
        }
    }

    /// Checks the in-flight capability load, if any.
    ///
    /// On success the capability is cached and the popup opens for the
    /// record that triggered the load. On failure the error is logged and
    /// no popup appears. Either way the resolved load is dropped here,
    /// which releases the loading indicator exactly once.
    pub fn poll_pending(&mut self) {
        let Some(pending) = &self.pending else {
            return;
        };
        let Some(result) = pending.load.poll() else {
            return;
        };

        let Some(pending) = self.pending.take() else {
            return;
        };
        match result {
            Ok(capability) => {
                self.capability = Some(capability.clone());
                self.open_popup(pending.target, &capability);
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load the edit capability");
            }
        }
    }

    fn open_popup(&mut self, index: usize, capability: &EditCapability) {
        match EditPopup::open(index, self.deliveries.get(index), capability) {
            Ok(popup) => self.popup = Some(popup),
            Err(e) => tracing::error!(error = %e, index, "could not open the edit popup"),
        }
    }

    /// Submits the open popup's form onto its target record.
    ///
    /// A committed submit closes the popup; an invalid or rejected one
    /// leaves it open so the user can correct the draft. Returns the
    /// outcome, or `None` when no popup is open.
    pub fn submit_popup(&mut self) -> Option<SubmitResult> {
        let popup = self.popup.as_mut()?;
        let target = popup.target();
        let record = self.deliveries.get_mut(target)?;

        let result = popup.form_mut().on_submit(record);
        match &result {
            SubmitResult::Committed => self.close_popup(),
            SubmitResult::Invalid => {}
            SubmitResult::Rejected(e) => {
                tracing::error!(error = %e, target, "submit rejected");
            }
        }
        Some(result)
    }

    /// Closes the popup and drops it. Every close route — overlay click,
    /// Esc, successful submit — lands here. A no-op when nothing is open.
    pub fn close_popup(&mut self) {
        if let Some(popup) = &mut self.popup {
            popup.close();
        }
        self.popup = None;
    }

    /// Totals the collection into the controls panel's result slot.
    pub fn calculate(&mut self) {
        self.controls.on_calculate(&self.deliveries);
    }

    /// Clears the controls panel's result slot.
    pub fn reset_result(&mut self) {
        self.controls.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;
    use std::time::{Duration, Instant};

    use crate::model::{DeliveryStatus, Field};

    fn board() -> DeliveryBoard {
        DeliveryBoard::new(
            vec![
                EditableDelivery::new("Olga", "12 Vymyslov St", 8.0, DeliveryStatus::InTransit),
                EditableDelivery::new("Dmitry", "7 Zadachnaya St", 3.0, DeliveryStatus::Delivered),
                EditableDelivery::new("Olya", "43 Tkachey St", 11.0, DeliveryStatus::Canceled),
            ],
            None,
        )
    }

    /// Requests an edit and polls until the capability load resolves.
    fn open_edit(board: &mut DeliveryBoard, index: usize) {
        board.request_edit(index);
        let deadline = Instant::now() + Duration::from_secs(5);
        while board.popup().is_none() {
            assert!(Instant::now() < deadline, "edit capability load timed out");
            board.poll_pending();
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn new_binds_every_record_to_its_card() {
        let board = board();
        assert_eq!(board.cards().len(), 3);
        assert_eq!(
            board.cards()[1].borrow().field_text(Field::Distance),
            Some("3 km")
        );
        assert!(board.cards()[2].borrow().style().canceled);
    }

    #[test]
    fn totals_exclude_the_canceled_delivery() {
        let mut board = board();
        board.calculate();
        assert_eq!(board.controls().result(), Some("Total distance: 11 km"));
    }

    #[test]
    fn first_edit_request_loads_under_the_indicator() {
        let mut board = board();
        board.request_edit(0);

        assert!(board.is_loading());
        assert!(board.popup().is_none());

        let deadline = Instant::now() + Duration::from_secs(5);
        while board.popup().is_none() {
            assert!(Instant::now() < deadline, "edit capability load timed out");
            board.poll_pending();
            thread::sleep(Duration::from_millis(5));
        }
        assert!(!board.is_loading());
    }

    #[test]
    fn cached_capability_opens_the_popup_immediately() {
        let mut board = board();
        open_edit(&mut board, 0);
        board.close_popup();

        board.request_edit(1);
        assert!(!board.is_loading());
        assert_eq!(board.popup().map(EditPopup::target), Some(1));
    }

    #[test]
    fn editing_distance_commits_and_repaints_only_that_card() {
        let mut board = board();
        open_edit(&mut board, 1);

        board
            .popup_mut()
            .unwrap()
            .form_mut()
            .set_value(Field::Distance, "5");
        let result = board.submit_popup().unwrap();

        assert!(matches!(result, SubmitResult::Committed));
        assert!(board.popup().is_none());
        assert!((board.deliveries()[1].distance() - 5.0).abs() < f64::EPSILON);
        assert_eq!(
            board.cards()[1].borrow().field_text(Field::Distance),
            Some("5 km")
        );
        // The other two records and cards are untouched.
        assert!((board.deliveries()[0].distance() - 8.0).abs() < f64::EPSILON);
        assert_eq!(
            board.cards()[0].borrow().field_text(Field::Distance),
            Some("8 km")
        );
        assert_eq!(board.deliveries()[2].status(), DeliveryStatus::Canceled);
    }

    #[test]
    fn injected_invalid_status_is_rejected_and_keeps_the_popup_open() {
        let mut board = board();
        open_edit(&mut board, 1);

        // Bypasses the selector, as a raw form value would.
        board
            .popup_mut()
            .unwrap()
            .form_mut()
            .set_value(Field::Status, "teleported");
        let result = board.submit_popup().unwrap();

        assert!(matches!(result, SubmitResult::Rejected(_)));
        assert!(board.popup().is_some());
        assert_eq!(board.deliveries()[1].status(), DeliveryStatus::Delivered);
    }

    #[test]
    fn overlay_close_discards_the_draft() {
        let mut board = board();
        open_edit(&mut board, 0);

        board
            .popup_mut()
            .unwrap()
            .form_mut()
            .set_value(Field::Name, "Someone else");
        board.close_popup();

        assert!(board.popup().is_none());
        assert_eq!(board.deliveries()[0].name(), "Olga");
        assert_eq!(
            board.cards()[0].borrow().field_text(Field::Name),
            Some("Olga")
        );
    }

    #[test]
    fn duplicate_edit_requests_are_ignored() {
        let mut board = board();
        board.request_edit(0);
        // Second request while the first load is still in flight.
        board.request_edit(1);

        let deadline = Instant::now() + Duration::from_secs(5);
        while board.popup().is_none() {
            assert!(Instant::now() < deadline, "edit capability load timed out");
            board.poll_pending();
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(board.popup().map(EditPopup::target), Some(0));

        // And while the popup is open.
        board.request_edit(1);
        assert_eq!(board.popup().map(EditPopup::target), Some(0));
    }

    #[test]
    fn edit_request_for_a_missing_record_opens_nothing() {
        let mut board = board();
        open_edit(&mut board, 0);
        board.close_popup();

        board.request_edit(99);
        assert!(board.popup().is_none());
        assert!(!board.is_loading());
    }

    #[test]
    fn close_popup_is_safe_when_nothing_is_open() {
        let mut board = board();
        board.close_popup();
        assert!(board.popup().is_none());
    }
}
