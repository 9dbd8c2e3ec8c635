use shared::{
    domain::{ElementId, ModalVisibility},
    messages,
};

use crate::{document::Document, panels};

/// Owns the open/closed state of the reservation dialog.
#[derive(Debug, Clone)]
pub struct ModalController {
    visibility: ModalVisibility,
}

impl ModalController {
    /// Takes the initial state from the dialog root's markup.
    pub fn attach<D: Document + ?Sized>(doc: &D) -> Self {
        let visibility = if doc.is_visible(ElementId::ReservationModal) {
            ModalVisibility::Visible
        } else {
            ModalVisibility::Hidden
        };
        Self { visibility }
    }

    pub fn visibility(&self) -> ModalVisibility {
        self.visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility.is_visible()
    }

    /// Shows the dialog with a clean slate: prompt text, no error, personal
    /// data hidden and the form reset.
    pub fn open<D: Document + ?Sized>(&mut self, doc: &mut D) {
        self.visibility = ModalVisibility::Visible;
        doc.set_hidden(ElementId::ReservationModal, false);

        panels::show_status(doc, messages::STATUS_PROMPT, messages::POSITIVE_COLORS);
        doc.set_hidden(ElementId::ErrorMessage, true);
        doc.set_hidden(ElementId::PersonalDataSection, true);
        doc.reset_form(ElementId::ReservationFormModal);
        tracing::debug!("reservation dialog opened");
    }

    pub fn close<D: Document + ?Sized>(&mut self, doc: &mut D) {
        self.visibility = ModalVisibility::Hidden;
        doc.set_hidden(ElementId::ReservationModal, true);
        tracing::debug!("reservation dialog closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;

    #[test]
    fn open_resets_transient_state() {
        let mut doc = MemoryDocument::reservations_page();
        let mut modal = ModalController::attach(&doc);
        assert_eq!(modal.visibility(), ModalVisibility::Hidden);

        doc.set_hidden(ElementId::ErrorMessage, false);
        doc.set_hidden(ElementId::PersonalDataSection, false);
        doc.set_text(ElementId::StatusMessage, "old");
        doc.set_value(ElementId::Clientes, "3");

        modal.open(&mut doc);

        assert!(modal.is_open());
        assert!(doc.is_visible(ElementId::ReservationModal));
        assert!(doc.is_visible(ElementId::StatusMessage));
        assert_eq!(doc.text(ElementId::StatusMessage), messages::STATUS_PROMPT);
        assert_eq!(
            doc.colors(ElementId::StatusMessage),
            Some(messages::POSITIVE_COLORS)
        );
        assert!(!doc.is_visible(ElementId::ErrorMessage));
        assert!(!doc.is_visible(ElementId::PersonalDataSection));
        assert_eq!(doc.value(ElementId::Clientes), "");
    }

    #[test]
    fn close_only_hides_the_dialog() {
        let mut doc = MemoryDocument::reservations_page();
        let mut modal = ModalController::attach(&doc);
        modal.open(&mut doc);
        doc.set_value(ElementId::Hora, "19:00");

        modal.close(&mut doc);
        modal.close(&mut doc);

        assert_eq!(modal.visibility(), ModalVisibility::Hidden);
        assert!(doc.is_hidden(ElementId::ReservationModal));
        assert_eq!(doc.value(ElementId::Hora), "19:00");
    }

    #[test]
    fn attach_reads_visible_markup() {
        let mut doc = MemoryDocument::reservations_page();
        doc.set_hidden(ElementId::ReservationModal, false);
        assert!(ModalController::attach(&doc).is_open());
    }
}
