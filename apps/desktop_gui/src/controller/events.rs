//! UI events gathered while a frame renders, dispatched once it is done.

use shared::domain::ElementId;
use widget_core::{Document, EventOutcome, Key, ReservationPage, UiEvent};

#[derive(Debug, Default)]
pub struct FrameEvents {
    queue: Vec<UiEvent>,
}

impl FrameEvents {
    pub fn click(&mut self, id: ElementId) {
        self.queue.push(UiEvent::Click(id));
    }

    pub fn submit(&mut self, id: ElementId) {
        self.queue.push(UiEvent::Submit(id));
    }

    pub fn key_down(&mut self, key: Key) {
        self.queue.push(UiEvent::KeyDown(key));
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Dispatches queued events in arrival order.
    pub fn dispatch_into<D: Document>(self, page: &mut ReservationPage<D>) -> Vec<EventOutcome> {
        self.queue
            .into_iter()
            .map(|event| page.dispatch(event))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::ModalVisibility;
    use widget_core::{MemoryDocument, WidgetSettings};

    use super::*;

    #[test]
    fn events_run_in_order() {
        let mut page =
            ReservationPage::load(MemoryDocument::reservations_page(), WidgetSettings::default());
        let mut events = FrameEvents::default();
        events.click(ElementId::OpenModalBtn);
        events.key_down(Key::Escape);
        events.click(ElementId::OpenModalBtn);

        let outcomes = events.dispatch_into(&mut page);
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|o| o.handled == 1));
        assert_eq!(page.modal_visibility(), Some(ModalVisibility::Visible));
    }
}
