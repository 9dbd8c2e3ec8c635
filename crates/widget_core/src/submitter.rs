use shared::messages;

use crate::{
    document::Document,
    panels,
    timers::{DeferredAction, TimerId, TimerQueue},
};

/// Confirms a reservation locally and closes the dialog after a delay.
#[derive(Debug, Clone)]
pub struct ReservationSubmitter {
    close_delay_ms: u64,
}

impl ReservationSubmitter {
    pub fn new(close_delay_ms: u64) -> Self {
        Self { close_delay_ms }
    }

    pub fn close_delay_ms(&self) -> u64 {
        self.close_delay_ms
    }

    /// Every submission succeeds. The scheduled close is never cancelled here,
    /// so repeated submissions queue one close each.
    pub fn submit<D: Document + ?Sized>(&self, doc: &mut D, timers: &mut TimerQueue) -> TimerId {
        panels::hide_all(doc);
        panels::show_status(
            doc,
            messages::RESERVATION_CONFIRMED,
            messages::CONFIRMED_COLORS,
        );
        let timer = timers.schedule(self.close_delay_ms, DeferredAction::CloseModal);
        tracing::info!(
            timer = timer.0,
            close_in_ms = self.close_delay_ms,
            "reservation confirmed"
        );
        timer
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::ElementId;

    use super::*;
    use crate::document::MemoryDocument;

    #[test]
    fn submit_shows_confirmation_and_schedules_close() {
        let mut doc = MemoryDocument::reservations_page();
        doc.set_hidden(ElementId::PersonalDataSection, false);
        doc.set_hidden(ElementId::ErrorMessage, false);
        let mut timers = TimerQueue::new();

        let submitter = ReservationSubmitter::new(3000);
        let id = submitter.submit(&mut doc, &mut timers);

        assert_eq!(doc.text(ElementId::StatusMessage), messages::RESERVATION_CONFIRMED);
        assert_eq!(
            doc.colors(ElementId::StatusMessage),
            Some(messages::CONFIRMED_COLORS)
        );
        assert!(doc.is_visible(ElementId::StatusMessage));
        assert!(!doc.is_visible(ElementId::ErrorMessage));
        assert!(!doc.is_visible(ElementId::PersonalDataSection));

        let pending = timers.pending_timers();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, id);
        assert_eq!(pending[0].due_at, 3000);
        assert_eq!(pending[0].action, DeferredAction::CloseModal);
    }

    #[test]
    fn repeated_submissions_queue_independent_closes() {
        let mut doc = MemoryDocument::reservations_page();
        let mut timers = TimerQueue::new();
        let submitter = ReservationSubmitter::new(3000);

        let first = submitter.submit(&mut doc, &mut timers);
        timers.advance_clock(1000);
        let second = submitter.submit(&mut doc, &mut timers);

        assert_ne!(first, second);
        let due: Vec<u64> = timers.pending_timers().iter().map(|t| t.due_at).collect();
        assert_eq!(due, vec![3000, 4000]);
    }
}
