//! Page-mode dispatch and event routing for one loaded page.

use shared::{
    domain::{AvailabilityResult, ElementId, ModalVisibility, PageMode},
    protocol::PageSnapshot,
};

use crate::{
    availability::{AvailabilityRules, AvailabilityValidator},
    config::WidgetSettings,
    document::{Capabilities, Document},
    error::{Result, WidgetError},
    events::{Action, Binding, Bindings, EventOutcome, Key, UiEvent},
    modal::ModalController,
    submitter::ReservationSubmitter,
    timers::{DeferredAction, ScheduledTask, TimerQueue},
};

/// A loaded page with its widget wiring. Owns the document and the timer
/// queue; every handler runs to completion before the next event.
pub struct ReservationPage<D: Document> {
    document: D,
    settings: WidgetSettings,
    mode: PageMode,
    bindings: Bindings,
    modal: Option<ModalController>,
    availability: Option<AvailabilityValidator>,
    submitter: Option<ReservationSubmitter>,
    timers: TimerQueue,
    timer_step_limit: usize,
    last_availability: Option<AvailabilityResult>,
    redirected_to: Option<String>,
}

impl<D: Document> ReservationPage<D> {
    /// Runs the page-mode dispatch once against the loaded document.
    pub fn load(document: D, settings: WidgetSettings) -> Self {
        let capabilities = document.capabilities();
        let timer_step_limit = settings.timer_step_limit.max(1);
        let mut page = Self {
            document,
            settings,
            mode: PageMode::Inert,
            bindings: Bindings::default(),
            modal: None,
            availability: None,
            submitter: None,
            timers: TimerQueue::new(),
            timer_step_limit,
            last_availability: None,
            redirected_to: None,
        };

        if capabilities.has(ElementId::ReservationModal) {
            page.wire_modal_mode(&capabilities);
        } else if capabilities.has(ElementId::OpenModalBtn) {
            page.wire_redirect_mode();
        }

        tracing::info!(
            mode = ?page.mode,
            bindings = page.bindings.len(),
            "reservation page loaded"
        );
        page
    }

    fn wire_modal_mode(&mut self, capabilities: &Capabilities) {
        self.mode = PageMode::Modal;
        self.modal = Some(ModalController::attach(&self.document));

        if capabilities.has(ElementId::OpenModalBtn) {
            self.bindings.register(
                Binding::click(ElementId::OpenModalBtn, Action::OpenModal).prevent_default(),
            );
        }
        for closer in [ElementId::CloseModalBtn, ElementId::ModalBackdrop] {
            if capabilities.has(closer) {
                self.bindings
                    .register(Binding::click(closer, Action::CloseModal));
            }
        }
        self.bindings
            .register(Binding::key_down(Action::CloseModalOnEscape));

        if capabilities.has(ElementId::CheckAvailabilityBtn) {
            self.availability = Some(AvailabilityValidator::new(AvailabilityRules::from(
                &self.settings,
            )));
            self.bindings.register(
                Binding::click(ElementId::CheckAvailabilityBtn, Action::CheckAvailability)
                    .prevent_default(),
            );
        }
        if capabilities.has(ElementId::ReservationFormModal) {
            self.submitter = Some(ReservationSubmitter::new(self.settings.close_delay_ms));
            self.bindings.register(
                Binding::submit(ElementId::ReservationFormModal, Action::SubmitReservation)
                    .prevent_default(),
            );
        }
    }

    fn wire_redirect_mode(&mut self) {
        self.mode = PageMode::Redirect;
        self.bindings.register(
            Binding::click(ElementId::OpenModalBtn, Action::Redirect).prevent_default(),
        );
    }

    pub fn dispatch(&mut self, event: UiEvent) -> EventOutcome {
        let matched: Vec<Binding> = self.bindings.matching(&event).copied().collect();
        let mut outcome = EventOutcome::default();
        for binding in matched {
            if binding.prevent_default {
                outcome.default_prevented = true;
            }
            if self.run_action(binding.action, &event) {
                outcome.handled += 1;
            }
        }
        tracing::debug!(
            ?event,
            handled = outcome.handled,
            default_prevented = outcome.default_prevented,
            "dispatched ui event"
        );
        outcome
    }

    fn run_action(&mut self, action: Action, event: &UiEvent) -> bool {
        match action {
            Action::OpenModal => match self.modal.as_mut() {
                Some(modal) => {
                    modal.open(&mut self.document);
                    true
                }
                None => false,
            },
            Action::CloseModal => match self.modal.as_mut() {
                Some(modal) => {
                    modal.close(&mut self.document);
                    true
                }
                None => false,
            },
            Action::CloseModalOnEscape => match self.modal.as_mut() {
                Some(modal) if *event == UiEvent::KeyDown(Key::Escape) && modal.is_open() => {
                    modal.close(&mut self.document);
                    true
                }
                _ => false,
            },
            Action::CheckAvailability => match self.availability.as_ref() {
                Some(validator) => {
                    self.last_availability = Some(validator.check(&mut self.document));
                    true
                }
                None => false,
            },
            Action::SubmitReservation => match self.submitter.as_ref() {
                Some(submitter) => {
                    submitter.submit(&mut self.document, &mut self.timers);
                    true
                }
                None => false,
            },
            Action::Redirect => {
                tracing::info!(href = %self.settings.reservations_href, "redirecting");
                self.document.navigate(&self.settings.reservations_href);
                self.redirected_to = Some(self.settings.reservations_href.clone());
                true
            }
        }
    }

    fn run_task(&mut self, task: ScheduledTask) {
        match task.action {
            DeferredAction::CloseModal => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.close(&mut self.document);
                }
            }
        }
        tracing::info!(
            timer = task.id.0,
            now_ms = self.timers.now_ms(),
            action = ?task.action,
            "timer fired"
        );
    }

    /// Advances the virtual clock and runs every timer that became due.
    /// Returns the number of timers that ran.
    pub fn advance_time(&mut self, delta_ms: u64) -> Result<usize> {
        self.timers.advance_clock(delta_ms);
        self.run_due_timers()
    }

    pub fn advance_time_to(&mut self, target_ms: u64) -> Result<usize> {
        self.timers.advance_clock_to(target_ms)?;
        self.run_due_timers()
    }

    pub fn run_due_timers(&mut self) -> Result<usize> {
        self.run_timer_queue(false)
    }

    /// Runs every pending timer, moving the clock to each due time.
    pub fn flush(&mut self) -> Result<usize> {
        self.run_timer_queue(true)
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(WidgetError::InvalidSetting {
                key: "timer_step_limit",
                reason: "requires at least 1 step".into(),
            });
        }
        self.timer_step_limit = max_steps;
        Ok(())
    }

    pub fn timer_step_limit(&self) -> usize {
        self.timer_step_limit
    }

    fn run_timer_queue(&mut self, advance_clock: bool) -> Result<usize> {
        let mut steps = 0usize;
        loop {
            let has_task = if advance_clock {
                !self.timers.is_empty()
            } else {
                self.timers.has_due()
            };
            if !has_task {
                break;
            }
            steps += 1;
            if steps > self.timer_step_limit {
                tracing::warn!(limit = self.timer_step_limit, "timer step limit exceeded");
                return Err(WidgetError::TimerStepLimit {
                    limit: self.timer_step_limit,
                    now_ms: self.timers.now_ms(),
                    next_due_at: self.timers.next_due_at(),
                });
            }
            let task = if advance_clock {
                self.timers.pop_next()
            } else {
                self.timers.pop_due()
            };
            match task {
                Some(task) => self.run_task(task),
                None => break,
            }
        }
        Ok(steps)
    }

    pub fn mode(&self) -> PageMode {
        self.mode
    }

    /// `None` when the page has no dialog.
    pub fn modal_visibility(&self) -> Option<ModalVisibility> {
        self.modal.as_ref().map(ModalController::visibility)
    }

    pub fn last_availability(&self) -> Option<&AvailabilityResult> {
        self.last_availability.as_ref()
    }

    pub fn settings(&self) -> &WidgetSettings {
        &self.settings
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut TimerQueue {
        &mut self.timers
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Direct document access for input edits. Element visibility should go
    /// through events so the controller state stays in sync.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    /// Target of the last redirect triggered by this page.
    pub fn redirected_to(&self) -> Option<&str> {
        self.redirected_to.as_deref()
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            mode: self.mode,
            modal: self.modal_visibility(),
            status: self.document.panel_snapshot(ElementId::StatusMessage),
            error: self.document.panel_snapshot(ElementId::ErrorMessage),
            personal_data_visible: self.document.is_visible(ElementId::PersonalDataSection),
            last_availability: self.last_availability.clone(),
            location: self.redirected_to.clone(),
            now_ms: self.timers.now_ms(),
            pending_timers: self.timers.len(),
        }
    }
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
