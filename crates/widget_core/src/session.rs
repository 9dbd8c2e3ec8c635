use shared::protocol::{PageSnapshot, SessionStep};

use crate::{
    document::Document,
    error::Result,
    events::{EventOutcome, Key, UiEvent},
    page::ReservationPage,
};

#[derive(Debug)]
pub enum StepReport {
    Event(EventOutcome),
    InputSet,
    TimersRan(usize),
    Snapshot(Box<PageSnapshot>),
}

/// Applies one scripted step to a page.
pub fn apply_step<D: Document>(
    page: &mut ReservationPage<D>,
    step: &SessionStep,
) -> Result<StepReport> {
    let report = match step {
        SessionStep::SetInput { element, value } => {
            page.document_mut().set_value(*element, value);
            StepReport::InputSet
        }
        SessionStep::Click { element } => StepReport::Event(page.dispatch(UiEvent::Click(*element))),
        SessionStep::Submit { element } => {
            StepReport::Event(page.dispatch(UiEvent::Submit(*element)))
        }
        SessionStep::KeyDown { key } => {
            StepReport::Event(page.dispatch(UiEvent::KeyDown(Key::from_name(key))))
        }
        SessionStep::Advance { ms } => StepReport::TimersRan(page.advance_time(*ms)?),
        SessionStep::Snapshot => StepReport::Snapshot(Box::new(page.snapshot())),
    };
    Ok(report)
}

/// Applies every step in order and collects the snapshots taken along the way.
/// Stops at the first step whose timers fail.
pub fn replay<D: Document>(
    page: &mut ReservationPage<D>,
    steps: &[SessionStep],
) -> Result<Vec<PageSnapshot>> {
    let mut snapshots = Vec::new();
    for step in steps {
        if let StepReport::Snapshot(snapshot) = apply_step(page, step)? {
            snapshots.push(*snapshot);
        }
    }
    Ok(snapshots)
}
