//! Text commands of the interactive session and plain-text page rendering.

use anyhow::{anyhow, bail, Context, Result};
use shared::{
    domain::{AvailabilityResult, ElementId, ModalVisibility},
    messages,
    protocol::{PageSnapshot, PanelSnapshot, SessionStep},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Step(SessionStep),
    /// Sleeps in real time, letting deferred closes fire.
    Wait(u64),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  open | close | backdrop | check        click the matching control
  submit                                 submit the reservation form
  esc | key <name>                       press a key
  click <element-id>                     click any element
  set <hora|fecha|clientes> <value>      type into an input
  wait <ms>                              wait in real time
  show                                   print the page state
  help | quit";

pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };

    let click = |element: ElementId| Command::Step(SessionStep::Click { element });
    let command = match verb.to_ascii_lowercase().as_str() {
        "open" => click(ElementId::OpenModalBtn),
        "close" => click(ElementId::CloseModalBtn),
        "backdrop" => click(ElementId::ModalBackdrop),
        "check" => click(ElementId::CheckAvailabilityBtn),
        "submit" => Command::Step(SessionStep::Submit {
            element: ElementId::ReservationFormModal,
        }),
        "esc" | "escape" => Command::Step(SessionStep::KeyDown {
            key: "Escape".to_string(),
        }),
        "key" => {
            let key = parts.next().ok_or_else(|| anyhow!("usage: key <name>"))?;
            Command::Step(SessionStep::KeyDown {
                key: key.to_string(),
            })
        }
        "click" => {
            let id = parts.next().ok_or_else(|| anyhow!("usage: click <element-id>"))?;
            click(id.parse::<ElementId>()?)
        }
        "set" => {
            let id = parts
                .next()
                .ok_or_else(|| anyhow!("usage: set <element-id> <value>"))?;
            let element: ElementId = id.parse()?;
            if !element.is_form_input() {
                bail!("{element} is not an input");
            }
            let value = parts.collect::<Vec<_>>().join(" ");
            Command::Step(SessionStep::SetInput { element, value })
        }
        "wait" => {
            let ms = parts.next().ok_or_else(|| anyhow!("usage: wait <ms>"))?;
            Command::Wait(
                ms.parse()
                    .with_context(|| format!("invalid milliseconds: {ms:?}"))?,
            )
        }
        "show" => Command::Step(SessionStep::Snapshot),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command {other:?}; type help"),
    };
    Ok(Some(command))
}

pub fn result_message(result: &AvailabilityResult) -> &'static str {
    match result {
        AvailabilityResult::Available => messages::AVAILABILITY_CONFIRMED,
        AvailabilityResult::Unavailable(_) => messages::NO_AVAILABILITY,
        AvailabilityResult::Invalid(err) => err.user_message(),
    }
}

fn describe_panel(name: &str, panel: &PanelSnapshot) -> String {
    if !panel.present {
        return format!("{name}: absent");
    }
    if !panel.visible {
        return format!("{name}: hidden");
    }
    match (&panel.background, &panel.foreground) {
        (Some(bg), Some(fg)) => format!("{name}: {:?} ({bg}/{fg})", panel.text),
        _ => format!("{name}: {:?}", panel.text),
    }
}

/// One-line summary of the page state.
pub fn describe(snapshot: &PageSnapshot) -> String {
    let mut parts = vec![format!("t={}ms", snapshot.now_ms)];
    match snapshot.modal {
        Some(ModalVisibility::Visible) => parts.push("modal: visible".into()),
        Some(ModalVisibility::Hidden) => parts.push("modal: hidden".into()),
        None => parts.push(format!("mode: {:?}", snapshot.mode).to_lowercase()),
    }
    if snapshot.modal.is_some() {
        parts.push(describe_panel("status", &snapshot.status));
        parts.push(describe_panel("error", &snapshot.error));
        parts.push(format!(
            "personal data: {}",
            if snapshot.personal_data_visible {
                "shown"
            } else {
                "hidden"
            }
        ));
    }
    if snapshot.pending_timers > 0 {
        parts.push(format!("pending timers: {}", snapshot.pending_timers));
    }
    if let Some(location) = &snapshot.location {
        parts.push(format!("location: {location}"));
    }
    parts.join(" | ")
}
