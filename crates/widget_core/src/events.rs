//! Typed UI events and the registry that maps them to widget actions.

use shared::domain::ElementId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other(String),
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Click(ElementId),
    Submit(ElementId),
    /// Key presses are delivered to the document, not to an element.
    KeyDown(Key),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Submit,
    KeyDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Element(ElementId),
    Document,
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::Click(_) => EventKind::Click,
            UiEvent::Submit(_) => EventKind::Submit,
            UiEvent::KeyDown(_) => EventKind::KeyDown,
        }
    }

    pub fn target(&self) -> Target {
        match self {
            UiEvent::Click(id) | UiEvent::Submit(id) => Target::Element(*id),
            UiEvent::KeyDown(_) => Target::Document,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    OpenModal,
    CloseModal,
    /// Closes the dialog on Escape while it is visible.
    CloseModalOnEscape,
    CheckAvailability,
    SubmitReservation,
    Redirect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub target: Target,
    pub kind: EventKind,
    pub action: Action,
    pub prevent_default: bool,
}

impl Binding {
    pub fn click(id: ElementId, action: Action) -> Self {
        Self {
            target: Target::Element(id),
            kind: EventKind::Click,
            action,
            prevent_default: false,
        }
    }

    pub fn submit(id: ElementId, action: Action) -> Self {
        Self {
            target: Target::Element(id),
            kind: EventKind::Submit,
            action,
            prevent_default: false,
        }
    }

    pub fn key_down(action: Action) -> Self {
        Self {
            target: Target::Document,
            kind: EventKind::KeyDown,
            action,
            prevent_default: false,
        }
    }

    pub fn prevent_default(mut self) -> Self {
        self.prevent_default = true;
        self
    }

    fn matches(&self, event: &UiEvent) -> bool {
        self.kind == event.kind() && self.target == event.target()
    }
}

/// Registered handlers, run in registration order.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    entries: Vec<Binding>,
}

impl Bindings {
    pub fn register(&mut self, binding: Binding) {
        tracing::debug!(
            target_element = ?binding.target,
            kind = ?binding.kind,
            action = ?binding.action,
            "registered ui binding"
        );
        self.entries.push(binding);
    }

    pub fn matching<'a>(&'a self, event: &'a UiEvent) -> impl Iterator<Item = &'a Binding> + 'a {
        self.entries.iter().filter(move |b| b.matches(event))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of dispatching one event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// Number of bindings whose action ran.
    pub handled: usize,
    pub default_prevented: bool,
}
