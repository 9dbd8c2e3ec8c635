//! Port between the widget logic and whatever renders the page.

use std::collections::{BTreeMap, BTreeSet};

use shared::{
    domain::{ElementId, PanelColors},
    protocol::PanelSnapshot,
};

/// Minimal view of a page document. Writes to elements the page does not
/// contain are ignored and reads return empty values.
pub trait Document {
    fn contains(&self, id: ElementId) -> bool;
    fn is_hidden(&self, id: ElementId) -> bool;
    fn set_hidden(&mut self, id: ElementId, hidden: bool);
    fn text(&self, id: ElementId) -> String;
    fn set_text(&mut self, id: ElementId, text: &str);
    fn colors(&self, id: ElementId) -> Option<PanelColors>;
    fn set_colors(&mut self, id: ElementId, colors: PanelColors);
    fn value(&self, id: ElementId) -> String;
    fn set_value(&mut self, id: ElementId, value: &str);
    /// Restores every field of the form to its default (empty) value.
    fn reset_form(&mut self, form: ElementId);
    fn navigate(&mut self, href: &str);

    fn is_visible(&self, id: ElementId) -> bool {
        self.contains(id) && !self.is_hidden(id)
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::probe(self)
    }

    fn panel_snapshot(&self, id: ElementId) -> PanelSnapshot {
        let colors = self.colors(id);
        PanelSnapshot {
            present: self.contains(id),
            visible: self.is_visible(id),
            text: self.text(id),
            background: colors.map(|c| c.background.to_string()),
            foreground: colors.map(|c| c.foreground.to_string()),
        }
    }
}

/// Set of elements present on a page when it loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    present: BTreeSet<ElementId>,
}

impl Capabilities {
    pub fn probe<D: Document + ?Sized>(document: &D) -> Self {
        Self {
            present: ElementId::ALL
                .into_iter()
                .filter(|id| document.contains(*id))
                .collect(),
        }
    }

    pub fn has(&self, id: ElementId) -> bool {
        self.present.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.present.iter().copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementState {
    pub hidden: bool,
    pub text: String,
    pub value: String,
    pub colors: Option<PanelColors>,
}

/// In-memory document used by the CLI and by tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: BTreeMap<ElementId, ElementState>,
    location: Option<String>,
    navigations: Vec<String>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reservations page markup: dialog and panels start hidden.
    pub fn reservations_page() -> Self {
        let mut doc = Self::new();
        for id in ElementId::ALL {
            let hidden = matches!(
                id,
                ElementId::ReservationModal
                    | ElementId::ErrorMessage
                    | ElementId::PersonalDataSection
            );
            doc.elements.insert(
                id,
                ElementState {
                    hidden,
                    ..ElementState::default()
                },
            );
        }
        doc
    }

    /// Landing page: only the open control, which links to the reservations page.
    pub fn landing_page() -> Self {
        Self::new().with_element(ElementId::OpenModalBtn)
    }

    pub fn with_element(mut self, id: ElementId) -> Self {
        self.elements.entry(id).or_default();
        self
    }

    pub fn without_element(mut self, id: ElementId) -> Self {
        self.elements.remove(&id);
        self
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementState> {
        self.elements.get(&id)
    }

    /// Current location after the last navigation, if any.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }
}

impl Document for MemoryDocument {
    fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    fn is_hidden(&self, id: ElementId) -> bool {
        self.elements.get(&id).is_some_and(|el| el.hidden)
    }

    fn set_hidden(&mut self, id: ElementId, hidden: bool) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.hidden = hidden;
        }
    }

    fn text(&self, id: ElementId) -> String {
        self.elements
            .get(&id)
            .map(|el| el.text.clone())
            .unwrap_or_default()
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.text = text.to_string();
        }
    }

    fn colors(&self, id: ElementId) -> Option<PanelColors> {
        self.elements.get(&id).and_then(|el| el.colors)
    }

    fn set_colors(&mut self, id: ElementId, colors: PanelColors) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.colors = Some(colors);
        }
    }

    fn value(&self, id: ElementId) -> String {
        self.elements
            .get(&id)
            .map(|el| el.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&mut self, id: ElementId, value: &str) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.value = value.to_string();
        }
    }

    fn reset_form(&mut self, form: ElementId) {
        if !self.contains(form) {
            return;
        }
        for id in ElementId::FORM_INPUTS {
            self.set_value(id, "");
        }
    }

    fn navigate(&mut self, href: &str) {
        self.location = Some(href.to_string());
        self.navigations.push(href.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_to_missing_elements_are_ignored() {
        let mut doc = MemoryDocument::landing_page();
        doc.set_text(ElementId::StatusMessage, "hola");
        doc.set_hidden(ElementId::ErrorMessage, false);
        doc.set_value(ElementId::Hora, "19:00");

        assert_eq!(doc.text(ElementId::StatusMessage), "");
        assert!(!doc.is_visible(ElementId::ErrorMessage));
        assert_eq!(doc.value(ElementId::Hora), "");
        assert!(doc.is_visible(ElementId::OpenModalBtn));
    }

    #[test]
    fn capabilities_list_present_elements() {
        let doc = MemoryDocument::reservations_page().without_element(ElementId::ModalBackdrop);
        let caps = doc.capabilities();
        assert!(caps.has(ElementId::ReservationModal));
        assert!(!caps.has(ElementId::ModalBackdrop));
        assert_eq!(caps.iter().count(), ElementId::ALL.len() - 1);
    }

    #[test]
    fn form_reset_clears_inputs() {
        let mut doc = MemoryDocument::reservations_page();
        doc.set_value(ElementId::Hora, "19:00");
        doc.set_value(ElementId::Fecha, "2025-06-07");
        doc.set_value(ElementId::Clientes, "4");
        doc.reset_form(ElementId::ReservationFormModal);
        for id in ElementId::FORM_INPUTS {
            assert_eq!(doc.value(id), "");
        }
    }

    #[test]
    fn reservations_page_starts_with_dialog_hidden() {
        let doc = MemoryDocument::reservations_page();
        assert!(doc.is_hidden(ElementId::ReservationModal));
        assert!(!doc.is_visible(ElementId::PersonalDataSection));
        assert!(doc.is_visible(ElementId::StatusMessage));
    }
}
