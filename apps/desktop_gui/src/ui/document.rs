//! `Document` implementation backing the egui rendering.

use std::collections::BTreeMap;

use eframe::egui::Color32;
use shared::domain::{ElementId, PanelColors};
use widget_core::Document;

#[derive(Debug, Clone, Default)]
pub struct GuiElement {
    pub hidden: bool,
    pub text: String,
    pub value: String,
    pub colors: Option<PanelColors>,
}

impl GuiElement {
    /// Fill and text colors of a styled panel.
    pub fn color32_pair(&self) -> Option<(Color32, Color32)> {
        let colors = self.colors?;
        Some((
            parse_hex_color(colors.background)?,
            parse_hex_color(colors.foreground)?,
        ))
    }
}

/// Personal data typed into the reservation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Default)]
pub struct GuiDocument {
    elements: BTreeMap<ElementId, GuiElement>,
    pub guest: GuestDetails,
    pending_navigation: Option<String>,
}

impl GuiDocument {
    pub fn landing() -> Self {
        let mut doc = Self::default();
        doc.elements
            .insert(ElementId::OpenModalBtn, GuiElement::default());
        doc
    }

    pub fn reservations() -> Self {
        let mut doc = Self::default();
        for id in ElementId::ALL {
            let hidden = matches!(
                id,
                ElementId::ReservationModal
                    | ElementId::ErrorMessage
                    | ElementId::PersonalDataSection
            );
            doc.elements.insert(
                id,
                GuiElement {
                    hidden,
                    ..GuiElement::default()
                },
            );
        }
        doc
    }

    pub fn element(&self, id: ElementId) -> Option<&GuiElement> {
        self.elements.get(&id)
    }

    /// Navigation requested by the widget since the last frame.
    pub fn take_navigation(&mut self) -> Option<String> {
        self.pending_navigation.take()
    }
}

impl Document for GuiDocument {
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
        self.guest = GuestDetails::default();
    }

    fn navigate(&mut self, href: &str) {
        self.pending_navigation = Some(href.to_string());
    }
}

pub fn parse_hex_color(raw: &str) -> Option<Color32> {
    match Color32::from_hex(raw) {
        Ok(color) => Some(color),
        Err(err) => {
            tracing::warn!(raw, ?err, "unparsable panel color");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use shared::messages;

    use super::*;

    #[test]
    fn parses_panel_colors() {
        assert_eq!(
            parse_hex_color("#d4edda"),
            Some(Color32::from_rgb(0xd4, 0xed, 0xda))
        );
        assert_eq!(parse_hex_color("d4edda"), None);
        assert_eq!(parse_hex_color("#d4edd"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn form_reset_also_clears_guest_details() {
        let mut doc = GuiDocument::reservations();
        doc.set_value(ElementId::Fecha, "2025-06-07");
        doc.guest.name = "Ana".into();
        doc.reset_form(ElementId::ReservationFormModal);
        assert_eq!(doc.value(ElementId::Fecha), "");
        assert_eq!(doc.guest, GuestDetails::default());
    }

    #[test]
    fn styled_status_panel_maps_to_color32() {
        let mut doc = GuiDocument::reservations();
        doc.set_colors(ElementId::StatusMessage, messages::CONFIRMED_COLORS);
        let (fill, text) = doc
            .element(ElementId::StatusMessage)
            .and_then(GuiElement::color32_pair)
            .expect("colors");
        assert_eq!(fill, Color32::from_rgb(0xd1, 0xe7, 0xdd));
        assert_eq!(text, Color32::from_rgb(0x0f, 0x51, 0x32));
    }

    #[test]
    fn navigation_is_taken_once() {
        let mut doc = GuiDocument::landing();
        doc.navigate("reservas.html");
        assert_eq!(doc.take_navigation().as_deref(), Some("reservas.html"));
        assert_eq!(doc.take_navigation(), None);
    }
}
