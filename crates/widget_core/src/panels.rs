use shared::domain::{ElementId, PanelColors};

use crate::document::Document;

/// Hides status, error and personal-data panels.
pub fn hide_all<D: Document + ?Sized>(doc: &mut D) {
    doc.set_hidden(ElementId::StatusMessage, true);
    doc.set_hidden(ElementId::ErrorMessage, true);
    doc.set_hidden(ElementId::PersonalDataSection, true);
}

pub fn show_status<D: Document + ?Sized>(doc: &mut D, text: &str, colors: PanelColors) {
    doc.set_text(ElementId::StatusMessage, text);
    doc.set_colors(ElementId::StatusMessage, colors);
    doc.set_hidden(ElementId::StatusMessage, false);
}

pub fn show_error<D: Document + ?Sized>(doc: &mut D, text: &str) {
    doc.set_text(ElementId::ErrorMessage, text);
    doc.set_hidden(ElementId::ErrorMessage, false);
}
