use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{ParseElementError, UnavailableReason, ValidationError};

/// Identifiers of the page elements the reservation widget binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementId {
    ReservationModal,
    OpenModalBtn,
    CloseModalBtn,
    ModalBackdrop,
    CheckAvailabilityBtn,
    StatusMessage,
    ErrorMessage,
    PersonalDataSection,
    ReservationFormModal,
    Hora,
    Fecha,
    Clientes,
}

impl ElementId {
    pub const ALL: [ElementId; 12] = [
        ElementId::ReservationModal,
        ElementId::OpenModalBtn,
        ElementId::CloseModalBtn,
        ElementId::ModalBackdrop,
        ElementId::CheckAvailabilityBtn,
        ElementId::StatusMessage,
        ElementId::ErrorMessage,
        ElementId::PersonalDataSection,
        ElementId::ReservationFormModal,
        ElementId::Hora,
        ElementId::Fecha,
        ElementId::Clientes,
    ];

    /// Inputs cleared by a reset of the reservation form.
    pub const FORM_INPUTS: [ElementId; 3] = [ElementId::Hora, ElementId::Fecha, ElementId::Clientes];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementId::ReservationModal => "reservation-modal",
            ElementId::OpenModalBtn => "open-modal-btn",
            ElementId::CloseModalBtn => "close-modal-btn",
            ElementId::ModalBackdrop => "modal-backdrop",
            ElementId::CheckAvailabilityBtn => "check-availability-btn",
            ElementId::StatusMessage => "status-message",
            ElementId::ErrorMessage => "error-message",
            ElementId::PersonalDataSection => "personal-data-section",
            ElementId::ReservationFormModal => "reservation-form-modal",
            ElementId::Hora => "hora",
            ElementId::Fecha => "fecha",
            ElementId::Clientes => "clientes",
        }
    }

    pub fn is_form_input(self) -> bool {
        Self::FORM_INPUTS.contains(&self)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementId {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('#');
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == trimmed)
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalVisibility {
    #[default]
    Hidden,
    Visible,
}

impl ModalVisibility {
    pub fn is_visible(self) -> bool {
        self == ModalVisibility::Visible
    }
}

/// Operating mode picked once when the page loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageMode {
    /// The reservation dialog is on the page and fully wired.
    Modal,
    /// No dialog; the open control navigates to the reservations page.
    Redirect,
    /// Neither the dialog nor the open control exist.
    Inert,
}

/// Background/foreground pair applied to the status panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanelColors {
    pub background: &'static str,
    pub foreground: &'static str,
}

/// Form values of one availability check, taken after presence validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    /// Zero-padded `HH:MM`.
    pub time: String,
    /// Raw `YYYY-MM-DD` date value.
    pub date: String,
    pub party_size: i64,
}

impl AvailabilityRequest {
    pub fn new(time: impl Into<String>, date: impl Into<String>, party_size: i64) -> Self {
        Self {
            time: time.into(),
            date: date.into(),
            party_size,
        }
    }

    /// Calendar date of the request, read as a date-only value so the weekday
    /// never depends on the local timezone.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    pub fn weekday(&self) -> Option<Weekday> {
        self.calendar_date().map(|date| date.weekday())
    }

    /// Saturday or Sunday. Dates that do not parse never count as weekend.
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Some(Weekday::Sat | Weekday::Sun))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum AvailabilityResult {
    Available,
    Unavailable(Vec<UnavailableReason>),
    Invalid(ValidationError),
}

impl AvailabilityResult {
    pub fn is_available(&self) -> bool {
        matches!(self, AvailabilityResult::Available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_ids_round_trip_through_their_dom_names() {
        for id in ElementId::ALL {
            assert_eq!(id.as_str().parse::<ElementId>().expect("parse"), id);
        }
        assert_eq!("#fecha".parse::<ElementId>().expect("hash prefix"), ElementId::Fecha);
        assert!("submit-btn".parse::<ElementId>().is_err());
    }

    #[test]
    fn element_id_serde_name_matches_dom_id() {
        let json = serde_json::to_string(&ElementId::CheckAvailabilityBtn).expect("serialize");
        assert_eq!(json, "\"check-availability-btn\"");
    }

    #[test]
    fn weekend_detection_uses_calendar_weekday() {
        // 2025-06-07 is a Saturday, 2025-06-08 a Sunday, 2025-06-10 a Tuesday.
        assert!(AvailabilityRequest::new("19:00", "2025-06-07", 2).is_weekend());
        assert!(AvailabilityRequest::new("19:00", "2025-06-08", 2).is_weekend());
        assert!(!AvailabilityRequest::new("19:00", "2025-06-10", 2).is_weekend());
        assert_eq!(
            AvailabilityRequest::new("19:00", "2025-06-10", 2).weekday(),
            Some(Weekday::Tue)
        );
    }

    #[test]
    fn unparsable_date_is_not_weekend() {
        let request = AvailabilityRequest::new("21:00", "next saturday", 2);
        assert_eq!(request.calendar_date(), None);
        assert!(!request.is_weekend());
    }
}
