//! Simulated availability check. No lookup happens; fixed rules decide.

use shared::{
    domain::{AvailabilityRequest, AvailabilityResult, ElementId},
    error::{Field, UnavailableReason, ValidationError},
    messages,
};

use crate::{config::WidgetSettings, document::Document, panels};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRules {
    /// Zero-padded `HH:MM`; compared as a string.
    pub weekend_cutoff: String,
    pub max_party_size: i64,
}

impl Default for AvailabilityRules {
    fn default() -> Self {
        Self::from(&WidgetSettings::default())
    }
}

impl From<&WidgetSettings> for AvailabilityRules {
    fn from(settings: &WidgetSettings) -> Self {
        Self {
            weekend_cutoff: settings.weekend_cutoff.clone(),
            max_party_size: settings.max_party_size,
        }
    }
}

impl AvailabilityRules {
    /// Validates raw form values into a request.
    pub fn parse_request(
        &self,
        time: &str,
        date: &str,
        party_size: &str,
    ) -> Result<AvailabilityRequest, ValidationError> {
        if time.is_empty() {
            return Err(ValidationError::MissingField(Field::Time));
        }
        if date.is_empty() {
            return Err(ValidationError::MissingField(Field::Date));
        }
        match parse_party_size(party_size) {
            Some(size) if size >= 1 => Ok(AvailabilityRequest::new(time, date, size)),
            _ => Err(ValidationError::InvalidPartySize(party_size.to_string())),
        }
    }

    /// Both rules are checked on every request.
    pub fn evaluate(&self, request: &AvailabilityRequest) -> AvailabilityResult {
        if request.calendar_date().is_none() {
            tracing::warn!(date = %request.date, "date did not parse; weekend rule skipped");
        }

        let mut reasons = Vec::new();
        if request.is_weekend() && request.time.as_str() >= self.weekend_cutoff.as_str() {
            reasons.push(UnavailableReason::LateWeekendSlot);
        }
        if request.party_size > self.max_party_size {
            reasons.push(UnavailableReason::PartyTooLarge);
        }

        if reasons.is_empty() {
            AvailabilityResult::Available
        } else {
            AvailabilityResult::Unavailable(reasons)
        }
    }

    pub fn evaluate_form(&self, time: &str, date: &str, party_size: &str) -> AvailabilityResult {
        match self.parse_request(time, date, party_size) {
            Ok(request) => self.evaluate(&request),
            Err(err) => AvailabilityResult::Invalid(err),
        }
    }
}

/// Reads the form, decides availability and renders the outcome.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityValidator {
    rules: AvailabilityRules,
}

impl AvailabilityValidator {
    pub fn new(rules: AvailabilityRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &AvailabilityRules {
        &self.rules
    }

    pub fn check<D: Document + ?Sized>(&self, doc: &mut D) -> AvailabilityResult {
        panels::hide_all(doc);

        let time = doc.value(ElementId::Hora);
        let date = doc.value(ElementId::Fecha);
        let party_size = doc.value(ElementId::Clientes);
        let result = self.rules.evaluate_form(&time, &date, &party_size);

        match &result {
            AvailabilityResult::Invalid(err) => {
                panels::show_error(doc, err.user_message());
            }
            AvailabilityResult::Unavailable(_) => {
                panels::show_error(doc, messages::NO_AVAILABILITY);
            }
            AvailabilityResult::Available => {
                panels::show_status(
                    doc,
                    messages::AVAILABILITY_CONFIRMED,
                    messages::POSITIVE_COLORS,
                );
                doc.set_hidden(ElementId::PersonalDataSection, false);
            }
        }

        tracing::info!(%time, %date, %party_size, ?result, "availability checked");
        result
    }
}

/// Parses the leading integer of `raw` the way HTML number fields are read:
/// leading whitespace and an optional sign are accepted, parsing stops at the
/// first non-digit and a `0x` prefix switches to hexadecimal. Returns `None`
/// when no digit is found.
pub fn parse_party_size(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for ch in digits.chars() {
        let Some(digit) = ch.to_digit(radix) else {
            break;
        };
        seen_digit = true;
        value = value
            .saturating_mul(i64::from(radix))
            .saturating_add(i64::from(digit));
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SATURDAY: &str = "2025-06-07";
    const SUNDAY: &str = "2025-06-08";
    const TUESDAY: &str = "2025-06-10";

    fn rules() -> AvailabilityRules {
        AvailabilityRules::default()
    }

    #[test]
    fn parses_leading_integer() {
        assert_eq!(parse_party_size("4"), Some(4));
        assert_eq!(parse_party_size("  12 "), Some(12));
        assert_eq!(parse_party_size("4 personas"), Some(4));
        assert_eq!(parse_party_size("4.9"), Some(4));
        assert_eq!(parse_party_size("+3"), Some(3));
        assert_eq!(parse_party_size("-2"), Some(-2));
        assert_eq!(parse_party_size("0x10"), Some(16));
        assert_eq!(parse_party_size(""), None);
        assert_eq!(parse_party_size("cuatro"), None);
        assert_eq!(parse_party_size("-"), None);
        assert_eq!(parse_party_size("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn missing_fields_are_reported_in_form_order() {
        assert_eq!(
            rules().parse_request("", "", ""),
            Err(ValidationError::MissingField(Field::Time))
        );
        assert_eq!(
            rules().parse_request("19:00", "", "2"),
            Err(ValidationError::MissingField(Field::Date))
        );
    }

    #[test]
    fn party_size_below_one_is_invalid() {
        for raw in ["0", "-1", "abc", ""] {
            assert_eq!(
                rules().parse_request("19:00", TUESDAY, raw),
                Err(ValidationError::InvalidPartySize(raw.to_string())),
                "party size {raw:?}"
            );
        }
    }

    #[test]
    fn weekday_with_normal_party_is_always_available() {
        for time in ["00:00", "12:00", "20:30", "23:59"] {
            for party in 1..=8 {
                let request = AvailabilityRequest::new(time, TUESDAY, party);
                assert_eq!(rules().evaluate(&request), AvailabilityResult::Available);
            }
        }
    }

    #[test]
    fn large_parties_are_never_available() {
        for date in [SATURDAY, SUNDAY, TUESDAY] {
            for time in ["12:00", "21:00"] {
                let result = rules().evaluate(&AvailabilityRequest::new(time, date, 9));
                match result {
                    AvailabilityResult::Unavailable(reasons) => {
                        assert!(reasons.contains(&UnavailableReason::PartyTooLarge))
                    }
                    other => panic!("expected unavailable, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn late_weekend_slots_use_string_comparison() {
        for date in [SATURDAY, SUNDAY] {
            assert_eq!(
                rules().evaluate(&AvailabilityRequest::new("20:29", date, 8)),
                AvailabilityResult::Available
            );
            assert_eq!(
                rules().evaluate(&AvailabilityRequest::new("20:30", date, 8)),
                AvailabilityResult::Unavailable(vec![UnavailableReason::LateWeekendSlot])
            );
        }
    }

    #[test]
    fn both_rules_are_recorded_together() {
        assert_eq!(
            rules().evaluate(&AvailabilityRequest::new("22:00", SATURDAY, 12)),
            AvailabilityResult::Unavailable(vec![
                UnavailableReason::LateWeekendSlot,
                UnavailableReason::PartyTooLarge,
            ])
        );
    }

    #[test]
    fn unparsable_date_only_applies_capacity_rule() {
        assert_eq!(
            rules().evaluate_form("23:00", "sábado", "2"),
            AvailabilityResult::Available
        );
        assert_eq!(
            rules().evaluate_form("23:00", "sábado", "20"),
            AvailabilityResult::Unavailable(vec![UnavailableReason::PartyTooLarge])
        );
    }

    #[test]
    fn custom_rules_move_the_limits() {
        let rules = AvailabilityRules {
            weekend_cutoff: "22:00".into(),
            max_party_size: 12,
        };
        assert!(rules.evaluate_form("21:00", SATURDAY, "12").is_available());
        assert!(!rules.evaluate_form("22:00", SATURDAY, "2").is_available());
    }
}
