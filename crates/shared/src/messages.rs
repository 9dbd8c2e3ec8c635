//! User-facing copy and panel colors of the reservation widget.

use crate::domain::PanelColors;

pub const STATUS_PROMPT: &str = "Presiona \"Comprobar Disponibilidad\" para verificar mesas.";
pub const INVALID_INPUT: &str =
    "⛔ Por favor, introduce la fecha, hora y un número de clientes válido (mínimo 1).";
pub const NO_AVAILABILITY: &str = "❌ Lo sentimos, no hay disponibilidad para estas condiciones.";
pub const AVAILABILITY_CONFIRMED: &str =
    "✅ ¡Disponibilidad Confirmada! Completa tus datos para finalizar la reserva.";
pub const RESERVATION_CONFIRMED: &str =
    "🎉 ¡Reserva Confirmada con Éxito! Recibirás un correo de confirmación pronto.";

/// Prompt and availability confirmation.
pub const POSITIVE_COLORS: PanelColors = PanelColors {
    background: "#d4edda",
    foreground: "#155724",
};

/// Booking confirmation.
pub const CONFIRMED_COLORS: PanelColors = PanelColors {
    background: "#d1e7dd",
    foreground: "#0f5132",
};
