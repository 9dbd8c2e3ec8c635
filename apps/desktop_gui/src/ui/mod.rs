//! UI layer for the desktop shell: app, page rendering and the document port.

pub mod app;
pub mod document;

pub use app::ReservationGuiApp;
