use widget_core::WidgetSettings;

use crate::ui::document::GuiDocument;

/// Pages the desktop shell can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Reservations,
}

impl Route {
    /// Resolves a navigation target. Unknown targets fall back to the landing page.
    pub fn from_href(href: &str, settings: &WidgetSettings) -> Self {
        let target = href.trim().trim_start_matches("./");
        let reservations = settings.reservations_href.trim().trim_start_matches("./");
        if target == reservations {
            Route::Reservations
        } else {
            tracing::warn!(href, "unknown navigation target; showing landing page");
            Route::Landing
        }
    }

    pub fn document(self) -> GuiDocument {
        match self {
            Route::Landing => GuiDocument::landing(),
            Route::Reservations => GuiDocument::reservations(),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Landing => "Inicio",
            Route::Reservations => "Reservas",
        }
    }
}
