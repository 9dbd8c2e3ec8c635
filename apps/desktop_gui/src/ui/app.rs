use std::time::{Duration, Instant};

use eframe::egui;
use shared::domain::ElementId;
use widget_core::{Document, Key, ReservationPage, WidgetSettings};

use crate::{
    controller::{events::FrameEvents, navigation::Route},
    ui::document::{GuiDocument, GuiElement},
};

const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(0xf8, 0xd7, 0xda);
const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(0x72, 0x1c, 0x24);
const FIELD_WIDTH: f32 = 260.0;

pub struct ReservationGuiApp {
    settings: WidgetSettings,
    route: Route,
    page: ReservationPage<GuiDocument>,
    /// Origin of the page's virtual clock.
    loaded_at: Instant,
}

impl ReservationGuiApp {
    pub fn new(settings: WidgetSettings, route: Route) -> Self {
        let page = ReservationPage::load(route.document(), settings.clone());
        Self {
            settings,
            route,
            page,
            loaded_at: Instant::now(),
        }
    }

    fn navigate(&mut self, href: &str) {
        let route = Route::from_href(href, &self.settings);
        tracing::info!(href, ?route, "navigating");
        self.route = route;
        self.page = ReservationPage::load(route.document(), self.settings.clone());
        self.loaded_at = Instant::now();
    }

    fn sync_clock(&mut self) {
        let elapsed = u64::try_from(self.loaded_at.elapsed().as_millis()).unwrap_or(u64::MAX);
        let target = elapsed.max(self.page.now_ms());
        if let Err(err) = self.page.advance_time_to(target) {
            tracing::warn!(%err, "failed to advance page clock");
        }
    }

    fn show_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Restaurante");
                ui.separator();
                ui.label(self.route.title());
            });
        });
    }

    fn show_page_body(&self, ctx: &egui::Context, events: &mut FrameEvents) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(24.0);
            ui.vertical_centered(|ui| {
                match self.route {
                    Route::Landing => {
                        ui.heading("Bienvenido");
                        ui.label("Cocina de temporada en el centro de la ciudad.");
                    }
                    Route::Reservations => {
                        ui.heading("Reserva tu mesa");
                        ui.label("Comprueba la disponibilidad y confirma tu reserva en línea.");
                    }
                }
                ui.add_space(16.0);
                if self.page.document().contains(ElementId::OpenModalBtn)
                    && ui
                        .add(egui::Button::new(
                            egui::RichText::new("Reservar mesa").strong().size(16.0),
                        ))
                        .clicked()
                {
                    events.click(ElementId::OpenModalBtn);
                }
            });
        });
    }

    fn show_backdrop(&self, ctx: &egui::Context, events: &mut FrameEvents) {
        let screen = ctx.screen_rect();
        egui::Area::new(egui::Id::new(ElementId::ModalBackdrop.as_str()))
            .order(egui::Order::Middle)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                let response = ui.allocate_rect(screen, egui::Sense::click());
                ui.painter()
                    .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(150));
                if response.clicked() {
                    events.click(ElementId::ModalBackdrop);
                }
            });
    }

    fn show_modal(&mut self, ctx: &egui::Context, events: &mut FrameEvents) {
        self.show_backdrop(ctx, events);

        egui::Window::new("Reservar mesa")
            .id(egui::Id::new(ElementId::ReservationModal.as_str()))
            .order(egui::Order::Foreground)
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Reservar mesa").strong().size(18.0));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✕").clicked() {
                            events.click(ElementId::CloseModalBtn);
                        }
                    });
                });
                ui.separator();

                self.show_input(ui, ElementId::Fecha, "Fecha", "AAAA-MM-DD");
                self.show_input(ui, ElementId::Hora, "Hora", "HH:MM");
                self.show_input(ui, ElementId::Clientes, "Comensales", "2");

                ui.add_space(6.0);
                if ui.button("Comprobar Disponibilidad").clicked() {
                    events.click(ElementId::CheckAvailabilityBtn);
                }
                ui.add_space(6.0);

                let doc = self.page.document();
                if let Some(status) = visible(doc, ElementId::StatusMessage) {
                    let (fill, text) = status.color32_pair().unwrap_or((
                        ui.visuals().faint_bg_color,
                        ui.visuals().text_color(),
                    ));
                    show_panel(ui, &status.text, fill, text);
                }
                if let Some(error) = visible(doc, ElementId::ErrorMessage) {
                    show_panel(ui, &error.text, ERROR_FILL, ERROR_TEXT);
                }

                if visible(doc, ElementId::PersonalDataSection).is_some() {
                    ui.separator();
                    self.show_personal_data(ui, events);
                }
            });
    }

    fn show_input(&mut self, ui: &mut egui::Ui, id: ElementId, label: &str, hint: &str) {
        let mut value = self.page.document().value(id);
        ui.label(egui::RichText::new(label).strong());
        let edit = egui::TextEdit::singleline(&mut value)
            .hint_text(hint)
            .desired_width(FIELD_WIDTH);
        if ui.add(edit).changed() {
            self.page.document_mut().set_value(id, &value);
        }
    }

    fn show_personal_data(&mut self, ui: &mut egui::Ui, events: &mut FrameEvents) {
        let guest = &mut self.page.document_mut().guest;
        for (label, value) in [
            ("Nombre", &mut guest.name),
            ("Correo electrónico", &mut guest.email),
            ("Teléfono", &mut guest.phone),
        ] {
            ui.label(egui::RichText::new(label).strong());
            ui.add(egui::TextEdit::singleline(value).desired_width(FIELD_WIDTH));
        }
        ui.add_space(6.0);
        if ui.button("Confirmar reserva").clicked() {
            events.submit(ElementId::ReservationFormModal);
        }
    }

    fn request_timer_repaint(&self, ctx: &egui::Context) {
        if let Some(due) = self.page.timers().next_due_at() {
            let wait = due.saturating_sub(self.page.now_ms());
            ctx.request_repaint_after(Duration::from_millis(wait));
        }
    }
}

fn visible(doc: &GuiDocument, id: ElementId) -> Option<&GuiElement> {
    doc.element(id).filter(|el| !el.hidden)
}

fn show_panel(ui: &mut egui::Ui, text: &str, fill: egui::Color32, color: egui::Color32) {
    egui::Frame::NONE
        .fill(fill)
        .corner_radius(6.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.set_width(FIELD_WIDTH);
            ui.label(egui::RichText::new(text).color(color));
        });
}

impl eframe::App for ReservationGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_clock();

        let mut events = FrameEvents::default();
        self.show_header(ctx);
        self.show_page_body(ctx, &mut events);
        if self.page.modal_visibility().is_some_and(|v| v.is_visible()) {
            self.show_modal(ctx, &mut events);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            events.key_down(Key::Escape);
        }

        if !events.is_empty() {
            events.dispatch_into(&mut self.page);
            ctx.request_repaint();
        }
        if let Some(href) = self.page.document_mut().take_navigation() {
            self.navigate(&href);
            ctx.request_repaint();
        }
        self.request_timer_repaint(ctx);
    }
}
