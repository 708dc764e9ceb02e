//! Demo application for the card number field
//!
//! Hosts the control on a small payment form: the card number, an expiry
//! field that takes focus once the number is entered, and a scan button
//! that injects a complete number.

use eframe::egui;

use crate::config::CardFieldConfig;
use crate::error::CardFieldResult;
use crate::ui::CardNumberWidget;

/// Number injected by the "Scan card" button (an Amex test number)
pub const SAMPLE_SCANNED_NUMBER: &str = "378282246310005";

pub struct CardEntryApp {
    widget: CardNumberWidget,
    expiry: String,
    focus_expiry: bool,
    last_complete: Option<String>,
}

impl CardEntryApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: CardFieldConfig,
        initial_number: Option<String>,
    ) -> CardFieldResult<Self> {
        let mut widget = CardNumberWidget::new(config)?;
        if let Some(number) = initial_number {
            widget.set_card_number(&number);
        }

        Ok(Self {
            widget,
            expiry: String::new(),
            focus_expiry: false,
            last_complete: None,
        })
    }
}

impl eframe::App for CardEntryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Payment details");
            ui.separator();

            ui.label("Card number");
            let response = self.widget.show(ui);
            if let Some(number) = response.number_complete {
                self.last_complete = Some(number);
            }
            if response.advance {
                self.focus_expiry = true;
            }

            let controller = self.widget.controller();
            match controller.network() {
                Some(network) => ui.label(network.display_name()),
                None => ui.weak("Unrecognised card"),
            };

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label("Expiry:");
                let expiry = ui.add(
                    egui::TextEdit::singleline(&mut self.expiry)
                        .char_limit(5)
                        .hint_text("MM/YY")
                        .desired_width(60.0),
                );
                if self.focus_expiry {
                    expiry.request_focus();
                    self.focus_expiry = false;
                }
            });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Scan card").clicked() {
                    self.widget.set_card_number(SAMPLE_SCANNED_NUMBER);
                }
                if ui.button("Clear").clicked() {
                    self.widget.set_card_number("");
                    self.last_complete = None;
                }
            });

            if let Some(ref number) = self.last_complete {
                ui.colored_label(egui::Color32::GREEN, format!("Scanned: {number}"));
            }

            ui.separator();
            ui.collapsing("Events", |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("card_events")
                    .max_height(160.0)
                    .show(ui, |ui| {
                        for event in self.widget.events() {
                            ui.monospace(event);
                        }
                    });
            });
        });
    }
}
