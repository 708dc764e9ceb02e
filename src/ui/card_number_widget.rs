//! egui rendering of the card number field
//!
//! Draws the active segment group as a row of text edits, feeds edits and
//! backspaces through the controller, and applies the controller's focus
//! requests on the following frame.

use eframe::egui;
use log::warn;

use crate::classifier::Layout;
use crate::config::CardFieldConfig;
use crate::controller::{CardNumberController, InputEvent, ProposedEdit};
use crate::error::CardFieldResult;
use crate::host::CardNumberHost;
use crate::segment::SegmentId;

/// Entries kept in the host's event log
const EVENT_LOG_LIMIT: usize = 50;

/// Approximate monospace glyph width used to size segment cells
const DIGIT_WIDTH: f32 = 10.0;

/// Host state collected from the controller between frames
///
/// Segment text is not mirrored here: the widget redraws every cell from the
/// controller each frame, so `set_segment_text` keeps its no-op default.
#[derive(Debug)]
pub struct EguiHost {
    visible: [bool; 3],
    pending_focus: Option<SegmentId>,
    completed_number: Option<String>,
    advance_requested: bool,
    events: Vec<String>,
}

impl Default for EguiHost {
    fn default() -> Self {
        Self {
            // The controller starts out showing the single field
            visible: [true, false, false],
            pending_focus: None,
            completed_number: None,
            advance_requested: false,
            events: Vec::new(),
        }
    }
}

impl EguiHost {
    pub fn is_visible(&self, layout: Layout) -> bool {
        self.visible[layout.index()]
    }

    pub fn events(&self) -> &[String] {
        &self.events
    }

    fn record(&mut self, event: String) {
        if self.events.len() == EVENT_LOG_LIMIT {
            self.events.remove(0);
        }
        self.events.push(event);
    }
}

impl CardNumberHost for EguiHost {
    fn set_group_visible(&mut self, layout: Layout, visible: bool) {
        self.visible[layout.index()] = visible;
        if visible {
            self.record(format!("showing {layout:?} layout"));
        }
    }

    fn request_focus(&mut self, segment: SegmentId) {
        self.pending_focus = Some(segment);
    }

    fn notify_number_complete(&mut self, number: &str) {
        self.record(format!("number complete: {number}"));
        self.completed_number = Some(number.to_string());
    }

    fn notify_advance_to_next_form_field(&mut self) {
        self.record("advance to next field".to_string());
        self.advance_requested = true;
    }
}

/// What happened in the widget during one frame
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WidgetResponse {
    /// Set when an injected number filled every segment
    pub number_complete: Option<String>,
    /// Set when entry finished and the form should move to its next field
    pub advance: bool,
}

enum CellEvent {
    Edited { segment: SegmentId, before: String, after: String },
    Backspace(SegmentId),
}

pub struct CardNumberWidget {
    controller: CardNumberController<EguiHost>,
    /// Focus request waiting for its segment to be drawn
    pending_focus: Option<SegmentId>,
}

impl CardNumberWidget {
    pub fn new(config: CardFieldConfig) -> CardFieldResult<Self> {
        Ok(Self {
            controller: CardNumberController::with_host(config, EguiHost::default())?,
            pending_focus: None,
        })
    }

    pub fn controller(&self) -> &CardNumberController<EguiHost> {
        &self.controller
    }

    pub fn events(&self) -> &[String] {
        self.controller.host().map(EguiHost::events).unwrap_or_default()
    }

    /// Fill the field with a complete number, as a card scanner would
    pub fn set_card_number(&mut self, number: &str) {
        if let Err(e) = self
            .controller
            .handle_event(InputEvent::SetFullNumber(number.to_string()))
        {
            warn!("Failed to set card number: {e}");
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) -> WidgetResponse {
        let ctx = ui.ctx().clone();
        let fade = self.controller.config().transition_ms as f32 / 1000.0;
        let opacities = Layout::ALL.map(|layout| {
            let visible = self
                .controller
                .host()
                .is_some_and(|host| host.is_visible(layout));
            ctx.animate_bool_with_time(group_id(layout), visible, fade)
        });

        let layout = self.controller.active_layout();
        let cells: Vec<(SegmentId, String, usize)> = self
            .controller
            .segments(layout)
            .iter()
            .map(|segment| (segment.id(), segment.text().to_string(), segment.max_length()))
            .collect();
        let backspace = ui.input(|i| i.key_pressed(egui::Key::Backspace));

        let mut events = Vec::new();
        let row = ui.horizontal(|ui| {
            ui.set_opacity(opacities[layout.index()]);
            for (segment, text, capacity) in &cells {
                let mut buffer = text.clone();
                let response = ui.add(segment_cell(&mut buffer, *segment, *capacity));

                if self.pending_focus == Some(*segment) {
                    response.request_focus();
                    self.pending_focus = None;
                }

                if response.changed() {
                    events.push(CellEvent::Edited {
                        segment: *segment,
                        before: text.clone(),
                        after: buffer.clone(),
                    });
                }
                if response.has_focus() && backspace && buffer.is_empty() {
                    events.push(CellEvent::Backspace(*segment));
                }
            }
        })
        .response
        .rect;

        // Groups hidden by a transition stay drawn over the active row until
        // their fade-out finishes
        for hidden in Layout::ALL {
            let opacity = opacities[hidden.index()];
            if hidden == layout || opacity <= 0.0 {
                continue;
            }
            let mut overlay = ui.new_child(
                egui::UiBuilder::new()
                    .max_rect(row)
                    .layout(egui::Layout::left_to_right(egui::Align::Center)),
            );
            overlay.set_opacity(opacity);
            for segment in self.controller.segments(hidden) {
                let mut text = segment.text().to_string();
                overlay.add(segment_cell(&mut text, segment.id(), segment.max_length()).interactive(false));
            }
        }

        let had_events = !events.is_empty();
        for event in events {
            if let Err(e) = self.apply(event) {
                warn!("Card field event failed: {e}");
            }
        }

        let mut response = WidgetResponse::default();
        if let Some(host) = self.controller.host_mut() {
            if let Some(segment) = host.pending_focus.take() {
                self.pending_focus = Some(segment);
            }
            response.number_complete = host.completed_number.take();
            response.advance = std::mem::take(&mut host.advance_requested);
        }

        if had_events || self.pending_focus.is_some() || opacities.iter().any(|o| *o > 0.0 && *o < 1.0) {
            ctx.request_repaint();
        }
        response
    }

    fn apply(&mut self, event: CellEvent) -> CardFieldResult<()> {
        match event {
            CellEvent::Edited { segment, before, after } => {
                let (location, length, replacement) = diff_edit(&before, &after);
                let edit = ProposedEdit::Replace {
                    location,
                    length,
                    replacement: &replacement,
                };
                if self.controller.should_accept_edit(segment, edit)? {
                    self.controller.handle_event(InputEvent::EditingChanged { segment, text: after })?;
                }
                Ok(())
            }
            CellEvent::Backspace(segment) => {
                self.controller.handle_event(InputEvent::DeleteBackward { segment })
            }
        }
    }
}

fn segment_cell(text: &mut String, segment: SegmentId, capacity: usize) -> egui::TextEdit<'_> {
    egui::TextEdit::singleline(text)
        .id(segment_id(segment))
        .char_limit(capacity)
        .font(egui::TextStyle::Monospace)
        .hint_text("0".repeat(capacity))
        .desired_width(DIGIT_WIDTH * capacity as f32)
}

fn group_id(layout: Layout) -> egui::Id {
    egui::Id::new(("card_number_group", layout.index()))
}

fn segment_id(segment: SegmentId) -> egui::Id {
    egui::Id::new(("card_number_segment", segment.layout.index(), segment.tag))
}

/// Reconstruct the single edit that turned `before` into `after`:
/// (location, replaced length, replacement), in characters.
fn diff_edit(before: &str, after: &str) -> (usize, usize, String) {
    let before: Vec<char> = before.chars().collect();
    let after: Vec<char> = after.chars().collect();

    let prefix = before
        .iter()
        .zip(&after)
        .take_while(|(a, b)| a == b)
        .count();
    let max_suffix = before.len().min(after.len()) - prefix;
    let suffix = before
        .iter()
        .rev()
        .zip(after.iter().rev())
        .take(max_suffix)
        .take_while(|(a, b)| a == b)
        .count();

    let length = before.len() - prefix - suffix;
    let replacement = after[prefix..after.len() - suffix].iter().collect();
    (prefix, length, replacement)
}
