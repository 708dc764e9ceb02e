//! Segment controller for the card number field
//!
//! Owns the segment groups of all three layouts, decides which layout is
//! active, redistributes digits on re-layout, and moves focus forward on
//! completion and backward on deletion.
//!
//! The controller is driven from a single event thread. Every operation runs
//! to completion synchronously and the host is called back inline, so hosts
//! must not call into the controller from inside a callback.

use std::borrow::Cow;

use log::{debug, info, trace, warn};

use crate::classifier::{required_layout, CardNetwork, Layout};
use crate::config::CardFieldConfig;
use crate::error::{CardFieldResult, SegmentError};
use crate::host::CardNumberHost;
use crate::segment::{Segment, SegmentId};

/// Once a segment or the whole number holds more than this many characters
/// the layout is locked in and no longer re-evaluated while typing.
const LAYOUT_LOCK_THRESHOLD: usize = 2;

/// Raw edit events delivered by the host
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A segment's text changed to `text`
    EditingChanged { segment: SegmentId, text: String },
    /// Backspace was pressed in a segment, after any resulting text change
    /// has been delivered as `EditingChanged`
    DeleteBackward { segment: SegmentId },
    /// Programmatic fill with a complete number (e.g. from a card scanner)
    SetFullNumber(String),
}

/// An edit the host is about to apply to a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProposedEdit<'a> {
    /// Replace `length` characters at `location` with `replacement`
    Replace { location: usize, length: usize, replacement: &'a str },
    /// Backspace pressed with the cursor at the start of an empty segment
    BackspaceAtStart,
}

#[derive(Debug)]
pub struct CardNumberController<H> {
    config: CardFieldConfig,
    /// Segment groups indexed by `Layout::index`
    groups: [Vec<Segment>; 3],
    active_layout: Layout,
    focused: Option<SegmentId>,
    host: Option<H>,
}

impl<H: CardNumberHost> Default for CardNumberController<H> {
    fn default() -> Self {
        Self::build(CardFieldConfig::default(), None)
    }
}

impl<H: CardNumberHost> CardNumberController<H> {
    /// Create a controller without a host
    pub fn new(config: CardFieldConfig) -> CardFieldResult<Self> {
        config.validate()?;
        Ok(Self::build(config, None))
    }

    /// Create a controller reporting to `host`
    pub fn with_host(config: CardFieldConfig, host: H) -> CardFieldResult<Self> {
        config.validate()?;
        Ok(Self::build(config, Some(host)))
    }

    fn build(config: CardFieldConfig, host: Option<H>) -> Self {
        let groups = Layout::ALL.map(|layout| {
            config
                .capacities(layout)
                .into_iter()
                .enumerate()
                .map(|(tag, capacity)| Segment::new(SegmentId::new(layout, tag), capacity))
                .collect::<Vec<_>>()
        });

        Self {
            config,
            groups,
            active_layout: Layout::Single,
            focused: None,
            host,
        }
    }

    pub fn config(&self) -> &CardFieldConfig {
        &self.config
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    /// Replace the host, returning the previous one
    pub fn set_host(&mut self, host: Option<H>) -> Option<H> {
        std::mem::replace(&mut self.host, host)
    }

    pub fn active_layout(&self) -> Layout {
        self.active_layout
    }

    /// Segment most recently given focus by the controller
    pub fn focused(&self) -> Option<SegmentId> {
        self.focused
    }

    /// Segments of a layout group, in tag order
    pub fn segments(&self, layout: Layout) -> &[Segment] {
        &self.groups[layout.index()]
    }

    pub fn segment(&self, id: SegmentId) -> CardFieldResult<&Segment> {
        self.groups[id.layout.index()]
            .get(id.tag)
            .ok_or_else(|| SegmentError::UnknownSegment { layout: id.layout, tag: id.tag }.into())
    }

    /// The logical card number: the active segments' text in tag order
    pub fn card_number(&self) -> String {
        self.segments(self.active_layout)
            .iter()
            .map(Segment::text)
            .collect()
    }

    /// The card number grouped the way the active layout shows it
    pub fn formatted_card_number(&self) -> String {
        self.segments(self.active_layout)
            .iter()
            .map(Segment::text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn network(&self) -> Option<CardNetwork> {
        CardNetwork::detect(&self.card_number())
    }

    /// Dispatch an inbound event
    pub fn handle_event(&mut self, event: InputEvent) -> CardFieldResult<()> {
        match event {
            InputEvent::EditingChanged { segment, text } => self.editing_changed(segment, &text),
            InputEvent::DeleteBackward { segment } => self.delete_backward(segment),
            InputEvent::SetFullNumber(number) => {
                self.set_card_number(&number);
                Ok(())
            }
        }
    }

    /// Fill the control with a complete number.
    ///
    /// Returns true when every segment of a three or four field layout was
    /// filled, in which case the host is notified with the number. A number
    /// too short for the layout stops at the first segment it cannot fill.
    /// Numbers of unknown networks go into the single field as-is and are
    /// never reported complete.
    pub fn set_card_number(&mut self, number: &str) -> bool {
        let number = self.sanitize(number).into_owned();
        let target = required_layout(&number);
        debug!("Injecting {} digit number into {target:?} layout", number.chars().count());

        if target == Layout::Single {
            self.transition_to(Layout::Single, "");
            let id = SegmentId::first(Layout::Single);
            if self.write_segment(id, &number) {
                warn!(
                    "Injected number truncated to {} characters",
                    self.groups[Layout::Single.index()][0].max_length()
                );
            }
            self.focus(id);
            return false;
        }

        self.clear_group(target);
        self.transition_to(target, "");

        let digits: Vec<char> = number.chars().collect();
        let mut offset = 0;
        let mut last_written = None;

        for tag in 0..target.field_count() {
            let id = SegmentId::new(target, tag);
            let capacity = self.groups[target.index()][tag].max_length();
            if digits.len() - offset < capacity {
                debug!("Stopped filling at {id}: {} digits left", digits.len() - offset);
                self.focus(last_written.unwrap_or_else(|| SegmentId::first(target)));
                return false;
            }

            let chunk: String = digits[offset..offset + capacity].iter().collect();
            self.write_segment(id, &chunk);
            offset += capacity;
            last_written = Some(id);
        }

        if let Some(last) = last_written {
            self.focus(last);
        }
        info!("Card number complete ({target:?} layout)");
        self.notify(|host| host.notify_number_complete(&number));
        true
    }

    /// A segment's text changed through typing.
    ///
    /// Edits to segments outside the active layout are ignored.
    pub fn editing_changed(&mut self, segment: SegmentId, text: &str) -> CardFieldResult<()> {
        self.segment(segment)?;
        if segment.layout != self.active_layout {
            debug!("Ignoring edit to inactive segment {segment}");
            return Ok(());
        }

        let sanitized = self.sanitize(text);
        let changed = sanitized != text;
        let sanitized = sanitized.into_owned();
        let truncated = self.groups[segment.layout.index()][segment.tag].set_text(&sanitized);
        let text = self.groups[segment.layout.index()][segment.tag].text().to_string();
        if changed || truncated {
            debug!("Corrected input in {segment} to '{text}'");
            self.notify(|host| host.set_segment_text(segment, &text));
        }

        if text.chars().count() > LAYOUT_LOCK_THRESHOLD {
            return self.on_segment_complete(segment);
        }

        if self.card_number().chars().count() > LAYOUT_LOCK_THRESHOLD {
            return Ok(());
        }

        match required_layout(&text) {
            Layout::Three => {
                self.transition_to(Layout::Three, &text);
            }
            Layout::Four => {
                self.transition_to(Layout::Four, &text);
            }
            Layout::Single if text.is_empty() => {
                self.transition_to(Layout::Single, "");
            }
            Layout::Single => trace!("Prefix '{text}' not recognised yet"),
        }

        Ok(())
    }

    /// Backspace was pressed in `segment`. Retreats focus when the segment
    /// is now empty.
    pub fn delete_backward(&mut self, segment: SegmentId) -> CardFieldResult<()> {
        if !self.segment(segment)?.is_empty() {
            return Ok(());
        }
        self.should_accept_edit(segment, ProposedEdit::BackspaceAtStart)
            .map(|_| ())
    }

    /// Decide whether the host may apply `edit` to `segment`.
    ///
    /// A backspace at the start of a non-first segment moves focus back one
    /// segment before the edit itself is judged. Edits inserting at exactly
    /// the segment's capacity are refused, as are non-digits when
    /// `digits_only` is set.
    pub fn should_accept_edit(
        &mut self,
        segment: SegmentId,
        edit: ProposedEdit<'_>,
    ) -> CardFieldResult<bool> {
        self.segment(segment)?;

        let (location, replacement) = match edit {
            ProposedEdit::BackspaceAtStart => {
                if !segment.is_first() {
                    self.on_delete_at_start(segment)?;
                }
                (0, "")
            }
            ProposedEdit::Replace { location, replacement, .. } => (location, replacement),
        };

        if !self.segment(segment)?.accepts_edit_at(location) {
            trace!("Refusing edit at capacity position {location} of {segment}");
            return Ok(false);
        }

        if self.config.digits_only && !replacement.chars().all(|c| c.is_ascii_digit()) {
            debug!("Refusing non-digit input '{replacement}' in {segment}");
            return Ok(false);
        }

        Ok(true)
    }

    /// Switch the visible segment group, seeding its first segment.
    ///
    /// Does nothing if `layout` is already active. Otherwise clears every
    /// segment of the other groups and focuses the new group's first
    /// segment. Returns whether a transition happened.
    pub fn transition_to(&mut self, layout: Layout, seed: &str) -> bool {
        if layout == self.active_layout {
            trace!("Already showing {layout:?} layout");
            return false;
        }

        debug!("Layout {:?} -> {layout:?} (seed '{seed}')", self.active_layout);
        self.active_layout = layout;

        for other in Layout::ALL {
            self.notify(|host| host.set_group_visible(other, other == layout));
        }
        for other in Layout::ALL.into_iter().filter(|other| *other != layout) {
            self.clear_group(other);
        }

        let first = SegmentId::first(layout);
        self.write_segment(first, seed);
        self.focus(first);
        true
    }

    /// A segment may have reached capacity: move to the next segment, or
    /// signal the surrounding form once the last segment is full.
    pub fn on_segment_complete(&mut self, segment: SegmentId) -> CardFieldResult<()> {
        if !self.segment(segment)?.is_full() || segment.layout != self.active_layout {
            return Ok(());
        }

        if segment.tag + 1 < segment.layout.field_count() {
            self.focus(segment.next());
        } else {
            info!("Card number entry finished in {:?} layout", segment.layout);
            self.notify(|host| host.notify_advance_to_next_form_field());
        }
        Ok(())
    }

    /// Backspace at the start of `segment`: focus the previous segment of
    /// the active group, if there is one.
    pub fn on_delete_at_start(&mut self, segment: SegmentId) -> CardFieldResult<()> {
        self.segment(segment)?;
        if segment.layout != self.active_layout {
            return Ok(());
        }
        if let Some(previous) = segment.previous() {
            self.focus(previous);
        }
        Ok(())
    }

    fn sanitize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.config.digits_only && !text.chars().all(|c| c.is_ascii_digit()) {
            Cow::Owned(text.chars().filter(char::is_ascii_digit).collect())
        } else {
            Cow::Borrowed(text)
        }
    }

    fn focus(&mut self, segment: SegmentId) {
        trace!("Focus -> {segment}");
        self.focused = Some(segment);
        self.notify(|host| host.request_focus(segment));
    }

    /// Store text in a known-valid segment and mirror it to the host.
    /// Returns true if the text had to be truncated.
    fn write_segment(&mut self, id: SegmentId, text: &str) -> bool {
        let segment = &mut self.groups[id.layout.index()][id.tag];
        let truncated = segment.set_text(text);
        let stored = segment.text().to_string();
        self.notify(|host| host.set_segment_text(id, &stored));
        truncated
    }

    fn clear_group(&mut self, layout: Layout) {
        let cleared: Vec<SegmentId> = self.groups[layout.index()]
            .iter_mut()
            .filter_map(|segment| segment.clear().then(|| segment.id()))
            .collect();
        for id in cleared {
            self.notify(|host| host.set_segment_text(id, ""));
        }
    }

    fn notify(&mut self, f: impl FnOnce(&mut H)) {
        if let Some(host) = self.host.as_mut() {
            f(host);
        }
    }
}
