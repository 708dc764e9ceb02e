//! Input segments of the card number field
//!
//! A segment is one fixed-capacity digit cell. Segments are created once per
//! layout group when the controller is built and are only ever cleared or
//! repopulated afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classifier::Layout;

/// Statically typed handle to a segment: its layout group and position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentId {
    pub layout: Layout,
    /// Zero-based position within the layout group
    pub tag: usize,
}

impl SegmentId {
    pub fn new(layout: Layout, tag: usize) -> Self {
        Self { layout, tag }
    }

    /// First segment of a layout group
    pub fn first(layout: Layout) -> Self {
        Self { layout, tag: 0 }
    }

    pub fn is_first(&self) -> bool {
        self.tag == 0
    }

    pub fn previous(&self) -> Option<Self> {
        self.tag.checked_sub(1).map(|tag| Self { layout: self.layout, tag })
    }

    pub fn next(&self) -> Self {
        Self { layout: self.layout, tag: self.tag + 1 }
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}[{}]", self.layout, self.tag)
    }
}

#[derive(Debug, Clone)]
pub struct Segment {
    id: SegmentId,
    /// Digit capacity before focus hands off to the next segment
    max_length: usize,
    text: String,
}

impl Segment {
    pub fn new(id: SegmentId, max_length: usize) -> Self {
        Self {
            id,
            max_length,
            text: String::new(),
        }
    }

    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn tag(&self) -> usize {
        self.id.tag
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters, not bytes
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the segment holds exactly `max_length` characters
    pub fn is_full(&self) -> bool {
        self.len() == self.max_length
    }

    /// Replace the content, truncated to capacity. Returns true if the stored
    /// text differs from `text` (it had to be truncated).
    pub fn set_text(&mut self, text: &str) -> bool {
        self.text = text.chars().take(self.max_length).collect();
        self.text != text
    }

    /// Clear the content, returning whether there was anything to clear
    pub fn clear(&mut self) -> bool {
        let had_text = !self.text.is_empty();
        self.text.clear();
        had_text
    }

    /// Capacity is enforced positionally: an edit is refused only when it
    /// would insert at exactly `max_length`, like a fixed-width field.
    pub fn accepts_edit_at(&self, location: usize) -> bool {
        location != self.max_length
    }
}
