//! Outbound interface to the rendering collaborator
//!
//! The controller never draws anything. It tells its host which group to
//! show, what text each segment displays, where keyboard focus goes, and when
//! entry is finished.

use crate::classifier::Layout;
use crate::segment::SegmentId;

/// Receiver of the controller's outbound requests.
///
/// All methods default to doing nothing so hosts only implement what they
/// render.
pub trait CardNumberHost {
    /// Show or hide a layout's segment group
    fn set_group_visible(&mut self, _layout: Layout, _visible: bool) {}

    /// Display `text` in a segment
    fn set_segment_text(&mut self, _segment: SegmentId, _text: &str) {}

    /// Move keyboard focus to a segment
    fn request_focus(&mut self, _segment: SegmentId) {}

    /// A programmatically injected number filled every segment
    fn notify_number_complete(&mut self, _number: &str) {}

    /// Card number entry is done; the surrounding form should move on
    fn notify_advance_to_next_form_field(&mut self) {}
}

/// One outbound request, as recorded by `RecordingHost`
#[derive(Debug, Clone, PartialEq)]
pub enum HostRequest {
    SetGroupVisible { layout: Layout, visible: bool },
    SetSegmentText { segment: SegmentId, text: String },
    RequestFocus(SegmentId),
    NumberComplete(String),
    AdvanceToNextFormField,
}

/// Host that keeps every request it receives, in order
#[derive(Debug, Default)]
pub struct RecordingHost {
    requests: Vec<HostRequest>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> &[HostRequest] {
        &self.requests
    }

    /// Take the recorded requests, leaving the log empty
    pub fn drain(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Most recent focus request, if any
    pub fn last_focus(&self) -> Option<SegmentId> {
        self.requests.iter().rev().find_map(|request| match request {
            HostRequest::RequestFocus(segment) => Some(*segment),
            _ => None,
        })
    }

    pub fn count(&self, predicate: impl Fn(&HostRequest) -> bool) -> usize {
        self.requests.iter().filter(|request| predicate(request)).count()
    }
}

impl CardNumberHost for RecordingHost {
    fn set_group_visible(&mut self, layout: Layout, visible: bool) {
        self.requests.push(HostRequest::SetGroupVisible { layout, visible });
    }

    fn set_segment_text(&mut self, segment: SegmentId, text: &str) {
        self.requests.push(HostRequest::SetSegmentText {
            segment,
            text: text.to_string(),
        });
    }

    fn request_focus(&mut self, segment: SegmentId) {
        self.requests.push(HostRequest::RequestFocus(segment));
    }

    fn notify_number_complete(&mut self, number: &str) {
        self.requests.push(HostRequest::NumberComplete(number.to_string()));
    }

    fn notify_advance_to_next_form_field(&mut self) {
        self.requests.push(HostRequest::AdvanceToNextFormField);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_host_keeps_order() {
        let mut host = RecordingHost::new();
        host.request_focus(SegmentId::first(Layout::Three));
        host.notify_advance_to_next_form_field();
        host.request_focus(SegmentId::new(Layout::Three, 2));

        assert_eq!(host.requests().len(), 3);
        assert_eq!(host.last_focus(), Some(SegmentId::new(Layout::Three, 2)));
        assert_eq!(host.count(|r| matches!(r, HostRequest::AdvanceToNextFormField)), 1);

        let drained = host.drain();
        assert_eq!(drained[1], HostRequest::AdvanceToNextFormField);
        assert!(host.requests().is_empty());
    }
}
