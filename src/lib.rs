//! Segmented payment card number input control
//!
//! Detects the card network from the leading digits, reflows input across
//! one, three or four segments, and drives focus between them. The core
//! (`classifier`, `segment`, `controller`, `host`) has no UI dependency; the
//! `ui` and `app` modules render it with egui.

/// Card network and layout detection from a number prefix
pub mod classifier;

/// Configuration management
pub mod config;

/// Segment controller state machine
pub mod controller;
pub mod error;

/// Outbound interface to the rendering host
pub mod host;
pub mod segment;

/// UI components
pub mod ui;

/// Demo application
pub mod app;

pub use classifier::{required_field_count, required_layout, CardNetwork, Layout};
pub use config::CardFieldConfig;
pub use controller::{CardNumberController, InputEvent, ProposedEdit};
pub use error::{CardFieldError, CardFieldResult};
pub use host::{CardNumberHost, HostRequest, RecordingHost};
pub use segment::{Segment, SegmentId};
