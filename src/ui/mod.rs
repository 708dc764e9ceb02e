//! UI components for the card number field
//!
//! egui rendering of the control, used by the demo application.

pub mod card_number_widget;

pub use card_number_widget::{CardNumberWidget, EguiHost, WidgetResponse};
