//! Card network detection from a number prefix
//!
//! Maps a partial or complete card number to the network it belongs to and
//! to the segment layout that network is conventionally grouped in.

use serde::{Deserialize, Serialize};

/// Which group of segments the control shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    /// One free-form field for numbers whose network is not known yet
    Single,
    /// Three segments (Amex, Diners Club)
    Three,
    /// Four segments (Visa, Mastercard, JCB, Discover)
    Four,
}

impl Layout {
    pub const ALL: [Layout; 3] = [Layout::Single, Layout::Three, Layout::Four];

    /// Number of segments in this layout
    pub fn field_count(self) -> usize {
        match self {
            Layout::Single => 1,
            Layout::Three => 3,
            Layout::Four => 4,
        }
    }

    /// Position of this layout in `Layout::ALL`
    pub fn index(self) -> usize {
        match self {
            Layout::Single => 0,
            Layout::Three => 1,
            Layout::Four => 2,
        }
    }
}

/// Card networks recognised from the leading digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardNetwork {
    Visa,
    Mastercard,
    AmericanExpress,
    DinersClub,
    Jcb,
    Discover,
}

impl CardNetwork {
    /// Detect the network from the start of `number`.
    ///
    /// A leading "4" or "5" is enough on its own. Every other network needs
    /// two characters; anything shorter or unrecognised yields `None`.
    /// Input is not normalized, so non-digits simply fail to match.
    pub fn detect(number: &str) -> Option<Self> {
        if number.starts_with('4') {
            return Some(CardNetwork::Visa);
        }
        if number.starts_with('5') {
            return Some(CardNetwork::Mastercard);
        }

        let mut chars = number.chars();
        let prefix = match (chars.next(), chars.next()) {
            (Some(first), Some(second)) => [first, second],
            _ => return None,
        };

        match prefix {
            ['3', '4'] | ['3', '7'] => Some(CardNetwork::AmericanExpress),
            ['3', '0'] | ['3', '6'] | ['3', '8'] | ['3', '9'] => Some(CardNetwork::DinersClub),
            ['3', '5'] => Some(CardNetwork::Jcb),
            ['6', '0'] | ['6', '4'] | ['6', '5'] => Some(CardNetwork::Discover),
            _ => None,
        }
    }

    /// Segment layout this network's numbers are printed in
    pub fn layout(self) -> Layout {
        match self {
            CardNetwork::AmericanExpress | CardNetwork::DinersClub => Layout::Three,
            CardNetwork::Visa
            | CardNetwork::Mastercard
            | CardNetwork::Jcb
            | CardNetwork::Discover => Layout::Four,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CardNetwork::Visa => "Visa",
            CardNetwork::Mastercard => "Mastercard",
            CardNetwork::AmericanExpress => "American Express",
            CardNetwork::DinersClub => "Diners Club",
            CardNetwork::Jcb => "JCB",
            CardNetwork::Discover => "Discover",
        }
    }
}

/// Layout required for a partial or full card number
pub fn required_layout(number: &str) -> Layout {
    CardNetwork::detect(number).map_or(Layout::Single, CardNetwork::layout)
}

/// Number of segments required for a partial or full card number: 1, 3 or 4
pub fn required_field_count(number: &str) -> usize {
    required_layout(number).field_count()
}
