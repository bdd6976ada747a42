//! Element identifiers.
//!
//! An [`Eid`] is a human-scannable debug tag of the form `dddd-n`: a four digit
//! random component followed by a monotonically increasing serial. Ordering is
//! by serial, so sorting a set of ids yields allocation order.

use std::fmt;
use std::str::FromStr;

/// Largest value the random component can hold (four decimal digits).
const TAG_MAX: u16 = 9999;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Eid {
    // Field order matters: the derived `Ord` compares `serial` first.
    serial: u64,
    tag: u16,
}

impl Eid {
    /// Build an id from its parts. `tag` is clamped to four digits.
    pub const fn new(tag: u16, serial: u64) -> Self {
        let tag = if tag > TAG_MAX { TAG_MAX } else { tag };
        Self { serial, tag }
    }

    /// The random component.
    #[inline]
    pub const fn tag(self) -> u16 {
        self.tag
    }

    /// The allocation counter component.
    #[inline]
    pub const fn serial(self) -> u64 {
        self.serial
    }
}

impl fmt::Display for Eid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{}", self.tag, self.serial)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseEidError {
    #[error("element id is missing the '-' separator")]
    MissingSeparator,
    #[error("element id tag must be exactly four digits")]
    BadTag,
    #[error("element id serial is not a decimal number")]
    BadSerial,
}

impl FromStr for Eid {
    type Err = ParseEidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, serial) = s.split_once('-').ok_or(ParseEidError::MissingSeparator)?;
        if tag.len() != 4 || !tag.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseEidError::BadTag);
        }
        if serial.is_empty() || !serial.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseEidError::BadSerial);
        }
        let tag: u16 = tag.parse().map_err(|_| ParseEidError::BadTag)?;
        let serial: u64 = serial.parse().map_err(|_| ParseEidError::BadSerial)?;
        Ok(Eid::new(tag, serial))
    }
}
