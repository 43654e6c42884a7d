//! Input activity codes and the membership set used to classify them.
//!
//! An [`ActivityCode`] is an already-decoded input event kind; the host
//! backend is responsible for translating native event records into codes
//! (see `libs/listener.rs`). The [`ActivitySet`] decides which codes count
//! as user activity. Classification runs on the tap callback path, so the
//! membership test is a bitmask lookup: constant time, no allocation, no
//! locking.

use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A decoded input event kind observed by the tap.
///
/// Codes are opaque and compared by equality only. The non-client button
/// variants are delivered by window-manager style hosts for title-bar and
/// border interactions; the rdev backend never produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityCode {
    PointerMove,
    ButtonDown,
    ButtonUp,
    KeyDown,
    KeyUp,
    Wheel,
    NcButtonDown,
    NcButtonUp,
}

impl ActivityCode {
    /// Every known code, in declaration order.
    pub const ALL: [ActivityCode; 8] = [
        ActivityCode::PointerMove,
        ActivityCode::ButtonDown,
        ActivityCode::ButtonUp,
        ActivityCode::KeyDown,
        ActivityCode::KeyUp,
        ActivityCode::Wheel,
        ActivityCode::NcButtonDown,
        ActivityCode::NcButtonUp,
    ];

    /// Bit position of this code inside an [`ActivitySet`] mask.
    fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// An immutable set of codes considered activity triggers.
///
/// Built once at construction; lookups never allocate or block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivitySet {
    bits: u16,
}

impl ActivitySet {
    /// A set containing every known code.
    pub fn all() -> Self {
        let mut bits = 0u16;
        for code in ActivityCode::ALL {
            bits |= code.bit();
        }
        Self { bits }
    }

    /// Builds a set from an explicit list of codes.
    ///
    /// An empty list is a misconfiguration and fails fast here rather than
    /// silently producing a monitor that can never leave Idle.
    pub fn from_codes(codes: &[ActivityCode]) -> Result<Self> {
        if codes.is_empty() {
            return Err(msg_error_anyhow!(Message::EmptyActivitySet));
        }
        let mut bits = 0u16;
        for code in codes {
            bits |= code.bit();
        }
        Ok(Self { bits })
    }

    /// Membership test over the configured codes.
    pub fn contains(&self, code: ActivityCode) -> bool {
        self.bits & code.bit() != 0
    }

    /// Whether `code` counts as user activity.
    ///
    /// Pointer move is overwhelmingly the highest-frequency event in a real
    /// input stream, so it is treated as always-activity and checked before
    /// the general set lookup.
    pub fn is_activity(&self, code: ActivityCode) -> bool {
        if code == ActivityCode::PointerMove {
            return true;
        }
        self.contains(code)
    }

    /// Number of codes in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl Default for ActivitySet {
    fn default() -> Self {
        Self::all()
    }
}
