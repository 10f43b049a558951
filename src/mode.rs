//! Camera-follow modes of the map.
//!
//! The six modes are the product of three flags (auto-pan, auto-rotate and
//! the rotation source), but only the combinations that make sense are
//! representable: a map can't rotate to the travel direction unless it is
//! also following the GPS location.

use std::fmt;

use thiserror::Error;

use crate::surface::{AutoPanVisual, CompassRoseVisual};

/// What the map does with its rotation while not auto-rotating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// North is locked at the top.
    NorthUp,
    /// The map keeps whatever rotation it was last given.
    FreeRotate,
}

/// Where an auto-rotating map takes its "up" direction from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RotationSource {
    /// Device compass. Reliable when standing still or moving slowly.
    Heading,
    /// Track bearing between successive GPS fixes. Reliable when moving.
    Bearing,
}

impl fmt::Display for RotationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationSource::Heading => write!(f, "heading"),
            RotationSource::Bearing => write!(f, "bearing"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Auto-pan off, auto-rotate off.
    Idle(Orientation),
    /// Auto-pan on, auto-rotate off.
    Follow(Orientation),
    /// Auto-pan on, auto-rotate on.
    FollowRotating(RotationSource),
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Idle(Orientation::NorthUp)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown auto-pan mode code {0}")]
pub struct ModeCodeError(pub u8);

impl Mode {
    /// Every mode, ordered by `code()`.
    pub const ALL: [Mode; 6] = [
        Mode::Idle(Orientation::NorthUp),
        Mode::Idle(Orientation::FreeRotate),
        Mode::Follow(Orientation::NorthUp),
        Mode::Follow(Orientation::FreeRotate),
        Mode::FollowRotating(RotationSource::Heading),
        Mode::FollowRotating(RotationSource::Bearing),
    ];

    /// Stable numeric code, suitable for persisting the mode between sessions.
    pub fn code(&self) -> u8 {
        match self {
            Mode::Idle(Orientation::NorthUp) => 0,
            Mode::Idle(Orientation::FreeRotate) => 1,
            Mode::Follow(Orientation::NorthUp) => 2,
            Mode::Follow(Orientation::FreeRotate) => 3,
            Mode::FollowRotating(RotationSource::Heading) => 4,
            Mode::FollowRotating(RotationSource::Bearing) => 5,
        }
    }

    pub fn auto_pan(&self) -> bool {
        !matches!(self, Mode::Idle(_))
    }

    /// `Some(source)` while the map rotates itself.
    pub fn auto_rotate(&self) -> Option<RotationSource> {
        match self {
            Mode::FollowRotating(source) => Some(*source),
            Mode::Idle(_) | Mode::Follow(_) => None,
        }
    }

    pub fn auto_pan_visual(&self) -> AutoPanVisual {
        match self {
            Mode::Idle(_) => AutoPanVisual::Off,
            Mode::Follow(_) => AutoPanVisual::OnNorthUp,
            Mode::FollowRotating(_) => AutoPanVisual::OnActive,
        }
    }

    /// The compass rose only exists to cancel auto-rotate, so it is shown
    /// exclusively while rotating.
    pub fn compass_rose_visual(&self) -> CompassRoseVisual {
        match self {
            Mode::FollowRotating(_) => CompassRoseVisual::Visible,
            Mode::Idle(_) | Mode::Follow(_) => CompassRoseVisual::Hidden,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Idle(Orientation::NorthUp) => "Idle-NorthUp",
            Mode::Idle(Orientation::FreeRotate) => "Idle-FreeRotate",
            Mode::Follow(Orientation::NorthUp) => "Follow-NorthUp",
            Mode::Follow(Orientation::FreeRotate) => "Follow-FreeRotate",
            Mode::FollowRotating(RotationSource::Heading) => "Follow-RotateByHeading",
            Mode::FollowRotating(RotationSource::Bearing) => "Follow-RotateByBearing",
        }
    }
}

impl TryFrom<u8> for Mode {
    type Error = ModeCodeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Mode::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(ModeCodeError(code))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
