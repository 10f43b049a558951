pub mod config;
pub mod gps_tracker;
pub mod mode;
pub mod position;
pub mod speed;
pub mod speed_feed;
pub mod state_machine;
pub mod surface;

// Re-export commonly used types
pub use config::AutoPanConfig;
pub use gps_tracker::GpsTracker;
pub use mode::{Mode, Orientation, RotationSource};
pub use position::Position;
pub use speed::Speed;
pub use state_machine::{AutoPanStateMachine, Event};
pub use surface::{
    AutoPanButton, AutoPanVisual, CompassRoseButton, CompassRoseVisual, MapDirective, MapSurface,
};

#[cfg(test)]
pub(crate) mod mocks;
