//! Map auto-pan / auto-rotate controller.
//!
//! Reacts to user gestures on the map and its buttons plus the live GPS
//! speed, and keeps the map surface and both buttons in line with the
//! current [`Mode`].
//!
//! Calls must be serialized by the host (one UI thread, or a mutex around
//! the machine). No call blocks or spawns work.

use tracing::{debug, trace};

use crate::config::AutoPanConfig;
use crate::mode::{Mode, Orientation, RotationSource};
use crate::speed::Speed;
use crate::surface::{AutoPanButton, CompassRoseButton, MapDirective, MapSurface};

/// Inputs the machine reacts to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    UserPannedMap,
    UserRotatedMap,
    UserClickedAutoPanButton,
    UserClickedCompassRoseButton,
    SpeedUpdate(Speed),
}

/// Next mode for `event` in `mode`. Total: every pair has an answer.
///
/// `speed` is the latest known speed, already including the speed carried
/// by a `SpeedUpdate` event.
pub fn next_mode(mode: Mode, event: Event, speed: Speed, config: &AutoPanConfig) -> Mode {
    match (event, mode) {
        // Dragging the map overrides following; rotation is kept as-is.
        (Event::UserPannedMap, Mode::Follow(orientation)) => Mode::Idle(orientation),
        (Event::UserPannedMap, Mode::FollowRotating(_)) => Mode::Idle(Orientation::FreeRotate),
        (Event::UserPannedMap, Mode::Idle(_)) => mode,

        // Rotating by hand cancels auto-rotate. North-up maps ignore it.
        (Event::UserRotatedMap, Mode::FollowRotating(_)) => Mode::Follow(Orientation::FreeRotate),
        (Event::UserRotatedMap, Mode::Idle(_) | Mode::Follow(_)) => mode,

        (Event::UserClickedAutoPanButton, Mode::Idle(orientation)) => Mode::Follow(orientation),
        (Event::UserClickedAutoPanButton, Mode::Follow(orientation)) => Mode::Idle(orientation),
        (Event::UserClickedAutoPanButton, Mode::FollowRotating(_)) => {
            Mode::Idle(Orientation::NorthUp)
        }

        (Event::UserClickedCompassRoseButton, Mode::Follow(_)) => {
            Mode::FollowRotating(speed.initial_rotation_source(config))
        }
        (Event::UserClickedCompassRoseButton, Mode::FollowRotating(_)) => {
            Mode::Follow(Orientation::NorthUp)
        }
        // The button is hidden while idle.
        (Event::UserClickedCompassRoseButton, Mode::Idle(_)) => mode,

        (Event::SpeedUpdate(_), Mode::FollowRotating(source)) => {
            Mode::FollowRotating(speed.rotation_source_from(source, config))
        }
        (Event::SpeedUpdate(_), Mode::Idle(_) | Mode::Follow(_)) => mode,
    }
}

/// Owns the current [`Mode`] and drives the map and buttons from it.
///
/// The collaborators are injected at construction; pass `&mut T` or
/// `Box<T>` to keep ownership elsewhere.
pub struct AutoPanStateMachine<M, P, C> {
    mode: Mode,
    speed: Speed,
    config: AutoPanConfig,
    map: M,
    auto_pan_button: P,
    compass_rose_button: C,
}

impl<M, P, C> AutoPanStateMachine<M, P, C>
where
    M: MapSurface,
    P: AutoPanButton,
    C: CompassRoseButton,
{
    pub fn new(map: M, auto_pan_button: P, compass_rose_button: C) -> Self {
        Self::with_config(
            AutoPanConfig::default(),
            map,
            auto_pan_button,
            compass_rose_button,
        )
    }

    pub fn with_config(
        config: AutoPanConfig,
        map: M,
        auto_pan_button: P,
        compass_rose_button: C,
    ) -> Self {
        let mut machine = Self {
            mode: Mode::default(),
            speed: Speed::Unknown,
            config,
            map,
            auto_pan_button,
            compass_rose_button,
        };
        machine.refresh_buttons();
        machine
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Most recent speed pushed through `speed_update`.
    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Source the map currently rotates by, if any.
    pub fn rotation_source(&self) -> Option<RotationSource> {
        self.mode.auto_rotate()
    }

    pub fn config(&self) -> &AutoPanConfig {
        &self.config
    }

    pub fn map_surface(&self) -> &M {
        &self.map
    }

    pub fn auto_pan_button(&self) -> &P {
        &self.auto_pan_button
    }

    pub fn compass_rose_button(&self) -> &C {
        &self.compass_rose_button
    }

    /// Ends the map session and hands the collaborators back.
    pub fn into_parts(self) -> (M, P, C) {
        (self.map, self.auto_pan_button, self.compass_rose_button)
    }

    pub fn user_panned_map(&mut self) {
        self.handle(Event::UserPannedMap);
    }

    pub fn user_rotated_map(&mut self) {
        self.handle(Event::UserRotatedMap);
    }

    pub fn user_clicked_auto_pan_button(&mut self) {
        self.handle(Event::UserClickedAutoPanButton);
    }

    pub fn user_clicked_compass_rose_button(&mut self) {
        self.handle(Event::UserClickedCompassRoseButton);
    }

    pub fn speed_update(&mut self, speed: impl Into<Speed>) {
        self.handle(Event::SpeedUpdate(speed.into()));
    }

    /// Applies `event` and returns the resulting mode.
    pub fn handle(&mut self, event: Event) -> Mode {
        if let Event::SpeedUpdate(speed) = event {
            self.speed = speed;
        }

        let old = self.mode;
        let new = next_mode(old, event, self.speed, &self.config);

        if new == old {
            trace!(mode = %old, ?event, "auto-pan self-transition");
        } else {
            debug!(from = %old, to = %new, ?event, "auto-pan transition");
            for directive in MapDirective::between(old, new) {
                debug!(?directive, "map directive");
                self.map.apply(directive);
            }
            self.mode = new;
        }

        // Always refreshed so an outside change to the buttons gets undone.
        self.refresh_buttons();
        new
    }

    fn refresh_buttons(&mut self) {
        self.auto_pan_button.set_visual(self.mode.auto_pan_visual());
        self.compass_rose_button
            .set_visual(self.mode.compass_rose_visual());
    }
}
