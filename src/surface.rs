//! Interfaces to the map view and the two mode buttons.
//!
//! All calls are fire-and-forget. Nothing the collaborators do afterwards
//! (animations, redraws) is reported back to the state machine.

use crate::mode::{Mode, RotationSource};

/// Auto-pan button appearance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AutoPanVisual {
    Off,
    /// Following the GPS location, map not auto-rotating.
    OnNorthUp,
    /// Following the GPS location and auto-rotating.
    OnActive,
}

/// Compass-rose button appearance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompassRoseVisual {
    Hidden,
    Visible,
}

/// A command for the map surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapDirective {
    AutoPanToGps(bool),
    /// `None` turns auto-rotate off.
    AutoRotate(Option<RotationSource>),
}

impl MapDirective {
    /// Directives that move the map from `old` to `new`, pan first.
    ///
    /// A flag that keeps its value produces no directive.
    pub fn between(old: Mode, new: Mode) -> Vec<MapDirective> {
        let mut directives = Vec::with_capacity(2);
        if old.auto_pan() != new.auto_pan() {
            directives.push(MapDirective::AutoPanToGps(new.auto_pan()));
        }
        if old.auto_rotate() != new.auto_rotate() {
            directives.push(MapDirective::AutoRotate(new.auto_rotate()));
        }
        directives
    }
}

pub trait MapSurface {
    fn set_auto_pan_to_gps(&mut self, enabled: bool);

    /// `Some(source)` rotates the map by that source, `None` stops rotating.
    fn set_auto_rotate(&mut self, rotation: Option<RotationSource>);

    fn apply(&mut self, directive: MapDirective) {
        match directive {
            MapDirective::AutoPanToGps(enabled) => self.set_auto_pan_to_gps(enabled),
            MapDirective::AutoRotate(rotation) => self.set_auto_rotate(rotation),
        }
    }
}

pub trait AutoPanButton {
    fn set_visual(&mut self, visual: AutoPanVisual);
}

pub trait CompassRoseButton {
    fn set_visual(&mut self, visual: CompassRoseVisual);
}

impl<T: MapSurface + ?Sized> MapSurface for &mut T {
    fn set_auto_pan_to_gps(&mut self, enabled: bool) {
        (**self).set_auto_pan_to_gps(enabled);
    }

    fn set_auto_rotate(&mut self, rotation: Option<RotationSource>) {
        (**self).set_auto_rotate(rotation);
    }
}

impl<T: MapSurface + ?Sized> MapSurface for Box<T> {
    fn set_auto_pan_to_gps(&mut self, enabled: bool) {
        (**self).set_auto_pan_to_gps(enabled);
    }

    fn set_auto_rotate(&mut self, rotation: Option<RotationSource>) {
        (**self).set_auto_rotate(rotation);
    }
}

impl<T: AutoPanButton + ?Sized> AutoPanButton for &mut T {
    fn set_visual(&mut self, visual: AutoPanVisual) {
        (**self).set_visual(visual);
    }
}

impl<T: AutoPanButton + ?Sized> AutoPanButton for Box<T> {
    fn set_visual(&mut self, visual: AutoPanVisual) {
        (**self).set_visual(visual);
    }
}

impl<T: CompassRoseButton + ?Sized> CompassRoseButton for &mut T {
    fn set_visual(&mut self, visual: CompassRoseVisual) {
        (**self).set_visual(visual);
    }
}

impl<T: CompassRoseButton + ?Sized> CompassRoseButton for Box<T> {
    fn set_visual(&mut self, visual: CompassRoseVisual) {
        (**self).set_visual(visual);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockMapSurface;
    use crate::mode::Orientation;

    #[test]
    fn test_no_directives_for_same_flags() {
        for mode in Mode::ALL {
            assert!(MapDirective::between(mode, mode).is_empty());
        }
        // Orientation alone isn't a map directive.
        assert!(
            MapDirective::between(
                Mode::Idle(Orientation::NorthUp),
                Mode::Idle(Orientation::FreeRotate)
            )
            .is_empty()
        );
    }

    #[test]
    fn test_pan_directive_comes_first() {
        let directives = MapDirective::between(
            Mode::FollowRotating(RotationSource::Bearing),
            Mode::Idle(Orientation::FreeRotate),
        );
        assert_eq!(
            directives,
            vec![
                MapDirective::AutoPanToGps(false),
                MapDirective::AutoRotate(None),
            ]
        );
    }

    #[test]
    fn test_source_change_only_touches_rotation() {
        let directives = MapDirective::between(
            Mode::FollowRotating(RotationSource::Heading),
            Mode::FollowRotating(RotationSource::Bearing),
        );
        assert_eq!(
            directives,
            vec![MapDirective::AutoRotate(Some(RotationSource::Bearing))]
        );
    }

    fn enable_follow<M: MapSurface>(mut map: M) {
        map.apply(MapDirective::AutoPanToGps(true));
    }

    #[test]
    fn test_apply_through_borrowed_and_boxed_surfaces() {
        let mut map = MockMapSurface::default();
        enable_follow(&mut map);
        assert_eq!(map.directives, vec![MapDirective::AutoPanToGps(true)]);

        let boxed: Box<dyn MapSurface> = Box::new(MockMapSurface::default());
        enable_follow(boxed);
    }
}
