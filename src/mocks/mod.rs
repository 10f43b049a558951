// This module is only compiled during tests

use crate::mode::RotationSource;
use crate::surface::{
    AutoPanButton, AutoPanVisual, CompassRoseButton, CompassRoseVisual, MapDirective, MapSurface,
};

/// Records every directive it receives.
#[derive(Debug, Default)]
pub struct MockMapSurface {
    pub directives: Vec<MapDirective>,
}

impl MapSurface for MockMapSurface {
    fn set_auto_pan_to_gps(&mut self, enabled: bool) {
        self.directives.push(MapDirective::AutoPanToGps(enabled));
    }

    fn set_auto_rotate(&mut self, rotation: Option<RotationSource>) {
        self.directives.push(MapDirective::AutoRotate(rotation));
    }
}

#[derive(Debug, Default)]
pub struct MockAutoPanButton {
    pub visuals: Vec<AutoPanVisual>,
}

impl MockAutoPanButton {
    pub fn current(&self) -> Option<AutoPanVisual> {
        self.visuals.last().copied()
    }
}

impl AutoPanButton for MockAutoPanButton {
    fn set_visual(&mut self, visual: AutoPanVisual) {
        self.visuals.push(visual);
    }
}

#[derive(Debug, Default)]
pub struct MockCompassRoseButton {
    pub visuals: Vec<CompassRoseVisual>,
}

impl MockCompassRoseButton {
    pub fn current(&self) -> Option<CompassRoseVisual> {
        self.visuals.last().copied()
    }
}

impl CompassRoseButton for MockCompassRoseButton {
    fn set_visual(&mut self, visual: CompassRoseVisual) {
        self.visuals.push(visual);
    }
}
