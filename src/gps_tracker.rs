use tracing::trace;

use crate::config::{MIN_BEARING_DISTANCE_M, SECONDS_PER_DAY};
use crate::position::Position;
use crate::speed::Speed;

#[derive(Clone, Copy, Debug)]
struct Fix {
    position: Position,
    time_of_day: Option<f64>, // seconds since midnight UTC
}

/// Latest ground speed and track bearing, either as reported by the
/// receiver or derived from successive fixes.
#[derive(Debug, Default)]
pub struct GpsTracker {
    last_fix: Option<Fix>,
    current_bearing: Option<f64>, // degrees
    current_speed: Speed,
    reported_since_fix: bool,
}

impl GpsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_current_position(&self) -> Option<Position> {
        self.last_fix.map(|fix| fix.position)
    }

    pub fn get_current_speed(&self) -> Speed {
        self.current_speed
    }

    pub fn get_current_bearing(&self) -> Option<f64> {
        self.current_bearing
    }

    /// Speed over ground as reported by the receiver.
    pub fn update_speed_knots(&mut self, knots: f64) {
        self.current_speed = Speed::from_knots(knots);
        self.reported_since_fix = true;
    }

    /// The receiver lost its fix or sent a velocity without a speed.
    pub fn invalidate_speed(&mut self) {
        self.current_speed = Speed::Unknown;
        self.reported_since_fix = true;
    }

    /// Course over ground as reported by the receiver.
    pub fn update_bearing(&mut self, bearing: f64) {
        self.current_bearing = Some(((bearing % 360.0) + 360.0) % 360.0);
        self.reported_since_fix = true;
    }

    /// Record a new position fix.
    ///
    /// Unless the receiver reported speed or course since the previous fix,
    /// they are derived from the distance and time between the two.
    pub fn update_position(&mut self, lat: f64, lon: f64, time_of_day: Option<f64>) {
        let fix = Fix {
            position: Position::new(lat, lon),
            time_of_day,
        };

        if !self.reported_since_fix
            && let Some(previous) = self.last_fix
            && let Some(dt) = elapsed(previous.time_of_day, fix.time_of_day)
        {
            let distance = previous.position.distance_to(&fix.position);
            self.current_speed = Speed::from(distance / dt);

            if distance >= MIN_BEARING_DISTANCE_M {
                self.current_bearing = Some(previous.position.bearing_to(&fix.position));
            }
            trace!(distance, dt, speed = %self.current_speed, "derived speed from fixes");
        }

        self.reported_since_fix = false;
        self.last_fix = Some(fix);
    }
}

/// Seconds from `from` to `to`, allowing a single midnight roll-over.
fn elapsed(from: Option<f64>, to: Option<f64>) -> Option<f64> {
    let (from, to) = (from?, to?);
    let mut dt = to - from;

    // A big backwards jump is the clock wrapping at midnight, a small one
    // is an out-of-order sentence.
    if dt < -SECONDS_PER_DAY / 2.0 {
        dt += SECONDS_PER_DAY;
    }

    (dt > 0.0).then_some(dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gps_tracker_initialization() {
        let tracker = GpsTracker::new();
        assert!(tracker.get_current_position().is_none());
        assert!(tracker.get_current_bearing().is_none());
        assert_eq!(tracker.get_current_speed(), Speed::Unknown);
    }

    #[test]
    fn test_reported_values() {
        let mut tracker = GpsTracker::new();
        tracker.update_speed_knots(2.0);
        tracker.update_bearing(-90.0);

        let mps = tracker.get_current_speed().value().unwrap();
        assert!((mps - 1.028888).abs() < 1e-6);
        assert_eq!(tracker.get_current_bearing(), Some(270.0));
    }

    #[test]
    fn test_invalidated_speed_is_not_rederived() {
        let mut tracker = GpsTracker::new();
        tracker.update_position(0.0, 0.0, Some(0.0));
        tracker.update_speed_knots(20.0);
        tracker.invalidate_speed();
        tracker.update_position(0.001, 0.0, Some(1.0));

        assert_eq!(tracker.get_current_speed(), Speed::Unknown);
    }

    #[test]
    fn test_speed_derived_from_fixes() {
        let mut tracker = GpsTracker::new();
        tracker.update_position(0.0, 0.0, Some(100.0));
        assert_eq!(tracker.get_current_speed(), Speed::Unknown);

        // ~111 m north in 10 s
        tracker.update_position(0.001, 0.0, Some(110.0));
        let mps = tracker.get_current_speed().value().unwrap();
        assert!((mps - 11.119).abs() < 0.01);

        let bearing = tracker.get_current_bearing().unwrap();
        assert!(bearing.abs() < 1e-6);
    }

    #[test]
    fn test_reported_speed_wins_over_derived() {
        let mut tracker = GpsTracker::new();
        tracker.update_position(0.0, 0.0, Some(0.0));
        tracker.update_speed_knots(0.0);
        tracker.update_position(0.01, 0.0, Some(1.0));

        assert_eq!(tracker.get_current_speed(), Speed::Known(0.0));
        assert_eq!(
            tracker.get_current_position(),
            Some(Position::new(0.01, 0.0))
        );
    }

    #[test]
    fn test_jitter_keeps_previous_bearing() {
        let mut tracker = GpsTracker::new();
        tracker.update_bearing(45.0);
        tracker.update_position(0.0, 0.0, Some(0.0));
        // ~0.1 m, below the bearing guard
        tracker.update_position(0.000001, 0.0, Some(1.0));

        assert_eq!(tracker.get_current_bearing(), Some(45.0));
        assert!(tracker.get_current_speed().value().unwrap() < 0.2);
    }

    #[test]
    fn test_midnight_rollover() {
        let mut tracker = GpsTracker::new();
        tracker.update_position(0.0, 0.0, Some(86_399.0));
        tracker.update_position(0.0, 0.0001, Some(1.0));

        // ~11 m over 2 s
        let mps = tracker.get_current_speed().value().unwrap();
        assert!((mps - 5.56).abs() < 0.01);
    }

    #[test]
    fn test_no_update_without_time_progress() {
        let mut tracker = GpsTracker::new();
        tracker.update_position(0.0, 0.0, Some(50.0));
        tracker.update_position(0.001, 0.0, Some(50.0));
        assert_eq!(tracker.get_current_speed(), Speed::Unknown);

        tracker.update_position(0.002, 0.0, Some(49.0));
        assert_eq!(tracker.get_current_speed(), Speed::Unknown);

        tracker.update_position(0.003, 0.0, None);
        assert_eq!(tracker.get_current_speed(), Speed::Unknown);
    }

    #[test]
    fn test_elapsed() {
        assert_eq!(elapsed(Some(10.0), Some(12.5)), Some(2.5));
        assert_eq!(elapsed(Some(86_000.0), Some(400.0)), Some(800.0));
        assert_eq!(elapsed(Some(10.0), Some(9.0)), None);
        assert_eq!(elapsed(None, Some(9.0)), None);
    }
}
