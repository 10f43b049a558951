//! Pushes GPS speed from an NMEA 0183 stream into the auto-pan controller.

use std::io::{self, BufRead};

use chrono::{NaiveTime, Timelike};
use nmea::sentences::FixType;
use nmea::{Nmea, SentenceType};
use thiserror::Error;
use tracing::{debug, warn};

use crate::gps_tracker::GpsTracker;
use crate::state_machine::AutoPanStateMachine;
use crate::surface::{AutoPanButton, CompassRoseButton, MapSurface};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read NMEA line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },
}

/// Counters for one replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeedStats {
    pub sentences: usize,
    pub parse_errors: usize,
    pub speed_updates: usize,
}

/// Reads NMEA sentences from `reader` until EOF.
///
/// Every GGA, GLL, RMC or VTG sentence updates `tracker`, then the tracker's
/// speed is pushed into `machine`. Other sentences are parsed and ignored;
/// malformed ones are counted and skipped.
pub fn replay<R, M, P, C>(
    reader: R,
    tracker: &mut GpsTracker,
    machine: &mut AutoPanStateMachine<M, P, C>,
) -> Result<FeedStats, FeedError>
where
    R: BufRead,
    M: MapSurface,
    P: AutoPanButton,
    C: CompassRoseButton,
{
    let mut nmea = Nmea::default();
    let mut stats = FeedStats::default();

    for (index, line) in reader.lines().enumerate() {
        let content = match line {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!(line = index + 1, "skipping non UTF-8 NMEA line");
                stats.parse_errors += 1;
                continue;
            }
            Err(source) => {
                return Err(FeedError::Io {
                    line: index + 1,
                    source,
                });
            }
        };

        let trimmed = content.trim();
        if trimmed.is_empty() {
            continue;
        }

        let kind = match nmea.parse(trimmed) {
            Ok(kind) => kind,
            Err(e) => {
                warn!(line = index + 1, error = %e, "unparseable NMEA sentence");
                stats.parse_errors += 1;
                continue;
            }
        };
        stats.sentences += 1;

        if !update_tracker(&nmea, kind, tracker) {
            continue;
        }

        let speed = tracker.get_current_speed();
        debug!(line = index + 1, %speed, "speed update");
        machine.speed_update(speed);
        stats.speed_updates += 1;
    }

    Ok(stats)
}

/// Returns false for sentences that carry neither a fix nor a velocity.
fn update_tracker(nmea: &Nmea, kind: SentenceType, tracker: &mut GpsTracker) -> bool {
    let reports_velocity = matches!(kind, SentenceType::RMC | SentenceType::VTG);
    let reports_fix = matches!(
        kind,
        SentenceType::GGA | SentenceType::GLL | SentenceType::RMC
    );
    if !reports_velocity && !reports_fix {
        return false;
    }

    // Reported values go in first so they take precedence over derived ones.
    if reports_velocity {
        let void_fix = kind == SentenceType::RMC && nmea.fix_type == Some(FixType::Invalid);
        match nmea.speed_over_ground {
            Some(knots) if !void_fix => tracker.update_speed_knots(knots.into()),
            // Lost fix or empty speed field: the last speed is stale.
            _ => tracker.invalidate_speed(),
        }
        if !void_fix && let Some(course) = nmea.true_course {
            tracker.update_bearing(course.into());
        }
    }

    if reports_fix && let (Some(lat), Some(lon)) = (nmea.latitude, nmea.longitude) {
        tracker.update_position(lat, lon, nmea.fix_time.map(seconds_since_midnight));
    }

    true
}

fn seconds_since_midnight(time: NaiveTime) -> f64 {
    f64::from(time.num_seconds_from_midnight()) + f64::from(time.nanosecond()) / 1e9
}
