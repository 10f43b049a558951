use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use map_autopan::speed_feed;
use map_autopan::{
    AutoPanButton, AutoPanConfig, AutoPanStateMachine, AutoPanVisual, CompassRoseButton,
    CompassRoseVisual, GpsTracker, MapSurface, RotationSource,
};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use map_autopan::config::{DEFAULT_HYSTERESIS, DEFAULT_ROTATION_SPEED_THRESHOLD};

/// Replays a recorded NMEA log through the map auto-pan controller.
#[derive(Parser)]
#[command(name = "autopan-replay", version)]
struct Cli {
    /// NMEA 0183 log to replay
    input: PathBuf,

    /// Click the auto-pan button before replaying
    #[arg(long)]
    follow: bool,

    /// Click the compass-rose button before replaying
    #[arg(long, requires = "follow")]
    rotate: bool,

    /// Speed (m/s) above which the map rotates by GPS bearing
    #[arg(long, default_value_t = DEFAULT_ROTATION_SPEED_THRESHOLD)]
    threshold: f64,

    /// Half-width (m/s) of the band around the threshold
    #[arg(long, default_value_t = DEFAULT_HYSTERESIS)]
    hysteresis: f64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

struct ConsoleMap;

impl MapSurface for ConsoleMap {
    fn set_auto_pan_to_gps(&mut self, enabled: bool) {
        info!(enabled, "map: auto-pan to GPS");
    }

    fn set_auto_rotate(&mut self, rotation: Option<RotationSource>) {
        match rotation {
            Some(source) => info!(%source, "map: auto-rotate on"),
            None => info!("map: auto-rotate off"),
        }
    }
}

struct ConsoleAutoPanButton {
    visual: Option<AutoPanVisual>,
}

impl AutoPanButton for ConsoleAutoPanButton {
    fn set_visual(&mut self, visual: AutoPanVisual) {
        // Only log changes, the machine refreshes on every event.
        if self.visual != Some(visual) {
            info!(?visual, "auto-pan button");
            self.visual = Some(visual);
        }
    }
}

struct ConsoleCompassRose {
    visual: Option<CompassRoseVisual>,
}

impl CompassRoseButton for ConsoleCompassRose {
    fn set_visual(&mut self, visual: CompassRoseVisual) {
        if self.visual != Some(visual) {
            info!(?visual, "compass rose");
            self.visual = Some(visual);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install log subscriber")?;

    let config = AutoPanConfig::new(cli.threshold, cli.hysteresis)
        .context("Invalid rotation speed settings")?;

    let mut machine = AutoPanStateMachine::with_config(
        config,
        ConsoleMap,
        ConsoleAutoPanButton { visual: None },
        ConsoleCompassRose { visual: None },
    );

    if cli.follow {
        machine.user_clicked_auto_pan_button();
    }
    if cli.rotate {
        machine.user_clicked_compass_rose_button();
    }

    let file = File::open(&cli.input)
        .with_context(|| format!("Failed to open {}", cli.input.display()))?;
    info!(input = %cli.input.display(), "replaying NMEA log");

    let mut tracker = GpsTracker::new();
    let stats = speed_feed::replay(BufReader::new(file), &mut tracker, &mut machine)?;

    println!("Final mode: {}", machine.mode());
    println!("Last speed: {}", machine.speed());
    if let Some(pos) = tracker.get_current_position() {
        println!("Last position: {}", pos);
    }
    println!(
        "Sentences: {}, parse errors: {}, speed updates: {}",
        stats.sentences, stats.parse_errors, stats.speed_updates
    );

    Ok(())
}
