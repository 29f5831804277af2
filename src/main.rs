use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use indoc::indoc;

use bubble_overlay::app::App;
use bubble_overlay::config::{OverlayConfig, RawOverlayConfig};
use bubble_overlay::constants::{
    DEFAULT_WIDGET_HEIGHT, DEFAULT_WIDGET_WIDTH, DRAG_THRESHOLD_PX, SNAP_ANIMATION_MS,
};
use bubble_overlay::drivers::OutputDriver;
use bubble_overlay::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use bubble_overlay::runner::run_bubble_app;
use bubble_overlay::service::{BubbleOptions, PopupContent, StaticPermission};
use bubble_overlay::tracing_sub::{self, LogTarget};
use bubble_overlay::Easing;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(
    name = "bubble-overlay",
    version = env!("CARGO_PKG_VERSION"),
    about = "A draggable floating bubble that snaps to the nearest screen edge",
    after_help = indoc! {"
        Controls:
          drag the bubble with the left mouse button; release to snap
          click the bubble to open the ride request
          s show   h hide   g grant overlay permission   q quit
    "}
)]
struct Cli {
    /// Bubble width in virtual pixels.
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_WIDGET_WIDTH)]
    widget_width: i32,

    /// Bubble height in virtual pixels.
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_WIDGET_HEIGHT)]
    widget_height: i32,

    /// Pointer travel that turns a press into a drag.
    #[arg(long, value_name = "PX", default_value_t = DRAG_THRESHOLD_PX)]
    drag_threshold: f32,

    /// Length of the glide to the snapped edge.
    #[arg(long, value_name = "MS", default_value_t = SNAP_ANIMATION_MS)]
    snap_duration_ms: u64,

    #[arg(long, value_enum, default_value_t = EasingArg::AccelerateDecelerate)]
    easing: EasingArg,

    /// Virtual pixels per terminal column.
    #[arg(long, value_name = "PX", default_value_t = 10)]
    px_per_col: i32,

    /// Virtual pixels per terminal row.
    #[arg(long, value_name = "PX", default_value_t = 20)]
    px_per_row: i32,

    /// Start without overlay permission; press `g` to grant it.
    #[arg(long)]
    no_overlay_permission: bool,

    /// Append logs to this file. Without it logs are discarded.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log at DEBUG instead of INFO.
    #[arg(short, long)]
    verbose: bool,

    /// Ride request title.
    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    price: Option<String>,

    #[arg(long)]
    duration: Option<String>,

    #[arg(long)]
    distance: Option<String>,

    /// Pickup address.
    #[arg(long)]
    pickup: Option<String>,

    /// Destination address.
    #[arg(long)]
    destination: Option<String>,

    /// Payment method, e.g. "Card".
    #[arg(long)]
    payment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EasingArg {
    Linear,
    AccelerateDecelerate,
}

impl From<EasingArg> for Easing {
    fn from(arg: EasingArg) -> Self {
        match arg {
            EasingArg::Linear => Easing::Linear,
            EasingArg::AccelerateDecelerate => Easing::AccelerateDecelerate,
        }
    }
}

impl TryFrom<&Cli> for OverlayConfig {
    type Error = io::Error;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let raw = RawOverlayConfig {
            widget_width: cli.widget_width,
            widget_height: cli.widget_height,
            drag_threshold: cli.drag_threshold,
            snap_duration_ms: cli.snap_duration_ms,
            easing: cli.easing.into(),
            px_per_col: cli.px_per_col,
            px_per_row: cli.px_per_row,
        };
        Ok(OverlayConfig::try_from(raw)?)
    }
}

impl Cli {
    /// Bubble options with the popup overrides applied; blanks fall back to
    /// the defaults when the service resolves them.
    fn bubble_options(&self) -> BubbleOptions {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        BubbleOptions {
            popup: PopupContent {
                title: text(&self.title),
                price: text(&self.price),
                duration: text(&self.duration),
                distance: text(&self.distance),
                pickup_address: text(&self.pickup),
                destination_address: text(&self.destination),
                payment_method: text(&self.payment),
                ..PopupContent::empty()
            },
            ..BubbleOptions::default()
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = OverlayConfig::try_from(&cli)?;

    let log_target = match cli.log_file.as_deref() {
        Some(path) => LogTarget::open(path)?,
        None => LogTarget::Discard,
    };
    tracing_sub::init(log_target, cli.verbose);
    tracing::info!(?config, "starting bubble overlay");

    let mut output = ConsoleOutputDriver::new()?;
    let area = output.size()?;
    let mut app = App::new(
        config,
        cli.bubble_options(),
        StaticPermission::new(!cli.no_overlay_permission),
        area,
    )?;

    let result = run_bubble_app(ConsoleInputDriver::new(), &mut output, &mut app, FRAME_INTERVAL);
    if let Err(err) = &result {
        tracing::error!(%err, "bubble overlay stopped");
    }
    result
}
