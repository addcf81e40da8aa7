use anyhow::{Context, Result};
use clap::Parser;
use erdsketch::geometry::Vec2;
use erdsketch::logging::{self, LogFormat};
use erdsketch::{AppConfig, AppContext};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sketch entity-relationship diagrams", long_about = None)]
struct Cli {
    /// Window width in logical pixels
    #[arg(long, default_value_t = 1000.0)]
    width: f32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 700.0)]
    height: f32,

    /// Initial scene width, used before the canvas is first laid out
    #[arg(long, default_value_t = 800.0)]
    scene_width: f32,

    /// Initial scene height, used before the canvas is first laid out
    #[arg(long, default_value_t = 600.0)]
    scene_height: f32,

    /// Log level or filter directive (trace|debug|info|warn|error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format; falls back to ERDSKETCH_LOG_FORMAT, then compact
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,

    /// Use the dark theme for window chrome
    #[arg(long)]
    dark: bool,
}

impl Cli {
    fn into_config(self) -> AppConfig {
        AppConfig {
            window_size: Vec2::new(self.width, self.height),
            scene_size: Vec2::new(self.scene_width, self.scene_height),
            dark_mode: self.dark,
            ..AppConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref(), cli.log_format)
        .context("Failed to initialize logging")?;

    let ctx = AppContext::new(cli.into_config()).context("Invalid configuration")?;
    info!(
        width = ctx.config.window_size.x,
        height = ctx.config.window_size.y,
        "starting"
    );
    run(ctx)
}

#[cfg(feature = "egui")]
fn run(ctx: AppContext) -> Result<()> {
    erdsketch::gui::run(ctx).context("Window closed with an error")
}

#[cfg(not(feature = "egui"))]
fn run(_ctx: AppContext) -> Result<()> {
    eprintln!("erdsketch was built without the 'egui' feature. Try: cargo run --features egui");
    Ok(())
}
