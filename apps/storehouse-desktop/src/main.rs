mod app;
mod capture;
mod hud;
mod keymap;
mod viewer;

use anyhow::Result;
use clap::Parser;
use storehouse_layout::{
    DISTANCE_BETWEEN_AISLES, DISTANCE_BETWEEN_LINES, LayoutSpacing, WarehouseConfig,
    generate_layout_with,
};
use storehouse_locomotion::{LocomotionSettings, StrategyKind};
use storehouse_render_wgpu::LightTuning;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

use crate::app::ViewerApp;

#[derive(Parser)]
#[command(name = "storehouse-desktop", about = "Walk through a procedurally generated warehouse")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Locomotion strategy: first-person, orbit or keyboard
    #[arg(short, long, default_value_t = StrategyKind::FirstPerson)]
    strategy: StrategyKind,

    /// Comma-separated aisle labels
    #[arg(long, default_value = "A1,A2,A3,B1,B2,B3")]
    aisles: String,

    /// Shelf lines per aisle
    #[arg(long, default_value_t = 3)]
    lines: u32,

    /// Rows per shelf
    #[arg(long, default_value_t = 10)]
    rows: u32,

    /// Columns (stack height) per shelf
    #[arg(long, default_value_t = 4)]
    columns: u32,

    /// Gap between consecutive shelf lines in an aisle
    #[arg(long, default_value_t = DISTANCE_BETWEEN_LINES)]
    line_gap: f32,

    /// Walkway width between the two faces of an aisle
    #[arg(long, default_value_t = DISTANCE_BETWEEN_AISLES)]
    aisle_gap: f32,

    /// First-person velocity damping per second
    #[arg(long)]
    damping: Option<f32>,

    /// First-person acceleration while a direction is held
    #[arg(long)]
    accel: Option<f32>,

    /// Keyboard strategy step per press
    #[arg(long)]
    step: Option<f32>,
}

impl Cli {
    fn warehouse(&self) -> WarehouseConfig {
        WarehouseConfig::new(
            WarehouseConfig::parse_aisles(&self.aisles),
            self.lines,
            self.rows,
            self.columns,
        )
    }

    fn spacing(&self) -> LayoutSpacing {
        LayoutSpacing {
            line_gap: self.line_gap,
            aisle_gap: self.aisle_gap,
        }
    }

    fn locomotion(&self) -> LocomotionSettings {
        let mut settings = LocomotionSettings::default();
        if let Some(damping) = self.damping {
            settings.first_person.damping = damping;
        }
        if let Some(accel) = self.accel {
            settings.first_person.acceleration = accel;
        }
        if let Some(step) = self.step {
            settings.keyboard.step = step;
        }
        settings
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("storehouse-desktop starting");

    let settings = cli.locomotion();
    settings.validate()?;
    let layout = generate_layout_with(&cli.warehouse(), cli.spacing())?;
    let mut app = ViewerApp::new(layout, cli.strategy, settings, LightTuning::default());

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.take_init_error() {
        return Err(e.into());
    }
    Ok(())
}
