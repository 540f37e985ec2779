use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use storehouse_common::Viewport;
use storehouse_frame::{FrameScheduler, ManualClock, SchedulerConfig, Stage};
use storehouse_input::{InputState, LogicalKey};
use storehouse_layout::{
    DISTANCE_BETWEEN_AISLES, DISTANCE_BETWEEN_LINES, Layout, LayoutSpacing, WarehouseConfig,
    generate_layout_with,
};
use storehouse_locomotion::{
    HeadlessCapture, LocomotionController, LocomotionSettings, NavigationState, StrategyKind,
};
use storehouse_render::DebugTextRenderer;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "storehouse-cli", about = "CLI tool for storehouse layouts")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Generate a layout and summarize it
    Layout {
        #[command(flatten)]
        shape: ShapeArgs,
        /// Print the full layout as JSON
        #[arg(long)]
        json: bool,
    },
    /// Walk the rig headlessly and print the last rendered frame
    Walk {
        #[command(flatten)]
        shape: ShapeArgs,
        /// Locomotion strategy: first-person, orbit or keyboard
        #[arg(short, long, default_value_t = StrategyKind::FirstPerson)]
        strategy: StrategyKind,
        /// Number of frames to run
        #[arg(short, long, default_value_t = 60)]
        frames: u32,
        /// Simulated frame time in milliseconds
        #[arg(long, default_value_t = 16)]
        frame_ms: u64,
        /// Hold forward
        #[arg(long)]
        forward: bool,
        /// Hold backward
        #[arg(long)]
        backward: bool,
        /// Hold left
        #[arg(long)]
        left: bool,
        /// Hold right
        #[arg(long)]
        right: bool,
        /// Horizontal pointer motion per frame, in pixels
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        look_x: f32,
        /// Vertical pointer motion per frame, in pixels
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        look_y: f32,
        /// Simulate a host that refuses pointer capture
        #[arg(long)]
        deny_lock: bool,
        /// First-person velocity damping per second
        #[arg(long)]
        damping: Option<f32>,
        /// First-person acceleration while a direction is held
        #[arg(long)]
        accel: Option<f32>,
        /// Keyboard strategy step per press
        #[arg(long)]
        step: Option<f32>,
        /// Print every frame instead of only the last
        #[arg(long)]
        all_frames: bool,
    },
}

#[derive(Args)]
struct ShapeArgs {
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
}

impl ShapeArgs {
    fn generate(&self) -> anyhow::Result<(WarehouseConfig, Layout)> {
        let config = WarehouseConfig::new(
            WarehouseConfig::parse_aisles(&self.aisles),
            self.lines,
            self.rows,
            self.columns,
        );
        let spacing = LayoutSpacing {
            line_gap: self.line_gap,
            aisle_gap: self.aisle_gap,
        };
        let layout = generate_layout_with(&config, spacing)?;
        Ok((config, layout))
    }
}

fn print_summary(config: &WarehouseConfig, layout: &Layout) {
    println!(
        "Warehouse: {} aisles x {} lines, shelves {} rows x {} columns",
        config.aisles.len(),
        config.lines_per_aisle,
        config.rows_per_shelf,
        config.columns_per_shelf
    );
    println!("Units: {}  Lights: {}", layout.units.len(), layout.lights.len());
    for (index, label) in config.aisles.iter().enumerate() {
        println!("  {label}: {} units", layout.units_in_aisle(index).count());
    }
    if let Some(bounds) = layout.bounds() {
        println!(
            "Bounds: ({:.1}, {:.1}, {:.1}) .. ({:.1}, {:.1}, {:.1})",
            bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
        );
    }
    let a = layout.camera_anchor;
    let t = layout.camera_target;
    println!("Camera anchor: ({:.1}, {:.1}, {:.1})", a.x, a.y, a.z);
    println!("Camera target: ({:.1}, {:.1}, {:.1})", t.x, t.y, t.z);
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("storehouse-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("layout: {}", storehouse_layout::crate_info());
            println!("locomotion: {}", storehouse_locomotion::crate_info());
            println!("render: {}", storehouse_render::crate_info());
            println!("frame: {}", storehouse_frame::crate_info());
            let strategies: Vec<&str> = StrategyKind::ALL.iter().map(|k| k.as_str()).collect();
            println!("strategies: {}", strategies.join(", "));
            println!(
                "default shape: {} units",
                WarehouseConfig::default().unit_count()
            );
        }
        Commands::Layout { shape, json } => {
            let (config, layout) = shape.generate()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&layout)?);
            } else {
                print_summary(&config, &layout);
            }
        }
        Commands::Walk {
            shape,
            strategy,
            frames,
            frame_ms,
            forward,
            backward,
            left,
            right,
            look_x,
            look_y,
            deny_lock,
            damping,
            accel,
            step,
            all_frames,
        } => {
            let (_, layout) = shape.generate()?;

            let mut settings = LocomotionSettings::default();
            if let Some(damping) = damping {
                settings.first_person.damping = damping;
            }
            if let Some(accel) = accel {
                settings.first_person.acceleration = accel;
            }
            if let Some(step) = step {
                settings.keyboard.step = step;
            }
            settings.validate()?;

            let nav = NavigationState::looking_at(layout.camera_anchor, layout.camera_target);
            let mut controller =
                LocomotionController::from_kind(strategy, &settings, nav, layout.camera_target);
            let mut stage = Stage::with_viewport(Viewport::default(), DebugTextRenderer::new());
            stage.populate(&layout);
            let mut scheduler = FrameScheduler::new(ManualClock::new(), SchedulerConfig::default());
            let mut capture = if deny_lock {
                HeadlessCapture::denying()
            } else {
                HeadlessCapture::granting()
            };

            let held: Vec<LogicalKey> = [
                (forward, LogicalKey::Forward),
                (backward, LogicalKey::Backward),
                (left, LogicalKey::Left),
                (right, LogicalKey::Right),
            ]
            .into_iter()
            .filter_map(|(on, key)| on.then_some(key))
            .collect();
            let look = glam::Vec2::new(look_x, look_y);

            let mut input = InputState::new();
            input.request_lock();
            let mut last = None;
            for _ in 0..frames {
                // Held keys auto-repeat, so keyboard stepping sees one press per frame.
                for key in &held {
                    input.key_down(*key);
                }
                input.pointer_motion(look);
                scheduler.clock_mut().advance(Duration::from_millis(frame_ms));
                let output = scheduler
                    .frame(&mut stage, &mut controller, &mut input, &mut capture)
                    .into_output();
                if all_frames {
                    if let Some(text) = &output {
                        print!("{text}");
                    }
                }
                last = output.or(last);
            }

            if !all_frames {
                if let Some(text) = &last {
                    print!("{text}");
                }
            }
            let nav = controller.state();
            println!(
                "Final: strategy={} mode={:?} position=({:.2}, {:.2}, {:.2}) yaw={:.3} pitch={:.3} speed={:.2}",
                controller.kind(),
                controller.mode(),
                nav.position.x,
                nav.position.y,
                nav.position.z,
                nav.yaw,
                nav.pitch,
                nav.speed()
            );
            println!(
                "Frames: {} rendered, avg {:.1} fps",
                scheduler.rendered_frames(),
                scheduler.timer().fps()
            );
        }
    }

    Ok(())
}
