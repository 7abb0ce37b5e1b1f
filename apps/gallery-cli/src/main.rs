use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use gallery_assets::{SourceManifest, TextureStore};
use gallery_common::{CameraParams, Screen};
use gallery_input::{InputEvent, WheelDelta};
use gallery_kernel::{Gallery, GalleryConfig, GalleryEvent, ViewportMapper};
use gallery_layout::{GridLayout, GridLayoutConfig};
use gallery_render::{DebugTextRenderer, Renderer, TextureBindings};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gallery-cli", about = "Headless driver for the infinite gallery engine")]
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
    /// Show the camera-plane viewport for a screen size
    Viewport {
        #[arg(long, default_value = "1920")]
        width: f32,
        #[arg(long, default_value = "1080")]
        height: f32,
        /// Vertical field of view in degrees
        #[arg(long, default_value = "45")]
        fov: f32,
        /// Camera distance to the tile plane
        #[arg(long, default_value = "5")]
        distance: f32,
    },
    /// Drive the gallery with scripted input and report wraps
    Simulate(SimulateArgs),
}

#[derive(Args)]
struct SimulateArgs {
    /// Number of frames to run
    #[arg(short, long, default_value = "120")]
    frames: u64,
    /// Wheel pixels added every frame (positive scrolls down the content)
    #[arg(long, default_value = "40", allow_hyphen_values = true)]
    wheel: f32,
    /// Horizontal drag distance in pixels, spread over the first frames
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    drag: f32,
    /// Click the screen center on this frame
    #[arg(long)]
    click: Option<u64>,
    /// Placeholder tile count when no media is given
    #[arg(short, long, default_value = "24")]
    tiles: usize,
    /// Media directory or JSON manifest
    #[arg(long)]
    images: Option<PathBuf>,
    /// JSON viewer config (gallery and layout sections)
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "1920")]
    width: f32,
    #[arg(long, default_value = "1080")]
    height: f32,
    /// Print every gallery event as a JSON line
    #[arg(long)]
    json: bool,
}

/// Everything the viewer reads from its config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ViewerConfig {
    gallery: GalleryConfig,
    layout: GridLayoutConfig,
}

impl ViewerConfig {
    fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => gallery_kernel::config::load_json::<Self>(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => Self::default(),
        };
        config.gallery.validate()?;
        config.layout.validate()?;
        Ok(config)
    }
}

/// Frames a scripted drag is spread over.
const DRAG_FRAMES: u64 = 10;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("gallery-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: {}", gallery_kernel::crate_info());
            println!("input: {}", gallery_input::crate_info());
            println!("layout: {}", gallery_layout::crate_info());
            println!("render: {}", gallery_render::crate_info());
            println!("assets: {}", gallery_assets::crate_info());
        }
        Commands::Viewport {
            width,
            height,
            fov,
            distance,
        } => {
            anyhow::ensure!(width > 0.0 && height > 0.0, "screen size must be positive");
            let mapper = ViewportMapper::new(
                Screen::new(width, height),
                CameraParams {
                    fov_degrees: fov,
                    distance,
                },
            );
            let vp = mapper.viewport();
            println!("Screen: {width} x {height} px");
            println!("Viewport: {:.4} x {:.4} units", vp.width, vp.height);
            println!(
                "Scale: {:.6} units/px horizontal, {:.6} units/px vertical",
                mapper.to_viewport_x(1.0),
                mapper.to_viewport_y(1.0)
            );
        }
        Commands::Simulate(args) => simulate(args)?,
    }

    Ok(())
}

fn simulate(args: SimulateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.width > 0.0 && args.height > 0.0,
        "screen size must be positive"
    );
    let config = ViewerConfig::load(args.config.as_deref())?;

    let store = match &args.images {
        Some(path) => {
            let manifest = SourceManifest::open(path)
                .with_context(|| format!("reading media from {}", path.display()))?;
            TextureStore::load_all(&manifest.sources)
        }
        None => TextureStore::placeholders(args.tiles, 64, 64),
    };
    let tile_count = store.tile_count();
    let bindings = TextureBindings::from_store(&store);

    let mut layout = GridLayout::new(config.layout, tile_count)?;
    let mut gallery = Gallery::new(config.gallery, tile_count);
    gallery.resize(
        Screen::new(args.width, args.height),
        config.gallery.camera,
        &mut layout,
    );

    tracing::info!(
        tiles = tile_count,
        bound = bindings.bound_count(),
        failures = store.failures().len(),
        frames = args.frames,
        "starting simulation"
    );
    let _span = tracing::info_span!("simulate", frames = args.frames).entered();

    let (cx, cy) = (args.width / 2.0, args.height / 2.0);
    let mut wraps = 0usize;
    let mut toggles = 0usize;

    for frame in 0..args.frames {
        if args.drag != 0.0 && frame <= DRAG_FRAMES {
            let x = cx - args.drag * frame as f32 / DRAG_FRAMES as f32;
            let event = match frame {
                0 => InputEvent::Down { x, y: cy },
                DRAG_FRAMES => InputEvent::Up { x, y: cy },
                _ => InputEvent::Move { x, y: cy },
            };
            event.apply(&mut gallery);
        }
        if args.click == Some(frame) {
            InputEvent::Down { x: cx, y: cy }.apply(&mut gallery);
            InputEvent::Up { x: cx, y: cy }.apply(&mut gallery);
        }
        if args.wheel != 0.0 {
            InputEvent::Wheel(WheelDelta::Pixels {
                x: 0.0,
                y: args.wheel,
            })
            .apply(&mut gallery);
        }

        gallery.update();

        for event in gallery.drain_events() {
            match event {
                GalleryEvent::Wrapped { .. } => wraps += 1,
                GalleryEvent::ModeChanged { .. } => toggles += 1,
                GalleryEvent::Resized { .. } => {}
            }
            if args.json {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
    }

    tracing::info!(wraps, toggles, frame = gallery.frame(), "simulation finished");

    print!("{}", DebugTextRenderer::new().render(&gallery, &bindings));
    println!("{}", gallery.summary());
    println!(
        "Frames: {}  Wraps: {}  Mode toggles: {}  Load failures: {}",
        args.frames,
        wraps,
        toggles,
        store.failures().len()
    );
    Ok(())
}
