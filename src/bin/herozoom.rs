use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use herozoom::{
    BlendMode, CpuRasterizer, Density, FrameRGBA, GridDims, HeroSettings, ManualClock, Millis,
    OverlayEnv, OverlayKind, OverlaySettings, Rect, Size, Tile, TileLayout, TileOrder,
    TileSequencer, TimingConfig, ZoomEffects, ZoomStage,
};

#[derive(Parser, Debug)]
#[command(name = "herozoom", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate an overlay and write its last frame as a PNG.
    Overlay(OverlayArgs),
    /// Print the tile visit timeline for a settings file.
    Schedule(ScheduleArgs),
}

#[derive(Parser, Debug)]
struct OverlayArgs {
    /// constellation, morph-polygons or soft-waves.
    #[arg(long, default_value = "constellation")]
    kind: String,

    /// low, medium or high.
    #[arg(long, default_value = "medium")]
    density: String,

    /// normal, screen, overlay or multiply.
    #[arg(long, default_value = "normal")]
    blend: String,

    /// Element width in CSS pixels.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Element height in CSS pixels.
    #[arg(long, default_value_t = 360)]
    height: u32,

    /// Device pixel ratio (capped at 2).
    #[arg(long, default_value_t = 1.0)]
    pixel_ratio: f64,

    /// Global alpha multiplier.
    #[arg(long, default_value_t = 0.6)]
    opacity: f64,

    /// Animation speed multiplier.
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Frames to simulate, 16 ms apart.
    #[arg(long, default_value_t = 30)]
    frames: u64,

    /// Entity seed.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ScheduleArgs {
    /// Settings JSON; built-in defaults when omitted.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Number of tiles.
    #[arg(long, default_value_t = 6)]
    tiles: usize,

    /// Grid columns.
    #[arg(long, default_value_t = 3)]
    cols: u32,

    /// Grid rows.
    #[arg(long, default_value_t = 2)]
    rows: u32,

    /// Full passes over the tiles to print.
    #[arg(long, default_value_t = 1)]
    cycles: u64,

    /// Use the reduced-motion zoom durations.
    #[arg(long)]
    reduced_motion: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Overlay(args) => cmd_overlay(args),
        Command::Schedule(args) => cmd_schedule(args),
    }
}

fn cmd_overlay(args: OverlayArgs) -> anyhow::Result<()> {
    let kind = OverlayKind::parse(&args.kind)
        .with_context(|| format!("unknown overlay kind '{}'", args.kind))?;
    let density = Density::parse(&args.density)
        .with_context(|| format!("unknown density '{}'", args.density))?;
    let blend = BlendMode::parse(&args.blend)
        .with_context(|| format!("unknown blend mode '{}'", args.blend))?;
    for (name, v) in [
        ("opacity", args.opacity),
        ("speed", args.speed),
        ("pixel-ratio", args.pixel_ratio),
    ] {
        anyhow::ensure!(v.is_finite(), "--{name} must be a finite number, got {v}");
    }

    let settings = OverlaySettings {
        opacity: args.opacity.clamp(0.0, 1.0),
        speed: args.speed.clamp(0.25, 2.0),
        density,
        blend,
    };
    let element = Size::new(f64::from(args.width), f64::from(args.height));
    let env = OverlayEnv {
        cap_fps: false,
        ..OverlayEnv::new(false, args.pixel_ratio, element).with_seed(args.seed)
    };

    // A frozen clock keeps the governor from downgrading an offline render.
    let mut overlay =
        herozoom::init_overlay_with_clock(kind, settings, env, Box::new(ManualClock::new()));
    overlay.start(Millis::ZERO);
    for i in 1..=args.frames.max(1) {
        overlay.frame(Millis(i * 16));
    }

    let layer = CpuRasterizer::new().render(overlay.canvas())?;
    let mut frame = FrameRGBA::filled(layer.width, layer.height, [18, 20, 28, 255]);
    frame.blend_from(&layer, blend)?;
    write_png(&args.out, &frame)?;

    eprintln!(
        "wrote {} ({} {}, {} entities)",
        args.out.display(),
        kind.name(),
        args.density,
        overlay.entity_count()
    );
    Ok(())
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.to_straight(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn read_settings(path: Option<&Path>) -> anyhow::Result<HeroSettings> {
    let Some(path) = path else {
        return Ok(HeroSettings::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read settings '{}'", path.display()))?;
    let settings = HeroSettings::from_json(&text)
        .with_context(|| format!("parse settings '{}'", path.display()))?;
    Ok(settings.sanitize())
}

fn grid_layout(n: usize, grid: GridDims) -> TileLayout {
    let cols = grid.cols as usize;
    let tiles = (0..n)
        .map(|i| {
            let (c, r) = ((i % cols) as f64, (i / cols) as f64);
            Tile {
                index: i,
                rect: Rect::new(c * 100.0, r * 100.0, (c + 1.0) * 100.0, (r + 1.0) * 100.0),
                media: herozoom::MediaSource::image(format!("tile-{i}")),
            }
        })
        .collect();
    TileLayout {
        container: Rect::new(
            0.0,
            0.0,
            f64::from(grid.cols) * 100.0,
            f64::from(grid.rows) * 100.0,
        ),
        grid,
        tiles,
    }
}

fn cmd_schedule(args: ScheduleArgs) -> anyhow::Result<()> {
    let settings = read_settings(args.settings.as_deref())?;
    let grid = GridDims::new(args.cols, args.rows)?;
    let timing = TimingConfig::from_settings(&settings);
    let cycle = timing.cycle_ms(args.reduced_motion);

    let mut seq = TileSequencer::new(
        ZoomStage::new(),
        timing,
        ZoomEffects::from_settings(&settings.effects),
    );
    seq.set_reduced_motion(args.reduced_motion);
    seq.recompute_tiles(&grid_layout(args.tiles, grid), settings.order, Millis::ZERO);
    seq.start(Millis::ZERO);

    let Some(first) = seq.display().highlight() else {
        eprintln!("no tiles to schedule");
        return Ok(());
    };
    let order = match settings.order {
        TileOrder::Ltr => "ltr",
        TileOrder::Rtl => "rtl",
    };
    println!("# order={order} cycle={cycle}ms");
    println!("0\t{first}\tsettle");

    let end = cycle * args.tiles as u64 * args.cycles.max(1);
    for ev in seq.tick(Millis(end.saturating_sub(1))) {
        println!("{}\t{}\t{}", ev.at.0, ev.tile, ev.phase.name());
    }
    Ok(())
}
