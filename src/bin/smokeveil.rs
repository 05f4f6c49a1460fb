use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "smokeveil", version)]
struct Cli {
    /// Log scene and render events to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a scene, run some ticks and write the result as a PNG.
    Frame(FrameArgs),
    /// Print the default configuration as JSON.
    Config,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Configuration JSON; unset fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 640)]
    width: u32,

    #[arg(long, default_value_t = 360)]
    height: u32,

    /// Seed for contours and ring placement. Omit for a clock-based seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of ticks to run; stops earlier once a ring leaves the surface.
    #[arg(long, default_value_t = 100)]
    ticks: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Pace ticks at the configured interval instead of running flat out.
    #[arg(long)]
    realtime: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Config => cmd_config(),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_config(path: Option<&Path>) -> anyhow::Result<smokeveil::SmokeConfig> {
    let Some(path) = path else {
        return Ok(smokeveil::SmokeConfig::default());
    };
    let cfg = smokeveil::SmokeConfig::from_path(path)
        .with_context(|| format!("load config '{}'", path.display()))?;
    Ok(cfg)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let canvas = smokeveil::Canvas::new(args.width, args.height)?;
    let mut surface = smokeveil::CpuSurface::new(canvas)?;

    let rng = match args.seed {
        Some(seed) => smokeveil::Rng64::new(seed),
        None => smokeveil::Rng64::from_clock(),
    };
    let mut scene = smokeveil::SmokeScene::new(config, rng);
    scene.generate(&mut surface)?;

    let stats = smokeveil::render_ticks(
        &mut scene,
        &mut surface,
        smokeveil::RenderOpts {
            max_ticks: args.ticks,
            realtime: args.realtime,
        },
    )?;
    tracing::debug!(?stats, "render stats");

    let frame = smokeveil::snapshot(&mut surface, args.width, args.height)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} ticks{})",
        args.out.display(),
        stats.ticks,
        if stats.expired { ", ring expired" } else { "" }
    );
    Ok(())
}

fn cmd_config() -> anyhow::Result<()> {
    let json = smokeveil::SmokeConfig::default().to_json_pretty()?;
    println!("{json}");
    Ok(())
}
