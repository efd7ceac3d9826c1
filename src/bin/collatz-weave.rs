use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use collatz_weave::{
    AnimationState, CpuBackend, FrameIndex, FrameRenderer, GraphicsBackend, SketchConfig,
};

#[derive(Parser, Debug)]
#[command(name = "collatz-weave", version)]
struct Cli {
    /// Log per-frame diagnostics.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the animation on the CPU backend and write the accumulated canvas as a PNG.
    Render(RenderArgs),
    /// Print the draw commands of one frame as JSON.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Sketch config JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many frames even if `max_frames` has not been reached.
    #[arg(long)]
    frames: Option<u64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// RNG seed for the color walks (overrides the config).
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Sketch config JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame index (>= 1).
    #[arg(long)]
    frame: u64,

    /// RNG seed for the color walk (overrides the config).
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
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

fn load_config(path: Option<&Path>, seed: Option<u64>) -> anyhow::Result<SketchConfig> {
    let mut config = match path {
        Some(p) => SketchConfig::from_json_file(p)
            .with_context(|| format!("load sketch config '{}'", p.display()))?,
        None => SketchConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref(), args.seed)?;
    let renderer = FrameRenderer::new(config.clone())?;
    let mut state = AnimationState::from_config(&config);
    let mut rng = collatz_weave::rng_for_seed(config.seed);

    let mut backend = CpuBackend::new();
    backend.init_canvas(config.canvas)?;

    let stats = collatz_weave::drive(&renderer, &mut state, &mut backend, &mut rng, args.frames)?;
    let frame = backend.snapshot()?.into_straight();

    if let Some(parent) = args.out.parent() {
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
        "wrote {} ({} frames, {} segments)",
        args.out.display(),
        stats.frames_rendered,
        backend.lines_drawn()
    );
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref(), args.seed)?;
    let mut rng = collatz_weave::rng_for_seed(config.seed);
    let plan = collatz_weave::plan_frame(&config, FrameIndex(args.frame), &mut rng)?;

    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), &plan).context("write plan JSON")?;
    println!();
    Ok(())
}
