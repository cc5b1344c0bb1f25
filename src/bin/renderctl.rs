use std::{fs::File, io::BufReader, path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use renderctl::{
    Canvas, FrameIndex, FrameRange, PatternRenderer, RenderJob, RenderJobOpts, ScriptController,
    ScriptHost,
};

#[derive(Parser, Debug)]
#[command(name = "renderctl", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drive a scripted render job to completion.
    Run(RunArgs),
    /// Validate that a controller script defines every hook.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Controller script (rhai).
    #[arg(long)]
    script: PathBuf,

    /// Optional job config JSON.
    #[arg(long)]
    job: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Controller script (rhai).
    #[arg(long)]
    script: PathBuf,
}

/// Job configuration accepted by `renderctl run --job`.
#[derive(Debug, serde::Deserialize)]
#[serde(default)]
struct JobConfig {
    frames: u64,
    width: u32,
    height: u32,
    polls_per_frame: u32,
    max_restarts: Option<u32>,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            frames: 120,
            width: 64,
            height: 64,
            polls_per_frame: 1,
            max_restarts: None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => run(args),
        Command::Check(args) => check(args),
    }
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let cfg = match &args.job {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("cannot parse {}", path.display()))?
        }
        None => JobConfig::default(),
    };

    let host = Arc::new(ScriptHost::load_file(&args.script)?);
    let controller = Box::new(ScriptController::new(&host));
    let renderer = PatternRenderer::new(Canvas {
        width: cfg.width,
        height: cfg.height,
    });
    let opts = RenderJobOpts {
        range: FrameRange::new(FrameIndex(0), FrameIndex(cfg.frames))?,
        polls_per_frame: cfg.polls_per_frame,
        max_restarts: cfg.max_restarts,
    };

    let report = RenderJob::new(renderer, controller, opts)?.run()?;

    println!("outcome:         {:?}", report.outcome);
    println!("frames rendered: {}", report.stats.frames_rendered);
    println!("progress polls:  {}", report.stats.progress_polls);
    println!("restarts:        {}", report.stats.restarts);
    if host.reported_errors() > 0 {
        println!("script errors:   {}", host.reported_errors());
    }
    Ok(())
}

fn check(args: CheckArgs) -> anyhow::Result<()> {
    ScriptHost::load_file(&args.script)?;
    println!("ok: all controller hooks bound");
    Ok(())
}
