use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "framefx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process one JSON request from stdin and print the JSON response.
    Process(ProcessArgs),
    /// Apply filters to an image file.
    Apply(ApplyArgs),
}

#[derive(Parser, Debug)]
struct ProcessArgs {
    /// Read the request from a file instead of stdin.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ApplyArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output image path (format from the extension).
    #[arg(long)]
    out: PathBuf,

    /// Filter parameters JSON. Defaults apply when omitted.
    #[arg(long)]
    filters: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Process(args) => cmd_process(args),
        Command::Apply(args) => cmd_apply(args),
    }
}

/// Logs go to stderr so `process` can keep stdout for the response JSON.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_process(args: ProcessArgs) -> anyhow::Result<()> {
    match run_process(&args) {
        Ok(payload) => {
            let response = framefx::ProcessResponse::ok(payload);
            println!("{}", serde_json::to_string(&response)?);
            Ok(())
        }
        Err(err) => {
            let response = framefx::ProcessResponse::failure(format!("{err:#}"));
            eprintln!("{}", serde_json::to_string(&response)?);
            std::process::exit(1);
        }
    }
}

fn run_process(args: &ProcessArgs) -> anyhow::Result<String> {
    let raw = match &args.in_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read request '{}'", path.display()))?,
        None => std::io::read_to_string(std::io::stdin()).context("read request from stdin")?,
    };

    let req: framefx::ProcessRequest =
        serde_json::from_str(&raw).context("parse request JSON")?;
    let (payload, _report) = framefx::process_request(&req)?;
    Ok(payload)
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<()> {
    let img = image::open(&args.in_path)
        .with_context(|| format!("open image '{}'", args.in_path.display()))?
        .to_rgb8();
    let (width, height) = img.dimensions();
    let frame = framefx::Frame::from_raw(width, height, img.into_raw())?;

    let filters = match &args.filters {
        Some(path) => read_filters_json(path)?,
        None => framefx::FilterParams::default(),
    };
    filters.validate()?;

    let pipeline = framefx::FilterPipeline::new(&filters);
    let (out, report) =
        pipeline.process_with_report(frame, &framefx::FrameInputs::default())?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer(
        &args.out,
        &out.data,
        out.width,
        out.height,
        image::ColorType::Rgb8,
    )
    .with_context(|| format!("write image '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} applied, {} skipped)",
        args.out.display(),
        report.applied(),
        report.skipped()
    );
    Ok(())
}

fn read_filters_json(path: &Path) -> anyhow::Result<framefx::FilterParams> {
    let f = File::open(path).with_context(|| format!("open filters '{}'", path.display()))?;
    let r = BufReader::new(f);
    let filters: framefx::FilterParams =
        serde_json::from_reader(r).with_context(|| "parse filters JSON")?;
    Ok(filters)
}
