use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use panoweave::{
    Canvas, DEFAULT_BLEND_WIDTH, DEFAULT_CANVAS, ImageSequence, MergeJob, StitchJob,
};

#[derive(Parser, Debug)]
#[command(name = "panoweave", version)]
struct Cli {
    /// Enable debug logging.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stitch images left to right with seam cross-fades.
    Stitch(StitchArgs),
    /// Alpha-composite images on top of each other, no cross-fade.
    Merge(MergeArgs),
    /// Run a stitch job described by a JSON manifest.
    Job(JobArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input images, in order.
    inputs: Vec<PathBuf>,

    /// Directory holding a numbered sequence ("<base> NN.png").
    #[arg(long, requires = "base", conflicts_with = "inputs")]
    dir: Option<PathBuf>,

    /// Base name of the numbered sequence.
    #[arg(long, requires = "count")]
    base: Option<String>,

    /// Number of images in the numbered sequence.
    #[arg(long, requires = "dir")]
    count: Option<u32>,
}

impl InputArgs {
    fn resolve(&self) -> anyhow::Result<Vec<PathBuf>> {
        match (&self.dir, &self.base, &self.count) {
            (Some(dir), Some(base), Some(count)) => {
                let seq = ImageSequence {
                    dir: dir.clone(),
                    base: base.clone(),
                    count: *count,
                };
                Ok(seq.resolve()?)
            }
            _ if !self.inputs.is_empty() => Ok(self.inputs.clone()),
            _ => anyhow::bail!("no input images given (pass files, or --dir/--base/--count)"),
        }
    }
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Canonical width every input is resized to.
    #[arg(long, default_value_t = DEFAULT_CANVAS.width)]
    width: u32,

    /// Canonical height every input is resized to.
    #[arg(long, default_value_t = DEFAULT_CANVAS.height)]
    height: u32,

    /// Fail instead of replacing an existing output file.
    #[arg(long)]
    keep_existing: bool,
}

#[derive(Args, Debug)]
struct StitchArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Columns cross-faded at each junction (0 disables blending; clamped
    /// to the image width).
    #[arg(long, default_value_t = i64::from(DEFAULT_BLEND_WIDTH))]
    blend: i64,
}

#[derive(Args, Debug)]
struct MergeArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct JobArgs {
    /// Stitch job JSON manifest.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.cmd {
        Command::Stitch(args) => cmd_stitch(args),
        Command::Merge(args) => cmd_merge(args),
        Command::Job(args) => cmd_job(args),
    }
}

fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn cmd_stitch(args: StitchArgs) -> anyhow::Result<()> {
    let canvas = Canvas::new(args.output.width, args.output.height)?;
    let job = StitchJob {
        inputs: args.input.resolve()?,
        output: args.output.out,
        canvas,
        blend_width: panoweave::clamp_blend_width(args.blend, canvas.width),
        overwrite: !args.output.keep_existing,
    };

    panoweave::run_stitch(&job)?;
    eprintln!("wrote {}", job.output.display());
    Ok(())
}

fn cmd_merge(args: MergeArgs) -> anyhow::Result<()> {
    let canvas = Canvas::new(args.output.width, args.output.height)?;
    let job = MergeJob {
        inputs: args.input.resolve()?,
        output: args.output.out,
        canvas,
        overwrite: !args.output.keep_existing,
    };

    panoweave::run_merge(&job)?;
    eprintln!("wrote {}", job.output.display());
    Ok(())
}

fn cmd_job(args: JobArgs) -> anyhow::Result<()> {
    let f = File::open(&args.in_path)
        .with_context(|| format!("open job manifest '{}'", args.in_path.display()))?;
    let job: StitchJob =
        serde_json::from_reader(BufReader::new(f)).context("parse job manifest JSON")?;

    panoweave::run_stitch(&job)?;
    eprintln!("wrote {}", job.output.display());
    Ok(())
}
