use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use line_rfi::{io::flag_file, params::FlagParams};

/// Flag spectral line RFI in a visibility time-stream.
///
/// Per baseline and polarization, channels whose time-averaged magnitude
/// exceeds a quantile cutoff are masked out.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// HDF5 time-stream to read
    input: PathBuf,
    /// HDF5 file to write
    output: PathBuf,
    /// TOML parameter file; flags given here override its values
    #[arg(short, long)]
    params: Option<PathBuf>,
    /// Fraction of channels eligible for flagging
    #[arg(short, long)]
    threshold: Option<f64>,
    /// Flag on the imaginary part only
    #[arg(long)]
    imaginary_only: bool,
    /// Fill flagged channels with zeros instead of NaNs
    #[arg(long)]
    fill0: bool,
    /// Leading/trailing time samples entering the per-channel mean
    #[arg(long)]
    edge_samples: Option<usize>,
    /// Extra text appended to the output history
    #[arg(long)]
    extra_history: Option<String>,
    /// Worker threads for the baseline loop (default: all cores)
    #[arg(long)]
    threads: Option<usize>,
    /// Print per-baseline detail (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    let mut params = match &args.params {
        Some(path) => FlagParams::from_file(path)?,
        None => FlagParams::default(),
    };
    if let Some(threshold) = args.threshold {
        params.threshold = threshold;
    }
    if args.imaginary_only {
        params.imaginary_only = true;
    }
    if args.fill0 {
        params.fill0 = true;
    }
    if let Some(edge) = args.edge_samples {
        params.edge_samples = edge;
    }
    if let Some(extra) = args.extra_history {
        params.extra_history = extra;
    }
    params.validate()?;

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    flag_file(&args.input, &args.output, &params)?;
    Ok(())
}
