use bitarray::{
    BitArrayError,
    bits::Word,
    verify::{SweepParams, SweepStats, sweep_with},
};
use clap::{Parser, ValueEnum};
use rand::Rng;
use std::process::ExitCode;
use tqdm::tqdm;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WordWidth {
    #[value(name = "8")]
    W8,
    #[value(name = "16")]
    W16,
    #[value(name = "32")]
    W32,
    #[value(name = "64")]
    W64,
    #[value(name = "128")]
    W128,
}

/// Randomized self-check for packed bit sets and packed element arrays
#[derive(Parser, Debug)]
#[command(name = "bitarray-check")]
#[command(about = "Sweeps array lengths and element widths, verifying every packed container", long_about = None)]
struct Args {
    /// Width of the backing word in bits
    #[arg(short, long, value_enum, default_value = "64")]
    word_bits: WordWidth,

    /// Array lengths are drawn below this bound
    #[arg(long, default_value_t = 10_000)]
    max_len: usize,

    /// Largest random stride between two checked lengths
    #[arg(long, default_value_t = 500)]
    max_step: usize,

    /// Random fills performed on every container
    #[arg(long, default_value_t = 10)]
    random_runs: usize,

    /// Seed for the random generator (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the final statistics as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn run_sweep<W: Word>(params: &SweepParams) -> Result<SweepStats, BitArrayError> {
    let stats = sweep_with::<W, _, _>(params, tqdm)?;
    stats.log_summary(W::BITS);
    Ok(stats)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let params = SweepParams {
        max_len: args.max_len,
        max_step: args.max_step,
        random_runs: args.random_runs,
        seed: args.seed.unwrap_or_else(|| rand::rng().random()),
    };

    let outcome = match args.word_bits {
        WordWidth::W8 => run_sweep::<u8>(&params),
        WordWidth::W16 => run_sweep::<u16>(&params),
        WordWidth::W32 => run_sweep::<u32>(&params),
        WordWidth::W64 => run_sweep::<u64>(&params),
        WordWidth::W128 => run_sweep::<u128>(&params),
    };

    let stats = match outcome {
        Ok(stats) => stats,
        Err(err) => {
            error!(%err, seed = params.seed, "sweep failed");
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string(&stats) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                error!(%err, "could not serialize statistics");
                return ExitCode::FAILURE;
            }
        }
    }
    info!("all checks passed");
    ExitCode::SUCCESS
}
