use std::time::{Duration, Instant};

use anyhow::{Context, ensure};
use clap::{Args, Parser, Subcommand};
use fork_join_sort::{ForkJoinSorter, SortConfig};
use log::LevelFilter;
use rayon::slice::ParallelSliceMut;
use voracious_radix_sort::RadixSort;

/// Input sorted by `demo` when no values are given.
const DEMO_INPUT: [i64; 20] = [
    42, 87, 13, 76, 5, 59, 93, 34, 28, 67, 19, 22, 80, 49, 71, 7, 64, 90, 55, 38,
];

/// Largest `bench --sizes` entry: 2^27 keys, 1 GiB per input.
const MAX_LG_SIZE: i64 = 27;

/// Fork-join merge sort demo and benchmark
#[derive(Parser)]
#[command(name = "fork-join-sort", version)]
struct Cli {
    #[command(flatten)]
    fork: ForkArgs,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ForkArgs {
    /// Ranges shorter than this are sorted without forking
    #[arg(long, global = true, env = "FORK_JOIN_SORT_THRESHOLD")]
    fork_threshold: Option<usize>,

    /// Never fork below this recursion depth
    #[arg(long, global = true)]
    max_fork_depth: Option<usize>,

    /// Run on a dedicated pool with this many threads
    #[arg(long, global = true, env = "FORK_JOIN_SORT_THREADS")]
    threads: Option<usize>,

    /// Fork at every level down to single elements
    #[arg(long, global = true, conflicts_with = "fork_threshold")]
    unbounded: bool,
}

impl ForkArgs {
    fn config(&self) -> SortConfig {
        let mut config = if self.unbounded {
            SortConfig::unbounded()
        } else {
            SortConfig::default()
        };
        if let Some(fork_threshold) = self.fork_threshold {
            config = config.with_fork_threshold(fork_threshold);
        }
        if let Some(max_fork_depth) = self.max_fork_depth {
            config = config.with_max_fork_depth(max_fork_depth);
        }
        if let Some(threads) = self.threads {
            config = config.with_num_threads(threads);
        }
        config
    }
}

#[derive(Subcommand)]
enum Command {
    /// Sort a few integers and check the result against the standard sort
    Demo {
        /// Values to sort (defaults to a fixed 20-element array)
        #[arg(allow_negative_numbers = true)]
        values: Vec<i64>,
    },
    /// Time the fork-join sort against other sorts on random data
    Bench {
        /// log2 of each input length
        #[arg(
            long,
            value_delimiter = ',',
            default_values_t = [10, 15, 20],
            value_parser = clap::value_parser!(u32).range(0..=MAX_LG_SIZE),
        )]
        sizes: Vec<u32>,

        /// Seed for the random input
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn demo(sorter: &ForkJoinSorter, values: Vec<i64>) -> anyhow::Result<()> {
    let input = if values.is_empty() {
        DEMO_INPUT.to_vec()
    } else {
        values
    };
    let sorted = sorter.sort(&input);
    let mut expected = input.clone();
    expected.sort();
    ensure!(sorted == expected, "fork-join sort disagrees with slice::sort");
    println!("{:?}", sorted);
    Ok(())
}

/// Runs `f` `repeats` times to warm up, then times another `repeats` runs and
/// returns the mean time per run.
fn benchmark(name: &str, repeats: usize, mut f: impl FnMut()) -> Duration {
    (0..repeats).for_each(|_| f());
    let start = Instant::now();
    (0..repeats).for_each(|_| f());
    let per_run = start.elapsed() / repeats as u32;
    println!("  {}: {}", name, human_time(per_run));
    per_run
}

/// Divides `value` by `step` until it drops below `step` or the units run out.
fn scale(mut value: f64, step: f64, units: &[&str]) -> String {
    let mut unit = 0;
    while value >= step && unit + 1 < units.len() {
        value /= step;
        unit += 1;
    }
    format!("{:.1}{}", value, units[unit])
}

fn human_time(duration: Duration) -> String {
    scale(duration.as_nanos() as f64, 1000.0, &["ns", "us", "ms", "s"])
}

fn human_size(size: usize) -> String {
    scale(size as f64, 1024.0, &["B", "KiB", "MiB", "GiB"])
}

fn bench(sorter: &ForkJoinSorter, sizes: &[u32], seed: u64) -> anyhow::Result<()> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let threads = sorter.current_num_threads();
    let config = sorter.config();
    println!(
        "threads: {}, fork threshold: {}, max fork depth: {}",
        threads,
        config.fork_threshold,
        config
            .max_fork_depth
            .map_or_else(|| "none".to_string(), |depth| depth.to_string()),
    );
    for &lg_size in sizes {
        // Keys are drawn from [0, 2^lg_size), so duplicates show up at every size.
        let mask = (1u64 << lg_size) - 1;
        let data: Vec<u64> = (0..1usize << lg_size).map(|_| rng.u64(..) & mask).collect();
        let repeats = 1usize << 22u32.saturating_sub(lg_size);
        println!(
            "size: {}",
            human_size(std::mem::size_of::<u64>() * data.len())
        );

        let mut expected = data.clone();
        expected.sort();
        ensure!(
            sorter.sort(&data) == expected,
            "fork-join sort produced wrong output at 2^{}",
            lg_size
        );

        let ours = benchmark("fork-join merge sort", repeats, || {
            std::hint::black_box(sorter.sort(&data));
        });

        let std_sort = benchmark("slice::sort", repeats, || {
            let mut copy = data.clone();
            copy.sort();
            std::hint::black_box(copy);
        });

        benchmark("rayon par_sort", repeats, || {
            let mut copy = data.clone();
            copy.par_sort();
            std::hint::black_box(copy);
        });

        benchmark("voracious (multithread)", repeats, || {
            let mut copy = data.clone();
            copy.voracious_mt_sort(threads);
            std::hint::black_box(copy);
        });

        println!(
            "  speedup over slice::sort: {:.2}x",
            std_sort.as_secs_f64() / ours.as_secs_f64().max(f64::MIN_POSITIVE)
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::builder()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    let sorter = ForkJoinSorter::new(cli.fork.config()).context("invalid sort settings")?;
    match cli.command {
        Command::Demo { values } => demo(&sorter, values),
        Command::Bench { sizes, seed } => bench(&sorter, &sizes, seed),
    }
}
