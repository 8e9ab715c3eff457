use std::path::PathBuf;

use clap::Parser;

use state_sampler::estimator::{Estimator, EstimatorConfig};
use state_sampler::states::States;
use state_sampler::sweep::{count_sweep, interval_sweep, set_size_sweep, SweepTable, SweepTarget};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Generator seed.
    #[arg(long, value_name = "INT", default_value = "10")]
    seed: u64,

    /// Upper bound of the sampling range `[0, max]`.
    #[arg(long, value_name = "INT", default_value = "100")]
    max: i32,

    /// Sample count for the single estimates.
    #[arg(long, value_name = "INT", default_value = "100000")]
    samples: u32,

    /// Number of steps in the sample-count sweep.
    #[arg(long, value_name = "INT", default_value = "1000")]
    count_steps: u32,

    /// Directory for `segment.txt` and `set.txt`.
    #[arg(long, value_name = "DIR", default_value = ".")]
    out: PathBuf,

    /// Skip the sample-count sweep (and its output files).
    #[arg(long)]
    no_files: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);

    let config = EstimatorConfig::default()
        .with_seed(args.seed)
        .with_range(0, args.max)
        .with_samples(args.samples);
    let estimator = Estimator::new(config)?;

    let states = States::new();
    let d = states.mk_discrete(1);
    let s = states.mk_segment(0, 10);
    let ss = states.mk_set([1, 3, 5, 7, 23, 48, 57, 60, 90, 99]);
    let cds = states.eval(d & s)?;
    let uds = states.eval(d | s)?;
    let sds = states.eval(s - d)?;

    for state in [d, s, ss, cds, uds, sds] {
        let p = estimator.run(&states, state)?;
        println!("{:<40} {:.6}", states.to_expr_string(state), p);
    }

    if !args.no_files {
        let targets = [
            SweepTarget::new(s, args.out.join("segment.txt")),
            SweepTarget::new(ss, args.out.join("set.txt")),
        ];
        let counts = (1..=args.count_steps).map(|i| 10 * i);
        let estimates = count_sweep(&estimator, &states, &targets, counts)?;
        println!("Wrote {} estimates to {}", estimates.len(), args.out.display());
    }

    let sweep_config = config.with_samples(1000);

    println!();
    let rows = interval_sweep(sweep_config.with_range(0, 0), &states, ss, 100, 10)?;
    print!("{}", SweepTable::from(rows));

    println!();
    let rows = set_size_sweep(sweep_config, 5, 10, args.seed)?;
    print!("{}", SweepTable::from(rows));

    Ok(())
}
