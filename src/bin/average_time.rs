use clap::Parser;
use log::{error, LevelFilter};
use std::path::PathBuf;
use std::process::ExitCode;
use threadbench::runner::ProcessRunner;
use threadbench::sampler::{Sampler, SamplerOptions, DEFAULT_MAX_CALIBRATION_RUNS};

/// Time one program with the adaptive sampler and print its mean run time.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value_t = DEFAULT_MAX_CALIBRATION_RUNS, value_parser = clap::value_parser!(u32).range(1..))]
    max_calibration_runs: u32,
    #[arg(long)]
    strict_calibration: bool,
    program: PathBuf,
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    if let Err(e) = simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()
    {
        eprintln!("Failed to start logger: {e}");
    }
    let cli = Cli::parse();

    let options = SamplerOptions {
        max_calibration_runs: cli.max_calibration_runs,
        strict_calibration: cli.strict_calibration,
    };
    let mut sampler = Sampler::new(ProcessRunner::new(), options);
    match sampler.average_time(&cli.program, &cli.args) {
        Ok(seconds) => {
            println!("{seconds:e}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::from(1)
        }
    }
}
