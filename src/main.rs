use clap::Parser;
use log::{error, info, LevelFilter};
use std::process::ExitCode;
use threadbench::cli::{Cli, Configuration, USAGE};
use threadbench::driver::Driver;
use threadbench::plot::Plotter;
use threadbench::runner::ProcessRunner;
use threadbench::HarnessError;

fn run(config: &Configuration) -> Result<(), HarnessError> {
    let mut driver = Driver::new(config, ProcessRunner::new());
    let charts = driver.run()?;

    let plotter = Plotter::new(config.chart.clone());
    for chart in &charts {
        info!("Drawing: {}", chart.title);
        plotter.render(chart)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    if let Err(e) = simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()
    {
        eprintln!("Failed to start logger: {e}");
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    let config = match Configuration::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}\n\nUsage: {USAGE}");
            return ExitCode::from(1);
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(1)
        }
    }
}
