mod pass;

pub use pass::{Pass, Pinned};

use crate::cli::{Configuration, Sweeps};
use crate::error::Result;
use crate::plot::Chart;
use crate::runner::Runner;
use crate::sampler::Sampler;
use log::info;
use std::path::PathBuf;

const THREADS: &str = "threads";
const YIELDS: &str = "yields";

/// Runs every pass of a benchmark campaign and turns each into a chart.
///
/// A single sweep is one pass over the thread count. A dual sweep is two
/// passes: threads varying with yields pinned at the middle of their range,
/// then yields varying with threads pinned at the middle of theirs.
pub struct Driver<R: Runner> {
    test_path: PathBuf,
    passes: Vec<Pass>,
    sampler: Sampler<R>,
}

impl<R: Runner> Driver<R> {
    pub fn new(config: &Configuration, runner: R) -> Self {
        Self {
            test_path: config.test_path.clone(),
            passes: Self::plan(config.sweeps),
            sampler: Sampler::new(runner, config.sampler),
        }
    }

    fn plan(sweeps: Sweeps) -> Vec<Pass> {
        match sweeps {
            Sweeps::Single { threads } => vec![Pass::new(THREADS, threads, None)],
            Sweeps::Dual { threads, yields } => vec![
                Pass::new(
                    THREADS,
                    threads,
                    Some(Pinned {
                        variable: YIELDS,
                        value: yields.midpoint(),
                        swept_first: true,
                    }),
                ),
                Pass::new(
                    YIELDS,
                    yields,
                    Some(Pinned {
                        variable: THREADS,
                        value: threads.midpoint(),
                        swept_first: false,
                    }),
                ),
            ],
        }
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    /// Benchmark every pass. Passes that produced no samples (empty sweep)
    /// get no chart.
    pub fn run(&mut self) -> Result<Vec<Chart>> {
        info!("Benchmarking {}", self.test_path.display());
        let test_name = self
            .test_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.test_path.display().to_string());

        let mut charts = Vec::with_capacity(self.passes.len());
        for pass in &self.passes {
            let samples = pass.run(&mut self.sampler, &self.test_path)?;
            if samples.is_empty() {
                info!("No {} values to sweep, skipping chart", pass.variable());
                continue;
            }
            charts.push(pass.chart(&samples, &test_name));
        }
        Ok(charts)
    }
}
