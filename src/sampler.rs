use crate::error::{HarnessError, Result};
use crate::runner::Runner;
use log::{debug, trace, warn};
use std::path::Path;

/// Runs shorter than this are dominated by clock resolution.
const TINY_RUN_SECS: f64 = 1e-6;
/// Runs shorter than this are dominated by process start-up noise.
const SHORT_RUN_SECS: f64 = 1e-4;
/// Runs longer than this make the campaign itself too long if repeated often.
const LONG_RUN_SECS: f64 = 5.0;

const TINY_RUN_REPETITIONS: u32 = 500;
const SHORT_RUN_REPETITIONS: u32 = 100;
const STABLE_RUN_REPETITIONS: u32 = 50;
const LONG_RUN_REPETITIONS: u32 = 10;

pub const DEFAULT_MAX_CALIBRATION_RUNS: u32 = 10;

/// Verdict of one calibration run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Calibration {
    /// The run landed in the stable band: measure this many times.
    Settled(u32),
    /// Outside the stable band: this many repetitions would do, but measure again.
    Retry(u32),
}

impl Calibration {
    pub fn repetitions(self) -> u32 {
        match self {
            Calibration::Settled(n) | Calibration::Retry(n) => n,
        }
    }
}

/// Map a single observed run duration to a repetition count.
pub fn calibrate(duration_secs: f64) -> Calibration {
    if duration_secs < TINY_RUN_SECS {
        Calibration::Retry(TINY_RUN_REPETITIONS)
    } else if duration_secs < SHORT_RUN_SECS {
        Calibration::Retry(SHORT_RUN_REPETITIONS)
    } else if duration_secs > LONG_RUN_SECS {
        Calibration::Retry(LONG_RUN_REPETITIONS)
    } else {
        Calibration::Settled(STABLE_RUN_REPETITIONS)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SamplerOptions {
    /// Upper bound on calibration runs before giving up on the stable band.
    pub max_calibration_runs: u32,
    /// When the bound is hit: fail if set, otherwise measure with the last count chosen.
    pub strict_calibration: bool,
}

impl Default for SamplerOptions {
    fn default() -> Self {
        Self {
            max_calibration_runs: DEFAULT_MAX_CALIBRATION_RUNS,
            strict_calibration: false,
        }
    }
}

/// Averages repeated runs of a program, choosing the number of repetitions
/// from how long a single run takes.
///
/// Calibration runs are thrown away; the average comes only from the
/// measurement runs that follow.
pub struct Sampler<R: Runner> {
    runner: R,
    options: SamplerOptions,
}

impl<R: Runner> Sampler<R> {
    pub fn new(runner: R, options: SamplerOptions) -> Self {
        assert!(options.max_calibration_runs > 0);
        Self { runner, options }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Mean wall-clock time, in seconds, of `program args`.
    pub fn average_time(&mut self, program: &Path, args: &[String]) -> Result<f64> {
        let repetitions = self.calibrate(program, args)?;

        let mut total = 0.0;
        for _ in 0..repetitions {
            total += self.runner.run_once(program, args)?;
        }
        let average = total / f64::from(repetitions);
        trace!("{} {:?}: {repetitions} runs, mean {average:e}s", program.display(), args);
        Ok(average)
    }

    fn calibrate(&mut self, program: &Path, args: &[String]) -> Result<u32> {
        let mut last = None;
        for attempt in 1..=self.options.max_calibration_runs {
            let duration = self.runner.run_once(program, args)?;
            let calibration = calibrate(duration);
            debug!(
                "Calibration {attempt} of {}: {duration:e}s -> {calibration:?}",
                program.display()
            );
            if let Calibration::Settled(repetitions) = calibration {
                return Ok(repetitions);
            }
            last = Some((duration, calibration.repetitions()));
        }

        // max_calibration_runs > 0, so at least one run has been recorded
        let (last_duration, repetitions) = last.unwrap_or((0.0, STABLE_RUN_REPETITIONS));
        if self.options.strict_calibration {
            return Err(HarnessError::CalibrationDidNotConverge {
                program: program.to_path_buf(),
                attempts: self.options.max_calibration_runs,
                last_duration,
            });
        }
        warn!(
            "{} never ran within [{SHORT_RUN_SECS:e}s, {LONG_RUN_SECS}s] in {} calibration runs \
            (last {last_duration:e}s), measuring {repetitions} times",
            program.display(),
            self.options.max_calibration_runs
        );
        Ok(repetitions)
    }
}
