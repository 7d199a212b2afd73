use crate::error::Result;
use crate::plot::{Chart, Fixed};
use crate::runner::Runner;
use crate::sampler::Sampler;
use crate::sweep::SweepSpec;
use crate::{Implementation, Sample, SampleSet};
use chrono::{Local, SecondsFormat};
use log::{info, trace};
use std::path::Path;

/// The second variable of a dual sweep, held at one value during a pass.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Pinned {
    pub variable: &'static str,
    pub value: u64,
    /// Whether the swept value comes before the pinned one on the command line.
    pub swept_first: bool,
}

/// One sweep of one variable: for each value, time the thread build then the
/// pthread build.
#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    variable: &'static str,
    sweep: SweepSpec,
    pinned: Option<Pinned>,
}

impl Pass {
    pub fn new(variable: &'static str, sweep: SweepSpec, pinned: Option<Pinned>) -> Self {
        Self {
            variable,
            sweep,
            pinned,
        }
    }

    pub fn variable(&self) -> &'static str {
        self.variable
    }

    /// The target's command line for sweep value `x`.
    pub fn arguments(&self, x: u64) -> Vec<String> {
        match self.pinned {
            None => vec![x.to_string()],
            Some(pinned) if pinned.swept_first => vec![x.to_string(), pinned.value.to_string()],
            Some(pinned) => vec![pinned.value.to_string(), x.to_string()],
        }
    }

    pub fn run<R: Runner>(&self, sampler: &mut Sampler<R>, test_path: &Path) -> Result<SampleSet> {
        let values = self.sweep.values();
        let start_time = Local::now();
        info!(
            "Pass over {} ({}), {} values, started {}",
            self.variable,
            self.sweep,
            values.len(),
            start_time.to_rfc3339_opts(SecondsFormat::Secs, false)
        );
        if let Some(pinned) = self.pinned {
            info!("\t{} fixed at {}", pinned.variable, pinned.value);
        }

        let mut samples = SampleSet::new();
        for x in values {
            let args = self.arguments(x);
            for implementation in Implementation::ALL {
                let program = implementation.program(test_path);
                trace!("Sampling {} {:?}", program.display(), args);
                let seconds = sampler.average_time(&program, &args)?;
                let sample = Sample::new(implementation.label(), x, seconds);
                info!("\t{sample}");
                samples.push(sample);
            }
        }

        let end_time = Local::now();
        info!(
            "Pass over {} finished {} ({}s)",
            self.variable,
            end_time.to_rfc3339_opts(SecondsFormat::Secs, false),
            (end_time - start_time).num_seconds()
        );
        Ok(samples)
    }

    pub fn chart(&self, samples: &SampleSet, test_name: &str) -> Chart {
        let fixed = self.pinned.map(|pinned| Fixed {
            variable: pinned.variable,
            value: pinned.value,
        });
        Chart::new(
            samples,
            test_name,
            self.variable,
            fixed,
            self.sweep.is_logarithmic(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::Scale;

    fn sweep() -> SweepSpec {
        SweepSpec::new(Scale::Linear, 1, 4, 1).unwrap()
    }

    #[test]
    fn lone_variable_is_only_argument() {
        let pass = Pass::new("threads", sweep(), None);
        assert_eq!(pass.arguments(7), vec!["7"]);
    }

    #[test]
    fn pinned_value_follows_swept_value() {
        let pinned = Pinned {
            variable: "yields",
            value: 500,
            swept_first: true,
        };
        let pass = Pass::new("threads", sweep(), Some(pinned));
        assert_eq!(pass.arguments(7), vec!["7", "500"]);
    }

    #[test]
    fn pinned_value_precedes_swept_value() {
        let pinned = Pinned {
            variable: "threads",
            value: 50,
            swept_first: false,
        };
        let pass = Pass::new("yields", sweep(), Some(pinned));
        assert_eq!(pass.arguments(7), vec!["50", "7"]);
    }
}
