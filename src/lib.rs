pub mod cli;
pub mod driver;
pub mod error;
pub mod plot;
pub mod runner;
pub mod sampler;
pub mod sweep;

use std::ffi::OsString;
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

pub use error::{HarnessError, Result};

/// The two builds of every test program: the thread library under test and
/// the pthread build it is compared against.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Implementation {
    Thread,
    Pthread,
}

impl Implementation {
    /// Benchmarking order for each sweep value.
    pub const ALL: [Implementation; 2] = [Implementation::Thread, Implementation::Pthread];

    pub fn label(self) -> &'static str {
        match self {
            Implementation::Thread => "thread",
            Implementation::Pthread => "pthread",
        }
    }

    /// The executable for this implementation: `<test_path>` or `<test_path>-pthread`.
    pub fn program(self, test_path: &Path) -> PathBuf {
        match self {
            Implementation::Thread => test_path.to_path_buf(),
            Implementation::Pthread => {
                let mut program = OsString::from(test_path.as_os_str());
                program.push("-pthread");
                PathBuf::from(program)
            }
        }
    }
}

impl Display for Implementation {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One averaged measurement: implementation, sweep value, mean seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub label: String,
    pub x: u64,
    pub seconds: f64,
}

impl Sample {
    pub fn new(label: impl Into<String>, x: u64, seconds: f64) -> Self {
        Self {
            label: label.into(),
            x,
            seconds,
        }
    }
}

impl Display for Sample {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{},{},{:e}", self.label, self.x, self.seconds)
    }
}

/// The samples of one pass, in the order they were measured.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Distinct labels, in order of first appearance.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for sample in &self.samples {
            if !labels.contains(&sample.label.as_str()) {
                labels.push(&sample.label);
            }
        }
        labels
    }

    /// `(x, seconds)` points for one label, sorted by x.
    pub fn series(&self, label: &str) -> Vec<(u64, f64)> {
        let mut points: Vec<(u64, f64)> = self
            .samples
            .iter()
            .filter(|s| s.label == label)
            .map(|s| (s.x, s.seconds))
            .collect();
        points.sort_by_key(|&(x, _)| x);
        points
    }
}

impl FromIterator<Sample> for SampleSet {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pthread_program_gets_suffix() {
        let test_path = Path::new("tst/21-create-many");
        assert_eq!(Implementation::Thread.program(test_path), test_path);
        assert_eq!(
            Implementation::Pthread.program(test_path),
            Path::new("tst/21-create-many-pthread")
        );
    }

    #[test]
    fn labels_keep_first_appearance_order() {
        let set: SampleSet = [
            Sample::new("thread", 1, 0.1),
            Sample::new("pthread", 1, 0.2),
            Sample::new("thread", 2, 0.3),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.labels(), vec!["thread", "pthread"]);
    }

    #[test]
    fn series_is_sorted_by_x() {
        let set: SampleSet = [
            Sample::new("thread", 8, 0.8),
            Sample::new("pthread", 8, 0.9),
            Sample::new("thread", 2, 0.2),
            Sample::new("thread", 4, 0.4),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.series("thread"), vec![(2, 0.2), (4, 0.4), (8, 0.8)]);
        assert_eq!(set.series("pthread"), vec![(8, 0.9)]);
        assert!(set.series("other").is_empty());
    }
}
