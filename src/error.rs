use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a benchmark campaign. None of these are retried:
/// they surface in `main` and end the process with a non-zero status.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Wrong argument count, unparsable numbers, unknown scale token...
    #[error("{0}")]
    Usage(String),

    /// A sweep whose bounds can't produce a sensible sequence of values.
    #[error("{0}")]
    SweepSpec(String),

    /// The target program couldn't be started (missing, not executable, ...).
    #[error("failed to launch {}: {source}", program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Every calibration run landed outside the stable band.
    #[error(
        "calibration of {} did not settle after {attempts} runs (last run took {last_duration:e}s)",
        program.display()
    )]
    CalibrationDidNotConverge {
        program: PathBuf,
        attempts: u32,
        last_duration: f64,
    },

    /// The chart renderer couldn't be started or fed.
    #[error("failed to render chart: {source}")]
    Plot {
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, HarnessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_error_names_program() {
        let error = HarnessError::Launch {
            program: PathBuf::from("/no/such/test"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        let message = error.to_string();
        assert!(message.contains("/no/such/test"));
        assert!(message.contains("not found"));
    }

    #[test]
    fn calibration_error_reports_attempts() {
        let error = HarnessError::CalibrationDidNotConverge {
            program: PathBuf::from("spin"),
            attempts: 7,
            last_duration: 1e-7,
        };
        assert!(error.to_string().contains("after 7 runs"));
    }
}
