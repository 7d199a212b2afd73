use crate::error::{HarnessError, Result};
use crate::plot::ChartOptions;
use crate::sampler::{SamplerOptions, DEFAULT_MAX_CALIBRATION_RUNS};
use crate::sweep::SweepSpec;
use ::clap::Parser;
use std::path::PathBuf;

pub const USAGE: &str = "threadbench <test_path> <scale_type> <min> <max> <step> \
    [<scale_type> <min> <max> <step>]";

/// What to sweep: threads only, or threads then yields.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Sweeps {
    Single { threads: SweepSpec },
    Dual { threads: SweepSpec, yields: SweepSpec },
}

/// Everything a benchmark campaign needs, validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub test_path: PathBuf,
    pub sweeps: Sweeps,
    pub sampler: SamplerOptions,
    pub chart: ChartOptions,
}

impl Configuration {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let sweeps = match cli.sweeps.as_slice() {
            [scale, min, max, step] => Sweeps::Single {
                threads: SweepSpec::from_tokens(scale, min, max, step)?,
            },
            [scale1, min1, max1, step1, scale2, min2, max2, step2] => Sweeps::Dual {
                threads: SweepSpec::from_tokens(scale1, min1, max1, step1)?,
                yields: SweepSpec::from_tokens(scale2, min2, max2, step2)?,
            },
            other => {
                return Err(HarnessError::Usage(format!(
                    "expected 4 or 8 sweep arguments after the test path, got {}",
                    other.len()
                )))
            }
        };

        Ok(Configuration {
            test_path: cli.test_path,
            sweeps,
            sampler: SamplerOptions {
                max_calibration_runs: cli.max_calibration_runs,
                strict_calibration: cli.strict_calibration,
            },
            chart: ChartOptions {
                gnuplot: cli.gnuplot,
                display: !cli.no_display,
            },
        })
    }

    /// Parse a full argument list (program name first).
    pub fn try_parse_from<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args).map_err(|e| HarnessError::Usage(e.to_string()))?;
        Self::from_cli(cli)
    }
}

/*
  >>> ATTENTION <<<

    When updating this structure, you probably want to update
    Configuration::from_cli too.
*/

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, override_usage = USAGE)]
pub struct Cli {
    #[arg(help = "Thread-library test program; <test_path>-pthread must exist alongside it")]
    test_path: PathBuf,
    #[arg(
        num_args = 0..,
        value_name = "SWEEP",
        help = "<scale_type> <min> <max> <step> for threads, optionally followed by the same for yields. \
                scale_type is lin or log"
    )]
    sweeps: Vec<String>,
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_CALIBRATION_RUNS,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Give up calibrating a program after this many runs outside the stable band"
    )]
    max_calibration_runs: u32,
    #[arg(
        long,
        help = "Fail instead of measuring with the last repetition count when calibration gives up"
    )]
    strict_calibration: bool,
    #[arg(long, default_value = "gnuplot", help = "gnuplot executable used to draw the charts")]
    gnuplot: String,
    #[arg(long, help = "Print the chart scripts to stdout instead of opening chart windows")]
    no_display: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::Scale;

    fn parse(args: &[&str]) -> Result<Configuration> {
        Configuration::try_parse_from(std::iter::once("threadbench").chain(args.iter().copied()))
    }

    #[test]
    fn single_sweep() {
        let config = parse(&["tst/21-create-many", "lin", "1", "10", "2"]).unwrap();
        assert_eq!(config.test_path, PathBuf::from("tst/21-create-many"));
        assert_eq!(
            config.sweeps,
            Sweeps::Single {
                threads: SweepSpec::new(Scale::Linear, 1, 10, 2).unwrap()
            }
        );
        assert_eq!(config.sampler, SamplerOptions::default());
        assert!(config.chart.display);
        assert_eq!(config.chart.gnuplot, "gnuplot");
    }

    #[test]
    fn dual_sweep() {
        let config =
            parse(&["tst/31-switch-many", "log", "1", "100", "10", "lin", "0", "20", "5"]).unwrap();
        match config.sweeps {
            Sweeps::Dual { threads, yields } => {
                assert_eq!(threads.values(), vec![1, 10, 100]);
                assert_eq!(yields.values(), vec![0, 5, 10, 15, 20]);
            }
            other => panic!("unexpected sweeps: {other:?}"),
        }
    }

    #[test]
    fn options() {
        let config = parse(&[
            "--max-calibration-runs",
            "3",
            "--strict-calibration",
            "--no-display",
            "--gnuplot",
            "/opt/bin/gnuplot",
            "test",
            "lin",
            "1",
            "2",
            "1",
        ])
        .unwrap();
        assert_eq!(config.sampler.max_calibration_runs, 3);
        assert!(config.sampler.strict_calibration);
        assert!(!config.chart.display);
        assert_eq!(config.chart.gnuplot, "/opt/bin/gnuplot");
    }

    #[test]
    fn wrong_argument_count_is_usage_error() {
        for args in [
            &["test"][..],
            &["test", "lin", "1", "10"][..],
            &["test", "lin", "1", "10", "2", "lin"][..],
        ] {
            assert!(matches!(parse(args), Err(HarnessError::Usage(_))), "{args:?}");
        }
    }

    #[test]
    fn missing_test_path_is_usage_error() {
        assert!(matches!(parse(&[]), Err(HarnessError::Usage(_))));
    }

    #[test]
    fn bad_scale_is_usage_error() {
        assert!(matches!(
            parse(&["test", "quad", "1", "10", "2"]),
            Err(HarnessError::Usage(_))
        ));
    }

    #[test]
    fn bad_log_sweep_is_spec_error() {
        assert!(matches!(
            parse(&["test", "log", "0", "100", "10"]),
            Err(HarnessError::SweepSpec(_))
        ));
        assert!(matches!(
            parse(&["test", "lin", "1", "10", "1", "log", "1", "100", "1"]),
            Err(HarnessError::SweepSpec(_))
        ));
    }

    #[test]
    fn zero_calibration_runs_rejected() {
        assert!(parse(&["--max-calibration-runs", "0", "test", "lin", "1", "2", "1"]).is_err());
    }
}
