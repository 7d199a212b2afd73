use crate::error::{HarnessError, Result};
use crate::SampleSet;
use log::{info, trace};
use std::fmt::Write as _;
use std::io::Write;
use std::process::{Command, Stdio};

const Y_LABEL: &str = "Time in second";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    /// gnuplot executable.
    pub gnuplot: String,
    /// Open a window per chart; otherwise the scripts go to stdout.
    pub display: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            gnuplot: String::from("gnuplot"),
            display: true,
        }
    }
}

/// A variable held at one value while another is swept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixed<'a> {
    pub variable: &'a str,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(u64, f64)>,
}

/// Execution time against the swept variable, one line per implementation.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub log_x: bool,
    pub series: Vec<Series>,
}

impl Chart {
    pub fn new(
        samples: &SampleSet,
        test_name: &str,
        variable: &str,
        fixed: Option<Fixed>,
        log_x: bool,
    ) -> Self {
        let mut title = format!("Execution time of {test_name} with different number of {variable}");
        if let Some(Fixed { variable, value }) = fixed {
            title.push_str(&format!(" and a fixed number of {variable} = {value}"));
        }

        let series = samples
            .labels()
            .into_iter()
            .map(|label| Series {
                label: label.to_string(),
                points: samples.series(label),
            })
            .collect();

        Self {
            title,
            x_label: format!("Number of {variable}"),
            y_label: Y_LABEL.to_string(),
            log_x,
            series,
        }
    }

    /// A self-contained gnuplot script: the data travels inline as datablocks.
    pub fn to_gnuplot_script(&self) -> String {
        let mut script = String::new();
        // Writing to a String can't fail.
        let _ = writeln!(script, "set title \"{}\"", escape(&self.title));
        let _ = writeln!(script, "set xlabel \"{}\"", escape(&self.x_label));
        let _ = writeln!(script, "set ylabel \"{}\"", escape(&self.y_label));
        let _ = writeln!(script, "set key outside");
        let _ = writeln!(script, "set grid");
        if self.log_x {
            let _ = writeln!(script, "set logscale x");
        }

        for (index, series) in self.series.iter().enumerate() {
            let _ = writeln!(script, "$series{index} << EOD");
            for (x, seconds) in &series.points {
                let _ = writeln!(script, "{x} {seconds:e}");
            }
            let _ = writeln!(script, "EOD");
        }

        let plots: Vec<String> = self
            .series
            .iter()
            .enumerate()
            .map(|(index, series)| {
                format!(
                    "$series{index} using 1:2 with linespoints title \"{}\"",
                    escape(&series.label)
                )
            })
            .collect();
        if !plots.is_empty() {
            let _ = writeln!(script, "plot {}", plots.join(", \\\n     "));
        }
        script
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Draws charts, either in gnuplot windows or as scripts on stdout.
pub struct Plotter {
    options: ChartOptions,
}

impl Plotter {
    pub fn new(options: ChartOptions) -> Self {
        Self { options }
    }

    pub fn render(&self, chart: &Chart) -> Result<()> {
        let script = chart.to_gnuplot_script();
        if self.options.display {
            self.display(&script)
        } else {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            out.write_all(script.as_bytes())
                .and_then(|_| writeln!(out))
                .map_err(|source| HarnessError::Plot { source })
        }
    }

    /// One persistent gnuplot window per chart. Returns once gnuplot has read
    /// the script; the window outlives it.
    fn display(&self, script: &str) -> Result<()> {
        info!("Opening chart window with {}", self.options.gnuplot);
        let mut gnuplot = Command::new(&self.options.gnuplot)
            .arg("-persist")
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|source| HarnessError::Plot { source })?;

        if let Some(mut stdin) = gnuplot.stdin.take() {
            stdin
                .write_all(script.as_bytes())
                .map_err(|source| HarnessError::Plot { source })?;
            // stdin is closed here so gnuplot sees end of input
        }
        let status = gnuplot
            .wait()
            .map_err(|source| HarnessError::Plot { source })?;
        trace!("{} exited with {status}", self.options.gnuplot);
        Ok(())
    }
}
