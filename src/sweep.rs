use crate::error::{HarnessError, Result};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Scale {
    Linear,
    Logarithmic,
}

impl FromStr for Scale {
    type Err = HarnessError;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "lin" => Ok(Scale::Linear),
            "log" => Ok(Scale::Logarithmic),
            _ => Err(HarnessError::Usage(format!(
                "Wrong scale_type format '{token}', should be lin or log"
            ))),
        }
    }
}

impl Display for Scale {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Scale::Linear => write!(f, "lin"),
            Scale::Logarithmic => write!(f, "log"),
        }
    }
}

/// The range of values a variable (thread count, yield count) is swept over.
///
/// A linear sweep steps by adding `step`, a logarithmic one by multiplying by
/// it. Both stop at the last value not exceeding `max`, so a `min` above
/// `max` gives an empty sweep.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SweepSpec {
    scale: Scale,
    min: u64,
    max: u64,
    step: u64,
}

impl SweepSpec {
    pub fn new(scale: Scale, min: u64, max: u64, step: u64) -> Result<Self> {
        match scale {
            Scale::Linear => {
                if step == 0 {
                    return Err(HarnessError::SweepSpec(
                        "Step for linear scale should be > 0".to_string(),
                    ));
                }
            }
            Scale::Logarithmic => {
                if min == 0 {
                    return Err(HarnessError::SweepSpec(
                        "Min value for logarithmic scale should be > 0".to_string(),
                    ));
                }
                if step <= 1 {
                    return Err(HarnessError::SweepSpec(
                        "Step for logarithmic scale should be > 1".to_string(),
                    ));
                }
            }
        }
        Ok(Self { scale, min, max, step })
    }

    /// Build a sweep from the four command line tokens `<scale> <min> <max> <step>`.
    pub fn from_tokens(scale: &str, min: &str, max: &str, step: &str) -> Result<Self> {
        let scale = scale.parse::<Scale>()?;
        Self::new(
            scale,
            parse_bound("min", min)?,
            parse_bound("max", max)?,
            parse_bound("step", step)?,
        )
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn is_logarithmic(&self) -> bool {
        self.scale == Scale::Logarithmic
    }

    /// The x-values of the sweep, in increasing order.
    pub fn values(&self) -> Vec<u64> {
        match self.scale {
            Scale::Linear => {
                let step = usize::try_from(self.step).unwrap_or(usize::MAX);
                (self.min..=self.max).step_by(step).collect()
            }
            Scale::Logarithmic => {
                let mut values = Vec::new();
                let mut value = Some(self.min);
                while let Some(v) = value.filter(|&v| v <= self.max) {
                    values.push(v);
                    value = v.checked_mul(self.step);
                }
                values
            }
        }
    }

    /// The value this variable is pinned at while the other variable sweeps.
    pub fn midpoint(&self) -> u64 {
        self.min + self.max.saturating_sub(self.min) / 2
    }
}

impl Display for SweepSpec {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} {}..={} step {}", self.scale, self.min, self.max, self.step)
    }
}

fn parse_bound(name: &str, token: &str) -> Result<u64> {
    token.parse::<u64>().map_err(|e| {
        HarnessError::Usage(format!("Invalid {name} value '{token}': {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_sweep_truncates_at_max() {
        let sweep = SweepSpec::new(Scale::Linear, 1, 10, 2).unwrap();
        assert_eq!(sweep.values(), vec![1, 3, 5, 7, 9]);
    }

    #[test]
    fn linear_sweep_includes_max() {
        let sweep = SweepSpec::new(Scale::Linear, 0, 10, 5).unwrap();
        assert_eq!(sweep.values(), vec![0, 5, 10]);
    }

    #[test]
    fn logarithmic_sweep_includes_max() {
        let sweep = SweepSpec::new(Scale::Logarithmic, 1, 100, 10).unwrap();
        assert_eq!(sweep.values(), vec![1, 10, 100]);
    }

    #[test]
    fn logarithmic_sweep_stops_before_overflow() {
        let sweep = SweepSpec::new(Scale::Logarithmic, 1 << 62, u64::MAX, 2).unwrap();
        assert_eq!(sweep.values(), vec![1 << 62, 1 << 63]);
    }

    #[test]
    fn empty_when_min_above_max() {
        let sweep = SweepSpec::new(Scale::Linear, 20, 10, 1).unwrap();
        assert!(sweep.values().is_empty());
    }

    #[test]
    fn rejects_zero_logarithmic_min() {
        let err = SweepSpec::new(Scale::Logarithmic, 0, 100, 10).unwrap_err();
        assert!(matches!(err, HarnessError::SweepSpec(_)));
    }

    #[test]
    fn rejects_logarithmic_step_of_one() {
        let err = SweepSpec::new(Scale::Logarithmic, 1, 100, 1).unwrap_err();
        assert!(matches!(err, HarnessError::SweepSpec(_)));
    }

    #[test]
    fn rejects_zero_linear_step() {
        assert!(SweepSpec::new(Scale::Linear, 1, 100, 0).is_err());
    }

    #[test]
    fn midpoint_is_inside_range() {
        assert_eq!(SweepSpec::new(Scale::Linear, 10, 20, 1).unwrap().midpoint(), 15);
        assert_eq!(SweepSpec::new(Scale::Logarithmic, 1, 100, 10).unwrap().midpoint(), 50);
    }

    #[test]
    fn from_tokens_rejects_unknown_scale() {
        let err = SweepSpec::from_tokens("exp", "1", "10", "2").unwrap_err();
        assert!(matches!(err, HarnessError::Usage(_)));
    }

    #[test]
    fn from_tokens_rejects_negative_bound() {
        let err = SweepSpec::from_tokens("lin", "-1", "10", "2").unwrap_err();
        assert!(matches!(err, HarnessError::Usage(_)));
    }
}
