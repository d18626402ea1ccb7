//! Numerical and physical parameters for a run
//!
//! `Parameters` holds runtime settings, all in SI units:
//! - gravitational constant `G`,
//! - fixed step size `h0` and horizon `t_end` (seconds),
//! - the collision detection rule

use serde::Deserialize;

use crate::error::{Result, SimError};

pub const SECONDS_PER_DAY: f64 = 24.0 * 60.0 * 60.0;
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Unit a duration is given in before normalisation to seconds.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    #[default]
    Seconds,
    Days,
    Years,
}

impl TimeUnit {
    pub fn to_seconds(self, value: f64) -> f64 {
        match self {
            TimeUnit::Seconds => value,
            TimeUnit::Days => value * SECONDS_PER_DAY,
            TimeUnit::Years => value * DAYS_PER_YEAR * SECONDS_PER_DAY,
        }
    }
}

/// When two bodies count as touching.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollisionRule {
    /// centre distance < max(r_a, r_b): one centre lies inside the other body
    #[default]
    LargerRadius,
    /// centre distance < r_a + r_b: the spheres overlap
    SumOfRadii,
}

impl CollisionRule {
    pub fn threshold(self, r_a: f64, r_b: f64) -> f64 {
        match self {
            CollisionRule::LargerRadius => r_a.max(r_b),
            CollisionRule::SumOfRadii => r_a + r_b,
        }
    }
}

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64, // horizon (s)
    pub h0: f64, // step size (s)
    pub G: f64, // gravitational constant
    pub collision: CollisionRule,
}

#[allow(non_snake_case)]
impl Parameters {
    pub fn new(G: f64, t_end: f64, h0: f64) -> Self {
        Self {
            t_end,
            h0,
            G,
            collision: CollisionRule::default(),
        }
    }

    /// Build from durations in caller units, normalised to seconds.
    pub fn with_units(
        G: f64,
        horizon: f64,
        horizon_unit: TimeUnit,
        dt: f64,
        dt_unit: TimeUnit,
    ) -> Self {
        Self::new(G, horizon_unit.to_seconds(horizon), dt_unit.to_seconds(dt))
    }

    pub fn with_collision(mut self, rule: CollisionRule) -> Self {
        self.collision = rule;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.h0 > 0.0) || !self.h0.is_finite() {
            return Err(SimError::config(format!(
                "step size must be positive and finite, got {}",
                self.h0
            )));
        }
        if !(self.t_end > 0.0) || !self.t_end.is_finite() {
            return Err(SimError::config(format!(
                "horizon must be positive and finite, got {}",
                self.t_end
            )));
        }
        if !self.G.is_finite() || self.G < 0.0 {
            return Err(SimError::config(format!(
                "gravitational constant must be finite and non-negative, got {}",
                self.G
            )));
        }
        Ok(())
    }

    /// ceil(t_end / h0), ignoring rounding noise just above an integral
    /// ratio. Never less than one step for a positive horizon.
    pub fn steps(&self) -> usize {
        let ratio = self.t_end / self.h0;
        let whole = ratio.floor();
        let steps = if whole >= 1.0 && ratio - whole <= 4.0 * f64::EPSILON * ratio {
            whole
        } else {
            ratio.ceil()
        };
        (steps as usize).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_conversion() {
        assert_eq!(TimeUnit::Seconds.to_seconds(5.0), 5.0);
        assert_eq!(TimeUnit::Days.to_seconds(1.0), 86_400.0);
        assert_eq!(TimeUnit::Years.to_seconds(1.0), 365.25 * 86_400.0);
    }

    #[test]
    fn step_count_rounds_up() {
        let p = Parameters::with_units(1.0, 1.0, TimeUnit::Years, 1.0, TimeUnit::Days);
        assert_eq!(p.steps(), 366);

        let p = Parameters::with_units(1.0, 100.0, TimeUnit::Days, 1.0, TimeUnit::Days);
        assert_eq!(p.steps(), 100);

        let p = Parameters::new(1.0, 1.0, 0.3);
        assert_eq!(p.steps(), 4);

        let p = Parameters::new(1.0, 0.3, 0.1);
        assert_eq!(p.steps(), 3);
    }

    #[test]
    fn step_count_covers_short_and_long_horizons() {
        // horizon shorter than one step still takes a step
        assert_eq!(Parameters::new(1.0, 0.5, 1.0).steps(), 1);
        assert_eq!(Parameters::new(1.0, 1e-12, 1.0).steps(), 1);

        // a fractional remainder is never swallowed on long runs
        let p = Parameters::new(1.0, 1e8 + 0.09, 1.0);
        assert_eq!(p.steps(), 100_000_001);
        assert!(p.steps() as f64 * p.h0 >= p.t_end);

        let p = Parameters::new(1.0, 1e8, 1.0);
        assert_eq!(p.steps(), 100_000_000);
    }

    #[test]
    fn validation_rejects_non_positive_durations() {
        assert!(Parameters::new(1.0, 1.0, 0.0).validate().is_err());
        assert!(Parameters::new(1.0, 1.0, -1.0).validate().is_err());
        assert!(Parameters::new(1.0, 0.0, 1.0).validate().is_err());
        assert!(Parameters::new(1.0, f64::NAN, 1.0).validate().is_err());
        assert!(Parameters::new(1.0, 1.0, 1.0).validate().is_ok());
    }

    #[test]
    fn collision_thresholds() {
        assert_eq!(CollisionRule::LargerRadius.threshold(2.0, 3.0), 3.0);
        assert_eq!(CollisionRule::SumOfRadii.threshold(2.0, 3.0), 5.0);
    }
}
