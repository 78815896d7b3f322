use crate::{Interval, WalkError};

/// A point (or per-axis vector) in walk space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dimension {
    #[default]
    Two,
    Three,
}

impl Dimension {
    pub fn is_3d(self) -> bool {
        self == Dimension::Three
    }
}

/// How a normal (non-jump) increment is drawn from the step range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepDistribution {
    /// Any real in `[min, max]`.
    #[default]
    Continuous,
    /// An integer in `[ceil(min), floor(max)]`.
    Lattice,
}

/// Everything needed to generate one walk.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkConfig {
    pub step_count: usize,
    pub step_range: Interval,
    pub step_distribution: StepDistribution,
    pub origin: Point3,
    pub drift: Point3,
    pub dimension: Dimension,
    pub jump_probability_percent: f64,
    pub jump_distance_range: Interval,
    pub hide_jump_seams: bool,
}

impl WalkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step_count(mut self, step_count: usize) -> Self {
        self.step_count = step_count;
        self
    }

    pub fn with_step_range(mut self, min: f64, max: f64) -> Self {
        self.step_range = Interval { min, max };
        self
    }

    pub fn with_step_distribution(mut self, distribution: StepDistribution) -> Self {
        self.step_distribution = distribution;
        self
    }

    pub fn with_origin(mut self, origin: Point3) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_drift(mut self, drift: Point3) -> Self {
        self.drift = drift;
        self
    }

    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_jumps(mut self, probability_percent: f64, min: f64, max: f64) -> Self {
        self.jump_probability_percent = probability_percent;
        self.jump_distance_range = Interval { min, max };
        self
    }

    pub fn with_hidden_jump_seams(mut self, hide: bool) -> Self {
        self.hide_jump_seams = hide;
        self
    }

    /// Checks every numeric field; generation refuses configs that fail.
    pub fn validate(&self) -> Result<(), WalkError> {
        if self.step_count == 0 {
            return Err(WalkError::invalid("step_count", "must be positive"));
        }
        if !(0.0..=100.0).contains(&self.jump_probability_percent) {
            return Err(WalkError::invalid(
                "jump_probability_percent",
                format!("{} is outside [0, 100]", self.jump_probability_percent),
            ));
        }
        check_range("step_range", self.step_range)?;
        check_range("jump_distance_range", self.jump_distance_range)?;
        if self.jump_distance_range.min < 0.0 {
            return Err(WalkError::invalid(
                "jump_distance_range",
                "distances must not be negative",
            ));
        }
        if self.step_distribution == StepDistribution::Lattice
            && self.step_range.min.ceil() > self.step_range.max.floor()
        {
            return Err(WalkError::invalid(
                "step_range",
                "lattice steps need an integer inside the range",
            ));
        }
        if !self.origin.is_finite() {
            return Err(WalkError::invalid("origin", "must be finite"));
        }
        if !self.drift.is_finite() {
            return Err(WalkError::invalid("drift", "must be finite"));
        }
        Ok(())
    }
}

fn check_range(field: &'static str, range: Interval) -> Result<(), WalkError> {
    if !range.min.is_finite() || !range.max.is_finite() {
        return Err(WalkError::invalid(field, "bounds must be finite"));
    }
    if range.min > range.max {
        return Err(WalkError::invalid(
            field,
            format!("min {} is greater than max {}", range.min, range.max),
        ));
    }
    Ok(())
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            step_count: 1000,
            step_range: Interval {
                min: -1.0,
                max: 1.0,
            },
            step_distribution: StepDistribution::Continuous,
            origin: Point3::ORIGIN,
            drift: Point3::ORIGIN,
            dimension: Dimension::Two,
            jump_probability_percent: 0.0,
            jump_distance_range: Interval {
                min: 10.0,
                max: 50.0,
            },
            hide_jump_seams: false,
        }
    }
}
