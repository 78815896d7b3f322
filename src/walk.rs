use tracing::debug;

use crate::{
    Dimension, Extents, Interval, Point3, RngSource, StepDistribution, UniformSource, WalkConfig,
    WalkError,
};

/// A generated walk: `step_count + 1` points starting at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    points: Vec<Point3>,
    jump_seam_indices: Vec<usize>,
    dimension: Dimension,
}

impl Trajectory {
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Indices of points reached by a jump whose incoming edge is hidden.
    ///
    /// Strictly increasing, each in `1..=step_count`. Empty unless the walk
    /// was generated with `hide_jump_seams`.
    pub fn jump_seam_indices(&self) -> &[usize] {
        &self.jump_seam_indices
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn step_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn extents(&self) -> Extents {
        Extents::of(&self.points)
    }
}

/// Generates a walk from the thread-local generator.
pub fn generate(config: &WalkConfig) -> Result<Trajectory, WalkError> {
    generate_with(config, &mut RngSource::thread())
}

/// Generates a walk, taking every draw from `source`.
pub fn generate_with<S>(config: &WalkConfig, source: &mut S) -> Result<Trajectory, WalkError>
where
    S: UniformSource + ?Sized,
{
    config.validate()?;

    let is_3d = config.dimension.is_3d();
    let mut points = Vec::with_capacity(config.step_count + 1);
    let mut jump_seam_indices = Vec::new();
    let mut jumps = 0usize;

    let mut current = config.origin;
    points.push(current);

    for step in 0..config.step_count {
        if source.percent() < config.jump_probability_percent {
            jumps += 1;
            current.x += jump_offset(source, config.jump_distance_range)?;
            current.y += jump_offset(source, config.jump_distance_range)?;
            if is_3d {
                current.z += jump_offset(source, config.jump_distance_range)?;
            }
            if config.hide_jump_seams {
                jump_seam_indices.push(step + 1);
            }
        } else {
            current.x += increment(source, config)? + config.drift.x;
            current.y += increment(source, config)? + config.drift.y;
            if is_3d {
                current.z += increment(source, config)? + config.drift.z;
            }
        }
        points.push(current);
    }

    debug!(
        steps = config.step_count,
        jumps,
        seams = jump_seam_indices.len(),
        "generated walk"
    );

    Ok(Trajectory {
        points,
        jump_seam_indices,
        dimension: config.dimension,
    })
}

/// One axis of a jump: a magnitude from `range` with a random sign.
fn jump_offset<S>(source: &mut S, range: Interval) -> Result<f64, WalkError>
where
    S: UniformSource + ?Sized,
{
    let magnitude = source.uniform(range)?;
    Ok(magnitude * source.sign())
}

/// One axis of a normal step, before drift.
fn increment<S>(source: &mut S, config: &WalkConfig) -> Result<f64, WalkError>
where
    S: UniformSource + ?Sized,
{
    match config.step_distribution {
        StepDistribution::Continuous => source.uniform(config.step_range),
        StepDistribution::Lattice => {
            let lo = config.step_range.min.ceil() as i64;
            let hi = config.step_range.max.floor() as i64;
            Ok(source.integer(lo, hi)? as f64)
        }
    }
}
