use std::ops::Range;

use itertools::Itertools;
use tracing::debug;

use crate::{Color, ColorPolicy, Gradient, Point3, Trajectory, WalkError};

/// Per-segment coloring handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentColors {
    Solid(Color),
    /// One color per point, parallel to [`Segment::points`].
    PerVertex(Vec<Color>),
}

/// A contiguous run of at least two walk points, drawn as one polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Step index of the first point in the whole walk.
    pub start: usize,
    pub points: Vec<Point3>,
    pub colors: SegmentColors,
}

impl Segment {
    /// Step indices this segment covers in the whole walk.
    pub fn span(&self) -> Range<usize> {
        self.start..self.start + self.points.len()
    }
}

enum Paint {
    Solid(Color),
    Gradient(Gradient),
}

/// Splits `0..len` at every seam; each seam index opens a new run.
///
/// Runs shorter than two points cannot be drawn and are dropped.
pub fn partition(len: usize, seams: &[usize]) -> Vec<Range<usize>> {
    std::iter::once(0)
        .chain(seams.iter().copied().filter(|&s| s > 0 && s < len))
        .chain(std::iter::once(len))
        .tuple_windows()
        .map(|(start, end)| start..end)
        .filter(|run| run.len() >= 2)
        .collect()
}

/// Cuts `trajectory` at its seams and colors every run.
///
/// Gradient colors are keyed by the absolute step index divided by
/// `global_step_count`, so runs of one walk continue each other's colors
/// across hidden seams.
pub fn colorize(
    trajectory: &Trajectory,
    policy: &ColorPolicy,
    global_step_count: usize,
) -> Result<Vec<Segment>, WalkError> {
    policy.validate()?;
    if global_step_count == 0 {
        return Err(WalkError::invalid("step_count", "must be positive"));
    }

    let points = trajectory.points();
    let seams = trajectory.jump_seam_indices();
    let runs = partition(points.len(), seams);

    let paint = match *policy {
        ColorPolicy::Solid { color } => Paint::Solid(color),
        _ => Paint::Gradient(Gradient::new(policy.stops())),
    };

    let segments: Vec<_> = runs
        .into_iter()
        .map(|run| {
            let colors = match &paint {
                Paint::Solid(color) => SegmentColors::Solid(*color),
                Paint::Gradient(gradient) => SegmentColors::PerVertex(
                    run.clone()
                        .map(|i| gradient.sample(i as f64 / global_step_count as f64))
                        .collect(),
                ),
            };
            Segment {
                start: run.start,
                points: points[run].to_vec(),
                colors,
            }
        })
        .collect();

    debug!(
        seams = seams.len(),
        segments = segments.len(),
        dropped = seams.len() + 1 - segments.len(),
        "colorized walk"
    );

    Ok(segments)
}
