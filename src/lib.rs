//! Random walks with drift and long-range jumps, cut at hidden jump seams
//! and colored along the whole walk.
//!
//! ```no_run
//! use meander::{ColorPolicy, PlotLayout, WalkConfig, WalkPlot};
//!
//! let config = WalkConfig::new().with_step_count(5_000).with_jumps(0.5, 20.0, 60.0);
//! let walk = meander::generate(&config)?;
//! let mut plot = WalkPlot::new(&walk, &ColorPolicy::default(), PlotLayout::new())?;
//! meander::launch(&mut plot)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod color;
mod config;
mod error;
mod layout;
mod plot;
pub mod preset;
mod segment;
mod source;
mod viewer;
mod walk;

pub use color::{Color, ColorPolicy, Gradient, GradientStop};
pub use config::{Dimension, Point3, StepDistribution, WalkConfig};
pub use error::{PresetError, ViewerError, WalkError};
pub use layout::{Bounds, Extents, Interval, Padding, PlotLayout, Projection};
pub use plot::{Axis, Emphasis, Mark, WalkPlot};
pub use preset::Preset;
pub use segment::{Segment, SegmentColors, colorize, partition};
pub use source::{RngSource, UniformSource};
pub use viewer::{Regenerate, launch, launch_with};
pub use walk::{Trajectory, generate, generate_with};
