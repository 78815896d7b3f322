use vello::peniko::color::{AlphaColor, Srgb};

use crate::WalkError;

pub type Color = AlphaColor<Srgb>;

/// One anchor of a gradient: a color pinned at `position` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub position: f64,
    pub color: Color,
}

/// How a walk is colored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorPolicy {
    Solid {
        color: Color,
    },
    Gradient2 {
        start: Color,
        end: Color,
    },
    Gradient3 {
        start: Color,
        mid: Color,
        end: Color,
        mid_position_percent: f64,
    },
}

impl Default for ColorPolicy {
    fn default() -> Self {
        Self::Gradient2 {
            start: Color::from_rgb8(0x41, 0xb6, 0xc4),
            end: Color::from_rgb8(0x08, 0x1d, 0x58),
        }
    }
}

impl ColorPolicy {
    pub fn validate(&self) -> Result<(), WalkError> {
        if let Self::Gradient3 {
            mid_position_percent,
            ..
        } = self
        {
            if !(0.0..=100.0).contains(mid_position_percent) {
                return Err(WalkError::invalid(
                    "mid_position_percent",
                    format!("{mid_position_percent} is outside [0, 100]"),
                ));
            }
        }
        Ok(())
    }

    /// Gradient stops in configuration order; empty for a solid color.
    pub fn stops(&self) -> Vec<GradientStop> {
        match *self {
            Self::Solid { .. } => Vec::new(),
            Self::Gradient2 { start, end } => vec![
                GradientStop {
                    position: 0.0,
                    color: start,
                },
                GradientStop {
                    position: 1.0,
                    color: end,
                },
            ],
            Self::Gradient3 {
                start,
                mid,
                end,
                mid_position_percent,
            } => vec![
                GradientStop {
                    position: 0.0,
                    color: start,
                },
                GradientStop {
                    position: mid_position_percent / 100.0,
                    color: mid,
                },
                GradientStop {
                    position: 1.0,
                    color: end,
                },
            ],
        }
    }
}

/// Piecewise-linear color function over `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    stops: Vec<GradientStop>,
}

impl Gradient {
    /// Sorts `stops` by position; each color travels with its position.
    /// Stops sharing a position keep their given order.
    pub fn new(mut stops: Vec<GradientStop>) -> Self {
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Self { stops }
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Color at `t`. Below the first stop and above the last the end
    /// colors hold; at a stop position the stop's color is returned exactly.
    pub fn sample(&self, t: f64) -> Color {
        let Some(first) = self.stops.first() else {
            return Color::BLACK;
        };
        if t <= first.position {
            return first.color;
        }

        for pair in self.stops.windows(2) {
            let (s0, s1) = (pair[0], pair[1]);
            if t == s1.position {
                return s1.color;
            }
            if t < s1.position {
                let range = s1.position - s0.position;
                let frac = if range > 0.0 {
                    ((t - s0.position) / range) as f32
                } else {
                    0.0
                };
                return mix(s0.color, s1.color, frac);
            }
        }

        self.stops[self.stops.len() - 1].color
    }
}

/// `a * (1 - f) + b * f` per component, so `f == 1` yields `b` bit for bit.
fn mix(a: Color, b: Color, f: f32) -> Color {
    Color::new(std::array::from_fn(|i| {
        a.components[i] * (1.0 - f) + b.components[i] * f
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Color {
        Color::new([1.0, 0.0, 0.0, 1.0])
    }

    fn green() -> Color {
        Color::new([0.0, 1.0, 0.0, 1.0])
    }

    fn blue() -> Color {
        Color::new([0.0, 0.0, 1.0, 1.0])
    }

    #[test]
    fn test_two_stop_midpoint() {
        let policy = ColorPolicy::Gradient2 {
            start: red(),
            end: blue(),
        };
        let gradient = Gradient::new(policy.stops());
        let c = gradient.sample(5.0 / 10.0);
        assert_eq!(c.components, [0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_stops_hit_exactly() {
        for mid in [0.0, 12.5, 25.0, 33.3, 50.0, 99.0, 100.0] {
            let policy = ColorPolicy::Gradient3 {
                start: red(),
                mid: green(),
                end: blue(),
                mid_position_percent: mid,
            };
            let gradient = Gradient::new(policy.stops());
            let stops = gradient.stops();
            // Coinciding stops resolve to the first one at that position.
            for (k, stop) in stops.iter().enumerate() {
                let shadowed = stops[..k].iter().any(|s| s.position == stop.position);
                if !shadowed {
                    assert_eq!(gradient.sample(stop.position), stop.color, "mid {mid}");
                }
            }
        }
    }

    #[test]
    fn test_quarter_mid_position() {
        let policy = ColorPolicy::Gradient3 {
            start: red(),
            mid: green(),
            end: blue(),
            mid_position_percent: 25.0,
        };
        let gradient = Gradient::new(policy.stops());
        assert_eq!(gradient.sample(2.0 / 8.0), green());
        assert_eq!(gradient.sample(0.0), red());
        assert_eq!(gradient.sample(1.0), blue());
    }

    #[test]
    fn test_unsorted_stops_keep_their_colors() {
        let gradient = Gradient::new(vec![
            GradientStop {
                position: 1.0,
                color: blue(),
            },
            GradientStop {
                position: 0.0,
                color: red(),
            },
        ]);
        assert_eq!(gradient.stops()[0].color, red());
        assert_eq!(gradient.sample(0.0), red());
        assert_eq!(gradient.sample(1.0), blue());
    }

    #[test]
    fn test_outside_unit_interval_clamps() {
        let gradient = Gradient::new(
            ColorPolicy::Gradient2 {
                start: red(),
                end: blue(),
            }
            .stops(),
        );
        assert_eq!(gradient.sample(-1.0), red());
        assert_eq!(gradient.sample(2.0), blue());
    }

    #[test]
    fn test_continuous_around_mid_stop() {
        let gradient = Gradient::new(
            ColorPolicy::Gradient3 {
                start: red(),
                mid: green(),
                end: blue(),
                mid_position_percent: 40.0,
            }
            .stops(),
        );
        let below = gradient.sample(0.4 - 1e-9);
        let above = gradient.sample(0.4 + 1e-9);
        for i in 0..4 {
            assert!((below.components[i] - green().components[i]).abs() < 1e-6);
            assert!((above.components[i] - green().components[i]).abs() < 1e-6);
        }
    }

    #[test]
    fn test_mid_position_validated() {
        let policy = ColorPolicy::Gradient3 {
            start: red(),
            mid: green(),
            end: blue(),
            mid_position_percent: 120.0,
        };
        assert!(policy.validate().is_err());
        assert!(ColorPolicy::default().validate().is_ok());
        assert!(ColorPolicy::Solid { color: red() }.stops().is_empty());
    }

    #[test]
    fn test_default_runs_teal_to_navy() {
        let ColorPolicy::Gradient2 { start, end } = ColorPolicy::default() else {
            panic!("default policy should be a two-stop gradient");
        };
        assert_eq!(start, Color::from_rgb8(0x41, 0xb6, 0xc4));
        assert_eq!(end, Color::from_rgb8(0x08, 0x1d, 0x58));
        // light to dark
        let luma = |c: Color| c.components[..3].iter().sum::<f32>();
        assert!(luma(start) > luma(end));
    }
}
