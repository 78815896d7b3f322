use std::ops::{Add, AddAssign};

use crate::{Dimension, Point3};

/// Share of the data range left empty around a fitted walk.
const FIT_MARGIN: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct PlotLayout {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
    pub initial_bounds: Option<Bounds>,
    pub interaction_bounds: Bounds,
    pub projection: Projection,
}

impl PlotLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_initial_bounds(mut self, bounds: Bounds) -> Self {
        self.initial_bounds = Some(bounds);
        self
    }

    pub fn with_interaction_bounds(mut self, bounds: Bounds) -> Self {
        self.interaction_bounds = bounds;
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub(crate) fn instantiate(
        self,
        scale_factor: f64,
        extents: &Extents,
        dimension: Dimension,
    ) -> PlotInstanceLayout {
        let mut instance = PlotInstanceLayout {
            logical_width: self.width,
            logical_height: self.height,
            padding: self.padding,
            data_bounds: Bounds::UNIT,
            interaction_bounds: self.interaction_bounds,
            projection: self.projection,
            scale_factor,
        };
        instance.data_bounds = match self.initial_bounds {
            Some(bounds) => bounds,
            None => instance.fit(extents, dimension),
        };
        instance
    }
}

impl Default for PlotLayout {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            padding: Padding {
                top: 20.0,
                bottom: 20.0,
                left: 50.0,
                right: 20.0,
            },
            initial_bounds: None,
            interaction_bounds: Bounds::INFINITY,
            projection: Projection::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlotInstanceLayout {
    pub(crate) logical_width: f64,
    pub(crate) logical_height: f64,
    pub(crate) padding: Padding,

    pub(crate) data_bounds: Bounds,
    pub(crate) interaction_bounds: Bounds,
    pub(crate) projection: Projection,

    pub(crate) scale_factor: f64,
}

impl PlotInstanceLayout {
    /// Data window showing the whole walk at equal scale on both screen axes.
    ///
    /// 3D walks are boxed in a cube around their center first, so all three
    /// axes share one scale before projection.
    pub(crate) fn fit(&self, extents: &Extents, dimension: Dimension) -> Bounds {
        let raw = match dimension {
            Dimension::Two => Bounds {
                x: extents.x,
                y: extents.y,
            },
            Dimension::Three => self.projection.bounds_of(&extents.cube()),
        };
        let aspect = if self.has_area() {
            self.inner_width() / self.inner_height()
        } else {
            1.0
        };
        raw.with_aspect(aspect).expanded(FIT_MARGIN)
    }

    /// Whether any plot area is left once the padding is taken out.
    fn has_area(&self) -> bool {
        self.inner_width() > 0.0 && self.inner_height() > 0.0
    }

    fn is_on_inner(&self, mouse_position: (f64, f64)) -> bool {
        let (mut x, mut y) = mouse_position;
        x /= self.scale_factor;
        y /= self.scale_factor;

        x >= self.padding.left
            && x <= self.logical_width - self.padding.right
            && y >= self.padding.top
            && y <= self.logical_height - self.padding.bottom
    }

    pub(crate) fn inner_width(&self) -> f64 {
        self.logical_width - self.padding.left - self.padding.right
    }

    pub(crate) fn inner_height(&self) -> f64 {
        self.logical_height - self.padding.top - self.padding.bottom
    }

    /// Maps a projected data position to physical pixels.
    pub(crate) fn to_screen(&self, position: (f64, f64)) -> (f64, f64) {
        let fx = (position.0 - self.data_bounds.x.min) / self.data_bounds.x.size();
        let fy = (position.1 - self.data_bounds.y.min) / self.data_bounds.y.size();
        (
            self.scale_factor * (self.padding.left + fx * self.inner_width()),
            self.scale_factor * (self.logical_height - self.padding.bottom - fy * self.inner_height()),
        )
    }

    fn convert_to_data_position(&self, mouse_position: (f64, f64)) -> Option<(f64, f64)> {
        let logical_position = (
            mouse_position.0 / self.scale_factor,
            self.logical_height - mouse_position.1 / self.scale_factor,
        );
        let logical_plot_position = (
            logical_position.0 - self.padding.left,
            logical_position.1 - self.padding.bottom,
        );
        let percentage_plot_position = (
            logical_plot_position.0 / self.inner_width(),
            logical_plot_position.1 / self.inner_height(),
        );

        if (0.0..=1.0).contains(&percentage_plot_position.0)
            && (0.0..=1.0).contains(&percentage_plot_position.1)
        {
            Some((
                self.data_bounds.x.min + percentage_plot_position.0 * self.data_bounds.x.size(),
                self.data_bounds.y.min + percentage_plot_position.1 * self.data_bounds.y.size(),
            ))
        } else {
            None
        }
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        self.logical_width = width as f64 / self.scale_factor;
        self.logical_height = height as f64 / self.scale_factor;
        // a window no larger than its padding keeps the last data window
        if self.has_area() {
            self.data_bounds = self
                .data_bounds
                .with_aspect(self.inner_width() / self.inner_height());
        }
    }

    pub(crate) fn drag(
        &mut self,
        start_drag_mouse_position: (f64, f64),
        pre_position: (f64, f64),
        current_position: (f64, f64),
    ) {
        if !self.is_on_inner(start_drag_mouse_position)
            || !self.is_on_inner(pre_position)
            || !self.is_on_inner(current_position)
        {
            return;
        }

        let change = (
            current_position.0 - pre_position.0,
            current_position.1 - pre_position.1,
        );

        // screen y grows downwards, data y upwards
        let data_x =
            change.0 * self.data_bounds.x.size() / (self.scale_factor * self.inner_width());
        let data_y =
            change.1 * self.data_bounds.y.size() / (self.scale_factor * self.inner_height());

        self.data_bounds.x += -data_x;
        self.data_bounds.y += data_y;

        self.data_bounds = self.interaction_bounds.bound(self.data_bounds);
    }

    pub(crate) fn zoom(&mut self, mouse_position: (f64, f64), factor: f64) {
        if let Some(data_position) = self.convert_to_data_position(mouse_position) {
            self.data_bounds = Bounds {
                x: Interval {
                    min: data_position.0 - (data_position.0 - self.data_bounds.x.min) * factor,
                    max: data_position.0 + (self.data_bounds.x.max - data_position.0) * factor,
                },
                y: Interval {
                    min: data_position.1 - (data_position.1 - self.data_bounds.y.min) * factor,
                    max: data_position.1 + (self.data_bounds.y.max - data_position.1) * factor,
                },
            };

            self.data_bounds = self.interaction_bounds.bound(self.data_bounds);
        }
    }
}

/// Orthographic view used to flatten 3D walks onto the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            elevation_deg: 30.0,
            azimuth_deg: -60.0,
        }
    }
}

impl Projection {
    /// Screen-plane coordinates of `p`. 2D walks pass through untouched.
    pub fn project(&self, p: Point3, dimension: Dimension) -> (f64, f64) {
        match dimension {
            Dimension::Two => (p.x, p.y),
            Dimension::Three => {
                let (sa, ca) = self.azimuth_deg.to_radians().sin_cos();
                let (se, ce) = self.elevation_deg.to_radians().sin_cos();
                let u = -p.x * sa + p.y * ca;
                let v = -(p.x * ca + p.y * sa) * se + p.z * ce;
                (u, v)
            }
        }
    }

    fn bounds_of(&self, extents: &Extents) -> Bounds {
        let mut bounds = Bounds {
            x: Interval::EMPTY,
            y: Interval::EMPTY,
        };
        for x in [extents.x.min, extents.x.max] {
            for y in [extents.y.min, extents.y.max] {
                for z in [extents.z.min, extents.z.max] {
                    let (u, v) = self.project(Point3::new(x, y, z), Dimension::Three);
                    bounds.x = bounds.x.including(u);
                    bounds.y = bounds.y.including(v);
                }
            }
        }
        bounds
    }
}

/// Per-axis coordinate range of a walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Extents {
    pub fn of(points: &[Point3]) -> Self {
        points.iter().fold(
            Self {
                x: Interval::EMPTY,
                y: Interval::EMPTY,
                z: Interval::EMPTY,
            },
            |acc, p| Self {
                x: acc.x.including(p.x),
                y: acc.y.including(p.y),
                z: acc.z.including(p.z),
            },
        )
    }

    pub fn center(&self) -> Point3 {
        Point3::new(self.x.center(), self.y.center(), self.z.center())
    }

    /// Cube sharing this box's center whose edge is the largest axis range.
    pub fn cube(&self) -> Self {
        let half = self.x.size().max(self.y.size()).max(self.z.size()) / 2.0;
        let center = self.center();
        Self {
            x: Interval::around(center.x, half),
            y: Interval::around(center.y, half),
            z: Interval::around(center.z, half),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: Interval,
    pub y: Interval,
}

impl Bounds {
    pub const UNIT: Self = Self {
        x: Interval::UNIT,
        y: Interval::UNIT,
    };

    pub const INFINITY: Self = Self {
        x: Interval::INFINITY,
        y: Interval::INFINITY,
    };

    #[inline]
    pub fn bound(self, other: Self) -> Self {
        Self {
            x: self.x.bound(other.x),
            y: self.y.bound(other.y),
        }
    }

    /// Grows one axis around its center so `x.size() / y.size() == aspect`.
    ///
    /// Points collapse to a unit box first.
    pub fn with_aspect(self, aspect: f64) -> Self {
        let mut x = self.x;
        let mut y = self.y;
        if x.size() <= 0.0 && y.size() <= 0.0 {
            x = Interval::around(x.center(), 0.5);
            y = Interval::around(y.center(), 0.5);
        }
        if x.size() < aspect * y.size() {
            x = Interval::around(x.center(), aspect * y.size() / 2.0);
        } else {
            y = Interval::around(y.center(), x.size() / aspect / 2.0);
        }
        Self { x, y }
    }

    /// Widens both axes by `fraction` of their size on each side.
    pub fn expanded(self, fraction: f64) -> Self {
        Self {
            x: Interval::around(self.x.center(), self.x.size() * (0.5 + fraction)),
            y: Interval::around(self.y.center(), self.y.size() * (0.5 + fraction)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub const UNIT: Self = Self { min: 0.0, max: 1.0 };

    pub const INFINITY: Self = Self {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    /// Contains nothing; the identity for [`Interval::including`].
    pub const EMPTY: Self = Self {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    #[inline]
    pub fn around(center: f64, half: f64) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn size(self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn center(self) -> f64 {
        (self.min + self.max) / 2.0
    }

    #[inline]
    pub fn including(self, value: f64) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    #[inline]
    pub fn bound(self, other: Self) -> Self {
        if other.size() > self.size() {
            self
        } else if other.min < self.min {
            let shift = self.min - other.min;
            Self {
                min: self.min,
                max: other.max + shift,
            }
        } else if other.max > self.max {
            let shift = other.max - self.max;
            Self {
                min: other.min - shift,
                max: self.max,
            }
        } else {
            other
        }
    }
}

impl Add<f64> for Interval {
    type Output = Interval;

    fn add(self, other: f64) -> Self::Output {
        Interval {
            min: self.min + other,
            max: self.max + other,
        }
    }
}

impl AddAssign<f64> for Interval {
    fn add_assign(&mut self, other: f64) {
        *self = *self + other;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn instance() -> PlotInstanceLayout {
        let extents = Extents {
            x: Interval { min: 0.0, max: 10.0 },
            y: Interval { min: 0.0, max: 1.0 },
            z: Interval { min: 0.0, max: 0.0 },
        };
        PlotLayout::new()
            .with_width(400.0)
            .with_height(300.0)
            .with_padding(Padding {
                top: 0.0,
                bottom: 0.0,
                left: 0.0,
                right: 0.0,
            })
            .instantiate(1.0, &extents, Dimension::Two)
    }

    #[test]
    fn test_fit_keeps_equal_aspect() {
        let layout = instance();
        let bounds = layout.data_bounds;
        assert!(close(bounds.x.size() / bounds.y.size(), 400.0 / 300.0));
        assert!(bounds.x.min < 0.0 && bounds.x.max > 10.0);
        assert!(close(bounds.y.center(), 0.5));
    }

    #[test]
    fn test_single_point_gets_a_window() {
        let b = Bounds {
            x: Interval { min: 3.0, max: 3.0 },
            y: Interval { min: 3.0, max: 3.0 },
        }
        .with_aspect(2.0);
        assert!(close(b.x.size(), 2.0));
        assert!(close(b.y.size(), 1.0));
        assert!(close(b.x.center(), 3.0));
    }

    #[test]
    fn test_cube_is_centered() {
        let extents = Extents {
            x: Interval { min: 0.0, max: 2.0 },
            y: Interval { min: -5.0, max: 5.0 },
            z: Interval { min: 1.0, max: 1.0 },
        };
        let cube = extents.cube();
        assert_eq!(cube.center(), extents.center());
        assert!(close(cube.x.size(), 10.0));
        assert!(close(cube.z.size(), 10.0));
    }

    #[test]
    fn test_extents_of_empty_is_empty() {
        let extents = Extents::of(&[]);
        assert_eq!(extents.x, Interval::EMPTY);
    }

    #[test]
    fn test_projection_passes_2d_through() {
        let p = Point3::new(1.5, -2.0, 9.0);
        assert_eq!(Projection::default().project(p, Dimension::Two), (1.5, -2.0));
    }

    #[test]
    fn test_top_down_projection() {
        let projection = Projection {
            elevation_deg: 90.0,
            azimuth_deg: -90.0,
        };
        let (u, v) = projection.project(Point3::new(2.0, 3.0, 100.0), Dimension::Three);
        assert!(close(u, 2.0));
        assert!(close(v, 3.0));
    }

    #[test]
    fn test_to_screen_corners() {
        let layout = instance();
        let b = layout.data_bounds;
        let (x0, y0) = layout.to_screen((b.x.min, b.y.min));
        let (x1, y1) = layout.to_screen((b.x.max, b.y.max));
        assert!(close(x0, 0.0) && close(y0, 300.0));
        assert!(close(x1, 400.0) && close(y1, 0.0));
    }

    #[test]
    fn test_zoom_keeps_cursor_anchor() {
        let mut layout = instance();
        let cursor = (100.0, 150.0);
        let before = layout.convert_to_data_position(cursor).unwrap();
        layout.zoom(cursor, 0.5);
        let after = layout.convert_to_data_position(cursor).unwrap();
        assert!(close(before.0, after.0));
        assert!(close(before.1, after.1));
    }

    #[test]
    fn test_drag_moves_window_against_cursor() {
        let mut layout = instance();
        let before = layout.data_bounds;
        layout.drag((200.0, 150.0), (200.0, 150.0), (240.0, 150.0));
        assert!(layout.data_bounds.x.min < before.x.min);
        assert_eq!(layout.data_bounds.y, before.y);
    }

    #[test]
    fn test_resize_through_padding_height_keeps_window() {
        let extents = Extents {
            x: Interval { min: 0.0, max: 10.0 },
            y: Interval { min: 0.0, max: 5.0 },
            z: Interval { min: 0.0, max: 0.0 },
        };
        let mut layout = PlotLayout::new().instantiate(1.0, &extents, Dimension::Two);
        let before = layout.data_bounds;

        // default padding is 20 top and 20 bottom
        layout.resize(800, 40);
        assert_eq!(layout.data_bounds, before);
        layout.resize(800, 30);
        assert_eq!(layout.data_bounds, before);

        layout.resize(800, 600);
        let b = layout.data_bounds;
        assert!(b.x.min.is_finite() && b.x.max.is_finite());
        assert!(b.y.min.is_finite() && b.y.max.is_finite());
        assert!(close(b.x.size() / b.y.size(), 730.0 / 560.0));
        let (x, y) = layout.to_screen((5.0, 2.5));
        assert!(x.is_finite() && y.is_finite());
    }

    #[test]
    fn test_fit_without_plot_area_stays_finite() {
        let extents = Extents {
            x: Interval { min: 0.0, max: 10.0 },
            y: Interval { min: 0.0, max: 5.0 },
            z: Interval { min: 0.0, max: 0.0 },
        };
        let layout = PlotLayout::new()
            .with_height(40.0)
            .instantiate(1.0, &extents, Dimension::Two);
        let b = layout.data_bounds;
        assert!(b.x.size().is_finite() && b.x.size() > 0.0);
        assert!(b.y.size().is_finite() && b.y.size() > 0.0);
    }

    #[test]
    fn test_bound_shifts_inside() {
        let limit = Interval { min: 0.0, max: 10.0 };
        let shifted = limit.bound(Interval { min: -2.0, max: 3.0 });
        assert_eq!(shifted, Interval { min: 0.0, max: 5.0 });
    }
}
