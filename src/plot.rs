use itertools::zip_eq;
use tracing::debug;
use vello::{
    Scene,
    kurbo::{self, Affine, Cap, Join, PathEl},
    peniko::{self, Mix},
};

use crate::{
    Bounds, Color, ColorPolicy, Dimension, Extents, Point3, PlotLayout, Segment, SegmentColors,
    Trajectory, WalkError, colorize, layout::PlotInstanceLayout,
};

/// How walk points are marked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mark {
    /// Connected polylines, `width` in logical pixels.
    Line { width: f64 },
    /// One dot per point, `size` is the radius in logical pixels.
    Dots { size: f64 },
}

impl Default for Mark {
    fn default() -> Self {
        Self::Line { width: 1.5 }
    }
}

/// Larger markers on the first and last point of the walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emphasis {
    pub start: Color,
    pub end: Color,
    /// Marker radius relative to the dot size (or line width).
    pub scale: f64,
}

impl Default for Emphasis {
    fn default() -> Self {
        Self {
            start: Color::from_rgb8(0x00, 0x80, 0x00),
            end: Color::from_rgb8(0xff, 0x00, 0x00),
            scale: 6.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// A colored walk and the vello scene it was last drawn into.
pub struct WalkPlot {
    pub(crate) layout: PlotInstanceLayout,
    dimension: Dimension,
    extents: Extents,
    endpoints: (Point3, Point3),
    segments: Vec<Segment>,
    pub mark: Mark,
    pub emphasis: Option<Emphasis>,
    pub axes: Vec<Axis>,
    pub scene: Scene,
}

impl WalkPlot {
    pub fn new(
        trajectory: &Trajectory,
        policy: &ColorPolicy,
        layout: PlotLayout,
    ) -> Result<Self, WalkError> {
        let segments = colorize(trajectory, policy, trajectory.step_count())?;
        let extents = trajectory.extents();
        let dimension = trajectory.dimension();

        Ok(Self {
            layout: layout.instantiate(1.0, &extents, dimension),
            dimension,
            extents,
            endpoints: endpoints(trajectory),
            segments,
            mark: Mark::default(),
            emphasis: Some(Emphasis::default()),
            axes: vec![Axis::X, Axis::Y],
            scene: Scene::new(),
        })
    }

    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.mark = mark;
        self
    }

    pub fn with_emphasis(mut self, emphasis: Option<Emphasis>) -> Self {
        self.emphasis = emphasis;
        self
    }

    pub fn with_axes(mut self, axes: Vec<Axis>) -> Self {
        self.axes = axes;
        self
    }

    /// Swaps in a freshly generated walk and refits the view to it.
    pub fn replace(&mut self, trajectory: &Trajectory, policy: &ColorPolicy) -> Result<(), WalkError> {
        self.segments = colorize(trajectory, policy, trajectory.step_count())?;
        self.extents = trajectory.extents();
        self.dimension = trajectory.dimension();
        self.endpoints = endpoints(trajectory);
        self.layout.data_bounds = self.layout.fit(&self.extents, self.dimension);
        Ok(())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn extents(&self) -> Extents {
        self.extents
    }

    /// The data window currently mapped onto the plot area.
    pub fn data_bounds(&self) -> Bounds {
        self.layout.data_bounds
    }

    pub(crate) fn set_scale_factor(&mut self, scale_factor: f64) {
        self.layout.scale_factor = scale_factor;
    }

    fn screen(&self, p: Point3) -> (f64, f64) {
        self.layout
            .to_screen(self.layout.projection.project(p, self.dimension))
    }

    pub fn redraw(&mut self) {
        let scale_factor = self.layout.scale_factor;
        let mut scene = Scene::new();

        let rect = kurbo::Rect {
            x0: scale_factor * self.layout.padding.left,
            y0: scale_factor * self.layout.padding.top,
            x1: scale_factor * (self.layout.logical_width - self.layout.padding.right),
            y1: scale_factor * (self.layout.logical_height - self.layout.padding.bottom),
        };
        scene.push_layer(Mix::Clip, 1.0, Affine::IDENTITY, &rect);

        for segment in &self.segments {
            match self.mark {
                Mark::Line { width } => self.draw_segment(segment, scale_factor * width, &mut scene),
                Mark::Dots { size } => self.draw_dots(segment, scale_factor * size, &mut scene),
            }
        }

        if let Some(emphasis) = self.emphasis {
            let base = match self.mark {
                Mark::Line { width } => width,
                Mark::Dots { size } => size,
            };
            let radius = scale_factor * base * emphasis.scale / 2.0;
            let (first, last) = self.endpoints;
            self.draw_marker(first, emphasis.start, radius, &mut scene);
            self.draw_marker(last, emphasis.end, radius, &mut scene);
        }

        scene.pop_layer();

        for axis in &self.axes {
            self.draw_axis(*axis, scale_factor, &mut scene);
        }

        debug!(segments = self.segments.len(), "redrew walk plot");
        self.scene = scene;
    }

    fn draw_segment(&self, segment: &Segment, width: f64, scene: &mut Scene) {
        let style = kurbo::Stroke::new(width)
            .with_caps(Cap::Round)
            .with_join(Join::Round);

        match &segment.colors {
            SegmentColors::Solid(color) => {
                let path = segment
                    .points
                    .iter()
                    .enumerate()
                    .map(|(i, p)| {
                        let xy = self.screen(*p);
                        if i == 0 {
                            PathEl::MoveTo(xy.into())
                        } else {
                            PathEl::LineTo(xy.into())
                        }
                    })
                    .collect::<Vec<_>>();

                scene.stroke(
                    &style,
                    Affine::IDENTITY,
                    peniko::BrushRef::Solid(*color),
                    None,
                    &path.as_slice(),
                );
            }
            SegmentColors::PerVertex(colors) => {
                // each edge takes the color of the point it leaves
                segment.points.windows(2).zip(colors).for_each(|(edge, color)| {
                    let path = [
                        PathEl::MoveTo(self.screen(edge[0]).into()),
                        PathEl::LineTo(self.screen(edge[1]).into()),
                    ];
                    scene.stroke(
                        &style,
                        Affine::IDENTITY,
                        peniko::BrushRef::Solid(*color),
                        None,
                        &path.as_slice(),
                    );
                });
            }
        }
    }

    fn draw_dots(&self, segment: &Segment, size: f64, scene: &mut Scene) {
        let colors: Box<dyn Iterator<Item = Color>> = match &segment.colors {
            SegmentColors::Solid(color) => Box::new(std::iter::repeat_n(*color, segment.points.len())),
            SegmentColors::PerVertex(colors) => Box::new(colors.iter().copied()),
        };

        zip_eq(segment.points.iter(), colors).for_each(|(p, color)| {
            scene.fill(
                peniko::Fill::NonZero,
                Affine::IDENTITY,
                peniko::BrushRef::Solid(color),
                None,
                &kurbo::Circle::new(self.screen(*p), size),
            );
        });
    }

    fn draw_marker(&self, p: Point3, color: Color, radius: f64, scene: &mut Scene) {
        scene.fill(
            peniko::Fill::NonZero,
            Affine::IDENTITY,
            peniko::BrushRef::Solid(color),
            None,
            &kurbo::Circle::new(self.screen(p), radius),
        );
    }

    fn draw_axis(&self, axis: Axis, scale_factor: f64, scene: &mut Scene) {
        let layout = &self.layout;
        let left = scale_factor * layout.padding.left;
        let right = scale_factor * (layout.logical_width - layout.padding.right);
        let top = scale_factor * layout.padding.top;
        let bottom = scale_factor * (layout.logical_height - layout.padding.bottom);
        let tick = 5. * scale_factor;

        let style = kurbo::Stroke::new(1.5 * scale_factor).with_caps(Cap::Square);

        let (spine, ticks): ([PathEl; 2], Vec<[PathEl; 2]>) = match axis {
            Axis::X => (
                [
                    PathEl::MoveTo((left, bottom).into()),
                    PathEl::LineTo((right, bottom).into()),
                ],
                (1..=9)
                    .map(|i| {
                        let x = left + i as f64 * (right - left) / 10.;
                        [
                            PathEl::MoveTo((x, bottom + tick).into()),
                            PathEl::LineTo((x, bottom).into()),
                        ]
                    })
                    .collect(),
            ),
            Axis::Y => (
                [
                    PathEl::MoveTo((left, bottom).into()),
                    PathEl::LineTo((left, top).into()),
                ],
                (1..=9)
                    .map(|i| {
                        let y = bottom - i as f64 * (bottom - top) / 10.;
                        [
                            PathEl::MoveTo((left - tick, y).into()),
                            PathEl::LineTo((left, y).into()),
                        ]
                    })
                    .collect(),
            ),
        };

        scene.stroke(
            &style,
            Affine::IDENTITY,
            peniko::BrushRef::Solid(Color::BLACK),
            None,
            &spine.as_slice(),
        );
        for path in ticks {
            scene.stroke(
                &kurbo::Stroke::new(1.5 * scale_factor),
                Affine::IDENTITY,
                peniko::BrushRef::Solid(Color::BLACK),
                None,
                &path.as_slice(),
            );
        }
    }
}

fn endpoints(trajectory: &Trajectory) -> (Point3, Point3) {
    let points = trajectory.points();
    let first = points.first().copied().unwrap_or_default();
    let last = points.last().copied().unwrap_or(first);
    (first, last)
}
