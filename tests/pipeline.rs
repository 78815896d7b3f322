use meander::{
    Color, ColorPolicy, Dimension, Mark, PlotLayout, Point3, RngSource, SegmentColors,
    StepDistribution, WalkConfig, WalkPlot, colorize, generate_with,
};
use rand::{SeedableRng, rngs::SmallRng};

fn seeded(seed: u64) -> RngSource<SmallRng> {
    RngSource::new(SmallRng::seed_from_u64(seed))
}

#[test]
fn hidden_seams_split_walk_into_gapped_segments() {
    let config = WalkConfig::new()
        .with_step_count(2_000)
        .with_jumps(1.0, 30.0, 60.0)
        .with_hidden_jump_seams(true);
    let walk = generate_with(&config, &mut seeded(17)).unwrap();
    let segments = colorize(&walk, &ColorPolicy::default(), config.step_count).unwrap();

    let seams = walk.jump_seam_indices();
    assert!(!seams.is_empty(), "seeded walk should jump at 1%");
    assert!(segments.len() <= seams.len() + 1);

    for segment in &segments {
        assert!(segment.points.len() >= 2);
        // no segment crosses a seam
        let span = segment.span();
        assert!(seams.iter().all(|&s| s <= span.start || s >= span.end));
        assert_eq!(
            &segment.points[..],
            &walk.points()[span],
            "segment points must be the walk's points"
        );
    }
}

#[test]
fn gradient_is_continuous_across_segments() {
    let config = WalkConfig::new()
        .with_step_count(1_000)
        .with_jumps(2.0, 10.0, 20.0)
        .with_hidden_jump_seams(true);
    let walk = generate_with(&config, &mut seeded(3)).unwrap();
    let start = Color::new([1.0, 1.0, 0.0, 1.0]);
    let end = Color::new([0.0, 0.0, 1.0, 1.0]);
    let segments = colorize(
        &walk,
        &ColorPolicy::Gradient2 { start, end },
        config.step_count,
    )
    .unwrap();

    for segment in &segments {
        let SegmentColors::PerVertex(colors) = &segment.colors else {
            panic!("gradient policy must color per vertex");
        };
        for (offset, color) in colors.iter().enumerate() {
            let t = (segment.start + offset) as f32 / 1_000.0;
            assert!((color.components[0] - (1.0 - t)).abs() < 1e-5);
            assert!((color.components[2] - t).abs() < 1e-5);
        }
    }
}

#[test]
fn lattice_walk_in_3d_renders_headless() {
    let config = WalkConfig::new()
        .with_step_count(500)
        .with_step_distribution(StepDistribution::Lattice)
        .with_dimension(Dimension::Three)
        .with_origin(Point3::new(0.0, 0.0, 10.0))
        .with_drift(Point3::new(0.0, 0.0, 0.1));
    let walk = generate_with(&config, &mut seeded(99)).unwrap();
    assert_eq!(walk.points().len(), 501);

    let policy = ColorPolicy::Gradient3 {
        start: Color::new([1.0, 0.0, 0.0, 1.0]),
        mid: Color::new([0.0, 1.0, 0.0, 1.0]),
        end: Color::new([0.0, 0.0, 1.0, 1.0]),
        mid_position_percent: 25.0,
    };
    let mut plot = WalkPlot::new(&walk, &policy, PlotLayout::new())
        .unwrap()
        .with_mark(Mark::Dots { size: 2.0 });
    plot.redraw();

    let SegmentColors::PerVertex(colors) = &plot.segments()[0].colors else {
        panic!("gradient policy must color per vertex");
    };
    assert_eq!(colors[125], policy_mid());
}

fn policy_mid() -> Color {
    Color::new([0.0, 1.0, 0.0, 1.0])
}
