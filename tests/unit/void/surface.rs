use super::*;

fn concentric() -> RadialGradient {
    RadialGradient::new(Point::new(0.0, 0.0), 10.0, Point::new(0.0, 0.0), 110.0)
        .with_stop(1.0, Rgba::new(0, 0, 0, 1.0))
        .with_stop(0.0, Rgba::new(255, 255, 255, 1.0))
}

#[test]
fn stops_are_kept_sorted() {
    let g = concentric();
    assert_eq!(g.stops[0].offset, 0.0);
    assert_eq!(g.stops[1].offset, 1.0);
}

#[test]
fn concentric_param_is_linear_in_distance() {
    let g = concentric();
    assert_eq!(g.param_at(Point::new(0.0, 0.0)), Some(0.0));
    let t = g.param_at(Point::new(60.0, 0.0)).unwrap();
    assert!((t - 0.5).abs() < 1e-9);
    assert_eq!(g.param_at(Point::new(500.0, 0.0)), Some(1.0));
}

#[test]
fn offset_centers_still_cover_whole_plane_when_nested() {
    let g = RadialGradient::new(Point::new(50.0, 45.0), 6.0, Point::new(50.0, 50.0), 75.0)
        .with_stop(0.0, Rgba::new(30, 110, 70, 0.12))
        .with_stop(1.0, Rgba::new(0, 0, 0, 0.55));
    for &(x, y) in &[(0.0, 0.0), (100.0, 100.0), (50.0, 45.0), (50.0, 125.0)] {
        assert!(g.param_at(Point::new(x, y)).is_some(), "({x},{y})");
    }
}

#[test]
fn color_interpolates_between_stops() {
    let g = concentric();
    assert_eq!(g.color_at(0.0), Rgba8Premul::from_straight_rgba(255, 255, 255, 255));
    assert_eq!(g.color_at(1.0), Rgba8Premul::from_straight_rgba(0, 0, 0, 255));
    let mid = g.color_at(0.5);
    assert!((127..=128).contains(&mid.r));
    assert_eq!(mid.a, 255);
}

#[test]
fn gradient_without_stops_is_transparent() {
    let g = RadialGradient::new(Point::ZERO, 0.0, Point::ZERO, 1.0);
    assert_eq!(g.sample(Point::ZERO), Rgba8Premul::transparent());
}

#[test]
fn resize_surface_uses_clamped_scale() {
    #[derive(Default)]
    struct SizeProbe(Option<(BackingSize, f64)>);
    impl Surface2d for SizeProbe {
        fn resize(&mut self, backing: BackingSize, scale: f64) -> RelicResult<()> {
            self.0 = Some((backing, scale));
            Ok(())
        }
        fn fill_rect(&mut self, _rect: Rect, _paint: &Paint) {}
        fn stroke_path(&mut self, _path: &BezPath, _color: Rgba, _line_width: f64) {}
        fn fill_circle(&mut self, _center: Point, _radius: f64, _color: Rgba) {}
        fn present(&mut self) -> RelicResult<()> {
            Ok(())
        }
    }

    let mut s = SizeProbe::default();
    resize_surface(&mut s, Viewport::new(801.0, 600.5, 3.0)).unwrap();
    assert_eq!(
        s.0,
        Some((
            BackingSize {
                width: 1602,
                height: 1201
            },
            2.0
        ))
    );
    assert!(resize_surface(&mut s, Viewport::new(0.0, 10.0, 1.0)).is_err());
}
