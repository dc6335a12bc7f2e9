use super::*;

#[test]
fn seeded_field_matches_requested_ranges() {
    let mut rng = Rng64::new(3);
    let field = ParticleField::seeded(DEFAULT_PARTICLE_COUNT, &mut rng);
    assert_eq!(field.len(), 140);
    for p in field.iter() {
        assert!((0.0..1.0).contains(&p.x));
        assert!((0.0..1.0).contains(&p.y));
        assert!(p.vx.abs() <= MAX_SPEED / 2.0);
        assert!(p.vy.abs() <= MAX_SPEED / 2.0);
        assert!((0.4..2.6).contains(&p.r));
    }
}

#[test]
fn wrap_is_toroidal_not_bounce() {
    let mut p = Particle {
        x: 0.0001,
        y: 0.9999,
        vx: -0.0005,
        vy: 0.0005,
        r: 1.0,
    };
    p.step();
    assert_eq!(p.x, 1.0);
    assert_eq!(p.y, 0.0);
    assert_eq!(p.vx, -0.0005);
    assert_eq!(p.vy, 0.0005);
}

#[test]
fn positions_stay_in_unit_square_over_many_steps() {
    let mut rng = Rng64::new(99);
    let mut field = ParticleField::seeded(64, &mut rng);
    for _ in 0..20_000 {
        for p in field.iter_mut() {
            p.step();
            assert!((0.0..=1.0).contains(&p.x));
            assert!((0.0..=1.0).contains(&p.y));
        }
    }
    assert_eq!(field.len(), 64);
}

#[test]
fn pulse_is_bounded() {
    for t in 0..2000 {
        for x in [0.0, 0.13, 0.5, 0.99, 1.0] {
            let v = pulse(t, x);
            assert!((0.35..=1.0 + 1e-12).contains(&v));
        }
    }
    assert!((pulse(0, 0.0) - 0.35).abs() < 1e-12);
}
