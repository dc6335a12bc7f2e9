use super::*;
use crate::void::render_loop::VoidLoop;

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn digest_u64(bytes: &[u8]) -> u64 {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    for chunk in bytes.chunks(8) {
        let mut v = 0u64;
        for (i, &b) in chunk.iter().enumerate() {
            v |= (b as u64) << (i * 8);
        }
        state = mix64(state ^ v);
    }
    state
}

fn render(viewport: Viewport, ticks: usize, seed: u64) -> FrameRGBA {
    let mut surface = CpuSurface::new(viewport).unwrap();
    let mut lp = VoidLoop::new(40, seed);
    for _ in 0..ticks {
        lp.tick(&mut surface, viewport).unwrap();
    }
    surface.readback()
}

#[test]
fn new_surface_is_opaque_black_at_backing_size() {
    let surface = CpuSurface::new(Viewport::new(32.0, 16.5, 2.0)).unwrap();
    assert_eq!(
        surface.backing(),
        BackingSize {
            width: 64,
            height: 33
        }
    );
    let frame = surface.readback();
    assert_eq!(frame.data.len(), 64 * 33 * 4);
    assert!(frame.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn unavailable_surface_fails_fast() {
    assert!(CpuSurface::new(Viewport::new(0.0, 10.0, 1.0)).is_err());
    assert!(CpuSurface::new(Viewport::new(40_000.0, 10.0, 2.0)).is_err());
}

#[test]
fn void_frames_are_deterministic_and_nonblack() {
    let v = Viewport::new(96.0, 64.0, 1.0);
    let a = render(v, 12, 7);
    let b = render(v, 12, 7);
    assert!(a.premultiplied);
    assert_eq!(digest_u64(&a.data), digest_u64(&b.data));
    assert!(a.data.chunks_exact(4).any(|px| px[0] != 0 || px[1] != 0 || px[2] != 0));
    assert!(a.data.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn resize_reallocates_and_clears() {
    let v = Viewport::new(40.0, 30.0, 1.0);
    let mut surface = CpuSurface::new(v).unwrap();
    let mut lp = VoidLoop::new(10, 1);
    lp.tick(&mut surface, v).unwrap();
    assert_eq!(surface.presented_frames(), 1);

    let bigger = Viewport::new(50.0, 20.0, 1.5);
    resize_surface(&mut surface, bigger).unwrap();
    assert_eq!(
        surface.backing(),
        BackingSize {
            width: 75,
            height: 30
        }
    );
    assert_eq!(surface.scale(), 1.5);
    let frame = surface.readback();
    assert_eq!(frame.width, 75);
    assert!(frame.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn gradient_paint_is_cached_per_backing_size() {
    let v = Viewport::new(20.0, 10.0, 1.0);
    let mut surface = CpuSurface::new(v).unwrap();
    let g = crate::void::render_loop::vignette(v);
    surface.fill_rect(v.bounds(), &Paint::Radial(g.clone()));
    surface.fill_rect(v.bounds(), &Paint::Radial(g));
    assert_eq!(surface.gradient_cache.len(), 1);
    surface.present().unwrap();
}
