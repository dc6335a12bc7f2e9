use crate::foundation::core::{BackingSize, BezPath, Point, Rect, Rgba, Rgba8Premul, Viewport};
use crate::foundation::error::RelicResult;

/// 2D immediate-mode drawing target for the void loop.
///
/// Coordinates passed to drawing calls are CSS pixels; implementations apply
/// the device-pixel scale set by the last [`Surface2d::resize`].
pub trait Surface2d {
    /// Resize the backing pixel buffer and reset the scaling transform to `scale`.
    fn resize(&mut self, backing: BackingSize, scale: f64) -> RelicResult<()>;

    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    fn stroke_path(&mut self, path: &BezPath, color: Rgba, line_width: f64);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);

    /// End of frame.
    fn present(&mut self) -> RelicResult<()>;
}

/// Size the surface for `viewport`. Runs before the loop starts and on every
/// resize notification, whether or not the loop is ticking.
pub fn resize_surface<S: Surface2d + ?Sized>(surface: &mut S, viewport: Viewport) -> RelicResult<()> {
    viewport.validate()?;
    let backing = viewport.backing_size();
    tracing::debug!(
        width = backing.width,
        height = backing.height,
        scale = viewport.scale(),
        "resize surface"
    );
    surface.resize(backing, viewport.scale())
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Radial(RadialGradient),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

/// Two-circle radial gradient with canvas semantics: colour at `t` lies on the
/// circle interpolated between the start and end circles; `t` is padded to `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub start_center: Point,
    pub start_radius: f64,
    pub end_center: Point,
    pub end_radius: f64,
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(start_center: Point, start_radius: f64, end_center: Point, end_radius: f64) -> Self {
        Self {
            start_center,
            start_radius,
            end_center,
            end_radius,
            stops: Vec::new(),
        }
    }

    pub fn with_stop(mut self, offset: f64, color: Rgba) -> Self {
        let offset = offset.clamp(0.0, 1.0);
        let at = self.stops.partition_point(|s| s.offset <= offset);
        self.stops.insert(at, ColorStop { offset, color });
        self
    }

    /// Gradient parameter for `p`, or `None` where the gradient paints nothing.
    pub fn param_at(&self, p: Point) -> Option<f64> {
        let cd = self.end_center - self.start_center;
        let pd = p - self.start_center;
        let r0 = self.start_radius;
        let dr = self.end_radius - r0;

        let a = cd.dot(cd) - dr * dr;
        let b = pd.dot(cd) + r0 * dr;
        let c = pd.dot(pd) - r0 * r0;

        let t = if a.abs() < 1e-9 {
            if b.abs() < 1e-9 {
                return None;
            }
            c / (2.0 * b)
        } else {
            let disc = b * b - a * c;
            if disc < 0.0 {
                return None;
            }
            let sq = disc.sqrt();
            let (t1, t2) = ((b + sq) / a, (b - sq) / a);
            let (hi, lo) = if t1 >= t2 { (t1, t2) } else { (t2, t1) };
            if r0 + hi * dr >= 0.0 {
                hi
            } else if r0 + lo * dr >= 0.0 {
                lo
            } else {
                return None;
            }
        };
        if r0 + t * dr < 0.0 {
            return None;
        }
        Some(t.clamp(0.0, 1.0))
    }

    /// Colour at parameter `t`, interpolated in premultiplied space.
    pub fn color_at(&self, t: f64) -> Rgba8Premul {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Rgba8Premul::transparent();
        };
        if t <= first.offset {
            return first.color.to_premul();
        }
        if t >= last.offset {
            return last.color.to_premul();
        }
        for pair in self.stops.windows(2) {
            let (s0, s1) = (pair[0], pair[1]);
            if t <= s1.offset {
                let span = s1.offset - s0.offset;
                let u = if span <= 0.0 { 1.0 } else { (t - s0.offset) / span };
                let a = s0.color.to_premul();
                let b = s1.color.to_premul();
                let lerp = |x: u8, y: u8| -> u8 {
                    let xf = f64::from(x);
                    (xf + (f64::from(y) - xf) * u).round().clamp(0.0, 255.0) as u8
                };
                return Rgba8Premul {
                    r: lerp(a.r, b.r),
                    g: lerp(a.g, b.g),
                    b: lerp(a.b, b.b),
                    a: lerp(a.a, b.a),
                };
            }
        }
        last.color.to_premul()
    }

    pub fn sample(&self, p: Point) -> Rgba8Premul {
        match self.param_at(p) {
            Some(t) => self.color_at(t),
            None => Rgba8Premul::transparent(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/void/surface.rs"]
mod tests;
