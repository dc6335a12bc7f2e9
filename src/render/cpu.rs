use std::collections::HashMap;
use std::sync::Arc;

use kurbo::Shape as _;

use crate::foundation::core::{Affine, BackingSize, BezPath, Point, Rect, Rgba, Rgba8Premul, Viewport};
use crate::foundation::error::{RelicError, RelicResult};
use crate::render::FrameRGBA;
use crate::render::composite::{fill, over_in_place};
use crate::void::surface::{Paint, RadialGradient, Surface2d, resize_surface};

const CIRCLE_TOLERANCE: f64 = 0.1;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct GradientKey {
    geometry: [u64; 6],
    stops: Vec<(u64, [u8; 4])>,
    backing: BackingSize,
}

impl GradientKey {
    fn new(g: &RadialGradient, backing: BackingSize) -> Self {
        Self {
            geometry: [
                g.start_center.x.to_bits(),
                g.start_center.y.to_bits(),
                g.start_radius.to_bits(),
                g.end_center.x.to_bits(),
                g.end_center.y.to_bits(),
                g.end_radius.to_bits(),
            ],
            stops: g
                .stops
                .iter()
                .map(|s| (s.offset.to_bits(), s.color.to_rgba8()))
                .collect(),
            backing,
        }
    }
}

/// CPU raster surface powered by `vello_cpu`.
///
/// Draw calls of a frame are recorded into one render context under the
/// device-pixel transform. `present` rasterises them into a scratch pixmap and
/// composites that over the persistent canvas, so earlier frames show through
/// the translucent layers. The canvas is opaque and starts black.
pub struct CpuSurface {
    backing: BackingSize,
    width: u16,
    height: u16,
    scale: f64,
    canvas: vello_cpu::Pixmap,
    scratch: vello_cpu::Pixmap,
    ctx: vello_cpu::RenderContext,
    gradient_cache: HashMap<GradientKey, vello_cpu::Image>,
    presented: u64,
}

impl CpuSurface {
    /// Acquire a surface sized for `viewport`. Fails for empty or oversized backing buffers.
    pub fn new(viewport: Viewport) -> RelicResult<Self> {
        let (width, height) = checked_dims(viewport.backing_size())?;
        let mut surface = Self {
            backing: viewport.backing_size(),
            width,
            height,
            scale: viewport.scale(),
            canvas: vello_cpu::Pixmap::new(width, height),
            scratch: vello_cpu::Pixmap::new(width, height),
            ctx: vello_cpu::RenderContext::new(width, height),
            gradient_cache: HashMap::new(),
            presented: 0,
        };
        resize_surface(&mut surface, viewport)?;
        Ok(surface)
    }

    pub fn backing(&self) -> BackingSize {
        self.backing
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn presented_frames(&self) -> u64 {
        self.presented
    }

    pub fn readback(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.backing.width,
            height: self.backing.height,
            data: self.canvas.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn device_transform(&self) -> vello_cpu::kurbo::Affine {
        affine_to_cpu(Affine::scale(self.scale))
    }

    fn gradient_paint(&mut self, gradient: &RadialGradient) -> RelicResult<vello_cpu::Image> {
        let key = GradientKey::new(gradient, self.backing);
        if let Some(img) = self.gradient_cache.get(&key).cloned() {
            return Ok(img);
        }

        let (w, h) = (self.backing.width, self.backing.height);
        let mut bytes = vec![0u8; self.backing.pixel_count().saturating_mul(4)];
        let inv_scale = 1.0 / self.scale;
        for y in 0..h {
            for x in 0..w {
                let p = Point::new(
                    (f64::from(x) + 0.5) * inv_scale,
                    (f64::from(y) + 0.5) * inv_scale,
                );
                let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
                bytes[idx..idx + 4].copy_from_slice(&gradient.sample(p).to_array());
            }
        }
        let img = rgba_premul_to_image(&bytes, w, h)?;
        self.gradient_cache.insert(key, img.clone());
        Ok(img)
    }
}

impl Surface2d for CpuSurface {
    fn resize(&mut self, backing: BackingSize, scale: f64) -> RelicResult<()> {
        let (width, height) = checked_dims(backing)?;
        if (width, height) != (self.width, self.height) {
            self.canvas = vello_cpu::Pixmap::new(width, height);
            self.scratch = vello_cpu::Pixmap::new(width, height);
            self.ctx = vello_cpu::RenderContext::new(width, height);
        } else {
            self.ctx.reset();
        }
        self.backing = backing;
        self.width = width;
        self.height = height;
        self.scale = scale;
        self.gradient_cache.clear();
        fill(
            self.canvas.data_as_u8_slice_mut(),
            Rgba8Premul::opaque_black().to_array(),
        );
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match paint {
            Paint::Solid(color) => {
                self.ctx.set_transform(self.device_transform());
                self.ctx.set_paint(color_to_cpu(*color));
                self.ctx.fill_rect(&rect_to_cpu(rect));
            }
            Paint::Radial(gradient) => {
                let img = match self.gradient_paint(gradient) {
                    Ok(img) => img,
                    Err(err) => {
                        tracing::warn!(%err, "skipping gradient fill");
                        return;
                    }
                };
                // The gradient image is rasterised in device pixels.
                let device = Affine::scale(self.scale).transform_rect_bbox(rect);
                self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                self.ctx.set_paint(img);
                self.ctx.fill_rect(&rect_to_cpu(device));
            }
        }
    }

    fn stroke_path(&mut self, path: &BezPath, color: Rgba, line_width: f64) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(self.device_transform());
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(line_width));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let circle = kurbo::Circle::new(center, radius).to_path(CIRCLE_TOLERANCE);
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(self.device_transform());
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_path(&bezpath_to_cpu(&circle));
    }

    fn present(&mut self) -> RelicResult<()> {
        self.ctx.flush();
        self.scratch.data_as_u8_slice_mut().fill(0);
        self.ctx.render_to_pixmap(&mut self.scratch);
        over_in_place(
            self.canvas.data_as_u8_slice_mut(),
            self.scratch.data_as_u8_slice(),
        )?;
        self.ctx.reset();
        self.presented += 1;
        Ok(())
    }
}

fn checked_dims(backing: BackingSize) -> RelicResult<(u16, u16)> {
    if backing.is_empty() {
        return Err(RelicError::surface(format!(
            "drawable surface unavailable: backing size {}x{}",
            backing.width, backing.height
        )));
    }
    let w: u16 = backing
        .width
        .try_into()
        .map_err(|_| RelicError::surface("surface width exceeds u16"))?;
    let h: u16 = backing
        .height
        .try_into()
        .map_err(|_| RelicError::surface("surface height exceeds u16"))?;
    Ok((w, h))
}

fn color_to_cpu(c: Rgba) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = c.to_rgba8();
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn rgba_premul_to_image(bytes: &[u8], width: u32, height: u32) -> RelicResult<vello_cpu::Image> {
    let w: u16 = width
        .try_into()
        .map_err(|_| RelicError::surface("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| RelicError::surface("pixmap height exceeds u16"))?;
    if bytes.len() != (width as usize) * (height as usize) * 4 {
        return Err(RelicError::surface("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
