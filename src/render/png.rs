use std::path::Path;

use crate::foundation::error::{RelicError, RelicResult};
use crate::render::FrameRGBA;

pub fn write_png(frame: &FrameRGBA, path: &Path) -> RelicResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            RelicError::surface(format!("create output dir '{}': {e}", parent.display()))
        })?;
    }

    let data = frame.to_straight_rgba8();
    image::save_buffer_with_format(
        path,
        &data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| RelicError::surface(format!("write png '{}': {e}", path.display())))?;
    tracing::debug!(path = %path.display(), "wrote png");
    Ok(())
}
