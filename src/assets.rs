//! The image store: the only place this crate touches the filesystem or an
//! image codec. Loading normalizes every input to the job's canonical
//! canvas; saving never leaves a partial file at the destination.

use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    core::{Canvas, Frame},
    error::{PanoError, PanoResult},
};

/// Read a file's raw bytes; a path that does not resolve is a
/// [`PanoError::MissingAsset`].
pub fn load_bytes(path: &Path) -> PanoResult<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| PanoError::missing_asset(format!("'{}': {e}", path.display())))
}

/// Convert a decoded image to RGBA8 at exactly the canvas size.
///
/// Inputs already at the canonical size pass through byte-for-byte; others
/// are resampled with Catmull-Rom.
pub fn normalize(img: image::DynamicImage, canvas: Canvas) -> PanoResult<Frame> {
    canvas.validate()?;

    let rgba = img.to_rgba8();
    let rgba = if rgba.dimensions() == (canvas.width, canvas.height) {
        rgba
    } else {
        image::imageops::resize(
            &rgba,
            canvas.width,
            canvas.height,
            image::imageops::FilterType::CatmullRom,
        )
    };

    Frame::from_rgba8(canvas.width, canvas.height, rgba.into_raw())
}

/// Load, decode and normalize one input image.
pub fn load_normalized(path: &Path, canvas: Canvas) -> PanoResult<Frame> {
    let bytes = load_bytes(path)?;
    let decoded = image::load_from_memory(&bytes)
        .with_context(|| format!("decode image '{}'", path.display()))?;
    let frame = normalize(decoded, canvas)?;

    // Unreachable if normalize honors its contract; checked anyway so a bad
    // frame can never reach the compositor.
    if !frame.size_matches(canvas) {
        return Err(PanoError::dimension_mismatch(format!(
            "'{}' normalized to {}x{}, expected {}x{}",
            path.display(),
            frame.width,
            frame.height,
            canvas.width,
            canvas.height
        )));
    }
    Ok(frame)
}

pub fn ensure_parent_dir(path: &Path) -> PanoResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            std::fs::remove_file(path).ok();
        }
    }
}

/// Encode `frame` as PNG and move it into place at `path`.
///
/// The encode happens fully in memory and the bytes land through a temporary
/// sibling plus rename, so the destination never holds a corrupt or partial
/// file. With `overwrite` false an existing destination is refused untouched.
pub fn save_png(frame: &Frame, path: &Path, overwrite: bool) -> PanoResult<()> {
    if !overwrite && path.exists() {
        return Err(PanoError::invalid_configuration(format!(
            "output file '{}' already exists",
            path.display()
        )));
    }

    let mut encoded = Vec::new();
    image::write_buffer_with_format(
        &mut Cursor::new(&mut encoded),
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("encode png for '{}'", path.display()))?;

    ensure_parent_dir(path)?;

    let tmp_path = temp_sibling(path);
    let mut guard = TempFileGuard(Some(tmp_path.clone()));
    std::fs::write(&tmp_path, &encoded)
        .with_context(|| format!("write '{}'", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("move output into place at '{}'", path.display()))?;
    guard.0 = None;
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "out".into());
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}
