use std::path::{Path, PathBuf};

use crate::{
    core::{Canvas, DEFAULT_CANVAS},
    error::{PanoError, PanoResult},
};

/// Default number of columns cross-faded at each junction. 50 to 100 reads
/// well for 960-wide background art; 0 disables blending.
pub const DEFAULT_BLEND_WIDTH: u32 = 50;

/// A complete stitch run: ordered inputs, output path, canonical canvas and
/// blend width. Decouples configuration acquisition (CLI flags, JSON
/// manifest) from the compositing algorithm.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct StitchJob {
    /// Input images, in left-to-right panorama order.
    pub inputs: Vec<PathBuf>,
    /// Destination PNG path.
    pub output: PathBuf,
    #[serde(default = "default_canvas")]
    pub canvas: Canvas,
    #[serde(default = "default_blend_width")]
    pub blend_width: u32,
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

/// A naive merge run: source-over every input onto the first, no cross-fade.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MergeJob {
    /// Input images, bottom to top.
    pub inputs: Vec<PathBuf>,
    /// Destination PNG path.
    pub output: PathBuf,
    #[serde(default = "default_canvas")]
    pub canvas: Canvas,
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

fn default_canvas() -> Canvas {
    DEFAULT_CANVAS
}

fn default_blend_width() -> u32 {
    DEFAULT_BLEND_WIDTH
}

fn default_overwrite() -> bool {
    true
}

impl StitchJob {
    pub fn validate(&self) -> PanoResult<()> {
        validate_io(&self.inputs, &self.output)?;
        self.canvas.validate()
    }
}

impl MergeJob {
    pub fn validate(&self) -> PanoResult<()> {
        validate_io(&self.inputs, &self.output)?;
        self.canvas.validate()
    }
}

fn validate_io(inputs: &[PathBuf], output: &Path) -> PanoResult<()> {
    if inputs.is_empty() {
        return Err(PanoError::invalid_configuration("job has no input images"));
    }
    if output.as_os_str().is_empty() {
        return Err(PanoError::invalid_configuration(
            "job output path must be non-empty",
        ));
    }
    Ok(())
}

/// The numbered naming convention `"<base> NN.png"`: two-digit, 1-based
/// indices with a space separator.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ImageSequence {
    pub dir: PathBuf,
    pub base: String,
    pub count: u32,
}

impl ImageSequence {
    /// Expand into ordered paths `"<base> 01.png"` through `"<base> NN.png"`.
    pub fn resolve(&self) -> PanoResult<Vec<PathBuf>> {
        if self.count == 0 {
            return Err(PanoError::invalid_configuration(
                "image sequence count must be > 0",
            ));
        }
        if self.base.trim().is_empty() {
            return Err(PanoError::invalid_configuration(
                "image sequence base name must be non-empty",
            ));
        }

        Ok((1..=self.count)
            .map(|n| self.dir.join(format!("{} {:02}.png", self.base, n)))
            .collect())
    }
}
