#![forbid(unsafe_code)]

//! Offline panorama compositor for fixed-size background art.
//!
//! Every input is normalized to one canonical canvas size, then spliced left
//! to right with a linear cross-fade over the overlapping columns at each
//! junction, so seams are visually imperceptible while everything outside a
//! junction reproduces the source byte-for-byte. A blend width of 0 selects
//! the non-blending path; [`overlay`] is the plain source-over merge variant.

pub mod assets;
pub mod composite;
pub mod core;
pub mod error;
pub mod mask;
pub mod model;
pub mod pipeline;
pub mod stitch;

pub use crate::core::{Canvas, DEFAULT_CANVAS, Frame};
pub use crate::error::{PanoError, PanoResult};
pub use crate::mask::GradientMask;
pub use crate::model::{DEFAULT_BLEND_WIDTH, ImageSequence, MergeJob, StitchJob};
pub use crate::pipeline::{run_merge, run_stitch};
pub use crate::stitch::{clamp_blend_width, compose, overlay, stitched_width};
