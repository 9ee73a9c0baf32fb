//! End-to-end job runners: load and normalize every input, compose, save.
//! No error is recovered locally; the first failure aborts the run before
//! anything is written to the destination.

use std::path::PathBuf;

use crate::{
    assets,
    core::{Canvas, Frame},
    error::PanoResult,
    model::{MergeJob, StitchJob},
    stitch,
};

#[tracing::instrument(skip(job), fields(inputs = job.inputs.len(), blend = job.blend_width))]
pub fn run_stitch(job: &StitchJob) -> PanoResult<()> {
    job.validate()?;

    let frames = load_inputs(&job.inputs, job.canvas)?;
    let pano = stitch::compose(&frames, job.blend_width)?;
    assets::save_png(&pano, &job.output, job.overwrite)?;

    tracing::info!(
        output = %job.output.display(),
        width = pano.width,
        height = pano.height,
        "stitched panorama"
    );
    Ok(())
}

#[tracing::instrument(skip(job), fields(inputs = job.inputs.len()))]
pub fn run_merge(job: &MergeJob) -> PanoResult<()> {
    job.validate()?;

    let frames = load_inputs(&job.inputs, job.canvas)?;
    let merged = stitch::overlay(&frames)?;
    assets::save_png(&merged, &job.output, job.overwrite)?;

    tracing::info!(output = %job.output.display(), "merged images");
    Ok(())
}

fn load_inputs(paths: &[PathBuf], canvas: Canvas) -> PanoResult<Vec<Frame>> {
    let mut frames = Vec::with_capacity(paths.len());
    for path in paths {
        tracing::debug!(path = %path.display(), "loading input image");
        frames.push(assets::load_normalized(path, canvas)?);
    }
    Ok(frames)
}
