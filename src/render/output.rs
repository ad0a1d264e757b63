use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::{
        core::FrameIndex,
        error::{DepthwireError, DepthwireResult},
    },
    render::{
        backend::{FrameRGBA, RenderBackend},
        settings::{frame_file_name, sequence_dir},
    },
    scene::asset::SceneAsset,
};

/// Frame rendered by [`render_still`].
pub const STILL_FRAME: FrameIndex = FrameIndex(1);

/// Files written by [`render_sequence`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SequenceOutput {
    pub dir: PathBuf,
    /// Frame files in render order.
    pub frames: Vec<PathBuf>,
}

/// Encode `frame` as a straight-alpha RGBA PNG at `path`.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> DepthwireResult<()> {
    let data = frame.to_straight_rgba8();
    image::save_buffer_with_format(
        path,
        &data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn output_path(scene: &SceneAsset) -> DepthwireResult<&Path> {
    scene
        .render
        .output_path
        .as_deref()
        .ok_or_else(|| DepthwireError::precursor_missing("render output path is not configured"))
}

/// Render the still frame to the configured output path.
#[tracing::instrument(skip(scene, backend))]
pub fn render_still(
    scene: &SceneAsset,
    backend: &mut dyn RenderBackend,
) -> DepthwireResult<PathBuf> {
    let path = output_path(scene)?.to_path_buf();
    let frame = backend.render_frame(scene, STILL_FRAME)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    write_png(&path, &frame)?;

    tracing::info!(path = %path.display(), "wrote still");
    Ok(path)
}

/// Render every frame of the turntable into the sequence directory next to the still.
///
/// Requires the scene's frame range and an animation track, both set by the turntable builder.
#[tracing::instrument(skip(scene, backend))]
pub fn render_sequence(
    scene: &SceneAsset,
    backend: &mut dyn RenderBackend,
) -> DepthwireResult<SequenceOutput> {
    let range = scene.frame_range().ok_or_else(|| {
        DepthwireError::precursor_missing("no frame range; turntable animation was not built")
    })?;
    if scene.animations().next().is_none() {
        return Err(DepthwireError::precursor_missing(
            "no animation track; turntable animation was not built",
        ));
    }

    let dir = sequence_dir(output_path(scene)?);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("create sequence dir '{}'", dir.display()))?;

    let mut frames = Vec::new();
    for f in range.frames() {
        let frame = backend.render_frame(scene, f)?;
        let path = dir.join(frame_file_name(f.0));
        write_png(&path, &frame)?;
        tracing::debug!(frame = f.0, path = %path.display(), "wrote sequence frame");
        frames.push(path);
    }

    tracing::info!(dir = %dir.display(), frames = frames.len(), "wrote turntable sequence");
    Ok(SequenceOutput { dir, frames })
}

#[cfg(test)]
#[path = "../../tests/unit/render/output.rs"]
mod tests;
