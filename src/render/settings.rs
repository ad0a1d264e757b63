use std::path::{Path, PathBuf};

use crate::{
    assets::image::ImageInfo,
    foundation::core::{Canvas, LinearRgb},
    scene::asset::SceneAsset,
};

/// Background color of rendered frames (scene-linear).
pub const WORLD_COLOR: LinearRgb = LinearRgb::new(0.02, 0.02, 0.03);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum FileFormat {
    Png,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ColorMode {
    Rgba,
}

/// Output settings stored on the scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderSettings {
    /// Resolution at 100%.
    pub resolution: Canvas,
    pub resolution_percentage: u32,
    pub file_format: FileFormat,
    pub color_mode: ColorMode,
    /// Still image path; `None` until [`configure_render`] runs.
    pub output_path: Option<PathBuf>,
    /// Transparent film drops the world background from the alpha channel.
    pub film_transparent: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            resolution: Canvas {
                width: 1920,
                height: 1080,
            },
            resolution_percentage: 100,
            file_format: FileFormat::Png,
            color_mode: ColorMode::Rgba,
            output_path: None,
            film_transparent: false,
        }
    }
}

impl RenderSettings {
    /// Effective pixel size after applying the percentage.
    pub fn effective_resolution(&self) -> Canvas {
        let pct = u64::from(self.resolution_percentage);
        let scale = |v: u32| ((u64::from(v) * pct) / 100) as u32;
        Canvas {
            width: scale(self.resolution.width),
            height: scale(self.resolution.height),
        }
    }
}

/// Directory holding the turntable frames of `still`: its path without extension plus
/// `_turntable`.
pub fn sequence_dir(still: &Path) -> PathBuf {
    let stem = still.with_extension("");
    let mut name = stem.into_os_string();
    name.push("_turntable");
    PathBuf::from(name)
}

/// File name of sequence frame `frame` (1-based), e.g. `tt_0001.png`.
pub fn frame_file_name(frame: u64) -> String {
    format!("tt_{frame:04}.png")
}

/// Point the scene's output at `still_path` with the color image's resolution, PNG RGBA and an
/// opaque dark background.
#[tracing::instrument(skip(scene))]
pub fn configure_render(scene: &mut SceneAsset, still_path: &Path, info: ImageInfo) {
    scene.render = RenderSettings {
        resolution: Canvas {
            width: info.width,
            height: info.height,
        },
        resolution_percentage: 100,
        file_format: FileFormat::Png,
        color_mode: ColorMode::Rgba,
        output_path: Some(still_path.to_path_buf()),
        film_transparent: false,
    };
    scene.world.color = WORLD_COLOR;
}

#[cfg(test)]
#[path = "../../tests/unit/render/settings.rs"]
mod tests;
