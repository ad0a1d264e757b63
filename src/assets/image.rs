use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    foundation::error::{DepthwireError, DepthwireResult},
    scene::asset::{ImageId, SceneAsset},
};

/// Pixel dimensions of a loaded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ImageInfo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageInfo {
    /// `width / height`, or [`DepthwireError::DegenerateInput`] when the height is zero.
    pub fn checked_aspect_ratio(self) -> DepthwireResult<f32> {
        if self.height == 0 {
            return Err(DepthwireError::degenerate_input(format!(
                "image is {}x{}; aspect ratio undefined",
                self.width, self.height
            )));
        }
        Ok(self.width as f32 / self.height as f32)
    }

    /// `width / height`, falling back to 1.0 for zero-height images.
    pub fn aspect_ratio(self) -> f32 {
        match self.checked_aspect_ratio() {
            Ok(aspect) => aspect,
            Err(err) => {
                tracing::warn!(%err, "using aspect ratio 1.0");
                1.0
            }
        }
    }
}

/// Channel layout of the encoded source, before expansion to RGBA8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ChannelLayout {
    Gray,
    GrayAlpha,
    Rgb,
    Rgba,
}

impl ChannelLayout {
    fn of(color: image::ColorType) -> Self {
        use image::ColorType;

        match color {
            ColorType::L8 | ColorType::L16 => Self::Gray,
            ColorType::La8 | ColorType::La16 => Self::GrayAlpha,
            ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => Self::Rgb,
            _ => Self::Rgba,
        }
    }

    /// Whether the layout carries a single luminance channel.
    pub fn is_single_channel(self) -> bool {
        matches!(self, Self::Gray | Self::GrayAlpha)
    }
}

#[derive(Clone, Debug, serde::Serialize)]
/// Decoded bitmap owned by a [`SceneAsset`].
///
/// Holds straight-alpha RGBA8 pixels (the texture source) and a per-pixel intensity plane in
/// `[0, 1]` (mean of RGB) used as a height field.
pub struct ImageResource {
    /// Datablock name.
    pub name: String,
    /// File the image was decoded from, if any.
    pub source: Option<PathBuf>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Layout of the encoded source.
    pub layout: ChannelLayout,
    #[serde(skip)]
    rgba8: Arc<Vec<u8>>,
    #[serde(skip)]
    intensity: Arc<Vec<f32>>,
}

impl ImageResource {
    /// Decode encoded image bytes.
    pub fn decode(name: impl Into<String>, bytes: &[u8]) -> DepthwireResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
        let layout = ChannelLayout::of(dyn_img.color());
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut out = Self::from_rgba8(name, width, height, rgba.into_raw())?;
        out.layout = layout;
        Ok(out)
    }

    /// Wrap tightly packed straight-alpha RGBA8 pixels.
    pub fn from_rgba8(
        name: impl Into<String>,
        width: u32,
        height: u32,
        rgba8: Vec<u8>,
    ) -> DepthwireResult<Self> {
        if rgba8.len() != width as usize * height as usize * 4 {
            return Err(DepthwireError::validation(format!(
                "rgba8 buffer of {} bytes does not match {width}x{height}",
                rgba8.len()
            )));
        }

        let intensity = rgba8
            .chunks_exact(4)
            .map(|px| (f32::from(px[0]) + f32::from(px[1]) + f32::from(px[2])) / (3.0 * 255.0))
            .collect();

        Ok(Self {
            name: name.into(),
            source: None,
            width,
            height,
            layout: ChannelLayout::Rgba,
            rgba8: Arc::new(rgba8),
            intensity: Arc::new(intensity),
        })
    }

    pub fn info(&self) -> ImageInfo {
        ImageInfo {
            width: self.width,
            height: self.height,
        }
    }

    pub fn rgba8(&self) -> &[u8] {
        &self.rgba8
    }

    pub fn intensity(&self) -> &[f32] {
        &self.intensity
    }

    /// Stretch the intensity plane so its minimum maps to 0 and its maximum to 1.
    ///
    /// A constant plane becomes all zeros.
    pub fn normalize_intensity(&mut self) {
        let (lo, hi) = self
            .intensity
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        let normalized: Vec<f32> = if hi - lo < 1e-6 {
            vec![0.0; self.intensity.len()]
        } else {
            self.intensity.iter().map(|v| (v - lo) / (hi - lo)).collect()
        };
        self.intensity = Arc::new(normalized);
    }

    /// Bilinear RGBA sample at texture coordinates `(u, v)`, channels in `[0, 1]`.
    ///
    /// `v = 1` is the top image row. Coordinates outside `[0, 1]` clamp to the edge.
    pub fn sample_rgba(&self, u: f32, v: f32) -> [f32; 4] {
        let mut out = [0.0; 4];
        for (c, slot) in out.iter_mut().enumerate() {
            *slot = self.bilinear(u, v, |idx| f32::from(self.rgba8[idx * 4 + c]) / 255.0);
        }
        out
    }

    /// Bilinear intensity sample at texture coordinates `(u, v)`.
    pub fn sample_intensity(&self, u: f32, v: f32) -> f32 {
        self.bilinear(u, v, |idx| self.intensity[idx])
    }

    fn bilinear(&self, u: f32, v: f32, fetch: impl Fn(usize) -> f32) -> f32 {
        if self.width == 0 || self.height == 0 {
            return 0.0;
        }

        let max_x = (self.width - 1) as f32;
        let max_y = (self.height - 1) as f32;
        let x = (u * self.width as f32 - 0.5).clamp(0.0, max_x);
        let y = ((1.0 - v) * self.height as f32 - 0.5).clamp(0.0, max_y);

        let x0 = x.floor() as usize;
        let y0 = y.floor() as usize;
        let x1 = (x0 + 1).min(self.width as usize - 1);
        let y1 = (y0 + 1).min(self.height as usize - 1);
        let tx = x - x0 as f32;
        let ty = y - y0 as f32;

        let w = self.width as usize;
        let top = fetch(y0 * w + x0) * (1.0 - tx) + fetch(y0 * w + x1) * tx;
        let bottom = fetch(y1 * w + x0) * (1.0 - tx) + fetch(y1 * w + x1) * tx;
        top * (1.0 - ty) + bottom * ty
    }
}

/// Load an image file into the scene's image pool.
///
/// Fails with [`DepthwireError::MissingInput`] when `path` does not exist. The decoded pixels stay
/// in the pool so later builders can bind them as textures without reloading.
#[tracing::instrument(skip(scene))]
pub fn load_image(
    scene: &mut SceneAsset,
    path: &Path,
    name: &str,
) -> DepthwireResult<(ImageId, ImageInfo)> {
    if !path.exists() {
        return Err(DepthwireError::missing_input(format!("image '{name}'"), path));
    }

    let bytes = std::fs::read(path)
        .with_context(|| format!("read image bytes from '{}'", path.display()))?;
    let mut resource = ImageResource::decode(name, &bytes)
        .map_err(|e| DepthwireError::Other(anyhow::anyhow!("{e} ('{}')", path.display())))?;
    resource.source = Some(path.to_path_buf());

    let info = resource.info();
    tracing::debug!(width = info.width, height = info.height, layout = ?resource.layout, "decoded image");
    let id = scene.add_image(resource);
    Ok((id, info))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/image.rs"]
mod tests;
