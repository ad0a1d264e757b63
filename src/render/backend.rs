use crate::{
    foundation::{core::FrameIndex, error::DepthwireResult},
    scene::asset::SceneAsset,
};

/// One rendered frame in row-major RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixel data, as PNG expects.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// Engine that turns a built scene into pixels.
pub trait RenderBackend {
    /// Render `frame` through the scene's active camera at the scene's output resolution.
    fn render_frame(&mut self, scene: &SceneAsset, frame: FrameIndex) -> DepthwireResult<FrameRGBA>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BackendKind {
    /// CPU rasterizer with direct lighting only.
    #[default]
    Preview,
}

pub fn create_backend(kind: BackendKind) -> DepthwireResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Preview => Ok(Box::new(crate::render::preview::PreviewBackend::new())),
    }
}
