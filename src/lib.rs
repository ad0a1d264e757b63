//! depthwire turns a color frame and its depth map into a displaced wireframe scene.
//!
//! The crate builds the scene procedurally and renders it through a pluggable backend.
//!
//! # Pipeline overview
//!
//! 1. **Load**: color and depth images enter the scene's image pool ([`load_image`])
//! 2. **Surface**: a plane scaled to the image aspect ratio gets the modifier stack
//!    subdivision -> displacement -> wireframe and two materials ([`build_surface`])
//! 3. **Rig**: camera on a pivot plus key and fill area lights, all facing the origin
//!    ([`build_rig`])
//! 4. **Render**: the still, then optionally a linear 360 degree turntable
//!    ([`render_still`], [`animate_turntable`], [`render_sequence`])
//!
//! [`run`] chains these steps for one frame; [`run_all`] repeats them for every frame in a
//! directory.
//!
//! Every builder takes the [`SceneAsset`] explicitly and returns typed handles into it.
#![forbid(unsafe_code)]

pub mod animation;
pub mod assets;
pub mod foundation;
pub mod pipeline;
pub mod render;
pub mod scene;

pub use animation::fcurve::{AnimationTrack, ChannelPath, FCurve, Interpolation, Keyframe};
pub use animation::turntable::animate_turntable;
pub use assets::image::{ChannelLayout, ImageInfo, ImageResource, load_image};
pub use foundation::core::{Canvas, FrameIndex, FrameRange, LinearRgb};
pub use foundation::error::{DepthwireError, DepthwireResult};
pub use pipeline::{
    InputPaths, PipelineConfig, RunOutputs, collect_frames, dump_scene, run, run_all,
};
pub use render::backend::{BackendKind, FrameRGBA, RenderBackend, create_backend};
pub use render::output::{SequenceOutput, render_sequence, render_still, write_png};
pub use render::preview::PreviewBackend;
pub use render::settings::{RenderSettings, configure_render, frame_file_name, sequence_dir};
pub use scene::asset::{
    AnimationId, CameraId, ImageId, LightId, MaterialId, MeshId, ObjectData, ObjectId,
    SceneAsset, SceneObject, TextureId, Transform,
};
pub use scene::geometry::{SurfaceHandles, SurfaceParams, build_surface};
pub use scene::material::{MaterialPair, MaterialSpec, build_materials};
pub use scene::modifiers::{EvalMode, Modifier, ModifierKind, ModifierStack};
pub use scene::rig::{RigHandles, build_rig};
