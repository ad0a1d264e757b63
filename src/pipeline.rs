use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    animation::turntable::animate_turntable,
    assets::image::load_image,
    foundation::error::{DepthwireError, DepthwireResult},
    render::{
        backend::{BackendKind, RenderBackend},
        output::{SequenceOutput, render_sequence, render_still},
        settings::configure_render,
    },
    scene::{
        asset::SceneAsset,
        geometry::{SurfaceHandles, SurfaceParams, build_surface},
        rig::{RigHandles, build_rig},
    },
};

/// Every parameter of one run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding `frames/` and `depth/`.
    pub base_dir: PathBuf,
    /// Frame identifier (file stem under `frames/`).
    pub frame: String,
    /// Still output path; defaults to `<base_dir>/wireframe.png`.
    pub out: Option<PathBuf>,
    /// Turntable length in frames; 0 disables the turntable.
    pub turntable: u64,
    #[serde(flatten)]
    pub surface: SurfaceParams,
    /// Stretch the depth map to the full 0..1 range before displacing.
    pub normalize_depth: bool,
    pub backend: BackendKind,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            frame: "frame_001".to_string(),
            out: None,
            turntable: 0,
            surface: SurfaceParams::default(),
            normalize_depth: false,
            backend: BackendKind::Preview,
        }
    }
}

impl PipelineConfig {
    /// Load a config from a JSON file; absent keys take their defaults.
    pub fn from_json_file(path: &Path) -> DepthwireResult<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("open config '{}'", path.display()))?;
        let config = serde_json::from_reader(std::io::BufReader::new(f))
            .with_context(|| format!("parse config JSON '{}'", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> DepthwireResult<()> {
        if self.frame.is_empty() {
            return Err(DepthwireError::validation("frame identifier must not be empty"));
        }
        if self.frame.contains(['/', '\\']) {
            return Err(DepthwireError::validation(format!(
                "frame identifier '{}' must not contain path separators",
                self.frame
            )));
        }
        self.surface.validate()
    }
}

/// Resolved input and output locations of one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputPaths {
    pub color: PathBuf,
    pub depth: PathBuf,
    pub still: PathBuf,
}

impl InputPaths {
    /// Derive the file layout from `config`; both input images must exist.
    pub fn resolve(config: &PipelineConfig) -> DepthwireResult<Self> {
        let base = &config.base_dir;
        let color = base.join("frames").join(format!("{}.jpg", config.frame));
        let depth = base
            .join("depth")
            .join(format!("{}_depth.jpg", config.frame));
        let still = config
            .out
            .clone()
            .unwrap_or_else(|| base.join("wireframe.png"));

        if !color.exists() {
            return Err(DepthwireError::missing_input("color image", color));
        }
        if !depth.exists() {
            return Err(DepthwireError::missing_input("depth image", depth));
        }
        Ok(Self {
            color,
            depth,
            still,
        })
    }
}

/// What a run produced.
#[derive(Clone, Debug)]
pub struct RunOutputs {
    pub still: PathBuf,
    pub sequence: Option<SequenceOutput>,
    pub surface: SurfaceHandles,
    pub rig: RigHandles,
}

fn image_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Build the scene for `config` from scratch and render it.
///
/// The scene is cleared first and stays empty when an input file is missing. The still is
/// written before any turntable frame is rendered.
#[tracing::instrument(skip_all, fields(frame = %config.frame))]
pub fn run(
    config: &PipelineConfig,
    scene: &mut SceneAsset,
    backend: &mut dyn RenderBackend,
) -> DepthwireResult<RunOutputs> {
    config.validate()?;
    scene.clear();
    let paths = InputPaths::resolve(config)?;

    let (color, info) = load_image(scene, &paths.color, &image_name(&paths.color))?;
    let (depth, _) = load_image(scene, &paths.depth, &image_name(&paths.depth))?;
    if config.normalize_depth {
        scene.image_mut(depth)?.normalize_intensity();
    }

    let surface = build_surface(scene, color, depth, config.surface)?;
    let rig = build_rig(scene)?;
    configure_render(scene, &paths.still, info);

    let still = render_still(scene, backend)?;
    let sequence = if config.turntable > 0 {
        animate_turntable(scene, rig.pivot, config.turntable)?;
        Some(render_sequence(scene, backend)?)
    } else {
        None
    };

    Ok(RunOutputs {
        still,
        sequence,
        surface,
        rig,
    })
}

/// Frame identifiers of every `*.jpg` under `<base>/frames`, sorted.
///
/// The extension match is exact, so `shot.JPG` is not a frame; inputs are always resolved as
/// `<frame>.jpg`.
pub fn collect_frames(base: &Path) -> DepthwireResult<Vec<String>> {
    let dir = base.join("frames");
    if !dir.is_dir() {
        return Err(DepthwireError::missing_input("frames directory", dir));
    }

    let mut frames = Vec::new();
    for entry in std::fs::read_dir(&dir).with_context(|| format!("read '{}'", dir.display()))? {
        let path = entry
            .with_context(|| format!("read entry of '{}'", dir.display()))?
            .path();
        let is_jpg = path.extension().is_some_and(|e| e == "jpg");
        if let (true, Some(stem)) = (is_jpg, path.file_stem()) {
            frames.push(stem.to_string_lossy().into_owned());
        }
    }
    frames.sort();
    Ok(frames)
}

/// Run every frame under `<base>/frames`, each into `<base>/wireframe/<frame>.png`.
#[tracing::instrument(skip_all)]
pub fn run_all(
    config: &PipelineConfig,
    scene: &mut SceneAsset,
    backend: &mut dyn RenderBackend,
) -> DepthwireResult<Vec<RunOutputs>> {
    if config.out.is_some() {
        return Err(DepthwireError::validation(
            "an explicit output path cannot be combined with batch mode",
        ));
    }

    let frames = collect_frames(&config.base_dir)?;
    if frames.is_empty() {
        tracing::warn!(base = %config.base_dir.display(), "no frames found");
    }

    let out_dir = config.base_dir.join("wireframe");
    let mut outputs = Vec::with_capacity(frames.len());
    for frame in frames {
        let per_frame = PipelineConfig {
            out: Some(out_dir.join(format!("{frame}.png"))),
            frame,
            ..config.clone()
        };
        outputs.push(run(&per_frame, scene, backend)?);
    }
    Ok(outputs)
}

/// Write `scene` (without pixel data) as pretty JSON.
pub fn dump_scene(scene: &SceneAsset, path: &Path) -> DepthwireResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dump dir '{}'", parent.display()))?;
    }
    let f = std::fs::File::create(path)
        .with_context(|| format!("create scene dump '{}'", path.display()))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(f), scene)
        .with_context(|| format!("serialize scene to '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
