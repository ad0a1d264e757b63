use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "depthwire", version, about)]
struct Cli {
    /// Base dir containing frames/ and depth/ folders.
    #[arg(long, required_unless_present = "config")]
    base: Option<PathBuf>,

    /// Frame stem, e.g. frame_001.
    #[arg(long, default_value = "frame_001", conflicts_with_all = ["config", "all"])]
    frame: String,

    /// Output still path (PNG). Default: <base>/wireframe.png.
    #[arg(long, conflicts_with_all = ["config", "all"])]
    out: Option<PathBuf>,

    /// Turntable frame count (0 to skip).
    #[arg(long, default_value_t = 0, conflicts_with = "config")]
    turntable: u64,

    /// Subdivision levels before displacement.
    #[arg(long, default_value_t = 4, conflicts_with = "config")]
    subdiv: u32,

    /// Displacement strength.
    #[arg(long, default_value_t = 0.25, allow_negative_numbers = true, conflicts_with = "config")]
    strength: f32,

    /// Wireframe thickness.
    #[arg(long, default_value_t = 0.0025, conflicts_with = "config")]
    wire: f32,

    /// Stretch the depth map to the full 0..1 range before displacing.
    #[arg(long, conflicts_with = "config")]
    normalize_depth: bool,

    /// Process every frames/*.jpg under the base dir into <base>/wireframe/.
    #[arg(long)]
    all: bool,

    /// Load all run parameters from a JSON config instead of flags.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the assembled scene (last run) as JSON.
    #[arg(long)]
    dump_scene: Option<PathBuf>,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendChoice::Preview)]
    backend: BackendChoice,

    /// More logging (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Preview,
}

impl Cli {
    fn log_level(&self) -> tracing::Level {
        match (self.quiet, self.verbose) {
            (true, _) => tracing::Level::WARN,
            (false, 0) => tracing::Level::INFO,
            (false, 1) => tracing::Level::DEBUG,
            (false, _) => tracing::Level::TRACE,
        }
    }

    fn pipeline_config(&self) -> anyhow::Result<depthwire::PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => depthwire::PipelineConfig::from_json_file(path)?,
            None => depthwire::PipelineConfig {
                base_dir: self.base.clone().unwrap_or_else(|| PathBuf::from(".")),
                frame: self.frame.clone(),
                out: self.out.clone(),
                turntable: self.turntable,
                surface: depthwire::SurfaceParams {
                    subdivision_levels: self.subdiv,
                    displacement_strength: self.strength,
                    wire_thickness: self.wire,
                },
                normalize_depth: self.normalize_depth,
                backend: depthwire::BackendKind::Preview,
            },
        };
        if let (Some(_), Some(base)) = (&self.config, &self.base) {
            config.base_dir = base.clone();
        }
        config.backend = match self.backend {
            BackendChoice::Preview => depthwire::BackendKind::Preview,
        };
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    let config = cli.pipeline_config()?;
    let mut backend = depthwire::create_backend(config.backend)?;
    let mut scene = depthwire::SceneAsset::new();

    let outputs = if cli.all {
        depthwire::run_all(&config, &mut scene, backend.as_mut())?
    } else {
        vec![depthwire::run(&config, &mut scene, backend.as_mut())?]
    };

    for out in &outputs {
        eprintln!("wrote {}", out.still.display());
        if let Some(seq) = &out.sequence {
            eprintln!("wrote {} frames to {}", seq.frames.len(), seq.dir.display());
        }
    }

    if let Some(path) = &cli.dump_scene {
        depthwire::dump_scene(&scene, path)
            .with_context(|| format!("dump scene to '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
