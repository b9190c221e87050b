use clap::Parser;
use framegate::{
    Disposition, ErrorKind, Evaluation, FilterConfig, FrameGate, FrameRef, FsTemplateSource,
    PixelFormat, VideoFrame,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Drop video frames that match reference templates (frames given as image files)"
)]
struct Cli {
    /// Path to a JSON configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Filter options applied after the config file, e.g.
    /// `threshold=0.8:templates=a.png,b.png:mode=all`.
    #[arg(short, long, value_name = "OPTIONS")]
    options: Option<String>,
    /// Directory that receives copies of admitted frames.
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output (per-frame detail with RUST_LOG=framegate=debug).
    #[arg(long)]
    trace: bool,
    /// Frame images, processed in the order given.
    #[arg(value_name = "FRAME")]
    frames: Vec<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ModeConfig {
    #[default]
    First,
    All,
}

impl From<ModeConfig> for Evaluation {
    fn from(value: ModeConfig) -> Self {
        match value {
            ModeConfig::First => Evaluation::FirstMatch,
            ModeConfig::All => Evaluation::AllTemplates,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    threshold: f32,
    templates: Vec<String>,
    template_root: Option<PathBuf>,
    mode: ModeConfig,
    parallel: bool,
    output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg = FilterConfig::default();
        Self {
            threshold: cfg.threshold,
            templates: Vec::new(),
            template_root: None,
            mode: ModeConfig::First,
            parallel: cfg.parallel,
            output_dir: None,
        }
    }
}

/// A decoded still image standing in for one video frame.
struct ImageFrame {
    path: PathBuf,
    rgb: image::RgbImage,
}

impl VideoFrame for ImageFrame {
    fn frame_ref(&self) -> FrameRef<'_> {
        FrameRef::packed(
            self.rgb.as_raw(),
            self.rgb.width() as usize,
            self.rgb.height() as usize,
            PixelFormat::Rgb24,
        )
    }
}

#[derive(Debug, Serialize)]
struct ScoreRecord<'a> {
    template: &'a str,
    score: f32,
    x: usize,
    y: usize,
}

#[derive(Debug, Serialize)]
struct FrameRecord<'a> {
    frame: &'a str,
    disposition: Option<&'static str>,
    scores: Vec<ScoreRecord<'a>>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct Summary {
    frames: u64,
    forwarded: u64,
    dropped: u64,
    failed: u64,
}

fn save_admitted(dir: &Path, frames: Vec<ImageFrame>) -> Result<(), Box<dyn std::error::Error>> {
    for frame in frames {
        let name = frame
            .path
            .file_name()
            .ok_or_else(|| format!("frame path {} has no file name", frame.path.display()))?;
        frame.rgb.save(dir.join(name))?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("framegate=info".parse()?))
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config: Config = match &cli.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };

    let mut filter_cfg = FilterConfig::default()
        .with_threshold(config.threshold)
        .with_evaluation(config.mode.into())
        .with_parallel(config.parallel);
    if !config.templates.is_empty() {
        filter_cfg = filter_cfg.with_templates(config.templates.join(","));
    }
    if let Some(options) = &cli.options {
        filter_cfg.apply_options(options)?;
    }
    if filter_cfg.templates.is_none() {
        return Err("no templates configured; set `templates` in the config or options".into());
    }

    let source = match &config.template_root {
        Some(root) => FsTemplateSource::with_root(root),
        None => FsTemplateSource::new(),
    };
    let gate = FrameGate::from_config(&filter_cfg, &source)?;
    let ids: Vec<&str> = gate.store().templates().iter().map(|t| t.id()).collect();

    let output_dir = cli.output_dir.or(config.output_dir);
    if let Some(dir) = &output_dir {
        fs::create_dir_all(dir)?;
    }

    for path in &cli.frames {
        let rgb = image::open(path)?.to_rgb8();
        let frame = ImageFrame {
            path: path.clone(),
            rgb,
        };
        let frame_name = path.to_str().unwrap_or("<non-utf8 path>");

        let mut admitted = Vec::new();
        let record = match gate.filter_frame(frame, &mut admitted) {
            Ok(outcome) => FrameRecord {
                frame: frame_name,
                disposition: Some(match outcome.disposition {
                    Disposition::Forwarded => "forwarded",
                    Disposition::Dropped => "dropped",
                }),
                scores: outcome
                    .decision
                    .scores
                    .iter()
                    .map(|s| ScoreRecord {
                        template: ids.get(s.index).copied().unwrap_or_default(),
                        score: s.result.score,
                        x: s.result.x,
                        y: s.result.y,
                    })
                    .collect(),
                error: None,
            },
            // A frame smaller than a template fails on its own; anything else
            // means the input cannot be processed at all.
            Err(err) if err.kind() == ErrorKind::Match => FrameRecord {
                frame: frame_name,
                disposition: None,
                scores: Vec::new(),
                error: Some(err.to_string()),
            },
            Err(err) => return Err(err.into()),
        };
        println!("{}", serde_json::to_string(&record)?);

        if let Some(dir) = &output_dir {
            save_admitted(dir, admitted)?;
        }
    }

    let stats = gate.stats();
    let summary = Summary {
        frames: stats.frames,
        forwarded: stats.forwarded,
        dropped: stats.dropped,
        failed: stats.failed,
    };
    println!("{}", serde_json::to_string(&summary)?);

    Ok(())
}
