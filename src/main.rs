use clap::Parser;
use log::{error, info};
use phong_rasterizer::io::config::Config;
use phong_rasterizer::pipeline::passes::{OutputPlan, render_sequence};
use phong_rasterizer::pipeline::renderer::Renderer;
use phong_rasterizer::pipeline::settings::ShadingMode;
use phong_rasterizer::scene::loader::init_scene_resources;
use phong_rasterizer::{RenderError, Result};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

/// Offline CPU rasterizer: renders a TOML-described scene to image files.
#[derive(Parser, Debug)]
#[command(name = "phong-rasterizer", version)]
struct Cli {
    /// Scene configuration (TOML). Without it the built-in scene is rendered.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output image path, overrides `render.output`.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Number of animation frames, overrides `render.frames`.
    #[arg(short, long)]
    frames: Option<usize>,

    /// Render one image per shading mode.
    #[arg(long)]
    all_modes: bool,
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config: {:?}", path);
            Config::load(path)?
        }
        None => {
            info!("No config given, using defaults");
            Config::default()
        }
    };
    if let Some(frames) = cli.frames {
        config.render.frames = frames;
    }

    let render_config = config.to_render_config()?;
    let mut context = init_scene_resources(&config)?;
    let mut renderer = Renderer::new(config.render.width, config.render.height);

    let color = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&config.render.output));
    if let Some(parent) = color.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| RenderError::OutputDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let plan = OutputPlan {
        color,
        depth: config.render.depth_output.as_ref().map(PathBuf::from),
        frames: config.render.frames,
        rotation_step: config.rotation_step(),
        modes: if cli.all_modes || config.render.all_modes {
            ShadingMode::ALL.to_vec()
        } else {
            Vec::new()
        },
    };

    let start = Instant::now();
    let written = render_sequence(&mut renderer, &mut context, &render_config, &plan)?;
    info!(
        "Rendered {} image(s) at {}x{} in {:.2?}",
        written.len(),
        config.render.width,
        config.render.height,
        start.elapsed()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
