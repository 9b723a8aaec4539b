//! Sketchbox Headless Runner
//!
//! Loads a saved level, switches it to runtime mode, steps the simulation
//! and prints where every placed body ended up.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use serde::Serialize;
use sketchbox_core::geometry::xy;
use sketchbox_core::{EditorConfig, EditorSession, FileStorage, GameMode, PHYSICS_DT, ShapeKind};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "sketchbox-headless",
    about = "Replay a saved sketchbox level through the physics simulation"
)]
struct Args {
    /// Saved level state (JSON list of body descriptors).
    state: PathBuf,

    /// Number of 60 Hz steps to simulate.
    #[arg(default_value_t = 120)]
    frames: u32,

    /// Optional editor config (JSON); defaults apply otherwise.
    config: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FinalBody {
    id: u32,
    shape_kind: ShapeKind,
    #[serde(with = "xy")]
    position: Vec2,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EditorConfig::default(),
    };

    let mut session = EditorSession::new(config, Box::new(FileStorage::new(args.state.clone())));
    session.reload();
    if session.state().is_empty() {
        tracing::warn!(path = %args.state.display(), "no bodies to simulate");
    }
    session.init(GameMode::Runtime, session.state().to_vec());

    for _ in 0..args.frames {
        session.tick();
    }
    tracing::info!(
        frames = args.frames,
        seconds = f64::from(args.frames) * f64::from(PHYSICS_DT),
        "simulation finished"
    );

    let bodies: Vec<FinalBody> = session
        .render_bodies()
        .into_iter()
        .filter(|body| !body.boundary)
        .map(|body| FinalBody {
            id: body.id,
            shape_kind: body.shape.kind(),
            position: body.position,
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&bodies)?);
    Ok(())
}
