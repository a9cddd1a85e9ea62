#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that sails a Pirate Flow level.
//!
//! The binary loads a level file, optionally overrides the gameplay tuning,
//! and drives the simulation at a fixed tick rate from an input script,
//! drawing the camera viewport as text.

mod audio;
mod level_file;
mod script;
mod text_backend;

use std::{
    fs, io,
    path::{Path, PathBuf},
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use glam::UVec2;
use pirate_flow_core::Command;
use pirate_flow_rendering::{
    dispatch_audio, Camera, RenderingBackend, Scene, MAX_VIEWPORT_TILES,
};
use pirate_flow_world::{self as world, query, Tuning, World};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{audio::LoggingAudio, script::InputScript, text_backend::TextBackend};

/// Fixed simulation step; 50 ticks per second.
const TICK: Duration = Duration::from_millis(20);

/// Command-line arguments accepted by the Pirate Flow binary.
#[derive(Debug, Parser)]
#[command(name = "pirate-flow", version, about = "Sail a Pirate Flow level from the terminal")]
struct Args {
    /// Level file to load.
    #[arg(long, default_value = "levels/harbor.toml")]
    level: PathBuf,
    /// TOML file overriding gameplay tuning.
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Seed for patrol-vessel headings.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 1_500)]
    ticks: u64,
    /// Input script, for example `R4 F .10 U2`.
    #[arg(long, default_value = "")]
    script: String,
    /// Sleep between ticks so the session runs at 50 ticks per second.
    #[arg(long)]
    realtime: bool,
    /// Draw a frame every N ticks; 0 draws only the final frame.
    #[arg(long, default_value_t = 50)]
    render_every: u64,
    /// Viewport width in tiles.
    #[arg(long, default_value_t = 20, value_parser = view_extent())]
    view_columns: u32,
    /// Viewport height in tiles.
    #[arg(long, default_value_t = 12, value_parser = view_extent())]
    view_rows: u32,
}

fn view_extent() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(1..=i64::from(MAX_VIEWPORT_TILES))
}

fn main() -> Result<()> {
    init_tracing();
    run(Args::parse())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn run(args: Args) -> Result<()> {
    let tuning = load_tuning(args.tuning.as_deref())?;
    let script = InputScript::parse(&args.script).context("invalid input script")?;
    let level = level_file::load_level(&args.level, args.seed)?;

    let mut world = World::new(tuning);
    let mut events = Vec::new();
    world::apply(&mut world, Command::PopulateLevel { level }, &mut events);
    println!("{}", query::welcome_banner(&world));

    let grid = query::map_grid(&world);
    let mut camera = Camera::new(
        UVec2::new(args.view_columns, args.view_rows),
        UVec2::new(grid.width(), grid.height()),
    )?
    .centered_on(query::player_position(&world));

    let mut renderer = TextBackend::new(io::stdout().lock());
    let mut audio = LoggingAudio::default();
    info!(
        ticks = args.ticks,
        scripted = script.len(),
        seed = args.seed,
        turrets = query::turret_count(&world),
        patrol_vessels = query::patrol_vessel_count(&world),
        energy = query::tuning(&world).player_energy,
        "session_started"
    );

    for tick in 0..args.ticks {
        let started = Instant::now();
        events.clear();
        world::apply(
            &mut world,
            Command::Tick {
                dt: TICK,
                input: script.input_at(tick),
            },
            &mut events,
        );
        camera.track(&events);
        dispatch_audio(&mut audio, &events)?;

        if args.render_every > 0 && tick % args.render_every == 0 {
            renderer.present(&compose(&world, &camera))?;
        }
        if query::is_game_over(&world) {
            break;
        }
        if args.realtime {
            if let Some(remaining) = TICK.checked_sub(started.elapsed()) {
                thread::sleep(remaining);
            }
        }
    }

    renderer.present(&compose(&world, &camera))?;

    let hud = query::hud(&world);
    info!(
        ticks = query::tick_index(&world),
        score = hud.score,
        achievements = hud.achievements.len(),
        frames = renderer.frames(),
        cues = audio.played(),
        game_over = hud.game_over,
        turrets_left = query::turret_count(&world),
        patrol_vessels_left = query::patrol_vessel_count(&world),
        shells_in_flight = query::projectiles(&world).len(),
        "session_finished"
    );
    Ok(())
}

fn compose(world: &World, camera: &Camera) -> Scene {
    Scene::compose(
        query::map_grid(world),
        &query::actor_view(world),
        query::hud(world),
        camera,
    )
}

fn load_tuning(path: Option<&Path>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file {}", path.display()))?;
    let tuning: Tuning = toml::from_str(&text)
        .with_context(|| format!("invalid tuning file {}", path.display()))?;
    tuning
        .validate()
        .with_context(|| format!("invalid tuning file {}", path.display()))?;
    Ok(tuning)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn arguments_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_point_at_the_bundled_level() {
        let args = Args::parse_from(["pirate-flow"]);

        assert_eq!(args.level, PathBuf::from("levels/harbor.toml"));
        assert_eq!(args.render_every, 50);
        assert!(args.tuning.is_none());
    }

    #[test]
    fn viewport_arguments_are_bounded() {
        let args = Args::parse_from(["pirate-flow", "--view-columns", "512", "--view-rows", "1"]);
        assert_eq!((args.view_columns, args.view_rows), (512, 1));

        for extent in ["0", "513", "4000000000"] {
            assert!(Args::try_parse_from(["pirate-flow", "--view-rows", extent]).is_err());
        }
    }

    #[test]
    fn bundled_tuning_file_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/tuning.toml");

        let tuning = load_tuning(Some(&path)).expect("bundled tuning parses");

        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn zero_projectile_speed_fails_at_load() {
        let directory = tempfile::tempdir().expect("temporary directory");
        let path = directory.path().join("tuning.toml");
        fs::write(&path, "projectile_speed = 0.0\n").expect("tuning file");

        let error = load_tuning(Some(&path)).expect_err("stalled projectiles");

        let message = format!("{error:#}");
        assert!(message.contains("invalid tuning file"));
        assert!(message.contains("projectile_speed"));
    }

    #[test]
    fn missing_tuning_file_names_the_path() {
        let error = load_tuning(Some(Path::new("nowhere/tuning.toml")))
            .expect_err("file does not exist");

        assert!(error.to_string().contains("nowhere/tuning.toml"));
    }
}
