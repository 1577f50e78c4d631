mod driver;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::{ImageBuffer, RgbImage};
use serde_json::json;
use tilecast_common::GameConfig;
use tilecast_input::{Action, KeyBindings};
use tilecast_kernel::{GameEvent, Hud};
use tilecast_render::{AsciiRenderer, Frame, FrameRenderer, RenderView, Renderer};
use tilecast_world::{Chunk, ChunkCoord};
use tracing_subscriber::EnvFilter;

use crate::driver::{FrameDriver, Headless};

/// Headless runs advance a fixed 60 Hz clock.
const TICK_RATE: f64 = 60.0;

#[derive(Parser)]
#[command(name = "tilecast", about = "Headless host for the tilecast raycaster")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Game configuration file (JSON); defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the world seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

/// Scripted input for a headless run.
#[derive(Args)]
struct Script {
    /// Key code held for the whole run (repeatable), e.g. KeyW or ArrowLeft
    #[arg(long = "hold", value_name = "CODE")]
    hold: Vec<String>,

    /// Fire every N frames; 0 disables
    #[arg(long, default_value = "0")]
    fire_every: u64,

    /// Simulate the window losing focus before frame N: held keys are released
    #[arg(long, value_name = "N")]
    blur_at: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the effective configuration
    Info,
    /// Simulate without a display and print a JSON summary
    Run {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "600")]
        ticks: u64,
        #[command(flatten)]
        script: Script,
        /// Print the final chunk view after the summary
        #[arg(long)]
        show: bool,
    },
    /// Simulate, then write the final first-person frame as a PNG
    Render {
        /// Number of frames to simulate before rendering
        #[arg(short, long, default_value = "0")]
        ticks: u64,
        #[command(flatten)]
        script: Script,
        /// Facing angle in radians, applied after the simulation
        #[arg(long, allow_negative_numbers = true)]
        angle: Option<f32>,
        /// Leave out the minimap overlay
        #[arg(long)]
        no_minimap: bool,
        /// Output PNG path
        #[arg(short, long, default_value = "frame.png")]
        output: PathBuf,
    },
    /// Print a chunk as text
    Chunk {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
    },
}

/// Counters gathered from the event stream of a run.
#[derive(Debug, Default)]
struct RunLog {
    shots: u64,
    hits: u64,
    kills: u64,
    deaths: u64,
    hud_updates: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let config = load_config(cli.config.as_deref(), cli.seed)?;

    match cli.command {
        Commands::Info => {
            println!("tilecast v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "screen: {}x{}, fov: {} deg, max distance: {}",
                config.screen.width,
                config.screen.height,
                config.camera.fov_degrees,
                config.camera.max_dist
            );
            println!(
                "world: seed={}, wall probability={}",
                config.world.seed, config.world.wall_probability
            );
            println!(
                "enemies: target={}, respawns={}, spawn ring {}..{}",
                config.enemy.target_population,
                config.enemy.respawns,
                config.enemy.spawn_min,
                config.enemy.spawn_max
            );
            let bindings = KeyBindings::default();
            println!("bindings:");
            for action in Action::ALL {
                println!("  {action:?}: {}", bindings.keys_for(action).join(", "));
            }
            println!("config:\n{}", config.to_json()?);
        }
        Commands::Run {
            ticks,
            script,
            show,
        } => {
            tracing::info!(ticks, "headless run");
            let mut driver = FrameDriver::new(config, AsciiRenderer::new());
            let (log, last) = drive(&mut driver, &script, ticks)?;

            let state = driver.state();
            let hud = driver.hud().unwrap_or_else(|| Hud::of(state));
            let held: Vec<String> = Action::ALL
                .into_iter()
                .filter(|a| driver.input().is_held(*a))
                .map(|a| format!("{a:?}"))
                .collect();
            let player = state.player();
            let stats = driver.stats();
            let summary = json!({
                "ticks": state.tick(),
                "kills": hud.kills,
                "health": hud.health,
                "player": { "x": player.pos.x, "y": player.pos.y, "angle": player.angle },
                "enemies_alive": state.roster().alive_count(),
                "chunks_cached": state.world().len(),
                "shots": log.shots,
                "hits": log.hits,
                "enemies_killed": log.kills,
                "deaths": log.deaths,
                "hud_updates": log.hud_updates,
                "held": held,
                "frame_time": {
                    "average": stats.average(),
                    "max": stats.max(),
                    "fps": stats.fps(),
                },
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
            if let (true, Some(view)) = (show, last) {
                print!("{view}");
            }
        }
        Commands::Render {
            ticks,
            script,
            angle,
            no_minimap,
            output,
        } => {
            let mut driver = FrameDriver::new(config, Headless);
            drive(&mut driver, &script, ticks)?;
            if let Some(angle) = angle {
                driver.state_mut().player_mut().angle = angle;
            }
            let view = RenderView {
                muzzle_flash: false,
                minimap: !no_minimap,
            };
            let frame = FrameRenderer::new().render(driver.state(), &view);
            save_png(&frame, &output)?;
            tracing::info!(path = %output.display(), "frame written");
        }
        Commands::Chunk { x, y } => {
            let chunk = Chunk::generate(ChunkCoord::new(x, y), &config.world);
            let (ox, oy) = chunk.coord().origin_tile();
            println!(
                "chunk ({x}, {y}) origin=({ox}, {oy}) walls={}",
                chunk.wall_count()
            );
            for row in chunk.rows() {
                let line: String = row.iter().map(|&w| if w { '#' } else { '.' }).collect();
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<GameConfig> {
    let mut config = match path {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(seed) = seed {
        config.world.seed = seed;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Hold the scripted keys and advance `ticks` frames on the fixed clock.
/// Returns the event counters and the last rendered output.
fn drive<R: Renderer>(
    driver: &mut FrameDriver<R>,
    script: &Script,
    ticks: u64,
) -> Result<(RunLog, Option<R::Output>)> {
    for code in &script.hold {
        if !driver.input_mut().key_down(code) {
            bail!("key code `{code}` is not bound to any action");
        }
    }

    let mut log = RunLog::default();
    let mut last = None;
    for i in 0..ticks {
        if script.blur_at == Some(i) {
            driver.focus_lost();
        }
        if script.fire_every > 0 && i > 0 && i % script.fire_every == 0 {
            driver.input_mut().pointer_click();
        }
        let out = driver.tick(i as f64 / TICK_RATE);
        if let Some(shot) = out.report.shot {
            log.shots += 1;
            log.hits += u64::from(shot.hit.is_some());
            tracing::debug!(frame = i, dt = out.dt, hit = ?shot.hit, "shot");
        }
        for event in &out.events {
            match event {
                GameEvent::EnemyKilled { .. } => log.kills += 1,
                GameEvent::PlayerDied { kills, tick } => {
                    log.deaths += 1;
                    tracing::info!(kills, tick, "player died, game reset");
                }
                _ => {}
            }
        }
        if let Some(hud) = out.hud {
            log.hud_updates += 1;
            tracing::debug!(kills = hud.kills, health = hud.health, "hud changed");
        }
        last = Some(out.image);
    }
    Ok((log, last))
}

fn save_png(frame: &Frame, path: &Path) -> Result<()> {
    let img: RgbImage = ImageBuffer::from_raw(frame.width(), frame.height(), frame.to_rgb_bytes())
        .context("frame buffer does not match its dimensions")?;
    img.save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(hold: &[&str], fire_every: u64) -> Script {
        Script {
            hold: hold.iter().map(|s| s.to_string()).collect(),
            fire_every,
            blur_at: None,
        }
    }

    #[test]
    fn cli_parses_run_script() {
        let cli = Cli::try_parse_from([
            "tilecast", "run", "--ticks", "30", "--hold", "KeyW", "--hold", "KeyA", "--fire-every", "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Run { ticks, script, .. } => {
                assert_eq!(ticks, 30);
                assert_eq!(script.hold, vec!["KeyW", "KeyA"]);
                assert_eq!(script.fire_every, 5);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn cli_accepts_negative_chunk_coordinates() {
        let cli = Cli::try_parse_from(["tilecast", "chunk", "-3", "2"]).unwrap();
        assert!(matches!(cli.command, Commands::Chunk { x: -3, y: 2 }));
    }

    #[test]
    fn drive_counts_shots() {
        let mut driver = FrameDriver::new(GameConfig::default(), AsciiRenderer::new());
        let (log, last) = drive(&mut driver, &script(&[], 10), 31).unwrap();
        // Frames 10, 20 and 30.
        assert_eq!(log.shots, 3);
        assert!(log.hits <= log.shots);
        assert!(last.unwrap().contains("Chunk (0, 0)"));
        assert_eq!(driver.state().tick(), 31);
    }

    #[test]
    fn drive_rejects_unbound_keys() {
        let mut driver = FrameDriver::new(GameConfig::default(), AsciiRenderer::new());
        assert!(drive(&mut driver, &script(&["KeyZ"], 0), 1).is_err());
    }

    #[test]
    fn seed_override_applies() {
        let config = load_config(None, Some(9)).unwrap();
        assert_eq!(config.world.seed, 9);
    }

    #[test]
    fn png_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut frame = Frame::new(4, 3);
        frame.clear(tilecast_render::Rgb::new(10, 20, 30));
        save_png(&frame, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn blur_stops_held_movement() {
        let mut moving = FrameDriver::new(GameConfig::default(), Headless);
        drive(&mut moving, &script(&["KeyW"], 0), 20).unwrap();

        let mut blurred = FrameDriver::new(GameConfig::default(), Headless);
        let mut s = script(&["KeyW"], 0);
        s.blur_at = Some(5);
        drive(&mut blurred, &s, 20).unwrap();

        assert!(!blurred.input().is_held(Action::MoveForward));
        assert!(moving.input().is_held(Action::MoveForward));
        // Four moving frames before the blur, against nineteen.
        let x = blurred.state().player().pos.x;
        assert!((x - (2.5 + 4.0 * 3.0 / 60.0)).abs() < 1e-3, "x {x}");
        assert!(moving.state().player().pos.x > x);
    }

    #[test]
    fn render_path_can_run_headless() {
        let mut driver = FrameDriver::new(GameConfig::default(), Headless);
        let (log, last) = drive(&mut driver, &script(&[], 4), 9).unwrap();
        assert_eq!(log.shots, 2);
        assert!(last.is_some());
    }
}
