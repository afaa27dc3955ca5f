//! Headless locomotion harness: replay a scripted joystick scenario over a
//! terrain file (or the fallback ground) and report the final transform.

use anyhow::Result;
use clap::Parser;
use glam::Vec2;
use skycastle::{Session, config, scenario};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "walk_sim")]
#[command(about = "Headless joystick-walk simulator (glTF/GLB terrain optional)")]
struct Cli {
    /// Path to a .gltf/.glb terrain; fallback ground when omitted or failing
    #[arg(long)]
    terrain: Option<PathBuf>,

    /// Scripted input scenario (JSON); a built-in demo runs when omitted
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Simulation length in ticks
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Fixed timestep in seconds
    #[arg(long, default_value_t = 0.016)]
    dt: f32,

    /// Fallback ground half-extent in world units
    #[arg(long, default_value_t = 50.0)]
    ground_extent: f32,
}

fn main() -> Result<()> {
    let default = "info,skycastle=info";
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_secs()
        .try_init();
    let cli = Cli::parse();

    let cfg = config::load_default().unwrap_or_else(|e| {
        log::warn!("config load failed ({e:#}); using defaults");
        config::LocomotionCfg::default()
    });
    let mut session = Session::new(cfg.spawn_pos(), cfg.character_height(), cfg.params());
    session.load_terrain_or_fallback(cli.terrain.as_deref(), cli.ground_extent);
    session.settle_spawn();

    let scn = match &cli.scenario {
        Some(path) => scenario::load(path)?,
        None => scenario::Scenario::demo(),
    };

    let mut next_step = 0usize;
    for t in 0..cli.ticks {
        while let Some(step) = scn.steps.get(next_step) {
            if step.at_tick > t {
                break;
            }
            apply_step(&mut session, step);
            next_step += 1;
        }
        session.tick(cli.dt);
        if t % 60 == 0 {
            let ch = &session.character;
            log::debug!(
                "t={t} pos=({:.2},{:.2},{:.2}) grounded={} anim={:?}",
                ch.pos.x,
                ch.pos.y,
                ch.pos.z,
                ch.grounded,
                ch.anim
            );
        }
    }

    let ch = &session.character;
    println!(
        "[walk_sim] final pos=({:.3}, {:.3}, {:.3}) yaw={:.3} grounded={} anim={:?}",
        ch.pos.x, ch.pos.y, ch.pos.z, ch.yaw, ch.grounded, ch.anim
    );
    Ok(())
}

/// Drive the on-screen sticks the way a touch would: engage at the widget
/// center and drag by the scenario vector scaled to the radius.
fn apply_step(session: &mut Session, step: &scenario::Step) {
    const RADIUS: f32 = 50.0;
    if let Some([x, y]) = step.move_vec {
        drive_stick(&mut session.move_stick, x, y, RADIUS);
    }
    if let Some([x, y]) = step.look {
        drive_stick(&mut session.look_stick, x, y, RADIUS);
    }
    if step.action {
        session.actions.push(input_core::ActionEvent::Attack);
    }
}

fn drive_stick(stick: &mut input_core::VirtualJoystick, x: f32, y: f32, radius: f32) {
    if x == 0.0 && y == 0.0 {
        stick.release();
        return;
    }
    if !stick.engaged() {
        stick.engage(Vec2::ZERO);
    }
    // Stick y is forward (screen-up), so the synthetic drag goes up-screen.
    stick.drag(Vec2::new(x * radius, -y * radius));
}
