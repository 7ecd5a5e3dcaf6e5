mod cameras;
mod components;
mod config;
mod events;
mod hud;
mod input;
mod layout;
mod npc;
mod render;
mod rng;
mod session;
mod viewport;

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;

use cameras::CameraRig;
use components::Behavior;
use input::ViewOverlayToggle;
use npc::{Npc, SimClock};
use session::Session;

const TICK_HZ: f64 = 60.0;

/// Fixed-tick budget for headless runs; `None` runs until interrupted.
#[derive(Resource, Clone, Copy, Default)]
struct TickLimit(Option<u64>);

fn parse_tick_limit(args: &[String]) -> Result<Option<u64>, String> {
    let Some(pos) = args.iter().position(|a| a == "--ticks") else {
        return Ok(None);
    };
    let raw = args
        .get(pos + 1)
        .ok_or_else(|| "--ticks requires a value".to_string())?;
    raw.parse::<u64>()
        .map(Some)
        .map_err(|e| format!("invalid --ticks value '{raw}': {e}"))
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let headless = args.iter().any(|a| a == "--headless");
    let tick_limit = match parse_tick_limit(&args) {
        Ok(limit) => limit,
        Err(e) => {
            eprintln!("[Camwatch] {e}");
            std::process::exit(2);
        }
    };

    let config = config::load_session_config();
    if let Err(e) = config.validate() {
        eprintln!("[Camwatch] Invalid session config: {e}");
        std::process::exit(2);
    }
    let rig = match CameraRig::from_config(&config) {
        Ok(rig) => rig,
        Err(e) => {
            eprintln!("[Camwatch] Invalid camera setup: {e}");
            std::process::exit(2);
        }
    };
    let seed = config.seed.unwrap_or_else(rand::random);
    println!("[Camwatch] Seed {}", seed);

    let mut app = App::new();

    if headless {
        app.add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / TICK_HZ,
            ))),
        )
        .add_plugins(bevy::log::LogPlugin::default())
        .insert_resource(TickLimit(tick_limit))
        .add_systems(FixedPostUpdate, headless_report);
        println!("[Camwatch] Starting in HEADLESS mode");
    } else {
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: config.window_title.clone(),
                resolution: (config.map_width, config.map_height).into(),
                resizable: false,
                present_mode: bevy::window::PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ViewOverlayToggle(config.show_view_overlays))
        .add_plugins(input::InputPlugin)
        .add_plugins(render::RenderPlugin)
        .add_plugins(hud::HudPlugin);
        println!("[Camwatch] Starting in WINDOWED mode");
    }

    app.insert_resource(config)
        .insert_resource(rig)
        .insert_resource(rng::SimRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
        .add_plugins(events::GameEventsPlugin)
        .add_plugins(layout::LayoutPlugin)
        .add_plugins(session::SessionPlugin)
        .add_plugins(npc::NpcPlugin);

    app.run();
}

fn headless_report(
    clock: Res<SimClock>,
    limit: Res<TickLimit>,
    session: Res<Session>,
    npcs: Query<&Npc>,
    mut exit: EventWriter<AppExit>,
) {
    let ticks = clock.ticks();
    let done = limit.0.is_some_and(|max| ticks >= max);
    if ticks % 300 != 0 && !done {
        return;
    }
    let suspicious = npcs
        .iter()
        .filter(|n| !n.captured && n.behavior == Behavior::Suspicious)
        .count();
    let captured = npcs.iter().filter(|n| n.captured).count();
    info!(
        "[Camwatch] tick {} ({} ms): {} suspicious, {} captured, score {}",
        ticks,
        clock.now_ms(),
        suspicious,
        captured,
        session.score()
    );
    if done {
        exit.send(AppExit::Success);
    }
}
