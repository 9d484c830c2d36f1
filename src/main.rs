//! Headless runner
//!
//! Plays the game in attract mode without a window: the autopilot supplies
//! input, frames are built and discarded, and progress goes to the log.
//!
//! Usage: `asteroid-blaster [FRAMES] [--realtime] [--seed N]`

use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use asteroid_blaster::app::App;
use asteroid_blaster::persistence::FileScoreStore;
use asteroid_blaster::platform::{AttractPilot, FrameClock};
use asteroid_blaster::settings::Settings;

const FIXED_DT: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u64 = 60 * 60;
const REPORT_EVERY: u64 = 60 * 10;

struct Args {
    frames: u64,
    realtime: bool,
    seed: Option<u64>,
}

fn parse_args() -> Args {
    let mut args = Args {
        frames: DEFAULT_FRAMES,
        realtime: false,
        seed: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--realtime" => args.realtime = true,
            "--seed" => match iter.next().and_then(|s| s.parse().ok()) {
                Some(seed) => args.seed = Some(seed),
                None => log::warn!("--seed needs a number"),
            },
            other => match other.parse() {
                Ok(frames) => args.frames = frames,
                Err(_) => log::warn!("Ignoring unknown argument {:?}", other),
            },
        }
    }
    args
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Asteroid Blaster (headless attract mode) starting...");

    let args = parse_args();
    let seed = args.seed.unwrap_or_else(clock_seed);
    let settings = Settings::load(Path::new(Settings::DEFAULT_FILE));
    let store = FileScoreStore::new(&settings.high_score_path);
    let mut app = App::new(seed, settings, Box::new(store));
    let mut pilot = AttractPilot::new();
    let mut clock = FrameClock::new();

    log::info!("Seed {}, running {} frames", seed, args.frames);

    for frame_no in 1..=args.frames {
        let dt = if args.realtime {
            std::thread::sleep(Duration::from_secs_f32(FIXED_DT));
            clock.tick()
        } else {
            clock.record(FIXED_DT);
            FIXED_DT
        };

        let input = pilot.input(app.state(), dt);
        let frame = app.step(&input, dt);
        for event in app.drain_audio() {
            log::trace!("audio: {:?}", event);
        }

        if frame_no % REPORT_EVERY == 0 {
            let [score, high, wave] = frame.hud.status_lines();
            log::info!(
                "{} | {} | {} | lives {} | {} verts | {} fps",
                score,
                high,
                wave,
                frame.hud.lives,
                frame.vertices.len(),
                clock.fps()
            );
        }
    }

    let state = app.state();
    log::info!(
        "Finished: phase {:?}, wave {}, score {}, best {}",
        state.phase,
        state.wave,
        state.score,
        state.high_score.best()
    );
}
