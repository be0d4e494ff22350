//! Rocket Rush headless runner
//!
//! Drives sessions with the autopilot at a simulated frame rate and logs the
//! HUD and results screen. Useful for balance checks without a frontend.

use anyhow::{Context, Result, bail};
use clap::Parser;

use rocket_rush::consts::*;
use rocket_rush::pacing::FramePacer;
use rocket_rush::present::{LogPresenter, present};
use rocket_rush::sim::{Session, SessionOutcome, TickInput, VariantId, tick};
use rocket_rush::tuning::Tuning;

#[derive(Debug, Parser)]
#[command(name = "rocket-rush", about = "Run Rocket Rush sessions headless")]
struct Args {
    /// Level to play: level1, level2 or level3
    #[arg(long, default_value = "level1")]
    variant: String,
    /// Run seed
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Simulated seconds per session before giving up
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,
    /// Frames per second of the simulated display
    #[arg(long, default_value_t = 60.0)]
    fps: f32,
    /// Extra sessions to play via "retry same level"
    #[arg(long, default_value_t = 0)]
    retries: u32,
    /// JSON file overriding balance values
    #[arg(long)]
    tuning: Option<std::path::PathBuf>,
}

/// Game instance holding the session and frame pacing
struct Game {
    session: Session,
    presenter: LogPresenter,
    pacer: FramePacer,
    input: TickInput,
}

impl Game {
    fn new(session: Session, fps: f32) -> Self {
        Self {
            session,
            presenter: LogPresenter::default(),
            pacer: FramePacer::for_fps(fps),
            input: TickInput {
                idle_mode: true,
                ..Default::default()
            },
        }
    }

    /// Run simulation ticks for one display frame
    fn update(&mut self, dt: f32) {
        for _ in 0..self.pacer.advance(dt) {
            tick(&mut self.session, &self.input, SIM_DT);
        }

        let events = self.session.drain_events();
        present(&events, &mut self.presenter);
    }

    /// Play until the session ends or time runs out
    fn play(&mut self, seconds: f32, fps: f32) -> Option<SessionOutcome> {
        let frame_dt = 1.0 / fps;
        let frames = (seconds * fps).ceil() as u64;
        for _ in 0..frames {
            self.update(frame_dt);
            if let Some(outcome) = self.presenter.results {
                return Some(outcome);
            }
        }
        None
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let Some(variant_id) = VariantId::from_str(&args.variant) else {
        bail!("unknown variant '{}', expected level1, level2 or level3", args.variant);
    };
    if !(args.fps > 0.0 && args.fps.is_finite()) {
        bail!("--fps must be positive");
    }

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    log::info!("Rocket Rush (headless) starting...");
    let mut game = Game::new(Session::new(variant_id.preset(), tuning, args.seed), args.fps);

    for attempt in 0..=args.retries {
        match game.play(args.seconds, args.fps) {
            Some(outcome) => {
                println!(
                    "run {}: {} game over, score {}",
                    attempt + 1,
                    outcome.variant.as_str(),
                    outcome.final_score
                );
            }
            None => {
                println!(
                    "run {}: survived {:.1}s on {}, score {} health {}",
                    attempt + 1,
                    game.session.time_ticks as f32 * SIM_DT,
                    game.session.variant.id.as_str(),
                    game.session.score(),
                    game.session.health()
                );
            }
        }

        // Retry the same level the results screen came from
        game.session.restart();
        game.presenter = LogPresenter::default();
        game.pacer.reset();
    }

    Ok(())
}
