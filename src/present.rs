//! Presentation seam
//!
//! The simulation never draws or plays audio itself. It queues [`GameEvent`]s;
//! a frontend implements [`Presenter`] and feeds them through [`present`].

use serde::{Deserialize, Serialize};

use crate::sim::{GameEvent, SessionOutcome};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Player hit an obstacle
    Explosion,
    /// Star or heart picked up
    Collect,
}

impl SoundCue {
    /// Asset key the frontend loads the clip under
    pub fn asset_key(&self) -> &'static str {
        match self {
            SoundCue::Explosion => "blastSound",
            SoundCue::Collect => "scoreSound",
        }
    }
}

/// HUD text slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HudField {
    Score,
    Health,
}

/// Frontend callbacks
pub trait Presenter {
    fn play_sound(&mut self, cue: SoundCue);
    fn set_text(&mut self, field: HudField, content: &str);
    /// Switch to the results screen
    fn show_results(&mut self, outcome: &SessionOutcome);
}

/// Forward queued events to a presenter, in order
pub fn present<P: Presenter + ?Sized>(events: &[GameEvent], presenter: &mut P) {
    for event in events {
        match event {
            GameEvent::Sound(cue) => presenter.play_sound(*cue),
            GameEvent::ScoreChanged(score) => {
                presenter.set_text(HudField::Score, &score.to_string())
            }
            GameEvent::HealthChanged(health) => {
                presenter.set_text(HudField::Health, &health.to_string())
            }
            GameEvent::Ended(outcome) => presenter.show_results(outcome),
        }
    }
}

/// Headless presenter: keeps the HUD strings and logs everything
#[derive(Debug, Clone, Default)]
pub struct LogPresenter {
    pub score_text: String,
    pub health_text: String,
    pub sounds_played: u32,
    pub results: Option<SessionOutcome>,
}

impl Presenter for LogPresenter {
    fn play_sound(&mut self, cue: SoundCue) {
        self.sounds_played += 1;
        log::debug!("sound: {}", cue.asset_key());
    }

    fn set_text(&mut self, field: HudField, content: &str) {
        match field {
            HudField::Score => self.score_text = content.to_string(),
            HudField::Health => self.health_text = content.to_string(),
        }
        log::debug!("hud {:?}: {}", field, content);
    }

    fn show_results(&mut self, outcome: &SessionOutcome) {
        log::info!(
            "Game Over - score {} on {}",
            outcome.final_score,
            outcome.variant.as_str()
        );
        self.results = Some(*outcome);
    }
}
