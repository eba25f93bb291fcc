//! Headless session runner.
//!
//! Drives the match engine directly on a virtual clock: the bot "thinks" for
//! a fixed time per flip, and timer effects fire in due order as that clock
//! advances. Nothing sleeps, so a full session runs in microseconds.

use std::time::Duration;

use engine::domain::{
    apply, build_deck_seeded, Effect, Event, Phase, SessionOutcome, SessionSnapshot, SessionState,
    TimerKind,
};
use engine::sourcing::{PairOrigin, PairPipeline, ProviderConfig, ProviderTransport, SessionRequest};
use engine::AppError;
use tracing::debug;

use crate::bot::Player;

/// Virtual time a bot spends per flip.
pub const THINK_TIME: Duration = Duration::from_millis(700);

const SESSION_ID: u64 = 1;

#[derive(Debug, Clone)]
pub struct GameResult {
    pub outcome: SessionOutcome,
    pub origin: PairOrigin,
    pub pair_count: usize,
    pub flips: u32,
    /// `true` when the flip cap ended the session.
    pub abandoned: bool,
}

struct PendingTimer {
    due: Duration,
    timer: TimerKind,
}

/// One session's engine state plus its virtual timer queue.
struct Run {
    state: SessionState,
    now: Duration,
    pending: Vec<PendingTimer>,
    outcome: Option<SessionOutcome>,
}

impl Run {
    fn new() -> Self {
        Self {
            state: SessionState::new(SESSION_ID),
            now: Duration::ZERO,
            pending: Vec::new(),
            outcome: None,
        }
    }

    fn dispatch(&mut self, event: Event) -> Result<(), AppError> {
        let effects = apply(&mut self.state, event)?;
        for effect in effects {
            match effect {
                Effect::StartTimer { timer, after, .. } => {
                    self.pending.retain(|p| p.timer != timer);
                    self.pending.push(PendingTimer {
                        due: self.now + after,
                        timer,
                    });
                }
                Effect::CancelTimer { timer, .. } => self.pending.retain(|p| p.timer != timer),
                Effect::ReportOutcome(outcome) => self.outcome = Some(outcome),
            }
        }
        Ok(())
    }

    fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Fire every timer due at or before `target`, then move the clock there.
    fn advance_to(&mut self, target: Duration) -> Result<(), AppError> {
        while let Some(due) = self.next_due().filter(|due| *due <= target) {
            let Some(index) = self.pending.iter().position(|p| p.due == due) else {
                break;
            };
            let fired = self.pending.swap_remove(index);
            self.now = fired.due;
            if fired.timer.is_repeating() {
                self.pending.push(PendingTimer {
                    due: fired.due + fired.timer.delay(),
                    timer: fired.timer,
                });
            }
            self.dispatch(Event::TimerFired {
                session_id: SESSION_ID,
                timer: fired.timer,
            })?;
        }
        self.now = self.now.max(target);
        Ok(())
    }

    /// Run timers until the board accepts a flip again or the session ends.
    fn settle(&mut self) -> Result<(), AppError> {
        while self.outcome.is_none() && self.state.phase != Phase::Active {
            let Some(due) = self.next_due() else {
                return Err(AppError::internal(format!(
                    "session stalled in {:?} with no pending timers",
                    self.state.phase
                )));
            };
            self.advance_to(due)?;
        }
        Ok(())
    }
}

pub struct Simulator<T: ProviderTransport> {
    pipeline: PairPipeline<T>,
    max_flips: u32,
}

impl<T: ProviderTransport> Simulator<T> {
    pub fn new(pipeline: PairPipeline<T>, max_flips: u32) -> Self {
        Self {
            pipeline,
            max_flips,
        }
    }

    pub async fn simulate_game(
        &self,
        request: &SessionRequest,
        provider: &ProviderConfig,
        deck_seed: u64,
        player: &mut dyn Player,
    ) -> Result<GameResult, AppError> {
        let sourced = self.pipeline.source_pairs(request, provider).await;
        let deck = build_deck_seeded(&sourced.pairs, deck_seed);

        let mut run = Run::new();
        run.dispatch(Event::DeckLoaded {
            session_id: SESSION_ID,
            deck,
        })?;

        let mut flips = 0u32;
        let mut abandoned = false;
        while run.outcome.is_none() {
            if flips >= self.max_flips {
                debug!(flips, "flip cap reached, exiting session");
                run.dispatch(Event::Exit)?;
                abandoned = true;
                break;
            }
            let snapshot = SessionSnapshot::of(&run.state);
            let Some(card_id) = player.choose(&snapshot) else {
                return Err(AppError::internal(format!(
                    "{} found no selectable card",
                    player.name()
                )));
            };
            run.dispatch(Event::Flip { card_id })?;
            flips += 1;
            player.observe(&SessionSnapshot::of(&run.state));

            let target = run.now + THINK_TIME;
            run.advance_to(target)?;
            run.settle()?;
        }

        let outcome = run
            .outcome
            .ok_or_else(|| AppError::internal("session ended without an outcome".to_string()))?;
        Ok(GameResult {
            outcome,
            pair_count: sourced.pairs.len(),
            origin: sourced.origin,
            flips,
            abandoned,
        })
    }
}
