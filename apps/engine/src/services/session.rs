//! Async session driver.
//!
//! Owns the single live [`SessionState`] and feeds it one event at a time from
//! an mpsc queue. Sourcing runs on a spawned task; timers are spawned sleeps
//! (or an interval for the tick) that post back into the same queue. Every
//! task is tagged with the session id it was started under, and restarting
//! aborts them all, so nothing from an old session reaches a new deck.
//!
//! Spawned tasks only hold a weak sender back into the queue: once every
//! [`SessionHandle`] is dropped the queue drains and the driver stops.

use std::collections::HashMap;

use rand_chacha::ChaCha8Rng;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, WeakUnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant};
use tracing::{debug, info, warn};

use crate::domain::dealing::{build_deck, deck_rng};
use crate::domain::match_engine::{apply, Effect, Event, SessionOutcome, TimerKind};
use crate::domain::snapshot::SessionSnapshot;
use crate::domain::state::{Phase, SessionId, SessionState};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::sourcing::pipeline::{PairOrigin, PairPipeline, SessionRequest, SourcedPairs};
use crate::sourcing::provider::ProviderConfig;
use crate::sourcing::transport::ProviderTransport;

/// What the presentation side receives.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    /// Current board after every processed event.
    Snapshot(SessionSnapshot),
    /// Pairs were substituted from the offline list; advisory only.
    FallbackNotice { kind: &'static str, reason: String },
    /// Nothing playable was produced; the session stays out of play.
    LoadFailed(String),
    /// Terminal result, sent once per played session.
    Finished(SessionOutcome),
}

#[derive(Debug)]
enum Input {
    Start {
        request: SessionRequest,
        provider: ProviderConfig,
    },
    Flip(String),
    Exit,
    Shutdown,
    Sourced {
        session_id: SessionId,
        sourced: SourcedPairs,
    },
    Timer {
        session_id: SessionId,
        timer: TimerKind,
    },
}

/// Cloneable sender for player intents.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: UnboundedSender<Input>,
}

impl SessionHandle {
    fn send(&self, input: Input) -> Result<(), AppError> {
        self.tx
            .send(input)
            .map_err(|_| AppError::internal("session driver has stopped".to_string()))
    }

    /// Tear down any current session and source a new one.
    pub fn start(&self, request: SessionRequest, provider: ProviderConfig) -> Result<(), AppError> {
        self.send(Input::Start { request, provider })
    }

    pub fn flip(&self, card_id: impl Into<String>) -> Result<(), AppError> {
        self.send(Input::Flip(card_id.into()))
    }

    pub fn exit(&self) -> Result<(), AppError> {
        self.send(Input::Exit)
    }

    pub fn shutdown(&self) -> Result<(), AppError> {
        self.send(Input::Shutdown)
    }
}

pub struct SessionDriver<T: ProviderTransport + 'static> {
    pipeline: PairPipeline<T>,
    rng: ChaCha8Rng,
    state: SessionState,
    inbox: UnboundedReceiver<Input>,
    loopback: WeakUnboundedSender<Input>,
    updates: UnboundedSender<SessionUpdate>,
    sourcing: Option<JoinHandle<()>>,
    timers: HashMap<TimerKind, JoinHandle<()>>,
}

impl<T: ProviderTransport + 'static> SessionDriver<T> {
    /// Build a driver plus its intent handle and update stream. `seed` makes
    /// deck order reproducible across runs.
    pub fn new(
        pipeline: PairPipeline<T>,
        seed: Option<u64>,
    ) -> (Self, SessionHandle, UnboundedReceiver<SessionUpdate>) {
        let (tx, inbox) = mpsc::unbounded_channel();
        let (updates, updates_rx) = mpsc::unbounded_channel();
        let driver = Self {
            pipeline,
            rng: deck_rng(seed),
            state: SessionState::new(0),
            inbox,
            loopback: tx.downgrade(),
            updates,
            sourcing: None,
            timers: HashMap::new(),
        };
        (driver, SessionHandle { tx }, updates_rx)
    }

    /// Spawn the driver loop onto the current runtime.
    pub fn spawn(
        pipeline: PairPipeline<T>,
        seed: Option<u64>,
    ) -> (SessionHandle, UnboundedReceiver<SessionUpdate>, JoinHandle<()>) {
        let (driver, handle, updates) = Self::new(pipeline, seed);
        let join = tokio::spawn(driver.run());
        (handle, updates, join)
    }

    /// Process inputs until shutdown or until every handle is dropped.
    pub async fn run(mut self) {
        while let Some(input) = self.inbox.recv().await {
            if matches!(input, Input::Shutdown) {
                break;
            }
            self.handle(input);
        }
        self.abort_all();
        debug!("session driver stopped");
    }

    fn handle(&mut self, input: Input) {
        match input {
            Input::Start { request, provider } => self.start(request, provider),
            Input::Flip(card_id) => self.dispatch(Event::Flip { card_id }),
            Input::Exit => {
                if let Some(task) = self.sourcing.take() {
                    task.abort();
                }
                self.dispatch(Event::Exit);
            }
            Input::Sourced {
                session_id,
                sourced,
            } => self.sourced(session_id, sourced),
            Input::Timer { session_id, timer } => {
                if session_id == self.state.session_id && !timer.is_repeating() {
                    self.timers.remove(&timer);
                }
                self.dispatch(Event::TimerFired { session_id, timer });
            }
            Input::Shutdown => {}
        }
    }

    fn start(&mut self, request: SessionRequest, provider: ProviderConfig) {
        self.abort_all();
        self.dispatch(Event::Reset);

        let session_id = self.state.session_id;
        info!(session_id, mode = ?request.mode, provider_id = %provider.id, "starting session");
        let pipeline = self.pipeline.clone();
        let loopback = self.loopback.clone();
        self.sourcing = Some(tokio::spawn(async move {
            let sourced = pipeline.source_pairs(&request, &provider).await;
            // The driver may already be gone; nothing to do then.
            if let Some(tx) = loopback.upgrade() {
                let _ = tx.send(Input::Sourced {
                    session_id,
                    sourced,
                });
            }
        }));
    }

    fn sourced(&mut self, session_id: SessionId, sourced: SourcedPairs) {
        if session_id != self.state.session_id {
            debug!(
                session_id,
                current = self.state.session_id,
                "discarding stale sourcing result"
            );
            return;
        }
        self.sourcing = None;
        if self.state.phase != Phase::Loading {
            debug!(
                session_id,
                phase = ?self.state.phase,
                "discarding sourcing result for a session no longer loading"
            );
            return;
        }
        if let PairOrigin::Fallback { kind, reason } = &sourced.origin {
            self.emit(SessionUpdate::FallbackNotice {
                kind: *kind,
                reason: reason.clone(),
            });
        }
        let deck = build_deck(&sourced.pairs, &mut self.rng);
        self.dispatch(Event::DeckLoaded { session_id, deck });
    }

    /// Apply one event, run its effects and publish the new board.
    fn dispatch(&mut self, event: Event) {
        match apply(&mut self.state, event) {
            Ok(effects) => {
                for effect in effects {
                    self.execute(effect);
                }
            }
            Err(DomainError::LoadFailure(detail)) => {
                warn!(session_id = self.state.session_id, %detail, "session failed to load");
                self.emit(SessionUpdate::LoadFailed(detail));
            }
            Err(err) => {
                warn!(session_id = self.state.session_id, error = %err, "rejected event");
            }
        }
        self.emit(SessionUpdate::Snapshot(SessionSnapshot::of(&self.state)));
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::StartTimer {
                session_id,
                timer,
                after,
            } => {
                let task = self.spawn_timer(session_id, timer, after);
                if let Some(previous) = self.timers.insert(timer, task) {
                    previous.abort();
                }
            }
            Effect::CancelTimer { timer, .. } => {
                if let Some(task) = self.timers.remove(&timer) {
                    task.abort();
                }
            }
            Effect::ReportOutcome(outcome) => {
                info!(
                    session_id = self.state.session_id,
                    won = outcome.won,
                    moves = outcome.move_count,
                    "session finished"
                );
                self.emit(SessionUpdate::Finished(outcome));
            }
        }
    }

    fn spawn_timer(&self, session_id: SessionId, timer: TimerKind, after: Duration) -> JoinHandle<()> {
        let loopback = self.loopback.clone();
        if timer.is_repeating() {
            tokio::spawn(async move {
                let mut interval = time::interval_at(Instant::now() + after, after);
                loop {
                    interval.tick().await;
                    let Some(tx) = loopback.upgrade() else {
                        break;
                    };
                    if tx.send(Input::Timer { session_id, timer }).is_err() {
                        break;
                    }
                }
            })
        } else {
            tokio::spawn(async move {
                time::sleep(after).await;
                if let Some(tx) = loopback.upgrade() {
                    let _ = tx.send(Input::Timer { session_id, timer });
                }
            })
        }
    }

    fn abort_all(&mut self) {
        if let Some(task) = self.sourcing.take() {
            task.abort();
        }
        for (_, task) in self.timers.drain() {
            task.abort();
        }
    }

    fn emit(&self, update: SessionUpdate) {
        if self.updates.send(update).is_err() {
            debug!("no listener for session updates");
        }
    }
}
