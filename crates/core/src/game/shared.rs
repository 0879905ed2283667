//! Thread-safe handle that resolves at most one action at a time.
//!
//! An action that arrives while another is still resolving is dropped rather
//! than queued, including actions submitted from inside an [`EventSink`].

use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

use crate::types::{Action, GameError, GameEvent};

use super::{ActionReport, Game};

/// Observer notified of every event as the game emits it.
///
/// Sinks run while the game is held. Calls back into a [`SharedGame`] from a
/// sink find it busy: submissions are dropped and reads return `None`.
pub trait EventSink {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F: FnMut(&GameEvent)> EventSink for F {
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Submission {
    Resolved(Result<ActionReport, GameError>),
    /// Another action held the game; this one had no effect.
    Dropped,
}

#[derive(Clone)]
pub struct SharedGame {
    inner: Arc<Mutex<Game>>,
}

impl SharedGame {
    pub fn new(game: Game) -> Self {
        Self { inner: Arc::new(Mutex::new(game)) }
    }

    pub fn submit(&self, action: Action) -> Submission {
        let Some(mut game) = self.try_game() else {
            log::debug!("dropped {action:?}: another action is in flight");
            return Submission::Dropped;
        };
        Submission::Resolved(game.apply(action))
    }

    /// Read access, or `None` while an action is resolving.
    pub fn with_game<R>(&self, read: impl FnOnce(&Game) -> R) -> Option<R> {
        self.try_game().map(|game| read(&game))
    }

    /// Returns `false`, leaving the old sink in place, while an action is resolving.
    pub fn set_event_sink(&self, sink: Box<dyn EventSink + Send>) -> bool {
        let Some(mut game) = self.try_game() else {
            return false;
        };
        game.set_event_sink(sink);
        true
    }

    fn try_game(&self) -> Option<MutexGuard<'_, Game>> {
        match self.inner.try_lock() {
            Ok(guard) => Some(guard),
            Err(TryLockError::WouldBlock) => None,
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::PoisonError;
    use std::thread;

    use super::super::test_support::*;
    use super::*;
    use crate::config::{DifficultyTier, GameMode};
    use crate::types::{Direction, Pos};

    #[test]
    fn reentrant_move_from_sink_is_dropped() {
        let mode = GameMode::Classic(DifficultyTier::Normal);
        let shared = SharedGame::new(game_with_dungeon(mode, open_dungeon(5)));
        let outcomes = Arc::new(Mutex::new(Vec::new()));

        let handle = shared.clone();
        let recorded = Arc::clone(&outcomes);
        let installed = shared.set_event_sink(Box::new(move |event: &GameEvent| {
            if matches!(event, GameEvent::Moved { .. }) {
                let outcome = handle.submit(Action::Move(Direction::Right));
                recorded.lock().unwrap_or_else(PoisonError::into_inner).push(outcome);
            }
        }));
        assert!(installed);

        let outcome = shared.submit(Action::Move(Direction::Right));
        assert!(matches!(outcome, Submission::Resolved(Ok(_))));
        assert_eq!(*outcomes.lock().expect("outcomes"), vec![Submission::Dropped]);
        let pos = shared.with_game(|game| game.dungeon().map(|d| d.player.pos));
        assert_eq!(pos, Some(Some(Pos { y: 0, x: 1 })));
    }

    #[test]
    fn sink_reading_back_finds_the_game_busy() {
        let mode = GameMode::Classic(DifficultyTier::Normal);
        let shared = SharedGame::new(game_with_dungeon(mode, open_dungeon(5)));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let handle = shared.clone();
        let recorded = Arc::clone(&seen);
        let installed = shared.set_event_sink(Box::new(move |_: &GameEvent| {
            let status = handle.with_game(|game| game.status());
            let replaced = handle.set_event_sink(Box::new(|_: &GameEvent| {}));
            recorded.lock().unwrap_or_else(PoisonError::into_inner).push((status, replaced));
        }));
        assert!(installed);

        let outcome = shared.submit(Action::Move(Direction::Down));
        assert!(matches!(outcome, Submission::Resolved(Ok(_))));
        assert_eq!(*seen.lock().expect("seen"), vec![(None, false)]);
        assert_eq!(shared.with_game(|game| game.log().len()), Some(1));
    }

    #[test]
    fn concurrent_submitters_never_interleave() {
        let mode = GameMode::Classic(DifficultyTier::Normal);
        let shared = SharedGame::new(game_with_dungeon(mode, open_dungeon(6)));
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let handle = shared.clone();
                thread::spawn(move || {
                    (0..50)
                        .map(|i| {
                            let direction =
                                if i % 2 == 0 { Direction::Down } else { Direction::Up };
                            handle.submit(Action::Move(direction))
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for worker in workers {
            for outcome in worker.join().expect("worker") {
                if let Submission::Resolved(result) = outcome {
                    assert!(result.is_ok());
                }
            }
        }
        let violation = shared
            .with_game(|game| game.dungeon().and_then(|d| d.consistency_violation()))
            .expect("no action in flight");
        assert_eq!(violation, None);
    }
}
