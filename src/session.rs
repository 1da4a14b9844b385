//! Session: the driver between input, timers, the engine and persistence.
//!
//! The engine owns no clock. A session owns the [`Scheduler`], feeds it the
//! elapsed time of each frame and calls the engine operation of every timer
//! that fires. It also reacts to the event batches the engine emits (arming
//! the invincibility window, restarting the enemy tick on a new level,
//! cancelling everything when a level ends) and forwards every event to the
//! optional JSON-lines log and to its outbox.

use std::io::Write;

use anyhow::Result;

use crate::core::{EventSink, GameEvent, GameState, Phase, Scheduler, SubmitOutcome, TimerKind};
use crate::event_log::EventLog;
use crate::leaderboard_store::LeaderboardStore;
use crate::types::{
    GameAction, BOMB_FUSE_MS, ENEMY_TICK_MS, INVINCIBILITY_MS, MOVEMENT_SETTLE_MS,
};

pub struct Session<S: LeaderboardStore> {
    game: GameState,
    timers: Scheduler,
    store: S,
    event_log: Option<EventLog<Box<dyn Write>>>,
    outbox: Vec<GameEvent>,
}

impl<S: LeaderboardStore> Session<S> {
    /// Wrap a game, loading the leaderboard from `store`
    ///
    /// A failed load is logged and the board starts empty. Events already
    /// queued on the game (a preloaded level) are processed right away.
    pub fn new(mut game: GameState, mut store: S) -> Self {
        match store.load() {
            Ok(entries) => game.load_leaderboard(entries),
            Err(e) => eprintln!("[Leaderboard] load failed, starting empty: {:#}", e),
        }
        let mut session = Self {
            game,
            timers: Scheduler::new(),
            store,
            event_log: None,
            outbox: Vec::new(),
        };
        session.pump_events();
        session
    }

    pub fn with_event_log(mut self, log: EventLog<Box<dyn Write>>) -> Self {
        self.event_log = Some(log);
        self
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn timers(&self) -> &Scheduler {
        &self.timers
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Events emitted since the last drain, in emission order
    pub fn drain_outbox(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }

    /// Apply one decoded input action
    ///
    /// Returns whether the action changed anything. Errors only come from
    /// level generation. Gameplay keys are ignored while no level is loaded.
    pub fn handle_action(&mut self, action: GameAction) -> Result<bool> {
        let applied = match action {
            GameAction::Move(_) | GameAction::PlaceBomb if !self.game.is_level_loaded() => false,
            GameAction::Move(direction) => {
                let moved = self.game.move_player(direction);
                if moved && self.game.phase() == Phase::LevelActive {
                    self.game.begin_movement_settle();
                    self.timers.arm(TimerKind::MovementSettle, MOVEMENT_SETTLE_MS);
                }
                moved
            }
            GameAction::PlaceBomb => {
                let placed = self.game.release_bomb();
                if placed {
                    self.timers.arm(TimerKind::BombFuse, BOMB_FUSE_MS);
                }
                placed
            }
            GameAction::Pause => match self.game.phase() {
                Phase::LevelActive => self.game.pause(),
                Phase::Paused => self.game.resume(),
                _ => false,
            },
            GameAction::Continue => match self.game.phase() {
                Phase::Menu => {
                    self.game.start_level(1)?;
                    true
                }
                Phase::LevelCleared => {
                    self.game.next_level()?;
                    true
                }
                _ => false,
            },
            GameAction::Quit => self.quit_match(),
        };
        self.pump_events();
        Ok(applied)
    }

    /// Advance timers by `elapsed_ms` and run whatever fired
    ///
    /// Nothing advances unless a level is running, so pausing freezes the
    /// fuse, the invincibility window and the enemy tick.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.game.phase() != Phase::LevelActive {
            return;
        }

        for kind in self.timers.advance(elapsed_ms) {
            if self.game.phase() != Phase::LevelActive {
                break;
            }
            match kind {
                TimerKind::BombFuse => {
                    if self.game.bomb().is_some() {
                        self.game.explode_bomb();
                    }
                }
                TimerKind::InvincibilityExpiry => {
                    self.game.expire_invincibility();
                }
                TimerKind::EnemyTick => self.game.move_enemies(),
                TimerKind::MovementSettle => self.game.finish_movement_settle(),
            }
            self.pump_events();

            if kind == TimerKind::EnemyTick && self.game.phase() == Phase::LevelActive {
                self.timers.arm(TimerKind::EnemyTick, ENEMY_TICK_MS);
            }
        }
    }

    /// Abandon the match and return to the menu
    pub fn quit_match(&mut self) -> bool {
        if self.game.phase() == Phase::Menu {
            return false;
        }
        self.timers.cancel_all();
        self.game.reset_match();
        true
    }

    /// Whether the current score can be recorded: after a lost match or
    /// between levels
    pub fn can_record_score(&self) -> bool {
        matches!(self.game.phase(), Phase::GameOver | Phase::LevelCleared)
    }

    /// Record the finished match under `name` and persist the board
    ///
    /// Ok(None) means the name was rejected. A failed save keeps the record
    /// in memory and is returned as the error.
    pub fn submit_name(&mut self, name: &str) -> Result<Option<SubmitOutcome>> {
        let Some(outcome) = self.game.submit_leaderboard_name(name) else {
            return Ok(None);
        };
        if outcome != SubmitOutcome::Unchanged {
            self.store.save(&self.game.leaderboard_entries())?;
        }
        Ok(Some(outcome))
    }

    pub fn flush_log(&mut self) -> Result<()> {
        match self.event_log.as_mut() {
            Some(log) => log.flush(),
            None => Ok(()),
        }
    }

    fn pump_events(&mut self) {
        let batch: Vec<GameEvent> = self.game.drain_events().collect();
        for event in batch {
            match &event {
                GameEvent::LevelLoaded(_) => {
                    self.timers.cancel_all();
                    self.timers.arm(TimerKind::EnemyTick, ENEMY_TICK_MS);
                }
                GameEvent::PowerUpInvincible { active: true } => {
                    self.timers.arm(TimerKind::InvincibilityExpiry, INVINCIBILITY_MS);
                }
                GameEvent::Victory | GameEvent::GameOver => self.timers.cancel_all(),
                _ => {}
            }
            if let Some(log) = self.event_log.as_mut() {
                log.emit(event.clone());
            }
            self.outbox.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LeaderboardEntry;
    use crate::leaderboard_store::MemoryStore;

    #[test]
    fn test_loads_leaderboard_from_store() {
        let store = MemoryStore {
            entries: vec![LeaderboardEntry::new("Ana", 300, 1)],
            ..MemoryStore::default()
        };
        let session = Session::new(GameState::new(1), store);
        assert_eq!(session.game().leaderboard().len(), 1);
    }

    #[test]
    fn test_failed_load_starts_empty() {
        let store = MemoryStore {
            fail_loads: true,
            ..MemoryStore::default()
        };
        let session = Session::new(GameState::new(1), store);
        assert!(session.game().leaderboard().is_empty());
    }

    #[test]
    fn test_continue_from_menu_starts_level_one() {
        let mut session = Session::new(GameState::new(9), MemoryStore::default());
        assert!(session.handle_action(GameAction::Continue).unwrap());

        assert_eq!(session.game().phase(), Phase::LevelActive);
        assert_eq!(session.timers().remaining(TimerKind::EnemyTick), Some(ENEMY_TICK_MS));
        let outbox = session.drain_outbox();
        assert!(matches!(outbox.as_slice(), [GameEvent::LevelLoaded(_)]));
    }

    #[test]
    fn test_menu_ignores_gameplay_actions() {
        use crate::types::Direction;

        let mut session = Session::new(GameState::new(9), MemoryStore::default());
        for direction in Direction::CARDINALS {
            assert!(!session.handle_action(GameAction::Move(direction)).unwrap());
        }
        assert!(!session.handle_action(GameAction::PlaceBomb).unwrap());
        assert!(!session.handle_action(GameAction::Pause).unwrap());
        assert!(!session.handle_action(GameAction::Quit).unwrap());
        assert_eq!(session.game().phase(), Phase::Menu);
        assert!(session.drain_outbox().is_empty());

        assert!(session.handle_action(GameAction::Continue).unwrap());
        assert_eq!(session.game().phase(), Phase::LevelActive);
    }

    #[test]
    fn test_quit_in_menu_is_rejected() {
        let mut session = Session::new(GameState::new(9), MemoryStore::default());
        assert!(!session.handle_action(GameAction::Quit).unwrap());
    }

    #[test]
    fn test_event_log_receives_every_event() {
        use std::cell::RefCell;
        use std::rc::Rc;

        #[derive(Clone, Default)]
        struct Shared(Rc<RefCell<Vec<u8>>>);
        impl Write for Shared {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.borrow_mut().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let shared = Shared::default();
        let log: EventLog<Box<dyn Write>> = EventLog::new(Box::new(shared.clone()));
        let mut session =
            Session::new(GameState::new(9), MemoryStore::default()).with_event_log(log);
        session.handle_action(GameAction::Continue).unwrap();
        session.flush_log().unwrap();

        let text = String::from_utf8(shared.0.borrow().clone()).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("{\"type\":\"levelLoaded\""));
    }
}
