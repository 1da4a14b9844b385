//! Event model - the closed set of state changes reported to observers
//!
//! Every engine operation appends zero or more [`GameEvent`]s to its batch.
//! One batch describes one state transition; consumers drain it after each
//! call and must not interleave batches. Events never carry errors.

use std::sync::mpsc;

use serde::Serialize;

use crate::blast::BlastTile;
use crate::snapshot::LevelSnapshot;
use crate::types::{BlockId, CoinId, Coordinate, Direction, EnemyId};

/// Entity whose position changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Actor {
    Player,
    Enemy(EnemyId),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// Full snapshot of a freshly generated level
    LevelLoaded(Box<LevelSnapshot>),
    PositionChanged {
        actor: Actor,
        from: Coordinate,
        to: Coordinate,
        direction: Direction,
        /// Enemy is down to its last hit point (always false for the player)
        last_life: bool,
    },
    BlockDestroyed {
        block: BlockId,
    },
    CoinCollected {
        coin: CoinId,
    },
    EnemyWounded {
        enemy: EnemyId,
    },
    EnemyDead {
        enemy: EnemyId,
    },
    PointsEarned {
        amount: u32,
        total: u32,
        location: Coordinate,
    },
    DoorOpened,
    BombPlaced {
        location: Coordinate,
    },
    BlastOccurred {
        path: Vec<BlastTile>,
    },
    PowerUpBomb {
        range: u32,
    },
    PowerUpLife {
        health: u32,
    },
    PowerUpInvincible {
        active: bool,
    },
    PlayerRespawned {
        health: u32,
    },
    Victory,
    GameOver,
}

impl GameEvent {
    /// Short kind tag, matching the serialized `type` field
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::LevelLoaded(_) => "levelLoaded",
            GameEvent::PositionChanged { .. } => "positionChanged",
            GameEvent::BlockDestroyed { .. } => "blockDestroyed",
            GameEvent::CoinCollected { .. } => "coinCollected",
            GameEvent::EnemyWounded { .. } => "enemyWounded",
            GameEvent::EnemyDead { .. } => "enemyDead",
            GameEvent::PointsEarned { .. } => "pointsEarned",
            GameEvent::DoorOpened => "doorOpened",
            GameEvent::BombPlaced { .. } => "bombPlaced",
            GameEvent::BlastOccurred { .. } => "blastOccurred",
            GameEvent::PowerUpBomb { .. } => "powerUpBomb",
            GameEvent::PowerUpLife { .. } => "powerUpLife",
            GameEvent::PowerUpInvincible { .. } => "powerUpInvincible",
            GameEvent::PlayerRespawned { .. } => "playerRespawned",
            GameEvent::Victory => "victory",
            GameEvent::GameOver => "gameOver",
        }
    }

    /// Events after which the level accepts no more gameplay input
    pub fn ends_level(&self) -> bool {
        matches!(self, GameEvent::Victory | GameEvent::GameOver)
    }
}

/// Destination for event batches
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

impl EventSink for mpsc::Sender<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        // A dropped receiver means nobody is watching anymore.
        let _ = self.send(event);
    }
}

/// Adapts a closure into an [`EventSink`]
pub struct FnSink<F>(pub F);

impl<F: FnMut(GameEvent)> EventSink for FnSink<F> {
    fn emit(&mut self, event: GameEvent) {
        (self.0)(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_preserves_order() {
        let mut sink = Vec::new();
        sink.emit(GameEvent::DoorOpened);
        sink.emit(GameEvent::Victory);
        assert_eq!(sink, vec![GameEvent::DoorOpened, GameEvent::Victory]);
    }

    #[test]
    fn test_channel_sink() {
        let (mut tx, rx) = mpsc::channel();
        tx.emit(GameEvent::BombPlaced {
            location: Coordinate::new(3, 1),
        });
        assert_eq!(
            rx.try_recv().ok(),
            Some(GameEvent::BombPlaced {
                location: Coordinate::new(3, 1)
            })
        );
    }

    #[test]
    fn test_fn_sink_counts() {
        let mut count = 0;
        {
            let mut sink = FnSink(|_event: GameEvent| count += 1);
            sink.emit(GameEvent::GameOver);
            sink.emit(GameEvent::GameOver);
        }
        assert_eq!(count, 2);
    }

    #[test]
    fn test_kind_matches_serialized_tag() {
        let event = GameEvent::PointsEarned {
            amount: 400,
            total: 400,
            location: Coordinate::new(4, 1),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], event.kind());
        assert_eq!(json["amount"], 400);

        let json = serde_json::to_value(GameEvent::DoorOpened).unwrap();
        assert_eq!(json["type"], "doorOpened");
    }

    #[test]
    fn test_ends_level() {
        assert!(GameEvent::Victory.ends_level());
        assert!(GameEvent::GameOver.ends_level());
        assert!(!GameEvent::DoorOpened.ends_level());
    }
}
