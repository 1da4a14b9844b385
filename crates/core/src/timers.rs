//! Timers module - cancellable fire-once timers owned by the driver
//!
//! The engine never reads a clock. The driver arms timers here, advances them
//! with elapsed milliseconds from its fixed-timestep loop and calls the
//! matching engine operation for every timer that fires. Re-arming an armed
//! timer restarts it; periodic timers (the enemy tick) are re-armed by the
//! driver after firing.

use arrayvec::ArrayVec;

/// Number of distinct timers
pub const TIMER_KINDS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Bomb explodes when this fires
    BombFuse,
    /// Invincibility window closes
    InvincibilityExpiry,
    /// Enemies take one step
    EnemyTick,
    /// Movement animation finished, releasing the movement gate
    MovementSettle,
}

impl TimerKind {
    pub const ALL: [TimerKind; TIMER_KINDS] = [
        TimerKind::BombFuse,
        TimerKind::InvincibilityExpiry,
        TimerKind::EnemyTick,
        TimerKind::MovementSettle,
    ];

    fn slot(self) -> usize {
        match self {
            TimerKind::BombFuse => 0,
            TimerKind::InvincibilityExpiry => 1,
            TimerKind::EnemyTick => 2,
            TimerKind::MovementSettle => 3,
        }
    }
}

/// Fixed set of pending timers, remaining time in milliseconds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scheduler {
    remaining_ms: [Option<u32>; TIMER_KINDS],
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or restart) a timer
    pub fn arm(&mut self, kind: TimerKind, delay_ms: u32) {
        self.remaining_ms[kind.slot()] = Some(delay_ms);
    }

    /// Cancel a timer; returns whether it was armed
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        self.remaining_ms[kind.slot()].take().is_some()
    }

    pub fn cancel_all(&mut self) {
        self.remaining_ms = [None; TIMER_KINDS];
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.remaining_ms[kind.slot()].is_some()
    }

    pub fn remaining(&self, kind: TimerKind) -> Option<u32> {
        self.remaining_ms[kind.slot()]
    }

    /// Advance every armed timer and return those that fired, earliest first
    ///
    /// Fired timers are disarmed. Ties keep the order of [`TimerKind::ALL`].
    pub fn advance(&mut self, elapsed_ms: u32) -> ArrayVec<TimerKind, TIMER_KINDS> {
        let mut fired: ArrayVec<(u32, TimerKind), TIMER_KINDS> = ArrayVec::new();

        for kind in TimerKind::ALL {
            let slot = &mut self.remaining_ms[kind.slot()];
            if let Some(remaining) = *slot {
                if remaining <= elapsed_ms {
                    fired.push((remaining, kind));
                    *slot = None;
                } else {
                    *slot = Some(remaining - elapsed_ms);
                }
            }
        }

        // Stable sort keeps ALL order among equal deadlines.
        fired.sort_by_key(|&(remaining, _)| remaining);
        fired.into_iter().map(|(_, kind)| kind).collect()
    }
}
