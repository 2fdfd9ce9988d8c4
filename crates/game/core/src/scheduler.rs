//! Cooperative initiative scheduling.
//!
//! One cycle gives the player a `NewTurn` first, then lets every other
//! turn-capable entity accumulate its speed as initiative. Entities at or above
//! the threshold are admitted for the cycle, processed once in descending
//! initiative order (ties go to the lower id), and reset to zero.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::components::Turn;
use crate::config::GameConfig;
use crate::entity::EntityRef;
use crate::env::GameEnv;
use crate::event::NewTurn;
use crate::state::EntityId;

/// What one scheduling cycle did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub cycle: u64,
    /// Entities that received a turn, in processing order. The player, when
    /// present, is first.
    pub acted: Vec<EntityId>,
}

#[derive(Debug)]
pub struct TurnScheduler {
    threshold: i32,
    cycle: u64,
}

impl TurnScheduler {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            threshold: config.initiative_threshold,
            cycle: 0,
        }
    }

    /// Continues counting from `cycle`, for a world restored from a snapshot.
    #[must_use]
    pub fn resumed_at(mut self, cycle: u64) -> Self {
        self.cycle = cycle;
        self
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Number of completed cycles.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Runs one full cycle over `actors`. `player` is skipped if it also
    /// appears in `actors`.
    pub fn run_cycle(
        &mut self,
        env: &GameEnv<'_>,
        player: Option<&EntityRef>,
        actors: &[EntityRef],
    ) -> CycleReport {
        self.cycle += 1;
        let mut report = CycleReport {
            cycle: self.cycle,
            acted: Vec::new(),
        };

        if let Some(player) = player {
            player.emit(env, NewTurn);
            report.acted.push(player.id());
        }

        let others: Vec<EntityRef> = actors
            .iter()
            .filter(|actor| player.is_none_or(|player| !Rc::ptr_eq(actor, player)))
            .cloned()
            .collect();
        for actor in self.admit(&others) {
            if let Some(turn) = actor.get::<Turn>() {
                turn.state_mut().initiative = 0;
            }
            trace!(target: "game_core::scheduler", actor = %actor.id(), "new turn");
            actor.emit(env, NewTurn);
            report.acted.push(actor.id());
        }

        debug!(
            target: "game_core::scheduler",
            cycle = self.cycle,
            acted = report.acted.len(),
            "cycle complete"
        );
        report
    }

    /// Adds each actor's speed to its initiative and returns those that
    /// crossed the threshold, highest initiative first.
    pub fn admit(&self, actors: &[EntityRef]) -> Vec<EntityRef> {
        let mut ready = BinaryHeap::new();
        for (index, actor) in actors.iter().enumerate() {
            let Some(turn) = actor.get::<Turn>() else {
                continue;
            };
            let initiative = {
                let mut turn = turn.state_mut();
                turn.initiative += turn.speed;
                turn.initiative
            };
            if initiative >= self.threshold {
                ready.push((initiative, Reverse(actor.id()), Reverse(index)));
            }
        }

        let mut admitted = Vec::with_capacity(ready.len());
        while let Some((_, _, Reverse(index))) = ready.pop() {
            admitted.push(actors[index].clone());
        }
        admitted
    }
}

impl Default for TurnScheduler {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
