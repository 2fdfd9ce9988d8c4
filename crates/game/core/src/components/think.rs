use std::rc::{Rc, Weak};

use tracing::trace;

use crate::combat::can_attack;
use crate::entity::{Band, Binder, Component, Entity, EntityRef, Propagation, Receiver};
use crate::env::GameEnv;
use crate::event::{Died, GetHealth, GetSightRange, GetTeam, Move, NewTurn};
use crate::state::CardinalDirection;

use super::senses::can_see;
use super::{ComponentKind, ComponentSnapshot};

/// Simple chase AI: acquire the nearest visible hostile and step toward it.
#[derive(Clone, Debug, Default)]
pub struct Think {
    dead: bool,
    target: Option<Weak<Entity>>,
}

impl Think {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn restored(dead: bool) -> Self {
        Self { dead, target: None }
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn target(&self) -> Option<EntityRef> {
        self.target.as_ref().and_then(Weak::upgrade)
    }

    fn on_new_turn(rx: &Receiver<'_, Self>, _event: &mut NewTurn) -> Propagation {
        let (dead, current) = {
            let think = rx.state();
            (think.dead, think.target())
        };
        if dead {
            return Propagation::Continue;
        }
        let env = rx.env();
        let owner = rx.owner();

        let target = match current.filter(|target| is_alive(env, target)) {
            Some(target) => Some(target),
            None => acquire_target(env, owner),
        };
        rx.state_mut().target = target.as_ref().map(Rc::downgrade);

        let Some(target) = target else {
            return Propagation::Continue;
        };
        if let Some(direction) = CardinalDirection::toward(target.position() - owner.position()) {
            trace!(
                target: "game_core::components",
                thinker = %owner.id(),
                target = %target.id(),
                %direction,
                "chasing"
            );
            owner.emit(
                env,
                Move {
                    direction: Some(direction),
                    moved: false,
                },
            );
        }
        Propagation::Continue
    }

    fn on_died(rx: &Receiver<'_, Self>, _event: &mut Died) -> Propagation {
        let mut think = rx.state_mut();
        think.dead = true;
        think.target = None;
        Propagation::Continue
    }
}

fn is_alive(env: &GameEnv<'_>, entity: &EntityRef) -> bool {
    let health = entity.emit(env, GetHealth::default());
    health.maximum > 0 && health.current > 0
}

/// Nearest visible, attackable, living entity on a different team. Ties go
/// to the lower id so the choice is deterministic.
fn acquire_target(env: &GameEnv<'_>, thinker: &EntityRef) -> Option<EntityRef> {
    let map = env.map().ok()?;
    let ours = thinker.emit(env, GetTeam::default()).team;
    let range = thinker.emit(env, GetSightRange::default()).range;
    let origin = thinker.position();

    map.entities_within(origin, range as f32)
        .into_iter()
        .filter(|candidate| !Rc::ptr_eq(candidate, thinker))
        .filter(|candidate| {
            let theirs = candidate.emit(env, GetTeam::default()).team;
            theirs.is_some() && theirs != ours
        })
        .filter(|candidate| is_alive(env, candidate))
        .filter(|candidate| can_attack(env, thinker, candidate))
        .filter(|candidate| can_see(env, map, thinker, candidate.position()))
        .min_by_key(|candidate| (origin.taxi_distance(candidate.position()), candidate.id()))
}

impl Component for Think {
    const KIND: ComponentKind = ComponentKind::Think;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Baseline, Self::on_new_turn);
        binder.on(Band::Baseline, Self::on_died);
    }

    fn duplicate(&self) -> Self {
        Self::restored(self.dead)
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::Think { dead: self.dead }
    }
}
