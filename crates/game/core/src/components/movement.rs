use std::rc::Rc;

use tracing::trace;

use crate::entity::{Band, Binder, Component, EntityRef, Propagation, Receiver};
use crate::env::{GameEnv, SpatialIndex};
use crate::event::{DoAttack, GetBlockState, Move, Open};
use crate::state::Position;

use super::{ComponentKind, ComponentSnapshot};

/// True when anything on `tile` other than `asker` reports that it blocks
/// `asker`.
pub fn is_blocked(
    env: &GameEnv<'_>,
    map: &dyn SpatialIndex,
    asker: &EntityRef,
    tile: Position,
) -> bool {
    map.entities_at(tile)
        .iter()
        .filter(|occupant| !Rc::ptr_eq(occupant, asker))
        .any(|occupant| blocks(env, occupant, asker))
}

fn blocks(env: &GameEnv<'_>, occupant: &EntityRef, asker: &EntityRef) -> bool {
    occupant
        .emit(
            env,
            GetBlockState {
                asker: Some(asker.clone()),
                blocking: false,
            },
        )
        .blocking
}

/// Cardinal stepping. Walking into something that blocks tries to open it
/// first and attacks it when that fails; either way the step is spent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Walk;

impl Walk {
    fn on_move(rx: &Receiver<'_, Self>, event: &mut Move) -> Propagation {
        let Some(direction) = event.direction else {
            return Propagation::Continue;
        };
        let env = rx.env();
        let Ok(map) = env.map() else {
            return Propagation::Continue;
        };
        let owner = rx.owner();
        let destination = owner.position().step(direction);
        if !map.can_occupy(destination) {
            return Propagation::Continue;
        }

        let mut can_pass = true;
        for occupant in map.entities_at(destination) {
            if Rc::ptr_eq(&occupant, owner) || !blocks(env, &occupant, owner) {
                continue;
            }
            can_pass = false;

            let opened = occupant
                .emit(
                    env,
                    Open {
                        asker: Some(owner.clone()),
                        was_opened: false,
                    },
                )
                .was_opened;
            if !opened {
                trace!(
                    target: "game_core::components",
                    walker = %owner.id(),
                    occupant = %occupant.id(),
                    "bump attack"
                );
                owner.emit(
                    env,
                    DoAttack {
                        target: Some(occupant.clone()),
                        outcome: None,
                    },
                );
            }
        }

        if can_pass {
            event.moved = map.move_entity(owner, destination);
        }
        Propagation::Continue
    }
}

impl Component for Walk {
    const KIND: ComponentKind = ComponentKind::Walk;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Baseline, Self::on_move);
    }

    fn duplicate(&self) -> Self {
        Walk
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::Walk
    }
}
