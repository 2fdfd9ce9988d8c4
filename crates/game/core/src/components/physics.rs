use tracing::debug;

use crate::entity::{Band, Binder, Component, EntityRef, Propagation, Receiver};
use crate::env::GameEnv;
use crate::event::{
    ApplyForce, CanPickup, Died, DoDamage, DoHeal, GetBlockState, GetHealth, GetScreenName,
    GetSize, GetStatList, GetWeight, NewTurn, ResistDamage, SetBlockState,
};
use crate::state::{CardinalDirection, Vec2};

use super::movement::is_blocked;
use super::{ComponentKind, ComponentSnapshot};

/// Body of an entity: health, mass, size, whether it blocks movement, and
/// residual velocity from knockback.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Physics {
    pub health: i32,
    pub max_health: i32,
    pub weight: i32,
    pub size: i32,
    pub blocking: bool,
    pub velocity: Vec2,
    pub dead: bool,
}

impl Physics {
    pub fn new(max_health: i32, weight: i32, size: i32, blocking: bool) -> Self {
        Self {
            health: max_health,
            max_health,
            weight,
            size,
            blocking,
            velocity: Vec2::ZERO,
            dead: false,
        }
    }

    /// Applies resisted damage. Health floors at zero and the body dies exactly once.
    fn on_damage(rx: &Receiver<'_, Self>, event: &mut DoDamage) -> Propagation {
        let owner = rx.owner();
        let env = rx.env();

        if rx.state().dead {
            event.damage = 0;
            return Propagation::Continue;
        }

        let resisted = owner.emit(
            env,
            ResistDamage {
                base_damage: event.damage,
                damage_type: event.damage_type,
                instigator: event.instigator.clone(),
                resistance: 0,
                effectiveness: event.effectiveness,
            },
        );
        let dealt = (event.damage - resisted.resistance).max(0);
        event.damage = dealt;
        event.effectiveness = resisted.effectiveness;

        let died = {
            let mut body = rx.state_mut();
            body.health = (body.health - dealt).max(0);
            if body.health == 0 && !body.dead {
                body.dead = true;
                true
            } else {
                false
            }
        };

        if died {
            debug!(target: "game_core::combat", entity = %owner.id(), "died");
            owner.emit(
                env,
                Died {
                    instigator: event.instigator.clone(),
                },
            );
            owner.emit(env, SetBlockState { blocking: false });
        }
        Propagation::Continue
    }

    fn on_heal(rx: &Receiver<'_, Self>, event: &mut DoHeal) -> Propagation {
        let mut body = rx.state_mut();
        if body.dead || event.amount <= 0 {
            return Propagation::Continue;
        }
        let before = body.health;
        body.health = (body.health + event.amount).min(body.max_health);
        event.healed += body.health - before;
        Propagation::Continue
    }

    fn on_get_health(rx: &Receiver<'_, Self>, event: &mut GetHealth) -> Propagation {
        let body = rx.state();
        event.current = body.health;
        event.maximum = body.max_health;
        Propagation::Continue
    }

    fn on_get_block_state(rx: &Receiver<'_, Self>, event: &mut GetBlockState) -> Propagation {
        event.blocking |= rx.state().blocking;
        Propagation::Continue
    }

    fn on_set_block_state(rx: &Receiver<'_, Self>, event: &mut SetBlockState) -> Propagation {
        rx.state_mut().blocking = event.blocking;
        Propagation::Continue
    }

    /// Bodies no larger than the asker can be carried; nothing carries itself.
    fn on_can_pickup(rx: &Receiver<'_, Self>, event: &mut CanPickup) -> Propagation {
        let Some(asker) = event.asker.clone() else {
            return Propagation::Continue;
        };
        if std::rc::Rc::ptr_eq(&asker, rx.owner()) {
            event.can_pickup = false;
            return Propagation::Continue;
        }
        let size = rx.state().size;
        let asker_size = asker.emit(rx.env(), GetSize::default()).size;
        if size > asker_size {
            event.can_pickup = false;
        }
        Propagation::Continue
    }

    fn on_get_size(rx: &Receiver<'_, Self>, event: &mut GetSize) -> Propagation {
        event.size = rx.state().size;
        Propagation::Continue
    }

    fn on_get_weight(rx: &Receiver<'_, Self>, event: &mut GetWeight) -> Propagation {
        event.weight = rx.state().weight;
        Propagation::Continue
    }

    fn on_screen_name(rx: &Receiver<'_, Self>, event: &mut GetScreenName) -> Propagation {
        if rx.state().dead {
            event.text.push_str(" remains");
        }
        Propagation::Continue
    }

    fn on_stat_list(rx: &Receiver<'_, Self>, event: &mut GetStatList) -> Propagation {
        let body = rx.state();
        event
            .stats
            .push(format!("health      = {}/{}", body.health, body.max_health));
        event.stats.push(format!("weight      = {}", body.weight));
        Propagation::Continue
    }

    fn on_apply_force(rx: &Receiver<'_, Self>, event: &mut ApplyForce) -> Propagation {
        let mut body = rx.state_mut();
        if body.weight > 0 {
            let impulse = event.direction * (event.force / body.weight as f32);
            body.velocity = body.velocity + impulse;
        }
        Propagation::Continue
    }

    /// Slides the body along its residual velocity, one tile per whole unit,
    /// stopping at the first wall or blocking occupant.
    fn on_new_turn(rx: &Receiver<'_, Self>, _event: &mut NewTurn) -> Propagation {
        let velocity = std::mem::take(&mut rx.state_mut().velocity);
        let steps = velocity.magnitude().trunc() as i32;
        let Some(direction) = CardinalDirection::toward(velocity.ortho_normal()) else {
            return Propagation::Continue;
        };
        if steps > 0 {
            slide(rx.env(), rx.owner(), direction, steps);
        }
        Propagation::Continue
    }
}

fn slide(env: &GameEnv<'_>, body: &EntityRef, direction: CardinalDirection, steps: i32) {
    let Ok(map) = env.map() else {
        return;
    };
    for _ in 0..steps {
        let next = body.position().step(direction);
        if !map.can_occupy(next) || is_blocked(env, map, body, next) {
            break;
        }
        map.move_entity(body, next);
    }
}

impl Component for Physics {
    const KIND: ComponentKind = ComponentKind::Physics;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Baseline, Self::on_damage);
        binder.on(Band::Baseline, Self::on_heal);
        binder.on(Band::Baseline, Self::on_get_health);
        binder.on(Band::Baseline, Self::on_get_block_state);
        binder.on(Band::Baseline, Self::on_set_block_state);
        binder.on(Band::Baseline, Self::on_can_pickup);
        binder.on(Band::Baseline, Self::on_get_size);
        binder.on(Band::Baseline, Self::on_get_weight);
        binder.on(Band::Baseline, Self::on_screen_name);
        binder.on(Band::Detail, Self::on_stat_list);
        binder.on(Band::Baseline, Self::on_apply_force);
        binder.on(Band::Baseline, Self::on_new_turn);
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::Physics(self.clone())
    }
}
