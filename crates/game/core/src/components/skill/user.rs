use std::rc::Rc;

use tracing::debug;

use crate::combat::{CombatInstance, process_combat, screen_name, skill_strength};
use crate::config::GameConfig;
use crate::entity::{Band, Binder, Component, EntityRef, Propagation, Receiver};
use crate::env::GameEnv;
use crate::event::{
    ActivateSkill, CompileSkillEffects, GetEnergy, GetSkillCompleted, GetStatList, NewTurn,
    PerformAttack, RequestUseSkill, SkillActivated, SkillEquipped,
};
use crate::narration::{Line, Tone};

use super::super::{ComponentKind, ComponentSnapshot};
use super::SkillUseMode;

/// Learned skills and the energy pool that pays for them.
#[derive(Clone, Debug)]
pub struct SkillUser {
    pub max_energy: i32,
    /// Fraction of an energy point regained per turn.
    pub regen: f32,
    energy: i32,
    next_energy_point: f32,
    skills: Vec<EntityRef>,
    /// Skill armed for the next attack, at most one at a time.
    pending: Option<EntityRef>,
}

impl SkillUser {
    /// A user with a full energy pool and no skills.
    pub fn new(max_energy: i32, regen: f32) -> Self {
        Self {
            max_energy,
            regen,
            energy: max_energy,
            next_energy_point: 0.0,
            skills: Vec::new(),
            pending: None,
        }
    }

    pub(crate) fn restored(
        max_energy: i32,
        regen: f32,
        energy: i32,
        next_energy_point: f32,
        skills: Vec<EntityRef>,
        pending: Option<EntityRef>,
    ) -> Self {
        Self {
            max_energy,
            regen,
            energy,
            next_energy_point,
            skills,
            pending,
        }
    }

    pub fn energy(&self) -> i32 {
        self.energy
    }

    pub fn skills(&self) -> &[EntityRef] {
        &self.skills
    }

    pub fn pending(&self) -> Option<&EntityRef> {
        self.pending.as_ref()
    }

    /// Adds `skill` to `user`'s skill list and tells the skill who owns it.
    ///
    /// Returns false when `user` has no skill user unit.
    pub fn learn(env: &GameEnv<'_>, user: &EntityRef, skill: EntityRef) -> bool {
        let Some(attached) = user.get::<SkillUser>() else {
            return false;
        };
        attached.state_mut().skills.push(skill.clone());
        skill.emit(
            env,
            SkillEquipped {
                user: Some(user.clone()),
            },
        );
        true
    }

    fn on_skill_activated(rx: &Receiver<'_, Self>, event: &mut SkillActivated) -> Propagation {
        let Some(skill) = event.skill.clone() else {
            return Propagation::Continue;
        };
        let env = rx.env();
        let owner = rx.owner();

        let required = skill.emit(env, GetEnergy::default()).required;
        let available = rx.state().energy;
        if required > available {
            debug!(
                target: "game_core::components",
                user = %owner.id(),
                required,
                available,
                "not enough energy"
            );
            let line = Line::new()
                .tinted(Tone::Actor, screen_name(env, owner))
                .plain(" lacks the energy for ")
                .tinted(Tone::Item, screen_name(env, &skill));
            env.narrate(line, Some(owner));
            return Propagation::Continue;
        }

        let activated = match event.use_mode {
            Some(SkillUseMode::NextAttack) => toggle_pending(rx, &skill),
            Some(SkillUseMode::SelfCast) => {
                cast_on_self(env, owner, &skill);
                true
            }
            None => false,
        };

        if activated {
            let mut user = rx.state_mut();
            user.energy -= required;
            user.next_energy_point = 0.0;
        }
        Propagation::Continue
    }

    /// An armed skill takes the attack over: the compiled instance becomes the
    /// seed of the skill's effects and the default resolution is vetoed.
    fn on_perform_attack(rx: &Receiver<'_, Self>, event: &mut PerformAttack) -> Propagation {
        let pending = rx.state().pending.clone();
        let Some(skill) = pending else {
            return Propagation::Continue;
        };
        let env = rx.env();
        let owner = rx.owner();

        event.combat.set_skill(&skill);
        let base_location = event
            .combat
            .defender()
            .map_or(owner.position(), |defender| defender.position());
        let effects = skill.emit(
            env,
            CompileSkillEffects {
                user: Some(owner.clone()),
                base_location,
                skill_strength: skill_strength(env, Some(owner), &skill),
                combats: vec![event.combat.clone()],
            },
        );
        for combat in &effects.combats {
            process_combat(env, combat);
        }

        let completed = skill
            .emit(env, GetSkillCompleted { completed: true })
            .completed;
        if completed {
            rx.state_mut().pending = None;
        }
        event.can_perform = false;
        Propagation::Continue
    }

    fn on_request(rx: &Receiver<'_, Self>, event: &mut RequestUseSkill) -> Propagation {
        let skill = rx.state().skills.get(event.slot).cloned();
        let Some(skill) = skill else {
            return Propagation::Continue;
        };
        event.found = true;
        skill.emit(
            rx.env(),
            ActivateSkill {
                activator: Some(rx.owner().clone()),
                use_mode: None,
            },
        );
        Propagation::Continue
    }

    /// Regenerates while below max and nothing is armed.
    fn on_new_turn(rx: &Receiver<'_, Self>, _event: &mut NewTurn) -> Propagation {
        let mut user = rx.state_mut();
        if user.energy < user.max_energy && user.pending.is_none() {
            user.next_energy_point += user.regen;
        }
        if user.next_energy_point >= GameConfig::ENERGY_POINT {
            user.next_energy_point = 0.0;
            user.energy = (user.energy + 1).min(user.max_energy);
        }
        Propagation::Continue
    }

    fn on_stat_list(rx: &Receiver<'_, Self>, event: &mut GetStatList) -> Propagation {
        let user = rx.state();
        event
            .stats
            .push(format!("energy      = {}/{}", user.energy, user.max_energy));
        Propagation::Continue
    }
}

/// Arms `skill`, or disarms it when it is already armed. A different armed
/// skill blocks the request.
fn toggle_pending(rx: &Receiver<'_, SkillUser>, skill: &EntityRef) -> bool {
    let env = rx.env();
    let owner = rx.owner();
    let armed = rx.state().pending.clone();
    let (armed_now, verb) = match armed {
        None => {
            rx.state_mut().pending = Some(skill.clone());
            (true, " readies ")
        }
        Some(armed) if Rc::ptr_eq(&armed, skill) => {
            rx.state_mut().pending = None;
            (false, " lowers ")
        }
        Some(_) => return false,
    };
    let line = Line::new()
        .tinted(Tone::Actor, screen_name(env, owner))
        .plain(verb)
        .tinted(Tone::Item, screen_name(env, skill));
    env.narrate(line, Some(owner));
    armed_now
}

fn cast_on_self(env: &GameEnv<'_>, user: &EntityRef, skill: &EntityRef) {
    let effects = skill.emit(
        env,
        CompileSkillEffects {
            user: Some(user.clone()),
            base_location: user.position(),
            skill_strength: skill_strength(env, Some(user), skill),
            combats: vec![CombatInstance::new(user, user).with_skill(skill)],
        },
    );
    for combat in &effects.combats {
        process_combat(env, combat);
    }
}

impl Component for SkillUser {
    const KIND: ComponentKind = ComponentKind::SkillUser;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Baseline, Self::on_skill_activated);
        binder.on(Band::Baseline, Self::on_perform_attack);
        binder.on(Band::Baseline, Self::on_request);
        binder.on(Band::Baseline, Self::on_new_turn);
        binder.on(Band::Detail, Self::on_stat_list);
    }

    /// Learned skills belong to the instance; the copy starts with none.
    fn duplicate(&self) -> Self {
        Self::new(self.max_energy, self.regen)
    }

    fn snapshot(&self) -> ComponentSnapshot {
        let pending = self
            .pending
            .as_ref()
            .and_then(|armed| self.skills.iter().position(|skill| Rc::ptr_eq(skill, armed)));
        ComponentSnapshot::SkillUser {
            max_energy: self.max_energy,
            regen: self.regen,
            energy: self.energy,
            next_energy_point: self.next_energy_point,
            skills: self.skills.iter().map(|skill| skill.snapshot()).collect(),
            pending,
        }
    }
}
