use crate::entity::{Band, Binder, Component, Propagation, Receiver};
use crate::event::{CanAttack, GetTeam};

use super::{ComponentKind, ComponentSnapshot};

/// Faction membership. Members of one team never attack each other.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    pub team: u32,
}

impl Team {
    pub fn new(team: u32) -> Self {
        Self { team }
    }

    /// Marks the target invalid when the asker reports the same team.
    /// Askers without a team are always allowed.
    fn on_can_attack(rx: &Receiver<'_, Self>, event: &mut CanAttack) -> Propagation {
        let Some(asker) = event.asker.clone() else {
            return Propagation::Continue;
        };
        let ours = rx.state().team;
        if asker.emit(rx.env(), GetTeam::default()).team == Some(ours) {
            event.valid_target = false;
        }
        Propagation::Continue
    }

    fn on_get_team(rx: &Receiver<'_, Self>, event: &mut GetTeam) -> Propagation {
        event.team = Some(rx.state().team);
        Propagation::Continue
    }
}

impl Component for Team {
    const KIND: ComponentKind = ComponentKind::Team;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Baseline, Self::on_can_attack);
        binder.on(Band::Baseline, Self::on_get_team);
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::Team(self.clone())
    }
}
