use crate::entity::{Band, Binder, Component, EntityRef, Propagation, Receiver};
use crate::env::{GameEnv, SpatialIndex};
use crate::event::{GetBlocksSight, GetSightRange, SetBlocksSight};
use crate::state::{Position, Vec2};

use super::{ComponentKind, ComponentSnapshot};

/// True when `viewer` can see `tile`: within its sight range, with no opaque
/// terrain and no sight-blocking occupant on the tiles in between.
pub fn can_see(
    env: &GameEnv<'_>,
    map: &dyn SpatialIndex,
    viewer: &EntityRef,
    tile: Position,
) -> bool {
    let origin = viewer.position();
    let range = viewer.emit(env, GetSightRange::default()).range;
    if Vec2::from(tile - origin).magnitude() > range as f32 {
        return false;
    }
    let path = map.line(origin, tile);
    let between = path.len().saturating_sub(1);
    path.into_iter().take(between).all(|step| {
        !map.is_opaque(step)
            && !map
                .entities_at(step)
                .iter()
                .any(|occupant| occupant.emit(env, GetBlocksSight::default()).blocks)
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sense {
    pub sight_range: i32,
}

impl Sense {
    pub fn new(sight_range: i32) -> Self {
        Self { sight_range }
    }

    fn on_get_range(rx: &Receiver<'_, Self>, event: &mut GetSightRange) -> Propagation {
        event.range = rx.state().sight_range;
        Propagation::Continue
    }
}

impl Component for Sense {
    const KIND: ComponentKind = ComponentKind::Sense;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Baseline, Self::on_get_range);
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::Sense(self.clone())
    }
}

/// Blocks line of sight through the owner's tile while `blocks_sight` holds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obscuring {
    pub blocks_sight: bool,
}

impl Obscuring {
    pub fn new() -> Self {
        Self { blocks_sight: true }
    }

    fn on_get(rx: &Receiver<'_, Self>, event: &mut GetBlocksSight) -> Propagation {
        event.blocks |= rx.state().blocks_sight;
        Propagation::Continue
    }

    fn on_set(rx: &Receiver<'_, Self>, event: &mut SetBlocksSight) -> Propagation {
        rx.state_mut().blocks_sight = event.blocks;
        Propagation::Continue
    }
}

impl Default for Obscuring {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Obscuring {
    const KIND: ComponentKind = ComponentKind::Obscuring;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Baseline, Self::on_get);
        binder.on(Band::Baseline, Self::on_set);
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::Obscuring(self.clone())
    }
}
