use tracing::debug;

use crate::combat::screen_name;
use crate::entity::{Band, Binder, Component, EntityRef, Propagation, Receiver};
use crate::env::GameEnv;
use crate::event::{
    AcquireItem, CanPickup, ConsumeItem, DropAllItems, DropItem, GetStatList, HasItem,
};
use crate::narration::{Line, Tone};

use super::{ComponentKind, ComponentSnapshot};

/// Carried items, matched by prototype name.
#[derive(Clone, Debug, Default)]
pub struct Inventory {
    capacity: usize,
    items: Vec<EntityRef>,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
        }
    }

    pub(crate) fn holding(capacity: usize, items: Vec<EntityRef>) -> Self {
        Self { capacity, items }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn items(&self) -> &[EntityRef] {
        &self.items
    }

    fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    fn take(&mut self, item_name: &str) -> Option<EntityRef> {
        let index = self.items.iter().position(|item| item.name() == item_name)?;
        Some(self.items.remove(index))
    }

    fn on_acquire(rx: &Receiver<'_, Self>, event: &mut AcquireItem) -> Propagation {
        let Some(item) = event.item.clone() else {
            return Propagation::Continue;
        };
        if rx.state().is_full() {
            return Propagation::Continue;
        }
        let env = rx.env();
        let owner = rx.owner();

        let carry = item.emit(
            env,
            CanPickup {
                asker: Some(owner.clone()),
                can_pickup: true,
            },
        );
        if !carry.can_pickup {
            return Propagation::Continue;
        }

        if let Ok(map) = env.map() {
            map.despawn(&item);
        }
        rx.state_mut().items.push(item.clone());
        event.acquired = true;

        let line = Line::new()
            .tinted(Tone::Actor, screen_name(env, owner))
            .plain(" grabs ")
            .tinted(Tone::Item, screen_name(env, &item));
        env.narrate(line, Some(owner));
        Propagation::Continue
    }

    fn on_drop(rx: &Receiver<'_, Self>, event: &mut DropItem) -> Propagation {
        let Some(item) = rx.state_mut().take(&event.item_name) else {
            return Propagation::Continue;
        };
        place_near(rx.env(), rx.owner(), &item);
        event.dropped = Some(item);
        Propagation::Continue
    }

    /// Spills everything onto the floor. Without a map the items stay put.
    fn on_drop_all(rx: &Receiver<'_, Self>, event: &mut DropAllItems) -> Propagation {
        let env = rx.env();
        if env.map().is_err() {
            return Propagation::Continue;
        }
        let items = std::mem::take(&mut rx.state_mut().items);
        for item in items.into_iter().rev() {
            place_near(env, rx.owner(), &item);
            event.dropped.push(item);
        }
        Propagation::Continue
    }

    fn on_has_item(rx: &Receiver<'_, Self>, event: &mut HasItem) -> Propagation {
        let inventory = rx.state();
        event.has_item |= inventory
            .items
            .iter()
            .any(|item| item.name() == event.item_name);
        Propagation::Continue
    }

    fn on_consume(rx: &Receiver<'_, Self>, event: &mut ConsumeItem) -> Propagation {
        if event.consumed.is_some() {
            return Propagation::Continue;
        }
        if let Some(item) = rx.state_mut().take(&event.item_name) {
            event.has_item = true;
            event.consumed = Some(item);
        }
        Propagation::Continue
    }

    fn on_stat_list(rx: &Receiver<'_, Self>, event: &mut GetStatList) -> Propagation {
        let inventory = rx.state();
        event.stats.push(format!(
            "carrying    = {}/{}",
            inventory.items.len(),
            inventory.capacity
        ));
        Propagation::Continue
    }
}

fn place_near(env: &GameEnv<'_>, owner: &EntityRef, item: &EntityRef) {
    let Ok(map) = env.map() else {
        return;
    };
    let at = map.nearest_open(owner.position()).unwrap_or(owner.position());
    if !map.spawn(item.clone(), at) {
        debug!(target: "game_core::components", item = %item.id(), %at, "drop failed");
    }
}

impl Component for Inventory {
    const KIND: ComponentKind = ComponentKind::Inventory;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Baseline, Self::on_acquire);
        binder.on(Band::Baseline, Self::on_drop);
        binder.on(Band::Baseline, Self::on_drop_all);
        binder.on(Band::Baseline, Self::on_has_item);
        binder.on(Band::Baseline, Self::on_consume);
        binder.on(Band::Detail, Self::on_stat_list);
    }

    /// Carried items belong to the instance, not the prototype.
    fn duplicate(&self) -> Self {
        Self::new(self.capacity)
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::Inventory {
            capacity: self.capacity,
            items: self.items.iter().map(|item| item.snapshot()).collect(),
        }
    }
}
