use std::collections::BTreeMap;

use tracing::warn;

use crate::entity::{Band, Binder, Component, Propagation, Receiver};
use crate::event::{GetAttributeLevel, GetStatList};

use super::{ComponentKind, ComponentSnapshot};

/// Trainable attributes. Levels are out of 100.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attribute {
    Strength,
    Wisdom,
    Agility,
    Blades,
    Hammers,
    Polearms,
    Shields,
    Bows,
    Crossbows,
    Throwing,
}

/// Answers attribute level queries. Unlisted attributes are level 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    levels: BTreeMap<Attribute, i32>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, attribute: Attribute, level: i32) -> Self {
        self.levels.insert(attribute, level);
        self
    }

    pub fn level(&self, attribute: Attribute) -> i32 {
        self.levels.get(&attribute).copied().unwrap_or_default()
    }

    pub fn set(&mut self, attribute: Attribute, level: i32) {
        self.levels.insert(attribute, level);
    }

    fn on_get_level(rx: &Receiver<'_, Self>, event: &mut GetAttributeLevel) -> Propagation {
        match event.attribute {
            Some(attribute) => event.level = rx.state().level(attribute),
            None => warn!(
                target: "game_core::components",
                entity = %rx.owner().id(),
                "attribute level requested without an attribute"
            ),
        }
        Propagation::Continue
    }

    fn on_stat_list(rx: &Receiver<'_, Self>, event: &mut GetStatList) -> Propagation {
        for (attribute, level) in &rx.state().levels {
            event.stats.push(format!("{:<11} = {level}", attribute.as_ref()));
        }
        Propagation::Continue
    }
}

impl Component for Attributes {
    const KIND: ComponentKind = ComponentKind::Attributes;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Primary, Self::on_get_level);
        binder.on(Band::Detail, Self::on_stat_list);
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::Attributes(self.clone())
    }
}
