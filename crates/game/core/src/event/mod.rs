//! The closed set of events.
//!
//! Events are passive records: the firer builds one from `Default`, sets the
//! fields it knows, and every handler in the chain reads earlier contributions
//! and writes its own. An event never outlives the firing call that carries it.
//!
//! [`Event`] is a tagged union over every payload type; [`EventTag`] is its
//! field-less discriminant and keys the handler chains on an entity. Adding an
//! event means adding a payload struct and one line to the `events!` list.
mod body;
mod combat;
mod interaction;
mod items;
mod presentation;
mod skills;

pub use body::{
    ApplyForce, GetAttributeLevel, GetBlockState, GetBlocksSight, GetSize, GetWeight, Move,
    NewTurn, SetBlockState, SetBlocksSight,
};
pub use combat::{
    CanAttack, CompileAttack, Died, DoAttack, DoDamage, DoHeal, GetAttackRange, GetHealth,
    GetResistance, PerformAttack, ResistDamage, ThrowItem,
};
pub use interaction::{GetSightRange, GetTeam, Open};
pub use items::{
    AcquireItem, CanPickup, ConsumeItem, DropAllItems, DropItem, Equip, GetEquipSlot, HasItem,
};
pub use presentation::{GetScreenName, GetStatList, SetGlyph};
pub use skills::{
    ActivateSkill, CompileSkillEffects, GetEnergy, GetSkillAttribute, GetSkillCompleted,
    GetSkillDescription, GetSkillUser, RequestUseSkill, SkillActivated, SkillEquipped,
};

/// A typed event payload that can travel through a handler chain.
pub trait Payload: Default + 'static {
    const TAG: EventTag;

    fn into_event(self) -> Event;

    /// The payload inside `event`, when `event` carries this type.
    fn payload_mut(event: &mut Event) -> Option<&mut Self>;
}

macro_rules! events {
    ($($payload:ident),* $(,)?) => {
        /// Every event a handler can receive.
        #[derive(Debug, strum::EnumDiscriminants)]
        #[strum_discriminants(
            name(EventTag),
            derive(Hash, strum::Display, strum::EnumIter, strum::AsRefStr)
        )]
        pub enum Event {
            $($payload($payload),)*
        }

        $(
            impl Payload for $payload {
                const TAG: EventTag = EventTag::$payload;

                fn into_event(self) -> Event {
                    Event::$payload(self)
                }

                fn payload_mut(event: &mut Event) -> Option<&mut Self> {
                    match event {
                        Event::$payload(payload) => Some(payload),
                        _ => None,
                    }
                }
            }

            impl From<$payload> for Event {
                fn from(payload: $payload) -> Self {
                    Event::$payload(payload)
                }
            }
        )*
    };
}

events! {
    // attack & combat
    DoAttack,
    GetAttackRange,
    CompileAttack,
    PerformAttack,
    CanAttack,
    DoDamage,
    ResistDamage,
    GetResistance,
    DoHeal,
    Died,
    GetHealth,
    ThrowItem,
    // attributes & body
    GetAttributeLevel,
    GetWeight,
    GetSize,
    GetBlockState,
    SetBlockState,
    GetBlocksSight,
    SetBlocksSight,
    ApplyForce,
    NewTurn,
    Move,
    // presentation
    GetScreenName,
    GetStatList,
    SetGlyph,
    // inventory & equipment
    AcquireItem,
    DropItem,
    DropAllItems,
    HasItem,
    ConsumeItem,
    CanPickup,
    Equip,
    GetEquipSlot,
    // interaction & factions
    Open,
    GetTeam,
    GetSightRange,
    // skills
    ActivateSkill,
    SkillActivated,
    RequestUseSkill,
    GetEnergy,
    GetSkillAttribute,
    GetSkillUser,
    SkillEquipped,
    CompileSkillEffects,
    GetSkillDescription,
    GetSkillCompleted,
}

impl Event {
    pub fn tag(&self) -> EventTag {
        EventTag::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn tags_are_unique_and_named() {
        let names: HashSet<String> = EventTag::iter().map(|tag| tag.to_string()).collect();
        assert_eq!(names.len(), EventTag::iter().count());
        assert_eq!(EventTag::DoDamage.to_string(), "DoDamage");
    }

    #[test]
    fn payload_extraction_matches_variant() {
        let mut event = Event::from(DoDamage {
            damage: 3,
            ..Default::default()
        });
        assert_eq!(event.tag(), DoDamage::TAG);
        assert!(DoHeal::payload_mut(&mut event).is_none());
        let payload = DoDamage::payload_mut(&mut event).map(|p| p.damage);
        assert_eq!(payload, Some(3));
    }
}
