//! The standard prototype set.
//!
//! Each [`Prototype`] names one builder. A builder attaches units to a bare
//! entity carrying [`EntityId::PROTOTYPE`]; containers (inventories,
//! equipment, skill lists) start empty because their contents belong to
//! instances.

mod actors;
mod fixtures;
mod items;
mod skills;

use game_core::{Entity, EntityId, EntityRef};

pub use actors::teams;

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
#[strum(ascii_case_insensitive)]
pub enum Prototype {
    // actors
    Player,
    Goblin,
    Rat,
    Skeleton,
    // fixtures
    Door,
    LockedDoor,
    Chest,
    // items
    BrassKey,
    Sword,
    Bow,
    Rock,
    LeatherArmor,
    // skills
    PowerStrike,
    Mend,
    Shockwave,
}

/// Items a chest may be stocked with.
pub const LOOT: [Prototype; 5] = [
    Prototype::Sword,
    Prototype::Bow,
    Prototype::Rock,
    Prototype::LeatherArmor,
    Prototype::BrassKey,
];

impl Prototype {
    /// Builds a fresh prototype entity named after this variant.
    pub fn build(self) -> EntityRef {
        let entity = Entity::new(EntityId::PROTOTYPE, self.as_ref());
        match self {
            Prototype::Player => actors::player(&entity),
            Prototype::Goblin => actors::goblin(&entity),
            Prototype::Rat => actors::rat(&entity),
            Prototype::Skeleton => actors::skeleton(&entity),
            Prototype::Door => fixtures::door(&entity),
            Prototype::LockedDoor => fixtures::locked_door(&entity),
            Prototype::Chest => fixtures::chest(&entity),
            Prototype::BrassKey => items::brass_key(&entity),
            Prototype::Sword => items::sword(&entity),
            Prototype::Bow => items::bow(&entity),
            Prototype::Rock => items::rock(&entity),
            Prototype::LeatherArmor => items::leather_armor(&entity),
            Prototype::PowerStrike => skills::power_strike(&entity),
            Prototype::Mend => skills::mend(&entity),
            Prototype::Shockwave => skills::shockwave(&entity),
        }
        entity
    }

    pub fn is_actor(self) -> bool {
        matches!(
            self,
            Prototype::Player | Prototype::Goblin | Prototype::Rat | Prototype::Skeleton
        )
    }

    pub fn is_skill(self) -> bool {
        matches!(
            self,
            Prototype::PowerStrike | Prototype::Mend | Prototype::Shockwave
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::ComponentKind;
    use strum::IntoEnumIterator;

    #[test]
    fn builders_name_entities_after_their_variant() {
        for prototype in Prototype::iter() {
            let entity = prototype.build();
            assert_eq!(entity.name(), prototype.to_string());
            assert!(entity.id().is_prototype());
            assert!(!entity.kinds().is_empty(), "{prototype} has no units");
        }
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("lockeddoor".parse::<Prototype>().ok(), Some(Prototype::LockedDoor));
        assert_eq!("POWERSTRIKE".parse::<Prototype>().ok(), Some(Prototype::PowerStrike));
        assert!("Dragon".parse::<Prototype>().is_err());
    }

    #[test]
    fn actors_take_turns_and_skills_do_not() {
        for prototype in Prototype::iter() {
            let entity = prototype.build();
            assert_eq!(entity.has(ComponentKind::Turn), prototype.is_actor());
            assert_eq!(entity.has(ComponentKind::Skill), prototype.is_skill());
        }
    }

    #[test]
    fn loot_is_portable() {
        for prototype in LOOT {
            assert!(!prototype.is_actor() && !prototype.is_skill());
        }
    }
}
