use game_core::DamageType;
use game_core::components::{
    Attack, Attribute, Attributes, Equipment, Inventory, Physics, Render, Resistance, Sense,
    SkillUser, Team, Think, Turn, Walk,
};
use game_core::entity::Entity;

/// Team numbers. Entities on the same team never target each other.
pub mod teams {
    pub const HEROES: u32 = 1;
    pub const MONSTERS: u32 = 2;
}

pub(super) fn player(entity: &Entity) {
    entity.attach(Physics::new(60, 70, 5, true));
    entity.attach(Render::new('@', "Player", 3).with_gore('%'));
    entity.attach(
        Attributes::new()
            .with(Attribute::Strength, 60)
            .with(Attribute::Wisdom, 40)
            .with(Attribute::Agility, 50)
            .with(Attribute::Blades, 30)
            .with(Attribute::Bows, 20)
            .with(Attribute::Throwing, 30),
    );
    entity.attach(Attack::new(4));
    entity.attach(Team::new(teams::HEROES));
    entity.attach(Walk);
    entity.attach(Sense::new(10));
    entity.attach(Inventory::new(10));
    entity.attach(Equipment::new());
    entity.attach(SkillUser::new(10, 0.25));
    entity.attach(Turn::new(2000));
}

pub(super) fn goblin(entity: &Entity) {
    entity.attach(Physics::new(30, 50, 4, true));
    entity.attach(Render::new('g', "Goblin", 2).with_gore('%'));
    entity.attach(Attributes::new().with(Attribute::Strength, 40));
    entity.attach(Attack::new(5));
    entity.attach(Team::new(teams::MONSTERS));
    entity.attach(Walk);
    entity.attach(Sense::new(8));
    entity.attach(Think::new());
    entity.attach(Turn::new(2000));
}

pub(super) fn rat(entity: &Entity) {
    entity.attach(Physics::new(8, 5, 1, true));
    entity.attach(Render::new('r', "Rat", 2).with_gore(','));
    entity.attach(Attack::new(2));
    entity.attach(Team::new(teams::MONSTERS));
    entity.attach(Walk);
    entity.attach(Sense::new(6));
    entity.attach(Think::new());
    entity.attach(Turn::new(2000));
}

/// Bones shrug off blunt force but crumble to arcane damage. Slow: acts on
/// every other cycle at the default initiative threshold.
pub(super) fn skeleton(entity: &Entity) {
    entity.attach(Physics::new(40, 40, 5, true));
    entity.attach(Render::new('s', "Skeleton", 2).with_gore('&'));
    entity.attach(Resistance::new(DamageType::Physical));
    entity.attach(Attack::new(6));
    entity.attach(Team::new(teams::MONSTERS));
    entity.attach(Walk);
    entity.attach(Sense::new(7));
    entity.attach(Think::new());
    entity.attach(Turn::new(1200));
}
