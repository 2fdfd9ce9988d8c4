use std::fmt;

use crate::entity::EntityRef;

use super::damage::DamageType;

/// Named contributions a combat instance can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Contribution {
    Damage,
    Healing,
    DamageType,
    Weapon,
    Skill,
}

/// Transient aggregate for one attack, throw or heal.
///
/// Independent units augment it across several firings (compile, perform,
/// skill effects) before the pipeline resolves it. Every contribution is
/// optional; reading one that nobody set yields its zero value, and setting
/// one twice simply overwrites.
#[derive(Clone, Default)]
pub struct CombatInstance {
    attacker: Option<EntityRef>,
    defender: Option<EntityRef>,
    damage: Option<i32>,
    healing: Option<i32>,
    damage_type: Option<DamageType>,
    weapon: Option<EntityRef>,
    skill: Option<EntityRef>,
    cancelled: bool,
}

impl CombatInstance {
    pub fn new(attacker: &EntityRef, defender: &EntityRef) -> Self {
        Self {
            attacker: Some(attacker.clone()),
            defender: Some(defender.clone()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage = Some(damage);
        self
    }

    #[must_use]
    pub fn with_weapon(mut self, weapon: &EntityRef) -> Self {
        self.weapon = Some(weapon.clone());
        self
    }

    #[must_use]
    pub fn with_skill(mut self, skill: &EntityRef) -> Self {
        self.skill = Some(skill.clone());
        self
    }

    /// Copy of this instance aimed at a different defender.
    #[must_use]
    pub fn with_defender(&self, defender: &EntityRef) -> Self {
        Self {
            defender: Some(defender.clone()),
            ..self.clone()
        }
    }

    pub fn attacker(&self) -> Option<&EntityRef> {
        self.attacker.as_ref()
    }

    pub fn defender(&self) -> Option<&EntityRef> {
        self.defender.as_ref()
    }

    // ===== contributions =====

    pub fn damage(&self) -> i32 {
        self.damage.unwrap_or_default()
    }

    pub fn set_damage(&mut self, damage: i32) {
        self.damage = Some(damage);
    }

    pub fn add_damage(&mut self, delta: i32) {
        self.damage = Some(self.damage() + delta);
    }

    pub fn healing(&self) -> i32 {
        self.healing.unwrap_or_default()
    }

    pub fn set_healing(&mut self, healing: i32) {
        self.healing = Some(healing);
    }

    pub fn damage_type(&self) -> Option<DamageType> {
        self.damage_type
    }

    pub fn set_damage_type(&mut self, damage_type: DamageType) {
        self.damage_type = Some(damage_type);
    }

    pub fn weapon(&self) -> Option<&EntityRef> {
        self.weapon.as_ref()
    }

    pub fn set_weapon(&mut self, weapon: &EntityRef) {
        self.weapon = Some(weapon.clone());
    }

    pub fn skill(&self) -> Option<&EntityRef> {
        self.skill.as_ref()
    }

    pub fn set_skill(&mut self, skill: &EntityRef) {
        self.skill = Some(skill.clone());
    }

    /// Marks the transaction as abandoned; the pipeline drops it silently.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn is_set(&self, contribution: Contribution) -> bool {
        match contribution {
            Contribution::Damage => self.damage.is_some(),
            Contribution::Healing => self.healing.is_some(),
            Contribution::DamageType => self.damage_type.is_some(),
            Contribution::Weapon => self.weapon.is_some(),
            Contribution::Skill => self.skill.is_some(),
        }
    }

    /// True when attacker and defender are the same entities as `other`'s.
    pub fn same_parties(&self, other: &CombatInstance) -> bool {
        fn same(a: Option<&EntityRef>, b: Option<&EntityRef>) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => std::rc::Rc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
        }
        same(self.attacker(), other.attacker()) && same(self.defender(), other.defender())
    }
}

impl fmt::Debug for CombatInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombatInstance")
            .field("attacker", &self.attacker.as_ref().map(|e| e.id()))
            .field("defender", &self.defender.as_ref().map(|e| e.id()))
            .field("damage", &self.damage)
            .field("healing", &self.healing)
            .field("damage_type", &self.damage_type)
            .field("weapon", &self.weapon.as_ref().map(|e| e.id()))
            .field("skill", &self.skill.as_ref().map(|e| e.id()))
            .field("cancelled", &self.cancelled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::state::EntityId;
    use strum::IntoEnumIterator;

    #[test]
    fn unset_contributions_read_as_zero() {
        let combat = CombatInstance::default();
        assert_eq!(combat.damage(), 0);
        assert_eq!(combat.healing(), 0);
        assert_eq!(combat.damage_type(), None);
        assert!(combat.weapon().is_none());
        assert!(combat.skill().is_none());
        assert!(Contribution::iter().all(|c| !combat.is_set(c)));
    }

    #[test]
    fn writes_overwrite_without_error() {
        let mut combat = CombatInstance::default().with_damage(4);
        combat.set_damage(9);
        combat.set_damage(9);
        combat.add_damage(1);
        combat.set_damage_type(DamageType::Fire);
        combat.set_damage_type(DamageType::Cold);
        assert_eq!(combat.damage(), 10);
        assert_eq!(combat.damage_type(), Some(DamageType::Cold));
        assert!(combat.is_set(Contribution::Damage));
        assert!(!combat.is_set(Contribution::Healing));
    }

    #[test]
    fn parties_compare_by_identity() {
        let a = Entity::new(EntityId(1), "A");
        let b = Entity::new(EntityId(2), "B");
        let ab = CombatInstance::new(&a, &b);
        assert!(ab.same_parties(&CombatInstance::new(&a, &b)));
        assert!(!ab.same_parties(&CombatInstance::new(&b, &a)));
    }
}
