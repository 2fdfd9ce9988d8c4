use crate::components::EquipSlot;
use crate::entity::EntityRef;

#[derive(Debug, Default)]
pub struct AcquireItem {
    pub item: Option<EntityRef>,
    pub acquired: bool,
}

/// Removes the first carried item named `item_name` and places it on the
/// carrier's tile.
#[derive(Debug, Default)]
pub struct DropItem {
    pub item_name: String,
    pub dropped: Option<EntityRef>,
}

#[derive(Debug, Default)]
pub struct DropAllItems {
    pub dropped: Vec<EntityRef>,
}

#[derive(Debug, Default)]
pub struct HasItem {
    pub item_name: String,
    pub has_item: bool,
}

/// Removes the first carried item named `item_name` and hands it to the caller.
#[derive(Debug, Default)]
pub struct ConsumeItem {
    pub item_name: String,
    pub has_item: bool,
    pub consumed: Option<EntityRef>,
}

/// Asked of an item on the floor: may `asker` pick you up?
#[derive(Debug, Default)]
pub struct CanPickup {
    pub asker: Option<EntityRef>,
    pub can_pickup: bool,
}

#[derive(Debug, Default)]
pub struct Equip {
    pub item: Option<EntityRef>,
    pub was_equipped: bool,
    /// Item displaced from the slot, if any.
    pub replaced: Option<EntityRef>,
}

/// Asked of an item: which slot do you go in?
#[derive(Debug, Default)]
pub struct GetEquipSlot {
    pub slot: Option<EquipSlot>,
}
