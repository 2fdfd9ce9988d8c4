use crate::entity::EntityRef;

/// Request by `asker` to open this entity.
#[derive(Debug, Default)]
pub struct Open {
    pub asker: Option<EntityRef>,
    pub was_opened: bool,
}

#[derive(Debug, Default)]
pub struct GetTeam {
    pub team: Option<u32>,
}

#[derive(Debug, Default)]
pub struct GetSightRange {
    pub range: i32,
}
