use crate::entity::{Binder, Component};

use super::{ComponentKind, ComponentSnapshot};

/// Initiative bookkeeping read and written by the turn scheduler.
///
/// Registers no handlers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Turn {
    /// Initiative gained per scheduling cycle.
    pub speed: i32,
    pub initiative: i32,
}

impl Turn {
    pub fn new(speed: i32) -> Self {
        Self {
            speed,
            initiative: 0,
        }
    }
}

impl Component for Turn {
    const KIND: ComponentKind = ComponentKind::Turn;

    fn on_attach(_binder: &mut Binder<'_, Self>) {}

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::Turn(self.clone())
    }
}
