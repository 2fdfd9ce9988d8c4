//! Doors, chests and locks.
//!
//! Opening is negotiated on the `Open` chain: a [`Lock`] at guard priority may
//! consume a key or stop the chain, [`Openable`] flips its state and reports
//! `was_opened`, and the baseline reactions ([`Door`], [`Chest`]) act on that
//! report.

use tracing::debug;

use crate::combat::screen_name;
use crate::entity::{Band, Binder, Component, Propagation, Receiver};
use crate::event::{
    ConsumeItem, Died, DropAllItems, GetScreenName, Open, SetBlockState, SetBlocksSight, SetGlyph,
};
use crate::narration::{Line, Tone};

use super::{ComponentKind, ComponentSnapshot};

// ============================================================================
// Lock
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lock {
    pub locked: bool,
    /// Prototype name of the key that opens this lock.
    pub key_type: String,
}

impl Lock {
    pub fn new(key_type: impl Into<String>) -> Self {
        Self {
            locked: true,
            key_type: key_type.into(),
        }
    }

    /// Consumes a matching key from the opener, or stops the chain so nothing
    /// below this lock sees the attempt.
    fn on_open(rx: &Receiver<'_, Self>, event: &mut Open) -> Propagation {
        let (locked, key_type) = {
            let lock = rx.state();
            (lock.locked, lock.key_type.clone())
        };
        if !locked {
            return Propagation::Continue;
        }
        let Some(opener) = event.asker.clone() else {
            return Propagation::Stop;
        };
        let env = rx.env();
        let owner = rx.owner();

        let request = opener.emit(
            env,
            ConsumeItem {
                item_name: key_type,
                ..Default::default()
            },
        );
        let Some(key) = request.consumed else {
            debug!(target: "game_core::components", lock = %owner.id(), opener = %opener.id(), "no key");
            return Propagation::Stop;
        };

        rx.state_mut().locked = false;
        let line = Line::new()
            .tinted(Tone::Actor, screen_name(env, &opener))
            .plain(" unlocks ")
            .tinted(Tone::Target, screen_name(env, owner))
            .plain(" with ")
            .tinted(Tone::Item, screen_name(env, &key));
        env.narrate(line, Some(&opener));
        Propagation::Continue
    }

    fn on_screen_name(rx: &Receiver<'_, Self>, event: &mut GetScreenName) -> Propagation {
        if rx.state().locked {
            event.text.push_str("Locked ");
        }
        Propagation::Continue
    }
}

impl Component for Lock {
    const KIND: ComponentKind = ComponentKind::Lock;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Guard, Self::on_open);
        binder.on(Band::Guard, Self::on_screen_name);
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::Lock(self.clone())
    }
}

// ============================================================================
// Openable
// ============================================================================

/// Something that can be opened once, switching to `opened_glyph`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Openable {
    pub opened: bool,
    pub opened_glyph: char,
}

impl Openable {
    pub fn new(opened_glyph: char) -> Self {
        Self {
            opened: false,
            opened_glyph,
        }
    }

    fn on_open(rx: &Receiver<'_, Self>, event: &mut Open) -> Propagation {
        let glyph = {
            let mut state = rx.state_mut();
            if state.opened {
                event.was_opened = false;
                return Propagation::Continue;
            }
            state.opened = true;
            state.opened_glyph
        };
        let env = rx.env();
        let owner = rx.owner();

        owner.emit(env, SetGlyph { glyph });
        event.was_opened = true;

        let mut line = Line::new();
        if let Some(opener) = &event.asker {
            line.push_tinted(Tone::Actor, screen_name(env, opener));
            line.push_plain(" opens ");
        } else {
            line.push_plain("Opened ");
        }
        line.push_tinted(Tone::Target, screen_name(env, owner));
        env.narrate(line, event.asker.as_ref());
        Propagation::Continue
    }
}

impl Component for Openable {
    const KIND: ComponentKind = ComponentKind::Openable;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Primary, Self::on_open);
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::Openable(self.clone())
    }
}

// ============================================================================
// Door / Chest
// ============================================================================

/// Stops blocking movement and sight once opened.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Door;

impl Door {
    fn on_open(rx: &Receiver<'_, Self>, event: &mut Open) -> Propagation {
        if event.was_opened {
            let owner = rx.owner();
            owner.emit(rx.env(), SetBlockState { blocking: false });
            owner.emit(rx.env(), SetBlocksSight { blocks: false });
        }
        Propagation::Continue
    }
}

impl Component for Door {
    const KIND: ComponentKind = ComponentKind::Door;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Baseline, Self::on_open);
    }

    fn duplicate(&self) -> Self {
        Door
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::Door
    }
}

/// Spills its inventory when opened or destroyed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Chest;

impl Chest {
    fn on_open(rx: &Receiver<'_, Self>, event: &mut Open) -> Propagation {
        if event.was_opened {
            rx.owner().emit(rx.env(), DropAllItems::default());
        }
        Propagation::Continue
    }

    fn on_died(rx: &Receiver<'_, Self>, _event: &mut Died) -> Propagation {
        rx.owner().emit(rx.env(), DropAllItems::default());
        Propagation::Continue
    }
}

impl Component for Chest {
    const KIND: ComponentKind = ComponentKind::Chest;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Baseline, Self::on_open);
        binder.on(Band::Baseline, Self::on_died);
    }

    fn duplicate(&self) -> Self {
        Chest
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::Chest
    }
}
