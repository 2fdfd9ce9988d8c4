use crate::entity::{Band, Binder, Component, Propagation, Receiver};
use crate::event::{Died, GetScreenName, SetGlyph};

use super::{ComponentKind, ComponentSnapshot};

/// How an entity looks: map glyph, corpse glyph, name and draw layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Render {
    pub glyph: char,
    pub gore_glyph: char,
    pub display_name: String,
    /// Higher layers draw over lower ones on the same tile.
    pub layer: u8,
}

impl Render {
    pub fn new(glyph: char, display_name: impl Into<String>, layer: u8) -> Self {
        Self {
            glyph,
            gore_glyph: glyph,
            display_name: display_name.into(),
            layer,
        }
    }

    #[must_use]
    pub fn with_gore(mut self, gore_glyph: char) -> Self {
        self.gore_glyph = gore_glyph;
        self
    }

    fn on_set_glyph(rx: &Receiver<'_, Self>, event: &mut SetGlyph) -> Propagation {
        rx.state_mut().glyph = event.glyph;
        Propagation::Continue
    }

    fn on_screen_name(rx: &Receiver<'_, Self>, event: &mut GetScreenName) -> Propagation {
        event.text.push_str(&rx.state().display_name);
        Propagation::Continue
    }

    fn on_died(rx: &Receiver<'_, Self>, _event: &mut Died) -> Propagation {
        let mut render = rx.state_mut();
        render.glyph = render.gore_glyph;
        Propagation::Continue
    }
}

impl Component for Render {
    const KIND: ComponentKind = ComponentKind::Render;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Baseline, Self::on_set_glyph);
        binder.on(Band::Primary, Self::on_screen_name);
        binder.on(Band::Baseline, Self::on_died);
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::Render(self.clone())
    }
}
