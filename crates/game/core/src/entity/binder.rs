use std::cell::{Ref, RefMut};
use std::rc::Rc;

use crate::env::GameEnv;
use crate::event::{Event, Payload};

use super::chain::{Handler, Priority, Propagation, Registration};
use super::component::{Attached, Component, ComponentKey};
use super::{Entity, EntityRef};

/// Handler signature for unit `C` reacting to event `E`.
pub type HandlerFn<C, E> = fn(&Receiver<'_, C>, &mut E) -> Propagation;

/// Registration surface handed to [`Component::on_attach`].
///
/// This is the only way to add handlers to an entity, which confines
/// registration to the attach hook.
pub struct Binder<'a, C: Component> {
    owner: &'a Entity,
    attached: &'a Rc<Attached<C>>,
}

impl<'a, C: Component> Binder<'a, C> {
    pub(crate) fn new(owner: &'a Entity, attached: &'a Rc<Attached<C>>) -> Self {
        Self { owner, attached }
    }

    pub fn owner(&self) -> &Entity {
        self.owner
    }

    pub fn state(&self) -> Ref<'_, C> {
        self.attached.state()
    }

    pub fn state_mut(&self) -> RefMut<'_, C> {
        self.attached.state_mut()
    }

    /// Registers `handler` for events of type `E` on the owner.
    ///
    /// The closure holds weak references to both the unit and the owner, so a
    /// detached unit or a dropped entity turns a stale registration into a
    /// no-op instead of a cycle.
    pub fn on<E: Payload>(&mut self, priority: impl Into<Priority>, handler: HandlerFn<C, E>) {
        let unit = Rc::downgrade(self.attached);
        let owner = self.owner.this.clone();
        let callback: Handler = Rc::new(move |env: &GameEnv<'_>, event: &mut Event| {
            let (Some(unit), Some(owner)) = (unit.upgrade(), owner.upgrade()) else {
                return Propagation::Continue;
            };
            let Some(payload) = E::payload_mut(event) else {
                return Propagation::Continue;
            };
            let receiver = Receiver {
                attached: &unit,
                owner: &owner,
                env,
            };
            handler(&receiver, payload)
        });

        self.owner.register(
            E::TAG,
            Registration {
                component: self.attached.key(),
                priority: priority.into(),
                handler: callback,
            },
        );
    }
}

/// What a handler sees while reacting to one event.
pub struct Receiver<'a, C> {
    attached: &'a Attached<C>,
    owner: &'a EntityRef,
    env: &'a GameEnv<'a>,
}

impl<'a, C: Component> Receiver<'a, C> {
    pub fn owner(&self) -> &'a EntityRef {
        self.owner
    }

    pub fn env(&self) -> &'a GameEnv<'a> {
        self.env
    }

    pub fn key(&self) -> ComponentKey {
        self.attached.key()
    }

    /// Borrows the unit's fields. Drop the guard before firing nested events
    /// that may come back to this unit.
    pub fn state(&self) -> Ref<'a, C> {
        self.attached.state()
    }

    pub fn state_mut(&self) -> RefMut<'a, C> {
        self.attached.state_mut()
    }
}
