//! Entities and the dispatch engine.
//!
//! An [`Entity`] owns a list of capability units and, per [`EventTag`], a
//! chain of handlers sorted by descending [`Priority`]. Firing an event walks
//! the chain front to back; any handler may return [`Propagation::Stop`] to end
//! that firing early.
//!
//! Handlers routinely fire *other* tags on the same entity or on entities named
//! inside the event (an attack handler asks for its range, compiles the attack,
//! then damages the defender). Firing the *same* tag on the same entity from
//! inside its own handling is outside the dispatch contract; it is tolerated
//! and counted (see [`Entity::reentrant_firings`]) but never relied upon.
mod binder;
mod chain;
mod component;
mod snapshot;

pub use binder::{Binder, HandlerFn, Receiver};
pub use chain::{Band, Priority, Propagation};
pub use component::{Attached, AttachedComponent, Component, ComponentKey};
pub use snapshot::EntitySnapshot;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::mem;
use std::rc::{Rc, Weak};

use tracing::{trace, warn};

use crate::components::ComponentKind;
use crate::env::GameEnv;
use crate::event::{Event, EventTag, Payload};
use crate::state::{EntityId, Position};

use chain::{HandlerChain, Registration};

/// Shared handle to an entity. Events and containers carry these; units hold
/// only weak back-references to their owner.
pub type EntityRef = Rc<Entity>;

pub struct Entity {
    id: EntityId,
    name: String,
    position: Cell<Position>,
    components: RefCell<Vec<Rc<dyn AttachedComponent>>>,
    chains: RefCell<HashMap<EventTag, HandlerChain>>,
    firing: RefCell<Vec<EventTag>>,
    reentrant: Cell<u32>,
    this: Weak<Entity>,
}

impl Entity {
    pub fn new(id: EntityId, name: impl Into<String>) -> EntityRef {
        let name = name.into();
        Rc::new_cyclic(|this| Entity {
            id,
            name,
            position: Cell::new(Position::ORIGIN),
            components: RefCell::new(Vec::new()),
            chains: RefCell::new(HashMap::new()),
            firing: RefCell::new(Vec::new()),
            reentrant: Cell::new(0),
            this: this.clone(),
        })
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Prototype name this entity was built from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Position {
        self.position.get()
    }

    /// Updates the stored position. Only the spatial index should call this;
    /// everything else requests movement through it.
    pub fn set_position(&self, position: Position) {
        self.position.set(position);
    }

    /// Strong handle to this entity, if it is still alive.
    pub fn handle(&self) -> Option<EntityRef> {
        self.this.upgrade()
    }

    // ========================================================================
    // Units
    // ========================================================================

    /// Appends `component` to the unit list, then runs its attach hook so it
    /// registers its handlers on this entity.
    pub fn attach<C: Component>(&self, component: C) -> Rc<Attached<C>> {
        let attached = Rc::new(Attached::new(component, self.this.clone()));
        self.components.borrow_mut().push(attached.clone());
        C::on_attach(&mut Binder::new(self, &attached));
        trace!(
            target: "game_core::dispatch",
            entity = %self.id,
            kind = %C::KIND,
            key = %attached.key(),
            "attached unit"
        );
        attached
    }

    /// Removes a unit and purges all of its handlers from every chain.
    ///
    /// Returns false when no unit with `key` is attached.
    pub fn detach(&self, key: ComponentKey) -> bool {
        let removed = {
            let mut components = self.components.borrow_mut();
            let before = components.len();
            components.retain(|component| component.key() != key);
            before != components.len()
        };
        if removed {
            let mut chains = self.chains.borrow_mut();
            for chain in chains.values_mut() {
                chain.purge(key);
            }
            chains.retain(|_, chain| !chain.is_empty());
            trace!(target: "game_core::dispatch", entity = %self.id, %key, "detached unit");
        }
        removed
    }

    /// First attached unit of type `C`.
    pub fn get<C: Component>(&self) -> Option<Rc<Attached<C>>> {
        let found = self
            .components
            .borrow()
            .iter()
            .find(|component| component.kind() == C::KIND)
            .cloned()?;
        found.into_any().downcast::<Attached<C>>().ok()
    }

    pub fn has(&self, kind: ComponentKind) -> bool {
        self.components
            .borrow()
            .iter()
            .any(|component| component.kind() == kind)
    }

    /// Kinds of the attached units, in attach order.
    pub fn kinds(&self) -> Vec<ComponentKind> {
        self.components
            .borrow()
            .iter()
            .map(|component| component.kind())
            .collect()
    }

    /// Builds a new entity by attaching a duplicate of every unit.
    ///
    /// Each duplicate's attach hook runs again on the copy, so its handlers
    /// bind to the new owner.
    pub fn instantiate(&self, id: EntityId) -> EntityRef {
        let copy = Entity::new(id, self.name.clone());
        copy.set_position(self.position());
        let components = self.components.borrow().clone();
        for component in components {
            component.copy_onto(&copy);
        }
        copy
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    pub(crate) fn register(&self, tag: EventTag, registration: Registration) {
        self.chains
            .borrow_mut()
            .entry(tag)
            .or_default()
            .insert(registration);
    }

    /// Delivers `event` to this entity's chain for its tag and hands the same
    /// reference back.
    ///
    /// A tag with no chain is a valid no-op. Handlers registered or removed
    /// while the firing runs take effect from the next firing.
    pub fn fire<'e>(&self, env: &GameEnv<'_>, event: &'e mut Event) -> &'e mut Event {
        let tag = event.tag();
        let handlers = match self.chains.borrow().get(&tag) {
            Some(chain) => chain.handlers(),
            None => {
                trace!(target: "game_core::dispatch", entity = %self.id, %tag, "no listeners");
                return event;
            }
        };

        if self.firing.borrow().contains(&tag) {
            self.reentrant.set(self.reentrant.get() + 1);
            warn!(
                target: "game_core::dispatch",
                entity = %self.id,
                %tag,
                "same tag fired while already in flight"
            );
        }
        self.firing.borrow_mut().push(tag);

        for (index, handler) in handlers.iter().enumerate() {
            if handler(env, event).is_stop() {
                trace!(
                    target: "game_core::dispatch",
                    entity = %self.id,
                    %tag,
                    stopped_at = index,
                    skipped = handlers.len() - index - 1,
                    "propagation stopped"
                );
                break;
            }
        }

        self.firing.borrow_mut().pop();
        event
    }

    /// Fires a typed payload and returns it after every handler has seen it.
    pub fn emit<E: Payload>(&self, env: &GameEnv<'_>, payload: E) -> E {
        let mut event = payload.into_event();
        self.fire(env, &mut event);
        E::payload_mut(&mut event).map(mem::take).unwrap_or_default()
    }

    /// Fires a payload that is owned elsewhere (usually the event a handler
    /// is currently processing) on this entity, writing the result back.
    pub fn forward<E: Payload>(&self, env: &GameEnv<'_>, payload: &mut E) {
        let taken = mem::take(payload);
        *payload = self.emit(env, taken);
    }

    /// Priorities registered for `tag`, in firing order.
    pub fn listeners(&self, tag: EventTag) -> Vec<Priority> {
        self.chains
            .borrow()
            .get(&tag)
            .map(|chain| chain.listeners().map(|(_, priority)| priority).collect())
            .unwrap_or_default()
    }

    /// Number of registrations owned by the unit `key`, across all tags.
    pub fn registrations_of(&self, key: ComponentKey) -> usize {
        self.chains
            .borrow()
            .values()
            .map(|chain| {
                chain
                    .listeners()
                    .filter(|(component, _)| *component == key)
                    .count()
            })
            .sum()
    }

    /// How many firings reused a tag that was already in flight on this entity.
    pub fn reentrant_firings(&self) -> u32 {
        self.reentrant.get()
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("position", &self.position.get())
            .field("kinds", &self.kinds())
            .finish()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.id)
    }
}
