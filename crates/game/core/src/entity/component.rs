use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::components::{ComponentKind, ComponentSnapshot};

use super::binder::Binder;
use super::{Entity, EntityRef};

/// A capability unit: one orthogonal behaviour slice attached to an entity.
///
/// Units talk to each other only through events. A unit registers every
/// handler it needs in [`Component::on_attach`], which runs exactly once per
/// attachment; registrations are never copied, only rebuilt by attaching a
/// duplicate.
pub trait Component: Sized + 'static {
    const KIND: ComponentKind;

    /// Binds the unit to its owner and registers its handlers.
    fn on_attach(binder: &mut Binder<'_, Self>);

    /// Field-by-field copy used when instantiating from a prototype.
    fn duplicate(&self) -> Self;

    /// Enumerates the unit's fields for persistence.
    fn snapshot(&self) -> ComponentSnapshot;
}

/// Identity of one attachment, used to purge its handlers on detach.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentKey(pub(crate) u64);

impl ComponentKey {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        ComponentKey(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// A unit bound to its owner.
///
/// The owner is held weakly: entities own their units, never the reverse.
pub struct Attached<C> {
    key: ComponentKey,
    owner: Weak<Entity>,
    state: RefCell<C>,
}

impl<C: Component> Attached<C> {
    pub(crate) fn new(state: C, owner: Weak<Entity>) -> Self {
        Self {
            key: ComponentKey::next(),
            owner,
            state: RefCell::new(state),
        }
    }

    pub fn key(&self) -> ComponentKey {
        self.key
    }

    pub fn owner(&self) -> Option<EntityRef> {
        self.owner.upgrade()
    }

    /// Borrows the unit's fields.
    ///
    /// # Panics
    ///
    /// Panics if a handler of this unit currently holds a mutable borrow.
    pub fn state(&self) -> Ref<'_, C> {
        self.state.borrow()
    }

    /// Mutably borrows the unit's fields.
    ///
    /// # Panics
    ///
    /// Panics if the fields are already borrowed. Handlers copy what they
    /// need out of the state before firing nested events.
    pub fn state_mut(&self) -> RefMut<'_, C> {
        self.state.borrow_mut()
    }
}

/// Object-safe view of an attachment, stored in the owner's unit list.
pub trait AttachedComponent {
    fn key(&self) -> ComponentKey;
    fn kind(&self) -> ComponentKind;
    fn snapshot(&self) -> ComponentSnapshot;
    /// Attaches a duplicate of this unit to `target`, re-running its attach hook there.
    fn copy_onto(&self, target: &Entity);
    fn into_any(self: Rc<Self>) -> Rc<dyn Any>;
}

impl<C: Component> AttachedComponent for Attached<C> {
    fn key(&self) -> ComponentKey {
        self.key
    }

    fn kind(&self) -> ComponentKind {
        C::KIND
    }

    fn snapshot(&self) -> ComponentSnapshot {
        self.state.borrow().snapshot()
    }

    fn copy_onto(&self, target: &Entity) {
        let copy = self.state.borrow().duplicate();
        target.attach(copy);
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}
