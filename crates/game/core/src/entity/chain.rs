use std::fmt;
use std::rc::Rc;

use crate::env::GameEnv;
use crate::event::Event;

use super::component::ComponentKey;

/// Ordering key of a handler within one tag's chain. Higher runs first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Priority(pub i32);

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named priority bands, ascending.
///
/// Every unit that reacts to the same tag picks a band so that rules which
/// must see an event first (invulnerability, locks, range gates) sit above
/// the rules that establish baselines, which in turn sit above the rules that
/// only observe the outcome.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Band {
    /// 0: default handlers and final consumers (apply damage, open doors).
    Baseline,
    /// 500: secondary detail (extra stat lines).
    Detail,
    /// 1000: primary contributors (weapons, resistance, attributes).
    Primary,
    /// 2000: guards that can veto the primary rule (locks).
    Guard,
    /// 3000: leading text for composed descriptions.
    Preface,
    /// 5000: rules that widen the set of affected targets.
    Expand,
    /// 7000: secondary headline text.
    Lead,
    /// 7500: headline text.
    Headline,
    /// 10000: interceptors that must see the event before anyone else.
    Intercept,
}

impl Band {
    pub const fn priority(self) -> Priority {
        Priority(match self {
            Band::Baseline => 0,
            Band::Detail => 500,
            Band::Primary => 1000,
            Band::Guard => 2000,
            Band::Preface => 3000,
            Band::Expand => 5000,
            Band::Lead => 7000,
            Band::Headline => 7500,
            Band::Intercept => 10000,
        })
    }
}

impl From<Band> for Priority {
    fn from(band: Band) -> Self {
        band.priority()
    }
}

/// Signal returned by every handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    /// End this firing; lower-priority handlers are skipped.
    Stop,
}

impl Propagation {
    pub const fn is_stop(self) -> bool {
        matches!(self, Propagation::Stop)
    }

    /// `Continue` when `proceed` holds, `Stop` otherwise.
    pub const fn continue_if(proceed: bool) -> Self {
        if proceed {
            Propagation::Continue
        } else {
            Propagation::Stop
        }
    }
}

pub(crate) type Handler = Rc<dyn Fn(&GameEnv<'_>, &mut Event) -> Propagation>;

#[derive(Clone)]
pub(crate) struct Registration {
    pub(crate) component: ComponentKey,
    pub(crate) priority: Priority,
    pub(crate) handler: Handler,
}

/// Handlers for one tag, sorted by descending priority, FIFO among equals.
#[derive(Clone, Default)]
pub(crate) struct HandlerChain {
    entries: Vec<Registration>,
}

impl HandlerChain {
    /// Inserts after every entry whose priority is greater than or equal to
    /// the new one, keeping equal priorities in registration order.
    pub(crate) fn insert(&mut self, registration: Registration) {
        let at = self
            .entries
            .partition_point(|existing| existing.priority >= registration.priority);
        self.entries.insert(at, registration);
    }

    pub(crate) fn purge(&mut self, component: ComponentKey) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.component != component);
        before - self.entries.len()
    }

    /// Snapshot of the handlers, so a firing is unaffected by registrations
    /// that change while it runs.
    pub(crate) fn handlers(&self) -> Vec<Handler> {
        self.entries
            .iter()
            .map(|entry| Rc::clone(&entry.handler))
            .collect()
    }

    pub(crate) fn listeners(&self) -> impl Iterator<Item = (ComponentKey, Priority)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.component, entry.priority))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
