//! Bounded narration log.
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use game_core::{EntityRef, Line, Narrator};
use tracing::{debug, info};

/// Ring buffer of narration lines.
///
/// Oldest lines are evicted once `capacity` is reached. [`MessageLog::drain_new`]
/// hands out only the lines recorded since the previous call, which is how the
/// session reports what a single command caused.
#[derive(Debug)]
pub struct MessageLog {
    lines: RefCell<VecDeque<Line>>,
    capacity: usize,
    unread: Cell<usize>,
    trace: bool,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: RefCell::new(VecDeque::with_capacity(capacity)),
            capacity,
            unread: Cell::new(0),
            trace: false,
        }
    }

    /// Mirrors every recorded line into the tracing output.
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn push(&self, line: Line) {
        if self.trace {
            info!(target: "runtime::narration", "{}", line.plain_text());
        }
        let mut lines = self.lines.borrow_mut();
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
        self.unread
            .set((self.unread.get() + 1).min(self.capacity));
    }

    /// The last `count` lines, oldest first.
    pub fn recent(&self, count: usize) -> Vec<Line> {
        let lines = self.lines.borrow();
        let skip = lines.len().saturating_sub(count);
        lines.iter().skip(skip).cloned().collect()
    }

    /// Lines recorded since the previous call, oldest first.
    pub fn drain_new(&self) -> Vec<Line> {
        let unread = self.unread.replace(0);
        self.recent(unread)
    }

    pub fn lines(&self) -> Vec<Line> {
        self.lines.borrow().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
        self.unread.set(0);
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(64)
    }
}

impl Narrator for MessageLog {
    fn narrate(&self, line: Line, origin: Option<&EntityRef>) {
        if let Some(origin) = origin {
            debug!(target: "runtime::narration", origin = %origin.id(), "line recorded");
        }
        self.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> Line {
        Line::new().plain(text)
    }

    fn texts(lines: &[Line]) -> Vec<String> {
        lines.iter().map(Line::plain_text).collect()
    }

    #[test]
    fn evicts_oldest_lines_at_capacity() {
        let log = MessageLog::new(2);
        log.push(line("one"));
        log.push(line("two"));
        log.push(line("three"));
        assert_eq!(texts(&log.lines()), vec!["two", "three"]);
        assert_eq!(texts(&log.recent(1)), vec!["three"]);
        assert_eq!(texts(&log.recent(5)), vec!["two", "three"]);
    }

    #[test]
    fn drain_new_returns_each_line_once() {
        let log = MessageLog::new(8);
        log.push(line("a"));
        log.push(line("b"));
        assert_eq!(texts(&log.drain_new()), vec!["a", "b"]);
        assert!(log.drain_new().is_empty());
        log.push(line("c"));
        assert_eq!(texts(&log.drain_new()), vec!["c"]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn zero_capacity_keeps_one_line() {
        let log = MessageLog::new(0);
        log.push(line("a"));
        log.push(line("b"));
        assert_eq!(log.capacity(), 1);
        assert_eq!(texts(&log.lines()), vec!["b"]);
    }
}
