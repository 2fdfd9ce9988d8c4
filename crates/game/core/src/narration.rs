//! Inline colour markup for narration lines.
//!
//! A narration line is plain text with embedded colour runs. A run opens with
//! [`MARKER`] followed by a single digit naming a [`Tone`] and closes with a bare
//! [`MARKER`], returning to the default colour:
//!
//! ```text
//! %2Goblin% hits %3Player% with %1Sword%, it's effective
//! ```
//!
//! [`Line`] is the only way the core produces markup, and it always emits
//! balanced pairs. Text inserted into a line has stray markers stripped so a
//! display name can never unbalance it.

use std::fmt;

/// Character that opens (when followed by a digit) and closes a colour run.
pub const MARKER: char = '%';

/// Named colour runs understood by every presentation layer.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Tone {
    /// Weapons, items and skills.
    Item,
    /// The acting entity.
    Actor,
    /// The entity being acted upon.
    Target,
    /// Neutral emphasis (numbers, state changes).
    Notice,
    /// Warnings and deaths.
    Danger,
}

impl Tone {
    pub const fn digit(self) -> char {
        match self {
            Tone::Item => '1',
            Tone::Actor => '2',
            Tone::Target => '3',
            Tone::Notice => '4',
            Tone::Danger => '5',
        }
    }

    pub const fn from_digit(digit: char) -> Option<Tone> {
        match digit {
            '1' => Some(Tone::Item),
            '2' => Some(Tone::Actor),
            '3' => Some(Tone::Target),
            '4' => Some(Tone::Notice),
            '5' => Some(Tone::Danger),
            _ => None,
        }
    }
}

/// A narration line under construction.
///
/// Built fluently; every tinted run is closed before the builder returns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    markup: String,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn plain(mut self, text: impl AsRef<str>) -> Self {
        self.push_plain(text);
        self
    }

    #[must_use]
    pub fn tinted(mut self, tone: Tone, text: impl AsRef<str>) -> Self {
        self.push_tinted(tone, text);
        self
    }

    pub fn push_plain(&mut self, text: impl AsRef<str>) {
        self.markup.extend(sanitize(text.as_ref()));
    }

    pub fn push_tinted(&mut self, tone: Tone, text: impl AsRef<str>) {
        self.markup.push(MARKER);
        self.markup.push(tone.digit());
        self.markup.extend(sanitize(text.as_ref()));
        self.markup.push(MARKER);
    }

    /// Appends another line's markup. Both halves are balanced, so the result is.
    pub fn append(&mut self, other: &Line) {
        self.markup.push_str(&other.markup);
    }

    pub fn is_empty(&self) -> bool {
        self.markup.is_empty()
    }

    pub fn as_markup(&self) -> &str {
        &self.markup
    }

    /// The line with all colour runs removed.
    pub fn plain_text(&self) -> String {
        segments(&self.markup)
            .into_iter()
            .map(|segment| segment.text)
            .collect()
    }

    pub fn segments(&self) -> Vec<Segment<'_>> {
        segments(&self.markup)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.markup)
    }
}

fn sanitize(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter(|c| *c != MARKER)
}

/// A run of text sharing one colour. `tone == None` is the default colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    pub tone: Option<Tone>,
    pub text: &'a str,
}

/// Splits markup into coloured segments. Empty segments are dropped.
///
/// Markers followed by an unknown digit open a default-coloured run so that
/// foreign markup still renders.
pub fn segments(markup: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut tone = None;
    let mut open = false;
    let mut start = 0;
    let mut chars = markup.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        if c != MARKER {
            continue;
        }
        if start < index {
            out.push(Segment {
                tone,
                text: &markup[start..index],
            });
        }
        match chars.peek() {
            Some(&(digit_index, digit)) if digit.is_ascii_digit() && !open => {
                chars.next();
                tone = Tone::from_digit(digit);
                open = true;
                start = digit_index + digit.len_utf8();
            }
            _ => {
                tone = None;
                open = false;
                start = index + c.len_utf8();
            }
        }
    }
    if start < markup.len() {
        out.push(Segment {
            tone,
            text: &markup[start..],
        });
    }
    out
}

/// True when every opened run is closed and no close appears without an open.
pub fn is_balanced(markup: &str) -> bool {
    let mut open = false;
    let mut chars = markup.chars().peekable();
    while let Some(c) = chars.next() {
        if c != MARKER {
            continue;
        }
        match chars.peek() {
            Some(digit) if digit.is_ascii_digit() && !open => {
                chars.next();
                open = true;
            }
            _ if open => open = false,
            _ => return false,
        }
    }
    !open
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_emits_balanced_markup() {
        let line = Line::new()
            .tinted(Tone::Actor, "Goblin")
            .plain(" hits ")
            .tinted(Tone::Target, "Player")
            .plain(" with ")
            .tinted(Tone::Item, "Sword");
        assert_eq!(line.as_markup(), "%2Goblin% hits %3Player% with %1Sword%");
        assert!(is_balanced(line.as_markup()));
        assert_eq!(line.plain_text(), "Goblin hits Player with Sword");
    }

    #[test]
    fn inserted_markers_are_stripped() {
        let line = Line::new().tinted(Tone::Actor, "100% Goblin").plain(" 5%");
        assert!(is_balanced(line.as_markup()));
        assert_eq!(line.plain_text(), "100 Goblin 5");
    }

    #[test]
    fn segments_follow_runs() {
        let parsed = segments("%2Rat% bites %3you%!");
        assert_eq!(
            parsed,
            vec![
                Segment { tone: Some(Tone::Actor), text: "Rat" },
                Segment { tone: None, text: " bites " },
                Segment { tone: Some(Tone::Target), text: "you" },
                Segment { tone: None, text: "!" },
            ]
        );
    }

    #[test]
    fn digit_after_a_close_is_text() {
        let line = Line::new().tinted(Tone::Actor, "Rat").plain("3 bites");
        assert_eq!(line.plain_text(), "Rat3 bites");
        assert_eq!(
            line.segments(),
            vec![
                Segment { tone: Some(Tone::Actor), text: "Rat" },
                Segment { tone: None, text: "3 bites" },
            ]
        );
    }

    #[test]
    fn unbalanced_markup_is_detected() {
        assert!(!is_balanced("%2open"));
        assert!(!is_balanced("close%"));
        assert!(!is_balanced("%2a% is healed for %2b% points by %1c"));
        assert!(is_balanced("plain"));
    }
}
