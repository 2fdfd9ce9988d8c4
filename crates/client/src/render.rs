//! ANSI colouring of narration markup.
use game_core::{Line, Tone};

const RESET: &str = "\x1b[0m";

fn escape(tone: Tone) -> &'static str {
    match tone {
        Tone::Item => "\x1b[36m",
        Tone::Actor => "\x1b[33m",
        Tone::Target => "\x1b[35m",
        Tone::Notice => "\x1b[32m",
        Tone::Danger => "\x1b[1;31m",
    }
}

/// Renders a line for the terminal; without colour the markup is stripped.
pub fn paint(line: &Line, color: bool) -> String {
    if !color {
        return line.plain_text();
    }
    let mut out = String::with_capacity(line.as_markup().len() + 16);
    for segment in line.segments() {
        match segment.tone {
            Some(tone) => {
                out.push_str(escape(tone));
                out.push_str(segment.text);
                out.push_str(RESET);
            }
            None => out.push_str(segment.text),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Line {
        Line::new()
            .tinted(Tone::Actor, "Goblin")
            .plain(" hits ")
            .tinted(Tone::Target, "Player")
    }

    #[test]
    fn plain_rendering_strips_markup() {
        assert_eq!(paint(&sample(), false), "Goblin hits Player");
    }

    #[test]
    fn coloured_runs_are_reset() {
        assert_eq!(
            paint(&sample(), true),
            "\x1b[33mGoblin\x1b[0m hits \x1b[35mPlayer\x1b[0m"
        );
    }
}
