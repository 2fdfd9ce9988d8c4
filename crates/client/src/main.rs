//! Dungeon game client binary.
//!
//! Composition root for a headless play session:
//! 1. Load `.env` and client/runtime configuration
//! 2. Install logging (stderr, optional file)
//! 3. Build the demo level
//! 4. Read line commands from stdin and print the narration they cause
mod config;
mod input;
mod logging;
mod render;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use game_core::GameError;
use game_core::combat::screen_name;
use game_core::components::Render;
use runtime::{RuntimeConfig, Session};

use config::ClientConfig;
use input::Input;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let client_config = ClientConfig::from_env();
    let _guard = logging::setup_logging(&client_config)?;

    let runtime_config = RuntimeConfig::from_env();
    tracing::info!("Starting Dungeon client");
    tracing::debug!(?runtime_config, "runtime configuration");

    let mut session = match runtime::demo(runtime_config) {
        Ok(session) => session,
        Err(error) => {
            tracing::error!(
                code = error.error_code(),
                severity = %error.severity(),
                "Failed to build the level: {error}"
            );
            return Err(error.into());
        }
    };
    let color = client_config.color;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    print_lines(&mut stdout, &session.log().drain_new(), color)?;
    writeln!(stdout, "Type `help` for commands.")?;

    let mut buffer = String::new();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;
        buffer.clear();
        if stdin.lock().read_line(&mut buffer)? == 0 {
            break;
        }

        let parsed = match input::parse(&buffer) {
            Ok(parsed) => parsed,
            Err(error) => {
                writeln!(stdout, "{error}")?;
                continue;
            }
        };

        match parsed {
            Input::Quit => break,
            Input::Help => writeln!(stdout, "{}", input::HELP)?,
            Input::Play(command) => {
                let report = session.command(command)?;
                print_lines(&mut stdout, &report.lines, color)?;
                if !report.spent {
                    writeln!(stdout, "Nothing happens.")?;
                }
                if !report.player_alive {
                    writeln!(stdout, "You have died.")?;
                    break;
                }
            }
            Input::Look => look(&mut stdout, &session)?,
            Input::Stats => {
                for stat in session.player_stats()? {
                    writeln!(stdout, "  {stat}")?;
                }
            }
            Input::Skills => {
                for (slot, (name, description)) in
                    session.skill_descriptions()?.iter().enumerate()
                {
                    let description = render::paint(description, color);
                    writeln!(stdout, "  [{}] {name}: {}", slot + 1, description.trim_end())?;
                }
            }
            Input::Snapshot => writeln!(stdout, "{}", session.snapshot_json()?)?,
        }
    }

    tracing::info!(cycles = session.cycle(), "Session ended");
    Ok(())
}

fn print_lines(out: &mut impl Write, lines: &[game_core::Line], color: bool) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", render::paint(line, color))?;
    }
    Ok(())
}

fn look(out: &mut impl Write, session: &Session) -> Result<()> {
    let player = session.player()?;
    writeln!(out, "You stand at {}.", player.position())?;
    let env = session.env();
    for entity in session.visible_entities()? {
        let glyph = entity
            .get::<Render>()
            .map_or('?', |render| render.state().glyph);
        writeln!(
            out,
            "  {glyph} {} at {}",
            screen_name(&env, &entity),
            entity.position()
        )?;
    }
    Ok(())
}
