//! Invaders entry point
//!
//! Puts the terminal into raw/alternate-screen mode, runs the game until the
//! player quits, and always restores the terminal on the way out.
//!
//! Logs go to stderr; redirect them when enabling `RUST_LOG`, e.g.
//! `RUST_LOG=debug invaders 2> invaders.log`.

use std::io::{BufWriter, Write, stdout};

use crossterm::{
    ExecutableCommand, cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal,
};

use invaders::Game;
use invaders::Settings;
use invaders::audio::LogAudio;
use invaders::platform::{SystemClock, TerminalInput};
use invaders::renderer::TerminalRenderer;

fn main() -> std::io::Result<()> {
    env_logger::init();
    log::info!("Invaders starting...");

    let settings = Settings::load();

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for key-release events; terminals without the kitty protocol
    // refuse and input falls back to the hold window.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    log::info!("Keyboard enhancement: {}", keyboard_enhanced);

    let result = run(&mut out, settings, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = out.flush();
    let _ = terminal::disable_raw_mode();

    log::info!("Invaders exiting");
    result
}

fn run<W: Write>(out: &mut W, settings: Settings, keyboard_enhanced: bool) -> std::io::Result<()> {
    let renderer = TerminalRenderer::new(out)?;
    let input = TerminalInput::new(keyboard_enhanced);
    let mut game = Game::new(settings, renderer, LogAudio::default(), input, SystemClock::new());
    log::debug!("Effective settings: {:?}", game.settings());
    game.run();
    Ok(())
}
