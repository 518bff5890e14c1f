/// Entry point and host loop.
///
/// The loop polls the keyboard, forwards edges to whichever session is on
/// screen, lets that session's driver decide whether a step is due, and
/// redraws. Time is read here and passed down; nothing below reads a clock.

mod app;
mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::KeyCode;

use app::{App, Screen};
use config::GameConfig;
use ui::input::InputState;
use ui::keymap::{self, KEYS_QUIT, KEYS_RESET, KEYS_TOGGLE};
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = GameConfig::load();
    let mut app = App::new(&config);

    let mut renderer = Renderer::new();
    let release_events = renderer.init().context("terminal init failed")?;
    log::debug!("key release events available: {release_events}");

    let mut kb = InputState::new();
    kb.honor_release = release_events;

    let result = game_loop(&mut app, &mut renderer, &mut kb);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }
    result?;

    println!();
    println!("Thanks for playing!");
    Ok(())
}

fn game_loop(app: &mut App, renderer: &mut Renderer, kb: &mut InputState) -> anyhow::Result<()> {
    loop {
        kb.drain_events().context("reading keyboard")?;

        if kb.ctrl_c_pressed() {
            break;
        }
        let now = Instant::now();
        if handle_meta(app, kb, now) {
            break;
        }

        let events = match app.screen {
            Screen::Title => None,
            Screen::Snake => {
                forward_snake_input(app, kb);
                app.snake.advance(now)
            }
            Screen::Chase => {
                forward_chase_input(app, kb);
                app.chase.advance(now)
            }
        };
        // Message timers count simulation steps.
        if let Some(events) = events {
            app.announce(&events);
            app.tick_message();
        }

        renderer.render(app).context("drawing frame")?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

/// Screen switching and the Start/Pause/Reset controls. Returns true to quit.
fn handle_meta(app: &mut App, kb: &InputState, now: Instant) -> bool {
    match app.screen {
        Screen::Title => {
            if kb.any_pressed(KEYS_QUIT) {
                return true;
            }
            if kb.any_pressed(&[KeyCode::Char('1')]) {
                enter_screen(app, Screen::Snake);
            } else if kb.any_pressed(&[KeyCode::Char('2')]) {
                enter_screen(app, Screen::Chase);
            }
            false
        }
        Screen::Snake | Screen::Chase => {
            if kb.any_pressed(&[KeyCode::Esc]) {
                // Leaving a game pauses it; progress survives a round trip.
                app.snake.pause();
                app.chase.pause();
                app.clear_message();
                app.screen = Screen::Title;
                return false;
            }
            if kb.any_pressed(KEYS_TOGGLE) {
                toggle_active(app, now);
            } else if kb.any_pressed(KEYS_RESET) {
                match app.screen {
                    Screen::Snake => app.snake.reset(),
                    _ => app.chase.reset(),
                }
                app.set_message("Reset  [Enter] Start", 0);
            }
            false
        }
    }
}

fn enter_screen(app: &mut App, screen: Screen) {
    log::debug!("entering {screen:?}");
    app.screen = screen;
    let running = match screen {
        Screen::Snake => app.snake.is_running(),
        Screen::Chase => app.chase.is_running(),
        Screen::Title => true,
    };
    if !running {
        app.set_message("[Enter] Start", 0);
    }
}

fn toggle_active(app: &mut App, now: Instant) {
    let running = match app.screen {
        Screen::Snake => {
            app.snake.toggle(now);
            app.snake.is_running()
        }
        Screen::Chase => {
            app.chase.toggle(now);
            app.chase.is_running()
        }
        Screen::Title => return,
    };
    if running {
        app.clear_message();
    } else {
        app.set_message("PAUSED  [Enter] Resume", 0);
    }
}

fn forward_snake_input(app: &mut App, kb: &InputState) {
    for dir in keymap::snake_turns(kb) {
        app.snake.handle_input(dir);
    }
}

fn forward_chase_input(app: &mut App, kb: &InputState) {
    for input in keymap::chase_inputs(kb) {
        app.chase.handle_input(input);
    }
}
