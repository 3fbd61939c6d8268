mod game;
mod input;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use game::state::GameState;
use input::ClickState;
use time::GameTime;

/// Current wall clock in epoch milliseconds.
fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Resolve a browser mouse position to a terminal cell.
///
/// `DomBackend` renders the grid as a `<div>` directly under `<body>`;
/// its bounding rect anchors the pixel→cell conversion.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    input::pixel_to_cell(
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
        cs.terminal_cols,
        cs.terminal_rows,
    )
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    // Restore the save (browser only) and grant the offline catch-up once,
    // before the first tick runs.
    let mut initial = GameState::new();
    #[cfg(target_arch = "wasm32")]
    let loaded = game::save::load_game(&mut initial);
    #[cfg(not(target_arch = "wasm32"))]
    let loaded = false;
    if loaded {
        game::offline::apply_catchup(&mut initial, now_ms());
    }
    initial.last_save = now_ms();

    let state = Rc::new(RefCell::new(initial));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let game_time = Rc::new(RefCell::new(GameTime::new(game::logic::TICKS_PER_SEC)));

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch: convert pixels to a cell, hit-test the registered
    // targets, dispatch the action.
    terminal.on_mouse_event({
        let state = state.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_cols == 0 || cs.terminal_rows == 0 {
                return;
            }
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let matched = cs.hit_test(col, row);
            drop(cs);

            if let Some(action) = matched {
                let mut gs = state.borrow_mut();
                game::handle_click(&mut gs, action, (col, row), now_ms());
            }
        }
    });

    terminal.on_key_event({
        let state = state.clone();
        move |key_event| {
            let mut gs = state.borrow_mut();
            match key_event.code {
                KeyCode::Char(c) => game::handle_key(&mut gs, c, now_ms()),
                // Esc always returns to the water.
                KeyCode::Esc => game::handle_key(&mut gs, 'o', now_ms()),
                _ => {}
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let now = now_ms();

            {
                let mut gs = state.borrow_mut();
                let ticks = game_time.borrow_mut().advance(now);
                game::logic::tick(&mut gs, ticks, now);

                if gs.ticks_since_save >= game::save::AUTOSAVE_INTERVAL {
                    gs.ticks_since_save = 0;
                    gs.last_save = now;
                    #[cfg(target_arch = "wasm32")]
                    game::save::save_game(&gs);
                }
            }

            let gs = state.borrow();
            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }
            game::render::render(&gs, f, size, &click_state);
        }
    });

    Ok(())
}
