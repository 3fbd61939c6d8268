//! Silent Depths rendering: header, ocean scene, panels, and overlays.
//!
//! Every clickable thing drawn here registers a click target in the same
//! pass, so the tappable regions always match the pixels.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions;
use super::logic::{format_number, CAST_ENERGY_COST, ENERGY_MAX};
use super::state::{GameState, Panel, UpgradeKind};

/// Spreading ring, youngest to oldest.
const RIPPLE_PHASES: [char; 4] = ['·', 'o', 'O', '◯'];

/// The boat, stamped over the waves.
const BOAT_ART: [&str; 3] = ["   |\\   ", "   |_\\  ", "◥██████◤"];

pub fn render(state: &GameState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let mut cs = click_state.borrow_mut();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header: currencies, energy, zone
            Constraint::Length(1), // tab bar
            Constraint::Min(8),    // active panel
        ])
        .split(area);

    render_header(state, f, chunks[0]);
    render_tab_bar(state, f, chunks[1], &mut cs);

    match state.panel {
        Panel::Ocean => render_ocean(state, f, chunks[2], &mut cs),
        Panel::Upgrades => render_upgrades(state, f, chunks[2], &mut cs),
        Panel::Inventory => render_inventory(state, f, chunks[2]),
        Panel::Menu => render_menu(state, f, chunks[2], &mut cs),
    }

    render_notifications(state, f, chunks[2]);

    if state.offline_report.is_some() {
        render_offline_report(state, f, area, &mut cs);
    }
}

// ── Header ─────────────────────────────────────────────────────

fn render_header(state: &GameState, f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Silent Depths ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    let mut currencies = vec![
        Span::styled(
            format!(" 🐟 {}", format_number(state.fish)),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ⚪ {}", format_number(state.pearls)),
            Style::default().fg(Color::Magenta),
        ),
    ];
    // Artifacts stay hidden until the first one surfaces.
    if state.artifacts >= 1.0 {
        currencies.push(Span::styled(
            format!("  ⚱ {}", format_number(state.artifacts)),
            Style::default().fg(Color::Yellow),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(currencies)),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );

    let bar_width = if is_narrow_layout(area.width) { 8 } else { 14 };
    let energy_color = if state.boat_energy < CAST_ENERGY_COST {
        Color::Red
    } else {
        Color::Green
    };
    let mut status = vec![
        Span::styled(" ⚡", Style::default().fg(energy_color)),
        Span::styled(
            energy_bar(state.boat_energy, bar_width),
            Style::default().fg(energy_color),
        ),
        Span::styled(
            format!(" {:>3.0}", state.boat_energy.floor()),
            Style::default().fg(Color::Gray),
        ),
        Span::styled("  │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(state.zone().name, Style::default().fg(Color::Blue)),
    ];
    if state.active_multiplier > 1.0 {
        let blink = (state.anim_frame / 5) % 2 == 0;
        status.push(Span::styled(
            format!("  ×{:.0}", state.active_multiplier),
            Style::default()
                .fg(if blink { Color::Yellow } else { Color::White })
                .add_modifier(Modifier::BOLD),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(status)),
        Rect::new(inner.x, inner.y + 1, inner.width, 1),
    );
}

/// A fixed-width block gauge, e.g. `██████░░░░`.
fn energy_bar(energy: f64, width: usize) -> String {
    let filled = (((energy / ENERGY_MAX) * width as f64).round() as usize).min(width);
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width - filled));
    bar
}

// ── Tab bar ────────────────────────────────────────────────────

fn render_tab_bar(state: &GameState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let tab_style = |panel: Panel, color: Color| -> Style {
        if state.panel == panel {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        }
    };

    let narrow = is_narrow_layout(area.width);
    let label = |full: &str, short: &str| -> String {
        if narrow { short.to_string() } else { full.to_string() }
    };

    TabBar::new("│")
        .tab(
            label("[O] Ocean", "[O]"),
            tab_style(Panel::Ocean, Color::Cyan),
            actions::TAB_OCEAN,
        )
        .tab(
            label("[U] Upgrades", "[U]"),
            tab_style(Panel::Upgrades, Color::Green),
            actions::TAB_UPGRADES,
        )
        .tab(
            label("[I] Inventory", "[I]"),
            tab_style(Panel::Inventory, Color::Magenta),
            actions::TAB_INVENTORY,
        )
        .tab(
            label("[M] Menu", "[M]"),
            tab_style(Panel::Menu, Color::Blue),
            actions::TAB_MENU,
        )
        .render(f, area, cs);
}

// ── Ocean ──────────────────────────────────────────────────────

/// What a cell in the water scene holds, for styling runs.
#[derive(Clone, Copy, PartialEq)]
enum Ink {
    Water,
    Ripple,
    Boat,
}

fn classify(ch: char) -> Ink {
    match ch {
        '·' | 'o' | 'O' | '◯' => Ink::Ripple,
        '~' | '≈' | ' ' => Ink::Water,
        _ => Ink::Boat,
    }
}

fn ink_style(ink: Ink) -> Style {
    match ink {
        Ink::Water => Style::default().fg(Color::Blue),
        Ink::Ripple => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Ink::Boat => Style::default().fg(Color::Yellow),
    }
}

fn render_ocean(state: &GameState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", state.zone().name));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    // The whole water surface is one big cast target.
    cs.add_click_target(inner, actions::CAST);

    let w = inner.width as usize;
    let h = inner.height as usize;

    // Waves drift with the animation frame.
    let drift = (state.anim_frame / 4) as usize;
    let mut grid = vec![vec![' '; w]; h];
    for (y, row) in grid.iter_mut().enumerate() {
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = match (x + y * 5 + drift) % 14 {
                0 => '~',
                6 => '≈',
                9 => '~',
                _ => ' ',
            };
        }
    }

    // Boat bobs sideways one cell, a third of the way down.
    let boat_w = BOAT_ART[2].chars().count();
    if w > boat_w + 2 && h > BOAT_ART.len() + 2 {
        let bob = ((state.anim_frame / 12) % 2) as usize;
        let boat_x = (w - boat_w) / 2 + bob;
        let boat_y = h / 3;
        for (dy, art_row) in BOAT_ART.iter().enumerate() {
            for (dx, ch) in art_row.chars().enumerate() {
                if ch != ' ' {
                    grid[boat_y + dy][boat_x + dx] = ch;
                }
            }
        }
    }

    // Stamp ripples where casts landed, clamped into the water.
    for r in &state.ripples {
        let age = r.max_life.saturating_sub(r.life);
        let phase = ((age as usize * RIPPLE_PHASES.len()) / r.max_life.max(1) as usize)
            .min(RIPPLE_PHASES.len() - 1);
        let col = r.col.clamp(inner.x, inner.x + inner.width - 1) - inner.x;
        let row = r.row.clamp(inner.y, inner.y + inner.height - 1) - inner.y;
        grid[row as usize][col as usize] = RIPPLE_PHASES[phase];
    }

    // Convert the grid to styled lines, batching runs of the same ink.
    let mut lines: Vec<Line> = Vec::with_capacity(h);
    for row in &grid {
        let mut spans: Vec<Span> = Vec::new();
        let mut run = String::new();
        let mut ink = classify(row[0]);
        for &ch in row {
            let next = classify(ch);
            if next != ink {
                spans.push(Span::styled(std::mem::take(&mut run), ink_style(ink)));
                ink = next;
            }
            run.push(ch);
        }
        spans.push(Span::styled(run, ink_style(ink)));
        lines.push(Line::from(spans));
    }
    f.render_widget(Paragraph::new(lines), inner);

    // Status hint on the last water row.
    let hint = if state.boat_energy < CAST_ENERGY_COST {
        "the boat rests — too little energy to cast"
    } else if state.active_multiplier > 1.0 {
        "the spirit doubles every catch — cast!"
    } else {
        "tap the water to cast the line"
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center),
        Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1),
    );
}

// ── Upgrades ───────────────────────────────────────────────────

fn render_upgrades(state: &GameState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(" Upgrades ");

    let mut cl = ClickableList::new();
    for (i, kind) in UpgradeKind::all().iter().enumerate() {
        let level = state.upgrades.level(*kind);
        let price = state.upgrade_price(*kind);
        let affordable = state.currency_balance(kind.currency()) >= price;

        let name_style = if affordable {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let price_style = if affordable {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        cl.push_clickable(
            Line::from(vec![
                Span::styled(
                    format!(" [{}] ", kind.key()),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{:<14}", kind.name()), name_style),
                Span::styled(format!("Lv {:<3} ", level), Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("{} {}", format_number(price), kind.currency().name()),
                    price_style,
                ),
            ]),
            actions::BUY_UPGRADE_BASE + i as u16,
        );
        cl.push(Line::from(Span::styled(
            format!("      {}", kind.description()),
            Style::default().fg(Color::DarkGray),
        )));
    }
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        " Every level raises the price by half.",
        Style::default().fg(Color::DarkGray),
    )));

    cl.register_targets(area, cs, 1, 1, 0);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Inventory ──────────────────────────────────────────────────

fn render_inventory(state: &GameState, f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Inventory ");

    let zone = state.zone();
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);

    // The hold: a flavor split of everything ever caught.
    let total = state.total_fish_caught;
    let common = (total * 0.7).floor();
    let rare = (total * 0.2).floor();
    let legendary = (total * 0.1).floor();

    let mut lines = vec![
        Line::from(vec![
            Span::styled(" Zone: ", label),
            Span::styled(zone.name, value),
            Span::styled(format!("  (from {} m)", zone.min_depth), dim),
        ]),
        Line::from(vec![
            Span::styled("   dwellers: ", dim),
            Span::styled(zone.fauna.join(", "), Style::default().fg(Color::Blue)),
        ]),
        Line::from(vec![
            Span::styled(" Casts: ", label),
            Span::styled(format!("{}", state.depth), value),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            " Hold",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("   common fish     ", label),
            Span::styled(format_number(common), value),
        ]),
        Line::from(vec![
            Span::styled("   rare fish       ", label),
            Span::styled(format_number(rare), value),
        ]),
        Line::from(vec![
            Span::styled("   legendary fish  ", label),
            Span::styled(format_number(legendary), value),
        ]),
        Line::from(vec![
            Span::styled("   pearls          ", label),
            Span::styled(format_number(state.total_pearls_caught), value),
        ]),
        Line::from(vec![
            Span::styled("   artifacts       ", label),
            Span::styled(format_number(state.total_artifacts_found), value),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            " Achievements",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )),
    ];

    for a in &state.achievements {
        let (mark, mark_style, text_style) = if a.unlocked {
            ('✓', Style::default().fg(Color::Green), Style::default().fg(Color::White))
        } else {
            ('○', dim, dim)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("   {mark} "), mark_style),
            Span::styled(a.name, text_style),
            Span::styled(format!(" — {}", a.description), dim),
        ]));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Menu ───────────────────────────────────────────────────────

fn render_menu(state: &GameState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Menu ");

    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        " Game",
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
    )));
    cl.push_clickable(
        Line::from(vec![
            Span::styled(" [S] ", key_style),
            Span::styled("Save game", Style::default().fg(Color::White)),
        ]),
        actions::MENU_SAVE,
    );
    cl.push_clickable(
        Line::from(vec![
            Span::styled(" [E] ", key_style),
            Span::styled("Export save (.json)", Style::default().fg(Color::White)),
        ]),
        actions::MENU_EXPORT,
    );
    let reset_span = if state.confirm_reset {
        Span::styled(
            "Really wipe everything?",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("Reset progress", Style::default().fg(Color::Red))
    };
    cl.push_clickable(
        Line::from(vec![Span::styled(" [R] ", key_style), reset_span]),
        actions::MENU_RESET,
    );

    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        " About",
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(Span::styled(
        " A meditative journey across a quiet sea:",
        dim,
    )));
    cl.push(Line::from(Span::styled(
        " cast, breathe, and watch the depths open",
        dim,
    )));
    cl.push(Line::from(Span::styled(" one lantern at a time.", dim)));
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        " Progress autosaves every 30 seconds.",
        dim,
    )));

    cl.register_targets(area, cs, 1, 1, 0);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Overlays ───────────────────────────────────────────────────

fn render_notifications(state: &GameState, f: &mut Frame, area: Rect) {
    if area.width < 12 {
        return;
    }
    for (i, n) in state.notifications.iter().rev().enumerate() {
        let row = area.y + 1 + i as u16;
        if row + 1 >= area.y + area.height {
            break;
        }
        let text = format!(" {} ", n.text);
        let width = (Line::from(text.as_str()).width() as u16).min(area.width - 2);
        let rect = Rect::new(area.x + area.width - 1 - width, row, width, 1);

        let style = if n.life < 8 {
            // Fading out.
            Style::default().fg(Color::DarkGray)
        } else if n.is_important {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        f.render_widget(Paragraph::new(Line::from(Span::styled(text, style))), rect);
    }
}

fn render_offline_report(state: &GameState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let report = match &state.offline_report {
        Some(r) => r,
        None => return,
    };
    if area.width < 24 || area.height < 9 {
        // Too small for the overlay; any tap still dismisses it.
        return;
    }

    let w = (area.width - 4).min(44);
    let h = 8u16;
    let overlay = Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    );

    f.render_widget(Clear, overlay);
    cs.add_click_target(overlay, actions::DISMISS_REPORT);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("You were away {:.1} h.", report.hours),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            format!("The nets kept working: +{} fish", format_number(report.fish)),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "tap anywhere to continue",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Welcome back "),
        );
    f.render_widget(widget, overlay);
}
