//! Reusable clickable UI components.
//!
//! Rendering and click-target registration are co-located: whatever a
//! component draws, it also registers, so hotkey text on screen can never
//! drift out of sync with the tappable region (see `tests/lint_render.rs`).

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::Frame;
use ratzilla::ratatui::widgets::Paragraph;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// A one-row horizontal tab bar.
///
/// Tabs render as padded labels joined by a separator. Each label's click
/// target additionally covers the separator to its right, and the last tab
/// stretches to the area's right edge, leaving no dead columns between
/// tabs.
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
        }
    }

    /// Add a tab with its label, style, and action ID.
    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    /// Render the tab bar into `area` and register one click target per tab.
    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let sep_width = Line::from(self.separator).width() as u16;
        let tab_count = self.tabs.len();

        let mut spans: Vec<Span> = Vec::new();
        let mut cursor: u16 = 0;

        for (i, (label, style, action_id)) in self.tabs.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    self.separator.to_string(),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let padded = format!(" {} ", label);
            let width = Line::from(padded.as_str()).width() as u16;
            spans.push(Span::styled(padded, style));

            let is_last = i + 1 == tab_count;
            let target_width = if is_last {
                area.width.saturating_sub(cursor)
            } else {
                width + sep_width
            };
            if target_width > 0 && cursor < area.width {
                cs.add_click_target(
                    Rect::new(area.x + cursor, area.y, target_width, area.height.max(1)),
                    action_id,
                );
            }
            cursor += width + sep_width;
        }

        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Builder pairing rendered [`Line`]s with click actions.
///
/// Lines added with [`push_clickable`](Self::push_clickable) remember their
/// index; after rendering, one [`register_targets`](Self::register_targets)
/// call registers a row target for every clickable line at whatever row it
/// ended up on. Inserting or removing lines above a clickable entry moves
/// its target automatically.
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)` pairs.
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add a non-interactive line.
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a line that dispatches `action_id` when its row is tapped.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Consume the builder, returning the lines for rendering.
    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register row targets for every clickable line.
    ///
    /// * `top_offset` / `bottom_offset` — rows consumed by borders or
    ///   headers before/after the content (1 each for `Borders::ALL`).
    /// * `scroll` — lines scrolled off the top (0 when not scrollable).
    ///
    /// Lines scrolled out or clipped by the bottom edge register nothing.
    /// Each logical line is assumed to occupy exactly one visual row, so
    /// lists rendered through this builder must not use `Wrap`.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
    ) {
        let content_top = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        for &(line_idx, action_id) in &self.actions {
            if line_idx < scroll {
                continue;
            }
            let row = content_top + (line_idx - scroll);
            if row >= content_end {
                continue;
            }
            cs.add_row_target(area, row, action_id);
        }
    }
}
