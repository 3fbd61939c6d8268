//! Shared input plumbing: click targets, hit testing, pixel→cell conversion.
//!
//! The render pass registers rectangular click targets tagged with semantic
//! action IDs; the mouse handler converts browser pixel coordinates into
//! terminal cells and hit-tests them here. Keyboard keys dispatch the same
//! actions, so game code never sees raw coordinates except for ripple
//! placement.

use ratzilla::ratatui::layout::Rect;

/// A screen region that triggers an action when tapped or clicked.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// Hit region in terminal cell coordinates.
    pub rect: Rect,
    /// Semantic action ID (constants live in `game::actions`).
    pub action_id: u16,
}

/// Shared between the render loop (which registers targets every frame)
/// and the mouse handler (which hit-tests them).
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    /// Register a rectangular click target.
    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Convenience: register a full-width single-row target inside `area`.
    /// Rows outside the area are silently ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.targets.push(ClickTarget {
                rect: Rect::new(area.x, row, area.width, 1),
                action_id,
            });
        }
    }

    /// Find the action for a terminal cell. Targets registered later sit
    /// "on top" (overlays register last), so the scan runs in reverse.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            if col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height {
                Some(t.action_id)
            } else {
                None
            }
        })
    }
}

/// Below this column count the layout stacks panels vertically.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Convert a pixel position (relative to the grid container's top-left
/// corner) into a terminal cell.
///
/// Returns `None` for positions outside the grid or degenerate inputs
/// (zero-sized grid, zero-dimension terminal).
pub fn pixel_to_cell(
    click_x: f64,
    click_y: f64,
    grid_width: f64,
    grid_height: f64,
    terminal_cols: u16,
    terminal_rows: u16,
) -> Option<(u16, u16)> {
    if grid_width <= 0.0 || grid_height <= 0.0 || terminal_cols == 0 || terminal_rows == 0 {
        return None;
    }
    if click_x < 0.0 || click_y < 0.0 {
        return None;
    }

    let col = (click_x / (grid_width / terminal_cols as f64)) as u16;
    let row = (click_y / (grid_height / terminal_rows as f64)) as u16;

    if col >= terminal_cols || row >= terminal_rows {
        return None;
    }
    Some((col, row))
}
