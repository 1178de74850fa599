//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::{App, Metric, View};
use crate::topology::NodeType;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Char(' ') => app.toggle_pause(),
        KeyCode::Char('+' | '=') | KeyCode::Right => app.speed_up(),
        KeyCode::Char('-') | KeyCode::Left => app.speed_down(),
        KeyCode::Char('1') => app.show(View::Tier(NodeType::Ru)),
        KeyCode::Char('2') => app.show(View::Tier(NodeType::Du)),
        KeyCode::Char('3') => app.show(View::Tier(NodeType::Cu)),
        KeyCode::Char('n') => app.show(View::Network),
        KeyCode::Char('u') => app.set_metric(Metric::Utilization),
        KeyCode::Char('p') => app.set_metric(Metric::Power),
        KeyCode::End => app.skip_to_end(),
        KeyCode::Char('r') => app.restart(),
        _ => {}
    }
}
