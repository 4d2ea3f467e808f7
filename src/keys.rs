use crate::app::App;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyEvent, KeyEventKind, KeyModifiers};
use std::ops::ControlFlow;

pub fn handle_key_bindings(key_event: KeyEvent, app: &mut App) -> ControlFlow<()> {
    if key_event.kind != KeyEventKind::Press {
        return ControlFlow::Continue(());
    }

    match (key_event.code, key_event.modifiers) {
        (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => return ControlFlow::Break(()),
        (Char('n'), _) => app.next_game(),
        (Char('r'), _) => app.force_refresh(),
        (Char('l'), _) => app.toggle_show_logs(),
        _ => {}
    }
    ControlFlow::Continue(())
}
