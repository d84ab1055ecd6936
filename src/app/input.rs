use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::executor::ActionKind;
use crate::model::Focus;

use super::state::{CountPrompt, PendingActionKind};
use super::App;

/// Result of handling a key: Quit the app, or key was consumed (needs render).
/// None means the key was not handled.
pub enum InputResult {
    Quit,
    Consumed,
}

/// Handle a key event. Returns Some(Quit) to exit, Some(Consumed) if key was handled and
/// a render is needed, None if the key was not handled.
pub fn handle_key(app: &mut App, key_event: KeyEvent) -> Option<InputResult> {
    let KeyEvent { code, modifiers, kind, .. } = key_event;

    if kind == KeyEventKind::Release {
        return None;
    }
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Some(InputResult::Quit);
    }

    if app.count_prompt.is_some() {
        return handle_count_prompt(app, code);
    }

    if let Some(pa) = app.pending_action.take() {
        if code == KeyCode::Char('y') || code == KeyCode::Char('Y') {
            match pa.kind {
                PendingActionKind::BulkAction(kind) => app.confirm_action(kind),
            }
        }
        return Some(InputResult::Consumed);
    }

    match app.focus {
        Focus::SealInput => handle_seal_input(app, code),
        Focus::Applications => handle_applications(app, code),
        Focus::Pools => handle_pools(app, code),
    }
}

fn handle_count_prompt(app: &mut App, code: KeyCode) -> Option<InputResult> {
    let Some(prompt) = app.count_prompt.as_mut() else { return None };
    match code {
        KeyCode::Char(c) => prompt.push(c),
        KeyCode::Backspace => prompt.pop(),
        KeyCode::Esc => app.count_prompt = None,
        KeyCode::Enter => match prompt.parse() {
            Some(target) => {
                app.count_prompt = None;
                app.request_action(ActionKind::Manual { target });
            }
            None => app.dashboard.set_error("Enter a target instance count"),
        },
        _ => return None,
    }
    Some(InputResult::Consumed)
}

fn handle_seal_input(app: &mut App, code: KeyCode) -> Option<InputResult> {
    match code {
        KeyCode::Enter => app.start_lookup(),
        KeyCode::Esc | KeyCode::Tab => app.focus = Focus::Applications,
        KeyCode::BackTab => app.focus = Focus::SealInput.prev(),
        KeyCode::Backspace => {
            app.dashboard.seal_input.pop();
        }
        KeyCode::Char(c) if !c.is_control() => app.dashboard.seal_input.push(c),
        _ => return None,
    }
    Some(InputResult::Consumed)
}

fn handle_applications(app: &mut App, code: KeyCode) -> Option<InputResult> {
    match code {
        KeyCode::Char('q') => return Some(InputResult::Quit),
        KeyCode::Char('/') => app.focus = Focus::SealInput,
        KeyCode::Tab => app.focus = Focus::Applications.next(),
        KeyCode::BackTab => app.focus = Focus::Applications.prev(),
        KeyCode::Up => {
            if app.cursor.app_index == 0 {
                return None;
            }
            app.cursor.app_index -= 1;
        }
        KeyCode::Down => {
            if app.cursor.app_index + 1 >= app.dashboard.applications().len() {
                return None;
            }
            app.cursor.app_index += 1;
        }
        KeyCode::Enter | KeyCode::Right => app.open_application(),
        KeyCode::Char('e') => app.export_application(),
        _ => return None,
    }
    Some(InputResult::Consumed)
}

fn handle_pools(app: &mut App, code: KeyCode) -> Option<InputResult> {
    match code {
        KeyCode::Char('q') => return Some(InputResult::Quit),
        KeyCode::Char('/') => app.focus = Focus::SealInput,
        KeyCode::Tab => app.focus = Focus::Pools.next(),
        KeyCode::BackTab | KeyCode::Esc | KeyCode::Left => app.focus = Focus::Pools.prev(),
        KeyCode::Up => {
            if app.cursor.pool_index == 0 {
                return None;
            }
            app.cursor.pool_index -= 1;
        }
        KeyCode::Down => {
            if app.cursor.pool_index + 1 >= app.dashboard.pools().len() {
                return None;
            }
            app.cursor.pool_index += 1;
        }
        KeyCode::Char(' ') => app.toggle_pool_at_cursor(),
        KeyCode::Char('a') => app.dashboard.select_all_pools(),
        KeyCode::Char('c') => app.dashboard.clear_selection(),
        KeyCode::Char('m') => {
            if app.dashboard.is_processing() {
                app.dashboard.set_info("An action is already in progress...");
            } else if !app.dashboard.selection().is_empty() {
                app.count_prompt = Some(CountPrompt::default());
            }
        }
        KeyCode::Char('d') => app.request_action(ActionKind::Automatic),
        KeyCode::Char('r') => app.reload_pools(),
        KeyCode::Char('e') => app.export_application(),
        _ => return None,
    }
    Some(InputResult::Consumed)
}
