use std::io;

use crossterm::{execute, cursor::MoveTo, terminal::Clear, terminal::ClearType};

use crate::view::Presenter;

use super::App;

pub fn render_size_guard() -> io::Result<bool> {
    Presenter::render_size_guard()
}

pub fn render(app: &App) -> io::Result<()> {
    let time_str = chrono::Local::now().format("%H:%M:%S").to_string();
    let mut out = io::stdout();

    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    Presenter::render_header(
        &mut out,
        &app.dashboard.seal_input,
        app.focus,
        &app.backend_label,
        &time_str,
    )?;
    Presenter::render_dashboard(&app.dashboard, &app.cursor, app.focus)?;

    if let Some(ref prompt) = app.count_prompt {
        Presenter::render_count_prompt("Target instance count", &prompt.value)?;
    } else if let Some(ref pa) = app.pending_action {
        Presenter::render_confirmation(&pa.description)?;
    }

    Ok(())
}
