mod shared;
mod header;
mod applications;
mod pools;
mod confirmation;

use std::io::{self, Write};
use crossterm::{execute, cursor, queue, style::{Color, SetForegroundColor, ResetColor}, terminal};

use crate::controller::{Dashboard, Severity};
use crate::model::{CursorState, Focus};

pub use shared::{truncate_str, tail_str, status_color};

pub struct Presenter;

/// Minimum terminal dimensions for usable rendering.
pub const MIN_COLS: u16 = 80;
pub const MIN_ROWS: u16 = 16;

impl Presenter {
    /// Check if the terminal is large enough. If not, render a "too small"
    /// message and return `true` (meaning "skip normal rendering").
    pub fn render_size_guard() -> io::Result<bool> {
        let (cols, rows) = terminal::size()?;
        if cols < MIN_COLS || rows < MIN_ROWS {
            let mut out = std::io::stdout();
            execute!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
            let msg = format!(
                "Terminal too small ({}x{}). Resize to at least {}x{}.",
                cols, rows, MIN_COLS, MIN_ROWS
            );
            let y = rows / 2;
            let x = cols.saturating_sub(msg.len() as u16) / 2;
            queue!(out, cursor::MoveTo(x, y), SetForegroundColor(Color::Yellow))?;
            write!(out, "{}", msg)?;
            queue!(out, ResetColor)?;
            out.flush()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn render_header(
        out: &mut impl Write,
        seal_input: &str,
        focus: Focus,
        backend: &str,
        time: &str,
    ) -> io::Result<()> {
        header::render_header(out, seal_input, focus, backend, time)
    }

    /// Applications, pools, status line and footer below the header.
    pub fn render_dashboard(
        dashboard: &Dashboard,
        cursor_state: &CursorState,
        focus: Focus,
    ) -> io::Result<()> {
        let mut out = io::stdout();
        queue!(out, cursor::MoveTo(0, 2))?;
        let (width, height) = terminal::size()?;
        let body = (height as usize).saturating_sub(5);

        let chosen = dashboard.selected_application().map(|a| a.id.as_str());
        let app_rows = if chosen.is_some() { body / 2 } else { body };
        let used = applications::render_applications(
            &mut out,
            dashboard.applications(),
            dashboard.active_seal(),
            chosen,
            cursor_state.app_index,
            focus == Focus::Applications,
            app_rows,
        )?;

        if chosen.is_some() {
            write!(out, "\r\n")?;
            pools::render_pools(
                &mut out,
                dashboard,
                cursor_state.pool_index,
                focus == Focus::Pools,
                body.saturating_sub(used + 1),
            )?;
        }

        // Status message (action feedback)
        if let Some(status) = dashboard.status() {
            let color = match status.severity {
                Severity::Info => Color::Yellow,
                Severity::Error => Color::Red,
            };
            queue!(
                out,
                cursor::MoveTo(0, height.saturating_sub(2)),
                SetForegroundColor(color),
                crossterm::style::Print(format!("  {:<w$}", status.text, w = (width as usize).saturating_sub(2))),
                ResetColor
            )?;
        }

        let help = match focus {
            Focus::SealInput => "Enter: Fetch | Esc/Tab: Leave input | Ctrl-C: Quit",
            Focus::Applications => "q: Quit | /: Seal ID | Tab: Switch | ↑/↓: Navigate | Enter: Open pools | e: Export CSV",
            Focus::Pools => "q: Quit | Tab: Switch | ↑/↓: Navigate | Space: Toggle | a: All | c: Clear | m: Manual | d: Delete | r: Reload | e: Export",
        };
        let help_y = height.saturating_sub(1);
        let help_width = (width as usize).saturating_sub(1);
        queue!(
            out,
            cursor::MoveTo(1, help_y),
            SetForegroundColor(Color::DarkGrey),
            crossterm::style::Print(format!("{:<w$}", truncate_str(help, help_width), w = help_width)),
            ResetColor
        )?;

        out.flush()?;
        Ok(())
    }

    pub fn render_confirmation(prompt: &str) -> io::Result<()> {
        confirmation::render_confirmation(prompt)
    }

    pub fn render_count_prompt(label: &str, value: &str) -> io::Result<()> {
        confirmation::render_count_prompt(label, value)
    }
}
