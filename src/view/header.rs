use std::io::{self, Write};
use crossterm::{
    cursor, queue,
    style::{Color, SetForegroundColor, SetBackgroundColor, ResetColor},
    terminal,
};

use crate::model::Focus;
use super::shared::tail_str;

/// Title, seal input field, backend and clock on the first line, then a separator.
pub fn render_header(
    out: &mut impl Write,
    seal_input: &str,
    focus: Focus,
    backend: &str,
    time: &str,
) -> io::Result<()> {
    let size = terminal::size()?;

    queue!(io::stdout(), SetBackgroundColor(Color::DarkBlue), SetForegroundColor(Color::White))?;
    write!(out, " sealdeck ")?;
    queue!(io::stdout(), ResetColor)?;

    write!(out, "  Seal ID: ")?;
    let editing = focus == Focus::SealInput;
    if editing {
        queue!(io::stdout(), SetBackgroundColor(Color::DarkGrey), SetForegroundColor(Color::White))?;
    }
    let field = if seal_input.is_empty() && !editing {
        "(press / to enter)".to_string()
    } else {
        format!("{}{}", tail_str(seal_input, 28), if editing { "_" } else { "" })
    };
    write!(out, " {:<30}", field)?;
    queue!(io::stdout(), ResetColor)?;

    // Right-align backend and time
    let right = format!("{} | {} ", backend, time);
    let col = (size.0 as usize).saturating_sub(right.chars().count());
    queue!(io::stdout(), cursor::MoveTo(col as u16, 0))?;
    queue!(io::stdout(), SetForegroundColor(Color::DarkGrey))?;
    write!(out, "{}", right)?;
    queue!(io::stdout(), ResetColor)?;

    write!(out, "\r\n")?;
    let sep: String = "─".repeat(size.0 as usize);
    queue!(io::stdout(), SetForegroundColor(Color::DarkGrey))?;
    write!(out, "{}\r\n", sep)?;
    queue!(io::stdout(), ResetColor)?;

    Ok(())
}
