use std::io::{self, Write};
use crossterm::{queue, style::{Color, SetForegroundColor, SetBackgroundColor, ResetColor, Attribute, SetAttribute}};

/// Truncate a string to at most `max_len` characters (not bytes), appending "..."
/// if truncated. Safe for multi-byte UTF-8.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else {
        let keep = max_len.saturating_sub(3);
        let truncated: String = s.chars().take(keep).collect();
        format!("{}...", truncated)
    }
}

/// Keep the last `max_len` characters, for input fields that scroll left.
pub fn tail_str(s: &str, max_len: usize) -> &str {
    let count = s.chars().count();
    if count <= max_len {
        return s;
    }
    let skip = count - max_len;
    match s.char_indices().nth(skip) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}

/// Color for an operational/pool status, as shown in status columns.
pub fn status_color(status: &str) -> Color {
    match status {
        "running" | "enabled" => Color::Green,
        "pending" | "maintenance" => Color::Yellow,
        "stopped" | "disabled" => Color::DarkGrey,
        "error" => Color::Red,
        _ => Color::Grey,
    }
}

pub fn writeln(out: &mut impl Write, text: &str) -> io::Result<()> {
    write!(out, "{}\r\n", text)
}

pub fn write_section_header(out: &mut impl Write, text: &str, focused: bool) -> io::Result<()> {
    if focused {
        queue!(io::stdout(), SetBackgroundColor(Color::DarkBlue), SetForegroundColor(Color::White))?;
    } else {
        queue!(io::stdout(), SetAttribute(Attribute::Bold))?;
    }
    write!(out, "{}\r\n", text)?;
    queue!(io::stdout(), ResetColor, SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Write `prefix`, then `status` in its status color, then `suffix`, then newline.
pub fn write_status_row(
    out: &mut impl Write,
    prefix: &str,
    status: &str,
    status_width: usize,
    suffix: &str,
    selected: bool,
) -> io::Result<()> {
    if selected {
        queue!(io::stdout(), SetBackgroundColor(Color::DarkGrey), SetForegroundColor(Color::White))?;
    }
    write!(out, "{}", prefix)?;
    if !selected {
        queue!(io::stdout(), SetForegroundColor(status_color(status)))?;
    }
    write!(out, "{:<width$}", status, width = status_width)?;
    if !selected {
        queue!(io::stdout(), ResetColor)?;
    }
    write!(out, "{}\r\n", suffix)?;
    if selected {
        queue!(io::stdout(), ResetColor)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_str_short_string() {
        assert_eq!(truncate_str("hello", 10), "hello");
    }

    #[test]
    fn truncate_str_long_string() {
        assert_eq!(truncate_str("payment-service-canary", 10), "payment...");
    }

    #[test]
    fn truncate_str_utf8() {
        assert_eq!(truncate_str("café", 4), "café");
        assert_eq!(truncate_str("hello世界", 6), "hel...");
    }

    #[test]
    fn tail_str_keeps_end_of_input() {
        assert_eq!(tail_str("SEAL123", 10), "SEAL123");
        assert_eq!(tail_str("SEAL123", 3), "123");
        assert_eq!(tail_str("日本語abc", 4), "語abc");
    }

    #[test]
    fn status_colors() {
        assert_eq!(status_color("running"), Color::Green);
        assert_eq!(status_color("error"), Color::Red);
        assert_eq!(status_color("maintenance"), Color::Yellow);
        assert_eq!(status_color("unknown"), Color::Grey);
    }
}
