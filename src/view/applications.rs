use std::io::{self, Write};
use crossterm::{queue, style::{Color, SetForegroundColor, ResetColor}};

use crate::controller::{LoadPhase, ListScope};
use crate::model::Application;
use super::shared::{truncate_str, writeln, write_section_header, write_status_row};

/// Render the application list. Returns the number of lines written.
pub fn render_applications(
    out: &mut impl Write,
    apps: &ListScope<Application>,
    active_seal: Option<&str>,
    chosen_id: Option<&str>,
    cursor: usize,
    focused: bool,
    max_rows: usize,
) -> io::Result<usize> {
    let title = match active_seal {
        Some(seal) => format!("  APPLICATIONS · {} ({})", seal, apps.len()),
        None => "  APPLICATIONS".to_string(),
    };
    write_section_header(out, &title, focused)?;
    let mut lines = 1;

    match apps.phase() {
        LoadPhase::Idle => {
            queue!(io::stdout(), SetForegroundColor(Color::DarkGrey))?;
            writeln(out, "    Enter a seal ID and press Enter to fetch applications.")?;
            queue!(io::stdout(), ResetColor)?;
            return Ok(lines + 1);
        }
        LoadPhase::Loading => {
            queue!(io::stdout(), SetForegroundColor(Color::Cyan))?;
            writeln(out, "    Loading applications...")?;
            queue!(io::stdout(), ResetColor)?;
            return Ok(lines + 1);
        }
        LoadPhase::Failed(msg) => {
            queue!(io::stdout(), SetForegroundColor(Color::Red))?;
            writeln(out, &format!("    Could not load applications: {}", msg))?;
            queue!(io::stdout(), ResetColor)?;
            return Ok(lines + 1);
        }
        LoadPhase::Loaded => {}
    }

    if apps.is_empty() {
        writeln(out, "    No applications registered under this seal.")?;
        return Ok(lines + 1);
    }

    queue!(io::stdout(), SetForegroundColor(Color::DarkGrey))?;
    write!(out, "    {:<2} {:<24} {:<12} {:<10} {:<12} {:<5} {:<9} {}\r\n",
        "", "NAME", "ENV", "STATE", "ADMIN", "INST", "MEMORY", "UPDATED")?;
    queue!(io::stdout(), ResetColor)?;
    lines += 1;

    // Keep the cursor row visible when the list is taller than the space we have.
    let visible = max_rows.saturating_sub(lines).max(1);
    let start = cursor.saturating_sub(visible.saturating_sub(1));

    for (idx, app) in apps.items().iter().enumerate().skip(start).take(visible) {
        let marker = if chosen_id == Some(app.id.as_str()) { "●" } else { " " };
        let prefix = format!("    {:<2} {:<24} {:<12} ",
            marker,
            truncate_str(&app.name, 22),
            truncate_str(&app.env, 10),
        );
        let suffix = format!(" {:<12} {:<5} {:<9} {}",
            app.adminstate.as_str(),
            app.instances,
            app.memory_usage,
            app.last_updated_local(),
        );
        write_status_row(out, &prefix, app.operationalstate.as_str(), 10, &suffix, focused && idx == cursor)?;
        lines += 1;
    }

    Ok(lines)
}
