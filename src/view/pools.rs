use std::io::{self, Write};
use crossterm::{queue, style::{Color, SetForegroundColor, ResetColor, SetAttribute, Attribute}};

use crate::controller::{Dashboard, LoadPhase};
use super::shared::{truncate_str, writeln, write_section_header, write_status_row};

/// Render the chosen application's detail line and its pool table.
pub fn render_pools(
    out: &mut impl Write,
    dashboard: &Dashboard,
    cursor: usize,
    focused: bool,
    max_rows: usize,
) -> io::Result<()> {
    let Some(app) = dashboard.selected_application() else { return Ok(()) };
    let pools = dashboard.pools();
    let selection = dashboard.selection();

    let counter = if pools.is_empty() {
        String::new()
    } else {
        let toggle = if dashboard.all_pools_selected() { "Deselect All" } else { "Select All" };
        format!("  {} of {} selected · a: {}", selection.len(), pools.len(), toggle)
    };
    write_section_header(out, &format!("  POOLS · {}{}", app.name, counter), focused)?;

    queue!(io::stdout(), SetForegroundColor(Color::DarkGrey))?;
    writeln(out, &format!("    env {} · {} instances · routes: {}",
        app.env,
        app.instances,
        if app.glb_routes.is_empty() { "-".to_string() } else { app.glb_routes.join(", ") },
    ))?;
    queue!(io::stdout(), ResetColor)?;

    match pools.phase() {
        LoadPhase::Idle => return Ok(()),
        LoadPhase::Loading => {
            queue!(io::stdout(), SetForegroundColor(Color::Cyan))?;
            writeln(out, "    Loading pool details...")?;
            queue!(io::stdout(), ResetColor)?;
            return Ok(());
        }
        LoadPhase::Failed(msg) => {
            queue!(io::stdout(), SetForegroundColor(Color::Red))?;
            writeln(out, &format!("    Could not load pools: {}", msg))?;
            queue!(io::stdout(), ResetColor)?;
            return Ok(());
        }
        LoadPhase::Loaded => {}
    }

    if pools.is_empty() {
        writeln(out, "    No pools left for this application.")?;
        return Ok(());
    }

    queue!(io::stdout(), SetForegroundColor(Color::DarkGrey))?;
    write!(out, "    {:<4} {:<24} {:<10} {:<9} {:<9} {}\r\n",
        "SEL", "POOL", "TYPE", "STATUS", "SIZE", "LAST MODIFIED")?;
    queue!(io::stdout(), ResetColor)?;

    let visible = max_rows.saturating_sub(4).max(1);
    let start = cursor.saturating_sub(visible.saturating_sub(1));

    for (idx, pool) in pools.items().iter().enumerate().skip(start).take(visible) {
        let check = if selection.contains(&pool.id) { "[x]" } else { "[ ]" };
        let prefix = format!("    {:<4} {:<24} {:<10} ",
            check,
            truncate_str(&pool.name, 22),
            pool.kind.as_str(),
        );
        let suffix = format!(" {:<9} {}", pool.size, pool.last_modified);
        write_status_row(out, &prefix, pool.status.as_str(), 9, &suffix, focused && idx == cursor)?;
    }

    // Action bar
    if !selection.is_empty() {
        writeln(out, "")?;
        queue!(io::stdout(), SetAttribute(Attribute::Bold))?;
        let n = selection.len();
        let noun = if n == 1 { "pool" } else { "pools" };
        if dashboard.is_processing() {
            queue!(io::stdout(), SetForegroundColor(Color::Cyan))?;
            writeln(out, &format!("    {} {} selected · processing...", n, noun))?;
        } else {
            queue!(io::stdout(), SetForegroundColor(Color::Yellow))?;
            writeln(out, &format!("    {} {} selected · m: Manual scale · d: Automatic delete", n, noun))?;
        }
        queue!(io::stdout(), ResetColor, SetAttribute(Attribute::Reset))?;
    }

    Ok(())
}
