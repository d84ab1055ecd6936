//! CSV export of an application's detail row.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::model::Application;

const HEADER: [&str; 7] = [
    "Environment",
    "Instances",
    "Last Updated",
    "Memory Usage",
    "Operational State",
    "Admin State",
    "Global Routes",
];

/// Render the CSV text for one application.
pub fn application_csv(app: &Application) -> String {
    let row = [
        app.env.clone(),
        app.instances.to_string(),
        app.last_updated.to_rfc3339(),
        app.memory_usage.clone(),
        app.operationalstate.as_str().to_string(),
        app.adminstate.as_str().to_string(),
        app.glb_routes.join("; "),
    ];
    let header: Vec<String> = HEADER.iter().map(|h| escape_field(h)).collect();
    let row: Vec<String> = row.iter().map(|f| escape_field(f)).collect();
    format!("{}\n{}\n", header.join(","), row.join(","))
}

/// `<name>-data.csv`, with path separators in the name replaced.
pub fn export_file_name(app: &Application) -> String {
    let safe: String = app
        .name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{}-data.csv", safe)
}

/// Write the CSV into `dir` and return the file path.
pub fn write_application_csv(app: &Application, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(export_file_name(app));
    fs::write(&path, application_csv(app))?;
    info!(application = %app.name, path = %path.display(), "Exported application CSV");
    Ok(path)
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
