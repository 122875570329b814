//! Plain-text report output

use crate::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a rendered report to the given path
///
/// Parent directories are created as needed so a configured path like
/// `./out/report.txt` works on a fresh checkout.
pub fn write_report(report: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(path)?;
    file.write_all(report.as_bytes())?;

    Ok(())
}
