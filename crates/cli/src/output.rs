use mirrorgen_core::driver::GeneratedUnit;
use std::fs;
use std::io;
use std::path::Path;

/// Writes each unit to `root/<unit path>`, creating directories as needed.
/// Later units overwrite earlier ones that share a path.
pub fn write_units(root: &Path, units: &[GeneratedUnit]) -> io::Result<usize> {
    for unit in units {
        let path = root.join(&unit.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &unit.text)?;
    }
    Ok(units.len())
}

/// One mapping per line.
pub fn write_import_config(path: &Path, lines: &[String]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut text = lines.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    fs::write(path, text)
}
