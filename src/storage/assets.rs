//! Asset files: character reference images and HTML print exports.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::{debug, info};

use super::files::write_creating_dirs;
use crate::error::{FlowError, FlowResult};

/// Subdirectory of the assets root holding character images.
pub const CHARACTERS_DIR: &str = "characters";
/// Subdirectory of the assets root holding print exports.
pub const PRINTS_DIR: &str = "prints";

/// Decodes a `data:image/...;base64,<payload>` URL and writes it under
/// `<assets_dir>/characters/`.
///
/// Returns the written path with forward slashes, suitable for storing in
/// `Character::image_path` and handing to a web front end.
pub fn save_character_image(data_url: &str, prefix: &str, assets_dir: &Path) -> FlowResult<String> {
    let parts: Vec<&str> = data_url.split(',').collect();
    let [header, payload] = parts.as_slice() else {
        return Err(FlowError::invalid_image_data(
            "expected data URL of the form <header>,<base64>",
        ));
    };

    let data = STANDARD
        .decode(payload.trim())
        .map_err(|e| FlowError::invalid_image_data(e.to_string()))?;

    let ext = if header.contains("image/jpeg") { "jpg" } else { "png" };
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let path = assets_dir
        .join(CHARACTERS_DIR)
        .join(format!("{}_{}.{}", prefix, nanos, ext));

    write_creating_dirs(&path, &data)?;
    debug!(path = %path.display(), bytes = data.len(), "saved character image");

    Ok(path.to_string_lossy().replace('\\', "/"))
}

/// Copies everything from `source` into a new file at `dest`.
pub fn save_asset<R: Read>(source: &mut R, dest: &Path) -> FlowResult<u64> {
    if let Some(dir) = dest.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    let mut file = fs::File::create(dest)?;
    let written = io::copy(source, &mut file)?;
    Ok(written)
}

/// Removes an asset file.
pub fn delete_asset(path: &Path) -> FlowResult<()> {
    fs::remove_file(path)?;
    Ok(())
}

/// Writes a rendered HTML print sheet under `<assets_dir>/prints/`.
///
/// Only the final component of `filename` is used; an empty name becomes
/// `export.html`.
pub fn save_export_html(assets_dir: &Path, filename: &str, content: &str) -> FlowResult<PathBuf> {
    let name = Path::new(filename)
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "export.html".into());
    let path = assets_dir.join(PRINTS_DIR).join(name);

    write_creating_dirs(&path, content.as_bytes())?;
    info!(path = %path.display(), "saved print export");
    Ok(path)
}
