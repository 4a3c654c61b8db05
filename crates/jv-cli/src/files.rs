// File edges for the CLI: load a JSON file into a `JsonValue`, write one back,
// take a timestamped backup first, and fold a directory of `.json` files into one mapping.
use jv_core::{JsonValue, Map, Value};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn load(path: &Path) -> Result<JsonValue, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    JsonValue::new(text).map_err(|e| format!("{}: {}", path.display(), e))
}

pub fn render(value: &Value, pretty: bool) -> String {
    let s = if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) };
    s.unwrap_or_else(|_| "null".to_string())
}

/// Copy `path` next to itself as `<stem>_<YYYYmmdd-HHMMSS>.json`. Nothing to back up is fine.
pub fn backup(path: &Path) -> Result<Option<PathBuf>, String> {
    if !path.is_file() {
        return Ok(None);
    }
    let parent = path.parent().unwrap_or(Path::new("."));
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("data");
    let ts = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let dest = parent.join(format!("{}_{}.json", stem, ts));
    fs::copy(path, &dest).map_err(|e| e.to_string())?;
    debug!("backed up {} to {}", path.display(), dest.display());
    Ok(Some(dest))
}

pub fn write(path: &Path, value: &Value, with_backup: bool) -> Result<(), String> {
    if with_backup {
        backup(path)?;
    }
    fs::write(path, render(value, true)).map_err(|e| e.to_string())
}

// Every *.json below `dir`, sorted
pub fn find_json_files(dir: &Path) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    out.sort();
    out
}

/// `{relative_path: value}` for every JSON file; failures become `{"$error": msg}`.
pub fn load_dir(dir: &Path) -> JsonValue {
    let mut map = Map::new();
    for f in find_json_files(dir) {
        let name = f.strip_prefix(dir).unwrap_or(&f).to_string_lossy().replace('\\', "/");
        let entry = match load(&f) {
            Ok(v) => v.into_value(),
            Err(e) => {
                warn!("{}", e);
                let mut err = Map::new();
                err.insert("$error".to_string(), Value::String(e));
                Value::Object(err)
            }
        };
        map.insert(name, entry);
    }
    JsonValue::from(map)
}
