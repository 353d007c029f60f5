//! Standalone unmasker binary for charmask
//!
//! Minimal binary that decodes masked files to stdout, for bundling where
//! the full CLI is not wanted.
//!
//! Usage:
//!   unmask <file.masked> [--id <mapping-id>]
//!
//! Key lookup:
//!   1. $CHARMASK_KEY_PATH (if set)
//!   2. ~/.config/charmask/default.key

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

/// Key file structure (subset of the full KeyFile for minimal deps)
#[derive(serde::Deserialize)]
struct KeyFile {
    objects: Vec<MappingEntry>,
}

#[derive(serde::Deserialize)]
struct MappingEntry {
    id: String,
    decrypt: HashMap<char, char>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: unmask <file.masked> [--id <mapping-id>]");
        process::exit(1);
    }

    let file_path = PathBuf::from(&args[1]);

    // Parse --id argument
    let id = if args.len() >= 4 && args[2] == "--id" {
        Some(args[3].clone())
    } else {
        None
    };

    // Resolve and parse the key file
    let key_path = resolve_key_path()?;
    let key_content = fs::read_to_string(&key_path)
        .map_err(|e| format!("Failed to read key file {:?}: {}", key_path, e))?;
    let key_file: KeyFile = serde_yaml::from_str(&key_content)
        .map_err(|e| format!("Failed to parse key file: {}", e))?;

    // Pick the mapping: by id when given, otherwise the first one
    let entry = match &id {
        Some(id) => key_file
            .objects
            .iter()
            .find(|entry| &entry.id == id)
            .ok_or_else(|| format!("No mapping with id '{}' in {:?}", id, key_path))?,
        None => key_file
            .objects
            .first()
            .ok_or("Key file contains no mapping objects")?,
    };

    // Read and decode the masked file
    let masked = fs::read_to_string(&file_path)
        .map_err(|e| format!("Failed to read masked file {:?}: {}", file_path, e))?;

    let decoded: String = masked
        .chars()
        .map(|symbol| entry.decrypt.get(&symbol).copied().unwrap_or(symbol))
        .collect();

    // Output to stdout
    print!("{}", decoded);

    Ok(())
}

/// Resolve the key file path
/// Priority: $CHARMASK_KEY_PATH > ~/.config/charmask/default.key
fn resolve_key_path() -> Result<PathBuf, String> {
    // Check environment variable first
    if let Ok(env_path) = env::var("CHARMASK_KEY_PATH") {
        let path = PathBuf::from(&env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(format!(
            "CHARMASK_KEY_PATH is set but file does not exist: {:?}",
            path
        ));
    }

    // Fall back to default location
    let config_dir = dirs::config_dir().ok_or("Could not determine config directory")?;
    let key_path = config_dir.join("charmask").join("default.key");

    if key_path.exists() {
        Ok(key_path)
    } else {
        Err(format!(
            "Key file not found. Expected at: {:?}\n\
             Or set CHARMASK_KEY_PATH environment variable.",
            key_path
        ))
    }
}
