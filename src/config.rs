//! Construction options and pool resolution
//!
//! Two entry points: `Options` is the strongly typed surface for Rust
//! callers, `RawOptions` is the decode step for foreign input (JSON
//! configuration, values crossing a process boundary). Both resolve to a
//! `PoolSource` plus the diagnostics produced along the way; nothing in here
//! fails hard.

use serde::Deserialize;
use serde_json::Value;

use crate::charsets;
use crate::error::ConfigDiagnostic;
use crate::mapping::MappingObject;

/// Number of mapping objects built when none is requested.
pub const DEFAULT_POOL_SIZE: usize = 100;

/// Character sets resolved when neither `characters` nor a set list is given.
pub const DEFAULT_CHARACTER_SETS: &[&str] = &["tr", "number"];

/// Typed construction options.
#[derive(Debug, Clone)]
pub struct Options {
    /// Number of mapping objects to build.
    pub size: usize,
    /// Registry names concatenated, in order, into the character pool.
    pub character_set: Vec<String>,
    /// Explicit character pool; overrides `character_set` when present.
    pub characters: Option<Vec<char>>,
    /// Precomputed pool to preload; bypasses building entirely.
    pub mapping_objects: Option<Vec<MappingObject>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            size: DEFAULT_POOL_SIZE,
            character_set: DEFAULT_CHARACTER_SETS
                .iter()
                .map(|name| name.to_string())
                .collect(),
            characters: None,
            mapping_objects: None,
        }
    }
}

/// Loosely typed options as they arrive from foreign input. Field names
/// match the wire convention; unrecognized keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawOptions {
    pub size: Option<Value>,
    pub character_set: Option<Value>,
    pub characters: Option<Value>,
    pub mapping_objects: Option<Value>,
}

/// Where the instance's pool comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PoolSource {
    /// A supplied pool, loaded wholesale.
    Preload(Vec<MappingObject>),
    /// Build `size` objects over `characters`.
    Build { characters: Vec<char>, size: usize },
    /// No usable pool; operations degrade to passthrough.
    Empty,
}

/// Resolve typed options into a pool source.
pub fn resolve(options: Options) -> (PoolSource, Vec<ConfigDiagnostic>) {
    let mut diagnostics = Vec::new();

    if let Some(objects) = options.mapping_objects {
        return (PoolSource::Preload(objects), diagnostics);
    }

    let size = if options.size == 0 {
        diagnostics.push(ConfigDiagnostic::InvalidSize("0".to_string()));
        DEFAULT_POOL_SIZE
    } else {
        options.size
    };

    resolve_pool(size, &options.character_set, options.characters, diagnostics)
}

/// Decode and resolve foreign options.
pub fn normalize_raw(raw: RawOptions) -> (PoolSource, Vec<ConfigDiagnostic>) {
    let mut diagnostics = Vec::new();

    // A supplied pool takes precedence over every building path, even when
    // its shape turns out to be invalid.
    if let Some(value) = raw.mapping_objects {
        return match serde_json::from_value::<Vec<MappingObject>>(value) {
            Ok(objects) => (PoolSource::Preload(objects), diagnostics),
            Err(_) => {
                diagnostics.push(ConfigDiagnostic::MappingObjectsNotASequence);
                (PoolSource::Empty, diagnostics)
            }
        };
    }

    let size = coerce_size(raw.size, &mut diagnostics);

    let characters = raw.characters.and_then(|value| {
        let decoded = decode_characters(&value);
        if decoded.is_none() {
            diagnostics.push(ConfigDiagnostic::CharactersNotASequence);
        }
        decoded
    });

    let character_set = match raw.character_set {
        None => DEFAULT_CHARACTER_SETS
            .iter()
            .map(|name| name.to_string())
            .collect(),
        Some(value) => decode_set_names(&value),
    };

    resolve_pool(size, &character_set, characters, diagnostics)
}

fn resolve_pool(
    size: usize,
    character_set: &[String],
    characters: Option<Vec<char>>,
    mut diagnostics: Vec<ConfigDiagnostic>,
) -> (PoolSource, Vec<ConfigDiagnostic>) {
    let pool = match characters {
        Some(chars) => chars,
        None => concat_sets(character_set, &mut diagnostics),
    };

    if pool.is_empty() {
        diagnostics.push(ConfigDiagnostic::NoUsableCharacters);
        return (PoolSource::Empty, diagnostics);
    }

    (
        PoolSource::Build {
            characters: pool,
            size,
        },
        diagnostics,
    )
}

/// Concatenate named sets in listed order, skipping unknown names.
fn concat_sets(names: &[String], diagnostics: &mut Vec<ConfigDiagnostic>) -> Vec<char> {
    let mut combined = Vec::new();
    for name in names {
        match charsets::lookup(name) {
            Some(symbols) => combined.extend(symbols.chars()),
            None => diagnostics.push(ConfigDiagnostic::UnknownCharacterSet(name.clone())),
        }
    }
    combined
}

/// Coerce a foreign `size` value. Numeric-looking input parses (floats
/// truncate); anything else falls back to the default with a diagnostic.
fn coerce_size(value: Option<Value>, diagnostics: &mut Vec<ConfigDiagnostic>) -> usize {
    let Some(value) = value else {
        return DEFAULT_POOL_SIZE;
    };

    let parsed = match &value {
        Value::Number(n) => n
            .as_u64()
            .map(|v| v as usize)
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as usize)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<u64>()
                .ok()
                .map(|v| v as usize)
                .or_else(|| {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite() && *f > 0.0)
                        .map(|f| f as usize)
                })
        }
        _ => None,
    };

    match parsed {
        Some(size) if size > 0 => size,
        _ => {
            diagnostics.push(ConfigDiagnostic::InvalidSize(render(&value)));
            DEFAULT_POOL_SIZE
        }
    }
}

/// Accept an array of single-character strings; any other shape discards the
/// whole override.
fn decode_characters(value: &Value) -> Option<Vec<char>> {
    let items = value.as_array()?;
    let mut characters = Vec::with_capacity(items.len());
    for item in items {
        let s = item.as_str()?;
        let mut chars = s.chars();
        let symbol = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        characters.push(symbol);
    }
    Some(characters)
}

/// Set names from a foreign value. Non-array input resolves nothing;
/// non-string elements keep their rendering so the registry lookup reports
/// them as unknown.
fn decode_set_names(value: &Value) -> Vec<String> {
    match value.as_array() {
        Some(items) => items
            .iter()
            .map(|item| match item.as_str() {
                Some(s) => s.to_string(),
                None => render(item),
            })
            .collect(),
        None => Vec::new(),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
