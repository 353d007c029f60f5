//! The mask instance: owns a pool of mapping objects and transforms text
//!
//! `CharMask` is constructed once (building a pool or preloading one) and
//! then queried. Operations never panic and never abort the instance: a
//! failed transform returns the input unchanged next to a typed error, a
//! failed load leaves the previous pool in place.

use rand::Rng;
use serde_json::Value;

use crate::cipher::{self, Direction};
use crate::config::{self, Options, PoolSource, RawOptions};
use crate::error::{ConfigDiagnostic, OperationError};
use crate::mapping::{self, MappingObject};

/// Result of one transform pass. `value` is always usable; `error` is set
/// when the pass degraded to passthrough.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub error: Option<OperationError>,
}

impl<T> Outcome<T> {
    fn clean(value: T) -> Self {
        Self { value, error: None }
    }

    fn degraded(value: T, error: OperationError) -> Self {
        Self {
            value,
            error: Some(error),
        }
    }

    /// True when the pass fell back to returning its input unchanged.
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// A pool of substitution tables plus the operations that use it.
#[derive(Debug, Clone)]
pub struct CharMask {
    objects: Vec<MappingObject>,
    ids: Vec<String>,
}

impl CharMask {
    /// Build or preload a pool per `options`, drawing from the process-wide RNG.
    pub fn new(options: Options) -> Self {
        Self::with_rng(options, &mut rand::thread_rng())
    }

    /// Build with a specific RNG (for reproducible tests).
    pub fn with_rng<R: Rng>(options: Options, rng: &mut R) -> Self {
        let (source, diagnostics) = config::resolve(options);
        Self::from_source(source, diagnostics, rng)
    }

    /// Construct from foreign options (JSON configuration). Malformed input
    /// degrades per the usual rules instead of failing construction.
    pub fn from_value(options: &Value) -> Self {
        let raw: RawOptions = serde_json::from_value(options.clone()).unwrap_or_default();
        let (source, diagnostics) = config::normalize_raw(raw);
        Self::from_source(source, diagnostics, &mut rand::thread_rng())
    }

    fn from_source<R: Rng>(
        source: PoolSource,
        diagnostics: Vec<ConfigDiagnostic>,
        rng: &mut R,
    ) -> Self {
        for diagnostic in &diagnostics {
            if diagnostic.is_fatal() {
                log::error!("{diagnostic}");
            } else {
                log::warn!("{diagnostic}");
            }
        }

        let mut mask = Self {
            objects: Vec::new(),
            ids: Vec::new(),
        };

        match source {
            PoolSource::Preload(objects) => mask.load(objects),
            PoolSource::Build { characters, size } => {
                mask.load(mapping::build_pool_with_rng(&characters, size, rng))
            }
            PoolSource::Empty => {}
        }

        mask
    }

    /// Transform `data` through the encrypt table of the mapping object
    /// selected by `id` (or the first object when `id` is `None`).
    pub fn encrypt(&self, data: &str, id: Option<&str>) -> Outcome<String> {
        self.transform(data, id, Direction::Encrypt)
    }

    /// Inverse of [`encrypt`](Self::encrypt) for the same mapping object.
    pub fn decrypt(&self, data: &str, id: Option<&str>) -> Outcome<String> {
        self.transform(data, id, Direction::Decrypt)
    }

    fn transform(&self, data: &str, id: Option<&str>, direction: Direction) -> Outcome<String> {
        match cipher::select(&self.objects, id) {
            Ok(object) => Outcome::clean(cipher::substitute(data, direction.table(object))),
            Err(error) => {
                log::error!("{direction}: {error}");
                Outcome::degraded(data.to_string(), error)
            }
        }
    }

    /// Encrypt a foreign payload. Non-string payloads come back unchanged
    /// with a single diagnostic.
    pub fn encrypt_value(&self, data: &Value, id: Option<&str>) -> Outcome<Value> {
        self.transform_value(data, id, Direction::Encrypt)
    }

    /// Decrypt a foreign payload, with the same passthrough contract.
    pub fn decrypt_value(&self, data: &Value, id: Option<&str>) -> Outcome<Value> {
        self.transform_value(data, id, Direction::Decrypt)
    }

    fn transform_value(&self, data: &Value, id: Option<&str>, direction: Direction) -> Outcome<Value> {
        match data {
            Value::String(text) => {
                let outcome = self.transform(text, id, direction);
                Outcome {
                    value: Value::String(outcome.value),
                    error: outcome.error,
                }
            }
            other => {
                let error = OperationError::ExpectedText {
                    direction,
                    found: value_kind(other),
                };
                log::error!("{error}");
                Outcome::degraded(other.clone(), error)
            }
        }
    }

    /// Ids of the pool, in pool order. Kept in sync with the pool itself.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// The live pool. Exposing it is equivalent to exposing key material.
    pub fn export_objects(&self) -> &[MappingObject] {
        &self.objects
    }

    /// Replace the pool wholesale and recompute ids.
    pub fn load(&mut self, objects: Vec<MappingObject>) {
        self.ids = objects.iter().map(|object| object.id.clone()).collect();
        self.objects = objects;
    }

    /// Load a pool from foreign input. On any decode failure the store is
    /// left exactly as it was; replacement is all-or-nothing.
    pub fn load_value(&mut self, value: &Value) -> Result<(), OperationError> {
        let items = match value.as_array() {
            Some(items) => items,
            None => {
                let error = OperationError::LoadNotASequence;
                log::error!("{error}");
                return Err(error);
            }
        };

        let mut objects = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match serde_json::from_value::<MappingObject>(item.clone()) {
                Ok(object) => objects.push(object),
                Err(err) => {
                    let error = OperationError::MalformedMappingObject {
                        index,
                        detail: err.to_string(),
                    };
                    log::error!("{error}");
                    return Err(error);
                }
            }
        }

        self.load(objects);
        Ok(())
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
