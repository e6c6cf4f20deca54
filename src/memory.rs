//! JSON-file key/value memory.
//!
//! The simplest possible long-term store: one JSON object on disk,
//! `{ "key": any_json_value, ... }`. Every call loads the whole file, mutates
//! it and writes it back, so the file is the only source of truth. There is no
//! locking; concurrent writers race at whole-file granularity.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot serialize value for {key}: {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct JsonMemory {
    path: PathBuf,
}

impl JsonMemory {
    /// Open the store at `path`, creating `{}` (and parent dirs) if absent.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, MemoryError> {
        let path = path.into();
        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|source| MemoryError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::write(&path, "{}").map_err(|source| MemoryError::Io {
                path: path.clone(),
                source,
            })?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value under `key`, if any.
    pub fn read(&self, key: &str) -> Result<Option<Value>, MemoryError> {
        Ok(self.load()?.remove(key))
    }

    /// Value under `key`, or `default` when absent.
    pub fn read_or(&self, key: &str, default: Value) -> Result<Value, MemoryError> {
        Ok(self.read(key)?.unwrap_or(default))
    }

    /// Replace whatever is stored under `key`.
    pub fn write(&self, key: &str, value: impl Serialize) -> Result<(), MemoryError> {
        let value = to_value(key, value)?;
        let mut data = self.load()?;
        data.insert(key.to_string(), value);
        self.save(&data)
    }

    /// Append to the list under `key`.
    ///
    /// Absent (or null) becomes `[value]`; a scalar `s` becomes `[s, value]`.
    pub fn append_to_list(&self, key: &str, value: impl Serialize) -> Result<(), MemoryError> {
        let value = to_value(key, value)?;
        let mut data = self.load()?;
        let slot = data.entry(key.to_string()).or_insert(Value::Null);
        *slot = match std::mem::take(slot) {
            Value::Null => Value::Array(vec![value]),
            Value::Array(mut items) => {
                items.push(value);
                Value::Array(items)
            }
            current => Value::Array(vec![current, value]),
        };
        self.save(&data)
    }

    fn load(&self) -> Result<Map<String, Value>, MemoryError> {
        let bytes = fs::read(&self.path).map_err(|source| MemoryError::Io {
            path: self.path.clone(),
            source,
        })?;
        match String::from_utf8(bytes) {
            Ok(text) => Ok(parse_store(&text)),
            Err(e) => {
                warn!("memory file is not valid UTF-8 ({}); treating as empty", e.utf8_error());
                Ok(Map::new())
            }
        }
    }

    fn save(&self, data: &Map<String, Value>) -> Result<(), MemoryError> {
        let mut text = serde_json::to_string_pretty(data).map_err(|source| MemoryError::Serialize {
            key: "<store>".into(),
            source,
        })?;
        text.push('\n');
        fs::write(&self.path, text).map_err(|source| MemoryError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Decode the store contents. Anything that is not a JSON object reads as an
/// empty store; the decode error is logged and dropped.
pub fn parse_store(text: &str) -> Map<String, Value> {
    if text.trim().is_empty() {
        return Map::new();
    }
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            warn!("memory file holds a non-object JSON value ({}); treating as empty", type_name(&other));
            Map::new()
        }
        Err(e) => {
            warn!("memory file is not valid JSON ({}); treating as empty", e);
            Map::new()
        }
    }
}

fn to_value(key: &str, value: impl Serialize) -> Result<Value, MemoryError> {
    serde_json::to_value(value).map_err(|source| MemoryError::Serialize {
        key: key.to_string(),
        source,
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_store_variants() {
        assert!(parse_store("").is_empty());
        assert!(parse_store("   \n").is_empty());
        assert!(parse_store("{not json").is_empty());
        assert!(parse_store("[1, 2]").is_empty());
        let map = parse_store(r#"{"a": 1}"#);
        assert_eq!(map.get("a"), Some(&serde_json::json!(1)));
    }
}
