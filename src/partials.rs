//! Shared markup spliced into templates with `include_partial`.
//!
//! ```text
//! {{ include_partial(path="header.html", fallback="<header></header>") }}
//! ```
//!
//! A partial that cannot be read is logged and replaced by `fallback`, the
//! page itself always renders.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use tera::{Function, Tera, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PartialError {
    #[error("partial path {0:?} escapes the partials directory")]
    OutsideRoot(String),

    #[error("failed to read partial {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Reads partials relative to a fixed directory.
#[derive(Debug, Clone)]
pub struct PartialLoader {
    root: PathBuf,
}

impl PartialLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn load(&self, path: &str) -> Result<String, PartialError> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(PartialError::OutsideRoot(path.to_string()));
        }

        std::fs::read_to_string(self.root.join(relative)).map_err(|source| PartialError::Io {
            path: path.to_string(),
            source,
        })
    }
}

impl Function for PartialLoader {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let path = args
            .get("path")
            .and_then(Value::as_str)
            .ok_or_else(|| tera::Error::msg("include_partial requires a `path` argument"))?;
        let fallback = args
            .get("fallback")
            .and_then(Value::as_str)
            .unwrap_or_default();

        match self.load(path) {
            Ok(markup) => Ok(Value::String(markup)),
            Err(err) => {
                log::warn!("Keeping placeholder for partial: {err}");
                Ok(Value::String(fallback.to_string()))
            }
        }
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// Registers `include_partial` on `tera`.
pub fn register(tera: &mut Tera, partials_dir: &str) {
    tera.register_function("include_partial", PartialLoader::new(partials_dir));
}
