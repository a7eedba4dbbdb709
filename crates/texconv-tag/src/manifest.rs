//! Sidecar record of source pixel formats.
//!
//! Filename tags are lossy and collide with stems that contain the
//! delimiter. The manifest keeps an explicit `stem -> format` map next to
//! the converted files instead.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{PixelFormatTag, Result};

/// File name of the manifest inside a batch directory.
pub const MANIFEST_FILE_NAME: &str = "texconv-formats.json";

/// Map from stem key to the pixel format of the original texture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatManifest {
    formats: BTreeMap<String, PixelFormatTag>,
}

impl FormatManifest {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the manifest file inside `dir`.
    pub fn path_in(dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(MANIFEST_FILE_NAME)
    }

    /// Load the manifest stored in `dir`, or an empty one if there is none.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let path = Self::path_in(dir);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let data = fs::read(&path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Write the manifest into `dir`, replacing any previous manifest file.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = Self::path_in(dir);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;
        Ok(path)
    }

    /// Record the format for `key`, returning the previous entry.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        format: PixelFormatTag,
    ) -> Option<PixelFormatTag> {
        self.formats.insert(key.into(), format)
    }

    /// Format recorded for `key`.
    pub fn get(&self, key: &str) -> Option<PixelFormatTag> {
        self.formats.get(key).copied()
    }

    /// Add every entry of `other`, overwriting existing keys.
    pub fn merge(&mut self, other: FormatManifest) {
        self.formats.extend(other.formats);
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, PixelFormatTag)> {
        self.formats.iter().map(|(key, format)| (key.as_str(), *format))
    }
}
