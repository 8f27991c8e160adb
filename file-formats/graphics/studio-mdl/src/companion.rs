//! Companion file lookup
//!
//! Models without embedded textures keep them in a sibling file named after
//! the model with a `T` suffix (`barney.mdl` -> `barneyT.mdl`). Large models
//! also split animation data into sequence-group files with a two-digit suffix
//! (`barney01.mdl`, `barney02.mdl`, ...). This module derives those names and
//! abstracts where the bytes come from.

use crate::error::{MdlError, Result};
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix of the external texture container
pub const TEXTURE_SUFFIX: &str = "T";

/// Source of companion files referenced by a model
pub trait CompanionResolver {
    /// Loads the bytes of the companion file at `path`.
    fn load(&self, path: &Path) -> Result<Vec<u8>>;
}

/// Reads companions from the file system
#[derive(Debug, Clone, Copy, Default)]
pub struct FsCompanions;

impl CompanionResolver for FsCompanions {
    fn load(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|source| MdlError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolver for models that are known to be self-contained
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCompanions;

impl CompanionResolver for NoCompanions {
    fn load(&self, path: &Path) -> Result<Vec<u8>> {
        Err(MdlError::Io {
            path: path.to_path_buf(),
            source: std::io::ErrorKind::NotFound.into(),
        })
    }
}

/// Companions held in memory, keyed by path
#[derive(Debug, Clone, Default)]
pub struct MemoryCompanions {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryCompanions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `data` under `path`, replacing any previous entry.
    pub fn insert<P: Into<PathBuf>>(&mut self, path: P, data: Vec<u8>) {
        self.files.insert(path.into(), data);
    }

    pub fn with<P: Into<PathBuf>>(mut self, path: P, data: Vec<u8>) -> Self {
        self.insert(path, data);
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl CompanionResolver for MemoryCompanions {
    fn load(&self, path: &Path) -> Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| MdlError::Io {
            path: path.to_path_buf(),
            source: std::io::ErrorKind::NotFound.into(),
        })
    }
}

/// Path of the external texture container for `model`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use studio_mdl::companion::texture_companion_path;
///
/// assert_eq!(
///     texture_companion_path(Path::new("models/barney.mdl")),
///     Path::new("models/barneyT.mdl")
/// );
/// ```
pub fn texture_companion_path(model: &Path) -> PathBuf {
    with_stem_suffix(model, TEXTURE_SUFFIX)
}

/// Path of sequence group `index` (1-based) for `model`.
pub fn sequence_group_path(model: &Path, index: usize) -> PathBuf {
    with_stem_suffix(model, &format!("{:02}", index))
}

/// Inserts `suffix` between the file stem and the extension.
fn with_stem_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_stem().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    if let Some(extension) = path.extension() {
        name.push(".");
        name.push(extension);
    }
    path.with_file_name(name)
}
