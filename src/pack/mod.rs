pub mod manifest;

use anyhow::Context;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use manifest::{PackManifest, RawManifest, Schema, SoundEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPack {
    pub name: String,
    pub root: PathBuf,
    pub schema: Schema,
    pub manifest: PackManifest,
}

impl ResolvedPack {
    /// Absolute path of a sound, refusing anything outside the pack root.
    pub fn sound_path(&self, entry: &SoundEntry) -> Option<PathBuf> {
        let candidate = if Path::new(&entry.file_id).is_absolute() {
            PathBuf::from(&entry.file_id)
        } else {
            self.root.join(&entry.file_id)
        };

        let root = self.root.canonicalize().ok()?;
        let resolved = candidate.canonicalize().ok()?;
        if !resolved.starts_with(&root) {
            return None;
        }
        Some(resolved)
    }
}

#[derive(Debug, Clone)]
pub enum PackLookup {
    Found(Arc<ResolvedPack>),
    NotFound,
}

/// Locates packs under one root and caches what it resolves for the
/// life of the process.
#[derive(Debug)]
pub struct PackResolver {
    root: PathBuf,
    cache: HashMap<String, Arc<ResolvedPack>>,
}

impl PackResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: HashMap::new(),
        }
    }

    pub fn resolve(&mut self, name: &str) -> PackLookup {
        if let Some(pack) = self.cache.get(name) {
            return PackLookup::Found(pack.clone());
        }

        if !is_plain_name(name) {
            tracing::debug!(pack = %name, "pack name is not a plain directory name");
            return PackLookup::NotFound;
        }

        let dir = self.root.join(name);
        let raw = match RawManifest::read(&dir) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(pack = %name, dir = %dir.display(), "pack not installed");
                return PackLookup::NotFound;
            }
            Err(err) => {
                tracing::warn!(error = ?err, pack = %name, "pack manifest unusable");
                return PackLookup::NotFound;
            }
        };

        let pack = Arc::new(ResolvedPack {
            name: name.to_string(),
            root: dir,
            schema: raw.schema(),
            manifest: raw.normalize(),
        });
        self.cache.insert(name.to_string(), pack.clone());
        PackLookup::Found(pack)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PackSummary {
    pub name: String,
    pub display_name: Option<String>,
    pub schema: Schema,
    pub categories: usize,
    pub sounds: usize,
}

/// Every directory under `root` that resolves to a pack, sorted by name.
pub fn list_packs(root: &Path) -> anyhow::Result<Vec<PackSummary>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut resolver = PackResolver::new(root);
    let mut packs = Vec::new();
    for entry in fs::read_dir(root).with_context(|| format!("read packs dir {}", root.display()))? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if let PackLookup::Found(pack) = resolver.resolve(&name) {
            packs.push(PackSummary {
                name: pack.name.clone(),
                display_name: pack.manifest.display_name.clone(),
                schema: pack.schema,
                categories: pack.manifest.categories.len(),
                sounds: pack.manifest.sound_count(),
            });
        }
    }
    packs.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(packs)
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}
