use crate::events::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const CURRENT_MANIFEST: &str = "pack.json";
pub const LEGACY_MANIFEST: &str = "manifest.json";

/// Legacy packs keep their audio under this directory.
const LEGACY_SOUNDS_DIR: &str = "sounds";

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("read manifest {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse manifest {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoundEntry {
    /// Path relative to the pack root.
    pub file_id: String,
    pub transcript_line: Option<String>,
}

/// Schema-independent view of a pack manifest. Empty categories are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackManifest {
    pub display_name: Option<String>,
    pub categories: BTreeMap<Category, Vec<SoundEntry>>,
}

impl PackManifest {
    pub fn sounds(&self, category: Category) -> &[SoundEntry] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn sound_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    Current,
    Legacy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub categories: BTreeMap<String, CurrentCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentCategory {
    #[serde(default)]
    pub sounds: Vec<CurrentSound>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentSound {
    pub file: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub categories: BTreeMap<String, LegacyCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyCategory {
    #[serde(default)]
    pub sounds: Vec<LegacySound>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacySound {
    pub file: String,
    #[serde(default)]
    pub line: Option<String>,
}

/// A manifest as found on disk; which variant is decided by which file exists.
#[derive(Debug, Clone)]
pub enum RawManifest {
    Current(CurrentManifest),
    Legacy(LegacyManifest),
}

impl RawManifest {
    /// Reads the current-schema file, falling back to the legacy one.
    /// `Ok(None)` means the directory holds neither.
    pub fn read(pack_dir: &Path) -> Result<Option<Self>, ManifestError> {
        if let Some(raw) = read_optional(&pack_dir.join(CURRENT_MANIFEST))? {
            let manifest = parse(&pack_dir.join(CURRENT_MANIFEST), &raw)?;
            return Ok(Some(RawManifest::Current(manifest)));
        }
        if let Some(raw) = read_optional(&pack_dir.join(LEGACY_MANIFEST))? {
            let manifest = parse(&pack_dir.join(LEGACY_MANIFEST), &raw)?;
            return Ok(Some(RawManifest::Legacy(manifest)));
        }
        Ok(None)
    }

    pub fn schema(&self) -> Schema {
        match self {
            RawManifest::Current(_) => Schema::Current,
            RawManifest::Legacy(_) => Schema::Legacy,
        }
    }

    pub fn normalize(self) -> PackManifest {
        match self {
            RawManifest::Current(manifest) => {
                let mut categories = BTreeMap::new();
                for (key, category) in manifest.categories {
                    let Ok(canonical) = key.parse::<Category>() else {
                        tracing::warn!(key = %key, "dropping unknown manifest category");
                        continue;
                    };
                    let sounds = category
                        .sounds
                        .into_iter()
                        .map(|sound| SoundEntry {
                            file_id: sound.file,
                            transcript_line: sound.label,
                        })
                        .collect();
                    insert_sounds(&mut categories, canonical, sounds);
                }
                PackManifest {
                    display_name: manifest.display_name.or(manifest.name),
                    categories,
                }
            }
            RawManifest::Legacy(manifest) => {
                let mut categories = BTreeMap::new();
                for (key, category) in manifest.categories {
                    let Some(canonical) = Category::from_legacy(&key) else {
                        tracing::warn!(key = %key, "dropping unmapped legacy category");
                        continue;
                    };
                    let sounds = category
                        .sounds
                        .into_iter()
                        .map(|sound| SoundEntry {
                            file_id: legacy_file_id(&sound.file),
                            transcript_line: sound.line,
                        })
                        .collect();
                    insert_sounds(&mut categories, canonical, sounds);
                }
                PackManifest {
                    display_name: manifest.name,
                    categories,
                }
            }
        }
    }
}

fn insert_sounds(
    categories: &mut BTreeMap<Category, Vec<SoundEntry>>,
    category: Category,
    sounds: Vec<SoundEntry>,
) {
    if sounds.is_empty() {
        return;
    }
    let entries = categories.entry(category).or_default();
    entries.extend(sounds);

    let mut seen = std::collections::HashSet::new();
    if entries.iter().any(|entry| !seen.insert(entry.file_id.as_str())) {
        tracing::debug!(category = %category, "duplicate sound files weaken anti-repeat");
    }
}

fn legacy_file_id(file: &str) -> String {
    if file.contains('/') {
        file.to_string()
    } else {
        format!("{LEGACY_SOUNDS_DIR}/{file}")
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, ManifestError> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ManifestError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn parse<T: serde::de::DeserializeOwned>(path: &Path, raw: &str) -> Result<T, ManifestError> {
    serde_json::from_str(raw).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
