use crate::events::Category;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Durable, cross-process state. Losing it only costs anti-repeat and
/// rotation stickiness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    #[serde(default)]
    pub last_played: BTreeMap<Category, String>,
    #[serde(default)]
    pub session_packs: BTreeMap<String, String>,
}

/// Read-modify-write store for [`State`]. No locking: concurrent writers
/// may overwrite each other, which is tolerated.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> State {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return State::default(),
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path.display(), "state unreadable; starting empty");
                return State::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path.display(), "state corrupt; starting empty");
                State::default()
            }
        }
    }

    pub fn save(&self, state: &State) {
        if let Err(err) = self.try_save(state) {
            tracing::warn!(error = ?err, path = %self.path.display(), "state save failed");
        }
    }

    fn try_save(&self, state: &State) -> anyhow::Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).with_context(|| format!("create state dir {}", dir.display()))?;

        let bytes = serde_json::to_vec_pretty(state).context("serialize state")?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir).context("create state temp")?;
        tmp.write_all(&bytes).context("write state temp")?;
        tmp.persist(&self.path).context("rename state file")?;
        Ok(())
    }
}
