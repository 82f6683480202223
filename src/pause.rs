use anyhow::Context;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Answers "are we muted right now?". Queried on every event, never cached.
pub trait PauseGate {
    fn is_paused(&self) -> bool;
}

impl<F: Fn() -> bool> PauseGate for F {
    fn is_paused(&self) -> bool {
        self()
    }
}

/// Pause flag backed by the presence of a marker file.
#[derive(Debug, Clone)]
pub struct MarkerFile {
    path: PathBuf,
}

impl MarkerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn pause(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
        fs::write(&self.path, b"")
            .with_context(|| format!("write pause marker {}", self.path.display()))
    }

    pub fn resume(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err)
                .with_context(|| format!("remove pause marker {}", self.path.display())),
        }
    }

    /// Flips the flag and returns the new paused state.
    pub fn toggle(&self) -> anyhow::Result<bool> {
        if self.is_paused() {
            self.resume()?;
            Ok(false)
        } else {
            self.pause()?;
            Ok(true)
        }
    }
}

impl PauseGate for MarkerFile {
    fn is_paused(&self) -> bool {
        self.path.exists()
    }
}
