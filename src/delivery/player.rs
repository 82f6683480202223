use super::reap;
use crate::system::find_program;
use anyhow::Context;
use std::path::Path;
use std::process::{Command, Stdio};

/// Platform audio players, in order of preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    Afplay,
    PwPlay,
    Paplay,
    Ffplay,
    Aplay,
}

impl Player {
    pub fn detect() -> Option<Self> {
        if cfg!(target_os = "macos") {
            return Some(Player::Afplay);
        }
        [Player::PwPlay, Player::Paplay, Player::Ffplay, Player::Aplay]
            .into_iter()
            .find(|player| find_program(player.program()).is_some())
    }

    pub fn program(self) -> &'static str {
        match self {
            Player::Afplay => "afplay",
            Player::PwPlay => "pw-play",
            Player::Paplay => "paplay",
            Player::Ffplay => "ffplay",
            Player::Aplay => "aplay",
        }
    }

    pub fn command(self, path: &Path, volume: f32) -> Command {
        let volume = volume.clamp(0.0, 1.0);
        let mut cmd = Command::new(self.program());
        match self {
            Player::Afplay => {
                cmd.arg("-v").arg(volume.to_string());
            }
            Player::PwPlay => {
                cmd.arg(format!("--volume={volume}"));
            }
            Player::Paplay => {
                let scaled = (volume * 65536.0).round() as u32;
                cmd.arg(format!("--volume={scaled}"));
            }
            Player::Ffplay => {
                let percent = (volume * 100.0).round() as u32;
                cmd.args(["-nodisp", "-autoexit", "-loglevel", "quiet", "-volume"])
                    .arg(percent.to_string());
            }
            Player::Aplay => {
                cmd.arg("-q");
            }
        }
        cmd.arg(path);
        cmd
    }

    /// Starts playback and returns without waiting for it.
    pub fn play_file(self, path: &Path, volume: f32) -> anyhow::Result<()> {
        let child = self
            .command(path, volume)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| {
                format!("play audio with {}: {}", self.program(), path.display())
            })?;
        reap(child);
        Ok(())
    }
}
