use crate::delivery::{notifier::Notifier, player::Player};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub player: Option<String>,
    pub notifier: Option<String>,
    pub title_supported: bool,
}

pub fn detect() -> SystemInfo {
    let os = std::env::consts::OS.to_string();
    let arch = std::env::consts::ARCH.to_string();

    SystemInfo {
        os,
        arch,
        player: Player::detect().map(|p| p.program().to_string()),
        notifier: Notifier::detect().map(|n| n.program().to_string()),
        title_supported: std::io::IsTerminal::is_terminal(&std::io::stderr()),
    }
}

/// Looks `name` up on `PATH`.
pub fn find_program(name: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}
