use super::reap;
use crate::system::find_program;
use anyhow::Context;
use std::process::{Command, Stdio};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notifier {
    Osascript,
    NotifySend,
}

impl Notifier {
    pub fn detect() -> Option<Self> {
        if cfg!(target_os = "macos") {
            return Some(Notifier::Osascript);
        }
        find_program("notify-send").map(|_| Notifier::NotifySend)
    }

    pub fn program(self) -> &'static str {
        match self {
            Notifier::Osascript => "osascript",
            Notifier::NotifySend => "notify-send",
        }
    }

    pub fn command(self, title: &str, message: &str) -> Command {
        let mut cmd = Command::new(self.program());
        match self {
            Notifier::Osascript => {
                let script = format!(
                    "display notification \"{}\" with title \"{}\"",
                    escape_applescript(message),
                    escape_applescript(title)
                );
                cmd.arg("-e").arg(script);
            }
            Notifier::NotifySend => {
                cmd.arg(title).arg(message);
            }
        }
        cmd
    }

    pub fn send(self, title: &str, message: &str) -> anyhow::Result<()> {
        let child = self
            .command(title, message)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("send notification with {}", self.program()))?;
        reap(child);
        Ok(())
    }
}

fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
