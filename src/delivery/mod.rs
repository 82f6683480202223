pub mod notifier;
pub mod player;

use crate::engine::Dispatch;
use anyhow::Context;
use notifier::Notifier;
use player::Player;
use std::io::{IsTerminal, Write};

/// Hands dispatches to the outside world.
pub trait Delivery {
    fn deliver(&self, dispatch: &Dispatch) -> anyhow::Result<()>;
}

/// Delivers every dispatch in order; failures are logged, never returned.
pub fn deliver_all(delivery: &dyn Delivery, dispatches: &[Dispatch]) {
    for dispatch in dispatches {
        if let Err(err) = delivery.deliver(dispatch) {
            tracing::warn!(error = ?err, "delivery failed");
        }
    }
}

/// Spawns platform tools without waiting on them.
#[derive(Debug, Clone)]
pub struct SystemDelivery {
    player: Option<Player>,
    notifier: Option<Notifier>,
    titles: bool,
}

impl SystemDelivery {
    pub fn detect() -> Self {
        Self {
            player: Player::detect(),
            notifier: Notifier::detect(),
            titles: std::io::stderr().is_terminal(),
        }
    }
}

impl Delivery for SystemDelivery {
    fn deliver(&self, dispatch: &Dispatch) -> anyhow::Result<()> {
        match dispatch {
            Dispatch::Title(title) => {
                if !self.titles {
                    return Ok(());
                }
                let mut stderr = std::io::stderr();
                write!(stderr, "\x1b]0;{title}\x07").context("write terminal title")?;
                stderr.flush().context("flush terminal title")
            }
            Dispatch::Sound { path, volume, .. } => match self.player {
                Some(player) => player.play_file(path, *volume),
                None => anyhow::bail!("no audio player found"),
            },
            Dispatch::Notification { title, message } => match self.notifier {
                Some(notifier) => notifier.send(title, message),
                None => anyhow::bail!("no notifier found"),
            },
        }
    }
}

/// Waits on a spawned child off-thread so it never lingers as a zombie.
fn reap(mut child: std::process::Child) {
    std::thread::spawn(move || {
        let _ = child.wait();
    });
}
