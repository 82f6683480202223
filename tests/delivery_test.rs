use agent_chorus::delivery::notifier::Notifier;
use agent_chorus::delivery::player::Player;
use agent_chorus::delivery::{deliver_all, Delivery};
use agent_chorus::engine::Dispatch;
use std::cell::RefCell;
use std::ffi::OsStr;
use std::path::Path;

fn args(cmd: &std::process::Command) -> Vec<String> {
    cmd.get_args()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

#[test]
fn player_commands_scale_volume() {
    let path = Path::new("/packs/peon/sounds/done.wav");

    let afplay = Player::Afplay.command(path, 0.5);
    assert_eq!(afplay.get_program(), OsStr::new("afplay"));
    assert_eq!(args(&afplay), ["-v", "0.5", "/packs/peon/sounds/done.wav"]);

    let paplay = Player::Paplay.command(path, 0.5);
    assert_eq!(args(&paplay), ["--volume=32768", "/packs/peon/sounds/done.wav"]);

    let ffplay = Player::Ffplay.command(path, 2.0);
    assert!(args(&ffplay).contains(&"100".to_string()));
}

#[test]
fn notifier_commands_escape_quotes() {
    let osascript = Notifier::Osascript.command("my \"app\"", "Task complete");
    assert_eq!(
        args(&osascript),
        [
            "-e",
            "display notification \"Task complete\" with title \"my \\\"app\\\"\""
        ]
    );

    let notify_send = Notifier::NotifySend.command("rocket", "Permission needed");
    assert_eq!(args(&notify_send), ["rocket", "Permission needed"]);
}

struct Flaky {
    seen: RefCell<Vec<Dispatch>>,
}

impl Delivery for Flaky {
    fn deliver(&self, dispatch: &Dispatch) -> anyhow::Result<()> {
        self.seen.borrow_mut().push(dispatch.clone());
        if matches!(dispatch, Dispatch::Sound { .. }) {
            anyhow::bail!("no player");
        }
        Ok(())
    }
}

#[test]
fn delivery_failures_do_not_stop_later_dispatches() {
    let delivery = Flaky {
        seen: RefCell::new(Vec::new()),
    };
    let dispatches = vec![
        Dispatch::Title("rocket: done".to_string()),
        Dispatch::Sound {
            path: "/nope.wav".into(),
            volume: 0.5,
            category: agent_chorus::events::Category::TaskComplete,
        },
        Dispatch::Notification {
            title: "rocket".to_string(),
            message: "Task complete".to_string(),
        },
    ];

    deliver_all(&delivery, &dispatches);
    assert_eq!(delivery.seen.borrow().as_slice(), dispatches.as_slice());
}
