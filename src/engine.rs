use crate::config::{Config, Paths};
use crate::events::{Category, HostEvent};
use crate::pack::{PackLookup, PackResolver};
use crate::pause::{MarkerFile, PauseGate};
use crate::rotation;
use crate::router::{self, Action};
use crate::selector;
use crate::session::Session;
use crate::spam::SpamDetector;
use crate::state::StateStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

/// A side effect the engine asks for. Delivering it is someone else's job.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Title(String),
    Sound {
        path: PathBuf,
        volume: f32,
        category: Category,
    },
    Notification {
        title: String,
        message: String,
    },
}

pub struct Engine {
    config: Config,
    store: StateStore,
    packs: PackResolver,
    detector: SpamDetector,
    gate: Box<dyn PauseGate>,
    session: Session,
    rng: StdRng,
}

impl Engine {
    pub fn new(config: Config, paths: &Paths, session: Session) -> Self {
        Self {
            store: StateStore::new(&paths.state_file),
            packs: PackResolver::new(config.packs_dir(paths)),
            detector: SpamDetector::from_config(&config),
            gate: Box::new(MarkerFile::new(&paths.pause_marker)),
            rng: StdRng::from_entropy(),
            config,
            session,
        }
    }

    pub fn with_gate(mut self, gate: impl PauseGate + 'static) -> Self {
        self.gate = Box::new(gate);
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn start(&mut self, now: f64) -> Vec<Dispatch> {
        self.handle(&HostEvent::ProcessStart, now)
    }

    /// Handles one event to completion. Title first, then sound, then
    /// notification.
    pub fn handle(&mut self, event: &HostEvent, now: f64) -> Vec<Dispatch> {
        let paused = self.gate.is_paused();
        let action = router::route(
            event,
            &self.config,
            paused,
            &self.detector,
            &mut self.session,
            now,
        );
        tracing::debug!(?event, ?action, paused, "routed event");

        let mut dispatches = vec![Dispatch::Title(router::title(&self.session.project, &action))];

        if let (true, Some(category)) = (action.play_sound, action.category) {
            if let Some(sound) = self.sound_for(category) {
                dispatches.push(sound);
            }
        }

        if let Some(notification) = self.notification_for(&action) {
            dispatches.push(notification);
        }

        dispatches
    }

    /// Picks a sound for `category` regardless of pause or toggles.
    pub fn preview(&mut self, category: Category) -> Option<Dispatch> {
        self.sound_for(category)
    }

    fn sound_for(&mut self, category: Category) -> Option<Dispatch> {
        let mut state = self.store.load();
        let before = state.clone();

        let pack_name =
            rotation::resolve_pack(&self.config, &mut state, &self.session.id, &mut self.rng);

        let dispatch = match self.packs.resolve(&pack_name) {
            PackLookup::Found(pack) => {
                match selector::pick(&pack.manifest, category, &mut state, &mut self.rng) {
                    Some(entry) => match pack.sound_path(entry) {
                        Some(path) => Some(Dispatch::Sound {
                            path,
                            volume: self.config.volume,
                            category,
                        }),
                        None => {
                            tracing::warn!(pack = %pack.name, file = %entry.file_id, "sound file missing");
                            // Nothing played, so the history must not move.
                            match before.last_played.get(&category) {
                                Some(previous) => {
                                    state.last_played.insert(category, previous.clone());
                                }
                                None => {
                                    state.last_played.remove(&category);
                                }
                            }
                            None
                        }
                    },
                    None => {
                        tracing::debug!(pack = %pack.name, category = %category, "pack has no sounds for category");
                        None
                    }
                }
            }
            PackLookup::NotFound => {
                tracing::debug!(pack = %pack_name, "no pack available; staying silent");
                None
            }
        };

        if state != before {
            self.store.save(&state);
        }
        dispatch
    }

    fn notification_for(&self, action: &Action) -> Option<Dispatch> {
        if !action.notify {
            return None;
        }
        let category = action.category?;
        Some(Dispatch::Notification {
            title: self.session.project.clone(),
            message: category.notification_message().to_string(),
        })
    }
}
