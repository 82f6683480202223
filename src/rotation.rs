use crate::config::Config;
use crate::state::State;
use rand::seq::SliceRandom;
use rand::Rng;

/// Decides which pack a session plays from.
///
/// Without a rotation list this is always `active_pack` and `state` is left
/// untouched. With one, the first pick for a session sticks until the pack
/// leaves the list.
pub fn resolve_pack<R: Rng + ?Sized>(
    config: &Config,
    state: &mut State,
    session_id: &str,
    rng: &mut R,
) -> String {
    if config.pack_rotation.is_empty() {
        return config.active_pack.clone();
    }

    if let Some(assigned) = state.session_packs.get(session_id) {
        if config.pack_rotation.contains(assigned) {
            return assigned.clone();
        }
        tracing::debug!(session = %session_id, pack = %assigned, "assigned pack left the rotation");
    }

    let pack = config
        .pack_rotation
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| config.active_pack.clone());
    state
        .session_packs
        .insert(session_id.to_string(), pack.clone());
    pack
}
