use crate::events::Category;
use crate::pack::{PackManifest, SoundEntry};
use crate::state::State;
use rand::seq::SliceRandom;
use rand::Rng;

/// Picks a sound for `category`, never repeating the previous pick when the
/// category has an alternative. Records the pick in `state.last_played`;
/// persisting it is the caller's job.
pub fn pick<'a, R: Rng + ?Sized>(
    manifest: &'a PackManifest,
    category: Category,
    state: &mut State,
    rng: &mut R,
) -> Option<&'a SoundEntry> {
    let sounds = manifest.sounds(category);
    let chosen = match sounds {
        [] => return None,
        [only] => only,
        _ => {
            let last = state.last_played.get(&category);
            let candidates: Vec<&SoundEntry> = sounds
                .iter()
                .filter(|entry| Some(&entry.file_id) != last)
                .collect();
            // Only duplicates of the last file are left.
            if candidates.is_empty() {
                sounds.choose(rng)?
            } else {
                candidates.choose(rng).copied()?
            }
        }
    };

    state.last_played.insert(category, chosen.file_id.clone());
    Some(chosen)
}
