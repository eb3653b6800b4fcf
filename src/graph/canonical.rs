use crate::graph::graph_model::{IdMap, ScreenId, ScreenNames};

/// Assign `S1..Sn` to the collected screens in ascending hash order.
///
/// The returned map answers both directions (id to hash, hash to id).
/// Transition ids are not assigned here; they are minted in first-seen order
/// while the projector walks the transitions section.
pub fn assign_screen_ids(screens: &ScreenNames) -> IdMap<ScreenId> {
    let mut ids = IdMap::new();
    // BTreeMap keys come out sorted
    for hash in screens.keys() {
        ids.assign(hash);
    }
    ids
}
