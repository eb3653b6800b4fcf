use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::graph::graph_model::{IdMap, TransitionId};

static TRANSITION_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<(T\d+)>").unwrap());

/// Rewrite every `<T<n>>` marker to `<original-hash>`.
///
/// Markers are rewritten in place and in order, duplicates included. A marker
/// whose id is not in `transition_ids` is left exactly as written.
pub fn reverse_transition_ids(text: &str, transition_ids: &IdMap<TransitionId>) -> String {
    TRANSITION_MARKER
        .replace_all(text, |caps: &Captures<'_>| {
            let token = &caps[1];
            let inner = transition_ids.hash_of_token(token).unwrap_or(token);
            format!("<{}>", inner)
        })
        .into_owned()
}

/// Ids of every `<T<n>>` marker in `text`, in order of appearance.
pub fn transition_references(text: &str) -> Vec<String> {
    TRANSITION_MARKER
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}
