use serde::Serialize;
use tracing::debug;

use crate::graph::graph_model::{IdMap, ScreenId, ScreenNames, TransitionId, UNKNOWN_SCREEN};
use crate::graph::parse::{STATES_HEADER, TRANSITIONS_HEADER, parse_transition};

/// Graph re-rendered with canonical ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Projection {
    /// One line per transition occurrence, `T<n>: (s:S<i>,t:S<j>): <payload>`.
    pub transition_lines: Vec<String>,

    /// Transition ids in first-seen order.
    pub transition_ids: IdMap<TransitionId>,

    /// `S<n>: <name>` lines joined with `\n`, ascending by id.
    pub screen_listing: String,
}

/// Project the transitions section and the screen catalog onto canonical ids.
///
/// Only lines between the `Transitions` header and the first `States` header
/// are considered. A transition hash that recurs keeps its first id but is
/// emitted again for every occurrence. Endpoints missing from `screen_ids`
/// are written as their raw hash.
pub fn project(raw: &str, screens: &ScreenNames, screen_ids: &IdMap<ScreenId>) -> Projection {
    let mut transition_ids = IdMap::new();
    let mut transition_lines = Vec::new();
    let mut in_transitions = false;

    for line in raw.lines().map(str::trim) {
        if line.starts_with(TRANSITIONS_HEADER) {
            in_transitions = true;
            continue;
        }
        if line.starts_with(STATES_HEADER) {
            break;
        }
        if !in_transitions {
            continue;
        }

        let Some(transition) = parse_transition(line) else {
            continue;
        };

        let id: TransitionId = transition_ids.assign(transition.hash);
        transition_lines.push(format!(
            "{}: (s:{},t:{}): {}",
            id,
            screen_ids.resolve(transition.source),
            screen_ids.resolve(transition.target),
            transition.payload
        ));
    }

    debug!(
        lines = transition_lines.len(),
        distinct = transition_ids.len(),
        "projected transitions"
    );

    Projection {
        transition_lines,
        transition_ids,
        screen_listing: screen_listing(screens, screen_ids),
    }
}

/// `S<n>: <name>` for every screen, in ascending numeric id order.
pub fn screen_listing(screens: &ScreenNames, screen_ids: &IdMap<ScreenId>) -> String {
    screen_ids
        .iter()
        .map(|(id, hash)| {
            let name = screens
                .get(hash)
                .and_then(|name| name.as_deref())
                .unwrap_or(UNKNOWN_SCREEN);
            format!("{}: {}", id, name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
