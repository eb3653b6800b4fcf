use tracing::debug;

use crate::graph::graph_model::ScreenNames;
use crate::graph::parse::{parse_screen, parse_transition};

/// Collect every screen hash in a graph dump, with declared names.
///
/// Makes one pass over the whole text without regard to sections. Transition
/// endpoints register a hash with no name. Screen declarations set the
/// name, so a bare endpoint reference never erases a declared name, whichever
/// comes first. Unrecognized lines are skipped.
pub fn collect(raw: &str) -> ScreenNames {
    let mut screens = ScreenNames::new();
    let mut declared = 0usize;

    for line in raw.lines().map(str::trim) {
        if let Some(transition) = parse_transition(line) {
            for endpoint in [transition.source, transition.target] {
                screens.entry(endpoint.to_string()).or_insert(None);
            }
        } else if let Some(screen) = parse_screen(line) {
            declared += 1;
            let entry = screens.entry(screen.hash.to_string()).or_insert(None);
            if let Some(name) = screen.name {
                *entry = Some(name.to_string());
            }
        }
    }

    debug!(screens = screens.len(), declared, "collected screen hashes");
    screens
}
