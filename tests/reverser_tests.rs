use grounded_bug_report::GroundedGraph;
use grounded_bug_report::graph::graph_model::{IdMap, TransitionId};
use grounded_bug_report::grounding::reverser::{reverse_transition_ids, transition_references};

use crate::common::graphs::{OPEN_MEDIA, OPEN_UPLOAD, SWIPE_TO_LAUNCHER, commons_graph};

mod common;

fn id_map(hashes: &[&str]) -> IdMap<TransitionId> {
    let mut ids = IdMap::new();
    for hash in hashes {
        let _: TransitionId = ids.assign(hash);
    }
    ids
}

#[test]
fn markers_are_replaced_with_hashes() {
    let ids = id_map(&["abc", "def"]);

    assert_eq!(
        reverse_transition_ids("Step 1: <T2> then <T1>", &ids),
        "Step 1: <def> then <abc>"
    );
}

#[test]
fn unknown_marker_is_left_alone() {
    let ids = id_map(&["abc", "def"]);

    assert_eq!(
        reverse_transition_ids("Then <T99>.", &ids),
        "Then <T99>."
    );
}

#[test]
fn repeated_markers_are_all_replaced() {
    let ids = id_map(&["abc"]);

    assert_eq!(
        reverse_transition_ids("<T1><T1> and again <T1>", &ids),
        "<abc><abc> and again <abc>"
    );
}

#[test]
fn zero_and_padded_ids_are_unknown() {
    let ids = id_map(&["abc"]);

    assert_eq!(reverse_transition_ids("<T0> <T01>", &ids), "<T0> <T01>");
}

#[test]
fn bare_and_malformed_markers_are_untouched() {
    let ids = id_map(&["abc"]);
    let text = "T1 without brackets, <S1>, <t1>, <T 1>, <T1 >, <T>";

    assert_eq!(reverse_transition_ids(text, &ids), text);
}

#[test]
fn empty_map_changes_nothing() {
    let text = "1. Tap upload <T4>\n2. Crash <T5>\n";
    assert_eq!(reverse_transition_ids(text, &IdMap::new()), text);
}

#[test]
fn text_without_markers_is_identical() {
    let ids = id_map(&["abc"]);
    assert_eq!(reverse_transition_ids("", &ids), "");
    assert_eq!(reverse_transition_ids("no steps here", &ids), "no steps here");
}

#[test]
fn references_keep_order_and_duplicates() {
    assert_eq!(
        transition_references("<T3> x <T1> y <T3> z <T0> <S2>"),
        vec!["T3", "T1", "T3", "T0"]
    );
    assert!(transition_references("nothing").is_empty());
}

#[test]
fn fixture_markers_reverse_to_fixture_hashes() {
    let graph = GroundedGraph::from_text(&commons_graph());

    let reversed = graph.reverse("Open <T2>, tap <T4>, swipe <T6>, then <T7>.");

    assert_eq!(
        reversed,
        format!(
            "Open <{}>, tap <{}>, swipe <{}>, then <T7>.",
            OPEN_MEDIA, OPEN_UPLOAD, SWIPE_TO_LAUNCHER
        )
    );
}
