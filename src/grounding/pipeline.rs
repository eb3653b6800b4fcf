use std::path::Path;

use crate::graph::canonical::assign_screen_ids;
use crate::graph::collector::collect;
use crate::graph::error::GraphError;
use crate::graph::graph_model::{IdMap, ScreenId, ScreenNames, TransitionId};
use crate::graph::source::{fingerprint, read_graph};
use crate::grounding::reverser::reverse_transition_ids;
use crate::projection::projector::{Projection, project};
use crate::projection::view::ProjectionView;

/// One graph taken through collection, id assignment and projection.
///
/// Owns every map built for this graph; nothing is shared between instances,
/// so two graphs (or the same graph twice) never influence each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundedGraph {
    pub screens: ScreenNames,
    pub screen_ids: IdMap<ScreenId>,
    pub projection: Projection,
    /// SHA-1 of the source text
    pub fingerprint: String,
}

impl GroundedGraph {
    pub fn from_text(raw: &str) -> Self {
        let screens = collect(raw);
        let screen_ids = assign_screen_ids(&screens);
        let projection = project(raw, &screens, &screen_ids);

        Self {
            screens,
            screen_ids,
            projection,
            fingerprint: fingerprint(raw),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, GraphError> {
        let raw = read_graph(path)?;
        Ok(Self::from_text(&raw))
    }

    pub fn transition_lines(&self) -> &[String] {
        &self.projection.transition_lines
    }

    pub fn transition_ids(&self) -> &IdMap<TransitionId> {
        &self.projection.transition_ids
    }

    pub fn screen_listing(&self) -> &str {
        &self.projection.screen_listing
    }

    pub fn render(&self, view: ProjectionView) -> Vec<String> {
        view.render(self.transition_lines())
    }

    /// Map `<T<n>>` markers in generated text back to transition hashes.
    pub fn reverse(&self, text: &str) -> String {
        reverse_transition_ids(text, self.transition_ids())
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty() && self.projection.transition_lines.is_empty()
    }
}
