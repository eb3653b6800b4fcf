use serde::{Deserialize, Serialize};

use crate::projection::clean::strip_weights;
use crate::projection::extract::extract_transitions;

/// Which rendering of the transition listing to hand to a generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionView {
    /// Projected lines with the full attribute payload
    #[default]
    Full,
    /// Action and component fields only
    Extracted,
    /// Full payload minus edge weights
    Clean,
}

impl ProjectionView {
    pub fn render(self, transition_lines: &[String]) -> Vec<String> {
        match self {
            ProjectionView::Full => transition_lines.to_vec(),
            ProjectionView::Extracted => extract_transitions(transition_lines),
            ProjectionView::Clean => strip_weights(transition_lines),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectionView::Full => "full",
            ProjectionView::Extracted => "extracted",
            ProjectionView::Clean => "clean",
        }
    }
}
