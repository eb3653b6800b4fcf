use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::generator::backend::{GenerationOptions, TextGenerator};
use crate::generator::error::GenerationError;
use crate::generator::prompt::{PromptInput, build_prompt};
use crate::grounding::pipeline::GroundedGraph;
use crate::grounding::reverser::transition_references;
use crate::projection::view::ProjectionView;

// ============================================================================
// Bug report: generated text anchored to graph transitions
// ============================================================================

/// One `<T<n>>` reference found in generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReference {
    /// Canonical id as the generator wrote it
    pub transition: String,

    /// Original transition hash; `None` if the id is not in the graph
    pub hash: Option<String>,
}

/// Final report: generator output with transition ids mapped back to hashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugReport {
    /// App the graph was recorded from
    pub app: String,

    /// User's bug description
    pub description: String,

    /// Backend and model that wrote the report
    pub backend: String,
    pub model: String,

    /// Listing variant used in the prompt
    pub view: ProjectionView,

    /// SHA-1 of the graph text
    pub graph_fingerprint: String,

    /// Report text with `<hash>` markers in place of `<T<n>>`
    pub body: String,

    /// Transition references in order of appearance, duplicates kept
    pub steps: Vec<StepReference>,
}

impl BugReport {
    pub fn unresolved(&self) -> impl Iterator<Item = &StepReference> {
        self.steps.iter().filter(|s| s.hash.is_none())
    }

    /// Whether every step reference resolved to a recorded transition.
    pub fn is_grounded(&self) -> bool {
        self.steps.iter().all(|s| s.hash.is_some())
    }
}

/// What the user asked for.
#[derive(Debug, Clone)]
pub struct ReportRequest<'a> {
    pub app: &'a str,
    pub description: &'a str,
    pub view: ProjectionView,
    pub include_screens: bool,
}

/// Prompt the generator with the projected graph and turn its answer into a
/// `BugReport`.
pub fn generate_report(
    request: &ReportRequest<'_>,
    graph: &GroundedGraph,
    generator: &dyn TextGenerator,
    options: &GenerationOptions,
) -> Result<BugReport, GenerationError> {
    if graph.is_empty() {
        warn!(app = request.app, "graph has no screens or transitions; prompting without context");
    }

    let transitions = graph.render(request.view);
    let prompt = build_prompt(&PromptInput {
        description: request.description,
        transitions: &transitions,
        screens: request.include_screens.then(|| graph.screen_listing()),
    });

    info!(
        app = request.app,
        backend = generator.name(),
        view = request.view.as_str(),
        transitions = transitions.len(),
        prompt_chars = prompt.len(),
        "generating bug report"
    );

    let raw = generator.generate(&prompt, options)?;

    let steps = transition_references(&raw)
        .into_iter()
        .map(|transition| StepReference {
            hash: graph
                .transition_ids()
                .hash_of_token(&transition)
                .map(str::to_string),
            transition,
        })
        .collect();

    Ok(BugReport {
        app: request.app.to_string(),
        description: request.description.to_string(),
        backend: generator.name().to_string(),
        model: options.model.clone(),
        view: request.view,
        graph_fingerprint: graph.fingerprint.clone(),
        body: graph.reverse(&raw),
        steps,
    })
}
