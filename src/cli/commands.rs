use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::cli::config::GenerateSettings;
use crate::generator::backend::{
    BackendKind, ChatCompletionsGenerator, MockGenerator, OllamaGenerator, TextGenerator,
};
use crate::generator::error::GenerationError;
use crate::graph::graph_model::{IdMap, TransitionId, UNKNOWN_SCREEN};
use crate::graph::source::locate_graph_file;
use crate::grounding::pipeline::GroundedGraph;
use crate::projection::view::ProjectionView;
use crate::report::console::format_console_report;
use crate::report::error::ReportError;
use crate::report::report_model::{ReportRequest, generate_report};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::TraceEvent;

// ============================================================================
// project subcommand
// ============================================================================

#[derive(Serialize)]
struct ProjectionDocument<'a> {
    fingerprint: &'a str,
    view: ProjectionView,
    transitions: Vec<String>,
    transition_ids: &'a IdMap<TransitionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    screens: Option<Vec<ScreenEntry<'a>>>,
}

#[derive(Serialize)]
struct ScreenEntry<'a> {
    id: String,
    hash: &'a str,
    name: &'a str,
}

/// Render the projection of a graph file as text or JSON.
pub fn cmd_project(
    graph_path: &Path,
    view: ProjectionView,
    include_screens: bool,
    format: &str,
) -> Result<String, ReportError> {
    let graph = GroundedGraph::from_path(graph_path)?;
    let transitions = graph.render(view);

    let output = match format {
        "json" => {
            let screens: Option<Vec<ScreenEntry<'_>>> = include_screens.then(|| {
                graph
                    .screen_ids
                    .iter()
                    .map(|(id, hash)| ScreenEntry {
                        id: id.to_string(),
                        hash,
                        name: graph
                            .screens
                            .get(hash)
                            .and_then(|name| name.as_deref())
                            .unwrap_or(UNKNOWN_SCREEN),
                    })
                    .collect()
            });
            let document = ProjectionDocument {
                fingerprint: &graph.fingerprint,
                view,
                transitions,
                transition_ids: graph.transition_ids(),
                screens,
            };
            serde_json::to_string_pretty(&document)?
        }
        _ => {
            let mut out = transitions.join("\n");
            if include_screens && !graph.screen_listing().is_empty() {
                if !out.is_empty() {
                    out.push_str("\n\n");
                }
                out.push_str(graph.screen_listing());
            }
            out
        }
    };

    Ok(output)
}

// ============================================================================
// reverse subcommand
// ============================================================================

/// Rewrite `<T<n>>` markers in `input` (or stdin) using the ids of a graph file.
pub fn cmd_reverse(graph_path: &Path, input: Option<&Path>) -> Result<String, ReportError> {
    let graph = GroundedGraph::from_path(graph_path)?;

    let text = match input {
        Some(path) => std::fs::read_to_string(path).map_err(ReportError::Input)?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(ReportError::Input)?;
            buf
        }
    };

    Ok(graph.reverse(&text))
}

// ============================================================================
// generate subcommand
// ============================================================================

/// Generate a report and return it rendered in the requested format.
///
/// Every run, failed or not, appends one event to the trace file when
/// tracing is enabled.
pub fn cmd_generate(settings: &GenerateSettings) -> Result<String, ReportError> {
    let graph_path = match &settings.graph {
        Some(path) => path.clone(),
        None => locate_graph_file(&settings.data_dir, &settings.app)?,
    };
    info!(app = %settings.app, graph = %graph_path.display(), "generating report");

    let graph = GroundedGraph::from_path(&graph_path)?;
    let generator = build_generator(settings)?;

    let tracer = match &settings.trace_path {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };
    let event = TraceEvent::now(&settings.app, &graph)
        .with_backend(generator.name(), &settings.options.model)
        .with_view(settings.view.as_str());

    let request = ReportRequest {
        app: &settings.app,
        description: &settings.description,
        view: settings.view,
        include_screens: settings.include_screens,
    };

    let report = match generate_report(&request, &graph, generator.as_ref(), &settings.options) {
        Ok(report) => {
            tracer.log(&event.with_report(&report));
            report
        }
        Err(e) => {
            tracer.log(&event.with_error(&e));
            return Err(e.into());
        }
    };

    if !report.is_grounded() {
        warn!(
            unresolved = report.unresolved().count(),
            "report references transitions that are not in the graph"
        );
    }

    let output = match settings.format.as_str() {
        "json" => serde_json::to_string_pretty(&report)?,
        _ => format_console_report(&report),
    };
    Ok(output)
}

/// Print to stdout or write to `output`.
pub fn emit(content: &str, output: Option<&Path>) -> Result<(), ReportError> {
    match output {
        Some(path) => std::fs::write(path, content).map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Build the backend selected in the settings.
pub fn build_generator(
    settings: &GenerateSettings,
) -> Result<Box<dyn TextGenerator>, GenerationError> {
    match settings.backend {
        BackendKind::Chat => Ok(Box::new(ChatCompletionsGenerator::new(
            &settings.endpoint,
            settings.api_key.as_deref(),
            settings.timeout,
        )?)),
        BackendKind::Ollama => Ok(Box::new(OllamaGenerator::new(
            &settings.endpoint,
            settings.timeout,
        )?)),
        BackendKind::Mock => Ok(Box::new(MockGenerator::default())),
    }
}
