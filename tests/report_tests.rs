use std::cell::RefCell;

use grounded_bug_report::GroundedGraph;
use grounded_bug_report::generator::backend::{GenerationOptions, MockGenerator, TextGenerator};
use grounded_bug_report::generator::error::GenerationError;
use grounded_bug_report::projection::view::ProjectionView;
use grounded_bug_report::report::console::format_console_report;
use grounded_bug_report::report::report_model::{
    BugReport, ReportRequest, StepReference, generate_report,
};

use crate::common::graphs::{ALLOW_PERMISSION, OPEN_UPLOAD, commons_graph};

mod common;

// ============================================================================
// Helper generators
// ============================================================================

/// Returns a fixed answer and remembers the prompt it was given.
struct RecordingGenerator {
    answer: String,
    prompt: RefCell<Option<String>>,
}

impl RecordingGenerator {
    fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            prompt: RefCell::new(None),
        }
    }

    fn prompt(&self) -> String {
        self.prompt.borrow().clone().unwrap_or_default()
    }
}

impl TextGenerator for RecordingGenerator {
    fn name(&self) -> &str {
        "recording"
    }

    fn generate(&self, prompt: &str, _options: &GenerationOptions) -> Result<String, GenerationError> {
        *self.prompt.borrow_mut() = Some(prompt.to_string());
        Ok(self.answer.clone())
    }
}

struct FailingGenerator;

impl TextGenerator for FailingGenerator {
    fn name(&self) -> &str {
        "failing"
    }

    fn generate(&self, _prompt: &str, _options: &GenerationOptions) -> Result<String, GenerationError> {
        Err(GenerationError::EmptyCompletion("failing".to_string()))
    }
}

fn request(view: ProjectionView, include_screens: bool) -> ReportRequest<'static> {
    ReportRequest {
        app: "Wikimedia Commons",
        description: "Upload button does nothing",
        view,
        include_screens,
    }
}

fn sample_report() -> BugReport {
    BugReport {
        app: "Wikimedia Commons".to_string(),
        description: "Upload button does nothing".to_string(),
        backend: "mock".to_string(),
        model: "test-model".to_string(),
        view: ProjectionView::Full,
        graph_fingerprint: "0123456789abcdef0123456789abcdef01234567".to_string(),
        body: "1. Open the app <aaa>\n2. Tap upload <T9>\n".to_string(),
        steps: vec![
            StepReference {
                transition: "T1".to_string(),
                hash: Some("aaa".to_string()),
            },
            StepReference {
                transition: "T9".to_string(),
                hash: None,
            },
        ],
    }
}

// ============================================================================
// generate_report
// ============================================================================

#[test]
fn report_body_is_reversed_and_steps_resolved() {
    let graph = GroundedGraph::from_text(&commons_graph());
    let generator = RecordingGenerator::new("1. Allow access <T1>\n2. Tap upload <T4>\n3. Oops <T42>\n");

    let report = generate_report(
        &request(ProjectionView::Full, false),
        &graph,
        &generator,
        &GenerationOptions::default(),
    )
    .unwrap();

    assert_eq!(
        report.body,
        format!(
            "1. Allow access <{}>\n2. Tap upload <{}>\n3. Oops <T42>\n",
            ALLOW_PERMISSION, OPEN_UPLOAD
        )
    );
    assert_eq!(
        report.steps,
        vec![
            StepReference {
                transition: "T1".to_string(),
                hash: Some(ALLOW_PERMISSION.to_string()),
            },
            StepReference {
                transition: "T4".to_string(),
                hash: Some(OPEN_UPLOAD.to_string()),
            },
            StepReference {
                transition: "T42".to_string(),
                hash: None,
            },
        ]
    );
    assert!(!report.is_grounded());
    assert_eq!(report.unresolved().count(), 1);
    assert_eq!(report.backend, "recording");
    assert_eq!(report.graph_fingerprint, graph.fingerprint);
}

#[test]
fn prompt_uses_requested_view() {
    let graph = GroundedGraph::from_text(&commons_graph());
    let generator = RecordingGenerator::new("<T1>");

    generate_report(
        &request(ProjectionView::Extracted, false),
        &graph,
        &generator,
        &GenerationOptions::default(),
    )
    .unwrap();

    let prompt = generator.prompt();
    assert!(prompt.contains("\"Upload button does nothing\""));
    assert!(prompt.contains(r#"T6: (s:S1,t:S5): Action = "swipe";"#));
    assert!(!prompt.contains("weight="));
    assert!(!prompt.contains("**Application Screens:**"));
}

#[test]
fn prompt_includes_screens_when_requested() {
    let graph = GroundedGraph::from_text(&commons_graph());
    let generator = RecordingGenerator::new("<T1>");

    generate_report(
        &request(ProjectionView::Clean, true),
        &graph,
        &generator,
        &GenerationOptions::default(),
    )
    .unwrap();

    let prompt = generator.prompt();
    assert!(prompt.contains("**Application Screens:**\nS1: Settings\n"));
    assert!(prompt.contains("S7: Unknown Screen"));
    assert!(!prompt.contains("weight="));
}

#[test]
fn report_records_model_and_view() {
    let graph = GroundedGraph::from_text(&commons_graph());
    let options = GenerationOptions {
        model: "local-model".to_string(),
        max_tokens: 512,
    };

    let report = generate_report(
        &request(ProjectionView::Clean, false),
        &graph,
        &MockGenerator::default(),
        &options,
    )
    .unwrap();

    assert_eq!(report.model, "local-model");
    assert_eq!(report.view, ProjectionView::Clean);
    assert!(report.is_grounded());
    assert!(report.body.contains(ALLOW_PERMISSION));
}

#[test]
fn generator_failure_is_propagated() {
    let graph = GroundedGraph::from_text(&commons_graph());

    let err = generate_report(
        &request(ProjectionView::Full, false),
        &graph,
        &FailingGenerator,
        &GenerationOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, GenerationError::EmptyCompletion(_)));
}

#[test]
fn empty_graph_still_generates() {
    let graph = GroundedGraph::from_text("");
    let generator = RecordingGenerator::new("1. Open the app <T1>");

    let report = generate_report(
        &request(ProjectionView::Full, true),
        &graph,
        &generator,
        &GenerationOptions::default(),
    )
    .unwrap();

    assert!(generator.prompt().contains("(no recorded transitions)"));
    assert_eq!(report.body, "1. Open the app <T1>");
    assert!(!report.is_grounded());
}

#[test]
fn report_without_references_counts_as_grounded() {
    let report = BugReport {
        steps: Vec::new(),
        ..sample_report()
    };
    assert!(report.is_grounded());
    assert_eq!(report.unresolved().count(), 0);
}

// ============================================================================
// Output formats
// ============================================================================

#[test]
fn console_report_lists_every_step() {
    let output = format_console_report(&sample_report());

    assert!(output.starts_with("=== Bug Report: Wikimedia Commons ===\n\n1. Open the app <aaa>"));
    assert!(output.contains("=== Step Trace (2 references) ==="));
    assert!(output.contains("\u{2713} T1 -> aaa"));
    assert!(output.contains("\u{2717} T9 (not in graph)"));
    assert!(output.contains(
        "=== Grounded: 1 of 2 references resolved (mock test-model, graph 0123456789ab) ==="
    ));
}

#[test]
fn console_report_tolerates_short_fingerprint() {
    let report = BugReport {
        graph_fingerprint: "abc".to_string(),
        ..sample_report()
    };
    assert!(format_console_report(&report).contains("graph abc)"));
}

#[test]
fn report_json_round_trips() {
    let report = sample_report();

    let json = serde_json::to_string_pretty(&report).unwrap();
    assert!(json.contains("\"view\": \"full\""));
    assert!(json.contains("\"hash\": null"));

    let back: BugReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}
