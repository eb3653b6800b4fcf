use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::grounding::pipeline::GroundedGraph;
use crate::report::report_model::BugReport;

/// One line of the generation trace file.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,

    pub app: String,
    pub graph_fingerprint: String,
    pub screens: usize,
    pub transitions: usize,

    pub backend: String,
    pub model: String,
    pub view: String,

    pub referenced: Vec<String>,
    pub unresolved: Vec<String>,

    pub error: Option<String>,
}

impl TraceEvent {
    pub fn now(app: &str, graph: &GroundedGraph) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            app: app.to_string(),
            graph_fingerprint: graph.fingerprint.clone(),
            screens: graph.screen_ids.len(),
            transitions: graph.transition_ids().len(),
            backend: String::new(),
            model: String::new(),
            view: String::new(),
            referenced: vec![],
            unresolved: vec![],
            error: None,
        }
    }

    pub fn with_backend(mut self, backend: impl ToString, model: impl ToString) -> Self {
        self.backend = backend.to_string();
        self.model = model.to_string();
        self
    }

    pub fn with_view(mut self, view: impl ToString) -> Self {
        self.view = view.to_string();
        self
    }

    pub fn with_report(mut self, report: &BugReport) -> Self {
        self.referenced = report.steps.iter().map(|s| s.transition.clone()).collect();
        self.unresolved = report.unresolved().map(|s| s.transition.clone()).collect();
        self
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }
}
