use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

// ============================================================================
// Attribute extraction: condensed transition view
// ============================================================================
//
// Turns
//   T3: (s:S3,t:S4): [id=7, act=(0) click, cp=[ty=Button,idx=ok,tx=OK,dsc=], weight=1]
// into
//   T3: (s:S3,t:S4): Action = "click"; Component = [Type = "Button", Identifier = "ok", Text = "OK", Description = ""]

static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(T\d+:\s*\(s:S\d+,t:S\d+\)):(.*)$").unwrap());

static ACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"act=\(\d+\)\s*([^,\]]+)").unwrap());

static COMPONENT_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[\s,])ty=([^,\]]+)").unwrap());

static COMPONENT_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[\s,])idx=([^,\]]+)").unwrap());

static COMPONENT_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[\s,])tx=([^,\]]+)").unwrap());

static COMPONENT_DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[\s,])dsc=([^\]]*)").unwrap());

const COMPONENT_MARKER: &str = "cp=";

/// UI component a transition acted on. Missing fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Component {
    pub kind: String,
    pub identifier: String,
    pub text: String,
    pub description: String,
}

/// The fields of a projected transition line that matter for grounding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransitionSummary {
    /// `T<n>: (s:S<i>,t:S<j>)`
    pub header: String,
    pub action: String,
    pub component: Component,
}

impl TransitionSummary {
    /// Parse one projected line. Returns `None` when the header is not in
    /// canonical form, e.g. because an endpoint fell back to a raw hash.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = HEADER.captures(line)?;
        let header = caps.get(1)?.as_str().trim().to_string();
        let details = caps.get(2)?.as_str().trim();

        let action = first_capture(&ACTION, details);
        let component = component_block(details)
            .map(|block| Component {
                kind: first_capture(&COMPONENT_TYPE, block),
                identifier: first_capture(&COMPONENT_IDENTIFIER, block),
                text: first_capture(&COMPONENT_TEXT, block),
                description: first_capture(&COMPONENT_DESCRIPTION, block),
            })
            .unwrap_or_default();

        Some(Self {
            header,
            action,
            component,
        })
    }
}

impl fmt::Display for TransitionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Action = \"{}\"; Component = [Type = \"{}\", Identifier = \"{}\", Text = \"{}\", Description = \"{}\"]",
            self.header,
            self.action,
            self.component.kind,
            self.component.identifier,
            self.component.text,
            self.component.description
        )
    }
}

/// Condensed view of projected transition lines. Lines without a canonical
/// header are dropped.
pub fn extract_transitions(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| TransitionSummary::parse(line))
        .map(|summary| summary.to_string())
        .collect()
}

fn first_capture(pattern: &Regex, haystack: &str) -> String {
    pattern
        .captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// Inner content of the first `cp=[...]` block, brackets balanced.
/// `cp=null`, a missing marker or an unterminated block all yield `None`.
fn component_block(details: &str) -> Option<&str> {
    for (at, _) in details.match_indices(COMPONENT_MARKER) {
        let value = &details[at + COMPONENT_MARKER.len()..];
        if value.starts_with("null") {
            return None;
        }
        if value.starts_with('[') {
            if let Some(inner) = bracketed(value) {
                return Some(inner.trim());
            }
        }
    }
    None
}

/// `s` starts with `[`; returns what sits between it and its matching `]`.
fn bracketed(s: &str) -> Option<&str> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[1..i]);
                }
            }
            _ => {}
        }
    }
    None
}
