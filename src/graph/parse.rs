use std::sync::LazyLock;

use regex::Regex;

// ============================================================================
// Line recognition for exploration graph dumps
// ============================================================================
//
// Callers pass lines that are already trimmed. Anything that does not match
// a rule below is noise and yields `None`.

pub const TRANSITIONS_HEADER: &str = "Transitions";
pub const STATES_HEADER: &str = "States";

static TRANSITION_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-f0-9]{64}):").unwrap());

static ENDPOINTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\s*s:\s*([a-f0-9]+)\s*,\s*t:\s*([a-f0-9]+)\s*\)").unwrap()
});

static SCREEN_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-f0-9]{64}),").unwrap());

/// One transition line, borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTransition<'a> {
    pub hash: &'a str,
    pub source: &'a str,
    pub target: &'a str,
    /// Attribute payload after the endpoint annotation, trimmed, with the
    /// `:` separator removed.
    pub payload: &'a str,
}

/// One screen declaration from the states section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawScreen<'a> {
    pub hash: &'a str,
    /// First comma-delimited field after the hash; `None` when blank.
    pub name: Option<&'a str>,
}

/// `<hash>: (s: <hash>, t: <hash>): <payload>`
pub fn parse_transition(line: &str) -> Option<RawTransition<'_>> {
    let head = TRANSITION_HEAD.captures(line)?;
    let hash = head.get(1)?.as_str();
    let rest = &line[head.get(0)?.end()..];

    let endpoints = ENDPOINTS.captures(rest)?;
    let source = endpoints.get(1)?.as_str();
    let target = endpoints.get(2)?.as_str();

    let after = rest[endpoints.get(0)?.end()..].trim_start();
    let payload = after.strip_prefix(':').unwrap_or(after).trim();

    Some(RawTransition {
        hash,
        source,
        target,
        payload,
    })
}

/// `<hash>, <name>, <ignored...>`
pub fn parse_screen(line: &str) -> Option<RawScreen<'_>> {
    let head = SCREEN_HEAD.captures(line)?;
    let hash = head.get(1)?.as_str();
    let rest = &line[head.get(0)?.end()..];

    let name = rest
        .split(',')
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty());

    Some(RawScreen { hash, name })
}
