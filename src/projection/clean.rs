const WEIGHT_MARKER: &str = " weight=";

/// Drop the edge weight: everything from the first ` weight=` to end of line,
/// then trailing whitespace.
pub fn strip_weight(line: &str) -> &str {
    match line.find(WEIGHT_MARKER) {
        Some(at) => line[..at].trim_end(),
        None => line.trim_end(),
    }
}

pub fn strip_weights(lines: &[String]) -> Vec<String> {
    lines.iter().map(|line| strip_weight(line).to_string()).collect()
}
