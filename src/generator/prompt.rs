/// Material spliced into the report-generation instruction.
#[derive(Debug, Clone, Copy)]
pub struct PromptInput<'a> {
    /// The user's bug description, verbatim.
    pub description: &'a str,
    /// Rendered transition listing (any `ProjectionView`).
    pub transitions: &'a [String],
    /// `S<n>: <name>` listing; the screens section is omitted when `None`.
    pub screens: Option<&'a str>,
}

/// Build the bug-report instruction for an Android exploration graph.
///
/// Every piece is substituted exactly once, so braces or placeholder-looking
/// text inside the description are passed through untouched.
pub fn build_prompt(input: &PromptInput<'_>) -> String {
    let transitions = if input.transitions.is_empty() {
        "(no recorded transitions)".to_string()
    } else {
        input.transitions.join("\n")
    };

    let screens = match input.screens {
        Some(listing) if !listing.is_empty() => {
            format!("\n**Application Screens:**\n{}\n", listing)
        }
        _ => String::new(),
    };

    format!(
        r#"**Android Bug Report Generator**

You generate bug reports for Android applications.

You are given a user's description of a bug and the transitions recorded while exploring the app. Each transition is one GUI interaction (tap, long tap, swipe, text entry, ...) performed on a component of an app screen. Write a complete, structured bug report.

The report must contain these sections:

- **Title**
- **Observed Behavior**
- **Expected Behavior**
- **Steps to Reproduce**

**Bug Description:**
"{description}"

**Application Transitions (Graph Context):**
{transitions}
{screens}
**Rules for the Steps to Reproduce:**

1. The first step opens the application.
2. Treat this as the very first launch after a fresh install.
3. Every step is exactly one concrete user interaction (tap, swipe, long tap, ...).
4. Use only interactions that appear as a transition above.
5. A transition moves from its source screen (s) to its target screen (t).
6. The steps form one connected path through the transition graph, from the initial screen to the screen where the bug shows.
7. The target screen of each step is the source screen of the next step.
8. Describe each step in plain language, using the action and component details of its transition.
9. End each step with its transition ID written as `<transition_id>`, for example `<T4>`.
10. Leave out anything that is not an interaction backed by a transition (such as "observe the error").

Follow these rules exactly."#,
        description = input.description,
        transitions = transitions,
        screens = screens,
    )
}
