//! System prompt construction.

use crate::storage::FeedbackEntry;

/// Instructions used when no prompt file is given.
pub const DEFAULT_PROMPT: &str = "You classify the most likely ethnicity for a given personal name of a signup. \
Return a single concise label (e.g. 'Indian', 'East Asian', 'Middle Eastern', 'African', 'European', 'Latino', 'Mixed', or 'Unknown'). \
Use 'Unknown' if the ethnicity cannot be determined confidently from the name alone.";

const EXAMPLES_HEADING: &str = "Previously approved mappings:";

/// Appends few-shot examples to `base`. With no examples `base` is returned unchanged.
///
/// ```rust
/// use tagger::classify::build_prompt;
/// use tagger::FeedbackEntry;
///
/// let ana = FeedbackEntry::new("Ana", "Latino", "verified");
/// let prompt = build_prompt("Classify.", &[&ana]);
/// assert_eq!(prompt, "Classify.\n\nPreviously approved mappings:\n- Ana -> Latino (verified)");
/// ```
pub fn build_prompt(base: &str, examples: &[&FeedbackEntry]) -> String {
    if examples.is_empty() {
        return base.to_string();
    }

    let mut lines = vec![base.to_string(), String::new(), EXAMPLES_HEADING.to_string()];
    lines.extend(examples.iter().map(|entry| example_line(entry)));
    lines.join("\n")
}

/// User message carrying the name to classify.
pub fn user_message(name: &str) -> String {
    format!("Name: {}", name)
}

fn example_line(entry: &FeedbackEntry) -> String {
    if entry.notes.is_empty() {
        format!("- {} -> {}", entry.name, entry.ethnicity)
    } else {
        format!("- {} -> {} ({})", entry.name, entry.ethnicity, entry.notes)
    }
}
