//! Recent prompt history.
//!
//! The history is the short list of prompts offered for one-key
//! regeneration. It is ordered most-recent-first, holds at most
//! [`HISTORY_LIMIT`] entries, and never contains the same prompt twice.

/// Maximum number of prompts kept in the history.
pub const HISTORY_LIMIT: usize = 3;

/// Longest prompt shown verbatim in a history label.
pub const LABEL_MAX_CHARS: usize = 20;

/// Record `prompt` as the most recent entry of `history`.
///
/// Any earlier occurrence of the prompt is dropped, the prompt is placed in
/// front, and the result is cut down to [`HISTORY_LIMIT`] entries. The input
/// is left untouched.
pub fn record_prompt(history: &[String], prompt: &str) -> Vec<String> {
    std::iter::once(prompt)
        .chain(
            history
                .iter()
                .map(String::as_str)
                .filter(|entry| *entry != prompt),
        )
        .take(HISTORY_LIMIT)
        .map(str::to_string)
        .collect()
}

/// Label used when rendering a history entry.
///
/// Prompts longer than [`LABEL_MAX_CHARS`] characters are shortened to that
/// many characters followed by `...`.
pub fn history_label(prompt: &str) -> String {
    match prompt.char_indices().nth(LABEL_MAX_CHARS) {
        Some((cut, _)) => format!("{}...", &prompt[..cut]),
        None => prompt.to_string(),
    }
}

/// Bounded, de-duplicated prompt history, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptHistory(Vec<String>);

impl PromptHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Promote `prompt` to the front of the history.
    pub fn record(&mut self, prompt: &str) {
        self.0 = record_prompt(&self.0, prompt);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_record_into_empty() {
        assert_eq!(record_prompt(&[], "a"), strings(&["a"]));
    }

    #[test]
    fn test_existing_prompt_moves_to_front() {
        let history = strings(&["b", "a"]);
        assert_eq!(record_prompt(&history, "a"), strings(&["a", "b"]));
    }

    #[test]
    fn test_oldest_prompt_is_evicted() {
        let history = strings(&["c", "b", "a"]);
        assert_eq!(record_prompt(&history, "d"), strings(&["d", "c", "b"]));
    }

    #[test]
    fn test_recording_front_entry_is_stable() {
        let history = strings(&["c", "b", "a"]);
        assert_eq!(record_prompt(&history, "c"), history);
    }

    #[test]
    fn test_record_does_not_mutate_input() {
        let history = strings(&["b", "a"]);
        let _ = record_prompt(&history, "z");
        assert_eq!(history, strings(&["b", "a"]));
    }

    #[test]
    fn test_bounded_and_distinct_over_long_sequences() {
        let alphabet = ["a", "b", "c", "d", "e"];
        let mut history = PromptHistory::new();

        for step in 0..200usize {
            let prompt = alphabet[(step * 7 + step / 3) % alphabet.len()];
            history.record(prompt);

            assert!(history.len() <= HISTORY_LIMIT);
            assert_eq!(history.get(0), Some(prompt));

            let mut seen = history.as_slice().to_vec();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), history.len(), "duplicate in {:?}", history);
        }
    }

    #[test]
    fn test_prompt_history_iteration_order() {
        let mut history = PromptHistory::new();
        history.record("first");
        history.record("second");
        history.record("third");
        history.record("first");

        let entries: Vec<&str> = history.iter().collect();
        assert_eq!(entries, vec!["first", "third", "second"]);
        assert!(!history.is_empty());
    }

    #[test]
    fn test_history_label_short_prompt_unchanged() {
        assert_eq!(history_label("a red fox"), "a red fox");
        assert_eq!(history_label("exactly twenty chars"), "exactly twenty chars");
    }

    #[test]
    fn test_history_label_truncates_long_prompt() {
        assert_eq!(
            history_label("a castle on a floating island at dusk"),
            "a castle on a floati..."
        );
    }

    #[test]
    fn test_history_label_respects_char_boundaries() {
        let prompt = "ねこがそらをとんでいるえをかいてくださいおねがいします";
        let label = history_label(prompt);
        assert!(label.ends_with("..."));
        assert_eq!(label.chars().count(), LABEL_MAX_CHARS + 3);
    }
}
