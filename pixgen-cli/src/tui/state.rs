#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Prompt,
    History,
}

impl FocusPane {
    /// Next pane; the history row is skipped while it is empty.
    pub fn next(self, has_history: bool) -> Self {
        match (self, has_history) {
            (Self::Prompt, true) => Self::History,
            (Self::Prompt, false) => Self::Prompt,
            (Self::History, _) => Self::Prompt,
        }
    }
}

/// Chip selection after moving `delta` steps, clamped to `len` entries.
pub fn step_selection(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(len - 1)
}
