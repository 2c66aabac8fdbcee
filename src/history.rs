use crate::io::input::bound_line;

pub const RECALL_MARKER: &str = "!!";

/// One-entry history: the last raw line that reached dispatch.
#[derive(Debug, Default, Clone)]
pub struct HistorySlot {
    last: Option<String>,
}

impl HistorySlot {
    pub fn new() -> Self {
        Self { last: None }
    }

    // Overwrite the slot with the latest dispatched line
    pub fn record(&mut self, line: &str) {
        self.last = Some(bound_line(line).to_string());
    }

    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::MAX_LINE_LENGTH;

    #[test]
    fn test_starts_empty() {
        let history = HistorySlot::new();
        assert!(history.is_empty());
        assert_eq!(history.last(), None);
    }

    #[test]
    fn test_record_overwrites() {
        let mut history = HistorySlot::new();
        history.record("ls -l");
        history.record("echo hi &");
        assert_eq!(history.last(), Some("echo hi &"));
    }

    #[test]
    fn test_record_is_bounded() {
        let mut history = HistorySlot::new();
        let long = "é".repeat(MAX_LINE_LENGTH);
        history.record(&long);
        let kept = history.last().unwrap();
        assert!(kept.len() < MAX_LINE_LENGTH);
        assert!(kept.chars().all(|c| c == 'é'));
    }
}
