/// Submitted command lines plus a cursor for ArrowUp/ArrowDown.
///
/// `position == entries.len()` is the past-the-end slot, where a fresh
/// line is being typed.
#[derive(Debug, Clone, Default)]
pub struct HistoryCursor {
    entries: Vec<String>,
    position: usize,
}

impl HistoryCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends unconditionally, blank lines included.
    pub fn record(&mut self, line: &str) {
        self.entries.push(line.to_string());
        self.position = self.entries.len();
    }

    /// One step towards the oldest entry, stopping there.
    pub fn up(&mut self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        self.position = self.position.saturating_sub(1);
        self.entries[self.position].clone()
    }

    /// One step towards past-the-end, which yields an empty string.
    pub fn down(&mut self) -> String {
        if self.position < self.entries.len() {
            self.position += 1;
        }
        self.entries.get(self.position).cloned().unwrap_or_default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_past_end(&self) -> bool {
        self.position == self.entries.len()
    }
}
