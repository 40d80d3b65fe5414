use crate::output::LineClass;
use crate::render::Segment;

/// The visible input field and output region the console draws on.
pub trait Surface {
    fn set_input_enabled(&mut self, enabled: bool);
    fn focus_input(&mut self);
    fn input_value(&self) -> String;
    fn set_input_value(&mut self, value: &str);

    /// Wipes the output region.
    fn clear(&mut self);
    fn append_line(&mut self, class: LineClass, text: &str);
    /// Adds one character to the last line.
    fn push_char(&mut self, ch: char);
    /// Called once a typed line is complete; link segments should become
    /// clickable, text segments stay as they are.
    fn seal_line(&mut self, segments: &[Segment]);
    fn remove_last_line(&mut self);
    fn scroll_to_end(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub class: LineClass,
    pub text: String,
    pub links: Vec<String>,
}

/// Records everything in memory. Used by tests and headless hosts.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    pub lines: Vec<RenderedLine>,
    pub input: String,
    pub input_enabled: bool,
    pub focused: bool,
    pub scrolls: usize,
    /// total append_line calls, removed lines included
    pub appended: usize,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            input: String::new(),
            input_enabled: true,
            focused: false,
            scrolls: 0,
            appended: 0,
        }
    }
}

impl MemorySurface {
    pub fn texts(&self) -> Vec<String> {
        self.lines.iter().map(|l| l.text.clone()).collect()
    }

    pub fn last_line(&self) -> Option<&RenderedLine> {
        self.lines.last()
    }
}

impl Surface for MemorySurface {
    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn focus_input(&mut self) {
        self.focused = true;
    }

    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn set_input_value(&mut self, value: &str) {
        self.input = value.to_string();
    }

    fn clear(&mut self) {
        self.lines.clear();
    }

    fn append_line(&mut self, class: LineClass, text: &str) {
        self.appended += 1;
        self.lines.push(RenderedLine { class, text: text.to_string(), links: Vec::new() });
    }

    fn push_char(&mut self, ch: char) {
        if let Some(line) = self.lines.last_mut() {
            line.text.push(ch);
        }
    }

    fn seal_line(&mut self, segments: &[Segment]) {
        if let Some(line) = self.lines.last_mut() {
            line.links = segments
                .iter()
                .filter_map(|s| match s {
                    Segment::Link(url) => Some(url.clone()),
                    Segment::Text(_) => None,
                })
                .collect();
        }
    }

    fn remove_last_line(&mut self) {
        self.lines.pop();
    }

    fn scroll_to_end(&mut self) {
        self.scrolls += 1;
    }
}
