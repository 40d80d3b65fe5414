use crate::config::ConsoleConfig;
use crate::output::{LineClass, OutputRecord};
use crate::surface::Surface;
use regex::Regex;
use std::collections::VecDeque;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

/// A piece of a finished line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Link(String),
}

fn url_pattern() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| {
        Regex::new(r"^https?://[0-9a-z.-]+\.[a-z.]{2,6}[/0-9A-Za-z_ .-]*/?$").expect("url pattern compiles")
    })
}

/// Splits a line on single spaces and marks whole-token URLs as links.
/// Joining the segments back gives the input unchanged.
pub fn linkify(line: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    for (i, token) in line.split(' ').enumerate() {
        if i > 0 {
            push_text(&mut segments, " ");
        }
        if url_pattern().is_match(token) {
            segments.push(Segment::Link(token.to_string()));
        } else {
            push_text(&mut segments, token);
        }
    }
    segments
}

fn push_text(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    match segments.last_mut() {
        Some(Segment::Text(last)) => last.push_str(text),
        _ => segments.push(Segment::Text(text.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Hold,
    Clear,
    Append(LineClass, String),
    Open(LineClass),
    Type(char),
    Seal,
    Pause(Duration),
    Scroll,
    Remove(usize),
    Advance,
    Release,
}

/// Turns the output log into surface calls.
///
/// `render` only plans; the plan is a queue of steps that `tick` plays back
/// until it reaches one that has to wait (a typed character or a line
/// pause). Hosts sleep for the returned delay and call `tick` again.
pub struct Renderer {
    queue: VecDeque<Step>,
    /// records fully on the surface
    rendered: usize,
    /// records already queued
    planned: usize,
    line: String,
    char_delay: Duration,
    line_delay: Duration,
    header_prefix: String,
}

impl Renderer {
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            queue: VecDeque::new(),
            rendered: 0,
            planned: 0,
            line: String::new(),
            char_delay: config.char_delay(),
            line_delay: config.line_delay(),
            header_prefix: config.header_prefix.clone(),
        }
    }

    pub fn rendered(&self) -> usize {
        self.rendered
    }

    pub fn is_busy(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn render(&mut self, outputs: &[OutputRecord], animate: bool) {
        self.plan(outputs, animate, !animate);
    }

    /// Like a normal render but leaves the input disabled afterwards.
    pub fn render_holding_input(&mut self, outputs: &[OutputRecord]) {
        self.plan(outputs, false, false);
    }

    pub fn drop_lines(&mut self, count: usize) {
        self.queue.push_back(Step::Remove(count));
    }

    /// The whole flipbook counts as one record.
    pub fn finish_animation(&mut self) {
        self.planned += 1;
        self.queue.push_back(Step::Advance);
        self.queue.push_back(Step::Release);
    }

    pub fn release_input(&mut self) {
        self.queue.push_back(Step::Release);
    }

    fn plan(&mut self, outputs: &[OutputRecord], animate: bool, release: bool) {
        self.queue.push_back(Step::Hold);

        if outputs.is_empty() || outputs.len() < self.planned {
            debug!(planned = self.planned, len = outputs.len(), "output log was reset");
            self.queue.push_back(Step::Clear);
            self.planned = 0;
        }

        let last_header = outputs.iter().rposition(OutputRecord::is_header).unwrap_or(0);
        debug!(from = self.planned, to = outputs.len(), animate, "planning render");

        for (index, record) in outputs.iter().enumerate().skip(self.planned) {
            if animate {
                for line in record.content().split('\n') {
                    self.queue.push_back(Step::Append(LineClass::Text, line.to_string()));
                    self.queue.push_back(Step::Scroll);
                }
                continue;
            }

            if record.is_header() {
                let echo = format!("{}{}", self.header_prefix, record.content());
                self.queue.push_back(Step::Append(LineClass::Header, echo));
                self.queue.push_back(Step::Scroll);
            } else {
                // anything before the latest header is scrollback
                let typed = index >= last_header;
                for line in record.content().split('\n') {
                    if typed {
                        self.queue.push_back(Step::Open(record.class()));
                        self.queue.extend(line.chars().map(Step::Type));
                        self.queue.push_back(Step::Seal);
                        self.queue.push_back(Step::Pause(self.line_delay));
                    } else {
                        self.queue.push_back(Step::Append(record.class(), line.to_string()));
                    }
                    self.queue.push_back(Step::Scroll);
                }
            }
            self.queue.push_back(Step::Advance);
        }

        if !animate {
            self.planned = outputs.len();
        }
        if release {
            self.queue.push_back(Step::Release);
        }
    }

    /// Plays queued steps until one needs a pause. Returns that pause, or
    /// `None` once the queue is empty.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> Option<Duration> {
        while let Some(step) = self.queue.pop_front() {
            match step {
                Step::Hold => surface.set_input_enabled(false),
                Step::Clear => {
                    surface.clear();
                    self.rendered = 0;
                }
                Step::Append(class, text) => surface.append_line(class, &text),
                Step::Open(class) => {
                    self.line.clear();
                    surface.append_line(class, "");
                }
                Step::Type(ch) => {
                    self.line.push(ch);
                    surface.push_char(ch);
                    surface.scroll_to_end();
                    return Some(self.char_delay);
                }
                Step::Seal => surface.seal_line(&linkify(&self.line)),
                Step::Pause(delay) => return Some(delay),
                Step::Scroll => surface.scroll_to_end(),
                Step::Remove(count) => {
                    for _ in 0..count {
                        surface.remove_last_line();
                    }
                }
                Step::Advance => self.rendered += 1,
                Step::Release => {
                    surface.set_input_enabled(true);
                    surface.focus_input();
                }
            }
        }
        None
    }

    /// Runs the whole queue without waiting.
    pub fn flush(&mut self, surface: &mut dyn Surface) {
        while self.tick(surface).is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    fn renderer() -> Renderer {
        Renderer::new(&ConsoleConfig::instant())
    }

    fn joined(segments: &[Segment]) -> String {
        segments
            .iter()
            .map(|s| match s {
                Segment::Text(t) | Segment::Link(t) => t.as_str(),
            })
            .collect()
    }

    #[test]
    fn test_linkify_marks_urls() {
        let line = "    - GitHub:    🔗 https://github.com/seegrand/";
        let segments = linkify(line);
        assert_eq!(segments.last(), Some(&Segment::Link("https://github.com/seegrand/".to_string())));
        assert_eq!(joined(&segments), line);
    }

    #[test]
    fn test_linkify_leaves_plain_text() {
        let line = "no  links,  just   text: example.com ftp://x.org";
        assert_eq!(linkify(line), vec![Segment::Text(line.to_string())]);
    }

    #[test]
    fn test_linkify_whole_token_only() {
        let segments = linkify("(https://example.com/)");
        assert_eq!(segments, vec![Segment::Text("(https://example.com/)".to_string())]);
        assert_eq!(linkify("https://example.com/"), vec![Segment::Link("https://example.com/".to_string())]);
    }

    #[test]
    fn test_linkify_ascii_word_chars_only() {
        assert_eq!(linkify("https://example.com/cafe_1"), vec![Segment::Link("https://example.com/cafe_1".to_string())]);
        assert_eq!(linkify("https://example.com/café"), vec![Segment::Text("https://example.com/café".to_string())]);
        assert_eq!(linkify("https://exämple.com/"), vec![Segment::Text("https://exämple.com/".to_string())]);
    }

    #[test]
    fn test_empty_log_clears() {
        let mut r = renderer();
        let mut surface = MemorySurface::default();
        r.render(&[OutputRecord::text("hello")], false);
        r.flush(&mut surface);
        assert_eq!(r.rendered(), 1);

        r.render(&[], false);
        r.flush(&mut surface);
        assert!(surface.lines.is_empty());
        assert_eq!(r.rendered(), 0);
    }

    #[test]
    fn test_render_is_resumable() {
        let mut r = renderer();
        let mut surface = MemorySurface::default();
        let log = vec![OutputRecord::header("echo hi"), OutputRecord::text("hi")];
        r.render(&log, false);
        r.flush(&mut surface);
        let appended = surface.appended;

        r.render(&log, false);
        r.flush(&mut surface);
        assert_eq!(surface.appended, appended);
        assert_eq!(surface.texts(), vec!["$ echo hi", "hi"]);
    }

    #[test]
    fn test_multiline_split() {
        let mut r = renderer();
        let mut surface = MemorySurface::default();
        r.render(&[OutputRecord::header("who"), OutputRecord::text("a\nb\nc")], false);
        r.flush(&mut surface);
        assert_eq!(surface.texts(), vec!["$ who", "a", "b", "c"]);
        assert_eq!(r.rendered(), 2);
    }

    #[test]
    fn test_error_class_kept() {
        let mut r = renderer();
        let mut surface = MemorySurface::default();
        r.render(&[OutputRecord::header("bogus"), OutputRecord::error("bogus: command not found")], false);
        r.flush(&mut surface);
        assert_eq!(surface.lines[0].class, LineClass::Header);
        assert_eq!(surface.lines[1].class, LineClass::Error);
    }

    #[test]
    fn test_input_disabled_while_typing() {
        let mut r = Renderer::new(&ConsoleConfig::default());
        let mut surface = MemorySurface::default();
        r.render(&[OutputRecord::header("echo ab"), OutputRecord::text("ab")], false);

        // first wait is the first typed character
        assert_eq!(r.tick(&mut surface), Some(Duration::from_millis(1)));
        assert!(!surface.input_enabled);
        assert_eq!(surface.texts(), vec!["$ echo ab", "a"]);

        r.flush(&mut surface);
        assert!(surface.input_enabled);
        assert!(surface.focused);
    }

    #[test]
    fn test_scrollback_is_instant() {
        let mut r = Renderer::new(&ConsoleConfig::default());
        let mut surface = MemorySurface::default();
        let log = vec![
            OutputRecord::header("echo old"),
            OutputRecord::text("old"),
            OutputRecord::header("pwd"),
        ];
        r.render(&log, false);
        // nothing after the last header, so no waits at all
        assert_eq!(r.tick(&mut surface), None);
        assert_eq!(surface.texts(), vec!["$ echo old", "old", "$ pwd"]);
        assert_eq!(r.rendered(), 3);
    }

    #[test]
    fn test_typed_line_gets_links() {
        let mut r = renderer();
        let mut surface = MemorySurface::default();
        r.render(&[OutputRecord::header("where"), OutputRecord::text("see https://example.com/ now")], false);
        r.flush(&mut surface);
        let line = surface.last_line().unwrap();
        assert_eq!(line.text, "see https://example.com/ now");
        assert_eq!(line.links, vec!["https://example.com/".to_string()]);
    }

    #[test]
    fn test_holding_input() {
        let mut r = renderer();
        let mut surface = MemorySurface::default();
        r.render_holding_input(&[OutputRecord::header("how")]);
        r.flush(&mut surface);
        assert!(!surface.input_enabled);
        assert_eq!(r.rendered(), 1);
    }

    #[test]
    fn test_shorter_log_replays_from_start() {
        let mut r = renderer();
        let mut surface = MemorySurface::default();
        r.render(&[OutputRecord::text("a"), OutputRecord::text("b")], false);
        r.flush(&mut surface);
        r.render(&[OutputRecord::text("c")], false);
        r.flush(&mut surface);
        assert_eq!(surface.texts(), vec!["c"]);
        assert_eq!(r.rendered(), 1);
    }

    // fails if a line is appended before the previous one was scrolled into view
    #[derive(Default)]
    struct ScrollCheck {
        inner: MemorySurface,
        unscrolled: bool,
    }

    impl Surface for ScrollCheck {
        fn set_input_enabled(&mut self, enabled: bool) {
            self.inner.set_input_enabled(enabled);
        }
        fn focus_input(&mut self) {
            self.inner.focus_input();
        }
        fn input_value(&self) -> String {
            self.inner.input_value()
        }
        fn set_input_value(&mut self, value: &str) {
            self.inner.set_input_value(value);
        }
        fn clear(&mut self) {
            self.inner.clear();
        }
        fn append_line(&mut self, class: LineClass, text: &str) {
            assert!(!self.unscrolled, "line appended before the previous one was scrolled to");
            self.unscrolled = true;
            self.inner.append_line(class, text);
        }
        fn push_char(&mut self, ch: char) {
            self.inner.push_char(ch);
        }
        fn seal_line(&mut self, segments: &[Segment]) {
            self.inner.seal_line(segments);
        }
        fn remove_last_line(&mut self) {
            self.inner.remove_last_line();
        }
        fn scroll_to_end(&mut self) {
            self.unscrolled = false;
            self.inner.scroll_to_end();
        }
    }

    #[test]
    fn test_every_append_is_scrolled_to() {
        let mut r = renderer();
        let mut surface = ScrollCheck::default();
        let log = vec![
            OutputRecord::text("welcome\nback"),
            OutputRecord::header("cat missing"),
            OutputRecord::error("cat: missing: No such file or directory"),
            OutputRecord::text(""),
            OutputRecord::text("two\nlines"),
        ];
        r.render(&log, false);
        r.flush(&mut surface);
        assert!(!surface.unscrolled);
        assert_eq!(surface.inner.appended, 7);
        assert!(surface.inner.scrolls >= surface.inner.appended);

        // animation frames are appended instantly and still scrolled
        r.drop_lines(2);
        r.render(&[OutputRecord::header("how"), OutputRecord::text("f1\nf2")], true);
        r.flush(&mut surface);
        assert!(!surface.unscrolled);
    }

    #[test]
    fn test_instant_lines_scroll_once_each() {
        let mut r = renderer();
        let mut surface = MemorySurface::default();
        r.render(&[OutputRecord::text("old\nlines"), OutputRecord::header("pwd")], false);
        r.flush(&mut surface);
        assert_eq!(surface.appended, 3);
        assert_eq!(surface.scrolls, 3);
    }
}
