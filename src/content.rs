use crate::animation::AnimationSequence;
use crate::error::{ConsoleError, Result};
use crate::vfs::SeedEntry;
use std::sync::Arc;

const WELCOME: &str = include_str!("../assets/welcome.txt");
const FAREWELL: &str = include_str!("../assets/farewell.txt");
const HOW: &str = include_str!("../assets/how.json");
const FILESYSTEM: &str = include_str!("../assets/filesystem.json");

const PAGES: &[(&str, &str)] = &[
    ("who", include_str!("../assets/who.txt")),
    ("what", include_str!("../assets/what.txt")),
    ("where", include_str!("../assets/where.txt")),
    ("why", include_str!("../assets/why.txt")),
    ("when", include_str!("../assets/when.txt")),
];

/// Canned text, flipbook frames and the filesystem seed the commands hand
/// out. Treated as opaque payloads.
#[derive(Debug, Clone)]
pub struct Content {
    welcome: String,
    farewell: String,
    pages: Vec<(String, String)>,
    how: Arc<AnimationSequence>,
    filesystem: Vec<SeedEntry>,
}

impl Content {
    /// Everything under `assets/`, compiled into the binary.
    pub fn bundled() -> Result<Self> {
        let how: AnimationSequence =
            serde_json::from_str(HOW).map_err(|e| ConsoleError::Content(format!("how.json: {}", e)))?;
        let filesystem: Vec<SeedEntry> = serde_json::from_str(FILESYSTEM)
            .map_err(|e| ConsoleError::Content(format!("filesystem.json: {}", e)))?;
        Ok(Self {
            welcome: trim_payload(WELCOME),
            farewell: trim_payload(FAREWELL),
            pages: PAGES
                .iter()
                .map(|(name, text)| (name.to_string(), trim_payload(text)))
                .collect(),
            how: Arc::new(how),
            filesystem,
        })
    }

    pub fn welcome_lines(&self) -> impl Iterator<Item = &str> {
        self.welcome.split('\n')
    }

    pub fn farewell(&self) -> &str {
        &self.farewell
    }

    pub fn pages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pages.iter().map(|(n, t)| (n.as_str(), t.as_str()))
    }

    pub fn how(&self) -> Arc<AnimationSequence> {
        Arc::clone(&self.how)
    }

    pub fn filesystem(&self) -> &[SeedEntry] {
        &self.filesystem
    }
}

// asset files end with a newline that is not part of the text
fn trim_payload(text: &str) -> String {
    text.strip_suffix('\n').unwrap_or(text).to_string()
}
