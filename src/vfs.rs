use crate::error::{ConsoleError, Result};
use chrono::{DateTime, Local};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Where `~` and a bare `cd` lead.
pub const HOME: &str = "/~";

#[derive(Debug, Clone)]
pub enum VfsNode {
    File {
        name: String,
        content: String,
        can_modify: bool,
        mtime: DateTime<Local>,
    },
    Directory {
        name: String,
        children: BTreeMap<String, VfsNode>,
        can_modify: bool,
        mtime: DateTime<Local>,
    },
}

impl VfsNode {
    pub fn file(name: &str, content: &str, can_modify: bool) -> Self {
        VfsNode::File {
            name: name.to_string(),
            content: content.to_string(),
            can_modify,
            mtime: Local::now(),
        }
    }

    pub fn dir(name: &str, can_modify: bool) -> Self {
        VfsNode::Directory {
            name: name.to_string(),
            children: BTreeMap::new(),
            can_modify,
            mtime: Local::now(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            VfsNode::File { name, .. } | VfsNode::Directory { name, .. } => name,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, VfsNode::Directory { .. })
    }

    pub fn can_modify(&self) -> bool {
        match self {
            VfsNode::File { can_modify, .. } | VfsNode::Directory { can_modify, .. } => *can_modify,
        }
    }

    pub fn mtime(&self) -> &DateTime<Local> {
        match self {
            VfsNode::File { mtime, .. } | VfsNode::Directory { mtime, .. } => mtime,
        }
    }

    /// byte length of the content, 0 for directories
    pub fn size(&self) -> usize {
        match self {
            VfsNode::File { content, .. } => content.len(),
            VfsNode::Directory { .. } => 0,
        }
    }
}

/// One line of the static filesystem description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedEntry {
    pub path: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default = "modifiable")]
    pub can_modify: bool,
}

fn modifiable() -> bool {
    true
}

impl SeedEntry {
    pub fn dir(path: &str) -> Self {
        Self { path: path.to_string(), content: None, can_modify: true }
    }

    pub fn file(path: &str, content: &str) -> Self {
        Self { path: path.to_string(), content: Some(content.to_string()), can_modify: true }
    }

    pub fn read_only(mut self) -> Self {
        self.can_modify = false;
        self
    }
}

/// In-memory tree keyed by absolute, normalized paths.
#[derive(Debug, Clone)]
pub struct VirtualFileSystem {
    root: VfsNode,
}

impl Default for VirtualFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualFileSystem {
    pub fn new() -> Self {
        Self { root: VfsNode::dir("/", true) }
    }

    /// Builds the tree from a flat description. Missing ancestors are
    /// created as plain directories, so `/a/b/c` alone yields `/a` and `/a/b`.
    pub fn from_seed(entries: &[SeedEntry]) -> Result<Self> {
        let mut vfs = Self::new();
        for entry in entries {
            let path = normalize("/", &entry.path);
            if path == "/" {
                continue;
            }
            let (parent, name) = split_path(&path);
            vfs.ensure_dirs(parent)?;
            let node = match &entry.content {
                Some(content) => VfsNode::file(name, content, entry.can_modify),
                None => VfsNode::dir(name, entry.can_modify),
            };
            vfs.insert(&path, node, false)?;
        }
        Ok(vfs)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<SeedEntry> =
            serde_json::from_str(json).map_err(|e| ConsoleError::Content(format!("filesystem seed: {}", e)))?;
        Self::from_seed(&entries)
    }

    pub fn resolve(&self, path: &str) -> Result<&VfsNode> {
        let path = normalize("/", path);
        let mut node = &self.root;
        let mut walked = String::new();
        for comp in path.split('/').filter(|c| !c.is_empty()) {
            match node {
                VfsNode::Directory { children, .. } => {
                    walked.push('/');
                    walked.push_str(comp);
                    node = children
                        .get(comp)
                        .ok_or_else(|| ConsoleError::PathNotFound(path.clone()))?;
                }
                VfsNode::File { .. } => return Err(ConsoleError::NotADirectory(walked)),
            }
        }
        Ok(node)
    }

    fn resolve_mut(&mut self, path: &str) -> Result<&mut VfsNode> {
        let path = normalize("/", path);
        let mut node = &mut self.root;
        for comp in path.split('/').filter(|c| !c.is_empty()) {
            match node {
                VfsNode::Directory { children, .. } => {
                    node = children
                        .get_mut(comp)
                        .ok_or_else(|| ConsoleError::PathNotFound(path.clone()))?;
                }
                VfsNode::File { .. } => return Err(ConsoleError::NotADirectory(path.clone())),
            }
        }
        Ok(node)
    }

    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok()
    }

    pub fn is_dir(&self, path: &str) -> bool {
        self.resolve(path).map(VfsNode::is_dir).unwrap_or(false)
    }

    /// Immediate child names in lexical order.
    pub fn list(&self, path: &str) -> Result<Vec<String>> {
        match self.resolve(path)? {
            VfsNode::Directory { children, .. } => Ok(children.keys().cloned().collect()),
            VfsNode::File { .. } => Err(ConsoleError::NotADirectory(normalize("/", path))),
        }
    }

    pub fn read(&self, path: &str) -> Result<&str> {
        match self.resolve(path)? {
            VfsNode::File { content, .. } => Ok(content.as_str()),
            VfsNode::Directory { .. } => Err(ConsoleError::NotAFile(normalize("/", path))),
        }
    }

    pub fn create_file(&mut self, path: &str, content: &str) -> Result<()> {
        let path = normalize("/", path);
        let (_, name) = split_path(&path);
        let node = VfsNode::file(name, content, true);
        self.insert(&path, node, true)
    }

    pub fn create_dir(&mut self, path: &str) -> Result<()> {
        let path = normalize("/", path);
        let (_, name) = split_path(&path);
        let node = VfsNode::dir(name, true);
        self.insert(&path, node, true)
    }

    /// Replaces the content of an existing, modifiable file.
    pub fn write_file(&mut self, path: &str, content: &str) -> Result<()> {
        let normalized = normalize("/", path);
        match self.resolve_mut(&normalized)? {
            VfsNode::File { content: current, can_modify, mtime, .. } => {
                if !*can_modify {
                    return Err(ConsoleError::PermissionDenied(normalized));
                }
                *current = content.to_string();
                *mtime = Local::now();
                Ok(())
            }
            VfsNode::Directory { .. } => Err(ConsoleError::NotAFile(normalized)),
        }
    }

    // mkdir -p, permission checks skipped (seeding only)
    fn ensure_dirs(&mut self, path: &str) -> Result<()> {
        let mut current = String::new();
        for comp in path.split('/').filter(|c| !c.is_empty()) {
            current.push('/');
            current.push_str(comp);
            match self.resolve(&current) {
                Ok(node) if node.is_dir() => {}
                Ok(_) => return Err(ConsoleError::NotADirectory(current)),
                Err(_) => self.insert(&current, VfsNode::dir(comp, true), false)?,
            }
        }
        Ok(())
    }

    // `enforce` = honour the parent's can_modify flag; seeding turns it off
    // and may re-declare an auto-created directory to set its flag.
    fn insert(&mut self, path: &str, node: VfsNode, enforce: bool) -> Result<()> {
        let (parent, name) = split_path(path);
        if name.is_empty() {
            return Err(ConsoleError::AlreadyExists(path.to_string()));
        }
        match self.resolve_mut(parent)? {
            VfsNode::Directory { children, can_modify, .. } => {
                if enforce && !*can_modify {
                    return Err(ConsoleError::PermissionDenied(path.to_string()));
                }
                if let Some(existing) = children.get_mut(name) {
                    if !enforce && existing.is_dir() && node.is_dir() {
                        if let VfsNode::Directory { can_modify, .. } = existing {
                            *can_modify = node.can_modify();
                        }
                        return Ok(());
                    }
                    return Err(ConsoleError::AlreadyExists(path.to_string()));
                }
                children.insert(name.to_string(), node);
                Ok(())
            }
            VfsNode::File { .. } => Err(ConsoleError::NotADirectory(parent.to_string())),
        }
    }
}

/// Turns `path` (absolute, relative to `cwd`, or `~`-prefixed) into an
/// absolute path without `.`/`..` segments or a trailing slash.
pub fn normalize(cwd: &str, path: &str) -> String {
    let joined = if path == "~" || path.starts_with("~/") {
        format!("{}{}", HOME, &path[1..])
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("{}/{}", cwd, path)
    };

    let mut parts: Vec<&str> = Vec::new();
    for comp in joined.split('/') {
        match comp {
            "" | "." => {}
            // .. at root stays at root
            ".." => {
                parts.pop();
            }
            comp => parts.push(comp),
        }
    }
    format!("/{}", parts.join("/"))
}

/// Splits a normalized absolute path into parent and final component.
pub fn split_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(0) => ("/", &path[1..]),
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("/", path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VirtualFileSystem {
        VirtualFileSystem::from_seed(&[
            SeedEntry::dir("/bin"),
            SeedEntry::file("/usr/seegrand/coffee.sh", "#!/bin/sh\nexec coffee"),
            SeedEntry::file("/README", "Hey!").read_only(),
            SeedEntry::dir("/locked").read_only(),
        ])
        .unwrap()
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize("/", "/usr/seegrand/../bin"), "/usr/bin");
        assert_eq!(normalize("/", "/usr/./seegrand"), "/usr/seegrand");
        assert_eq!(normalize("/", "/usr//seegrand/"), "/usr/seegrand");
        assert_eq!(normalize("/", "/.."), "/");
        assert_eq!(normalize("/usr", "seegrand"), "/usr/seegrand");
        assert_eq!(normalize("/usr", ".."), "/");
        assert_eq!(normalize("/usr", "~"), "/~");
        assert_eq!(normalize("/usr", "~/notes"), "/~/notes");
        assert_eq!(normalize("/", ""), "/");
    }

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("/usr/seegrand"), ("/usr", "seegrand"));
        assert_eq!(split_path("/usr"), ("/", "usr"));
        assert_eq!(split_path("/"), ("/", ""));
    }

    #[test]
    fn test_seed_creates_missing_parents() {
        let vfs = sample();
        assert!(vfs.is_dir("/usr"));
        assert!(vfs.is_dir("/usr/seegrand"));
        assert_eq!(vfs.list("/usr/seegrand").unwrap(), vec!["coffee.sh".to_string()]);
    }

    #[test]
    fn test_list_is_sorted() {
        let vfs = sample();
        assert_eq!(vfs.list("/").unwrap(), vec!["README", "bin", "locked", "usr"]);
    }

    #[test]
    fn test_list_file_is_not_a_directory() {
        let vfs = sample();
        assert_eq!(vfs.list("/README"), Err(ConsoleError::NotADirectory("/README".into())));
    }

    #[test]
    fn test_read_file() {
        let vfs = sample();
        assert_eq!(vfs.read("/usr/seegrand/coffee.sh").unwrap(), "#!/bin/sh\nexec coffee");
    }

    #[test]
    fn test_read_directory_fails() {
        let vfs = sample();
        assert_eq!(vfs.read("/usr"), Err(ConsoleError::NotAFile("/usr".into())));
    }

    #[test]
    fn test_read_missing_fails() {
        let vfs = sample();
        assert_eq!(vfs.read("/nope"), Err(ConsoleError::PathNotFound("/nope".into())));
    }

    #[test]
    fn test_resolve_through_file() {
        let vfs = sample();
        assert_eq!(
            vfs.resolve("/README/inner").unwrap_err(),
            ConsoleError::NotADirectory("/README".into())
        );
    }

    #[test]
    fn test_paths_are_case_sensitive() {
        let vfs = sample();
        assert!(vfs.exists("/README"));
        assert!(!vfs.exists("/readme"));
    }

    #[test]
    fn test_modify_flags() {
        let vfs = sample();
        assert!(!vfs.resolve("/README").unwrap().can_modify());
        assert!(vfs.resolve("/usr/seegrand/coffee.sh").unwrap().can_modify());
    }

    #[test]
    fn test_create_and_write() {
        let mut vfs = sample();
        vfs.create_dir("/bin/tools").unwrap();
        vfs.create_file("/bin/tools/run", "go").unwrap();
        vfs.write_file("/bin/tools/run", "stop").unwrap();
        assert_eq!(vfs.read("/bin/tools/run").unwrap(), "stop");
        assert_eq!(vfs.create_dir("/bin/tools"), Err(ConsoleError::AlreadyExists("/bin/tools".into())));
    }

    #[test]
    fn test_write_protected_file() {
        let mut vfs = sample();
        assert_eq!(vfs.write_file("/README", "x"), Err(ConsoleError::PermissionDenied("/README".into())));
        assert_eq!(vfs.read("/README").unwrap(), "Hey!");
    }

    #[test]
    fn test_create_in_protected_dir() {
        let mut vfs = sample();
        assert_eq!(
            vfs.create_file("/locked/file", "x"),
            Err(ConsoleError::PermissionDenied("/locked/file".into()))
        );
    }

    #[test]
    fn test_write_directory_fails() {
        let mut vfs = sample();
        assert_eq!(vfs.write_file("/bin", "x"), Err(ConsoleError::NotAFile("/bin".into())));
    }

    #[test]
    fn test_create_without_parent() {
        let mut vfs = sample();
        assert_eq!(
            vfs.create_file("/missing/file", "x"),
            Err(ConsoleError::PathNotFound("/missing".into()))
        );
    }

    #[test]
    fn test_seed_redeclared_dir_is_fine() {
        let vfs = VirtualFileSystem::from_seed(&[
            SeedEntry::file("/usr/a", "1"),
            SeedEntry::dir("/usr").read_only(),
        ])
        .unwrap();
        assert!(!vfs.resolve("/usr").unwrap().can_modify());
        assert_eq!(vfs.read("/usr/a").unwrap(), "1");
    }

    #[test]
    fn test_seed_conflict() {
        let result = VirtualFileSystem::from_seed(&[SeedEntry::file("/a", "1"), SeedEntry::dir("/a")]);
        assert!(matches!(result, Err(ConsoleError::AlreadyExists(_))));
    }

    #[test]
    fn test_from_json() {
        let vfs = VirtualFileSystem::from_json(r#"[{"path": "/etc"}, {"path": "/README", "content": "hi", "canModify": false}]"#)
            .unwrap();
        assert!(vfs.is_dir("/etc"));
        assert!(!vfs.resolve("/README").unwrap().can_modify());
    }
}
