//! Routing tree nodes.
//!
//! A [`Node`] mirrors one filesystem entry. Directories carry a [`Children`]
//! table; leaves carry an empty one.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// What a node represents on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Directory,
    /// A file rendered at request time.
    Dynamic,
    /// A file served byte-for-byte.
    Static,
}

/// Variable bound by a `%name` entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Wildcard {
    /// Variable name (`year` for `%year.int`).
    pub name: String,
    /// Typecaster named in the entry, left for the typecasting layer.
    pub typecast: Option<String>,
}

/// One entry of the routing tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Canonical absolute path.
    pub path: PathBuf,
    pub kind: NodeKind,
    pub wildcard: Option<Wildcard>,
    /// Sub-extension of a wildcard leaf (`json` for `%id.json.spt`).
    pub extension: Option<String>,
    pub children: Children,
}

/// Children of a directory node.
#[derive(Debug, Clone, Default)]
pub struct Children {
    /// Leaf children by slug.
    pub files: BTreeMap<String, Node>,
    /// Directory children by name.
    pub dirs: BTreeMap<String, Node>,
    /// The `%name` directory, if any.
    pub wildcard_dir: Option<Box<Node>>,
    /// `%name` dynamic leaves by sub-extension; `None` answers any extension.
    pub wildcard_leaves: BTreeMap<Option<String>, Node>,
    /// Slug of the file child serving as this directory's index.
    pub index: Option<String>,
}

impl Node {
    pub fn new(path: PathBuf, kind: NodeKind) -> Self {
        Self {
            path,
            kind,
            wildcard: None,
            extension: None,
            children: Children::default(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// On-disk file name of this node.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }

    /// Number of nodes in this subtree, including this one.
    pub fn count(&self) -> usize {
        let children = &self.children;
        1 + children.files.values().map(Node::count).sum::<usize>()
            + children.dirs.values().map(Node::count).sum::<usize>()
            + children.wildcard_dir.as_ref().map_or(0, |dir| dir.count())
            + children.wildcard_leaves.values().map(Node::count).sum::<usize>()
    }

    /// The index leaf of this directory, if one was marked.
    pub fn index_node(&self) -> Option<&Node> {
        self.children
            .index
            .as_ref()
            .and_then(|slug| self.children.files.get(slug))
    }

    /// Render the subtree as an indented outline, one entry per line.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, 0);
        out
    }

    fn write_outline(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let children = &self.children;
        for (slug, file) in &children.files {
            let marker = if children.index.as_deref() == Some(slug.as_str()) {
                " (index)"
            } else {
                ""
            };
            out.push_str(&format!(
                "{indent}{slug} -> {}{marker}\n",
                file.file_name().unwrap_or("?")
            ));
        }
        for (ext, leaf) in &children.wildcard_leaves {
            let var = leaf.wildcard.as_ref().map_or("?", |w| w.name.as_str());
            out.push_str(&format!(
                "{indent}%{var} [.{}] -> {}\n",
                ext.as_deref().unwrap_or("*"),
                leaf.file_name().unwrap_or("?")
            ));
        }
        for (name, dir) in &children.dirs {
            out.push_str(&format!("{indent}{name}/\n"));
            dir.write_outline(out, depth + 1);
        }
        if let Some(dir) = &children.wildcard_dir {
            let var = dir.wildcard.as_ref().map_or("?", |w| w.name.as_str());
            out.push_str(&format!("{indent}%{var}/\n"));
            dir.write_outline(out, depth + 1);
        }
    }
}
