//! Split combined `helm template` output into per-source files
//!
//! Helm concatenates every rendered manifest into one stdout stream, each
//! preceded by a comment line of the form `# Source: <relative/path>`. The
//! splitter reverses that: a single linear scan that opens a new
//! accumulation at every marker line and flushes the previous one.
//!
//! The scan is deliberately forgiving. Input without any marker yields an
//! empty bundle, lines before the first marker are dropped, and a trailing
//! marker with no body becomes an empty entry. Nothing here validates that
//! the reconstructed content is YAML; the caller only displays it.

use indexmap::IndexMap;

/// The separator comment helm emits before each rendered file
pub const SOURCE_MARKER: &str = "# Source:";

/// Ordered mapping from source path to reconstructed file content
///
/// Iteration order follows the order in which markers appeared in the
/// input. Duplicate source paths keep their first position and the last
/// content wins (helm does not normally emit duplicates for one release).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedBundle {
    files: IndexMap<String, String>,
}

impl RenderedBundle {
    /// Create an empty bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the content for a source path
    pub fn get(&self, source_path: &str) -> Option<&str> {
        self.files.get(source_path).map(String::as_str)
    }

    /// Number of files in the bundle
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True if no marker was found in the input
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate entries in input order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Source paths in input order
    pub fn source_paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    fn insert(&mut self, source_path: String, content: String) {
        self.files.insert(source_path, content);
    }
}

impl<'a> IntoIterator for &'a RenderedBundle {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// Partition rendered helm output into `(source path, content)` entries
///
/// Content for a source starts at its marker line (inclusive) and runs
/// until the next marker or end of input, with surrounding whitespace
/// trimmed. Never fails: worst case for garbage input is a garbage entry.
pub fn split_rendered_output(output: &str) -> RenderedBundle {
    let mut bundle = RenderedBundle::new();
    let mut current: Option<(String, String)> = None;

    for line in output.split('\n') {
        if let Some(rest) = line.strip_prefix(SOURCE_MARKER) {
            if let Some((path, content)) = current.take() {
                bundle.insert(path, content.trim().to_string());
            }
            // The marker line itself belongs to the new file's content
            current = Some((rest.trim().to_string(), format!("{}\n", line)));
        } else if let Some((_, content)) = current.as_mut() {
            content.push_str(line);
            content.push('\n');
        }
        // Lines before the first marker are dropped
    }

    if let Some((path, content)) = current {
        bundle.insert(path, content.trim().to_string());
    }

    bundle
}
