//! Keyword-mapped snippet file responses.
//!
//! A mention containing a known keyword answers with the content of that
//! keyword's text file, split into platform-sized chunks. File problems
//! become friendly reply text, never errors: the asking user is the one
//! who needs to know the file is missing.

use std::path::PathBuf;

/// Platform message limit, minus headroom for the part header.
pub const CHUNK_SIZE: usize = 1900;

/// One keyword-to-file mapping.
#[derive(Debug, Clone)]
pub struct Snippet {
    /// Lowercase keyword looked for in mention text.
    pub keyword: String,
    /// Human label used in reply headers.
    pub label: String,
    pub path: PathBuf,
}

impl Snippet {
    /// Reads the file and renders the reply messages.
    #[must_use]
    pub fn respond(&self) -> Vec<String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return vec![format!("{} file not found.", self.label)];
            }
            Err(e) => {
                return vec![format!(
                    "An error occurred while reading the {} file: {e}",
                    self.label
                )];
            }
        };

        let content = content.trim();
        if content.is_empty() {
            return vec![format!("The {} file is empty.", self.label)];
        }

        let chunks = chunk_by_chars(content, CHUNK_SIZE);
        let total = chunks.len();
        chunks
            .into_iter()
            .enumerate()
            .map(|(i, chunk)| {
                format!(
                    "**{} Content (Part {}/{total}):**\n{chunk}",
                    self.label,
                    i + 1
                )
            })
            .collect()
    }
}

/// The set of snippets a tracker answers for.
#[derive(Debug, Clone, Default)]
pub struct SnippetSet {
    entries: Vec<Snippet>,
}

impl SnippetSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock set served from the working directory.
    #[must_use]
    pub fn builtin() -> Self {
        let mut set = Self::new();
        set.add("dns", "DNS", "dns.txt");
        set.add("flow", "Flow", "flow.txt");
        set.add("cloudstick", "Cloudstick", "cloudstick.txt");
        set
    }

    pub fn add(&mut self, keyword: &str, label: &str, path: impl Into<PathBuf>) {
        self.entries.push(Snippet {
            keyword: keyword.to_lowercase(),
            label: label.to_string(),
            path: path.into(),
        });
    }

    /// Finds the first snippet whose keyword appears in the (lowercased)
    /// message text.
    #[must_use]
    pub fn lookup(&self, content_lower: &str) -> Option<&Snippet> {
        self.entries
            .iter()
            .find(|s| content_lower.contains(&s.keyword))
    }
}

/// Splits text into chunks of at most `size` characters, on character
/// boundaries.
fn chunk_by_chars(content: &str, size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for ch in content.chars() {
        current.push(ch);
        count += 1;
        if count == size {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
