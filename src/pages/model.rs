//! Page read result

/// A command page read from the cache
///
/// `Page::default()` is the empty result: its command name is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Command the page documents, words separated by single spaces
    pub command_name: String,
    pub platform: String,
    pub language: String,
    pub content: String,
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.command_name.is_empty()
    }
}
