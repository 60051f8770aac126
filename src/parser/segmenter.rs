use std::borrow::Cow;

const BLOCK_SEPARATOR: &str = "\n\n";

/// Raw recipe blocks borrowed from a file's content.
///
/// Blocks are separated by a blank line and come out trimmed. Empty blocks
/// (from an empty file or runs of blank lines) are yielded as-is, callers
/// decide whether to skip them.
pub struct Blocks<'a> {
    content: Cow<'a, str>,
}

impl<'a> Blocks<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.content.split(BLOCK_SEPARATOR).map(str::trim)
    }
}

/// Split file content into per-recipe blocks
pub fn segment(content: &str) -> Blocks<'_> {
    let content = if content.contains("\r\n") {
        Cow::Owned(content.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(content)
    };

    Blocks { content }
}
