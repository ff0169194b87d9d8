//! Message part tree.
//!
//! A parsed message is a tree of [`MessagePart`] nodes. Multipart containers
//! hold children and no payload; leaves hold a payload and no children.

/// A single node of a parsed MIME message.
#[derive(Debug, Clone)]
pub struct MessagePart {
    /// Full MIME content type (e.g. `"image/png"`, `"multipart/mixed"`).
    pub content_type: String,

    /// Raw `Content-Disposition` value, if the header is present.
    pub content_disposition: Option<String>,

    /// Filename declared in the part headers, if any.
    pub declared_filename: Option<String>,

    /// Decoded payload bytes. `None` for multipart containers.
    pub payload: Option<Vec<u8>>,

    /// Sub-parts, in message order. Empty for leaves.
    pub children: Vec<MessagePart>,
}

impl MessagePart {
    /// Create a leaf part carrying a payload.
    pub fn leaf(
        content_type: impl Into<String>,
        disposition: Option<String>,
        filename: Option<String>,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            content_type: content_type.into(),
            content_disposition: disposition,
            declared_filename: filename,
            payload: Some(payload),
            children: Vec::new(),
        }
    }

    /// Create a multipart container holding `children`.
    pub fn container(content_type: impl Into<String>, children: Vec<MessagePart>) -> Self {
        Self {
            content_type: content_type.into(),
            content_disposition: None,
            declared_filename: None,
            payload: None,
            children,
        }
    }

    /// Whether this part is a multipart container.
    pub fn is_multipart(&self) -> bool {
        self.content_type.starts_with("multipart")
    }

    /// Walk the tree in pre-order (self first, then descendants).
    ///
    /// The walk is lazy and single-pass; each call starts a fresh traversal.
    pub fn walk(&self) -> PartWalk<'_> {
        PartWalk { stack: vec![self] }
    }

    /// The declared filename with surrounding whitespace removed,
    /// or `None` when absent or blank.
    pub fn trimmed_filename(&self) -> Option<&str> {
        match self.declared_filename.as_deref().map(str::trim) {
            Some("") | None => None,
            Some(name) => Some(name),
        }
    }
}

/// Pre-order iterator over a [`MessagePart`] tree.
///
/// Explicit stack instead of recursion so the walk can be consumed lazily.
pub struct PartWalk<'a> {
    stack: Vec<&'a MessagePart>,
}

impl<'a> Iterator for PartWalk<'a> {
    type Item = &'a MessagePart;

    fn next(&mut self) -> Option<Self::Item> {
        let part = self.stack.pop()?;
        // Push children reversed so the first child is popped next
        self.stack.extend(part.children.iter().rev());
        Some(part)
    }
}

/// An attachment found during extraction, consumed immediately by the
/// sanitize/resolve pipeline.
#[derive(Debug, Clone)]
pub struct AttachmentCandidate<'a> {
    /// Filename declared in the part headers, if usable.
    pub declared_filename: Option<&'a str>,

    /// Decoded payload bytes. Absent only in pass-through mode when a
    /// container node is yielded.
    pub payload: Option<&'a [u8]>,
}
