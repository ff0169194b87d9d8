//! Attachment extraction: walk a message tree and yield attachment parts.

use crate::model::part::{AttachmentCandidate, MessagePart, PartWalk};

/// Lazy iterator over the attachments of a message tree.
///
/// With a MIME filter, yields the parts that qualify as attachments (not a
/// container, disposition present, non-blank declared filename) and whose
/// content type equals the filter exactly. Without a filter, every walked
/// node is yielded unfiltered, containers included.
pub struct Attachments<'a> {
    walk: PartWalk<'a>,
    mime_filter: Option<&'a str>,
}

/// Walk `root` in pre-order and yield attachment candidates.
///
/// The filter match is case-sensitive and exact; `"image/png"` does not
/// match `"image/PNG"` or `"image/*"`.
pub fn extract_attachments<'a>(
    root: &'a MessagePart,
    mime_filter: Option<&'a str>,
) -> Attachments<'a> {
    Attachments {
        walk: root.walk(),
        mime_filter,
    }
}

/// Whether a part qualifies as an attachment: it is not a multipart
/// container, carries a Content-Disposition, and declares a usable filename.
fn is_attachment(part: &MessagePart) -> bool {
    !part.is_multipart()
        && part
            .content_disposition
            .as_deref()
            .is_some_and(|d| !d.is_empty())
        && part.trimmed_filename().is_some()
}

impl<'a> Iterator for Attachments<'a> {
    type Item = AttachmentCandidate<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let part = self.walk.next()?;
            let qualifies = match self.mime_filter {
                None => true,
                Some(filter) => is_attachment(part) && part.content_type == filter,
            };
            if qualifies {
                return Some(AttachmentCandidate {
                    declared_filename: part.trimmed_filename(),
                    payload: part.payload.as_deref(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_attachment() -> MessagePart {
        MessagePart::container(
            "multipart/mixed",
            vec![
                MessagePart::leaf(
                    "image/png",
                    Some("attachment".into()),
                    Some("a.png".into()),
                    vec![1, 2, 3],
                ),
                MessagePart::leaf("text/plain", None, None, b"body".to_vec()),
            ],
        )
    }

    #[test]
    fn test_filter_yields_matching_attachment_only() {
        let root = tree_with_attachment();
        let found: Vec<_> = extract_attachments(&root, Some("image/png")).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].declared_filename, Some("a.png"));
        assert_eq!(found[0].payload, Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn test_filter_excludes_parts_without_disposition() {
        let root = MessagePart::container(
            "multipart/mixed",
            vec![MessagePart::leaf(
                "image/png",
                None,
                Some("a.png".into()),
                vec![1],
            )],
        );
        assert_eq!(extract_attachments(&root, Some("image/png")).count(), 0);
    }

    #[test]
    fn test_filter_excludes_blank_filename() {
        let root = MessagePart::container(
            "multipart/mixed",
            vec![MessagePart::leaf(
                "image/png",
                Some("attachment".into()),
                Some("   ".into()),
                vec![1],
            )],
        );
        assert_eq!(extract_attachments(&root, Some("image/png")).count(), 0);
    }

    #[test]
    fn test_filter_is_case_sensitive_exact() {
        let root = tree_with_attachment();
        assert_eq!(extract_attachments(&root, Some("image/PNG")).count(), 0);
        assert_eq!(extract_attachments(&root, Some("image")).count(), 0);
    }

    #[test]
    fn test_no_filter_passes_every_node_through() {
        let root = tree_with_attachment();
        // Container plus both leaves
        let all: Vec<_> = extract_attachments(&root, None).collect();
        assert_eq!(all.len(), 3);
        // The container comes first (pre-order) and has no payload
        assert!(all[0].payload.is_none());
    }

    #[test]
    fn test_ordering_is_preorder() {
        let root = MessagePart::container(
            "multipart/mixed",
            vec![
                MessagePart::leaf(
                    "application/pdf",
                    Some("attachment".into()),
                    Some("first.pdf".into()),
                    vec![1],
                ),
                MessagePart::container(
                    "multipart/alternative",
                    vec![MessagePart::leaf(
                        "application/pdf",
                        Some("attachment".into()),
                        Some("second.pdf".into()),
                        vec![2],
                    )],
                ),
            ],
        );
        let names: Vec<_> = extract_attachments(&root, Some("application/pdf"))
            .map(|c| c.declared_filename.unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["first.pdf", "second.pdf"]);
    }
}
