//! MIME message parsing: raw RFC 5322 bytes to a [`MessagePart`] tree.

use mail_parser::{MessageParser, MimeHeaders, PartType};

use crate::error::{MailGrabError, Result};
use crate::model::part::MessagePart;

/// Maximum depth for recursive multipart descent (to prevent stack overflow
/// on adversarial input).
const MAX_DEPTH: usize = 10;

/// Parse a complete raw message into a [`MessagePart`] tree.
///
/// Uses `mail-parser` internally. Parts deeper than [`MAX_DEPTH`] levels of
/// nesting are flattened into leaves.
pub fn parse_message(raw_message: &[u8]) -> Result<MessagePart> {
    let parser = MessageParser::default();
    let msg = parser
        .parse(raw_message)
        .ok_or_else(|| MailGrabError::MimeError("Failed to parse message".into()))?;

    Ok(build_part(&msg, 0, 0))
}

/// Build the tree node for part `part_id` of a parsed message.
fn build_part(msg: &mail_parser::Message<'_>, part_id: usize, depth: usize) -> MessagePart {
    let Some(part) = msg.part(part_id) else {
        return MessagePart::leaf("application/octet-stream", None, None, Vec::new());
    };

    let content_type = format_content_type(part);
    let disposition = part
        .content_disposition()
        .map(|d: &mail_parser::ContentType| d.ctype().to_string());
    let filename = part.attachment_name().map(String::from);

    match &part.body {
        PartType::Multipart(children) if depth < MAX_DEPTH => {
            let children = children
                .iter()
                .map(|&id| build_part(msg, id, depth + 1))
                .collect();
            MessagePart::container(content_type, children)
        }
        _ => MessagePart::leaf(
            content_type,
            disposition,
            filename,
            part.contents().to_vec(),
        ),
    }
}

/// Format a part's content type as `"type/subtype"`.
fn format_content_type(part: &mail_parser::MessagePart<'_>) -> String {
    part.content_type()
        .map(|ct: &mail_parser::ContentType| {
            let main = ct.ctype();
            match ct.subtype() {
                Some(sub) => format!("{main}/{sub}"),
                None => main.to_string(),
            }
        })
        .unwrap_or_else(|| "text/plain".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MULTIPART_MSG: &str = "From: alice@example.com\r\n\
        To: bob@example.com\r\n\
        Subject: Report\r\n\
        MIME-Version: 1.0\r\n\
        Content-Type: multipart/mixed; boundary=\"sep\"\r\n\
        \r\n\
        --sep\r\n\
        Content-Type: text/plain\r\n\
        \r\n\
        See attached.\r\n\
        --sep\r\n\
        Content-Type: image/png\r\n\
        Content-Disposition: attachment; filename=\"a.png\"\r\n\
        Content-Transfer-Encoding: base64\r\n\
        \r\n\
        iVBORw0KGgo=\r\n\
        --sep--\r\n";

    #[test]
    fn test_parse_multipart_tree() {
        let root = parse_message(MULTIPART_MSG.as_bytes()).unwrap();
        assert_eq!(root.content_type, "multipart/mixed");
        assert_eq!(root.children.len(), 2);
        assert!(root.payload.is_none());

        let text = &root.children[0];
        assert_eq!(text.content_type, "text/plain");
        assert!(text.children.is_empty());

        let png = &root.children[1];
        assert_eq!(png.content_type, "image/png");
        assert_eq!(png.content_disposition.as_deref(), Some("attachment"));
        assert_eq!(png.trimmed_filename(), Some("a.png"));
        // base64 "iVBORw0KGgo=" decodes to the PNG magic prefix
        assert_eq!(png.payload.as_deref().unwrap()[..4], [0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn test_parse_simple_text_message() {
        let raw = b"From: a@example.com\r\nSubject: Hi\r\n\r\nHello\r\n";
        let root = parse_message(raw).unwrap();
        assert!(root.children.is_empty());
        assert!(root.payload.is_some());
    }

    #[test]
    fn test_parse_garbage_does_not_panic() {
        // mail-parser is lenient; headerless bytes either become a text
        // part or are rejected with a MimeError
        if let Ok(root) = parse_message(b"not really a message") {
            assert!(root.walk().count() >= 1);
        }
    }
}
