//! Filesystem-safe attachment filenames.
//!
//! [`sanitize_filename`] neutralizes anything that could escape the output
//! directory; [`resolve::resolve_unused`] then finds a name that does not
//! collide with an existing file.

pub mod resolve;

/// Sanitize a string for use as a filename.
///
/// Every character outside the allow-list (ASCII letters, digits, `_`, `.`,
/// `-`) is replaced with `_`, one for one, so the result has the same length
/// as the input. Path separators are not in the allow-list, so the result
/// can never name anything outside the target directory.
pub fn sanitize_filename(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_kept() {
        assert_eq!(sanitize_filename("test.txt"), "test.txt");
    }

    #[test]
    fn test_special_characters_are_replaced() {
        let special = " *?|!@#$%^&*()_+{}[];':,<>///?`~\\\n\r\"";
        let sanitized = sanitize_filename(&format!("test{special}.txt"));
        // "_+" and the literal underscore survive as underscores anyway
        assert_eq!(sanitized, format!("test{}.txt", "_".repeat(special.len())));
    }

    #[test]
    fn test_length_preserved_and_allowlist_only() {
        let inputs = [
            "",
            "plain",
            "../../../etc/passwd",
            "über geheim.pdf",
            "C:\\Users\\x\\doc.docx",
            "a b c",
        ];
        for raw in inputs {
            let out = sanitize_filename(raw);
            assert_eq!(out.chars().count(), raw.chars().count(), "input: {raw:?}");
            assert!(
                out.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-'),
                "input: {raw:?} produced {out:?}"
            );
        }
    }

    #[test]
    fn test_directory_traversal_neutralized() {
        let sanitized = sanitize_filename("../../secret/file.txt");
        assert!(!sanitized.contains('/'));
        assert!(!sanitized.contains('\\'));
        assert_eq!(sanitized, ".._.._secret_file.txt");
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(sanitize_filename(""), "");
    }
}
