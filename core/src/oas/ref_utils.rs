#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Shared helpers for splitting `$ref` targets into a document part and a
//! fragment, and for encoding/decoding JSON Pointer segments.

use percent_encoding::percent_decode_str;

/// A `$ref` target split at the first `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedReference<'a> {
    /// Document part (empty for local references).
    pub document: &'a str,
    /// Fragment without the leading `#`, if one was written.
    pub fragment: Option<&'a str>,
}

impl ParsedReference<'_> {
    /// Returns true when the reference targets the current document.
    pub fn is_local(&self) -> bool {
        self.document.is_empty()
    }

    /// Fragment to walk, where an absent fragment means the document root.
    pub fn pointer(&self) -> &str {
        self.fragment.unwrap_or("")
    }
}

/// Splits a reference string into its document and fragment parts.
///
/// `#/components/schemas/User` is local; `common.yaml#/Pet` and `common.yaml`
/// are external, the latter targeting the whole document.
pub fn parse_reference(ref_str: &str) -> ParsedReference<'_> {
    match ref_str.split_once('#') {
        Some((document, fragment)) => ParsedReference {
            document,
            fragment: Some(fragment),
        },
        None => ParsedReference {
            document: ref_str,
            fragment: None,
        },
    }
}

/// Decodes a JSON Pointer segment (handles `~1`, `~0` and percent escapes).
pub fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}

/// Encodes a map key as a JSON Pointer segment.
pub fn encode_pointer_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Extracts a component name from a `$ref` if it points to `#/components/{section}/{name}`.
///
/// Returns `None` for external references or pointers into other sections.
pub(crate) fn extract_component_name(ref_str: &str, section: &str) -> Option<String> {
    let parsed = parse_reference(ref_str);
    if !parsed.is_local() {
        return None;
    }
    let pointer = parsed.fragment?.strip_prefix('/')?;
    let segments: Vec<&str> = pointer.split('/').collect();

    if segments.len() != 3 {
        return None;
    }
    if segments[0] != "components" || segments[1] != section {
        return None;
    }

    let name = decode_pointer_segment(segments[2]);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference_local() {
        let parsed = parse_reference("#/components/schemas/User");
        assert!(parsed.is_local());
        assert_eq!(parsed.pointer(), "/components/schemas/User");
    }

    #[test]
    fn test_parse_reference_external_with_fragment() {
        let parsed = parse_reference("common/pets.yaml#/components/schemas/Pet");
        assert_eq!(parsed.document, "common/pets.yaml");
        assert_eq!(parsed.fragment, Some("/components/schemas/Pet"));
    }

    #[test]
    fn test_parse_reference_whole_document() {
        let parsed = parse_reference("pet.yaml");
        assert!(!parsed.is_local());
        assert_eq!(parsed.fragment, None);
        assert_eq!(parsed.pointer(), "");
    }

    #[test]
    fn test_decode_pointer_segment_percent_encoding() {
        let encoded = "User%20Profile~1details";
        let decoded = decode_pointer_segment(encoded);
        assert_eq!(decoded, "User Profile/details");
    }

    #[test]
    fn test_encode_pointer_segment_escapes_tilde_first() {
        assert_eq!(encode_pointer_segment("/pets/{id}"), "~1pets~1{id}");
        assert_eq!(encode_pointer_segment("a~/b"), "a~0~1b");
    }

    #[test]
    fn test_extract_component_name_success() {
        let name = extract_component_name("#/components/schemas/Cat", "schemas").unwrap();
        assert_eq!(name, "Cat");
    }

    #[test]
    fn test_extract_component_name_wrong_section() {
        let name = extract_component_name("#/components/responses/Limit", "schemas");
        assert!(name.is_none());
    }

    #[test]
    fn test_extract_component_name_external() {
        let name = extract_component_name("other.yaml#/components/schemas/Cat", "schemas");
        assert!(name.is_none());
    }
}
