//! Conversion between the tool collection and the record block embedded in
//! a host source document.
//!
//! The host document is opaque apart from one block of the form
//! `export const toolsData = [ ... ];`. Decoding locates the start marker and
//! the first `];` after it and parses the literal in between. Encoding
//! re-renders the collection and splices it back in place, leaving every
//! byte outside the block untouched.

mod parse;
mod render;
mod value;

use crate::error::CodecError;
use toolshelf_core::Tool;

/// Marker that opens the record block.
pub const DEFAULT_MARKER: &str = "export const toolsData = ";

/// Sequence that closes the record block. The `]` belongs to the literal.
pub const CLOSE_SEQUENCE: &str = "];";

/// A minimal host document holding an empty collection.
pub const EMPTY_DOCUMENT: &str = "export const toolsData = [];\n";

pub(crate) const BLOCK_INDENT: &str = "      ";
pub(crate) const BLOCK_CLOSE_INDENT: &str = "    ";

/// Location of the record block inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    /// Byte offset of the start marker.
    marker_start: usize,
    /// Byte offset of the opening `[`-side of the literal.
    literal_start: usize,
    /// Byte offset one past the closing `]`.
    literal_end: usize,
}

#[derive(Debug, Clone)]
pub struct Codec {
    marker: String,
}

impl Codec {
    pub fn new() -> Self {
        Self::with_marker(DEFAULT_MARKER)
    }

    /// Creates a codec looking for a different start marker.
    pub fn with_marker(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Extracts the tool collection from `document`.
    pub fn decode(&self, document: &str) -> Result<Vec<Tool>, CodecError> {
        let block = self.locate(document)?;
        let literal = &document[block.literal_start..block.literal_end];
        let value = parse::parse_literal(literal, block.literal_start)?;
        value::into_tools(value)
    }

    /// Returns `document` with its record block replaced by `tools`.
    pub fn encode(&self, tools: &[Tool], document: &str) -> Result<String, CodecError> {
        let block = self.locate(document)?;
        let literal = render::render_tools(tools);

        let mut out = String::with_capacity(
            document.len() - (block.literal_end - block.marker_start) + self.marker.len()
                + literal.len(),
        );
        out.push_str(&document[..block.marker_start]);
        out.push_str(&self.marker);
        out.push_str(&literal);
        out.push_str(&document[block.literal_end..]);
        Ok(out)
    }

    fn locate(&self, document: &str) -> Result<Block, CodecError> {
        let marker_start = document
            .find(&self.marker)
            .ok_or_else(|| CodecError::MissingMarker(self.marker.trim_end().to_string()))?;
        let literal_start = marker_start + self.marker.len();
        let close = document[literal_start..]
            .find(CLOSE_SEQUENCE)
            .ok_or(CodecError::MissingTerminator)?;

        Ok(Block {
            marker_start,
            literal_start,
            literal_end: literal_start + close + 1,
        })
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(id: &str) -> Tool {
        Tool {
            id: id.to_string(),
            name: format!("Tool {id}"),
            description: "Sets up a storefront".to_string(),
            platforms: vec!["douyin".to_string(), "taobao".to_string()],
            categories: vec!["project_research".to_string()],
            uploader: "admin".to_string(),
            upload_date: "2024-03-01".to_string(),
            clicks: 12,
            detailed_description: "First line\n\n  - indented bullet\nLast line".to_string(),
            download_link: "https://example.com/download".to_string(),
            original_post_link: "#".to_string(),
            invite_code: "INV-42".to_string(),
            screenshots: vec!["/shots/a.png".to_string(), "/shots/b.png".to_string()],
            tags: vec!["shop".to_string(), "automation".to_string()],
        }
    }

    fn host(block: &str) -> String {
        format!(
            "// generated catalog\nimport x from './x';\n\n{DEFAULT_MARKER}{block};\n\nexport const categoryNames = {{ a: 'b' }};\n"
        )
    }

    #[test]
    fn round_trip_preserves_records() {
        let codec = Codec::new();
        let tools = vec![tool("1"), tool("2")];

        let encoded = codec.encode(&tools, &host("[]")).unwrap();
        assert_eq!(codec.decode(&encoded).unwrap(), tools);
    }

    #[test]
    fn round_trip_hostile_strings() {
        let codec = Codec::new();
        let mut hostile = tool("7");
        hostile.name = "O'Reilly \"quoted\" \\ back".to_string();
        hostile.description = "closes early]; then `ticks` ${not_code}".to_string();
        hostile.detailed_description =
            "line with ]; inside\n`backtick`\n${x}\n\\n literal\r\nwindows\n\ttab\n".to_string();
        hostile.tags = vec!["];".to_string(), "中文标签".to_string(), "emoji 😀".to_string()];
        hostile.screenshots = vec![];
        hostile.categories = vec![];
        hostile.invite_code = String::new();
        hostile.detailed_description.push('\u{2028}');

        let encoded = codec.encode(&[hostile.clone()], &host("[]")).unwrap();
        assert_eq!(codec.decode(&encoded).unwrap(), vec![hostile]);
    }

    #[test]
    fn encode_preserves_surrounding_document() {
        let codec = Codec::new();
        let original = host("[\n  { id: 'old' }\n]");

        let encoded = codec.encode(&[tool("1")], &original).unwrap();

        let prefix_end = original.find(DEFAULT_MARKER).unwrap();
        assert_eq!(&encoded[..prefix_end], &original[..prefix_end]);

        let original_suffix = &original[original.find("];").unwrap() + 1..];
        assert!(encoded.ends_with(original_suffix));
    }

    #[test]
    fn encode_empty_collection() {
        let codec = Codec::new();
        let encoded = codec.encode(&[], &host("[\n  { id: '1' }\n]")).unwrap();

        assert!(encoded.contains("export const toolsData = [];"));
        assert!(codec.decode(&encoded).unwrap().is_empty());
    }

    #[test]
    fn encode_omits_empty_categories() {
        let codec = Codec::new();
        let mut record = tool("1");
        record.categories.clear();

        let encoded = codec.encode(&[record], EMPTY_DOCUMENT).unwrap();
        assert!(!encoded.contains("categories"));
    }

    #[test]
    fn decodes_handwritten_block() {
        let document = r#"export const toolsData = [
  {
    id: '1',
    name: '抖音橱窗助手',
    description: '一键设置抖音橱窗',
    platforms: ['douyin', 'taobao'],
    uploader: '管理员',
    uploadDate: '2024-03-15',
    clicks: 128,
    detailedDescription: `
      第一行
      第二行
    `,
    downloadLink: '#',
    inviteCode: '',
    originalPostLink: '#',
    screenshots: [
      '/images/tools/1-1.png'
    ],
    tags: ['橱窗', '转化率']
  },
];

export const getToolById = (id) => toolsData.find(tool => tool.id === id);
"#;

        let tools = Codec::new().decode(document).unwrap();
        assert_eq!(tools.len(), 1);
        let tool = &tools[0];
        assert_eq!(tool.name, "抖音橱窗助手");
        assert!(tool.categories.is_empty());
        assert_eq!(tool.clicks, 128);
        assert_eq!(tool.detailed_description, "第一行\n第二行");
        assert_eq!(tool.screenshots, vec!["/images/tools/1-1.png"]);
    }

    #[test]
    fn missing_marker_is_format_error() {
        let err = Codec::new().decode("const other = [];").unwrap_err();
        assert!(matches!(err, CodecError::MissingMarker(_)));

        let err = Codec::new().encode(&[], "const other = [];").unwrap_err();
        assert!(matches!(err, CodecError::MissingMarker(_)));
    }

    #[test]
    fn missing_terminator_is_format_error() {
        let err = Codec::new()
            .decode("export const toolsData = [\n  { id: '1' }\n]\n")
            .unwrap_err();
        assert_eq!(err, CodecError::MissingTerminator);
    }

    #[test]
    fn executable_content_is_rejected() {
        let document = "export const toolsData = [require('child_process').exec('rm -rf /')];";
        let err = Codec::new().decode(document).unwrap_err();
        assert!(matches!(err, CodecError::Syntax { .. }));
    }

    #[test]
    fn custom_marker() {
        let codec = Codec::with_marker("module.exports.tools = ");
        let document = "module.exports.tools = [];\n";

        let encoded = codec.encode(&[tool("1")], document).unwrap();
        assert!(encoded.starts_with("module.exports.tools = [\n"));
        assert_eq!(codec.decode(&encoded).unwrap(), vec![tool("1")]);
    }

    #[test]
    fn encode_output_layout() {
        let mut record = tool("1");
        record.categories.clear();
        record.screenshots = vec!["/a.png".to_string()];
        record.tags = vec!["x".to_string()];
        record.detailed_description = "Hello\nWorld".to_string();

        let encoded = Codec::new().encode(&[record], EMPTY_DOCUMENT).unwrap();
        let expected = "export const toolsData = [
  {
    id: '1',
    name: 'Tool 1',
    description: 'Sets up a storefront',
    platforms: ['douyin', 'taobao'],
    uploader: 'admin',
    uploadDate: '2024-03-01',
    clicks: 12,
    detailedDescription: `
      Hello
      World
    `,
    downloadLink: 'https://example.com/download',
    inviteCode: 'INV-42',
    originalPostLink: '#',
    screenshots: [
      '/a.png'
    ],
    tags: ['x']
  }
];
";
        assert_eq!(encoded, expected);
    }

    #[test]
    fn deeply_nested_block_is_syntax_error() {
        let document = format!(
            "{DEFAULT_MARKER}{}{};\n",
            "[".repeat(200_000),
            "]".repeat(200_000)
        );
        let err = Codec::new().decode(&document).unwrap_err();
        assert!(matches!(err, CodecError::Syntax { .. }));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        const HOSTILE: &str = r#"[\\'"`${}\];\n\r\u{2028}\x00a-z0-9 中]"#;

        fn text() -> impl Strategy<Value = String> {
            proptest::string::string_regex(&format!("{HOSTILE}{{0,24}}")).unwrap()
        }

        fn texts() -> impl Strategy<Value = Vec<String>> {
            prop::collection::vec(text(), 0..4)
        }

        prop_compose! {
            fn any_tool()(
                strings in prop::collection::vec(text(), 9),
                lists in prop::collection::vec(texts(), 4),
                clicks in any::<u64>(),
            ) -> Tool {
                Tool {
                    id: strings[0].clone(),
                    name: strings[1].clone(),
                    description: strings[2].clone(),
                    uploader: strings[3].clone(),
                    upload_date: strings[4].clone(),
                    detailed_description: strings[5].clone(),
                    download_link: strings[6].clone(),
                    original_post_link: strings[7].clone(),
                    invite_code: strings[8].clone(),
                    platforms: lists[0].clone(),
                    categories: lists[1].clone(),
                    screenshots: lists[2].clone(),
                    tags: lists[3].clone(),
                    clicks,
                }
            }
        }

        fn host_text() -> impl Strategy<Value = String> {
            proptest::string::string_regex(r"[\];\n/ a-z`'{}]{0,40}").unwrap()
        }

        proptest! {
            #[test]
            fn round_trip_over_any_host(
                tools in prop::collection::vec(any_tool(), 0..5),
                prefix in host_text(),
                suffix in host_text(),
            ) {
                prop_assume!(!prefix.contains(DEFAULT_MARKER));
                let document = format!("{prefix}{DEFAULT_MARKER}[];{suffix}");

                let codec = Codec::new();
                let encoded = codec.encode(&tools, &document).unwrap();

                prop_assert_eq!(codec.decode(&encoded).unwrap(), tools);
                let expected_start = format!("{prefix}{DEFAULT_MARKER}");
                let expected_end = format!("];{suffix}");
                prop_assert!(encoded.starts_with(&expected_start));
                prop_assert!(encoded.ends_with(&expected_end));

                let block_end = encoded[prefix.len() + DEFAULT_MARKER.len()..]
                    .find(CLOSE_SEQUENCE)
                    .unwrap();
                prop_assert_eq!(
                    prefix.len() + DEFAULT_MARKER.len() + block_end + CLOSE_SEQUENCE.len(),
                    encoded.len() - suffix.len()
                );
            }
        }
    }
}
