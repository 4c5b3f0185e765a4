use crate::codec::{BLOCK_CLOSE_INDENT, BLOCK_INDENT, CLOSE_SEQUENCE};
use toolshelf_core::Tool;

/// Written in place of a `;` that directly follows `]` inside a string, so
/// that the close sequence can only appear as the block terminator.
const GUARDED_CLOSE: &str = "]\\u003b";

/// Renders the collection as an array literal, one field per line.
pub(crate) fn render_tools(tools: &[Tool]) -> String {
    if tools.is_empty() {
        return "[]".to_string();
    }

    let mut out = String::from("[\n");
    for (index, tool) in tools.iter().enumerate() {
        render_tool(&mut out, tool);
        if index + 1 < tools.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push(']');
    out
}

fn render_tool(out: &mut String, tool: &Tool) {
    out.push_str("  {\n");
    field(out, "id", &quote(&tool.id));
    field(out, "name", &quote(&tool.name));
    field(out, "description", &quote(&tool.description));
    field(out, "platforms", &inline_list(&tool.platforms));
    if !tool.categories.is_empty() {
        field(out, "categories", &inline_list(&tool.categories));
    }
    field(out, "uploader", &quote(&tool.uploader));
    field(out, "uploadDate", &quote(&tool.upload_date));
    field(out, "clicks", &tool.clicks.to_string());
    field(out, "detailedDescription", &block(&tool.detailed_description));
    field(out, "downloadLink", &quote(&tool.download_link));
    field(out, "inviteCode", &quote(&tool.invite_code));
    field(out, "originalPostLink", &quote(&tool.original_post_link));
    field(out, "screenshots", &stacked_list(&tool.screenshots));
    out.push_str(&format!("    tags: {}\n", inline_list(&tool.tags)));
    out.push_str("  }");
}

fn field(out: &mut String, key: &str, value: &str) {
    out.push_str(&format!("    {key}: {value},\n"));
}

fn inline_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| quote(item)).collect();
    format!("[{}]", quoted.join(", "))
}

fn stacked_list(items: &[String]) -> String {
    let mut out = String::from("[\n");
    for (index, item) in items.iter().enumerate() {
        out.push_str(BLOCK_INDENT);
        out.push_str(&quote(item));
        if index + 1 < items.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str(BLOCK_CLOSE_INDENT);
    out.push(']');
    out
}

/// Renders a single-quoted string literal.
pub(crate) fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' | '\u{2029}' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    guard_terminator(out)
}

/// Renders multi-line text as a template literal: opening newline, every
/// line indented by [`BLOCK_INDENT`], closing line indented by
/// [`BLOCK_CLOSE_INDENT`].
pub(crate) fn block(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '`' => escaped.push_str("\\`"),
            '$' => escaped.push_str("\\$"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }

    let lines: Vec<String> = escaped
        .split('\n')
        .map(|line| format!("{BLOCK_INDENT}{line}"))
        .collect();

    let out = format!("`\n{}\n{BLOCK_CLOSE_INDENT}`", lines.join("\n"));
    guard_terminator(out)
}

fn guard_terminator(text: String) -> String {
    if text.contains(CLOSE_SEQUENCE) {
        text.replace(CLOSE_SEQUENCE, GUARDED_CLOSE)
    } else {
        text
    }
}
