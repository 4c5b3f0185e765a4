use crate::codec::BLOCK_INDENT;
use crate::error::CodecError;
use toolshelf_core::Tool;

/// A parsed literal.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
    Null,
    Bool(bool),
    /// Numbers keep their source text; only the click counter is numeric and
    /// it is converted on demand.
    Number(String),
    Str(String),
    /// A template literal, already unescaped.
    Template(String),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl Value {
    fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) | Value::Template(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

pub(crate) fn into_tools(value: Value) -> Result<Vec<Tool>, CodecError> {
    let Value::Array(items) = value else {
        return Err(CodecError::Shape(format!(
            "record block must be an array, found {}",
            value.kind()
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| into_tool(index, item))
        .collect()
}

fn into_tool(index: usize, value: Value) -> Result<Tool, CodecError> {
    let Value::Object(fields) = value else {
        return Err(CodecError::Shape(format!(
            "record {index} must be an object, found {}",
            value.kind()
        )));
    };

    let mut tool = Tool::default();
    let mut has_id = false;

    for (key, value) in fields {
        let field = Field {
            index,
            key: key.as_str(),
        };
        match field.key {
            "id" => {
                tool.id = field.id(value)?;
                has_id = true;
            }
            "name" => tool.name = field.string(value)?,
            "description" => tool.description = field.string(value)?,
            "platforms" => tool.platforms = field.strings(value)?,
            "categories" => tool.categories = field.strings(value)?,
            "uploader" => tool.uploader = field.string(value)?,
            "uploadDate" => tool.upload_date = field.string(value)?,
            "clicks" => tool.clicks = field.count(value)?,
            "detailedDescription" => tool.detailed_description = field.string(value)?,
            "downloadLink" => tool.download_link = field.string(value)?,
            "originalPostLink" => tool.original_post_link = field.string(value)?,
            "inviteCode" => tool.invite_code = field.string(value)?,
            "screenshots" => tool.screenshots = field.strings(value)?,
            "tags" => tool.tags = field.strings(value)?,
            // unknown keys are ignored
            _ => {}
        }
    }

    if !has_id {
        return Err(CodecError::Shape(format!("record {index} has no `id`")));
    }

    Ok(tool)
}

struct Field<'a> {
    index: usize,
    key: &'a str,
}

impl Field<'_> {
    fn mismatch(&self, expected: &str, found: &Value) -> CodecError {
        CodecError::Shape(format!(
            "record {} field `{}`: expected {expected}, found {}",
            self.index,
            self.key,
            found.kind()
        ))
    }

    fn id(&self, value: Value) -> Result<String, CodecError> {
        match value {
            Value::Str(s) | Value::Template(s) | Value::Number(s) => Ok(s),
            other => Err(self.mismatch("string", &other)),
        }
    }

    fn string(&self, value: Value) -> Result<String, CodecError> {
        match value {
            Value::Str(s) => Ok(s),
            Value::Template(s) => Ok(unindent_block(&s)),
            Value::Null => Ok(String::new()),
            other => Err(self.mismatch("string", &other)),
        }
    }

    fn strings(&self, value: Value) -> Result<Vec<String>, CodecError> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Str(s) | Value::Template(s) => Ok(s),
                    other => Err(self.mismatch("array of strings", &other)),
                })
                .collect(),
            Value::Null => Ok(Vec::new()),
            other => Err(self.mismatch("array", &other)),
        }
    }

    fn count(&self, value: Value) -> Result<u64, CodecError> {
        match value {
            Value::Number(text) => {
                if let Ok(count) = text.parse::<u64>() {
                    return Ok(count);
                }
                match text.parse::<f64>() {
                    Ok(n) if n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64 => Ok(n as u64),
                    _ => Err(CodecError::Shape(format!(
                        "record {} field `{}`: `{text}` is not a non-negative integer",
                        self.index, self.key
                    ))),
                }
            }
            Value::Null => Ok(0),
            other => Err(self.mismatch("number", &other)),
        }
    }
}

/// Reverses the layout the encoder gives multi-line template literals: a
/// leading newline, every line indented by [`BLOCK_INDENT`], and a closing
/// line holding only indentation.
///
/// Text that does not follow that layout is returned unchanged.
pub(crate) fn unindent_block(raw: &str) -> String {
    let Some(body) = raw.strip_prefix('\n') else {
        return raw.to_string();
    };
    let Some(last_newline) = body.rfind('\n') else {
        return raw.to_string();
    };
    if !body[last_newline + 1..]
        .chars()
        .all(|c| c == ' ' || c == '\t')
    {
        return raw.to_string();
    }

    body[..last_newline]
        .split('\n')
        .map(strip_indent)
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_indent(line: &str) -> &str {
    let spaces = line
        .bytes()
        .take(BLOCK_INDENT.len())
        .take_while(|b| *b == b' ')
        .count();
    &line[spaces..]
}
