//! A recursive-descent parser for the literal subset the record block uses.
//!
//! Grammar: arrays, objects (bare or quoted keys), single/double quoted
//! strings, template literals without interpolation, numbers, `true`,
//! `false`, `null`, `undefined`, trailing commas and comments. Nothing is
//! ever evaluated.

use crate::codec::value::Value;
use crate::error::CodecError;

type Result<T> = std::result::Result<T, CodecError>;

/// Deepest array/object nesting accepted. Records need three levels.
const MAX_DEPTH: usize = 64;

/// Parses `src` as a single literal. `base` is the byte offset of `src`
/// inside the host document and is only used for error positions.
pub(crate) fn parse_literal(src: &str, base: usize) -> Result<Value> {
    let mut parser = Parser {
        src,
        pos: 0,
        base,
        depth: 0,
    };
    let value = parser.value()?;
    parser.skip_trivia()?;
    if parser.pos != src.len() {
        return Err(parser.error("unexpected trailing input after literal"));
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    base: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: impl Into<String>) -> CodecError {
        CodecError::syntax(self.base + self.pos, message)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected `{expected}`, found `{c}`"))),
            None => Err(self.error(format!("expected `{expected}`, found end of input"))),
        }
    }

    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            let rest = self.rest();
            if rest.starts_with("//") {
                let len = rest.find('\n').unwrap_or(rest.len());
                self.pos += len;
            } else if rest.starts_with("/*") {
                let Some(end) = rest[2..].find("*/") else {
                    return Err(self.error("unterminated block comment"));
                };
                self.pos += end + 4;
            } else if self.peek().is_some_and(char::is_whitespace) {
                self.bump();
            } else {
                return Ok(());
            }
        }
    }

    fn value(&mut self) -> Result<Value> {
        self.skip_trivia()?;
        match self.peek() {
            Some('[') => self.nested(Self::array),
            Some('{') => self.nested(Self::object),
            Some(quote @ ('\'' | '"')) => self.string(quote).map(Value::Str),
            Some('`') => self.template().map(Value::Template),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '.' => self.number(),
            Some(c) if is_ident_start(c) => self.keyword(),
            Some(c) => Err(self.error(format!("unexpected character `{c}`"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn nested(&mut self, parse: fn(&mut Self) -> Result<Value>) -> Result<Value> {
        if self.depth == MAX_DEPTH {
            return Err(self.error("literal nested too deeply"));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn array(&mut self) -> Result<Value> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(']') {
                self.bump();
                return Ok(Value::Array(items));
            }
            items.push(self.value()?);
            self.skip_trivia()?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(']') => {
                    self.bump();
                    return Ok(Value::Array(items));
                }
                _ => return Err(self.error("expected `,` or `]` in array")),
            }
        }
    }

    fn object(&mut self) -> Result<Value> {
        self.expect('{')?;
        let mut fields = Vec::new();
        loop {
            self.skip_trivia()?;
            let key = match self.peek() {
                Some('}') => {
                    self.bump();
                    return Ok(Value::Object(fields));
                }
                Some(quote @ ('\'' | '"')) => self.string(quote)?,
                Some(c) if is_ident_start(c) => self.ident().to_string(),
                Some(c) if c.is_ascii_digit() => self.digits().to_string(),
                _ => return Err(self.error("expected object key")),
            };
            self.skip_trivia()?;
            self.expect(':')?;
            let value = self.value()?;
            fields.push((key, value));
            self.skip_trivia()?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {
                    self.bump();
                    return Ok(Value::Object(fields));
                }
                _ => return Err(self.error("expected `,` or `}` in object")),
            }
        }
    }

    fn string(&mut self, quote: char) -> Result<String> {
        self.expect(quote)?;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some('\\') => self.escape(&mut out)?,
                Some('\n') | None => return Err(self.error("unterminated string literal")),
                Some(c) => out.push(c),
            }
        }
    }

    fn template(&mut self) -> Result<String> {
        self.expect('`')?;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('`') => return Ok(out),
                Some('\\') => self.escape(&mut out)?,
                Some('$') if self.peek() == Some('{') => {
                    return Err(self.error("template interpolation is not supported"));
                }
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated template literal")),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<()> {
        let Some(c) = self.bump() else {
            return Err(self.error("unterminated escape sequence"));
        };
        match c {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !self.peek().is_some_and(|c| c.is_ascii_digit()) => out.push('\0'),
            'x' => {
                let code = self.hex_digits(2)?;
                out.push(self.char_from(code)?);
            }
            'u' => {
                let code = self.unicode_escape()?;
                out.push(code);
            }
            // line continuation
            '\r' => {
                if self.peek() == Some('\n') {
                    self.bump();
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            c if c.is_ascii_digit() => {
                return Err(self.error("octal escape sequences are not supported"));
            }
            other => out.push(other),
        }
        Ok(())
    }

    fn unicode_escape(&mut self) -> Result<char> {
        if self.peek() == Some('{') {
            self.bump();
            let start = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.bump();
            }
            let digits = &self.src[start..self.pos];
            let code = u32::from_str_radix(digits, 16)
                .map_err(|_| self.error("invalid unicode escape"))?;
            self.expect('}')?;
            return self.char_from(code);
        }

        let high = self.hex_digits(4)?;
        if !(0xD800..0xDC00).contains(&high) {
            return self.char_from(high);
        }

        // surrogate pair
        if !self.rest().starts_with("\\u") {
            return Err(self.error("unpaired surrogate in unicode escape"));
        }
        self.pos += 2;
        let low = self.hex_digits(4)?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(self.error("unpaired surrogate in unicode escape"));
        }
        self.char_from(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
    }

    fn hex_digits(&mut self, count: usize) -> Result<u32> {
        let digits = self.rest().get(..count).unwrap_or("");
        if digits.len() != count || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(self.error(format!("expected {count} hex digits")));
        }
        self.pos += count;
        u32::from_str_radix(digits, 16).map_err(|_| self.error("invalid hex digits"))
    }

    fn char_from(&self, code: u32) -> Result<char> {
        char::from_u32(code).ok_or_else(|| self.error(format!("invalid code point {code:#x}")))
    }

    fn number(&mut self) -> Result<Value> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.bump();
        }
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-' | '_'))
        {
            self.bump();
        }
        let text = self.src[start..self.pos].replace('_', "");
        if text.parse::<f64>().is_err() {
            self.pos = start;
            return Err(self.error(format!("invalid number `{text}`")));
        }
        Ok(Value::Number(text))
    }

    fn keyword(&mut self) -> Result<Value> {
        let start = self.pos;
        match self.ident() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" | "undefined" => Ok(Value::Null),
            other => {
                let message = format!("unexpected identifier `{other}`");
                self.pos = start;
                Err(self.error(message))
            }
        }
    }

    fn ident(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn digits(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        &self.src[start..self.pos]
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Value {
        parse_literal(src, 0).unwrap()
    }

    fn s(text: &str) -> Value {
        Value::Str(text.to_string())
    }

    #[test]
    fn parses_objects_with_bare_and_quoted_keys() {
        let value = parse(r#"{ id: '1', "name": "x", 'tags': ['a', "b",], }"#);
        assert_eq!(
            value,
            Value::Object(vec![
                ("id".to_string(), s("1")),
                ("name".to_string(), s("x")),
                ("tags".to_string(), Value::Array(vec![s("a"), s("b")])),
            ])
        );
    }

    #[test]
    fn parses_escapes() {
        assert_eq!(parse(r"'it\'s'"), s("it's"));
        assert_eq!(parse(r#""a\"b\\c""#), s("a\"b\\c"));
        assert_eq!(parse(r"'line\nbreak\ttab'"), s("line\nbreak\ttab"));
        assert_eq!(parse(r"'\x41B\u{43}'"), s("ABC"));
        assert_eq!(parse(r"'😀'"), s("\u{1F600}"));
        assert_eq!(parse("'con\\\ntinued'"), s("continued"));
        assert_eq!(parse(r"'];'"), s("];"));
    }

    #[test]
    fn parses_template_literals() {
        assert_eq!(
            parse("`multi\nline \\` and \\${x}`"),
            Value::Template("multi\nline ` and ${x}".to_string())
        );
    }

    #[test]
    fn rejects_template_interpolation() {
        let err = parse_literal("`${process.exit()}`", 0).unwrap_err();
        assert!(matches!(err, CodecError::Syntax { .. }));
    }

    #[test]
    fn rejects_code() {
        assert!(parse_literal("[require('fs')]", 0).is_err());
        assert!(parse_literal("[1 + 1]", 0).is_err());
        assert!(parse_literal("(() => [])()", 0).is_err());
    }

    #[test]
    fn skips_comments() {
        let value = parse("[\n  // first\n  1, /* second */ 2\n]");
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Number("1".to_string()),
                Value::Number("2".to_string())
            ])
        );
    }

    #[test]
    fn parses_keywords_and_numbers() {
        assert_eq!(
            parse("[true, false, null, undefined, 42, 1.5]"),
            Value::Array(vec![
                Value::Bool(true),
                Value::Bool(false),
                Value::Null,
                Value::Null,
                Value::Number("42".to_string()),
                Value::Number("1.5".to_string()),
            ])
        );
    }

    #[test]
    fn reports_offsets_relative_to_document() {
        let err = parse_literal("[1, ?]", 100).unwrap_err();
        assert_eq!(
            err,
            CodecError::Syntax {
                offset: 104,
                message: "unexpected character `?`".to_string()
            }
        );
    }

    #[test]
    fn rejects_deep_nesting() {
        let deep = format!("{}{}", "[".repeat(200_000), "]".repeat(200_000));
        let err = parse_literal(&deep, 0).unwrap_err();
        assert_eq!(
            err,
            CodecError::Syntax {
                offset: MAX_DEPTH,
                message: "literal nested too deeply".to_string()
            }
        );

        let objects = format!("{}1{}", "{ a: ".repeat(MAX_DEPTH + 1), " }".repeat(MAX_DEPTH + 1));
        assert!(parse_literal(&objects, 0).is_err());

        let shallow = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(parse_literal(&shallow, 0).is_ok());
    }

    #[test]
    fn rejects_unterminated_input() {
        assert!(parse_literal("['open", 0).is_err());
        assert!(parse_literal("[1, 2", 0).is_err());
        assert!(parse_literal("{ id: '1'", 0).is_err());
        assert!(parse_literal("[] extra", 0).is_err());
    }
}
