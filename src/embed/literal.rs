//! Raw string literal rules and delimiter safety

use super::chunker::validate_chunk_size;
use crate::error::{Error, Result};

/// Longest delimiter a C++ raw string literal accepts
pub const MAX_DELIMITER_LEN: usize = 16;

/// MSVC rejects a single literal piece longer than this many bytes (C2026)
pub const MSVC_LITERAL_LIMIT: usize = 16_380;

/// Shared shape check for every option that ends up in the header text
pub fn validate_layout(
    max_chunk_size: usize,
    delimiter: &str,
    namespace: &str,
    function_name: &str,
    include_guard: Option<&str>,
) -> Result<()> {
    validate_chunk_size(max_chunk_size)?;
    validate_delimiter(delimiter)?;
    validate_namespace(namespace)?;
    validate_identifier("function_name", function_name)?;
    if let Some(guard) = include_guard {
        validate_identifier("include_guard", guard)?;
    }
    Ok(())
}

/// Check that `delimiter` is usable as a raw string d-char-sequence
pub fn validate_delimiter(delimiter: &str) -> Result<()> {
    if delimiter.is_empty() {
        return Err(Error::InvalidConfig("delimiter must not be empty".into()));
    }

    let len = delimiter.chars().count();
    if len > MAX_DELIMITER_LEN {
        return Err(Error::InvalidConfig(format!(
            "delimiter \"{}\" is {} characters, max is {}",
            delimiter, len, MAX_DELIMITER_LEN
        )));
    }

    if let Some(bad) = delimiter.chars().find(|c| !is_d_char(*c)) {
        return Err(Error::InvalidConfig(format!(
            "delimiter \"{}\" contains forbidden character {:?}",
            delimiter.escape_debug(),
            bad
        )));
    }

    Ok(())
}

/// Printable basic source characters, minus parentheses, backslash and quote
fn is_d_char(c: char) -> bool {
    c.is_ascii_graphic() && !matches!(c, '(' | ')' | '\\' | '"' | '$' | '@' | '`')
}

/// Character offset of the first occurrence of `delimiter` in `text`
pub fn find_collision(text: &str, delimiter: &str) -> Option<usize> {
    text.find(delimiter)
        .map(|byte_idx| text[..byte_idx].chars().count())
}

/// Fail with `DelimiterCollision` when the payload contains the delimiter
pub fn ensure_no_collision(text: &str, delimiter: &str) -> Result<()> {
    match find_collision(text, delimiter) {
        Some(offset) => Err(Error::DelimiterCollision {
            delimiter: delimiter.to_string(),
            offset,
        }),
        None => Ok(()),
    }
}

/// Wrap a chunk as `R"d(chunk)d"`
pub fn raw_literal(chunk: &str, delimiter: &str) -> String {
    let mut out = String::with_capacity(chunk.len() + 2 * delimiter.len() + 5);
    out.push_str(&open_sequence(delimiter));
    out.push_str(chunk);
    out.push_str(&close_sequence(delimiter));
    out
}

/// Characters a compiler would rewrite or cut short inside a raw literal.
///
/// Phase 1 turns CR and CRLF into LF, and a NUL byte in source is at best a
/// warning, so both are written as ordinary escapes instead.
fn needs_escape(c: char) -> bool {
    matches!(c, '\r' | '\0')
}

/// Render `text` as adjacent literals that compile back to exactly `text`.
///
/// Runs without CR or NUL become raw literals, the rest become `"\r"` /
/// `"\0"` escape literals. Empty input renders as an empty string.
pub fn cpp_literal(text: &str, delimiter: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2 * delimiter.len() + 8);
    let mut rest = text;

    while !rest.is_empty() {
        if !out.is_empty() {
            out.push(' ');
        }

        let raw_len = rest.find(needs_escape).unwrap_or(rest.len());
        if raw_len > 0 {
            out.push_str(&raw_literal(&rest[..raw_len], delimiter));
            rest = &rest[raw_len..];
            continue;
        }

        let escaped_len = rest.find(|c: char| !needs_escape(c)).unwrap_or(rest.len());
        out.push('"');
        for c in rest[..escaped_len].chars() {
            out.push_str(if c == '\r' { "\\r" } else { "\\0" });
        }
        out.push('"');
        rest = &rest[escaped_len..];
    }

    out
}

/// Split on character boundaries into pieces of at most `limit` bytes
pub fn split_by_bytes(text: &str, limit: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for (idx, c) in text.char_indices() {
        if idx > start && idx + c.len_utf8() - start > limit {
            pieces.push(&text[start..idx]);
            start = idx;
        }
    }

    if start < text.len() {
        pieces.push(&text[start..]);
    }

    pieces
}

pub fn open_sequence(delimiter: &str) -> String {
    format!("R\"{}(", delimiter)
}

pub fn close_sequence(delimiter: &str) -> String {
    format!("){}\"", delimiter)
}

/// C++ identifier: `[A-Za-z_][A-Za-z0-9_]*`
pub fn validate_identifier(field: &str, value: &str) -> Result<()> {
    let mut chars = value.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} \"{}\" is not a valid C++ identifier",
            field,
            value.escape_debug()
        )))
    }
}

/// Empty, or identifiers joined by `::`
pub fn validate_namespace(namespace: &str) -> Result<()> {
    if namespace.is_empty() {
        return Ok(());
    }
    for segment in namespace.split("::") {
        validate_identifier("namespace", segment)?;
    }
    Ok(())
}
