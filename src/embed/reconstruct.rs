//! Recover the payload from a generated unit

use super::generator::ACCUMULATOR;
use super::literal::{close_sequence, open_sequence};
use crate::error::{Error, Result};
use crate::types::BOM_CHAR;

/// Decoded payload of every `append` statement in the unit, in source order.
///
/// Each statement is a run of adjacent raw and escape literals followed by its
/// byte length, which must match what the literals decode to.
pub fn extract_literals(unit: &str, delimiter: &str) -> Result<Vec<String>> {
    let statement = format!("\n  {}.append(", ACCUMULATOR);
    let open = open_sequence(delimiter);
    let close = close_sequence(delimiter);
    let mut segments = Vec::new();
    let mut pos = 0;

    while let Some(rel) = unit[pos..].find(&statement) {
        let mut cursor = pos + rel + statement.len();
        let mut segment = String::new();

        loop {
            let rest = &unit[cursor..];
            if let Some(body) = rest.strip_prefix(open.as_str()) {
                let len = body.find(&close).ok_or_else(|| {
                    malformed(segments.len(), cursor, "unterminated raw literal")
                })?;
                segment.push_str(&body[..len]);
                cursor += open.len() + len + close.len();
            } else if let Some(body) = rest.strip_prefix('"') {
                let len = body
                    .find('"')
                    .ok_or_else(|| malformed(segments.len(), cursor, "unterminated escape literal"))?;
                unescape(&body[..len], &mut segment)
                    .ok_or_else(|| malformed(segments.len(), cursor, "unknown escape"))?;
                cursor += len + 2;
            } else if let Some(tail) = rest.strip_prefix(", ") {
                let len = tail
                    .find(");")
                    .ok_or_else(|| malformed(segments.len(), cursor, "unterminated append"))?;
                let declared: usize = tail[..len]
                    .parse()
                    .map_err(|_| malformed(segments.len(), cursor, "length is not a number"))?;
                if declared != segment.len() {
                    return Err(malformed(
                        segments.len(),
                        cursor,
                        &format!("length {} but literals hold {} bytes", declared, segment.len()),
                    ));
                }
                cursor += 2 + len + 2;
                break;
            } else if rest.starts_with(' ') {
                cursor += 1;
            } else {
                return Err(malformed(segments.len(), cursor, "unexpected text"));
            }
        }

        segments.push(segment);
        pos = cursor;
    }

    Ok(segments)
}

/// Escape literal bodies only ever hold `\r` and `\0`
fn unescape(body: &str, out: &mut String) -> Option<()> {
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            return None;
        }
        match chars.next()? {
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            _ => return None,
        }
    }
    Some(())
}

fn malformed(index: usize, byte: usize, what: &str) -> Error {
    Error::MalformedOutput(format!("append {} at byte {}: {}", index, byte, what))
}

/// Concatenate the literals of a generated unit, as the compiled accessor would.
///
/// A leading file BOM is ignored; it belongs to the header, not the payload.
pub fn reconstruct(unit: &str, delimiter: &str) -> Result<String> {
    let unit = unit.strip_prefix(BOM_CHAR).unwrap_or(unit);
    Ok(extract_literals(unit, delimiter)?.concat())
}
