//! C++ header generation

use super::chunker::Chunker;
use super::literal::{
    cpp_literal, ensure_no_collision, split_by_bytes, validate_layout, MSVC_LITERAL_LIMIT,
};
use crate::error::{Error, Result};
use crate::types::{compute_hash, BOM_BYTES};

/// Local variable the accessor accumulates into
pub(crate) const ACCUMULATOR: &str = "payload";

/// Everything that shapes the generated unit besides the payload itself
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub max_chunk_size: usize,
    pub delimiter: String,
    pub namespace: String,
    pub function_name: String,
    pub include_guard: String,
    pub source_label: String,
    pub reserve: bool,
}

impl RenderOptions {
    pub fn validate(&self) -> Result<()> {
        validate_layout(
            self.max_chunk_size,
            &self.delimiter,
            &self.namespace,
            &self.function_name,
            Some(&self.include_guard),
        )?;
        if self.source_label.contains(&self.delimiter) {
            return Err(Error::InvalidConfig(format!(
                "source label \"{}\" contains the delimiter",
                self.source_label
            )));
        }
        Ok(())
    }
}

/// A rendered header plus the numbers reported back to the caller
#[derive(Debug, Clone)]
pub struct GeneratedUnit {
    pub source: String,
    pub payload_chars: usize,
    pub payload_bytes: usize,
    pub chunk_count: usize,
    pub digest: String,
}

impl GeneratedUnit {
    /// File bytes, optionally BOM-prefixed
    pub fn to_bytes(&self, output_bom: bool) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.source.len() + BOM_BYTES.len());
        if output_bom {
            bytes.extend_from_slice(&BOM_BYTES);
        }
        bytes.extend_from_slice(self.source.as_bytes());
        bytes
    }
}

/// Render `payload` as a self-contained header whose accessor returns it verbatim.
///
/// Each chunk becomes one `append(literal, byte_len)` call so embedded NULs
/// survive. A chunk larger than [`MSVC_LITERAL_LIMIT`] bytes is spread over
/// several calls, split on character boundaries.
///
/// Fails with `DelimiterCollision` before producing any text if the payload
/// contains the delimiter. The result depends only on `payload` and `options`.
pub fn render(payload: &str, options: &RenderOptions) -> Result<GeneratedUnit> {
    options.validate()?;
    ensure_no_collision(payload, &options.delimiter)?;

    let chunks = Chunker::new(options.max_chunk_size)?.chunk(payload);
    let digest = compute_hash(payload);
    tracing::debug!(
        "Rendering {} chunks ({} bytes) with delimiter {}",
        chunks.len(),
        payload.len(),
        options.delimiter
    );

    let mut out = String::with_capacity(payload.len() + 64 * chunks.len() + 512);
    let label = sanitize_label(&options.source_label);

    out.push_str("// Auto-generated embedded payload - DO NOT EDIT\n");
    out.push_str(&format!("// Generated from {}\n", label));
    out.push_str(&format!("// SHA-256: {}\n", digest));
    out.push('\n');
    out.push_str(&format!("#ifndef {}\n", options.include_guard));
    out.push_str(&format!("#define {}\n", options.include_guard));
    out.push('\n');
    out.push_str("#include <string>\n\n");

    if !options.namespace.is_empty() {
        out.push_str(&format!("namespace {} {{\n\n", options.namespace));
    }

    out.push_str(&format!("inline std::string {}() {{\n", options.function_name));
    out.push_str(&format!("  std::string {};\n", ACCUMULATOR));
    if options.reserve && !payload.is_empty() {
        out.push_str(&format!("  {}.reserve({});\n", ACCUMULATOR, payload.len()));
    }

    for chunk in &chunks {
        let segments = split_by_bytes(&chunk.text, MSVC_LITERAL_LIMIT);
        if segments.len() > 1 {
            tracing::debug!(
                "Chunk {} is {} bytes, emitted as {} appends",
                chunk.index,
                chunk.text.len(),
                segments.len()
            );
        }
        for segment in segments {
            out.push_str(&format!(
                "  {}.append({}, {});\n",
                ACCUMULATOR,
                cpp_literal(segment, &options.delimiter),
                segment.len()
            ));
        }
    }

    out.push('\n');
    out.push_str(&format!("  return {};\n", ACCUMULATOR));
    out.push_str("}\n");

    if !options.namespace.is_empty() {
        out.push_str(&format!("\n}}  // namespace {}\n", options.namespace));
    }

    out.push('\n');
    out.push_str(&format!("#endif  // {}\n", options.include_guard));

    Ok(GeneratedUnit {
        source: out,
        payload_chars: payload.chars().count(),
        payload_bytes: payload.len(),
        chunk_count: chunks.len(),
        digest,
    })
}

/// Keep the banner on one comment line
fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
