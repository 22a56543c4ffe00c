//! File-level embed, check and verify operations

use std::path::Path;

use super::generator::{render, GeneratedUnit, RenderOptions};
use super::reconstruct::extract_literals;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::{read_asset, read_existing, strip_leading_bom, write_atomic};
use crate::types::{Asset, EmbedReport};

/// Runs the asset → header transform for one configuration
pub struct Embedder {
    config: Config,
}

impl Default for Embedder {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Embedder {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Render options for a given asset/output pair
    pub fn render_options(&self, asset_path: &Path, output_path: &Path) -> RenderOptions {
        RenderOptions {
            max_chunk_size: self.config.max_chunk_size,
            delimiter: self.config.delimiter.clone(),
            namespace: self.config.namespace.clone(),
            function_name: self.config.function_name.clone(),
            include_guard: self.config.include_guard_for(output_path),
            source_label: self.config.source_label_for(asset_path),
            reserve: self.config.reserve,
        }
    }

    /// Read the asset and render its header without touching the output
    pub fn prepare(&self, asset_path: &Path, output_path: &Path) -> Result<(Asset, GeneratedUnit)> {
        self.config.validate()?;
        let asset = read_asset(asset_path, self.config.strip_input_bom)?;
        let unit = render(&asset.text, &self.render_options(asset_path, output_path))?;
        Ok((asset, unit))
    }

    /// Regenerate `output_path` from `asset_path`.
    ///
    /// The file is replaced atomically, and left alone when it already holds
    /// exactly the rendered bytes.
    pub fn embed(&self, asset_path: &Path, output_path: &Path) -> Result<EmbedReport> {
        let (_, unit) = self.prepare(asset_path, output_path)?;
        let bytes = unit.to_bytes(self.config.output_bom);

        let unchanged = matches!(
            read_existing(output_path),
            Ok(Some(existing)) if existing == bytes
        );

        if unchanged {
            tracing::info!("{:?} is up to date", output_path);
        } else {
            write_atomic(output_path, &bytes)?;
            tracing::info!(
                "Embedded {} chunks into {:?}",
                unit.chunk_count,
                output_path
            );
        }

        Ok(report(output_path, &unit, !unchanged))
    }

    /// Fail with `OutputStale` unless `output_path` matches a fresh render byte for byte
    pub fn check(&self, asset_path: &Path, output_path: &Path) -> Result<EmbedReport> {
        let (_, unit) = self.prepare(asset_path, output_path)?;
        let bytes = unit.to_bytes(self.config.output_bom);

        match read_existing(output_path)? {
            Some(existing) if existing == bytes => Ok(report(output_path, &unit, false)),
            _ => Err(Error::OutputStale(output_path.to_path_buf())),
        }
    }

    /// Fail with `OutputStale` unless the existing header reconstructs the asset.
    ///
    /// Unlike [`Embedder::check`] this ignores formatting and chunking, only
    /// the payload the accessor would return is compared.
    pub fn verify(&self, asset_path: &Path, output_path: &Path) -> Result<EmbedReport> {
        self.config.validate()?;
        let asset = read_asset(asset_path, self.config.strip_input_bom)?;

        let existing = read_existing(output_path)?
            .ok_or_else(|| Error::OutputStale(output_path.to_path_buf()))?;
        let existing = String::from_utf8(existing).map_err(|e| {
            Error::MalformedOutput(format!(
                "{} is not UTF-8: {}",
                output_path.display(),
                e.utf8_error()
            ))
        })?;

        let literals = extract_literals(strip_leading_bom(&existing), &self.config.delimiter)?;
        let payload = literals.concat();

        if payload != asset.text {
            tracing::debug!(
                "Payload mismatch: asset {} bytes, header {} bytes",
                asset.text.len(),
                payload.len()
            );
            return Err(Error::OutputStale(output_path.to_path_buf()));
        }

        Ok(EmbedReport {
            output_path: output_path.to_path_buf(),
            payload_chars: asset.char_len(),
            payload_bytes: asset.text.len(),
            chunk_count: literals.len(),
            digest: asset.digest(),
            changed: false,
        })
    }
}

/// Embed with default settings and the given chunk size
pub fn embed_file(
    asset_path: &Path,
    output_path: &Path,
    max_chunk_size: usize,
) -> Result<EmbedReport> {
    let config = Config {
        max_chunk_size,
        ..Config::default()
    };
    Embedder::new(config).embed(asset_path, output_path)
}

fn report(output_path: &Path, unit: &GeneratedUnit, changed: bool) -> EmbedReport {
    EmbedReport {
        output_path: output_path.to_path_buf(),
        payload_chars: unit.payload_chars,
        payload_bytes: unit.payload_bytes,
        chunk_count: unit.chunk_count,
        digest: unit.digest.clone(),
        changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_embed_then_check() {
        let temp_dir = TempDir::new().unwrap();
        let asset = temp_dir.path().join("sdk.js");
        let output = temp_dir.path().join("embedded_sdk.h");
        std::fs::write(&asset, "hello\nworld").unwrap();

        let embedder = Embedder::new(Config {
            max_chunk_size: 5,
            ..Config::default()
        });

        let report = embedder.embed(&asset, &output).unwrap();
        assert!(report.changed);
        assert_eq!(report.chunk_count, 3);
        assert_eq!(report.payload_chars, 11);

        assert!(embedder.check(&asset, &output).is_ok());

        std::fs::write(&asset, "hello\nthere").unwrap();
        assert!(matches!(
            embedder.check(&asset, &output),
            Err(Error::OutputStale(_))
        ));
    }

    #[test]
    fn test_second_embed_is_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let asset = temp_dir.path().join("sdk.js");
        let output = temp_dir.path().join("embedded_sdk.h");
        std::fs::write(&asset, "payload").unwrap();

        let embedder = Embedder::default();
        assert!(embedder.embed(&asset, &output).unwrap().changed);
        assert!(!embedder.embed(&asset, &output).unwrap().changed);
    }

    #[test]
    fn test_include_guard_follows_output_name() {
        let temp_dir = TempDir::new().unwrap();
        let options = Embedder::default().render_options(
            &temp_dir.path().join("anywp_sdk.js"),
            &temp_dir.path().join("embedded_sdk.h"),
        );
        assert_eq!(options.include_guard, "EMBEDDED_SDK_H_");
        assert_eq!(options.source_label, "anywp_sdk.js");
    }

    #[test]
    fn test_verify_ignores_chunking() {
        let temp_dir = TempDir::new().unwrap();
        let asset = temp_dir.path().join("sdk.js");
        let output = temp_dir.path().join("embedded_sdk.h");
        std::fs::write(&asset, "abcdefghij").unwrap();

        Embedder::new(Config {
            max_chunk_size: 3,
            ..Config::default()
        })
        .embed(&asset, &output)
        .unwrap();

        let verifier = Embedder::default();
        let report = verifier.verify(&asset, &output).unwrap();
        assert_eq!(report.chunk_count, 4);
        // Byte-level check fails because the default chunk size renders differently
        assert!(verifier.check(&asset, &output).is_err());
    }

    #[test]
    fn test_verify_missing_output() {
        let temp_dir = TempDir::new().unwrap();
        let asset = temp_dir.path().join("sdk.js");
        std::fs::write(&asset, "x").unwrap();

        assert!(matches!(
            Embedder::default().verify(&asset, &temp_dir.path().join("none.h")),
            Err(Error::OutputStale(_))
        ));
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let asset = temp_dir.path().join("sdk.js");
        let output = temp_dir.path().join("out.h");
        std::fs::write(&asset, "x").unwrap();

        assert!(matches!(
            embed_file(&asset, &output, 0),
            Err(Error::InvalidConfig(_))
        ));
        assert!(!output.exists());
    }
}
