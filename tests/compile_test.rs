//! Compiles generated headers with the system C++ compiler
//! and checks the accessor returns the asset byte for byte.
//! Skipped when no compiler is on PATH (or named by `CXX`).

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use payload_embed::embed_file;

const DRIVER: &str = r#"#include <cstdio>
#include <string>
#include "embedded_sdk.h"

int main() {
  const std::string payload = anywp_engine::GetEmbeddedPayload();
  std::fwrite(payload.data(), 1, payload.size(), stdout);
  return 0;
}
"#;

/// First compiler that answers `--version`
fn find_compiler() -> Option<String> {
    let mut candidates: Vec<String> = std::env::var("CXX").into_iter().collect();
    candidates.extend(["c++", "g++", "clang++"].map(String::from));

    candidates.into_iter().find(|cxx| {
        Command::new(cxx)
            .arg("--version")
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false)
    })
}

/// Temp directory holding an asset, its generated header and a driver program
struct CompileFixture {
    temp_dir: TempDir,
    cxx: String,
}

impl CompileFixture {
    fn new() -> Option<Self> {
        let Some(cxx) = find_compiler() else {
            eprintln!("no C++ compiler found, skipping");
            return None;
        };
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Some(Self { temp_dir, cxx })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Embed `payload`, build the driver against the header, return what it prints
    fn compile_and_run(&self, payload: &str, max_chunk_size: usize) -> Vec<u8> {
        let asset = self.path("anywp_sdk.js");
        let header = self.path("embedded_sdk.h");
        let driver = self.path("main.cpp");
        let binary = self.path("payload_driver");

        std::fs::write(&asset, payload).expect("Failed to write asset");
        embed_file(&asset, &header, max_chunk_size).expect("Should embed");
        std::fs::write(&driver, DRIVER).expect("Failed to write driver");

        let build = Command::new(&self.cxx)
            .arg("-std=c++17")
            .arg("-I")
            .arg(self.temp_dir.path())
            .arg("-o")
            .arg(&binary)
            .arg(&driver)
            .output()
            .expect("Failed to run compiler");
        assert!(
            build.status.success(),
            "compile failed:\n{}",
            String::from_utf8_lossy(&build.stderr)
        );

        run(&binary)
    }
}

fn run(binary: &Path) -> Vec<u8> {
    let out = Command::new(binary).output().expect("Failed to run driver");
    assert!(out.status.success());
    out.stdout
}

#[test]
fn test_compiled_hello_world() {
    let Some(fixture) = CompileFixture::new() else {
        return;
    };
    assert_eq!(fixture.compile_and_run("hello\nworld", 5), b"hello\nworld");
}

#[test]
fn test_compiled_keeps_carriage_returns() {
    let Some(fixture) = CompileFixture::new() else {
        return;
    };
    let payload = "line1\r\nline2\rline3\n";
    assert_eq!(fixture.compile_and_run(payload, 4), payload.as_bytes());

    // CR at every chunk edge
    let payload = "\r\n".repeat(9) + "\r";
    assert_eq!(fixture.compile_and_run(&payload, 1), payload.as_bytes());
}

#[test]
fn test_compiled_keeps_nul_and_control_characters() {
    let Some(fixture) = CompileFixture::new() else {
        return;
    };
    let payload = "a\\\nb ??= ??/\nc\0d\u{FEFF}é\t\x0Bz\x0C\0";
    assert_eq!(fixture.compile_and_run(payload, 4), payload.as_bytes());
}

#[test]
fn test_compiled_multibyte_chunk_over_literal_limit() {
    let Some(fixture) = CompileFixture::new() else {
        return;
    };
    let payload = "字".repeat(10_000) + "🎉\r\n";
    assert_eq!(fixture.compile_and_run(&payload, 10_000), payload.as_bytes());
}
