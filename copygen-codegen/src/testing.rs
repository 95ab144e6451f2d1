//! Test utilities for code generators.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{path::Path, process::Command};

use copygen_manifest::Manifest;
use eyre::{Result, eyre};

use crate::pipeline::{CompilationContext, Pipeline};

/// Error from checking generated code with an external tool.
#[derive(Debug)]
pub struct CheckError {
    pub message: String,
    pub output: String,
}

impl std::fmt::Display for CheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n\nOutput:\n{}", self.message, self.output)
    }
}

impl std::error::Error for CheckError {}

/// Trait for verifying that generated code is well formed.
pub trait CodeChecker {
    fn check(&self, dir: &Path) -> Result<(), CheckError>;
}

/// Syntax checker using `gofmt -l -e`.
///
/// Lists files that gofmt would reformat or cannot parse; any listed file
/// fails the check.
pub struct GofmtChecker;

impl CodeChecker for GofmtChecker {
    fn check(&self, dir: &Path) -> Result<(), CheckError> {
        let output = Command::new("gofmt")
            .args(["-l", "-e", "."])
            .current_dir(dir)
            .output()
            .map_err(|e| CheckError {
                message: format!("Failed to run gofmt: {}", e),
                output: String::new(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if output.status.success() && stdout.trim().is_empty() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(CheckError {
                message: "gofmt reported problems".to_string(),
                output: format!("stderr:\n{}\n\nstdout:\n{}", stderr, stdout),
            })
        }
    }
}

/// Go compile checker using `go build ./...`.
///
/// Run it in a module root; unlike gofmt it catches type errors and unused
/// variables.
pub struct GoChecker;

impl CodeChecker for GoChecker {
    fn check(&self, dir: &Path) -> Result<(), CheckError> {
        run_go(dir, &["build", "./..."])
    }
}

/// Runs the `_test.go` files of a module with `go test ./...`.
pub struct GoTestChecker;

impl CodeChecker for GoTestChecker {
    fn check(&self, dir: &Path) -> Result<(), CheckError> {
        run_go(dir, &["test", "./..."])
    }
}

fn run_go(dir: &Path, args: &[&str]) -> Result<(), CheckError> {
    let command = format!("go {}", args.join(" "));
    let output = Command::new("go")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| CheckError {
            message: format!("Failed to run {}: {}", command, e),
            output: String::new(),
        })?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        Err(CheckError {
            message: format!("{} failed", command),
            output: format!("stderr:\n{}\n\nstdout:\n{}", stderr, stdout),
        })
    }
}

/// Write a `go.mod` declaring `module` into `dir`.
pub fn write_go_mod(dir: &Path, module: &str) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    std::fs::write(dir.join("go.mod"), format!("module {}\n\ngo 1.21\n", module))?;
    Ok(())
}

/// Parse a manifest and run the full pipeline on it.
///
/// # Panics
///
/// Panics if the manifest is invalid or the pipeline fails, which is what
/// a test wants.
pub fn compile(manifest: &str) -> CompilationContext {
    let manifest: Manifest = manifest
        .parse()
        .unwrap_or_else(|e| panic!("invalid test manifest: {e:?}"));
    Pipeline::new()
        .run(manifest)
        .unwrap_or_else(|e| panic!("pipeline failed: {e:?}"))
}

/// Run the pipeline and return the error it fails with.
///
/// # Panics
///
/// Panics if the manifest is invalid or the pipeline succeeds.
pub fn compile_err(manifest: &str) -> eyre::Report {
    let manifest: Manifest = manifest
        .parse()
        .unwrap_or_else(|e| panic!("invalid test manifest: {e:?}"));
    match Pipeline::new().run(manifest) {
        Ok(_) => panic!("pipeline unexpectedly succeeded"),
        Err(e) => e,
    }
}

/// Assert that two strings are equal, with a line diff on failure.
pub fn assert_content_eq(expected: &str, actual: &str) {
    if expected != actual {
        let expected_lines: Vec<&str> = expected.lines().collect();
        let actual_lines: Vec<&str> = actual.lines().collect();

        let mut diff = String::new();
        let max_lines = expected_lines.len().max(actual_lines.len());

        for i in 0..max_lines {
            let exp = expected_lines.get(i).copied().unwrap_or("<missing>");
            let act = actual_lines.get(i).copied().unwrap_or("<missing>");

            if exp != act {
                diff.push_str(&format!("Line {}:\n", i + 1));
                diff.push_str(&format!("  expected: {:?}\n", exp));
                diff.push_str(&format!("  actual:   {:?}\n", act));
            }
        }

        panic!("Content mismatch:\n{}", diff);
    }
}

/// Generate code into a temporary directory and return it.
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn generate_to_temp<F>(generate: F) -> Result<tempfile::TempDir>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let temp_dir = tempfile::TempDir::new()?;
    generate(temp_dir.path())?;
    Ok(temp_dir)
}

/// Run a generator into a temporary directory and check the result.
pub fn assert_generates_valid_code<C>(
    generate: impl FnOnce(&Path) -> Result<()>,
    checker: &C,
) -> Result<()>
where
    C: CodeChecker,
{
    let temp_dir = generate_to_temp(generate)?;

    checker.check(temp_dir.path()).map_err(|e| {
        eprintln!("Generated files in {}:", temp_dir.path().display());
        if let Ok(entries) = std::fs::read_dir(temp_dir.path()) {
            for entry in entries.flatten() {
                eprintln!("  {}", entry.path().display());
            }
        }
        eyre!("Check failed: {}", e)
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_helper() {
        let ctx = compile(
            r#"
            [[packages]]
            path = "p/api"
            comments = ["+k8s:deepcopy-gen=package"]

            [[packages.types]]
            name = "A"
            kind = "struct"
            "#,
        );
        assert_eq!(ctx.selection.unwrap().candidate_count(), 1);
    }

    #[test]
    fn test_compile_err_helper() {
        let err = compile_err(
            r#"
            [[packages]]
            path = "p/api"
            comments = ["+k8s:deepcopy-gen=all"]
            "#,
        );
        assert!(err.to_string().contains("unsupported"));
    }

    #[test]
    fn test_generate_to_temp() {
        let dir = generate_to_temp(|path| {
            std::fs::write(path.join("a.go"), "package a\n")?;
            Ok(())
        })
        .unwrap();
        assert!(dir.path().join("a.go").exists());
    }

    #[test]
    fn test_write_go_mod() {
        let dir = tempfile::tempdir().unwrap();
        write_go_mod(&dir.path().join("example.com/app"), "example.com/app").unwrap();
        let content = std::fs::read_to_string(dir.path().join("example.com/app/go.mod")).unwrap();
        assert!(content.starts_with("module example.com/app\n"));
    }

    #[test]
    #[should_panic(expected = "Content mismatch")]
    fn test_assert_content_eq_reports_diff() {
        assert_content_eq("a\nb\n", "a\nc\n");
    }
}
