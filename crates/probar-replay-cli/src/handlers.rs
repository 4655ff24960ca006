//! Command handlers
//!
//! Handlers write to caller-supplied streams so tests can capture output.

use crate::commands::{CheckArgs, ShowArgs, ShowFormat};
use crate::error::{CliError, CliResult};
use probar_replay::{ContentSpec, Expectation, ExpectationScript, ReturnSpec};
use serde_json::Value;
use std::io::Write;
use std::path::Path;

/// Validate and lint every file in `args`.
///
/// A file fails when it cannot be loaded, or when it has lint findings and
/// `--deny-warnings` is set.
pub fn run_check(
    args: &CheckArgs,
    quiet: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> CliResult<()> {
    let mut failed = 0;
    for file in &args.files {
        if !check_file(file, args.deny_warnings, quiet, out, err)? {
            failed += 1;
        }
    }

    if failed == 0 {
        Ok(())
    } else {
        Err(CliError::check_failed(failed, args.files.len()))
    }
}

fn check_file(
    file: &Path,
    deny_warnings: bool,
    quiet: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> CliResult<bool> {
    let script = match ExpectationScript::load(file) {
        Ok(script) => script,
        Err(e) => {
            tracing::debug!(file = %file.display(), error = %e, "script rejected");
            writeln!(err, "error: {}: {e}", file.display())?;
            return Ok(false);
        }
    };

    let findings = script.lint();
    for finding in &findings {
        writeln!(err, "warning: {}: {finding}", file.display())?;
    }

    let passed = findings.is_empty() || !deny_warnings;
    if passed && !quiet {
        writeln!(
            out,
            "ok: {} ({} expectation(s), {} warning(s))",
            file.display(),
            script.len(),
            findings.len()
        )?;
    }
    Ok(passed)
}

/// Print the expectations of one script
pub fn run_show(args: &ShowArgs, out: &mut dyn Write) -> CliResult<()> {
    let script = ExpectationScript::load(&args.file)?;
    match args.format {
        ShowFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &script.to_file())?;
            writeln!(out)?;
        }
        ShowFormat::Text => {
            writeln!(out, "{} ({} expectation(s))", script.name(), script.len())?;
            if !script.description().is_empty() {
                writeln!(out, "  {}", script.description())?;
            }
            for (index, expectation) in script.expectations().iter().enumerate() {
                writeln!(out, "  #{index} {}", describe(expectation))?;
            }
        }
    }
    Ok(())
}

/// One-line summary of an expectation
pub fn describe(expectation: &Expectation) -> String {
    let mut line = expectation.operation().to_string();

    match expectation.expected_args() {
        Some(args) => {
            line.push_str(" args=");
            line.push_str(&Value::Array(args.to_vec()).to_string());
        }
        None => line.push_str(" args=*"),
    }

    match expectation.returns() {
        Some(ReturnSpec::Value(value)) => {
            line.push_str(" -> ");
            line.push_str(&value.to_string());
        }
        Some(ReturnSpec::Sequence(items)) => {
            line.push_str(" -> sequence ");
            line.push_str(&Value::Array(items.clone()).to_string());
        }
        None => {}
    }

    if let Some(failure) = expectation.failure() {
        line.push_str(" fails ");
        line.push_str(&failure.to_string());
    }

    match expectation.content() {
        Some(ContentSpec::File(path)) => {
            line.push_str(" content=file:");
            line.push_str(&path.display().to_string());
        }
        Some(content) => {
            line.push_str(" content=");
            line.push_str(content.kind());
        }
        None => {}
    }

    line
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const VALID: &str = r#"
name: login
expectations:
  - operation: navigate
    expectedArgs: ["http://localhost/login"]
  - operation: page_source
    content: "<html></html>"
"#;

    fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    fn check(files: Vec<PathBuf>, deny_warnings: bool) -> (CliResult<()>, String, String) {
        let args = CheckArgs {
            files,
            deny_warnings,
        };
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();
        let result = run_check(&args, false, &mut out, &mut err);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    mod check_tests {
        use super::*;

        #[test]
        fn test_valid_script_passes() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "login.yaml", VALID);
            let (result, out, err) = check(vec![path], false);
            assert!(result.is_ok());
            assert!(out.contains("ok:"));
            assert!(out.contains("2 expectation(s)"));
            assert!(err.is_empty());
        }

        #[test]
        fn test_invalid_script_fails() {
            let dir = TempDir::new().unwrap();
            let good = write(&dir, "good.yaml", VALID);
            let bad = write(
                &dir,
                "bad.yaml",
                "- operation: find_elements\n  returnValue: 1\n  returnSequence: [1]\n",
            );
            let (result, _, err) = check(vec![good, bad], false);
            assert!(matches!(
                result,
                Err(CliError::CheckFailed {
                    failed: 1,
                    total: 2
                })
            ));
            assert!(err.contains("Invalid expectation #0"));
        }

        #[test]
        fn test_lint_warning_is_not_fatal_by_default() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "lint.yaml", "- operation: teleport\n");
            let (result, _, err) = check(vec![path.clone()], false);
            assert!(result.is_ok());
            assert!(err.contains("warning:"));

            let (result, _, _) = check(vec![path], true);
            assert!(result.is_err());
        }

        #[test]
        fn test_quiet_suppresses_ok_lines() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "login.yaml", VALID);
            let args = CheckArgs {
                files: vec![path],
                deny_warnings: false,
            };
            let mut out: Vec<u8> = Vec::new();
            run_check(&args, true, &mut out, &mut Vec::<u8>::new()).unwrap();
            assert!(out.is_empty());
        }
    }

    mod show_tests {
        use super::*;

        #[test]
        fn test_show_text() {
            let dir = TempDir::new().unwrap();
            let file = write(&dir, "login.yaml", VALID);
            let mut out: Vec<u8> = Vec::new();
            run_show(
                &ShowArgs {
                    file,
                    format: ShowFormat::Text,
                },
                &mut out,
            )
            .unwrap();
            let text = String::from_utf8(out).unwrap();
            assert!(text.starts_with("login (2 expectation(s))"));
            assert!(text.contains("#0 navigate args=[\"http://localhost/login\"]"));
            assert!(text.contains("#1 page_source args=* content=literal"));
        }

        #[test]
        fn test_show_json() {
            let dir = TempDir::new().unwrap();
            let file = write(&dir, "login.yaml", VALID);
            let mut out: Vec<u8> = Vec::new();
            run_show(
                &ShowArgs {
                    file,
                    format: ShowFormat::Json,
                },
                &mut out,
            )
            .unwrap();
            let doc: Value = serde_json::from_slice(&out).unwrap();
            assert_eq!(doc["name"], json!("login"));
            assert_eq!(doc["expectations"][1]["content"], json!("<html></html>"));
        }

        #[test]
        fn test_show_missing_file() {
            let args = ShowArgs {
                file: PathBuf::from("/nonexistent/script.yaml"),
                format: ShowFormat::Text,
            };
            assert!(matches!(
                run_show(&args, &mut Vec::<u8>::new()),
                Err(CliError::Script(_))
            ));
        }
    }

    mod describe_tests {
        use super::*;

        #[test]
        fn test_describe_returns_and_failure() {
            let expectation = Expectation::new("find_elements")
                .with_args(vec![json!("li")])
                .returning_sequence(vec![json!("a"), json!("b")]);
            assert_eq!(
                describe(&expectation),
                r#"find_elements args=["li"] -> sequence ["a","b"]"#
            );

            let expectation = Expectation::new("click").failing("Element not visible");
            assert_eq!(
                describe(&expectation),
                r#"click args=* fails "Element not visible""#
            );
        }
    }
}
