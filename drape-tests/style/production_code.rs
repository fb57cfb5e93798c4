//! Production Code Checks
//!
//! Library and binary code must propagate errors instead of panicking,
//! and must not silence dead-code warnings.

use std::fs;
use std::path::{Path, PathBuf};

/// Patterns rejected outside test modules.
const BANNED: &[(&str, &str)] = &[
    (".unwrap()", "unwrap in production code"),
    (".expect(", "expect in production code"),
    ("dead_code", "dead code allowance"),
];

#[derive(Debug)]
struct Violation {
    file_path: String,
    line_number: usize,
    reason: &'static str,
    context: String,
}

/// Collects `.rs` files under every `drape-*/src` directory.
fn source_files(workspace: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(workspace)? {
        let path = entry?.path();
        let is_crate = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with("drape-"));
        if is_crate && path.join("src").is_dir() {
            collect_rust_files(&path.join("src"), &mut files)?;
        }
    }
    Ok(files)
}

fn collect_rust_files(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_rust_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
    Ok(())
}

/// Checks source text up to its first test module.
fn check_source(file_path: &str, content: &str) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("#[cfg(test)]") {
            break;
        }
        if trimmed.starts_with("//") {
            continue;
        }

        for (pattern, reason) in BANNED {
            if trimmed.contains(pattern) {
                violations.push(Violation {
                    file_path: file_path.to_string(),
                    line_number: index + 1,
                    reason,
                    context: trimmed.to_string(),
                });
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_modules_are_exempt() {
        let source = r#"
fn parse(input: &str) -> u32 {
    input.parse().unwrap()
}

/// Doc example: `value.unwrap()`
fn ok() {}

#[cfg(test)]
mod tests {
    fn helper() { Some(1).unwrap(); }
}
"#;
        let violations = check_source("lib.rs", source);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line_number, 3);
        assert_eq!(violations[0].reason, "unwrap in production code");
    }

    #[test]
    fn production_code_does_not_panic_on_errors() {
        let workspace = Path::new(env!("CARGO_MANIFEST_DIR")).join("..");
        let files = source_files(&workspace).unwrap();
        assert!(!files.is_empty(), "no workspace sources found");

        let violations: Vec<Violation> = files
            .iter()
            .flat_map(|path| {
                let content = fs::read_to_string(path).unwrap();
                check_source(&path.to_string_lossy(), &content)
            })
            .collect();

        for violation in &violations {
            println!(
                "{}:{}: {}\n  {}",
                violation.file_path, violation.line_number, violation.reason, violation.context
            );
        }
        assert!(
            violations.is_empty(),
            "{} violation(s) in production code - see output above",
            violations.len()
        );
    }
}
