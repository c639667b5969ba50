//! Functional integration tests for treeex.
//!
//! These tests invoke the compiled `treeex` binary directly and validate its
//! output against expected behavior.
//!
//! Test categories:
//! - Help and version information
//! - Tree rendering and ordering
//! - File output (byte-order marker, overwrite, console notice)
//! - Error handling and exit codes
//!
//! Date: 2026-10-16

use std::fs::{self, File};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

// ============================================================================
// Test Infrastructure
// ============================================================================

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Executes treeex in a specific directory with the given arguments.
fn run_treeex_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_treeex"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute treeex")
}

/// Gets stdout as a string from command output.
fn stdout_str(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout should be UTF-8")
}

/// Gets stderr as a string from command output.
fn stderr_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// Test Directory Builders
// ============================================================================

/// Creates the sample structure.
///
/// ```text
/// root/
///   a.txt
///   b.txt
///   Sub1/
///   Sub2/
///     c.txt
/// ```
fn create_sample_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let root = dir.path();

    File::create(root.join("a.txt")).unwrap();
    File::create(root.join("b.txt")).unwrap();
    fs::create_dir(root.join("Sub1")).unwrap();
    fs::create_dir(root.join("Sub2")).unwrap();
    File::create(root.join("Sub2").join("c.txt")).unwrap();

    dir
}

const SAMPLE_BODY: &str = "│  a.txt\n│  b.txt\n├─Sub1\n└─Sub2\n      c.txt\n";

// ============================================================================
// Help and Version
// ============================================================================

#[test]
fn help_lists_options_and_exits_zero() {
    let dir = TempDir::new().unwrap();
    for flag in ["--help", "-h", "/?"] {
        let output = run_treeex_in_dir(dir.path(), &[flag]);
        assert!(output.status.success(), "{flag}");
        let stdout = stdout_str(&output);
        assert!(stdout.contains("Usage:"), "{flag}");
        assert!(stdout.contains("--output"), "{flag}");
    }
}

#[test]
fn version_prints_package_version() {
    let dir = TempDir::new().unwrap();
    for flag in ["--version", "-v", "/V"] {
        let output = run_treeex_in_dir(dir.path(), &[flag]);
        assert!(output.status.success(), "{flag}");
        assert!(stdout_str(&output).contains(env!("CARGO_PKG_VERSION")), "{flag}");
    }
}

#[test]
fn help_does_not_touch_output_file() {
    let dir = TempDir::new().unwrap();
    let output = run_treeex_in_dir(dir.path(), &["--help", "-o", "tree.txt"]);
    assert!(output.status.success());
    assert!(!dir.path().join("tree.txt").exists());
}

// ============================================================================
// Tree Rendering
// ============================================================================

#[test]
fn renders_sample_tree_with_header() {
    let dir = create_sample_dir();
    let output = run_treeex_in_dir(dir.path(), &["."]);

    assert!(output.status.success(), "stderr: {}", stderr_str(&output));
    assert_eq!(stdout_str(&output), format!(".\n{SAMPLE_BODY}"));
}

#[test]
fn defaults_to_current_directory() {
    let dir = create_sample_dir();
    let output = run_treeex_in_dir(dir.path(), &[]);

    assert!(output.status.success());
    assert_eq!(stdout_str(&output), format!(".\n{SAMPLE_BODY}"));
}

#[test]
fn header_keeps_path_as_given() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("proj")).unwrap();
    File::create(dir.path().join("proj").join("x.rs")).unwrap();

    let output = run_treeex_in_dir(dir.path(), &["proj"]);
    assert!(output.status.success());
    assert_eq!(stdout_str(&output), "proj\n  x.rs\n");
}

#[test]
fn empty_directory_prints_only_header() {
    let dir = TempDir::new().unwrap();
    let output = run_treeex_in_dir(dir.path(), &["."]);

    assert!(output.status.success());
    assert_eq!(stdout_str(&output), ".\n");
}

#[test]
fn hidden_entries_are_listed() {
    let dir = TempDir::new().unwrap();
    File::create(dir.path().join(".env")).unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    File::create(dir.path().join(".git").join("HEAD")).unwrap();

    let output = run_treeex_in_dir(dir.path(), &["."]);
    assert!(output.status.success());
    assert_eq!(stdout_str(&output), ".\n│  .env\n└─.git\n      HEAD\n");
}

#[test]
fn entries_use_natural_order() {
    let dir = TempDir::new().unwrap();
    for name in ["file10.txt", "File2.txt", "file1.txt"] {
        File::create(dir.path().join(name)).unwrap();
    }
    for name in ["d10", "d2", "D1"] {
        fs::create_dir(dir.path().join(name)).unwrap();
    }

    let output = run_treeex_in_dir(dir.path(), &["."]);
    assert!(output.status.success());
    assert_eq!(
        stdout_str(&output),
        ".\n│  file1.txt\n│  File2.txt\n│  file10.txt\n├─D1\n├─d2\n└─d10\n"
    );
}

#[test]
fn emoji_names_survive_console_output() {
    let dir = TempDir::new().unwrap();
    File::create(dir.path().join("🍣.txt")).unwrap();
    fs::create_dir(dir.path().join("📁 box")).unwrap();

    let output = run_treeex_in_dir(dir.path(), &["."]);
    assert!(output.status.success());
    assert_eq!(stdout_str(&output), ".\n│  🍣.txt\n└─📁 box\n");
}

#[test]
fn repeated_runs_are_identical() {
    let dir = create_sample_dir();
    let first = run_treeex_in_dir(dir.path(), &["."]);
    let second = run_treeex_in_dir(dir.path(), &["."]);
    assert_eq!(first.stdout, second.stdout);
}

// ============================================================================
// File Output
// ============================================================================

#[test]
fn file_output_starts_with_bom_and_matches_console() {
    let tree = create_sample_dir();
    let out_dir = TempDir::new().unwrap();
    let out_path = out_dir.path().join("tree.txt");
    let out_arg = out_path.to_string_lossy().into_owned();

    let console = run_treeex_in_dir(tree.path(), &["."]);
    let output = run_treeex_in_dir(tree.path(), &[".", "-o", &out_arg]);
    assert!(output.status.success(), "stderr: {}", stderr_str(&output));

    let bytes = fs::read(&out_path).unwrap();
    assert!(bytes.starts_with(BOM));
    assert_eq!(&bytes[BOM.len()..], console.stdout.as_slice());
}

#[test]
fn file_output_prints_notice_instead_of_tree() {
    let tree = create_sample_dir();
    let out_dir = TempDir::new().unwrap();
    let out_arg = out_dir.path().join("tree.txt").to_string_lossy().into_owned();

    let output = run_treeex_in_dir(tree.path(), &[".", "/O", &out_arg]);
    assert!(output.status.success());

    let stdout = stdout_str(&output);
    assert!(stdout.starts_with("The results have been output to \n    "));
    assert!(stdout.trim_end().ends_with("tree.txt."));
    assert!(!stdout.contains("a.txt"));
}

#[test]
fn file_output_keeps_emoji_bytes() {
    let tree = TempDir::new().unwrap();
    File::create(tree.path().join("🍣.txt")).unwrap();
    let out_dir = TempDir::new().unwrap();
    let out_path = out_dir.path().join("tree.txt");
    let out_arg = format!("--output={}", out_path.display());

    let output = run_treeex_in_dir(tree.path(), &[".", &out_arg]);
    assert!(output.status.success());

    let bytes = fs::read(&out_path).unwrap();
    let text = std::str::from_utf8(&bytes[BOM.len()..]).unwrap();
    assert_eq!(text, ".\n  🍣.txt\n");
}

#[test]
fn file_output_overwrites_existing_file() {
    let tree = create_sample_dir();
    let out_dir = TempDir::new().unwrap();
    let out_path = out_dir.path().join("tree.txt");
    fs::write(&out_path, "x".repeat(4096)).unwrap();
    let out_arg = out_path.to_string_lossy().into_owned();

    let output = run_treeex_in_dir(tree.path(), &[".", "-o", &out_arg]);
    assert!(output.status.success());

    let bytes = fs::read(&out_path).unwrap();
    let mut expected = BOM.to_vec();
    expected.extend_from_slice(format!(".\n{SAMPLE_BODY}").as_bytes());
    assert_eq!(bytes, expected);
}

// ============================================================================
// Error Handling
// ============================================================================

#[test]
fn missing_root_exits_two_without_creating_file() {
    let dir = TempDir::new().unwrap();
    let output = run_treeex_in_dir(dir.path(), &["nope", "-o", "tree.txt"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_str(&output).contains("nope"));
    assert!(output.stdout.is_empty());
    assert!(!dir.path().join("tree.txt").exists());
}

#[test]
fn file_root_exits_two() {
    let dir = TempDir::new().unwrap();
    File::create(dir.path().join("plain.txt")).unwrap();

    let output = run_treeex_in_dir(dir.path(), &["plain.txt"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_str(&output).contains("not a directory"));
}

#[test]
fn uncreatable_output_exits_three() {
    let dir = create_sample_dir();
    let output = run_treeex_in_dir(dir.path(), &[".", "-o", "no_such_dir/tree.txt"]);

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr_str(&output).contains("tree.txt"));
}

#[test]
fn unknown_option_exits_one() {
    let dir = TempDir::new().unwrap();
    let output = run_treeex_in_dir(dir.path(), &["--bogus"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_str(&output).contains("--bogus"));
}

#[test]
fn missing_output_value_exits_one() {
    let dir = TempDir::new().unwrap();
    let output = run_treeex_in_dir(dir.path(), &["-o"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn multiple_paths_exit_one() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("a")).unwrap();
    fs::create_dir(dir.path().join("b")).unwrap();

    let output = run_treeex_in_dir(dir.path(), &["a", "b"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn trailing_separator_exits_one() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    let arg = format!("src{}", std::path::MAIN_SEPARATOR);

    let output = run_treeex_in_dir(dir.path(), &[arg.as_str()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_str(&output).contains("separator"));
}

#[cfg(unix)]
#[test]
fn unreadable_directory_is_reported_inline() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    File::create(dir.path().join("after.txt")).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can still read the directory.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let output = run_treeex_in_dir(dir.path(), &["."]);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(output.status.success(), "stderr: {}", stderr_str(&output));
    let stdout = stdout_str(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], ".");
    assert_eq!(lines[1], "│  after.txt");
    assert_eq!(lines[2], "└─locked");
    assert_eq!(lines[3], "└─[Access error : locked]");
    assert!(lines[4].starts_with("        "));
    assert!(!lines[4].trim().is_empty());
}
