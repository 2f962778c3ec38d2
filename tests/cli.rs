use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn treecopy_cmd() -> Command {
    Command::cargo_bin("treecopy").unwrap()
}

fn stdout_for(path: &Path) -> String {
    let output = treecopy_cmd()
        .arg("--no-clipboard")
        .arg(path)
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

fn create_project(temp: &TempDir) -> PathBuf {
    let root = temp.path().join("my-project");
    fs::create_dir_all(root.join("src/utils")).unwrap();
    fs::create_dir_all(root.join("tests")).unwrap();
    fs::write(root.join("src/main.py"), "print('hi')\n").unwrap();
    fs::write(root.join("src/utils/helpers.py"), "").unwrap();
    fs::write(root.join("tests/test_main.py"), "").unwrap();
    fs::write(root.join("README.md"), "# my-project\n").unwrap();
    fs::write(root.join("pyproject.toml"), "").unwrap();
    root
}

#[test]
fn renders_project_byte_for_byte() {
    let temp = TempDir::new().unwrap();
    let root = create_project(&temp);

    assert_eq!(
        stdout_for(&root),
        concat!(
            "my-project/\n",
            "├── src/\n",
            "│   ├── utils/\n",
            "│   │   └── helpers.py\n",
            "│   └── main.py\n",
            "├── tests/\n",
            "│   └── test_main.py\n",
            "├── README.md\n",
            "└── pyproject.toml\n",
        )
    );
}

#[test]
fn uppercase_sorts_before_lowercase() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("cases");
    fs::create_dir_all(root.join("lib")).unwrap();
    fs::create_dir_all(root.join("Docs")).unwrap();
    fs::write(root.join("b.txt"), "").unwrap();
    fs::write(root.join("B.txt"), "").unwrap();
    fs::write(root.join("a.txt"), "").unwrap();

    assert_eq!(
        stdout_for(&root),
        concat!(
            "cases/\n",
            "├── Docs/\n",
            "├── lib/\n",
            "├── B.txt\n",
            "├── a.txt\n",
            "└── b.txt\n",
        )
    );
}

#[test]
fn gitignore_excludes_directory_and_descendants() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("proj");
    fs::create_dir_all(root.join("dist/assets")).unwrap();
    fs::write(root.join("dist/assets/app.js"), "").unwrap();
    fs::write(root.join("dist/index.html"), "").unwrap();
    fs::write(root.join("main.rs"), "").unwrap();
    fs::write(root.join(".gitignore"), "dist/\n").unwrap();

    assert_eq!(
        stdout_for(&root),
        "proj/\n├── .gitignore\n└── main.rs\n"
    );
}

#[test]
fn negation_reincludes_file() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("proj");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join(".gitignore"), "*.txt\n!notes.txt\n").unwrap();
    fs::write(root.join("scratch.txt"), "").unwrap();
    fs::write(root.join("notes.txt"), "").unwrap();

    assert_eq!(
        stdout_for(&root),
        "proj/\n├── .gitignore\n└── notes.txt\n"
    );
}

#[test]
fn default_ignores_apply_without_gitignore() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("proj");
    fs::create_dir_all(root.join(".git/objects")).unwrap();
    fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
    fs::create_dir_all(root.join("app/__pycache__")).unwrap();
    fs::write(root.join("app/__pycache__/mod.pyc"), "").unwrap();
    fs::write(root.join("app/mod.py"), "").unwrap();
    fs::write(root.join(".env"), "SECRET=1\n").unwrap();

    assert_eq!(stdout_for(&root), "proj/\n└── app/\n    └── mod.py\n");
}

#[test]
fn default_ignores_survive_gitignore_negation() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("proj");
    fs::create_dir_all(root.join("node_modules")).unwrap();
    fs::write(root.join(".gitignore"), "!node_modules/\n").unwrap();

    assert_eq!(stdout_for(&root), "proj/\n└── .gitignore\n");
}

#[test]
fn only_empty_directories() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("empty");
    fs::create_dir_all(root.join("a/nested")).unwrap();
    fs::create_dir_all(root.join("b")).unwrap();

    assert_eq!(
        stdout_for(&root),
        "empty/\n├── a/\n│   └── nested/\n└── b/\n"
    );
}

#[test]
fn nonexistent_path_fails_without_stdout() {
    let temp = TempDir::new().unwrap();

    treecopy_cmd()
        .arg("--no-clipboard")
        .arg(temp.path().join("does-not-exist"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid root"));
}

#[test]
fn file_path_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("single.txt");
    fs::write(&file, "content").unwrap();

    treecopy_cmd()
        .arg("--no-clipboard")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn missing_path_is_a_usage_error() {
    treecopy_cmd()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn help_mentions_clipboard_flag() {
    treecopy_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-clipboard"));
}

#[test]
fn quiet_run_keeps_stderr_clean() {
    let temp = TempDir::new().unwrap();
    let root = create_project(&temp);

    treecopy_cmd()
        .args(["--no-clipboard", "--quiet"])
        .arg(&root)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn relative_root_with_same_named_subdirectory() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("app");
    fs::create_dir_all(root.join("app")).unwrap();
    fs::write(root.join(".gitignore"), "/local.py\n").unwrap();
    fs::write(root.join("local.py"), "").unwrap();
    fs::write(root.join("app/local.py"), "").unwrap();

    let output = treecopy_cmd()
        .current_dir(temp.path())
        .args(["--no-clipboard", "app"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "app/\n├── app/\n│   └── local.py\n└── .gitignore\n"
    );
}

#[test]
fn ignore_option_adds_patterns() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("proj");
    fs::create_dir_all(root.join("dist")).unwrap();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/lib.rs"), "").unwrap();
    fs::write(root.join("Cargo.lock"), "").unwrap();
    fs::write(root.join("Cargo.toml"), "").unwrap();

    let output = treecopy_cmd()
        .args(["--no-clipboard", "-i", "dist", "--ignore", "*.lock"])
        .arg(&root)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "proj/\n├── src/\n│   └── lib.rs\n└── Cargo.toml\n"
    );
}

#[test]
fn conventional_editor_and_bytecode_entries_are_hidden() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("proj");
    fs::create_dir_all(root.join(".idea")).unwrap();
    fs::create_dir_all(root.join(".vscode")).unwrap();
    fs::write(root.join(".DS_Store"), "").unwrap();
    fs::write(root.join("mod.py"), "").unwrap();
    fs::write(root.join("mod.pyc"), "").unwrap();

    assert_eq!(stdout_for(&root), "proj/\n└── mod.py\n");
}

#[test]
fn invalid_ignore_pattern_fails() {
    let temp = TempDir::new().unwrap();

    treecopy_cmd()
        .args(["--no-clipboard", "-i", "["])
        .arg(temp.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid ignore pattern"));
}
