mod common;

use std::fs;

use common::{MockApi, TestFixture, unreachable_api};
use predicates::prelude::*;

const REVIEW: &str = "## Issues\n\n1. **Unused** import `os`";

#[test]
fn help_lists_exit_codes() {
    codebuddy!()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exit codes"))
        .stdout(predicate::str::contains("--clone"));
}

#[test]
fn version_is_printed() {
    codebuddy!()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("codebuddy"));
}

#[test]
fn missing_repository_argument_is_usage_error() {
    codebuddy!().assert().code(2);
}

#[test]
fn empty_repository_completes_without_requests() {
    let fixture = TestFixture::new();
    let api = MockApi::reviewing(REVIEW);

    fixture
        .command()
        .args(["--api", &api.url])
        .assert()
        .success()
        .stderr(predicate::str::contains("Analysis successfully completed"));

    assert!(fixture.path().join("reports").is_dir());
    assert!(fixture.reports().is_empty());
    assert!(api.requests().is_empty());
}

#[test]
fn missing_repository_directory_is_created() {
    let fixture = TestFixture::new();
    let repo = fixture.path().join("fresh/repo");
    let api = MockApi::reviewing(REVIEW);

    codebuddy!()
        .env_remove("RUST_LOG")
        .arg(&repo)
        .args(["--no-config", "--api", &api.url])
        .assert()
        .success();

    assert!(repo.join("reports").is_dir());
}

#[test]
fn reviews_are_written_to_report() {
    let fixture = TestFixture::new();
    fixture.create_sample_project();
    let api = MockApi::reviewing(REVIEW);

    fixture
        .command()
        .args(["--api", &api.url])
        .assert()
        .success();

    let reports = fixture.reports();
    assert_eq!(reports.len(), 1);
    let content = fs::read_to_string(&reports[0]).unwrap();
    assert_eq!(
        content,
        format!("## File: main.py\n{REVIEW}\n\n## File: README.md\n{REVIEW}\n\n")
    );
}

#[test]
fn request_contains_file_content_and_prompts() {
    let fixture = TestFixture::new();
    fixture.create_file("main.py", "print('hello world')");
    let api = MockApi::reviewing(REVIEW);

    fixture
        .command()
        .args(["--api", &api.url])
        .assert()
        .success();

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_str(&requests[0]).unwrap();
    assert_eq!(body["max_tokens"], 500);
    assert_eq!(body["messages"][0]["role"], "system");
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(user.contains("print('hello world')"));
    assert!(user.contains("source code"));
}

#[test]
fn print_mode_writes_plain_text_to_stdout() {
    let fixture = TestFixture::new();
    fixture.create_file("main.py", "import os");
    let api = MockApi::reviewing(REVIEW);

    fixture
        .command()
        .args(["--api", &api.url, "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File: main.py\nIssues\nUnused import os"))
        .stdout(predicate::str::contains("**").not());
}

#[test]
fn unreachable_api_counts_errors() {
    let fixture = TestFixture::new();
    fixture.create_sample_project();

    fixture
        .command()
        .args(["--api", &unreachable_api()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Analysis complete with 2 error(s)"));

    assert!(fixture.reports().is_empty());
}

#[test]
fn upstream_error_status_counts_errors() {
    let fixture = TestFixture::new();
    fixture.create_file("main.py", "x = 1");
    let api = MockApi::start(500, r#"{"error":"overloaded"}"#.to_string());

    fixture
        .command()
        .args(["--api", &api.url])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("status code 500"));
}

#[test]
fn empty_review_is_not_recorded() {
    let fixture = TestFixture::new();
    fixture.create_file("main.py", "x = 1");
    let api = MockApi::reviewing("   ");

    fixture
        .command()
        .args(["--api", &api.url])
        .assert()
        .code(1);

    assert!(fixture.reports().is_empty());
}

#[test]
fn undecodable_file_is_skipped_and_others_reviewed() {
    let fixture = TestFixture::new();
    fixture.create_file("main.py", "x = 1");
    fs::write(fixture.path().join("scan.pdf"), [0x25, 0x50, 0xff, 0xfe, 0x00]).unwrap();
    let api = MockApi::reviewing(REVIEW);

    fixture
        .command()
        .args(["--api", &api.url])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("scan.pdf"));

    let content = fs::read_to_string(&fixture.reports()[0]).unwrap();
    assert!(content.contains("## File: main.py"));
    assert!(!content.contains("scan.pdf"));
}

#[test]
fn excluded_and_ignored_files_are_not_sent() {
    let fixture = TestFixture::new();
    fixture.create_file(".gitignore", "# build output\nbuild/\n*.log\n");
    fixture.create_file("build/gen.py", "generated = True");
    fixture.create_file("debug.log", "trace");
    fixture.create_file("LICENSE", "MIT");
    fixture.create_file("pkg/__init__.py", "");
    fixture.create_file("requirements.txt", "requests");
    fixture.create_file("pkg/core.py", "core = 1");
    let api = MockApi::reviewing(REVIEW);

    fixture
        .command()
        .args(["--api", &api.url])
        .assert()
        .success();

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].contains("core = 1"));
}

#[test]
fn invalid_api_url_is_rejected() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["--api", "localhost:1234"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid API URL"));
}

#[test]
fn repository_path_that_is_a_file_fails() {
    let fixture = TestFixture::new();
    fixture.create_file("not-a-dir.txt", "");

    codebuddy!()
        .env_remove("RUST_LOG")
        .arg(fixture.path().join("not-a-dir.txt"))
        .arg("--no-config")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn external_reports_dir_uses_repository_prefix() {
    let fixture = TestFixture::new();
    let repo = fixture.path().join("project");
    fs::create_dir_all(&repo).unwrap();
    fs::write(repo.join("main.py"), "x = 1").unwrap();
    let shared = fixture.path().join("all-reports");
    let api = MockApi::reviewing(REVIEW);

    codebuddy!()
        .env_remove("RUST_LOG")
        .arg(&repo)
        .args(["--no-config", "--api", &api.url, "--reports"])
        .arg(&shared)
        .assert()
        .success();

    let reports = TestFixture::reports_in(&shared);
    assert_eq!(reports.len(), 1);
    let name = reports[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("project_"));
    assert!(!repo.join("reports").exists());
}

#[test]
fn second_run_does_not_review_previous_report() {
    let fixture = TestFixture::new();
    fixture.create_file("main.py", "x = 1");
    let api = MockApi::reviewing(REVIEW);

    fixture.command().args(["--api", &api.url]).assert().success();
    // Report names have second resolution.
    std::thread::sleep(std::time::Duration::from_millis(1100));
    fixture.command().args(["--api", &api.url]).assert().success();

    assert_eq!(api.requests().len(), 2);
    assert_eq!(fixture.reports().len(), 2);
}

#[test]
fn clone_is_skipped_when_repository_exists() {
    let fixture = TestFixture::new();
    fixture.create_dir(".git");
    fixture.create_file("main.py", "x = 1");
    let api = MockApi::reviewing(REVIEW);

    fixture
        .command()
        .args([
            "--api",
            &api.url,
            "--clone",
            "https://example.invalid/user/repo.git",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Repository cloning skipped"));

    assert_eq!(api.requests().len(), 1);
}

#[test]
fn invalid_clone_url_is_rejected() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["--clone", "relative/path"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a valid git URL"));
}

#[test]
fn quiet_suppresses_info_logs() {
    let fixture = TestFixture::new();
    fixture.create_file("main.py", "x = 1");
    let api = MockApi::reviewing(REVIEW);

    fixture
        .command()
        .args(["--api", &api.url, "-q"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Analyzing file").not());
}

#[test]
fn log_file_receives_json_logs() {
    let fixture = TestFixture::new();
    fixture.create_file("main.py", "x = 1");
    let api = MockApi::reviewing(REVIEW);
    let logs = tempfile::TempDir::new().unwrap();
    let log = logs.path().join("nested/run.log");

    fixture
        .command()
        .args(["--api", &api.url, "--log-format", "json", "--log-file"])
        .arg(&log)
        .assert()
        .success();

    let content = fs::read_to_string(&log).unwrap();
    let first: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
    assert!(first.get("level").is_some());
    assert!(content.contains("Analysis successfully completed"));
}

#[test]
fn reports_dir_at_repository_root_is_rejected() {
    let fixture = TestFixture::new();
    fixture.create_sample_project();
    fixture.create_file("2020-01-01_00-00-00.md", "## File: old.py\nold\n\n");
    let api = MockApi::reviewing(REVIEW);
    let root = fixture.path().to_str().unwrap().to_string();

    fixture
        .command()
        .args(["--no-config", "--api", &api.url, "--reports", &root])
        .assert()
        .code(2);

    assert!(api.requests().is_empty());
}
