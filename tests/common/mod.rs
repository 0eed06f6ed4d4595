#![allow(dead_code)]

use std::fs;
use std::net::TcpListener;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates an `assert_cmd` Command for the codebuddy binary.
#[macro_export]
macro_rules! codebuddy {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("codebuddy"))
    };
}

/// Creates a temporary repository with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    pub fn create_dir(&self, relative_path: &str) {
        fs::create_dir_all(self.dir.path().join(relative_path))
            .expect("Failed to create directory");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `.codebuddy.toml` in the repository root.
    pub fn create_config(&self, content: &str) {
        self.create_file(".codebuddy.toml", content);
    }

    /// A small Python + Markdown project.
    pub fn create_sample_project(&self) {
        self.create_file("main.py", "print('hello world')");
        self.create_file("README.md", "# Hello\n\nA sample project.\n");
    }

    /// Report files written to `dir`.
    pub fn reports_in(dir: &Path) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut reports: Vec<PathBuf> = entries
            .map(|entry| entry.expect("Failed to read dir entry").path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
            .collect();
        reports.sort();
        reports
    }

    /// Report files written to the default `reports/` directory.
    pub fn reports(&self) -> Vec<PathBuf> {
        Self::reports_in(&self.path().join("reports"))
    }

    /// Command for this fixture, isolated from the user's configuration and `RUST_LOG`.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = codebuddy!();
        cmd.env_remove("RUST_LOG")
            .env("HOME", self.path().join(".home"))
            .env("XDG_CONFIG_HOME", self.path().join(".home/.config"))
            .arg(self.path());
        cmd
    }
}

/// Path the default configuration posts chat completions to.
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Chat completion server answering every POST with one canned response.
///
/// Owns the tokio runtime the mock server is driven from.
pub struct MockApi {
    pub url: String,
    server: MockServer,
    runtime: Runtime,
}

impl MockApi {
    /// Server answering `200` with `review` as the first choice.
    pub fn reviewing(review: &str) -> Self {
        let body = serde_json::json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": review}}]
        });
        Self::start(200, body.to_string())
    }

    pub fn start(status: u16, body: String) -> Self {
        Self::serving(CHAT_COMPLETIONS_PATH, status, body)
    }

    /// Server answering POSTs to `endpoint_path` only; anything else gets a 404.
    pub fn serving(endpoint_path: &str, status: u16, body: String) -> Self {
        let runtime = Runtime::new().expect("Failed to start tokio runtime");
        let server = runtime.block_on(async move {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path(endpoint_path))
                .respond_with(ResponseTemplate::new(status).set_body_raw(body, "application/json"))
                .mount(&server)
                .await;
            server
        });

        Self {
            url: server.uri(),
            server,
            runtime,
        }
    }

    /// Request bodies received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
            .iter()
            .map(|request| String::from_utf8_lossy(&request.body).into_owned())
            .collect()
    }

    /// Request paths received so far, in arrival order.
    pub fn paths(&self) -> Vec<String> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
            .iter()
            .map(|request| request.url.path().to_string())
            .collect()
    }
}

/// An address with nothing listening on it.
pub fn unreachable_api() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    drop(listener);
    format!("http://{addr}")
}
