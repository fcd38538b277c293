//! End-to-end tests for the `trading-bot` binary
//!
//! Each test runs the compiled binary with its own temporary config and log
//! directories. Exchange traffic goes to 127.0.0.1 only:
//!
//! ```bash
//! cargo test -p trading-bot --test cli
//! ```

use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::process::{Command, Output};
use std::thread;

use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

const API_KEY: &str = "testkey0123456789abcdefwxyz";
const API_SECRET: &str = "testsecret-never-logged-9f8e7d";

const FILLED_ORDER: &str = r#"{"orderId":4052157210,"symbol":"BTCUSDT","status":"FILLED","clientOrderId":"x-e2e","price":"0","avgPrice":"43120.50","origQty":"0.001","executedQty":"0.001","type":"MARKET","side":"BUY","updateTime":1704067200000}"#;

/// Working directory with `config/` and `logs/` for one run.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new(base_url: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("config")).unwrap();
        fs::write(
            dir.path().join("config/default.toml"),
            format!(
                "[exchange]\nbase_url = \"{}\"\ntimeout_ms = 2000\nping_attempts = 1\n",
                base_url
            ),
        )
        .unwrap();
        Self { dir }
    }

    fn log_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("logs")
    }

    fn command(&self, with_credentials: bool) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_trading-bot"));
        cmd.current_dir(self.dir.path())
            .env("TRADING_BOT_CONFIG_DIR", self.dir.path().join("config"))
            .env("LOG_DIR", self.log_dir())
            .env_remove("LOG_LEVEL")
            .env_remove("LOG_FORMAT")
            .env_remove("RUST_LOG")
            .env_remove("BINANCE_API_KEY")
            .env_remove("BINANCE_API_SECRET");
        if with_credentials {
            cmd.env("BINANCE_API_KEY", API_KEY)
                .env("BINANCE_API_SECRET", API_SECRET);
        }
        cmd
    }

    fn run(&self, with_credentials: bool, args: &[&str]) -> Output {
        self.command(with_credentials).args(args).output().unwrap()
    }

    /// Contents of the single session log written by the run.
    fn session_log(&self) -> String {
        let entries: Vec<_> = fs::read_dir(self.log_dir())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(entries.len(), 1, "expected one session log, got {:?}", entries);
        assert_session_name(&entries[0]);
        fs::read_to_string(&entries[0]).unwrap()
    }
}

fn assert_session_name(path: &Path) {
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("trading_bot_"), "unexpected log name {}", name);
    assert!(name.ends_with(".log"), "unexpected log name {}", name);
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Answer one HTTP request with `body`; returns the base URL and the request text.
fn canned_server(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            let n = stream.read(&mut chunk).unwrap();
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            assert!(n > 0, "client closed early");
        };
        let head = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
        let content_length = head
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        while buf.len() < header_end + content_length {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        let reply = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        stream.write_all(reply.as_bytes()).unwrap();
        String::from_utf8_lossy(&buf).to_string()
    });

    (base_url, handle)
}

// ============================================================================
// Argument Handling
// ============================================================================

#[test]
fn test_version_flag() {
    let sandbox = Sandbox::new("http://127.0.0.1:1");
    let output = sandbox.run(false, &["--version"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).trim(), "Trading Bot v1.0.0");
}

#[test]
fn test_help_flag() {
    let sandbox = Sandbox::new("http://127.0.0.1:1");
    let output = sandbox.run(false, &["--help"]);

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("--symbol"));
    assert!(text.contains("--test-connection"));
    assert!(text.contains("BINANCE_API_KEY"));
}

#[test]
fn test_missing_arguments_exit_one() {
    let sandbox = Sandbox::new("http://127.0.0.1:1");
    let output = sandbox.run(true, &["--symbol", "BTCUSDT"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!sandbox.log_dir().exists());
}

// ============================================================================
// Failure Paths
// ============================================================================

#[test]
fn test_missing_credentials_is_configuration_error() {
    let sandbox = Sandbox::new("http://127.0.0.1:1");
    let output = sandbox.run(false, &["-s", "BTCUSDT", "-d", "BUY", "-t", "MARKET", "-q", "0.001"]);

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("📝 Logging to:"));
    assert!(text.contains("✗ Configuration Error: API credentials not found"));

    let log = sandbox.session_log();
    assert!(log.contains("TRADING BOT SESSION STARTED"));
    assert!(log.contains("ConfigurationError"));
}

#[test]
fn test_log_level_flag_replaces_bad_environment_level() {
    let sandbox = Sandbox::new("http://127.0.0.1:1");
    let output = sandbox
        .command(false)
        .env("LOG_LEVEL", "verbose")
        .args(["--test-connection", "--log-level", "DEBUG"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("✗ Configuration Error: API credentials not found"), "{}", text);
    assert!(sandbox.session_log().contains("DEBUG"));
}

#[test]
fn test_bad_environment_level_reported_on_stdout() {
    let sandbox = Sandbox::new("http://127.0.0.1:1");
    let output = sandbox
        .command(true)
        .env("LOG_LEVEL", "verbose")
        .arg("--test-connection")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("✗ Configuration Error:"), "{}", text);
    assert!(text.contains("unknown level 'VERBOSE'"), "{}", text);
    assert!(!String::from_utf8_lossy(&output.stderr).contains("✗"));
    assert!(!sandbox.log_dir().exists());
}

#[test]
fn test_limit_without_price_fails_validation_offline() {
    let sandbox = Sandbox::new("http://127.0.0.1:1");
    let output = sandbox.run(true, &["-s", "BTCUSDT", "-d", "BUY", "-t", "LIMIT", "-q", "0.001"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("✗ Validation Error: price: price required for LIMIT orders"));

    let log = sandbox.session_log();
    assert!(log.contains("ValidationError"));
    assert!(!log.contains("Order pipeline: Validated -> Signed"));
}

#[test]
fn test_connection_refused_is_transport_error() {
    let sandbox = Sandbox::new("http://127.0.0.1:1");
    let output = sandbox.run(true, &["-s", "BTCUSDT", "-d", "BUY", "-t", "MARKET", "-q", "0.001"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("✗ Network Error:"));

    let log = sandbox.session_log();
    assert!(log.contains("TransportError"));
    assert!(log.contains("test****wxyz"));
    assert!(!log.contains(API_SECRET));
    assert!(!log.contains(API_KEY));
}

#[test]
fn test_api_rejection_is_reported() {
    let (base_url, server) =
        canned_server("400 Bad Request", r#"{"code":-1121,"msg":"Invalid symbol."}"#);
    let sandbox = Sandbox::new(&base_url);
    let output = sandbox.run(true, &["-s", "NOPEUSDT", "-d", "SELL", "-t", "MARKET", "-q", "1"]);
    server.join().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("✗ API Error: API error [-1121]: Invalid symbol."));
    assert!(sandbox.session_log().contains("ApiError"));
}

// ============================================================================
// Success Path
// ============================================================================

#[test]
fn test_market_order_succeeds() {
    let (base_url, server) = canned_server("200 OK", FILLED_ORDER);
    let sandbox = Sandbox::new(&base_url);
    let output = sandbox.run(
        true,
        &["-s", "btcusdt", "-d", "buy", "-t", "market", "-q", "0.001", "--log-level", "DEBUG"],
    );
    let request = server.join().unwrap();

    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout(&output));
    let text = stdout(&output);
    assert!(text.contains("ORDER REQUEST SUMMARY"));
    assert!(text.contains("Price:       MARKET PRICE"));
    assert!(text.contains("Order ID:          4052157210"));
    assert!(text.contains("✓ ORDER FILLED SUCCESSFULLY"));

    assert!(request.starts_with("POST /fapi/v1/order HTTP/1.1"));
    assert!(request.to_lowercase().contains(&format!("x-mbx-apikey: {}", API_KEY.to_lowercase())));
    assert!(request.contains("symbol=BTCUSDT&side=BUY&type=MARKET&quantity=0.001&recvWindow=5000&timestamp="));

    let log = sandbox.session_log();
    assert!(log.contains("Order pipeline: Sent -> Succeeded"));
    assert!(log.contains("DEBUG"));
    assert!(!log.contains(API_SECRET));
}
