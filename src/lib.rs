pub mod cli;
pub mod models;
pub mod services;

use anyhow::Context;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::{info, Instrument, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use cli::Cli;
use services::{
    humanize_document, load_source, resolve_config, DetectorClient, SessionOptions,
};

const LOG_FILE_PREFIX: &str = "recycleme_";
const LOG_FILES_KEPT: usize = 30;

fn env_flag(name: &str) -> bool {
    matches!(
        std::env::var(name).as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE")
    )
}

/// Console layer on stderr, limited to `level` and above.
fn console_layer<S>(level: tracing::Level) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_filter(LevelFilter::from_level(level))
}

/// Registry with the console layer and a plain-text file layer on `file_writer`.
fn session_subscriber<W>(
    console_level: tracing::Level,
    file_writer: W,
    file_filter: EnvFilter,
) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(file_filter);

    tracing_subscriber::registry()
        .with(console_layer::<Registry>(console_level))
        .with(file_layer)
}

/// Initialize logging with one timestamped log file per session.
///
/// The console only gets `console_level` and above, on stderr, so log lines
/// stay out of the prompts. Keep the returned guard alive until exit.
pub fn init_logging(console_level: tracing::Level) -> Option<WorkerGuard> {
    if env_flag("RECYCLEME_DISABLE_FILE_LOG") {
        tracing_subscriber::registry()
            .with(console_layer::<Registry>(console_level))
            .init();
        info!("File logging disabled via RECYCLEME_DISABLE_FILE_LOG");
        return None;
    }

    let logs_dir = match std::env::var("RECYCLEME_LOG_DIR") {
        Ok(p) if !p.trim().is_empty() => PathBuf::from(p),
        _ => get_logs_dir(),
    };

    if let Err(e) = fs::create_dir_all(&logs_dir) {
        eprintln!("Failed to create logs directory: {}", e);
        tracing_subscriber::registry()
            .with(console_layer::<Registry>(console_level))
            .init();
        return None;
    }

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_filename = format!("{}{}.log", LOG_FILE_PREFIX, timestamp);

    let file_appender = rolling::never(&logs_dir, &log_filename);
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    session_subscriber(console_level, file_writer, env_filter).init();

    info!("=== recycleme started ===");
    info!("Log file: {}", logs_dir.join(&log_filename).display());
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    cleanup_old_logs(&logs_dir, LOG_FILES_KEPT);
    Some(file_guard)
}

/// Get the logs directory path
fn get_logs_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        return data_dir.join("recycleme").join("logs");
    }
    PathBuf::from("logs")
}

fn cleanup_old_logs(logs_dir: &Path, keep: usize) {
    let mut entries: Vec<_> = match fs::read_dir(logs_dir) {
        Ok(rd) => rd.filter_map(|e| e.ok()).collect(),
        Err(_) => return,
    };

    entries.retain(|e| {
        let name = e.file_name().to_string_lossy().to_string();
        name.starts_with(LOG_FILE_PREFIX) && name.ends_with(".log")
    });

    if entries.len() <= keep {
        return;
    }

    entries.sort_by_key(|e| {
        e.metadata()
            .and_then(|m| m.modified())
            .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
    });

    let remove_count = entries.len().saturating_sub(keep);
    for entry in entries.into_iter().take(remove_count) {
        let _ = fs::remove_file(entry.path());
    }
}

/// Check `file`, then rewrite its flagged sentences into a copy in the
/// current directory, talking to the user over stdin/stdout.
pub async fn run(cli: &Cli, file: &Path) -> anyhow::Result<()> {
    let session_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("session", %session_id);

    async move {
        let config = resolve_config(cli.config.as_deref())
            .map_err(anyhow::Error::msg)
            .context("Failed to load configuration")?;

        println!("Loading :D");
        let source = load_source(file)?;

        let client = DetectorClient::new(&config.detector)
            .context("Failed to set up the detector client")?;
        info!(endpoint = client.endpoint(), "detector.ready");

        let workdir = std::env::current_dir().context("Failed to read current directory")?;
        let options = SessionOptions {
            segmentation: &config.segmentation,
            workdir: &workdir,
            report_only: cli.report_only,
            color: io::stdout().is_terminal(),
        };

        let stdin = io::stdin();
        humanize_document(&client, &source, options, stdin.lock(), io::stdout()).await?;

        info!("=== recycleme finished ===");
        Ok(())
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;
    use tracing::debug;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_session_subscriber_writes_file_layer() {
        let captured = Captured::default();
        let make_writer = {
            let captured = captured.clone();
            move || captured.clone()
        };
        let subscriber =
            session_subscriber(tracing::Level::WARN, make_writer, EnvFilter::new("info"));

        tracing::subscriber::with_default(subscriber, || {
            info!(chunks = 2, "detection.started");
            debug!("below the file filter");
        });

        let text = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("detection.started"));
        assert!(text.contains("chunks=2"));
        assert!(!text.contains("below the file filter"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_cleanup_keeps_newest() {
        let dir = TempDir::new().unwrap();
        for i in 0..5 {
            fs::write(dir.path().join(format!("recycleme_2026010{}_000000.log", i)), "x").unwrap();
        }
        fs::write(dir.path().join("unrelated.txt"), "x").unwrap();

        cleanup_old_logs(dir.path(), 3);

        let logs = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".log"))
            .count();
        assert_eq!(logs, 3);
        assert!(dir.path().join("unrelated.txt").exists());
    }
}
