use csync_domain::config::LogConfig;
use csync_logger::Logger;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn from_config_writes_json_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");
    let config = LogConfig { level: "debug".into(), directory: Some(log_dir.clone()), json: true };

    let logger = Logger::from_config("csync-from-config", &config)?;
    assert!(logger.writes_file());

    tracing::info!(pages = 3, "fetch finished");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let content = fs::read_to_string(log_file)?;
    let first = content.lines().next().expect("at least one line");
    let parsed: serde_json::Value = serde_json::from_str(first)?;
    assert_eq!(parsed["fields"]["message"], "fetch finished");

    Ok(())
}
