use destination_loadgen::{
    init_tracing, FileTransferConfig, FileTransferScenario, ImportPolicy, PerformanceScenario,
    RecordingDestination, RunOptions, ScenarioError, ScenarioState,
};
use serde_json::Value;
use std::fs;

/// Stage, send, and clean up a small file transfer run
#[test]
fn test_file_transfer_e2e() -> anyhow::Result<()> {
    init_tracing("destination_loadgen=debug,loadgen_scenario=debug");

    let staging = tempfile::TempDir::new()?;
    let config = FileTransferConfig::new("perf_test", "files", 3, 2, staging.path().join("staged"));
    let options = RunOptions::default()
        .with_seed(7)
        .with_stream_complete(true);
    let mut scenario = FileTransferScenario::new(config.clone(), options)?;

    let stream = &scenario.catalog().streams[0];
    assert_eq!(stream.import_policy, ImportPolicy::Append);
    assert!(stream.schema.is_empty());

    // Nothing to send before staging
    let mut destination = RecordingDestination::new();
    assert!(matches!(
        scenario.send(&mut destination),
        Err(ScenarioError::InvalidState(_))
    ));

    scenario.setup()?;
    assert_eq!(scenario.state(), ScenarioState::Staged);
    let staged: Vec<_> = scenario
        .staged_files()
        .into_iter()
        .map(|path| path.to_path_buf())
        .collect();
    assert_eq!(staged.len(), 3);
    for path in &staged {
        assert_eq!(fs::metadata(path)?.len(), 2 * 1_048_576);
    }

    let mut destination = RecordingDestination::new();
    let summary = scenario.send(&mut destination)?;
    assert_eq!(summary.records_sent, 3);
    assert_eq!(summary.bytes_sent, 3 * 2 * 1_048_576);
    assert_eq!(summary.expected_records_after_dedup, 3);

    let messages = destination.messages();
    assert_eq!(messages.len(), 4);
    for (index, message) in messages[..3].iter().enumerate() {
        let parsed: Value = serde_json::from_str(message.trim_end())?;
        let file = &parsed["record"]["file"];
        assert_eq!(file["file_relative_path"], config.file_name(index as u64));
        assert_eq!(file["bytes"], 2 * 1_048_576);
        assert_eq!(parsed["record"]["data"], serde_json::json!({}));
    }
    let complete: Value = serde_json::from_str(messages[3].trim_end())?;
    assert_eq!(complete["trace"]["stream_status"]["status"], "COMPLETE");

    scenario.cleanup()?;
    assert_eq!(scenario.state(), ScenarioState::Idle);
    for path in &staged {
        assert!(!path.exists());
    }

    Ok(())
}
