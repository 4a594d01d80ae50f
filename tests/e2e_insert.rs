use destination_loadgen::{
    init_tracing, FieldSpec, FieldType, ImportPolicy, InsertConfig, InsertScenario,
    PerformanceScenario, RunOptions, ScenarioConfig, ScenarioError, ScenarioState,
    WriterDestination,
};
use serde_json::Value;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Insert run with duplicates into a file, then check the destination's view
#[test]
fn test_dedupe_insert_to_file_e2e() -> anyhow::Result<()> {
    init_tracing("destination_loadgen=debug,loadgen_scenario=debug");

    let temp_dir = tempfile::TempDir::new()?;
    let output_path = temp_dir.path().join("users.jsonl");

    let config = InsertConfig::new(
        "perf_test",
        "users",
        FieldSpec::new("id", FieldType::BigInt, 9_876_543_210_i64),
        20_000,
    )
    .with_columns(vec![
        FieldSpec::new("name", FieldType::Text, "alice"),
        FieldSpec::new("score", FieldType::Double, 1.5),
        FieldSpec::new("active", FieldType::Bool, true),
    ])
    .with_dedup(true)
    .with_duplicate_chance(0.1);
    let options = RunOptions::default().with_flush_every_records(1000);

    let mut scenario = InsertScenario::new(config, options)?;
    assert_eq!(
        scenario.catalog().streams[0].import_policy,
        ImportPolicy::dedupe_on("id")
    );

    let mut destination = WriterDestination::new(File::create(&output_path)?);
    let summary = scenario.send(&mut destination)?;
    drop(destination);

    let mut records = 0u64;
    let mut ids = HashSet::new();
    let mut previous = 0u64;
    for line in BufReader::new(File::open(&output_path)?).lines() {
        let line = line?;
        let message: Value = serde_json::from_str(&line)?;
        assert_eq!(message["type"], "RECORD");
        assert_eq!(message["record"]["stream"], "users");

        let data = &message["record"]["data"];
        let id = data["id"].as_u64().expect("id should be an integer");
        assert_eq!(data["name"], "alice");
        assert_eq!(data["active"], true);
        // Ids ascend; a duplicate immediately follows its original
        assert!(id == previous || id == previous + 1);
        previous = id;

        ids.insert(id);
        records += 1;
    }

    assert_eq!(records, summary.records_sent);
    assert_eq!(ids.len() as u64, summary.expected_records_after_dedup);
    assert_eq!(summary.expected_records_after_dedup, 20_000);
    assert!(summary.duplicates() > 1_500 && summary.duplicates() < 2_500);
    assert_eq!(std::fs::metadata(&output_path)?.len(), summary.bytes_sent);
    assert_eq!(scenario.summary(), Some(summary));

    Ok(())
}

/// Append runs expect every sent record, duplicates included
#[test]
fn test_append_insert_from_yaml_e2e() -> anyhow::Result<()> {
    init_tracing("destination_loadgen=debug,loadgen_scenario=debug");

    let config = ScenarioConfig::from_yaml(
        r#"
seed: 3
flush_every_records: 64
scenario:
  type: single_stream_insert
  namespace: perf_test
  stream: events
  id_column: { name: event_id, type: int, sample: 1357913579 }
  columns:
    - { name: kind, type: string, sample: click }
  records_to_insert: 500
  duplicate_chance: 0.5
"#,
    )?;
    let mut scenario = config.build()?;
    assert_eq!(scenario.state(), ScenarioState::Idle);

    let mut destination = WriterDestination::new(Vec::new());
    let summary = scenario.send(&mut destination)?;

    let output = String::from_utf8(destination.into_inner())?;
    assert_eq!(output.lines().count() as u64, summary.records_sent);
    assert_eq!(output.len() as u64, summary.bytes_sent);
    assert_eq!(summary.expected_records_after_dedup, summary.records_sent);
    assert!(summary.records_sent > 500);

    Ok(())
}

#[test]
fn test_ambiguous_id_sample_rejected_e2e() {
    init_tracing("destination_loadgen=debug");

    // The id sample also appears inside another column's value
    let config = InsertConfig::new(
        "perf_test",
        "users",
        FieldSpec::new("id", FieldType::Int, 42_i64),
        10,
    )
    .with_columns(vec![FieldSpec::new("name", FieldType::Text, "agent 42")]);

    let result = InsertScenario::new(config, RunOptions::default());
    assert!(matches!(
        result,
        Err(ScenarioError::TemplateConstruction { occurrences, .. }) if occurrences >= 2
    ));
}
