use anyhow::Result;
use flightrank::config::{Config, EngineConfig, ReportConfig};
use flightrank::flights::{Bucket, BucketSet};
use flightrank::metrics::RunMetrics;
use flightrank::{ExecMode, Limit, RankStrategy, Runner};
use serde_json::json;
use std::fs;
use std::time::Duration;

#[test]
fn empty_object_is_the_default_config() -> Result<()> {
    let cfg = Config::from_json_str("{}")?;
    assert_eq!(cfg, Config::default());
    assert!(cfg.engine.parallel);
    assert_eq!(cfg.report.limit(), Limit::All);
    assert_eq!(cfg.report.reference_year, 2008);
    assert_eq!(cfg.report.distance_ranges.len(), 5);
    assert_eq!(cfg.report.age_ranges.len(), 4);
    Ok(())
}

#[test]
fn engine_section_drives_the_runner() -> Result<()> {
    let cfg = Config::from_json_str(r#"{ "engine": { "parallel": false, "rank_strategy": "select" } }"#)?;
    let runner = Runner::from_config(&cfg.engine);
    assert_eq!(runner.mode, ExecMode::Sequential);
    assert_eq!(runner.strategy, RankStrategy::Select);
    assert_eq!(cfg.engine.merge_fanout, None);
    assert_eq!(
        cfg.engine,
        EngineConfig {
            parallel: false,
            rank_strategy: RankStrategy::Select,
            ..Default::default()
        }
    );
    Ok(())
}

#[test]
fn negative_limit_means_no_rows() -> Result<()> {
    let cfg = Config::from_json_str(r#"{ "report": { "limit": -2 } }"#)?;
    assert_eq!(cfg.report.limit(), Limit::Top(0));
    Ok(())
}

#[test]
fn unknown_fields_are_rejected() -> Result<()> {
    assert!(Config::from_json_str(r#"{ "engine": { "paralel": true } }"#).is_err());
    assert!(Config::from_json_str(r#"{ "reports": {} }"#).is_err());
    assert!(Config::from_json_str(r#"{ "engine": { "rank_strategy": "heap" } }"#).is_err());
    Ok(())
}

#[test]
fn overlapping_or_empty_ranges_are_rejected() -> Result<()> {
    let overlap = Config::from_json_str(r#"{ "report": { "distance_ranges": [[0, 600], [500, 1000]] } }"#);
    assert!(overlap.is_err());
    let empty = Config::from_json_str(r#"{ "report": { "age_ranges": [[10, 10]] } }"#);
    assert!(empty.is_err());

    let err = BucketSet::new(vec![Bucket::new(0, None), Bucket::new(100, Some(200))])
        .err()
        .map(|e| e.to_string())
        .unwrap_or_default();
    assert!(err.starts_with("overlapping buckets"), "unexpected error: {err}");
    Ok(())
}

#[test]
fn config_file_round_trip() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let path = tmp.path().join("flightrank.json");
    let cfg = Config {
        engine: EngineConfig {
            threads: Some(2),
            shards: Some(16),
            ..Default::default()
        },
        report: ReportConfig {
            limit: Some(5),
            distance_ranges: BucketSet::from_edges(&[0, 1000]),
            ..Default::default()
        },
    };
    fs::write(&path, serde_json::to_string_pretty(&cfg)?)?;

    assert_eq!(Config::from_json_file(&path)?, cfg);
    assert!(Config::from_json_file(tmp.path().join("missing.json")).is_err());
    Ok(())
}

#[test]
fn buckets_serialize_as_pairs() -> Result<()> {
    assert_eq!(serde_json::to_value(Bucket::new(500, Some(1000)))?, json!([500, 1000]));
    assert_eq!(serde_json::to_value(Bucket::new(2000, None))?, json!([2000, null]));
    let set: BucketSet = serde_json::from_value(json!([[500, 1000], [0, 500]]))?;
    assert_eq!(set.iter().next(), Some(&Bucket::new(0, Some(500))));
    Ok(())
}

#[test]
fn bucket_lookup() -> Result<()> {
    let set = BucketSet::from_edges(&[1000, 0, 500, 500]);
    assert_eq!(set.len(), 3);
    assert_eq!(set.locate(0), Some(Bucket::new(0, Some(500))));
    assert_eq!(set.locate(499), Some(Bucket::new(0, Some(500))));
    assert_eq!(set.locate(500), Some(Bucket::new(500, Some(1000))));
    assert_eq!(set.locate(50_000), Some(Bucket::new(1000, None)));

    let gappy = BucketSet::new(vec![Bucket::new(100, Some(200)), Bucket::new(300, Some(400))])?;
    assert_eq!(gappy.locate(50), None);
    assert_eq!(gappy.locate(200), None);
    assert_eq!(gappy.locate(250), None);
    assert_eq!(gappy.locate(399), Some(Bucket::new(300, Some(400))));
    assert_eq!(gappy.locate(400), None);
    assert!(BucketSet::default().locate(1).is_none());
    Ok(())
}

#[test]
fn run_metrics_as_json() -> Result<()> {
    let mut m = RunMetrics {
        records_seen: 10,
        records_included: 7,
        groups: 3,
        shards: 2,
        elapsed: None,
    };
    assert_eq!(m.records_filtered(), 3);
    assert_eq!(
        m.to_json(),
        json!({ "records_seen": 10, "records_included": 7, "groups": 3, "shards": 2 })
    );

    let inconsistent = RunMetrics {
        records_seen: 2,
        records_included: 5,
        ..Default::default()
    };
    assert_eq!(inconsistent.records_filtered(), 0);

    m.elapsed = Some(Duration::from_millis(42));
    assert_eq!(m.to_json()["elapsed"], json!(42));
    Ok(())
}
