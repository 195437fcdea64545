//! End-to-end pipeline runs against mock probers and local listeners.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use nodepulse::bundle::{decode_bundle, BundleDecode, QualityTier};
use nodepulse::config::PipelineConfig;
use nodepulse::log::MemoryLogger;
use nodepulse::node::ParsedNode;
use nodepulse::pipeline::{PipelineError, PipelineRunner};
use nodepulse::probe::{NodeProber, ProbeResult, Prober};
use nodepulse::storage::{
    ArtifactStore, NodeSet, FILTERED_NODES_FILE, PROCESSED_NODES_FILE, RAW_NODES_FILE,
    REPORT_FILE, SUBSCRIPTION_FILE, TESTED_NODES_FILE,
};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Returns a fixed latency per canonical key; unknown keys fail.
struct FixedProber {
    latencies: HashMap<String, f64>,
}

impl FixedProber {
    fn new(entries: &[(&str, f64)]) -> Self {
        Self {
            latencies: entries
                .iter()
                .map(|(key, ms)| (key.to_string(), *ms))
                .collect(),
        }
    }
}

impl Prober for FixedProber {
    async fn probe(&self, node: &ParsedNode) -> ProbeResult {
        match self.latencies.get(node.key.as_str()) {
            Some(ms) if *ms > 0.0 => ProbeResult::Reachable { latency_ms: *ms },
            _ => ProbeResult::Unreachable,
        }
    }
}

fn scenario_lines() -> Vec<String> {
    vec![
        "vmess://u@1.2.3.4:443?x".to_string(),
        "trojan://u@5.6.7.8:443?y".to_string(),
        "not-a-node".to_string(),
    ]
}

const ALL_ARTIFACTS: [&str; 6] = [
    RAW_NODES_FILE,
    PROCESSED_NODES_FILE,
    TESTED_NODES_FILE,
    FILTERED_NODES_FILE,
    SUBSCRIPTION_FILE,
    REPORT_FILE,
];

#[tokio::test]
async fn test_end_to_end_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(temp_dir.path());
    let logger = Arc::new(MemoryLogger::new());
    let prober = FixedProber::new(&[("vmess://1.2.3.4:443", 120.0), ("trojan://5.6.7.8:443", -1.0)]);
    let runner = PipelineRunner::new(prober, PipelineConfig::default(), store.clone(), logger.clone());

    let output = runner.execute(scenario_lines()).await.unwrap();

    let keys: Vec<_> = output.processed.iter().map(|n| n.key.as_str()).collect();
    assert_eq!(keys, vec!["vmess://1.2.3.4:443", "trojan://5.6.7.8:443"]);
    let warnings = logger.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("not-a-node"));

    assert_eq!(output.tested[0].latency_ms, Some(120.0));
    assert_eq!(output.tested[1].latency_ms, Some(-1.0));

    assert_eq!(output.assembly.nodes.len(), 1);
    assert_eq!(output.assembly.nodes[0].key.as_str(), "vmess://1.2.3.4:443");
    assert_eq!(
        decode_bundle(&output.assembly.bundle),
        BundleDecode::Decoded("vmess://u@1.2.3.4:443?x".to_string())
    );
    let rows = output.assembly.report.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].tier, QualityTier::Under200);
    assert_eq!(rows[0].tier.label(), "<200ms");

    // execute() alone never writes.
    for name in ALL_ARTIFACTS {
        assert!(!store.path(name).exists(), "{} written early", name);
    }
}

#[tokio::test]
async fn test_run_persists_every_artifact() {
    let temp_dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(temp_dir.path());
    let prober = FixedProber::new(&[("vmess://1.2.3.4:443", 120.0)]);
    let runner = PipelineRunner::new(
        prober,
        PipelineConfig::default(),
        store.clone(),
        Arc::new(MemoryLogger::new()),
    );

    let summary = runner.run(scenario_lines()).await.unwrap();

    assert_eq!(summary.descriptors, 3);
    assert_eq!(summary.unique_nodes, 2);
    assert_eq!(summary.probed, 2);
    assert_eq!(summary.reachable, 1);
    assert_eq!(summary.selected, 1);
    for name in ALL_ARTIFACTS {
        assert!(store.path(name).exists(), "{} missing", name);
    }

    let filtered = store.read_nodes(NodeSet::Filtered).await.unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].latency_ms, Some(120.0));

    let tested = store.read_nodes(NodeSet::Tested).await.unwrap();
    assert_eq!(tested.len(), 2);

    let report = store.read_text(REPORT_FILE).await.unwrap();
    assert!(report.contains("| vmess | 1.2.3.4 | 443 | 120.00 |"));
    assert!(report.contains("<200ms"));
}

#[tokio::test]
async fn test_empty_survivors_write_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(temp_dir.path());
    let logger = Arc::new(MemoryLogger::new());
    let runner = PipelineRunner::new(
        FixedProber::new(&[]),
        PipelineConfig::default(),
        store.clone(),
        logger.clone(),
    );

    let result = runner.run(scenario_lines()).await;

    assert!(matches!(result, Err(PipelineError::NoSurvivors)));
    assert!(!logger.errors().is_empty());
    for name in ALL_ARTIFACTS {
        assert!(!store.path(name).exists(), "{} written on failure", name);
    }
}

#[tokio::test]
async fn test_failed_run_keeps_previous_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(temp_dir.path());
    store.write_bundle("previous").await.unwrap();

    let runner = PipelineRunner::new(
        FixedProber::new(&[]),
        PipelineConfig::default(),
        store.clone(),
        Arc::new(MemoryLogger::new()),
    );
    assert!(runner.run(scenario_lines()).await.is_err());

    assert_eq!(store.read_text(SUBSCRIPTION_FILE).await.unwrap(), "previous");
}

#[tokio::test]
async fn test_no_descriptors() {
    let temp_dir = TempDir::new().unwrap();
    let runner = PipelineRunner::new(
        FixedProber::new(&[]),
        PipelineConfig::default(),
        ArtifactStore::new(temp_dir.path()),
        Arc::new(MemoryLogger::new()),
    );

    let result = runner.run(Vec::new()).await;
    assert!(matches!(result, Err(PipelineError::NoDescriptors)));
}

#[tokio::test]
async fn test_real_prober_against_local_listeners() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let open_port = listener.local_addr().unwrap().port();
    let closed_port = {
        let closed = TcpListener::bind("127.0.0.1:0").await.unwrap();
        closed.local_addr().unwrap().port()
    };

    let lines = vec![
        format!("trojan://pw@127.0.0.1:{}?sni=a", open_port),
        format!("vless://id@127.0.0.1:{}#b", closed_port),
    ];

    let temp_dir = TempDir::new().unwrap();
    let logger = Arc::new(MemoryLogger::new());
    let config = PipelineConfig::new().with_probe_timeout(Duration::from_secs(2));
    let prober = NodeProber::new(&config, logger.clone());
    let runner = PipelineRunner::new(prober, config, ArtifactStore::new(temp_dir.path()), logger);

    let output = runner.execute(lines).await.unwrap();

    assert!(output.tested[0].reachable);
    assert!(!output.tested[1].reachable);
    assert_eq!(output.assembly.nodes.len(), 1);
    assert_eq!(output.assembly.nodes[0].identity.port, open_port);
}
