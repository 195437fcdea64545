//! Node quality report.

use chrono::{DateTime, Utc};
use std::fmt::{self, Write as _};

use crate::node::{ParsedNode, Protocol};

/// Latency band a node falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QualityTier {
    Under100,
    Under200,
    Under300,
    Under500,
    Slow,
}

impl QualityTier {
    /// Tier for a latency in milliseconds. Thresholds are exclusive upper
    /// bounds: 100.0 lands in `<200ms`.
    pub fn from_latency(latency_ms: f64) -> Self {
        if latency_ms < 100.0 {
            QualityTier::Under100
        } else if latency_ms < 200.0 {
            QualityTier::Under200
        } else if latency_ms < 300.0 {
            QualityTier::Under300
        } else if latency_ms < 500.0 {
            QualityTier::Under500
        } else {
            QualityTier::Slow
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QualityTier::Under100 => "<100ms",
            QualityTier::Under200 => "<200ms",
            QualityTier::Under300 => "<300ms",
            QualityTier::Under500 => "<500ms",
            QualityTier::Slow => ">=500ms",
        }
    }

    /// Star rating, 5 for the fastest tier down to 1.
    pub fn stars(&self) -> u8 {
        match self {
            QualityTier::Under100 => 5,
            QualityTier::Under200 => 4,
            QualityTier::Under300 => 3,
            QualityTier::Under500 => 2,
            QualityTier::Slow => 1,
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub protocol: Protocol,
    pub host: String,
    pub port: u16,
    pub latency_ms: f64,
    pub tier: QualityTier,
}

/// Per-node latency summary for a selected set.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityReport {
    generated_at: DateTime<Utc>,
    rows: Vec<ReportRow>,
}

impl QualityReport {
    /// Build a report from ranked nodes. Nodes without a positive latency
    /// are skipped.
    pub fn new(nodes: &[ParsedNode], generated_at: DateTime<Utc>) -> Self {
        let rows = nodes
            .iter()
            .filter_map(|node| {
                let latency_ms = node.positive_latency()?;
                Some(ReportRow {
                    protocol: node.protocol(),
                    host: node.identity.host.clone(),
                    port: node.identity.port,
                    latency_ms,
                    tier: QualityTier::from_latency(latency_ms),
                })
            })
            .collect();
        Self { generated_at, rows }
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn min_latency(&self) -> Option<f64> {
        self.rows.iter().map(|r| r.latency_ms).reduce(f64::min)
    }

    pub fn max_latency(&self) -> Option<f64> {
        self.rows.iter().map(|r| r.latency_ms).reduce(f64::max)
    }

    /// Render as a Markdown document.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Node Quality Report\n\n");
        let _ = writeln!(
            out,
            "**Updated**: {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        let _ = writeln!(out, "**Nodes**: {}\n", self.rows.len());
        if let (Some(min), Some(max)) = (self.min_latency(), self.max_latency()) {
            let _ = writeln!(out, "**Latency**: {:.2} ms to {:.2} ms\n", min, max);
        }

        out.push_str("| Protocol | Host | Port | Latency (ms) | Quality |\n");
        out.push_str("|----------|------|------|--------------|---------|\n");
        for row in &self.rows {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {:.2} | {} {} |",
                row.protocol,
                row.host,
                row.port,
                row.latency_ms,
                "⭐".repeat(row.tier.stars() as usize),
                row.tier.label()
            );
        }
        out
    }
}
