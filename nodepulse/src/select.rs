//! Ranking of probed nodes.

use crate::node::ParsedNode;

/// Keep the `top_k` fastest reachable nodes, fastest first.
///
/// Nodes without a positive latency are dropped. The sort is stable, so nodes
/// with equal latency keep their relative input order. An empty result is not
/// an error at this level.
pub fn select_nodes(nodes: Vec<ParsedNode>, top_k: usize) -> Vec<ParsedNode> {
    let mut ranked: Vec<(f64, ParsedNode)> = nodes
        .into_iter()
        .filter_map(|node| node.positive_latency().map(|ms| (ms, node)))
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked.truncate(top_k);
    ranked.into_iter().map(|(_, node)| node).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeIdentity, Protocol};

    fn probed(host: &str, latency: Option<f64>) -> ParsedNode {
        let mut node = ParsedNode::new(
            NodeIdentity::new(Protocol::Vless, host, 443),
            format!("vless://id@{}:443#n", host),
        );
        if let Some(ms) = latency {
            node.latency_ms = Some(ms);
            node.reachable = ms > 0.0;
        }
        node
    }

    fn hosts(nodes: &[ParsedNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.identity.host.as_str()).collect()
    }

    #[test]
    fn test_drops_failed_and_unprobed() {
        let nodes = vec![
            probed("a", Some(-1.0)),
            probed("b", Some(50.0)),
            probed("c", None),
            probed("d", Some(0.0)),
        ];
        assert_eq!(hosts(&select_nodes(nodes, 10)), vec!["b"]);
    }

    #[test]
    fn test_sorted_ascending_and_truncated() {
        let nodes = vec![
            probed("slow", Some(900.0)),
            probed("fast", Some(12.5)),
            probed("mid", Some(300.0)),
            probed("faster", Some(3.0)),
        ];
        let selected = select_nodes(nodes, 3);
        assert_eq!(hosts(&selected), vec!["faster", "fast", "mid"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let nodes = vec![
            probed("first", Some(100.0)),
            probed("second", Some(100.0)),
            probed("third", Some(100.0)),
        ];
        assert_eq!(
            hosts(&select_nodes(nodes, 10)),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn test_monotonic_and_bounded() {
        let nodes: Vec<_> = (0..50)
            .map(|i| {
                let latency = if i % 3 == 0 {
                    -1.0
                } else {
                    ((i * 37) % 101) as f64 + 0.5
                };
                probed(&format!("h{}", i), Some(latency))
            })
            .collect();
        let positives = nodes.iter().filter(|n| n.reachable).count();

        for top_k in [0, 1, 10, 100] {
            let selected = select_nodes(nodes.clone(), top_k);
            assert!(selected.len() <= top_k.min(positives));
            assert!(selected.iter().all(|n| n.latency_ms.unwrap() > 0.0));
            assert!(selected
                .windows(2)
                .all(|w| w[0].latency_ms <= w[1].latency_ms));
        }
    }

    #[test]
    fn test_all_failed_is_empty() {
        let nodes = vec![probed("a", Some(-1.0)), probed("b", Some(-1.0))];
        assert!(select_nodes(nodes, 100).is_empty());
    }
}
