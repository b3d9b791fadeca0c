// Grouping of snapshot documents by cluster (sharded) or replica set (non-sharded).

use std::collections::BTreeMap;

use crate::models::SnapshotDocument;

/// Key for documents carrying neither `clusterName` nor `rsId`.
pub const UNKNOWN_CLUSTER: &str = "Unknown";

/// First non-empty of `clusterName`, `rsId`, else "Unknown".
pub fn cluster_key(doc: &SnapshotDocument) -> &str {
    [doc.cluster_name.as_deref(), doc.rs_id.as_deref()]
        .into_iter()
        .flatten()
        .find(|k| !k.is_empty())
        .unwrap_or(UNKNOWN_CLUSTER)
}

/// Groups keep input order; iteration over the map is in ascending key order.
pub fn group_by_cluster(docs: Vec<SnapshotDocument>) -> BTreeMap<String, Vec<SnapshotDocument>> {
    let mut clusters: BTreeMap<String, Vec<SnapshotDocument>> = BTreeMap::new();
    for doc in docs {
        let key = cluster_key(&doc).to_string();
        clusters.entry(key).or_default().push(doc);
    }
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(cluster_name: Option<&str>, rs_id: Option<&str>) -> SnapshotDocument {
        SnapshotDocument {
            cluster_name: cluster_name.map(String::from),
            rs_id: rs_id.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn cluster_name_wins_over_rs_id() {
        assert_eq!(cluster_key(&doc(Some("shard-a"), Some("rs0"))), "shard-a");
    }

    #[test]
    fn falls_back_to_rs_id_then_unknown() {
        assert_eq!(cluster_key(&doc(None, Some("rs0"))), "rs0");
        assert_eq!(cluster_key(&doc(Some(""), Some("rs0"))), "rs0");
        assert_eq!(cluster_key(&doc(None, None)), UNKNOWN_CLUSTER);
    }

    #[test]
    fn groups_are_sorted_and_keep_document_order() {
        let mut first = doc(Some("b"), None);
        first.state = Some("one".into());
        let mut second = doc(Some("b"), None);
        second.state = Some("two".into());
        let groups = group_by_cluster(vec![first, doc(None, Some("a")), second]);

        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b"]);
        let states: Vec<_> = groups["b"].iter().map(|d| d.state.as_deref()).collect();
        assert_eq!(states, [Some("one"), Some("two")]);
    }
}
