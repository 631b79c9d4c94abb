#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Greedy proximity clustering of live-tracked entities.

use safety_sim_core::{Cluster, TrackedEntity};

/// Maximum flat degree-space distance between a seed entity and its neighbours.
pub const PROXIMITY_THRESHOLD_DEGREES: f64 = 0.01;
/// Smallest group reported as a cluster.
pub const MIN_CLUSTER_SIZE: usize = 3;

/// Detector that groups nearby entities into density clusters.
///
/// Detection is greedy and input-order dependent: each unassigned entity, in
/// input order, seeds a scan over every other unassigned entity. When the
/// neighbourhood reaches [`MIN_CLUSTER_SIZE`] the whole neighbourhood is
/// claimed. The scratch buffers are reused across calls; no cluster state is.
#[derive(Debug, Default)]
pub struct ProximityClustering {
    processed: Vec<bool>,
    neighbourhood: Vec<usize>,
}

impl ProximityClustering {
    /// Creates a detector with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Detects clusters in the provided snapshot.
    ///
    /// Entities that are not absorbed into any cluster are absent from the
    /// result.
    pub fn detect<'a>(&mut self, entities: &'a [TrackedEntity]) -> Vec<Cluster<'a>> {
        self.processed.clear();
        self.processed.resize(entities.len(), false);

        let mut clusters = Vec::new();
        for (seed_index, seed) in entities.iter().enumerate() {
            if self.processed[seed_index] {
                continue;
            }

            self.collect_neighbourhood(seed, entities);
            if self.neighbourhood.len() < MIN_CLUSTER_SIZE {
                continue;
            }

            let mut members = Vec::with_capacity(self.neighbourhood.len());
            for &index in &self.neighbourhood {
                self.processed[index] = true;
                members.push(&entities[index]);
            }
            let id = format!("cluster-{}", clusters.len());
            clusters.push(Cluster::from_members(id, members));
        }

        tracing::debug!(
            entities = entities.len(),
            clusters = clusters.len(),
            "proximity clusters detected"
        );
        clusters
    }

    fn collect_neighbourhood(&mut self, seed: &TrackedEntity, entities: &[TrackedEntity]) {
        self.neighbourhood.clear();
        let origin = seed.position();
        for (index, candidate) in entities.iter().enumerate() {
            if self.processed[index] {
                continue;
            }
            if origin.planar_distance(candidate.position()) <= PROXIMITY_THRESHOLD_DEGREES {
                self.neighbourhood.push(index);
            }
        }
    }
}

/// Convenience wrapper that detects clusters with a fresh detector.
#[must_use]
pub fn detect_clusters(entities: &[TrackedEntity]) -> Vec<Cluster<'_>> {
    ProximityClustering::new().detect(entities)
}
