use crate::core::{bounding_box::calculate_bounding_box, distance::haversine_distance};
use crate::models::{Address, BoundingBox, GeoPoint, NearbyAddress};

/// Default cap on the number of results a nearby search returns
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Result of a proximity search
#[derive(Debug)]
pub struct NearbyResult {
    pub addresses: Vec<NearbyAddress>,
    pub total_candidates: usize,
}

/// Two-stage proximity filter
///
/// # Pipeline Stages
/// 1. Bounding box pre-filter (cheap, admits corner false positives)
/// 2. Exact haversine check against the radius
///
/// Survivors are annotated with their distance and sorted nearest first.
#[derive(Debug, Clone)]
pub struct ProximityFilter {
    max_results: usize,
}

impl Default for ProximityFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESULTS)
    }
}

impl ProximityFilter {
    pub fn new(max_results: usize) -> Self {
        Self { max_results: max_results.max(1) }
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Find the candidates within `radius_km` of `center`
    ///
    /// # Arguments
    /// * `center` - Search center
    /// * `radius_km` - Non-negative radius in kilometers
    /// * `candidates` - Addresses to consider, usually already narrowed by the store
    /// * `limit` - Maximum number of results, capped at `max_results`
    pub fn find_nearby(
        &self,
        center: GeoPoint,
        radius_km: f64,
        candidates: Vec<Address>,
        limit: usize,
    ) -> NearbyResult {
        let bounding_box = calculate_bounding_box(center, radius_km);
        self.find_nearby_within(center, radius_km, &bounding_box, candidates, limit)
    }

    /// Like [`find_nearby`](Self::find_nearby), reusing a box the caller already built
    ///
    /// `bounding_box` must come from `calculate_bounding_box(center, radius_km)`.
    pub fn find_nearby_within(
        &self,
        center: GeoPoint,
        radius_km: f64,
        bounding_box: &BoundingBox,
        candidates: Vec<Address>,
        limit: usize,
    ) -> NearbyResult {
        let total_candidates = candidates.len();

        let mut addresses: Vec<NearbyAddress> = candidates
            .into_iter()
            .filter_map(|address| {
                let Some(location) = address.location() else {
                    tracing::warn!("Skipping address #{} with invalid coordinates", address.id);
                    return None;
                };

                // Stage 1: bounding box
                if !bounding_box.contains(&location) {
                    return None;
                }

                // Stage 2: exact distance
                let distance_km = haversine_distance(center, location);
                (distance_km <= radius_km).then(|| NearbyAddress {
                    id: address.id,
                    latitude: address.latitude,
                    longitude: address.longitude,
                    distance_km,
                })
            })
            .collect();

        // Nearest first, id breaks ties so results are stable
        addresses.sort_by(|a, b| {
            a.distance_km
                .total_cmp(&b.distance_km)
                .then_with(|| a.id.cmp(&b.id))
        });

        addresses.truncate(limit.min(self.max_results));

        tracing::debug!(
            "Nearby search kept {} of {} candidates within {}km",
            addresses.len(),
            total_candidates,
            radius_km
        );

        NearbyResult {
            addresses,
            total_candidates,
        }
    }
}
