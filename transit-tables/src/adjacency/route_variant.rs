use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::sequence::{FullTripRow, SequenceId};

/// a route whose trips do not all follow the same station sequence, for
/// example short turns or branches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteVariant {
    pub route_id: String,
    pub station_seq_ids: BTreeSet<SequenceId>,
}

/// finds routes served by more than one distinct station sequence. this is
/// advisory only, each variant is logged and the tables are built regardless.
pub fn find_route_variants(
    full_trips: &[FullTripRow],
    trip_routes: &HashMap<String, String>,
) -> Vec<RouteVariant> {
    let mut sequences_by_route: BTreeMap<&str, BTreeSet<SequenceId>> = BTreeMap::new();
    for row in full_trips.iter() {
        if let Some(route_id) = trip_routes.get(&row.trip_id) {
            sequences_by_route
                .entry(route_id.as_str())
                .or_default()
                .insert(row.station_seq_id);
        }
    }
    let variants: Vec<RouteVariant> = sequences_by_route
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(route_id, station_seq_ids)| RouteVariant {
            route_id: route_id.to_string(),
            station_seq_ids,
        })
        .collect();
    for variant in variants.iter() {
        log::warn!(
            "route '{}' is served by {} distinct station sequences: {:?}",
            variant.route_id,
            variant.station_seq_ids.len(),
            variant.station_seq_ids
        );
    }
    variants
}
