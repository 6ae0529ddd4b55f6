use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sequence::{SequenceId, StationSequence};

/// assigns ids to distinct station sequences in the order they are first seen.
///
/// the id of a sequence is its position in `sequences` and never changes once
/// assigned. only the list is serialized; the reverse lookup is rebuilt when a
/// checkpoint is loaded.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(from = "Vec<StationSequence>", into = "Vec<StationSequence>")]
pub struct SequenceRegistry {
    sequences: Vec<StationSequence>,
    lookup: HashMap<StationSequence, SequenceId>,
}

impl SequenceRegistry {
    /// returns the id of this sequence, assigning the next id if it is new.
    pub fn assign(&mut self, sequence: StationSequence) -> SequenceId {
        if let Some(id) = self.lookup.get(&sequence) {
            return *id;
        }
        let id = self.sequences.len();
        self.lookup.insert(sequence.clone(), id);
        self.sequences.push(sequence);
        id
    }

    pub fn get(&self, id: SequenceId) -> Option<&StationSequence> {
        self.sequences.get(id)
    }

    pub fn id_of(&self, sequence: &StationSequence) -> Option<SequenceId> {
        self.lookup.get(sequence).copied()
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// sequences with their ids, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (SequenceId, &StationSequence)> {
        self.sequences.iter().enumerate()
    }
}

impl From<Vec<StationSequence>> for SequenceRegistry {
    fn from(sequences: Vec<StationSequence>) -> Self {
        let mut lookup = HashMap::with_capacity(sequences.len());
        for (id, sequence) in sequences.iter().enumerate() {
            lookup.entry(sequence.clone()).or_insert(id);
        }
        SequenceRegistry { sequences, lookup }
    }
}

impl From<SequenceRegistry> for Vec<StationSequence> {
    fn from(registry: SequenceRegistry) -> Self {
        registry.sequences
    }
}

impl PartialEq for SequenceRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.sequences == other.sequences
    }
}

#[cfg(test)]
mod test {
    use super::SequenceRegistry;
    use crate::sequence::StationSequence;

    fn seq(stations: &[&str]) -> StationSequence {
        stations.iter().copied().collect()
    }

    #[test]
    fn test_ids_are_assigned_in_discovery_order() {
        let mut registry = SequenceRegistry::default();
        assert_eq!(registry.assign(seq(&["A", "B", "C"])), 0);
        assert_eq!(registry.assign(seq(&["C", "D"])), 1);
        assert_eq!(registry.assign(seq(&["A", "B", "C"])), 0);
        // prefix and reordering are distinct sequences
        assert_eq!(registry.assign(seq(&["A", "B"])), 2);
        assert_eq!(registry.assign(seq(&["C", "B", "A"])), 3);
        assert_eq!(registry.assign(seq(&[])), 4);
        assert_eq!(registry.assign(seq(&[])), 4);
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_lookup_survives_serialization() {
        let mut registry = SequenceRegistry::default();
        registry.assign(seq(&["A", "B"]));
        registry.assign(seq(&["B", "C"]));
        let json = serde_json::to_string(&registry).expect("serialize");
        assert_eq!(json, r#"[["A","B"],["B","C"]]"#);
        let mut restored: SequenceRegistry = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, registry);
        assert_eq!(restored.id_of(&seq(&["B", "C"])), Some(1));
        assert_eq!(restored.assign(seq(&["A", "B"])), 0);
        assert_eq!(restored.assign(seq(&["C", "D"])), 2);
    }
}
