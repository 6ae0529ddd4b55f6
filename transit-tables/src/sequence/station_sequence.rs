use serde::{Deserialize, Serialize};

use crate::TablesError;

/// identifier of a distinct [`StationSequence`], assigned in discovery order
/// starting from 0.
pub type SequenceId = usize;

/// the ordered stations visited by a trip. two sequences are the same only when
/// every station matches in order, so sequences are compared and hashed on the
/// full list rather than on a joined string.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct StationSequence(Vec<String>);

impl StationSequence {
    pub fn new(stations: Vec<String>) -> StationSequence {
        StationSequence(stations)
    }

    pub fn stations(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// consecutive (from, to) station pairs along the sequence.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }

    /// joins the station ids for output. fails if a station id contains the
    /// delimiter, since the joined value could not be split back.
    pub fn join(&self, delimiter: &str) -> Result<String, TablesError> {
        if delimiter.is_empty() {
            return Err(TablesError::Configuration(String::from(
                "station sequence delimiter must not be empty",
            )));
        }
        if let Some(station) = self.0.iter().find(|s| s.contains(delimiter)) {
            return Err(TablesError::InvalidData(format!(
                "station id '{station}' contains the sequence delimiter '{delimiter}'"
            )));
        }
        Ok(self.0.join(delimiter))
    }

    /// inverse of [`StationSequence::join`]. an empty string is the empty
    /// sequence of a trip without stop events.
    pub fn split(joined: &str, delimiter: &str) -> StationSequence {
        if joined.is_empty() {
            return StationSequence::default();
        }
        StationSequence(joined.split(delimiter).map(String::from).collect())
    }
}

impl<S: Into<String>> FromIterator<S> for StationSequence {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        StationSequence(iter.into_iter().map(Into::into).collect())
    }
}
