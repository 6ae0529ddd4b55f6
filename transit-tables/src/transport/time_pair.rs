use std::{cmp::Ordering, fmt::Display, iter::Peekable, str::Chars, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{model::gtfs_time, TablesError};

/// a scheduled (departure, arrival) pair for one hop between stations.
///
/// pairs order by departure, then arrival. each time is compared by its
/// parsed number of seconds first and by its text second, so `9:00:00` sorts
/// before `10:00:00`, and times that do not parse sort after all times that do.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimePair {
    pub departure: String,
    pub arrival: String,
}

impl TimePair {
    pub fn new(departure: &str, arrival: &str) -> TimePair {
        TimePair {
            departure: departure.to_string(),
            arrival: arrival.to_string(),
        }
    }
}

fn time_sort_key(time: &str) -> (bool, u32) {
    match gtfs_time::parse_seconds(time) {
        Some(seconds) => (false, seconds),
        None => (true, 0),
    }
}

impl Ord for TimePair {
    fn cmp(&self, other: &Self) -> Ordering {
        time_sort_key(&self.departure)
            .cmp(&time_sort_key(&other.departure))
            .then_with(|| self.departure.cmp(&other.departure))
            .then_with(|| time_sort_key(&self.arrival).cmp(&time_sort_key(&other.arrival)))
            .then_with(|| self.arrival.cmp(&other.arrival))
    }
}

impl PartialOrd for TimePair {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// the `departure_arrival_time` column of the transport table, written as a
/// list of tuple literals: `[('08:00:00', '08:05:00'), ('08:30:00', '08:35:00')]`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct TimePairList(pub Vec<TimePair>);

impl Display for TimePairList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (idx, pair) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(
                f,
                "({}, {})",
                quoted(&pair.departure),
                quoted(&pair.arrival)
            )?;
        }
        write!(f, "]")
    }
}

fn quoted(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

impl FromStr for TimePairList {
    type Err = TablesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = LiteralParser {
            chars: s.chars().peekable(),
            source: s,
        };
        let mut pairs = vec![];
        parser.expect('[')?;
        if !parser.eat(']') {
            loop {
                parser.expect('(')?;
                let departure = parser.string()?;
                parser.expect(',')?;
                let arrival = parser.string()?;
                parser.eat(',');
                parser.expect(')')?;
                pairs.push(TimePair {
                    departure,
                    arrival,
                });
                if parser.eat(']') {
                    break;
                }
                parser.expect(',')?;
                if parser.eat(']') {
                    break;
                }
            }
        }
        parser.finish()?;
        Ok(TimePairList(pairs))
    }
}

impl TryFrom<String> for TimePairList {
    type Error = TablesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimePairList> for String {
    fn from(list: TimePairList) -> Self {
        list.to_string()
    }
}

/// reads the subset of the list literal grammar written by [`TimePairList`]:
/// lists of 2-tuples of quoted strings, either quote style, with backslash
/// escapes.
struct LiteralParser<'a> {
    chars: Peekable<Chars<'a>>,
    source: &'a str,
}

impl LiteralParser<'_> {
    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        self.chars.next_if_eq(&expected).is_some()
    }

    fn expect(&mut self, expected: char) -> Result<(), TablesError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{expected}'")))
        }
    }

    fn string(&mut self) -> Result<String, TablesError> {
        self.skip_whitespace();
        let quote = match self.chars.next() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(self.error("expected a quoted time")),
        };
        let mut value = String::new();
        loop {
            match self.chars.next() {
                Some('\\') => match self.chars.next() {
                    Some(c) => value.push(c),
                    None => return Err(self.error("unterminated escape")),
                },
                Some(c) if c == quote => return Ok(value),
                Some(c) => value.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn finish(&mut self) -> Result<(), TablesError> {
        self.skip_whitespace();
        match self.chars.peek() {
            None => Ok(()),
            Some(_) => Err(self.error("unexpected trailing characters")),
        }
    }

    fn error(&self, msg: &str) -> TablesError {
        TablesError::InvalidData(format!(
            "invalid departure_arrival_time value \"{}\": {msg}",
            self.source
        ))
    }
}

#[cfg(test)]
mod test {
    use super::{TimePair, TimePairList};
    use std::collections::BTreeSet;

    #[test]
    fn test_pairs_sort_by_departure_seconds() {
        let pairs: BTreeSet<TimePair> = [
            TimePair::new("10:00:00", "10:05:00"),
            TimePair::new("9:00:00", "9:05:00"),
            TimePair::new("25:10:00", "25:15:00"),
            TimePair::new("09:00:00", "09:04:00"),
            TimePair::new("", "08:00:00"),
            TimePair::new("10:00:00", "10:05:00"),
        ]
        .into_iter()
        .collect();
        let departures: Vec<_> = pairs
            .iter()
            .map(|p| (p.departure.as_str(), p.arrival.as_str()))
            .collect();
        assert_eq!(
            departures,
            vec![
                ("09:00:00", "09:04:00"),
                ("9:00:00", "9:05:00"),
                ("10:00:00", "10:05:00"),
                ("25:10:00", "25:15:00"),
                ("", "08:00:00"),
            ]
        );
    }

    #[test]
    fn test_literal_encoding() {
        let list = TimePairList(vec![
            TimePair::new("08:00:00", "08:05:00"),
            TimePair::new("08:30:00", "08:35:00"),
        ]);
        let encoded = list.to_string();
        assert_eq!(
            encoded,
            "[('08:00:00', '08:05:00'), ('08:30:00', '08:35:00')]"
        );
        let decoded: TimePairList = encoded.parse().expect("parse");
        assert_eq!(decoded, list);
        assert_eq!(TimePairList::default().to_string(), "[]");
    }

    #[test]
    fn test_literal_parsing_is_lenient_about_layout() {
        let decoded: TimePairList = "[ (\"08:00:00\",'08:05:00'), ]".parse().expect("parse");
        assert_eq!(
            decoded,
            TimePairList(vec![TimePair::new("08:00:00", "08:05:00")])
        );
        let empty: TimePairList = " [ ] ".parse().expect("parse");
        assert!(empty.0.is_empty());
    }

    #[test]
    fn test_malformed_literal_is_rejected() {
        assert!("[('08:00:00')]".parse::<TimePairList>().is_err());
        assert!("[('08:00:00', '08:05:00')".parse::<TimePairList>().is_err());
        assert!("[('08:00:00', '08:05:00')] x".parse::<TimePairList>().is_err());
        assert!("('08:00:00', '08:05:00')".parse::<TimePairList>().is_err());
    }
}
