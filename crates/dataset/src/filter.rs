//! Catalog filtering by category, difficulty and annotation status

use std::collections::BTreeSet;
use std::str::FromStr;

use catalog::ProblemRecord;

use crate::Annotations;

/// Exact value or `"all"`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Choice::All
        } else {
            Choice::Only(s.to_string())
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(v) => v == value,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Choice::All => "all",
            Choice::Only(v) => v,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusFlag {
    Favorite,
    Solved,
}

impl FromStr for StatusFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "favorite" | "favorites" => Ok(StatusFlag::Favorite),
            "solved" => Ok(StatusFlag::Solved),
            other => Err(format!("unknown status filter: {other}")),
        }
    }
}

/// Transient filter selection; never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub category: Choice,
    pub difficulty: Choice,
    pub status: BTreeSet<StatusFlag>,
}

impl FilterState {
    pub fn with_category(mut self, category: Choice) -> Self {
        self.category = category;
        self
    }

    pub fn with_difficulty(mut self, difficulty: Choice) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_status(mut self, flag: StatusFlag, on: bool) -> Self {
        if on {
            self.status.insert(flag);
        } else {
            self.status.remove(&flag);
        }
        self
    }

    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }
}

/// Records matching every active criterion, in dataset order.
///
/// Status flags are ANDed: with both set, a record must be favorited and solved.
pub fn filter_records<'a>(
    records: &'a [ProblemRecord],
    filter: &FilterState,
    annotations: &Annotations,
) -> Vec<&'a ProblemRecord> {
    records
        .iter()
        .filter(|p| filter.category.matches(&p.category))
        .filter(|p| filter.difficulty.matches(&p.difficulty))
        .filter(|p| {
            filter.status.iter().all(|flag| match flag {
                StatusFlag::Favorite => annotations.favorites.contains(&p.id),
                StatusFlag::Solved => annotations.solved.contains(&p.id),
            })
        })
        .collect()
}

pub fn distinct_categories(records: &[ProblemRecord]) -> Vec<String> {
    records.iter().map(|p| p.category.clone()).collect::<BTreeSet<_>>().into_iter().collect()
}

pub fn distinct_difficulties(records: &[ProblemRecord]) -> Vec<String> {
    records.iter().map(|p| p.difficulty.clone()).collect::<BTreeSet<_>>().into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_parse() {
        assert_eq!(Choice::parse("all"), Choice::All);
        assert_eq!(Choice::parse(" ALL "), Choice::All);
        assert_eq!(Choice::parse(""), Choice::All);
        assert_eq!(Choice::parse("cid002"), Choice::Only("cid002".into()));
        assert_eq!(Choice::parse("cid002").as_str(), "cid002");
    }

    #[test]
    fn test_status_flag_from_str() {
        assert_eq!("favorite".parse::<StatusFlag>(), Ok(StatusFlag::Favorite));
        assert_eq!("Solved".parse::<StatusFlag>(), Ok(StatusFlag::Solved));
        assert!("done".parse::<StatusFlag>().is_err());
    }

    #[test]
    fn test_with_status_toggles() {
        let f = FilterState::default().with_status(StatusFlag::Solved, true);
        assert!(f.status.contains(&StatusFlag::Solved));
        assert!(f.with_status(StatusFlag::Solved, false).is_default());
    }
}
