//! Filter, rank and aggregate records for one query.
//!
//! Filtering is an exact-match conjunction over the constrained
//! dimensions; ranking is a stable descending sort by the sizing
//! parameter with optional top-50 truncation. The root value is summed
//! over exactly the record set that will be rendered as children, so the
//! root always equals the sum of its children.

use crate::models::{Aggregate, Limit, Parameter, Query, Record};

/// Number of records retained under [`Limit::Top50`].
pub const TOP_N: usize = 50;

/// Outcome of running a query against a record sequence.
///
/// An empty selection is a displayable condition, not an error: the
/// caller presents a "no data" state.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// No record matched the query.
    Empty,
    /// At least one record matched.
    Matched(Aggregate),
}

impl Selection {
    /// The aggregate, if any record matched.
    pub fn aggregate(&self) -> Option<&Aggregate> {
        match self {
            Self::Empty => None,
            Self::Matched(aggregate) => Some(aggregate),
        }
    }
}

/// Run a query: filter, rank, truncate and aggregate.
pub fn select(records: &[Record], query: &Query) -> Selection {
    let matched: Vec<Record> = records
        .iter()
        .filter(|record| query.matches(record))
        .cloned()
        .collect();

    if matched.is_empty() {
        return Selection::Empty;
    }

    let children = rank(matched, query.parameter, query.limit);
    let root_value = children
        .iter()
        .map(|record| query.parameter.value_of(record))
        .sum();

    Selection::Matched(Aggregate {
        query: query.clone(),
        root_value,
        children,
    })
}

/// Rank records by the sizing parameter.
///
/// Under [`Limit::Top50`] the records are sorted descending by the
/// parameter value and truncated to [`TOP_N`]; ties keep their original
/// order (the sort is stable). Under [`Limit::All`] the input order is
/// preserved untouched.
pub fn rank(mut records: Vec<Record>, parameter: Parameter, limit: Limit) -> Vec<Record> {
    match limit {
        Limit::All => records,
        Limit::Top50 => {
            records.sort_by(|a, b| {
                parameter.value_of(b).total_cmp(&parameter.value_of(a))
            });
            records.truncate(TOP_N);
            records
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColorScheme, RegionType};

    fn record(code: &str, employment: f64, gdp: f64) -> Record {
        Record {
            year: 2024,
            region_type: RegionType::National,
            region: "United States".to_string(),
            code: code.to_string(),
            title: format!("Occupation {code}"),
            employment,
            gdp,
            ..Record::default()
        }
    }

    fn query(parameter: Parameter, limit: Limit) -> Query {
        Query {
            parameter,
            limit,
            ..Query::default()
        }
    }

    #[test]
    fn test_empty_selection_is_a_condition() {
        let records = vec![record("11-0000", 10.0, 100.0)];
        let q = Query {
            region: Some("Mars".to_string()),
            ..Query::default()
        };

        assert_eq!(select(&records, &q), Selection::Empty);
        assert!(select(&records, &q).aggregate().is_none());
    }

    #[test]
    fn test_root_equals_sum_of_children() {
        let records = vec![
            record("a", 10.0, 1.0),
            record("b", 30.0, 2.0),
            record("c", 20.0, 3.0),
        ];

        for limit in [Limit::All, Limit::Top50] {
            let selection = select(&records, &query(Parameter::Employment, limit));
            let aggregate = selection.aggregate().expect("records match");
            let sum: f64 = aggregate
                .children
                .iter()
                .map(|r| r.employment)
                .sum();
            assert_eq!(aggregate.root_value, sum);
            assert_eq!(aggregate.root_value, 60.0);
        }
    }

    #[test]
    fn test_top50_sorts_by_selected_parameter() {
        // GDP order is the reverse of employment order.
        let records = vec![
            record("a", 30.0, 1.0),
            record("b", 20.0, 2.0),
            record("c", 10.0, 3.0),
        ];

        let selection = select(&records, &query(Parameter::Gdp, Limit::Top50));
        let aggregate = selection.aggregate().unwrap();
        let codes: Vec<&str> = aggregate.children.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["c", "b", "a"]);
        assert_eq!(aggregate.root_value, 6.0);
    }

    #[test]
    fn test_all_limit_preserves_input_order() {
        let records = vec![
            record("a", 10.0, 0.0),
            record("b", 30.0, 0.0),
            record("c", 20.0, 0.0),
        ];

        let selection = select(&records, &query(Parameter::Employment, Limit::All));
        let codes: Vec<&str> = selection
            .aggregate()
            .unwrap()
            .children
            .iter()
            .map(|r| r.code.as_str())
            .collect();
        assert_eq!(codes, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_truncation_law() {
        let records: Vec<Record> = (0..75)
            .map(|i| record(&format!("{i:02}-0000"), f64::from(i), 0.0))
            .collect();

        let selection = select(&records, &query(Parameter::Employment, Limit::Top50));
        let aggregate = selection.aggregate().unwrap();
        assert_eq!(aggregate.children.len(), TOP_N);
        // Largest first, root sums only the retained set.
        assert_eq!(aggregate.children[0].employment, 74.0);
        let expected: f64 = (25..75).map(f64::from).sum();
        assert_eq!(aggregate.root_value, expected);

        let few = vec![record("a", 1.0, 0.0), record("b", 2.0, 0.0)];
        let selection = select(&few, &query(Parameter::Employment, Limit::Top50));
        assert_eq!(selection.aggregate().unwrap().children.len(), 2);
    }

    #[test]
    fn test_ties_keep_original_order() {
        let records = vec![
            record("first", 10.0, 0.0),
            record("second", 10.0, 0.0),
            record("third", 10.0, 0.0),
        ];

        let ranked = rank(records, Parameter::Employment, Limit::Top50);
        let codes: Vec<&str> = ranked.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_wildcard_dimensions_match_everything() {
        let mut other = record("z", 5.0, 0.0);
        other.year = 1999;
        other.region_type = RegionType::Metropolitan;
        other.region = "Boise, ID".to_string();
        let records = vec![record("a", 10.0, 0.0), other];

        let q = Query {
            year: None,
            region_type: None,
            region: None,
            ..query(Parameter::Employment, Limit::All)
        };
        let selection = select(&records, &q);
        assert_eq!(selection.aggregate().unwrap().children.len(), 2);
    }

    #[test]
    fn test_default_query_over_sample_data() {
        let records = crate::loader::fallback_records();
        let selection = select(records, &Query::default());
        let aggregate = selection.aggregate().expect("sample data matches");

        assert_eq!(aggregate.children.len(), 10);
        assert_eq!(aggregate.root_value, 75_520_000.0);
        assert_eq!(aggregate.children[0].title, "Management Occupations");
        assert_eq!(aggregate.children[0].employment, 9_270_000.0);
        for pair in aggregate.children.windows(2) {
            assert!(pair[0].employment >= pair[1].employment);
        }
    }

    #[test]
    fn test_color_scheme_is_orthogonal_to_parameter() {
        let mut r = record("a", 100.0, 900.0);
        r.mean_wage = 55_000.0;
        r.complexity_score = 0.5;

        // One record carries one size value and one color value at a time.
        assert_eq!(Parameter::Gdp.value_of(&r), 900.0);
        assert_eq!(ColorScheme::Wage.value_of(&r), 55_000.0);
        assert_eq!(ColorScheme::Complexity.value_of(&r), 0.5);
    }
}
