//! Per-product aggregation over the full vote set.

use std::collections::BTreeMap;

use votebox_core::catalog::Catalog;
use votebox_core::vote::{AggregateResult, Vote};

#[derive(Default)]
struct Tally {
    sum: i64,
    count: u64,
}

/// Computes `{votes_count, average}` for every product.
///
/// Every catalog product appears in the result, with a zero entry if nobody
/// voted on it. Votes for products missing from the catalog are kept, so
/// delisted products still report their history.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn aggregate(votes: &[Vote], catalog: &Catalog) -> BTreeMap<String, AggregateResult> {
    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();
    for vote in votes {
        let tally = tallies.entry(vote.product_id.as_str()).or_default();
        tally.sum += i64::from(vote.rate);
        tally.count += 1;
    }

    let mut results: BTreeMap<String, AggregateResult> = tallies
        .into_iter()
        .map(|(product_id, tally)| {
            let result = AggregateResult {
                votes_count: tally.count,
                average: tally.sum as f64 / tally.count as f64,
            };
            (product_id.to_owned(), result)
        })
        .collect();

    for product_id in catalog.product_ids() {
        results
            .entry(product_id.to_owned())
            .or_insert(AggregateResult::EMPTY);
    }

    results
}

#[cfg(test)]
mod tests {
    use votebox_core::catalog::{Catalog, Product};
    use votebox_core::vote::{AggregateResult, Vote};

    use super::aggregate;

    fn catalog() -> Catalog {
        Catalog::new([Product::new("p1", "Apple"), Product::new("p2", "Pear")])
    }

    #[test]
    fn test_zero_vote_products_are_included() {
        // Arrange
        let votes = vec![Vote::new("s1", "p1", 4), Vote::new("s2", "p1", 8)];

        // Act
        let results = aggregate(&votes, &catalog());

        // Assert
        assert_eq!(results.len(), 2);
        assert_eq!(
            results["p1"],
            AggregateResult {
                votes_count: 2,
                average: 6.0
            }
        );
        assert_eq!(results["p2"], AggregateResult::EMPTY);
    }

    #[test]
    fn test_average_is_not_rounded() {
        let votes = vec![
            Vote::new("s1", "p1", 1),
            Vote::new("s2", "p1", 2),
            Vote::new("s3", "p1", 2),
        ];

        let results = aggregate(&votes, &catalog());

        assert!((results["p1"].average - 5.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_votes_for_delisted_products_are_kept() {
        let votes = vec![Vote::new("s1", "gone", 7)];

        let results = aggregate(&votes, &catalog());

        assert_eq!(results.len(), 3);
        assert_eq!(
            results["gone"],
            AggregateResult {
                votes_count: 1,
                average: 7.0
            }
        );
    }

    #[test]
    fn test_empty_inputs_yield_empty_result() {
        let results = aggregate(&[], &Catalog::default());
        assert!(results.is_empty());
    }

    #[test]
    fn test_output_is_deterministic() {
        let votes = vec![Vote::new("s1", "p2", 3), Vote::new("s1", "p1", 9)];

        assert_eq!(aggregate(&votes, &catalog()), aggregate(&votes, &catalog()));
    }
}
