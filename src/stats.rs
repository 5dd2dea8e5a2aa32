use serde::Serialize;

use crate::records::History;

/// Aggregate view over a price history. Every field is `None` for an empty history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Stats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}

pub fn compute(history: &History) -> Stats {
    let mut prices = history.prices();
    let Some(first) = prices.next() else {
        return Stats::default();
    };

    let (min, max, sum, count) = prices.fold(
        (first, first, first, 1usize),
        |(min, max, sum, count), price| (min.min(price), max.max(price), sum + price, count + 1),
    );

    Stats {
        min: Some(min),
        max: Some(max),
        avg: Some(sum / count as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Observation;

    fn history_of(prices: &[f64]) -> History {
        prices
            .iter()
            .enumerate()
            .map(|(idx, price)| Observation::new(format!("t{idx}"), *price))
            .collect()
    }

    #[test]
    fn empty_history_has_no_values() {
        let stats = compute(&History::new());
        assert_eq!(stats.min, None);
        assert_eq!(stats.max, None);
        assert_eq!(stats.avg, None);
    }

    #[test]
    fn computes_extrema_and_mean() {
        let stats = compute(&history_of(&[100.0, 200.0, 300.0]));
        assert_eq!(stats.min, Some(100.0));
        assert_eq!(stats.max, Some(300.0));
        assert_eq!(stats.avg, Some(200.0));
    }

    #[test]
    fn single_observation_is_its_own_summary() {
        let stats = compute(&history_of(&[0.0731]));
        let expected = Stats {
            min: Some(0.0731),
            max: Some(0.0731),
            avg: Some(0.0731),
        };
        assert_eq!(stats, expected);
    }

    #[test]
    fn order_does_not_matter_for_extrema() {
        let stats = compute(&history_of(&[5.0, 1.0, 9.0, 3.0]));
        assert_eq!(stats.min, Some(1.0));
        assert_eq!(stats.max, Some(9.0));
        assert!((stats.avg.unwrap() - 4.5).abs() < 1e-12);
    }

    #[test]
    fn serializes_missing_values_as_null() {
        let json = serde_json::to_value(compute(&History::new())).unwrap();
        assert_eq!(json, serde_json::json!({"min": null, "max": null, "avg": null}));
    }
}
