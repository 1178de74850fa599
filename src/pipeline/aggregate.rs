//! Parent-tier utilization from child-tier utilization.

use std::collections::{BTreeSet, HashMap};

use crate::series::round2;

/// Mean utilization of the children in `supports` that have a value in
/// `child_values`, rounded to two decimals.
///
/// Children without a value are skipped and do not count towards the
/// denominator. A parent with no children, or with none of them sampled,
/// yields `0.0`.
///
/// # Examples
///
/// ```
/// use std::collections::{BTreeSet, HashMap};
/// use ran_energy_twin::pipeline::aggregate::aggregate;
///
/// let supports: BTreeSet<String> = ["RU1".to_string(), "RU2".to_string()].into();
/// let values = HashMap::from([("RU1".to_string(), 0.4)]);
/// assert_eq!(aggregate(&supports, &values), 0.4);
/// ```
pub fn aggregate(supports: &BTreeSet<String>, child_values: &HashMap<String, f64>) -> f64 {
    let (sum, count) = supports
        .iter()
        .filter_map(|child| child_values.get(child))
        .fold((0.0_f64, 0_usize), |(s, n), v| (s + v, n + 1));

    if count == 0 {
        return 0.0;
    }
    round2(sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn values(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn empty_supports_is_zero() {
        assert_eq!(aggregate(&set(&[]), &values(&[("RU1", 0.9)])), 0.0);
    }

    #[test]
    fn mean_of_present_children() {
        let v = values(&[("RU1", 0.2), ("RU2", 0.6)]);
        assert_eq!(aggregate(&set(&["RU1", "RU2"]), &v), 0.4);
    }

    #[test]
    fn absent_children_do_not_dilute_mean() {
        let v = values(&[("RU1", 0.4)]);
        assert_eq!(aggregate(&set(&["RU1", "RU2"]), &v), 0.4);
    }

    #[test]
    fn no_sampled_children_is_zero() {
        let v = values(&[("RU9", 0.7)]);
        assert_eq!(aggregate(&set(&["RU1", "RU2"]), &v), 0.0);
    }

    #[test]
    fn result_is_rounded_to_two_decimals() {
        let v = values(&[("a", 0.1), ("b", 0.2), ("c", 0.2)]);
        // 0.5 / 3 = 0.1666..
        assert_eq!(aggregate(&set(&["a", "b", "c"]), &v), 0.17);
    }

    #[test]
    fn exact_tie_rounds_to_even() {
        let v = values(&[("a", 0.1), ("b", 0.15)]);
        // (0.1 + 0.15) / 2 is exactly 0.125
        assert_eq!(aggregate(&set(&["a", "b"]), &v), 0.12);
    }

    #[test]
    fn values_outside_supports_are_ignored() {
        let v = values(&[("RU1", 0.2), ("RU2", 1.0)]);
        assert_eq!(aggregate(&set(&["RU1"]), &v), 0.2);
    }
}
