use crate::payload::Entry;
use crate::value::JsonValue;

impl JsonValue {
    /// Mean of every `Some` the selector yields. No numbers at all gives `NaN`.
    pub fn average<F>(&self, mut selector: F) -> f64
    where
        F: FnMut(Entry<'_>) -> Option<f64>,
    {
        let (sum, count) = self
            .payload
            .entries()
            .filter_map(|e| selector(e))
            .fold((0.0_f64, 0_usize), |(sum, count), n| (sum + n, count + 1));
        sum / count as f64
    }

    /// Middle of the selected numbers, sorted ascending.
    ///
    /// An odd count yields `[sorted[n/2]]`. An even count yields
    /// `[sorted[n/2], sorted[n/2 + 1]]`, one slot past the textbook pair, so the
    /// second slot is `None` for two values. Out-of-range slots are `None`.
    pub fn median<F>(&self, mut selector: F) -> Vec<Option<f64>>
    where
        F: FnMut(Entry<'_>) -> Option<f64>,
    {
        let mut nums: Vec<f64> = self.payload.entries().filter_map(|e| selector(e)).collect();
        nums.sort_by(f64::total_cmp);
        let mid = nums.len() / 2;
        if nums.len() % 2 == 0 {
            vec![nums.get(mid).copied(), nums.get(mid + 1).copied()]
        } else {
            vec![nums.get(mid).copied()]
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::JsonValue;
    use test_case::test_case;

    #[test]
    fn average_skips_non_numbers() {
        let v = JsonValue::new(r#"[1, "x", 2, null, 6]"#).unwrap();
        assert_eq!(v.average(|e| e.as_f64()), 3.0);
    }

    #[test]
    fn average_of_mapping_values() {
        let v = JsonValue::new(r#"{"a":{"n":2},"b":{"n":4},"c":{}}"#).unwrap();
        assert_eq!(v.average(|e| e.value().get("n").and_then(|n| n.as_f64())), 3.0);
    }

    #[test]
    fn average_without_numbers_is_nan() {
        assert!(JsonValue::new(r#"["a"]"#).unwrap().average(|e| e.as_f64()).is_nan());
        assert!(JsonValue::empty().average(|e| e.as_f64()).is_nan());
    }

    #[test_case("[3,1,2]", vec![Some(2.0)]; "odd count")]
    #[test_case("[4,2,3,1]", vec![Some(3.0), Some(4.0)]; "even count")]
    #[test_case("[5,1]", vec![Some(5.0), None]; "even count past the end")]
    #[test_case("[]", vec![None, None]; "no values")]
    #[test_case("[7]", vec![Some(7.0)]; "single value")]
    fn median_positions(text: &str, expected: Vec<Option<f64>>) {
        let v = JsonValue::new(text).unwrap();
        assert_eq!(v.median(|e| e.as_f64()), expected);
    }

    #[test]
    fn median_sorts_numerically() {
        let v = JsonValue::new("[10, 9, 100]").unwrap();
        assert_eq!(v.median(|e| e.as_f64()), vec![Some(10.0)]);
    }
}
