use crate::view::criteria::Criteria;
use tracing::trace;

/// Returns the rows of `data` accepted by `criteria`, in their original order.
///
/// The input is never modified; the result borrows from it. Filtering an already
/// filtered sequence with the same criteria returns the same rows.
pub fn filter<'a, R>(data: &'a [R], criteria: &Criteria) -> Vec<&'a R>
where
    R: AsRef<[String]>,
{
    if criteria.is_empty() {
        return data.iter().collect();
    }
    let rows: Vec<&R> = data.iter().filter(|row| criteria.accept(row.as_ref())).collect();
    trace!(input = data.len(), kept = rows.len(), "filtered rows");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delimited::Row;

    fn data() -> Vec<Row> {
        [["Ada", "London"], ["Grace", "Arlington"], ["Linus", "Helsinki"]]
            .iter()
            .map(|row| row.iter().map(|field| field.to_string()).collect())
            .collect()
    }

    #[test]
    fn filter_keeps_matching_rows_in_order() {
        let data = data();
        let rows = filter(&data, &Criteria::new("on", &[]));
        assert_eq!(rows, vec![&data[0], &data[1]]);
    }

    #[test]
    fn filter_without_criteria_returns_all() {
        let data = data();
        assert_eq!(filter(&data, &Criteria::default()).len(), 3);
    }

    #[test]
    fn filter_is_idempotent() {
        let data = data();
        let criteria = Criteria::new("", &["a".to_string()]);
        let once = filter(&data, &criteria);
        let twice = filter(&once, &criteria);
        assert_eq!(twice.into_iter().copied().collect::<Vec<_>>(), once);
    }

    #[test]
    fn filter_does_not_touch_input() {
        let data = data();
        let before = data.clone();
        let _ = filter(&data, &Criteria::new("zzz", &[]));
        assert_eq!(data, before);
    }
}
