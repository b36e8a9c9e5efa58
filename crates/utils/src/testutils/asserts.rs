use std::ops::{Bound, RangeBounds};

/// Asserts that the given range of two byte slices is equal, with a clearer
/// failure location than comparing the full slices.
#[track_caller]
pub fn assert_data_range_eq(lhs: &[u8], rhs: &[u8], range: impl RangeBounds<usize>) {
    assert_eq!(_apply_bound(lhs, &range), _apply_bound(rhs, &range));
}

fn _apply_bound<'a>(data: &'a [u8], range: &impl RangeBounds<usize>) -> &'a [u8] {
    let start = match range.start_bound() {
        Bound::Unbounded => 0,
        Bound::Included(&x) => x,
        Bound::Excluded(&x) => x + 1,
    };
    let end = match range.end_bound() {
        Bound::Unbounded => data.len(),
        Bound::Included(&x) => x + 1,
        Bound::Excluded(&x) => x,
    };
    &data[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_ranges_pass() {
        assert_data_range_eq(&[1, 2, 3, 4], &[9, 2, 3, 8], 1..3);
        assert_data_range_eq(&[1, 2, 3, 4], &[1, 2, 3, 4], ..);
    }

    #[test]
    #[should_panic]
    fn unequal_ranges_panic() {
        assert_data_range_eq(&[1, 2, 3, 4], &[1, 2, 9, 4], 1..=3);
    }
}
