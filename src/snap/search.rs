/// Index of the entry in ascending `table` closest to `target`.
///
/// Targets outside the table clamp to the first or last index. When the
/// target sits exactly between two entries the lower index wins. An empty
/// table yields `0`.
#[must_use]
pub fn nearest_index(table: &[f64], target: f64) -> usize {
    let Some(last) = table.len().checked_sub(1) else {
        return 0;
    };
    if target < table[0] {
        return 0;
    }
    if target > table[last] {
        return last;
    }

    let (mut lo, mut hi) = (0, last);
    loop {
        if hi - lo < 2 {
            return if target - table[lo] <= table[hi] - target {
                lo
            } else {
                hi
            };
        }

        let mid = lo + (hi - lo) / 2;
        if target < table[mid] {
            hi = mid;
        } else if target > table[mid] {
            lo = mid;
        } else {
            return mid;
        }
    }
}
