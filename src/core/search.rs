//! Binary searches over sorted grids.
//!
//! Both searches run in `O(log n)` and work for any partially ordered value type, so they are used
//! for independent-variable grids as well as for cumulative-probability tables.

/// Returns the index of the greatest grid point that is smaller than or equal to `value`. An exact
/// match resolves to the matching point itself. Returns `None` if the grid is empty or `value` lies
/// below its first point.
pub fn binary_lower_bound<T: PartialOrd>(grid: &[T], value: &T) -> Option<usize> {
    if grid.is_empty() || *value < grid[0] {
        return None;
    }

    // invariant: grid[low] <= value, and value < grid[high] if high < len
    let mut low = 0;
    let mut high = grid.len();

    while high - low > 1 {
        let mid = low + (high - low) / 2;

        if grid[mid] <= *value {
            low = mid;
        } else {
            high = mid;
        }
    }

    Some(low)
}

/// Returns the index of the smallest grid point that is greater than or equal to `value`. Returns
/// `None` if the grid is empty or `value` lies above its last point.
pub fn binary_upper_bound<T: PartialOrd>(grid: &[T], value: &T) -> Option<usize> {
    match grid.last() {
        Some(last) if *value <= *last => {}
        _ => return None,
    }

    let mut low = 0;
    let mut high = grid.len() - 1;

    while low < high {
        let mid = low + (high - low) / 2;

        if grid[mid] < *value {
            low = mid + 1;
        } else {
            high = mid;
        }
    }

    Some(high)
}

/// Like [`binary_lower_bound`], but clamps to the first bin below the grid and to the last bin
/// (`len - 2`) at or above the last point, so that `index` and `index + 1` always form a bracket.
/// The grid must contain at least two points.
pub(crate) fn bracket<T: PartialOrd>(grid: &[T], value: &T) -> usize {
    debug_assert!(grid.len() >= 2);

    binary_lower_bound(grid, value).map_or(0, |index| index.min(grid.len() - 2))
}
