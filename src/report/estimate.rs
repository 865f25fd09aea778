//! Search-space size estimates and human-readable counts.

use std::fmt;

use serde::Serialize;

/// Largest `n` whose factorial fits in a `u64`.
pub const MAX_EXACT_FACTORIAL: usize = 20;

/// Number of orderings of `n` vertices, or a saturated marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PermutationEstimate {
    Exact(u64),
    /// `n!` does not fit in a `u64`.
    TooLarge,
}

impl PermutationEstimate {
    /// Short human-readable form, e.g. `"3.6 million"`.
    pub fn describe(&self) -> String {
        match self {
            Self::Exact(count) => format_large_number(*count),
            Self::TooLarge => "so many".to_string(),
        }
    }
}

impl fmt::Display for PermutationEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(count) => write!(f, "{count}"),
            Self::TooLarge => write!(f, "too large"),
        }
    }
}

/// `n!`, saturating to [`PermutationEstimate::TooLarge`] above 20.
///
/// Display only: the search is bounded by pruning, not by this count.
///
/// # Examples
///
/// ```
/// use u_tsp_oracle::report::{estimate_permutations, PermutationEstimate};
///
/// assert_eq!(estimate_permutations(5), PermutationEstimate::Exact(120));
/// assert_eq!(estimate_permutations(21), PermutationEstimate::TooLarge);
/// ```
pub fn estimate_permutations(n: usize) -> PermutationEstimate {
    if n > MAX_EXACT_FACTORIAL {
        return PermutationEstimate::TooLarge;
    }
    PermutationEstimate::Exact((2..=n as u64).product())
}

/// Formats a count as `"950"`, `"1.5 thousand"`, `"2.0 million"`,
/// `"3.1 billion"` or `"so many"`.
pub fn format_large_number(n: u64) -> String {
    match n {
        0..=999 => n.to_string(),
        1_000..=999_999 => format!("{:.1} thousand", n as f64 / 1e3),
        1_000_000..=999_999_999 => format!("{:.1} million", n as f64 / 1e6),
        1_000_000_000..=999_999_999_999 => format!("{:.1} billion", n as f64 / 1e9),
        _ => "so many".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_factorials() {
        assert_eq!(estimate_permutations(0), PermutationEstimate::Exact(1));
        assert_eq!(estimate_permutations(1), PermutationEstimate::Exact(1));
        assert_eq!(estimate_permutations(3), PermutationEstimate::Exact(6));
        assert_eq!(estimate_permutations(10), PermutationEstimate::Exact(3_628_800));
    }

    #[test]
    fn test_boundary() {
        assert_eq!(
            estimate_permutations(20),
            PermutationEstimate::Exact(2_432_902_008_176_640_000)
        );
        assert_eq!(estimate_permutations(21), PermutationEstimate::TooLarge);
        assert_eq!(estimate_permutations(1000), PermutationEstimate::TooLarge);
    }

    #[test]
    fn test_format_large_number() {
        assert_eq!(format_large_number(950), "950");
        assert_eq!(format_large_number(1_500), "1.5 thousand");
        assert_eq!(format_large_number(2_000_000), "2.0 million");
        assert_eq!(format_large_number(3_100_000_000), "3.1 billion");
        assert_eq!(format_large_number(5_000_000_000_000), "so many");
    }

    #[test]
    fn test_describe_and_display() {
        assert_eq!(estimate_permutations(10).describe(), "3.6 million");
        assert_eq!(estimate_permutations(25).describe(), "so many");
        assert_eq!(estimate_permutations(4).to_string(), "24");
        assert_eq!(PermutationEstimate::TooLarge.to_string(), "too large");
    }
}
