//! Best-known tour of a search episode.

use serde::Serialize;

use crate::models::Tour;

/// The best complete tour found so far, or just a distance bound.
///
/// A ceiling incumbent carries a distance but no path: any complete tour
/// strictly shorter than the ceiling replaces it.
///
/// # Examples
///
/// ```
/// use u_tsp_oracle::search::Incumbent;
///
/// let ceiling = Incumbent::ceiling(120.0);
/// assert!(!ceiling.has_tour());
/// assert_eq!(ceiling.distance(), 120.0);
/// assert!(Incumbent::unbounded().distance().is_infinite());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Incumbent {
    pub(crate) path: Vec<usize>,
    pub(crate) distance: f64,
}

impl Default for Incumbent {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl Incumbent {
    /// No bound at all: the first complete tour wins.
    pub fn unbounded() -> Self {
        Self::ceiling(f64::INFINITY)
    }

    /// A distance bound without a tour.
    pub fn ceiling(distance: f64) -> Self {
        Self {
            path: Vec::new(),
            distance,
        }
    }

    /// Seeds the episode with a real tour.
    pub fn from_tour(tour: &Tour) -> Self {
        Self {
            path: tour.order().to_vec(),
            distance: tour.distance(),
        }
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Returns `true` if a tour, not only a bound, is held.
    pub fn has_tour(&self) -> bool {
        !self.path.is_empty()
    }

    /// The held tour, if any.
    pub fn to_tour(&self) -> Option<Tour> {
        self.has_tour()
            .then(|| Tour::new(self.path.clone(), self.distance))
    }

    pub(crate) fn replace(&mut self, path: &[usize], distance: f64) {
        self.path.clear();
        self.path.extend_from_slice(path);
        self.distance = distance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tour() {
        let tour = Tour::new(vec![0, 2, 1], 7.5);
        let inc = Incumbent::from_tour(&tour);
        assert!(inc.has_tour());
        assert_eq!(inc.to_tour(), Some(tour));
    }

    #[test]
    fn test_ceiling_has_no_tour() {
        assert_eq!(Incumbent::ceiling(3.0).to_tour(), None);
    }

    #[test]
    fn test_replace() {
        let mut inc = Incumbent::ceiling(10.0);
        inc.replace(&[0, 1, 2], 6.0);
        assert_eq!(inc.path(), &[0, 1, 2]);
        assert_eq!(inc.distance(), 6.0);
    }
}
