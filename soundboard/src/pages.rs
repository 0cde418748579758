//! Current page of the board

/// Tracks the page shown, numbered from 1 to `count`.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Pager {
    current: usize,
    count: usize,
}

/// Iterates on page numbers
pub struct PageIterator {
    next: usize,
    last: usize,
}

impl Iterator for PageIterator {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next > self.last {
            return None;
        }
        let r = self.next;
        self.next += 1;
        Some(r)
    }
}

impl Pager {
    /// Starts on the first page. A board always has at least one page.
    pub fn new(count: usize) -> Self {
        Pager {
            current: 1,
            count: count.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns `true` if `page` exists.
    pub fn contains(&self, page: usize) -> bool {
        page >= 1 && page <= self.count
    }

    /// Returns `true` if moving to `target` would change the page shown.
    pub fn can_go_to(&self, target: usize) -> bool {
        self.contains(target) && target != self.current
    }

    /// Moves to `target`, returning the page left.
    ///
    /// Returns `None` and stays put if `target` is the current page or does
    /// not exist.
    pub fn go_to(&mut self, target: usize) -> Option<usize> {
        if !self.can_go_to(target) {
            return None;
        }
        let previous = self.current;
        self.current = target;
        Some(previous)
    }

    /// Returns the following page, if any. There is no wraparound.
    pub fn next(&self) -> Option<usize> {
        Some(self.current + 1).filter(|p| self.contains(*p))
    }

    /// Returns the preceding page, if any.
    pub fn prev(&self) -> Option<usize> {
        self.current.checked_sub(1).filter(|p| self.contains(*p))
    }

    /// Returns the page under a horizontal position of the slider track,
    /// given as a fraction of its width.
    pub fn at_fraction(&self, fraction: f64) -> usize {
        if !fraction.is_finite() {
            return self.current;
        }
        let clamped = fraction.max(0.0).min(1.0);
        let page = (clamped * self.count as f64).floor() as usize + 1;
        page.min(self.count)
    }

    /// Iterates on every page number
    pub fn pages(&self) -> PageIterator {
        PageIterator {
            next: 1,
            last: self.count,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_bounds() {
        let mut pager = Pager::new(2);
        assert_eq!(pager.current(), 1);
        assert_eq!(pager.prev(), None);
        assert_eq!(pager.next(), Some(2));

        assert_eq!(pager.go_to(1), None);
        assert_eq!(pager.go_to(0), None);
        assert_eq!(pager.go_to(3), None);
        assert_eq!(pager.current(), 1);

        assert_eq!(pager.go_to(2), Some(1));
        assert_eq!(pager.current(), 2);
        assert_eq!(pager.next(), None);
        assert_eq!(pager.prev(), Some(1));
    }

    #[test]
    fn test_single_page() {
        let pager = Pager::new(0);
        assert_eq!(pager.count(), 1);
        assert_eq!(pager.next(), None);
        assert_eq!(pager.prev(), None);
        assert_eq!(pager.pages().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_at_fraction() {
        let pager = Pager::new(2);
        assert_eq!(pager.at_fraction(0.0), 1);
        assert_eq!(pager.at_fraction(0.49), 1);
        assert_eq!(pager.at_fraction(0.5), 2);
        assert_eq!(pager.at_fraction(1.0), 2);
        assert_eq!(pager.at_fraction(-3.0), 1);
        assert_eq!(pager.at_fraction(7.0), 2);
        assert_eq!(pager.at_fraction(f64::NAN), 1);
        assert_eq!(Pager::new(3).pages().collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
