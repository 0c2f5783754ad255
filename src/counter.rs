//! Caller owned comparison accounting.
//!
//! A counter is created (or reset) by whoever starts one top-level sort and handed down by mutable
//! reference. Nothing here is global, so two runs can never see each other's comparisons.

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonCounter {
    count: u64,
}

impl ComparisonCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u64 {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    #[inline]
    pub fn record(&mut self) {
        self.count += 1;
    }

    /// Wraps `T::lt` so that every evaluation is recorded.
    #[inline]
    pub fn is_less<'a, T: Ord + 'a>(&'a mut self) -> impl FnMut(&T, &T) -> bool + 'a {
        move |a: &T, b: &T| {
            self.record();
            a.lt(b)
        }
    }
}
