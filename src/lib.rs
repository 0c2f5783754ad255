pub trait Sort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T])
    where
        T: Ord + Clone;

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        T: Clone,
        F: FnMut(&T, &T) -> std::cmp::Ordering;
}

/// Declares a `SortImpl` type forwarding to the `sort` and `sort_by` functions of the module it is
/// invoked in.
#[macro_export]
macro_rules! sort_impl {
    ($name:expr) => {
        pub struct SortImpl;

        impl $crate::Sort for SortImpl {
            fn name() -> String {
                $name.into()
            }

            #[inline]
            fn sort<T>(arr: &mut [T])
            where
                T: Ord + Clone,
            {
                sort(arr);
            }

            #[inline]
            fn sort_by<T, F>(arr: &mut [T], compare: F)
            where
                T: Clone,
                F: FnMut(&T, &T) -> std::cmp::Ordering,
            {
                sort_by(arr, compare);
            }
        }
    };
}

pub mod cli;
pub mod config;
pub mod counter;
pub mod error;
pub mod experiment;
pub mod patterns;
pub mod report;
pub mod stable;
pub mod unstable;

pub use counter::ComparisonCounter;
pub use error::{ConfigError, ExperimentError, HarnessError, PromptError};
