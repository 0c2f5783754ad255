#[macro_use]
mod common;

use hybrid_sort_lab::stable::hybrid_sort::HybridSort;
use hybrid_sort_lab::stable::{hybrid_sort, insertion_sort, merge_sort};
use hybrid_sort_lab::unstable::quicksort;

// Quadratic on some patterns, keep them short.
const QUADRATIC_MAX_LEN: usize = 2_048;

instantiate_sort_tests!(insertion_sort, insertion_sort::SortImpl, QUADRATIC_MAX_LEN, stable);
instantiate_sort_tests!(merge_sort, merge_sort::SortImpl, usize::MAX, stable);
instantiate_sort_tests!(hybrid_sort_default, hybrid_sort::SortImpl, usize::MAX, stable);
instantiate_sort_tests!(hybrid_sort_s1, HybridSort<1>, usize::MAX, stable);
instantiate_sort_tests!(hybrid_sort_s2, HybridSort<2>, usize::MAX, stable);
instantiate_sort_tests!(hybrid_sort_s3, HybridSort<3>, usize::MAX, stable);
instantiate_sort_tests!(hybrid_sort_s64, HybridSort<64>, usize::MAX, stable);
instantiate_sort_tests!(quicksort, quicksort::SortImpl, QUADRATIC_MAX_LEN);
