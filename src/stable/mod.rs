// Plain insertion sort, used on its own and as the small-slice leg of the hybrid.
pub mod insertion_sort;

// Top-down merge sort, always splits down to single elements.
pub mod merge_sort;

// Merge sort that hands slices of at most `S` elements to insertion sort.
pub mod hybrid_sort;
