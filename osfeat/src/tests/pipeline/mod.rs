pub mod aggregates_test;
pub mod labeler_test;
pub mod splitter_test;
