//! Stats module - Category aggregation

mod calculator;

pub use calculator::{CategoryCount, CategoryCounts, StatsCalculator, TOTAL_COMMENTS};
