pub mod product_record;
pub mod trend_candidate;
