pub mod buckets;
pub mod rows;
