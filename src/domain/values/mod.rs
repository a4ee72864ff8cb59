pub mod category;
pub mod freshness;
pub mod localtime;
pub mod platform;
pub mod score;
pub mod weights;
