pub mod aggregate;
pub mod alerts;
pub mod cache;
pub mod classify;
pub mod filters;
pub mod maintenance;
pub mod normalize;
pub mod roi_memory;
pub mod select;
