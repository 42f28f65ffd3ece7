pub mod fill;
pub mod filters;
