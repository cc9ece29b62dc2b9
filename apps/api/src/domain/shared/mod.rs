pub mod errors;
pub mod listing;
pub mod pagination;
