pub mod admin;
pub mod search;

pub use admin::{ClearCacheParams, GetConfigInfoParams};
pub use search::SearchDatasetsParams;
