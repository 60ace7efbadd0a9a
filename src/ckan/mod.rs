mod client;
pub mod models;

pub use client::CkanClient;
pub use models::RawCatalogEntry;
