pub mod builtin;
pub mod client;
pub mod decode;
pub mod error;
pub mod form;
pub mod record;
pub mod source;
pub mod store;

pub use builtin::BuiltinCatalog;
pub use client::{filter_listing, CatalogClient};
pub use error::{CatalogError, FormError};
pub use form::CustomPlanetForm;
pub use record::{PlanetRecord, PlanetSummary};
pub use source::CatalogSource;
pub use store::CustomPlanetStore;
