use crate::catalog::error::CatalogError;
use crate::catalog::record::{PlanetRecord, PlanetSummary};

/// Where planet data comes from.
///
/// Futures are not required to be `Send`; the browser source is single-threaded.
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    /// All planets the source knows about.
    async fn list(&self) -> Result<Vec<PlanetSummary>, CatalogError>;

    /// Full record for `id`. `Ok(None)` means the source has no such planet.
    async fn details(&self, id: &str) -> Result<Option<PlanetRecord>, CatalogError>;
}
