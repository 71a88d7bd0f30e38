use exoviz::catalog::decode::{decode_details, decode_listing};
use exoviz::{CatalogError, CatalogSource, PlanetRecord, PlanetSummary};
use gloo_net::http::Request;

/// Catalog backend over HTTP: `GET {base}/exoplanets` and
/// `GET {base}/exoplanets/{id}`.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base_url: String,
}

impl HttpCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    async fn get(&self, path: &str) -> Result<String, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        if !response.ok() {
            return Err(CatalogError::Status { status: response.status() });
        }
        response.text().await.map_err(|e| CatalogError::Network(e.to_string()))
    }
}

impl CatalogSource for HttpCatalog {
    async fn list(&self) -> Result<Vec<PlanetSummary>, CatalogError> {
        decode_listing(&self.get("/exoplanets").await?)
    }

    async fn details(&self, id: &str) -> Result<Option<PlanetRecord>, CatalogError> {
        let encoded = String::from(js_sys::encode_uri_component(id));
        decode_details(&self.get(&format!("/exoplanets/{encoded}")).await?)
    }
}
