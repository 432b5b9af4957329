use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Product, ProductId},
    protocol::{ServiceMethod, ServiceRoute},
};
use tracing::debug;
use url::Url;

pub mod config;
pub mod controller;
pub mod error;
pub mod row;
pub mod view;

pub use config::{load_settings, ServiceSettings};
pub use controller::CatalogViewController;
pub use error::{CatalogError, FailureKind};
pub use row::{RowAction, RowHandle, RowMode, RowView};
pub use view::{CatalogTable, Notice, Operation, ProductForm, RenderPort, RowPosition};

/// Remote product collection. Each call resolves once the service answered.
#[async_trait]
pub trait ProductService: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Product>, CatalogError>;
    /// Creates `draft` and returns it with the server-assigned id.
    async fn save(&self, draft: &Product) -> Result<Product, CatalogError>;
    async fn update(&self, product: &Product) -> Result<(), CatalogError>;
    async fn delete(&self, product_id: &ProductId) -> Result<(), CatalogError>;
}

/// [`ProductService`] over the REST contract below a configured base URL.
#[derive(Debug, Clone)]
pub struct HttpProductService {
    http: Client,
    base_url: Url,
}

impl HttpProductService {
    pub fn new(settings: &ServiceSettings) -> Result<Self, CatalogError> {
        let base_url = settings.base_url()?;
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(CatalogError::ClientInit)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, route: &ServiceRoute) -> Url {
        let mut url = self.base_url.clone();
        // base_url() rejected cannot-be-a-base URLs, so segments are always available
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(route.segments());
        }
        url
    }

    fn request(&self, route: &ServiceRoute) -> RequestBuilder {
        let url = self.endpoint(route);
        match route.method() {
            ServiceMethod::Get => self.http.get(url),
            ServiceMethod::Post => self.http.post(url),
            ServiceMethod::Put => self.http.put(url),
            ServiceMethod::Delete => self.http.delete(url),
        }
    }

    async fn send(
        &self,
        route: &ServiceRoute,
        request: RequestBuilder,
    ) -> Result<Response, CatalogError> {
        debug!(route = route.name(), "sending {route}");
        let response = request
            .send()
            .await
            .map_err(|source| CatalogError::Transport {
                route: route.name(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::service(route.name(), status.as_u16()));
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(
        route: &ServiceRoute,
        response: Response,
    ) -> Result<T, CatalogError> {
        response
            .json()
            .await
            .map_err(|source| CatalogError::Decode {
                route: route.name(),
                source,
            })
    }
}

#[async_trait]
impl ProductService for HttpProductService {
    async fn list_all(&self) -> Result<Vec<Product>, CatalogError> {
        let route = ServiceRoute::ListAll;
        let response = self.send(&route, self.request(&route)).await?;
        Self::decode(&route, response).await
    }

    async fn save(&self, draft: &Product) -> Result<Product, CatalogError> {
        let route = ServiceRoute::Save;
        let response = self.send(&route, self.request(&route).json(draft)).await?;
        Self::decode(&route, response).await
    }

    async fn update(&self, product: &Product) -> Result<(), CatalogError> {
        let route = ServiceRoute::Update;
        self.send(&route, self.request(&route).json(product)).await?;
        Ok(())
    }

    async fn delete(&self, product_id: &ProductId) -> Result<(), CatalogError> {
        let route = ServiceRoute::Delete(product_id.clone());
        self.send(&route, self.request(&route)).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
