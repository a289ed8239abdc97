//! HTTP client for the Prismic REST API (v2)

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;

use super::{ApiInfo, CmsError, ContentSource, Query, SearchResponse};

/// Live API client
///
/// The master ref is looked up once, on first use, and reused for every
/// search that does not name its own reference.
pub struct PrismicClient {
    client: Client,
    endpoint: Url,
    access_token: Option<String>,
    master_ref: OnceCell<String>,
}

impl PrismicClient {
    pub fn new(endpoint: &str, access_token: Option<String>) -> Result<Self, CmsError> {
        let endpoint = Url::parse(endpoint)?;
        if endpoint.cannot_be_a_base() {
            return Err(CmsError::InvalidEndpoint(endpoint.to_string()));
        }
        let client = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self {
            client,
            endpoint,
            access_token: access_token.filter(|t| !t.is_empty()),
            master_ref: OnceCell::new(),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("spacetraveling/", env!("CARGO_PKG_VERSION"))
    }

    /// Ref of the currently published content
    pub async fn master_ref(&self) -> Result<String, CmsError> {
        let reference = self
            .master_ref
            .get_or_try_init(|| async {
                let mut url = self.endpoint.clone();
                self.authorize(&mut url);
                tracing::debug!("Resolving master ref from {}", self.endpoint);
                let info: ApiInfo = self.get(url).await?;
                info.master_ref()
                    .map(str::to_string)
                    .ok_or(CmsError::MissingMasterRef)
            })
            .await?;
        Ok(reference.clone())
    }

    /// Full search URL for a query under the given ref
    pub fn search_url(&self, query: &Query, reference: &str) -> Result<Url, CmsError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| CmsError::InvalidEndpoint(self.endpoint.to_string()))?
            .pop_if_empty()
            .extend(["documents", "search"]);

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("ref", reference);
            pairs.append_pair("q", &query.predicate_expr());
            if !query.fetch.is_empty() {
                pairs.append_pair("fetch", &query.fetch.join(","));
            }
            if let Some(size) = query.page_size {
                pairs.append_pair("pageSize", &size.to_string());
            }
            if let Some(orderings) = query.orderings_expr() {
                pairs.append_pair("orderings", &orderings);
            }
            if let Some(after) = &query.after {
                pairs.append_pair("after", after);
            }
        }
        self.authorize(&mut url);
        Ok(url)
    }

    fn authorize(&self, url: &mut Url) {
        if let Some(token) = &self.access_token {
            if !url.query_pairs().any(|(k, _)| k == "access_token") {
                url.query_pairs_mut().append_pair("access_token", token);
            }
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, CmsError> {
        let resp = self.client.get(url).send().await?;
        Self::handle(resp).await
    }

    async fn handle<T: DeserializeOwned>(resp: Response) -> Result<T, CmsError> {
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            return Err(CmsError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ContentSource for PrismicClient {
    async fn query(&self, query: &Query) -> Result<SearchResponse, CmsError> {
        let reference = match &query.reference {
            Some(r) => r.clone(),
            None => self.master_ref().await?,
        };
        let url = self.search_url(query, &reference)?;
        tracing::debug!("Searching {}", url);
        self.get(url).await
    }

    async fn fetch_page(&self, cursor: &str) -> Result<SearchResponse, CmsError> {
        let mut url =
            Url::parse(cursor).map_err(|e| CmsError::InvalidCursor(format!("{}: {}", cursor, e)))?;
        self.authorize(&mut url);
        tracing::debug!("Fetching next page {}", cursor);
        self.get(url).await
    }
}
