// src/services/content.rs

//! Read-only client for the headless content store.
//!
//! Used by the site generator and the CLI; the webhook pipeline never
//! calls it.

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::models::{Article, Category, ContentApiConfig, ContentConfig, ListResponse};

const API_KEY_HEADER: &str = "X-MICROCMS-API-KEY";
const ARTICLE_ENDPOINT: &str = "blog";
const CATEGORY_ENDPOINT: &str = "category";

/// Content API client.
pub struct ContentClient {
    client: Client,
    base_url: String,
    api_key: String,
    category_page_size: u32,
}

impl ContentClient {
    /// Create a client for the service named in `credentials`.
    pub fn new(client: Client, settings: &ContentApiConfig, credentials: &ContentConfig) -> Self {
        let base_url = settings
            .api_base_template
            .replace("{service}", &credentials.service_domain);
        Self::with_base_url(client, base_url, &credentials.api_key)
            .with_category_page_size(settings.category_page_size)
    }

    /// Create a client against an explicit base URL.
    pub fn with_base_url(client: Client, base_url: impl Into<String>, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            category_page_size: 100,
        }
    }

    pub fn with_category_page_size(mut self, size: u32) -> Self {
        self.category_page_size = size;
        self
    }

    /// List articles, newest first.
    pub async fn list_articles(&self, limit: u32, offset: u32) -> Result<ListResponse<Article>> {
        let query = [
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
            ("orders", "-publishedAt".to_string()),
        ];
        self.get_json(ARTICLE_ENDPOINT, &query).await
    }

    /// Fetch a single article.
    pub async fn get_article(&self, id: &str) -> Result<Article> {
        if id.trim().is_empty() {
            return Err(AppError::validation("article id is empty"));
        }
        self.get_json(&format!("{ARTICLE_ENDPOINT}/{id}"), &[]).await
    }

    /// List all categories.
    pub async fn list_categories(&self) -> Result<ListResponse<Category>> {
        let query = [("limit", self.category_page_size.to_string())];
        self.get_json(CATEGORY_ENDPOINT, &query).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::content(
                endpoint,
                format!("HTTP {}: {}", status.as_u16(), body.trim()),
            ));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn article(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "createdAt": "2025-01-01T00:00:00.000Z",
            "updatedAt": "2025-01-01T00:00:00.000Z",
            "title": format!("Article {id}"),
            "content": "<p>hi</p>"
        })
    }

    fn client(server: &MockServer) -> ContentClient {
        ContentClient::with_base_url(Client::new(), format!("{}/api/v1/", server.uri()), "key")
    }

    #[tokio::test]
    async fn test_list_articles_sends_paging_and_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/blog"))
            .and(header(API_KEY_HEADER, "key"))
            .and(query_param("limit", "2"))
            .and(query_param("offset", "4"))
            .and(query_param("orders", "-publishedAt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "contents": [article("a"), article("b")],
                "totalCount": 6,
                "offset": 4,
                "limit": 2
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client(&server).list_articles(2, 4).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_count, 6);
        assert!(!page.has_more());
    }

    #[tokio::test]
    async fn test_get_article() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/blog/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(article("42")))
            .mount(&server)
            .await;

        let item = client(&server).get_article("42").await.unwrap();
        assert_eq!(item.id, "42");
        assert_eq!(item.title, "Article 42");
    }

    #[tokio::test]
    async fn test_list_categories_uses_page_size() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/category"))
            .and(query_param("limit", "25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "contents": [{
                    "id": "news",
                    "createdAt": "2025-01-01T00:00:00.000Z",
                    "updatedAt": "2025-01-01T00:00:00.000Z",
                    "name": "News",
                    "slug": "news"
                }],
                "totalCount": 1,
                "offset": 0,
                "limit": 25
            })))
            .mount(&server)
            .await;

        let categories = client(&server)
            .with_category_page_size(25)
            .list_categories()
            .await
            .unwrap();
        assert_eq!(categories.items[0].name, "News");
    }

    #[tokio::test]
    async fn test_error_status_maps_to_content_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let err = client(&server).get_article("42").await.unwrap_err();
        assert!(matches!(err, AppError::Content { .. }));
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn test_base_url_from_template() {
        let credentials = ContentConfig {
            service_domain: "novelty".to_string(),
            api_key: "k".to_string(),
        };
        let client = ContentClient::new(Client::new(), &ContentApiConfig::default(), &credentials);
        assert_eq!(client.base_url, "https://novelty.microcms.io/api/v1");
        assert_eq!(client.category_page_size, 100);
    }
}
