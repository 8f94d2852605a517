//! Content store items used by the site generator.

use serde::{Deserialize, Serialize};

/// Cover image attached to an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eyecatch {
    pub url: String,
    pub height: u32,
    pub width: u32,
}

/// Article category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub revised_at: Option<String>,
    pub name: String,
    pub slug: String,
}

/// Blog article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub revised_at: Option<String>,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub eyecatch: Option<Eyecatch>,
    #[serde(default)]
    pub category: Option<Category>,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    #[serde(rename = "contents")]
    pub items: Vec<T>,
    pub total_count: u32,
    pub offset: u32,
    pub limit: u32,
}

impl<T> ListResponse<T> {
    /// Whether more items exist after this page.
    pub fn has_more(&self) -> bool {
        self.offset.saturating_add(self.items.len() as u32) < self.total_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_article_list() {
        let json = r#"{
            "contents": [{
                "id": "42",
                "createdAt": "2025-01-01T00:00:00.000Z",
                "updatedAt": "2025-01-02T00:00:00.000Z",
                "publishedAt": "2025-01-01T00:00:00.000Z",
                "revisedAt": "2025-01-02T00:00:00.000Z",
                "title": "Hello",
                "content": "<p>body</p>",
                "eyecatch": { "url": "https://images.example/a.png", "height": 630, "width": 1200 },
                "category": {
                    "id": "news",
                    "createdAt": "2025-01-01T00:00:00.000Z",
                    "updatedAt": "2025-01-01T00:00:00.000Z",
                    "name": "News",
                    "slug": "news"
                }
            }],
            "totalCount": 11,
            "offset": 0,
            "limit": 10
        }"#;
        let page: ListResponse<Article> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Hello");
        assert_eq!(page.items[0].category.as_ref().unwrap().slug, "news");
        assert!(page.items[0].excerpt.is_none());
        assert!(page.has_more());
    }
}
