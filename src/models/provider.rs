//! Wire types for the provider APIs.
//!
//! Every optional field is decoded leniently: a value of the wrong JSON type
//! degrades to `None` instead of failing the whole payload, so normalization
//! stays total. Lists are decoded element by element; a malformed element is
//! dropped and its siblings survive.
//!
//! A Google volume without a string `id` has no identity and is dropped. A
//! NYTimes article keeps its content with an empty `_id`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Decode an optional field, discarding values that don't fit `T`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Like [`lenient`], falling back to `T::default()`
fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    lenient(deserializer).map(Option::unwrap_or_default)
}

/// Decode an optional list element by element, dropping elements that don't fit `T`
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Array(elements)) => Some(
            elements
                .into_iter()
                .filter_map(|v| serde_json::from_value(v).ok())
                .collect(),
        ),
        _ => None,
    })
}

/// Like [`lenient_list`], with an absent or malformed list decoding as empty
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    lenient_list(deserializer).map(Option::unwrap_or_default)
}

// ===== Google Books =====

/// `GET /volumes?q=...` response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleBooksSearchResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub total_items: Option<u64>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub items: Option<Vec<GoogleBooksItem>>,
}

/// A single volume, also the body of `GET /volumes/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleBooksItem {
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub authors: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub published_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_links: Option<ImageLinks>,
    #[serde(default, deserialize_with = "lenient")]
    pub average_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub ratings_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub page_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub categories: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub publisher: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub preview_link: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub info_link: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub industry_identifiers: Option<Vec<IndustryIdentifier>>,
    #[serde(default, deserialize_with = "lenient")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default, deserialize_with = "lenient")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub small_thumbnail: Option<String>,
}

/// `{ "type": "ISBN_13", "identifier": "9780441013593" }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndustryIdentifier {
    #[serde(rename = "type", default, deserialize_with = "lenient_or_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub identifier: String,
}

// ===== NYTimes Article Search =====

/// `GET /articlesearch.json` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NyTimesArticleSearchResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub response: Option<NyTimesDocs>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NyTimesDocs {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub docs: Vec<NyTimesArticle>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NyTimesArticle {
    #[serde(rename = "_id", default, deserialize_with = "lenient_or_default")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub web_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub pub_date: Option<String>,
    #[serde(rename = "abstract", default, deserialize_with = "lenient")]
    pub abstract_text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub lead_paragraph: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub byline: Option<Byline>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Byline {
    #[serde(default, deserialize_with = "lenient")]
    pub original: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_without_items() {
        let data: GoogleBooksSearchResponse =
            serde_json::from_str(r#"{"totalItems": 0}"#).unwrap();
        assert_eq!(data.total_items, Some(0));
        assert!(data.items.is_none());
    }

    #[test]
    fn test_malformed_optional_fields_degrade() {
        let item: GoogleBooksItem = serde_json::from_str(
            r#"{
                "id": "x1",
                "volumeInfo": {
                    "title": "Odd Payload",
                    "authors": "not a list",
                    "pageCount": -3,
                    "averageRating": "four",
                    "industryIdentifiers": [{"type": "ISBN_10", "identifier": "0441013597"}]
                }
            }"#,
        )
        .unwrap();

        let info = item.volume_info.unwrap();
        assert_eq!(info.title.as_deref(), Some("Odd Payload"));
        assert!(info.authors.is_none());
        assert!(info.page_count.is_none());
        assert!(info.average_rating.is_none());
        assert_eq!(info.industry_identifiers.unwrap()[0].kind, "ISBN_10");
    }

    #[test]
    fn test_article_field_names() {
        let article: NyTimesArticle = serde_json::from_str(
            r#"{
                "_id": "nyt://article/1",
                "web_url": "https://nytimes.com/review",
                "pub_date": "2023-01-01T00:00:00Z",
                "abstract": "Great book",
                "lead_paragraph": "Lead",
                "byline": {"original": "By Reviewer"}
            }"#,
        )
        .unwrap();

        assert_eq!(article.id, "nyt://article/1");
        assert_eq!(article.abstract_text.as_deref(), Some("Great book"));
        assert_eq!(article.byline.unwrap().original.as_deref(), Some("By Reviewer"));
    }

    #[test]
    fn test_bad_item_does_not_drop_batch() {
        let data: GoogleBooksSearchResponse = serde_json::from_str(
            r#"{"totalItems": 3, "items": [
                {"id": "first", "volumeInfo": {"title": "First"}},
                {"id": 7, "volumeInfo": {"title": "Numeric id"}},
                {"id": "last", "volumeInfo": {"title": "Last"}}
            ]}"#,
        )
        .unwrap();

        let ids: Vec<_> = data.items.unwrap().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["first", "last"]);
    }

    #[test]
    fn test_bad_identifier_keeps_siblings() {
        let item: GoogleBooksItem = serde_json::from_str(
            r#"{"id": "dune", "volumeInfo": {
                "industryIdentifiers": [
                    {"type": "ISBN_13", "identifier": "9780441013593"},
                    {"type": "OTHER", "identifier": 12345},
                    "garbage"
                ],
                "authors": ["Frank Herbert", 42]
            }}"#,
        )
        .unwrap();

        let info = item.volume_info.unwrap();
        let ids = info.industry_identifiers.unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0].identifier, "9780441013593");
        assert_eq!(ids[1].kind, "OTHER");
        assert_eq!(ids[1].identifier, "");
        assert_eq!(info.authors.unwrap(), vec!["Frank Herbert"]);
    }

    #[test]
    fn test_article_with_null_id_keeps_batch() {
        let data: NyTimesArticleSearchResponse = serde_json::from_str(
            r#"{"response": {"docs": [
                {"_id": "a1", "abstract": "One"},
                {"_id": null, "abstract": "Two"},
                "not an article"
            ]}}"#,
        )
        .unwrap();

        let docs = data.response.unwrap().docs;
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "a1");
        assert_eq!(docs[1].id, "");
        assert_eq!(docs[1].abstract_text.as_deref(), Some("Two"));
    }
}
