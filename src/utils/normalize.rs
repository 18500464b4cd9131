//! Normalization of provider payloads into [`Book`] and [`BookReview`].
//!
//! Both functions are total: missing or malformed optional fields fall back to
//! defaults and never make normalization fail.

use crate::models::{Book, BookReview, GoogleBooksItem, NyTimesArticle, UNTITLED};

/// Display name for NYTimes reviews
pub const NYTIMES_SOURCE_NAME: &str = "The New York Times";

/// Prefix for synthesized NYTimes review ids
pub const NYTIMES_SOURCE_TAG: &str = "nyt";

/// Byline used when the article has none
pub const NYTIMES_STAFF_BYLINE: &str = "NYTimes Staff";

/// Map a Google Books volume to a [`Book`]
pub fn normalize_catalog_item(item: GoogleBooksItem) -> Book {
    let info = item.volume_info.unwrap_or_default();

    let isbn = info.industry_identifiers.as_deref().and_then(|ids| {
        let find = |kind: &str| {
            ids.iter()
                .find(|id| id.kind == kind && !id.identifier.is_empty())
                .map(|id| id.identifier.clone())
        };
        find("ISBN_13").or_else(|| find("ISBN_10"))
    });

    let thumbnail = info
        .image_links
        .and_then(|links| links.thumbnail)
        .map(|url| secure_url(&url));

    let title = info
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());

    let mut book = Book::new(item.id, title, info.authors.unwrap_or_default());
    book.published_date = info.published_date;
    book.description = info.description;
    book.thumbnail = thumbnail;
    book.average_rating = info.average_rating;
    book.ratings_count = info.ratings_count;
    book.page_count = info.page_count;
    book.categories = info.categories;
    book.publisher = info.publisher;
    book.preview_link = info.preview_link;
    book.info_link = info.info_link;
    book.isbn = isbn;
    book.language = info.language;
    book
}

/// Map a NYTimes article at position `index` of its batch to a [`BookReview`]
pub fn normalize_review_article(article: NyTimesArticle, index: usize) -> BookReview {
    let author = article
        .byline
        .and_then(|b| b.original)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| NYTIMES_STAFF_BYLINE.to_string());

    let date = article
        .pub_date
        .as_deref()
        .and_then(|d| d.split('T').next())
        .unwrap_or_default()
        .to_string();

    let summary = article
        .abstract_text
        .filter(|s| !s.is_empty())
        .or_else(|| article.lead_paragraph.filter(|s| !s.is_empty()))
        .unwrap_or_default();

    BookReview {
        id: format!("{}-{}-{}", NYTIMES_SOURCE_TAG, index, article.id),
        source: NYTIMES_SOURCE_NAME.to_string(),
        author,
        date,
        summary,
        url: article.web_url.unwrap_or_default(),
    }
}

/// Upgrade an `http://` URL to `https://`, leaving anything else untouched
fn secure_url(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNKNOWN_AUTHOR;

    fn item(json: serde_json::Value) -> GoogleBooksItem {
        serde_json::from_value(json).unwrap()
    }

    fn article(json: serde_json::Value) -> NyTimesArticle {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_missing_authors_become_unknown() {
        let book = normalize_catalog_item(item(serde_json::json!({
            "id": "book1",
            "volumeInfo": {"title": "Anonymous Tales"}
        })));
        assert_eq!(book.authors, vec![UNKNOWN_AUTHOR.to_string()]);

        let book = normalize_catalog_item(item(serde_json::json!({
            "id": "book1",
            "volumeInfo": {"title": "Anonymous Tales", "authors": []}
        })));
        assert_eq!(book.authors, vec![UNKNOWN_AUTHOR.to_string()]);
    }

    #[test]
    fn test_isbn_prefers_13_digit() {
        let book = normalize_catalog_item(item(serde_json::json!({
            "id": "dune",
            "volumeInfo": {
                "title": "Dune",
                "industryIdentifiers": [
                    {"type": "ISBN_10", "identifier": "0441013597"},
                    {"type": "ISBN_13", "identifier": "9780441013593"}
                ]
            }
        })));
        assert_eq!(book.isbn.as_deref(), Some("9780441013593"));

        let book = normalize_catalog_item(item(serde_json::json!({
            "id": "dune",
            "volumeInfo": {
                "title": "Dune",
                "industryIdentifiers": [
                    {"type": "OTHER", "identifier": "UOM:39015"},
                    {"type": "ISBN_10", "identifier": "0441013597"}
                ]
            }
        })));
        assert_eq!(book.isbn.as_deref(), Some("0441013597"));

        let book = normalize_catalog_item(item(serde_json::json!({
            "id": "dune",
            "volumeInfo": {"title": "Dune", "industryIdentifiers": [{"type": "OTHER", "identifier": "X"}]}
        })));
        assert!(book.isbn.is_none());
    }

    #[test]
    fn test_isbn_survives_malformed_sibling() {
        let book = normalize_catalog_item(item(serde_json::json!({
            "id": "dune",
            "volumeInfo": {
                "title": "Dune",
                "industryIdentifiers": [
                    {"type": "ISBN_13", "identifier": "9780441013593"},
                    {"type": "OTHER", "identifier": 12345}
                ]
            }
        })));
        assert_eq!(book.isbn.as_deref(), Some("9780441013593"));
    }

    #[test]
    fn test_thumbnail_upgraded_to_https() {
        let book = normalize_catalog_item(item(serde_json::json!({
            "id": "b",
            "volumeInfo": {
                "title": "T",
                "imageLinks": {"thumbnail": "http://books.google.com/content?id=b&zoom=1"}
            }
        })));
        assert_eq!(
            book.thumbnail.as_deref(),
            Some("https://books.google.com/content?id=b&zoom=1")
        );

        let book = normalize_catalog_item(item(serde_json::json!({
            "id": "b",
            "volumeInfo": {"title": "T", "imageLinks": {"thumbnail": "https://cdn/x.jpg"}}
        })));
        assert_eq!(book.thumbnail.as_deref(), Some("https://cdn/x.jpg"));

        let book = normalize_catalog_item(item(serde_json::json!({
            "id": "b",
            "volumeInfo": {"title": "T", "imageLinks": {"smallThumbnail": "http://cdn/s.jpg"}}
        })));
        assert!(book.thumbnail.is_none());
    }

    #[test]
    fn test_full_volume_maps_every_field() {
        let book = normalize_catalog_item(item(serde_json::json!({
            "id": "zyTCAlFPjgYC",
            "volumeInfo": {
                "title": "The Google Story",
                "authors": ["David A. Vise", "Mark Malseed"],
                "publishedDate": "2005-11-15",
                "description": "An inside look",
                "averageRating": 3.5,
                "ratingsCount": 136,
                "pageCount": 207,
                "categories": ["Browsers (Computer programs)"],
                "publisher": "Random House Digital, Inc.",
                "previewLink": "http://books.google.com/preview",
                "infoLink": "http://books.google.com/info",
                "language": "en"
            }
        })));

        assert_eq!(book.id, "zyTCAlFPjgYC");
        assert_eq!(book.authors, vec!["David A. Vise", "Mark Malseed"]);
        assert_eq!(book.published_date.as_deref(), Some("2005-11-15"));
        assert_eq!(book.average_rating, Some(3.5));
        assert_eq!(book.ratings_count, Some(136));
        assert_eq!(book.page_count, Some(207));
        assert_eq!(book.publisher.as_deref(), Some("Random House Digital, Inc."));
        // Only the thumbnail gets upgraded
        assert_eq!(book.preview_link.as_deref(), Some("http://books.google.com/preview"));
        assert_eq!(book.language.as_deref(), Some("en"));
    }

    #[test]
    fn test_missing_volume_info_still_has_title_and_author() {
        let book = normalize_catalog_item(item(serde_json::json!({"id": "bare"})));
        assert_eq!(book.title, UNTITLED);
        assert_eq!(book.authors, vec![UNKNOWN_AUTHOR.to_string()]);
    }

    #[test]
    fn test_review_fields() {
        let review = normalize_review_article(
            article(serde_json::json!({
                "_id": "nyt://article/abc",
                "web_url": "https://nytimes.com/review",
                "pub_date": "2023-01-01T05:00:00+0000",
                "abstract": "Great book",
                "lead_paragraph": "Lead",
                "byline": {"original": "By Reviewer"}
            })),
            2,
        );

        assert_eq!(review.id, "nyt-2-nyt://article/abc");
        assert_eq!(review.source, NYTIMES_SOURCE_NAME);
        assert_eq!(review.author, "By Reviewer");
        assert_eq!(review.date, "2023-01-01");
        assert_eq!(review.summary, "Great book");
        assert_eq!(review.url, "https://nytimes.com/review");
    }

    #[test]
    fn test_review_fallbacks() {
        let review = normalize_review_article(
            article(serde_json::json!({
                "_id": "a1",
                "web_url": "https://nytimes.com/r",
                "abstract": "",
                "lead_paragraph": "Opening lines"
            })),
            0,
        );
        assert_eq!(review.author, NYTIMES_STAFF_BYLINE);
        assert_eq!(review.date, "");
        assert_eq!(review.summary, "Opening lines");

        let review = normalize_review_article(article(serde_json::json!({"_id": "a2"})), 1);
        assert_eq!(review.summary, "");
        assert_eq!(review.url, "");
    }
}
