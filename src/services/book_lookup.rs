use crate::{
    error::AttemptError,
    models::BookRecord,
    services::{
        fallback::{Resolved, ResolutionPolicy},
        gateway::RecommendationGateway,
        substitutes,
    },
};

/// Linear scan for an exact catalog-key match
pub fn find_by_isbn(books: Vec<BookRecord>, isbn: &str) -> Option<BookRecord> {
    books.into_iter().find(|book| book.isbn == isbn)
}

impl RecommendationGateway {
    /// Resolves a single book by its catalog key
    ///
    /// The backend has no lookup endpoint, so this searches the popular list
    /// first and then takes the top content-similarity hit for `isbn`. The
    /// second step relies on the similarity query usually ranking the seed
    /// book first; that is an approximation, not a guarantee. Never reports
    /// "not found": the last resort is a placeholder carrying `isbn`.
    pub async fn resolve_book_by_isbn(&self, isbn: &str) -> Resolved<BookRecord> {
        ResolutionPolicy::new("book_by_isbn")
            .attempt("popular_scan", move || async move {
                let books = self.fetch_popular().await?;
                find_by_isbn(books, isbn).ok_or_else(|| AttemptError::NoMatch(isbn.to_string()))
            })
            .attempt("content_top_match", move || async move {
                self.fetch_content(isbn)
                    .await?
                    .into_iter()
                    .next()
                    .ok_or(AttemptError::Empty)
            })
            .resolve(|| substitutes::unknown_book(isbn))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{
        fallback::Source,
        upstream::{FetchOutcome, MockUpstream},
    };
    use reqwest::StatusCode;
    use serde_json::json;
    use std::sync::Arc;

    fn book(isbn: &str, title: &str) -> BookRecord {
        BookRecord::new(isbn, title, "Author", 2000, "Publisher", "")
    }

    #[test]
    fn test_find_by_isbn_exact_match_only() {
        let books = vec![book("0440234743", "One"), book("0671027034", "Two")];

        assert_eq!(
            find_by_isbn(books.clone(), "0671027034").map(|b| b.title),
            Some("Two".to_string())
        );
        assert!(find_by_isbn(books.clone(), "067102703").is_none());
        assert!(find_by_isbn(books, " 0671027034").is_none());
    }

    #[tokio::test]
    async fn test_popular_match_skips_content() {
        let mut upstream = MockUpstream::new();
        upstream
            .expect_get_json()
            .withf(|path: &str| path == "/recommend/popular")
            .times(1)
            .returning(|_| {
                FetchOutcome::Ok(json!([
                    {"ISBN": "0440234743", "Book-Title": "The Testament"},
                    {"ISBN": "0671027034", "Book-Title": "Angels"}
                ]))
            });
        upstream
            .expect_get_json()
            .withf(|path: &str| path.starts_with("/recommend/content/"))
            .never();

        let gateway = RecommendationGateway::new(Arc::new(upstream));
        let resolved = gateway.resolve_book_by_isbn("0671027034").await;

        assert_eq!(resolved.source, Source::Attempt("popular_scan"));
        assert_eq!(resolved.value.isbn, "0671027034");
        assert_eq!(resolved.value.title, "Angels");
    }

    #[tokio::test]
    async fn test_falls_back_to_first_content_result() {
        let mut upstream = MockUpstream::new();
        upstream
            .expect_get_json()
            .withf(|path: &str| path == "/recommend/popular")
            .times(1)
            .returning(|_| FetchOutcome::Ok(json!([{"ISBN": "1", "Book-Title": "Other"}])));
        upstream
            .expect_get_json()
            .withf(|path: &str| path == "/recommend/content/0316666343")
            .times(1)
            .returning(|_| {
                FetchOutcome::Ok(json!([
                    {"ISBN": "0316666343", "Book-Title": "The Lovely Bones"},
                    {"ISBN": "0385504209", "Book-Title": "The Da Vinci Code"}
                ]))
            });

        let gateway = RecommendationGateway::new(Arc::new(upstream));
        let resolved = gateway.resolve_book_by_isbn("0316666343").await;

        assert_eq!(resolved.source, Source::Attempt("content_top_match"));
        assert_eq!(resolved.value.title, "The Lovely Bones");
    }

    #[tokio::test]
    async fn test_popular_down_still_tries_content() {
        let mut upstream = MockUpstream::new();
        upstream
            .expect_get_json()
            .withf(|path: &str| path == "/recommend/popular")
            .times(1)
            .returning(|_| FetchOutcome::NotOk(StatusCode::SERVICE_UNAVAILABLE));
        upstream
            .expect_get_json()
            .withf(|path: &str| path == "/recommend/content/42")
            .times(1)
            .returning(|_| FetchOutcome::Ok(json!([{"ISBN": "99", "Book-Title": "Neighbor"}])));

        let gateway = RecommendationGateway::new(Arc::new(upstream));
        let resolved = gateway.resolve_book_by_isbn("42").await;

        assert_eq!(resolved.value.isbn, "99");
    }

    #[tokio::test]
    async fn test_absent_everywhere_yields_placeholder() {
        let mut upstream = MockUpstream::new();
        upstream
            .expect_get_json()
            .withf(|path: &str| path == "/recommend/popular")
            .times(1)
            .returning(|_| FetchOutcome::Ok(json!([{"ISBN": "1", "Book-Title": "Other"}])));
        upstream
            .expect_get_json()
            .withf(|path: &str| path == "/recommend/content/missing")
            .times(1)
            .returning(|_| FetchOutcome::Ok(json!([])));

        let gateway = RecommendationGateway::new(Arc::new(upstream));
        let resolved = gateway.resolve_book_by_isbn("missing").await;

        assert!(resolved.source.is_substitute());
        assert_eq!(resolved.value, substitutes::unknown_book("missing"));
    }
}
