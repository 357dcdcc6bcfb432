/// Static values served when every upstream attempt of a policy has failed
///
/// Synthetic titles embed the request parameters so a caller can tell at a
/// glance that the answer did not come from the real catalog.
use crate::models::{BookRecord, UserId};

const PLACEHOLDER_COVER: &str = "https://via.placeholder.com/128x193.png";

const DEMO_USERS: [&str; 5] = ["276726", "276736", "276744", "276747", "276774"];

fn placeholder_cover(text: &str) -> String {
    format!("{PLACEHOLDER_COVER}?text={text}")
}

pub fn active_users() -> Vec<UserId> {
    DEMO_USERS.iter().copied().map(UserId::from).collect()
}

pub fn popular_books() -> Vec<BookRecord> {
    vec![
        BookRecord::new(
            "0440234743",
            "Example Book One",
            "Author A",
            2001,
            "Publisher A",
            placeholder_cover("Book+1"),
        ),
        BookRecord::new(
            "0671027034",
            "Example Book Two",
            "Author B",
            1999,
            "Publisher B",
            placeholder_cover("Book+2"),
        ),
    ]
}

pub fn content_recommendations(isbn: &str) -> Vec<BookRecord> {
    vec![BookRecord::new(
        isbn,
        format!("Content-similar to {isbn} - A"),
        "Author A",
        2005,
        "Publisher A",
        placeholder_cover("Content+1"),
    )]
}

pub fn hybrid_recommendations(user_id: &UserId) -> Vec<BookRecord> {
    vec![
        BookRecord::new(
            "0440234743",
            format!("Recommended for {user_id} - A"),
            "Author A",
            2001,
            "Publisher A",
            placeholder_cover("Rec+1"),
        ),
        BookRecord::new(
            "0671027034",
            format!("Recommended for {user_id} - B"),
            "Author B",
            1999,
            "Publisher B",
            placeholder_cover("Rec+2"),
        ),
    ]
}

/// Keeps the requested isbn so the caller can still link back to it
pub fn unknown_book(isbn: &str) -> BookRecord {
    BookRecord {
        isbn: isbn.to_string(),
        title: "Unknown Book".to_string(),
        author: "Unknown Author".to_string(),
        year: 0,
        publisher: "Unknown Publisher".to_string(),
        image_url: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_users_never_empty() {
        let users = active_users();
        assert_eq!(users.len(), 5);
        assert_eq!(users[0], UserId::new("276726"));
        assert_eq!(users[4], UserId::new("276774"));
    }

    #[test]
    fn test_popular_books_literals() {
        let books = popular_books();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].isbn, "0440234743");
        assert_eq!(
            books[0].image_url,
            "https://via.placeholder.com/128x193.png?text=Book+1"
        );
        assert_eq!(books[1].title, "Example Book Two");
        assert_eq!(books[1].year, 1999);
    }

    #[test]
    fn test_content_substitute_tags_isbn() {
        let books = content_recommendations("0316666343");
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].isbn, "0316666343");
        assert_eq!(books[0].title, "Content-similar to 0316666343 - A");
    }

    #[test]
    fn test_hybrid_substitute_tags_user() {
        let books = hybrid_recommendations(&UserId::new("276726"));
        assert_eq!(books[0].title, "Recommended for 276726 - A");
        assert_eq!(books[1].title, "Recommended for 276726 - B");
    }

    #[test]
    fn test_unknown_book_placeholders() {
        let book = unknown_book("123");
        assert_eq!(book.isbn, "123");
        assert_eq!(book.title, "Unknown Book");
        assert_eq!(book.author, "Unknown Author");
        assert_eq!(book.publisher, "Unknown Publisher");
        assert_eq!(book.year, 0);
        assert!(book.image_url.is_empty());
    }
}
