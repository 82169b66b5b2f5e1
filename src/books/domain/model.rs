use serde::{Deserialize, Serialize};

// Book is the catalog record, keyed by its isbn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i64,
    pub publisher: String,
    pub title: String,
    pub year: i64,
}

impl Book {
    pub fn new(isbn: &str, title: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
            amazon_url: "http://a.co/eobPtX2".to_string(),
            author: "Matthew Lane".to_string(),
            language: "english".to_string(),
            pages: 264,
            publisher: "Princeton University Press".to_string(),
            title: title.to_string(),
            year: 2017,
        }
    }
}
