use serde::{Deserialize, Serialize};
use crate::books::domain::model::Book;
use crate::utils::sql::SqlValue;

// BookUpdate carries every mutable field of a book, the isbn comes from the path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookUpdate {
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i64,
    pub publisher: String,
    pub title: String,
    pub year: i64,
}

impl From<&Book> for BookUpdate {
    fn from(other: &Book) -> Self {
        Self {
            amazon_url: other.amazon_url.to_string(),
            author: other.author.to_string(),
            language: other.language.to_string(),
            pages: other.pages,
            publisher: other.publisher.to_string(),
            title: other.title.to_string(),
            year: other.year,
        }
    }
}

// BookPatch carries the subset of mutable fields a partial update changes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amazon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Present fields as column/value pairs in table column order.
    pub fn fields(&self) -> Vec<(&'static str, SqlValue)> {
        let text = |v: &Option<String>| v.as_ref().map(|s| SqlValue::Text(s.to_string()));
        let int = |v: &Option<i64>| v.map(SqlValue::Integer);
        [
            ("amazon_url", text(&self.amazon_url)),
            ("author", text(&self.author)),
            ("language", text(&self.language)),
            ("pages", int(&self.pages)),
            ("publisher", text(&self.publisher)),
            ("title", text(&self.title)),
            ("year", int(&self.year)),
        ].into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use crate::books::domain::model::Book;
    use crate::books::dto::{BookPatch, BookUpdate};
    use crate::utils::sql::SqlValue;

    #[tokio::test]
    async fn test_should_build_update_from_book() {
        let book = Book::new("isbn", "title");
        let update = BookUpdate::from(&book);
        assert_eq!("title", update.title.as_str());
        assert_eq!(book.pages, update.pages);
    }

    #[tokio::test]
    async fn test_should_reject_isbn_in_update() {
        let mut val = serde_json::to_value(Book::new("isbn", "title")).expect("should serialize");
        assert!(serde_json::from_value::<BookUpdate>(val.clone()).is_err());
        if let Some(obj) = val.as_object_mut() {
            obj.remove("isbn");
        }
        assert!(serde_json::from_value::<BookUpdate>(val).is_ok());
    }

    #[tokio::test]
    async fn test_should_list_present_patch_fields() {
        let patch: BookPatch = serde_json::from_value(json!({"year": 2020, "author": "Lovely Ladybug"}))
            .expect("should parse patch");
        assert_eq!(vec![
            ("author", SqlValue::Text("Lovely Ladybug".to_string())),
            ("year", SqlValue::Integer(2020)),
        ], patch.fields());
        assert!(!patch.is_empty());
        assert!(BookPatch::default().is_empty());
    }
}
