use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::books::domain::model::Book;
use crate::books::domain::MUTABLE_FIELDS;
use crate::books::dto::{BookPatch, BookUpdate};
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::sql::{sql_for_partial_update, SqlValue};

const BOOK_COLUMNS: &str = "isbn, amazon_url, author, language, pages, publisher, title, year";

#[derive(Debug, Clone)]
pub struct SqlBookRepository {
    pool: SqlitePool,
    table_name: String,
}

impl SqlBookRepository {
    pub fn new(pool: SqlitePool, table_name: &str) -> Self {
        Self {
            pool,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl BookRepository for SqlBookRepository {
    async fn find_one(&self, isbn: &str) -> LibraryResult<Book> {
        let sql = format!("SELECT {} FROM {} WHERE isbn = $1", BOOK_COLUMNS, self.table_name);
        tracing::debug!(isbn, "finding book");
        sqlx::query_as::<_, Book>(sql.as_str())
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| LibraryError::book_not_found(isbn))
    }

    async fn find_all(&self) -> LibraryResult<Vec<Book>> {
        let sql = format!("SELECT {} FROM {} ORDER BY title COLLATE NOCASE, title, isbn", BOOK_COLUMNS, self.table_name);
        let books = sqlx::query_as::<_, Book>(sql.as_str())
            .fetch_all(&self.pool)
            .await?;
        tracing::debug!(count = books.len(), "listed books");
        Ok(books)
    }

    async fn create(&self, book: &Book) -> LibraryResult<Book> {
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            self.table_name, BOOK_COLUMNS, BOOK_COLUMNS);
        let res = sqlx::query_as::<_, Book>(sql.as_str())
            .bind(&book.isbn)
            .bind(&book.amazon_url)
            .bind(&book.author)
            .bind(&book.language)
            .bind(book.pages)
            .bind(&book.publisher)
            .bind(&book.title)
            .bind(book.year)
            .fetch_one(&self.pool)
            .await
            .map_err(LibraryError::from);
        match res {
            Ok(created) => {
                tracing::debug!(isbn = %created.isbn, "created book");
                Ok(created)
            }
            Err(LibraryError::DuplicateKey { .. }) => {
                tracing::warn!(isbn = %book.isbn, "duplicate isbn");
                Err(LibraryError::duplicate_key(
                    format!("A book with isbn '{}' already exists", book.isbn).as_str()))
            }
            Err(err) => Err(err),
        }
    }

    async fn update(&self, isbn: &str, data: &BookUpdate) -> LibraryResult<Book> {
        let sql = format!(
            "UPDATE {} SET amazon_url=$1, author=$2, language=$3, pages=$4, publisher=$5, title=$6, year=$7 \
             WHERE isbn=$8 RETURNING {}",
            self.table_name, BOOK_COLUMNS);
        tracing::debug!(isbn, "updating book");
        sqlx::query_as::<_, Book>(sql.as_str())
            .bind(&data.amazon_url)
            .bind(&data.author)
            .bind(&data.language)
            .bind(data.pages)
            .bind(&data.publisher)
            .bind(&data.title)
            .bind(data.year)
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| LibraryError::book_not_found(isbn))
    }

    async fn update_patch(&self, isbn: &str, data: &BookPatch) -> LibraryResult<Book> {
        let update = sql_for_partial_update(data.fields(), &MUTABLE_FIELDS, &HashMap::new())?;
        let sql = format!(
            "UPDATE {} SET {} WHERE isbn=${} RETURNING {}",
            self.table_name, update.set_cols, update.next_index(), BOOK_COLUMNS);
        tracing::debug!(isbn, set_cols = %update.set_cols, "patching book");
        let mut query = sqlx::query_as::<_, Book>(sql.as_str());
        for value in update.values {
            query = match value {
                SqlValue::Text(s) => query.bind(s),
                SqlValue::Integer(i) => query.bind(i),
            };
        }
        query.bind(isbn)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| LibraryError::book_not_found(isbn))
    }

    async fn remove(&self, isbn: &str) -> LibraryResult<()> {
        let sql = format!("DELETE FROM {} WHERE isbn = $1", self.table_name);
        let res = sqlx::query(sql.as_str())
            .bind(isbn)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            tracing::warn!(isbn, "no book to delete");
            return Err(LibraryError::book_not_found(isbn));
        }
        tracing::debug!(isbn, "deleted book");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::Book;
    use crate::books::dto::{BookPatch, BookUpdate};
    use crate::books::repository::BookRepository;
    use crate::books::repository::sql_book_repository::SqlBookRepository;
    use crate::core::library::LibraryError;
    use crate::utils::db::build_test_pool;

    async fn build_repo() -> SqlBookRepository {
        SqlBookRepository::new(build_test_pool().await, "books")
    }

    #[tokio::test]
    async fn test_should_create_get_books() {
        let books_repo = build_repo().await;
        let book = Book::new("0691161518", "Power-Up: Unlocking the Hidden Mathematics in Video Games");
        let created = books_repo.create(&book).await.expect("should create book");
        assert_eq!(book, created);

        let loaded = books_repo.find_one(book.isbn.as_str()).await.expect("should return book");
        assert_eq!(book, loaded);
    }

    #[tokio::test]
    async fn test_should_fail_get_for_missing_isbn() {
        let books_repo = build_repo().await;
        let res = books_repo.find_one("06911615181").await;
        assert_eq!(Err(LibraryError::book_not_found("06911615181")), res);
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_isbn() {
        let books_repo = build_repo().await;
        let book = Book::new("0691161518", "first");
        let _ = books_repo.create(&book).await.expect("should create book");

        let dup = Book::new("0691161518", "second");
        let res = books_repo.create(&dup).await;
        assert!(matches!(res, Err(LibraryError::DuplicateKey { .. })));

        let all = books_repo.find_all().await.expect("should list books");
        assert_eq!(1, all.len());
        assert_eq!("first", all[0].title.as_str());
    }

    #[tokio::test]
    async fn test_should_list_books_by_title() {
        let books_repo = build_repo().await;
        for (isbn, title) in [("3", "Charlie"), ("2", "Alpha"), ("9", "Bravo"), ("1", "Bravo")] {
            let _ = books_repo.create(&Book::new(isbn, title)).await.expect("should create book");
        }
        let all = books_repo.find_all().await.expect("should list books");
        let keys: Vec<(&str, &str)> = all.iter().map(|b| (b.title.as_str(), b.isbn.as_str())).collect();
        assert_eq!(vec![("Alpha", "2"), ("Bravo", "1"), ("Bravo", "9"), ("Charlie", "3")], keys);
    }

    #[tokio::test]
    async fn test_should_list_mixed_case_titles_together() {
        let books_repo = build_repo().await;
        for (isbn, title) in [("1", "zebra"), ("2", "Apple"), ("3", "apple"), ("4", "Zulu")] {
            let _ = books_repo.create(&Book::new(isbn, title)).await.expect("should create book");
        }
        let all = books_repo.find_all().await.expect("should list books");
        let titles: Vec<&str> = all.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(vec!["Apple", "apple", "zebra", "Zulu"], titles);
    }

    #[tokio::test]
    async fn test_should_create_update_books() {
        let books_repo = build_repo().await;
        let book = Book::new("0691161518", "test book");
        let _ = books_repo.create(&book).await.expect("should create book");

        let mut data = BookUpdate::from(&book);
        data.author = "Lovely Ladybug".to_string();
        data.title = "Power-Up: Unlocking the Hidden Mathematics in Bugs".to_string();
        let updated = books_repo.update(book.isbn.as_str(), &data).await.expect("should update book");
        assert_eq!("Lovely Ladybug", updated.author.as_str());
        assert_eq!(book.isbn, updated.isbn);

        let loaded = books_repo.find_one(book.isbn.as_str()).await.expect("should return book");
        assert_eq!(updated, loaded);
    }

    #[tokio::test]
    async fn test_should_fail_update_for_missing_isbn() {
        let books_repo = build_repo().await;
        let data = BookUpdate::from(&Book::new("x", "y"));
        let res = books_repo.update("missing", &data).await;
        assert!(matches!(res, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_patch_only_given_fields() {
        let books_repo = build_repo().await;
        let book = Book::new("0691161518", "test book");
        let _ = books_repo.create(&book).await.expect("should create book");

        let patch = BookPatch {
            pages: Some(300),
            title: Some("patched".to_string()),
            ..Default::default()
        };
        let patched = books_repo.update_patch(book.isbn.as_str(), &patch).await.expect("should patch book");
        assert_eq!(Book { pages: 300, title: "patched".to_string(), ..book.clone() }, patched);

        let loaded = books_repo.find_one(book.isbn.as_str()).await.expect("should return book");
        assert_eq!(patched, loaded);
    }

    #[tokio::test]
    async fn test_should_fail_patch_without_data() {
        let books_repo = build_repo().await;
        let book = Book::new("0691161518", "test book");
        let _ = books_repo.create(&book).await.expect("should create book");

        let res = books_repo.update_patch(book.isbn.as_str(), &BookPatch::default()).await;
        assert_eq!(Err(LibraryError::validation("No data", None)), res);
    }

    #[tokio::test]
    async fn test_should_fail_patch_for_missing_isbn() {
        let books_repo = build_repo().await;
        let patch = BookPatch { year: Some(1999), ..Default::default() };
        let res = books_repo.update_patch("missing", &patch).await;
        assert!(matches!(res, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_create_delete_books() {
        let books_repo = build_repo().await;
        let book = Book::new("0691161518", "test book");
        let _ = books_repo.create(&book).await.expect("should create book");

        books_repo.remove(book.isbn.as_str()).await.expect("should delete book");

        let loaded = books_repo.find_one(book.isbn.as_str()).await;
        assert!(matches!(loaded, Err(LibraryError::NotFound { .. })));

        let res = books_repo.remove(book.isbn.as_str()).await;
        assert!(matches!(res, Err(LibraryError::NotFound { .. })));
    }
}
