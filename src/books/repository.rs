pub mod sql_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::Book;
use crate::books::dto::{BookPatch, BookUpdate};
use crate::core::library::LibraryResult;

// BookRepository owns every read and write against the books table. Keyed
// operations fail with NotFound when no row matches the isbn.
#[async_trait]
pub trait BookRepository: Sync + Send {
    // find a book by isbn
    async fn find_one(&self, isbn: &str) -> LibraryResult<Book>;

    // all books ordered by title, then isbn
    async fn find_all(&self) -> LibraryResult<Vec<Book>>;

    // insert a book, a taken isbn fails with DuplicateKey
    async fn create(&self, book: &Book) -> LibraryResult<Book>;

    // replace every mutable field
    async fn update(&self, isbn: &str, data: &BookUpdate) -> LibraryResult<Book>;

    // change only the fields present in the patch
    async fn update_patch(&self, isbn: &str, data: &BookPatch) -> LibraryResult<Book>;

    // delete a book
    async fn remove(&self, isbn: &str) -> LibraryResult<()>;
}
