use sqlx::SqlitePool;
use crate::books::repository::BookRepository;
use crate::books::repository::sql_book_repository::SqlBookRepository;

pub fn create_book_repository(pool: &SqlitePool) -> Box<dyn BookRepository> {
    Box::new(SqlBookRepository::new(pool.clone(), "books"))
}
