use async_trait::async_trait;
use serde::Serialize;
use crate::books::domain::model::Book;
use crate::books::repository::BookRepository;
use crate::core::command::{Command, CommandError};

pub struct ListBooksCommand {
    book_repository: Box<dyn BookRepository>,
}

impl ListBooksCommand {
    pub fn new(book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
        }
    }
}

#[derive(Debug, Default)]
pub struct ListBooksCommandRequest {}

#[derive(Debug, Serialize)]
pub struct ListBooksCommandResponse {
    pub books: Vec<Book>,
}

impl ListBooksCommandResponse {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books,
        }
    }
}

#[async_trait]
impl Command<ListBooksCommandRequest, ListBooksCommandResponse> for ListBooksCommand {
    async fn execute(&self, _req: ListBooksCommandRequest) -> Result<ListBooksCommandResponse, CommandError> {
        self.book_repository.find_all()
            .await.map_err(CommandError::from).map(ListBooksCommandResponse::new)
    }
}
