use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::domain::model::Book;
use crate::books::repository::BookRepository;
use crate::core::command::{Command, CommandError};

pub struct AddBookCommand {
    book_repository: Box<dyn BookRepository>,
}

impl AddBookCommand {
    pub fn new(book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddBookCommandRequest {
    #[serde(flatten)]
    pub book: Book,
}

impl AddBookCommandRequest {
    pub fn new(book: Book) -> Self {
        Self {
            book,
        }
    }
}


#[derive(Debug, Serialize)]
pub struct AddBookCommandResponse {
    pub book: Book,
}

impl AddBookCommandResponse {
    pub fn new(book: Book) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        self.book_repository.create(&req.book).await.map_err(CommandError::from).map(AddBookCommandResponse::new)
    }
}
