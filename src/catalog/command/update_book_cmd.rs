use async_trait::async_trait;
use serde::Serialize;
use crate::books::domain::model::Book;
use crate::books::dto::BookUpdate;
use crate::books::repository::BookRepository;
use crate::core::command::{Command, CommandError};

pub struct UpdateBookCommand {
    book_repository: Box<dyn BookRepository>,
}

impl UpdateBookCommand {
    pub fn new(book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
        }
    }
}

#[derive(Debug)]
pub struct UpdateBookCommandRequest {
    pub isbn: String,
    pub data: BookUpdate,
}

impl UpdateBookCommandRequest {
    pub fn new(isbn: &str, data: BookUpdate) -> Self {
        Self {
            isbn: isbn.to_string(),
            data,
        }
    }
}


#[derive(Debug, Serialize)]
pub struct UpdateBookCommandResponse {
    pub book: Book,
}

impl UpdateBookCommandResponse {
    pub fn new(book: Book) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        self.book_repository.update(req.isbn.as_str(), &req.data)
            .await.map_err(CommandError::from).map(UpdateBookCommandResponse::new)
    }
}
