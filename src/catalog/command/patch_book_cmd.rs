use async_trait::async_trait;
use serde::Serialize;
use crate::books::domain::model::Book;
use crate::books::dto::BookPatch;
use crate::books::repository::BookRepository;
use crate::core::command::{Command, CommandError};

pub struct PatchBookCommand {
    book_repository: Box<dyn BookRepository>,
}

impl PatchBookCommand {
    pub fn new(book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
        }
    }
}

#[derive(Debug)]
pub struct PatchBookCommandRequest {
    pub isbn: String,
    pub patch: BookPatch,
}

impl PatchBookCommandRequest {
    pub fn new(isbn: &str, patch: BookPatch) -> Self {
        Self {
            isbn: isbn.to_string(),
            patch,
        }
    }
}


#[derive(Debug, Serialize)]
pub struct PatchBookCommandResponse {
    pub book: Book,
}

impl PatchBookCommandResponse {
    pub fn new(book: Book) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<PatchBookCommandRequest, PatchBookCommandResponse> for PatchBookCommand {
    async fn execute(&self, req: PatchBookCommandRequest) -> Result<PatchBookCommandResponse, CommandError> {
        self.book_repository.update_patch(req.isbn.as_str(), &req.patch)
            .await.map_err(CommandError::from).map(PatchBookCommandResponse::new)
    }
}
