pub mod model;

// Columns of the books table that may change after a book is created
pub const MUTABLE_FIELDS: [&str; 7] = [
    "amazon_url",
    "author",
    "language",
    "pages",
    "publisher",
    "title",
    "year",
];

// Fields that must hold JSON integers, all others are strings
pub const INTEGER_FIELDS: [&str; 2] = ["pages", "year"];

pub const KEY_FIELD: &str = "isbn";
