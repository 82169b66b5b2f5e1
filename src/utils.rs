pub mod db;
pub mod logs;
pub mod sql;
