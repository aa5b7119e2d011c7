pub mod blogs;
pub mod common;
pub mod news;
