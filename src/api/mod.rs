//! REST API handlers

pub mod books;
pub mod health;
pub mod openapi;
pub mod users;
