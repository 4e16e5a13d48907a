//! Application services layer.

pub mod error;
pub mod flash;
pub mod posts;
pub mod repos;
pub mod screen;
