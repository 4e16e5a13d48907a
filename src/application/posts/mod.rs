mod commands;
mod queries;
mod service;
pub mod types;

pub use service::*;
pub use types::{
    CreatePostCommand, POST_CREATED, POST_DELETED, POST_UPDATED, PostError, UpdatePostCommand,
};
