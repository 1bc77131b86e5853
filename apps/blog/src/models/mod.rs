pub mod post;

pub use post::{today, NewPost, Post, PostChanges, PostStore, POSTS_SCHEMA};
