//! Blog posts and their storage
//!
//! [`PostStore`] is the only code that touches the `posts` table. Reads go
//! straight to the pool; every write runs inside its own [`Transaction`]
//! so a failed statement leaves nothing behind.
//!
//! [`Transaction`]: quill_orm::Transaction

use quill_orm::{Database, ModelError, ModelResult};
use serde::Serialize;
use tracing::debug;

/// DDL for the posts table, safe to run on every start
pub const POSTS_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title VARCHAR(250) NOT NULL UNIQUE,
    subtitle VARCHAR(250) NOT NULL,
    date VARCHAR(250) NOT NULL,
    body TEXT NOT NULL,
    author VARCHAR(250) NOT NULL,
    img_url VARCHAR(250) NOT NULL
)";

const SELECT_POST: &str = "SELECT id, title, subtitle, date, body, author, img_url FROM posts";

/// Format of the `date` column, e.g. "October 19, 2026"
pub const DATE_FORMAT: &str = "%B %d, %Y";

/// Today's server-local date in [`DATE_FORMAT`]
pub fn today() -> String {
    chrono::Local::now().format(DATE_FORMAT).to_string()
}

/// A persisted post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    /// Rich HTML, rendered unescaped
    pub body: String,
    pub author: String,
    pub img_url: String,
}

/// Everything needed to create a post; the id is assigned by storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub body: String,
    pub author: String,
    pub img_url: String,
}

/// Fields to overwrite on an existing post. `None` keeps the stored value;
/// `id` and `date` can never change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub body: Option<String>,
    pub author: Option<String>,
    pub img_url: Option<String>,
}

fn post_not_found(id: i64) -> ModelError {
    ModelError::NotFound(format!("Post {}", id))
}

/// Storage accessor for posts
#[derive(Debug, Clone)]
pub struct PostStore {
    db: Database,
}

impl PostStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create the posts table if it does not exist yet
    pub async fn ensure_schema(&self) -> ModelResult<()> {
        self.db.ensure_schema(&[POSTS_SCHEMA]).await
    }

    /// All posts in insertion order
    pub async fn list_all(&self) -> ModelResult<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!("{} ORDER BY id", SELECT_POST))
            .fetch_all(self.db.pool())
            .await?;
        Ok(posts)
    }

    pub async fn find_by_id(&self, id: i64) -> ModelResult<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(&format!("{} WHERE id = ?", SELECT_POST))
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(post)
    }

    pub async fn get_by_id(&self, id: i64) -> ModelResult<Post> {
        self.find_by_id(id).await?.ok_or_else(|| post_not_found(id))
    }

    pub async fn get_by_title(&self, title: &str) -> ModelResult<Post> {
        sqlx::query_as::<_, Post>(&format!("{} WHERE title = ?", SELECT_POST))
            .bind(title)
            .fetch_optional(self.db.pool())
            .await?
            .ok_or_else(|| ModelError::NotFound(format!("Post titled '{}'", title)))
    }

    pub async fn count(&self) -> ModelResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(self.db.pool())
            .await?;
        Ok(count)
    }

    /// Insert a post and return it with its generated id. A duplicate title
    /// fails with [`ModelError::UniqueViolation`] and writes nothing.
    pub async fn insert(&self, new_post: &NewPost) -> ModelResult<Post> {
        let mut tx = self.db.begin().await?;

        let result = sqlx::query(
            "INSERT INTO posts (title, subtitle, date, body, author, img_url) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&new_post.title)
        .bind(&new_post.subtitle)
        .bind(&new_post.date)
        .bind(&new_post.body)
        .bind(&new_post.author)
        .bind(&new_post.img_url)
        .execute(tx.connection()?)
        .await?;

        let id = result.last_insert_rowid();
        tx.commit().await?;
        debug!(post_id = id, "Inserted post");

        Ok(Post {
            id,
            title: new_post.title.clone(),
            subtitle: new_post.subtitle.clone(),
            date: new_post.date.clone(),
            body: new_post.body.clone(),
            author: new_post.author.clone(),
            img_url: new_post.img_url.clone(),
        })
    }

    /// Apply `changes` to post `id` and return the updated row
    pub async fn update(&self, id: i64, changes: &PostChanges) -> ModelResult<Post> {
        let mut tx = self.db.begin().await?;

        let result = sqlx::query(
            "UPDATE posts SET \
                title = COALESCE(?, title), \
                subtitle = COALESCE(?, subtitle), \
                body = COALESCE(?, body), \
                author = COALESCE(?, author), \
                img_url = COALESCE(?, img_url) \
             WHERE id = ?",
        )
        .bind(changes.title.as_deref())
        .bind(changes.subtitle.as_deref())
        .bind(changes.body.as_deref())
        .bind(changes.author.as_deref())
        .bind(changes.img_url.as_deref())
        .bind(id)
        .execute(tx.connection()?)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(post_not_found(id));
        }

        let post = sqlx::query_as::<_, Post>(&format!("{} WHERE id = ?", SELECT_POST))
            .bind(id)
            .fetch_one(tx.connection()?)
            .await?;

        tx.commit().await?;
        debug!(post_id = id, "Updated post");
        Ok(post)
    }

    /// Hard-delete post `id`
    pub async fn delete(&self, id: i64) -> ModelResult<()> {
        let mut tx = self.db.begin().await?;

        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(tx.connection()?)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(post_not_found(id));
        }

        tx.commit().await?;
        debug!(post_id = id, "Deleted post");
        Ok(())
    }
}
