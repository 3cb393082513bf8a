use crate::api::APIError;
use crate::{models::*, trace_handler};
use actix::prelude::*;

pub struct SqliteStore {
    started_at: chrono::DateTime<chrono::Utc>,
    connection: sqlite::Connection,
}

impl SqliteStore {
    pub fn new<P: AsRef<str>>(path: P) -> Result<Self, sqlite::Error> {
        let instance = Self {
            started_at: chrono::Utc::now(),
            connection: sqlite::Connection::open(path.as_ref())?,
        };

        super::migrations::run_migrations(&instance.connection)?;

        Ok(instance)
    }

    fn read_post(query: &sqlite::Statement<'_>) -> Result<Post, APIError> {
        let tags: String = query.read("tags")?;

        Ok(Post {
            slug: query.read("slug")?,
            title: query.read("title")?,
            category: query.read("category")?,
            tags: serde_json::from_str(&tags)?,
            image: query.read("image")?,
        })
    }

    fn get_post(&self, slug: &str) -> Result<Post, APIError> {
        let mut query = self.connection.prepare(
            "SELECT slug, title, category, tags, image FROM posts WHERE slug = ? LIMIT 1",
        )?;
        query.bind((1, slug))?;

        if sqlite::State::Row == query.next()? {
            Self::read_post(&query)
        } else {
            Err(APIError::new(
                404,
                "Not Found",
                "The post you requested could not be found.",
            ))
        }
    }

    fn upsert_post(&self, post: &Post) -> Result<(), APIError> {
        let tags = serde_json::to_string(&post.tags)?;
        let updated_at = chrono::Utc::now().to_rfc3339();

        let mut query = self.connection.prepare(
            "INSERT INTO posts (slug, title, category, tags, image, updated_at)
              VALUES (?, ?, ?, ?, ?, ?)
              ON CONFLICT (slug) DO UPDATE
                SET title = excluded.title,
                    category = excluded.category,
                    tags = excluded.tags,
                    image = excluded.image,
                    updated_at = excluded.updated_at",
        )?;
        query.bind((1, post.slug.as_str()))?;
        query.bind((2, post.title.as_str()))?;
        query.bind((3, post.category.as_str()))?;
        query.bind((4, tags.as_str()))?;
        query.bind((5, post.image.as_str()))?;
        query.bind((6, updated_at.as_str()))?;

        query.next()?;

        Ok(())
    }
}

impl Actor for SqliteStore {
    type Context = Context<Self>;
}

trace_handler!(SqliteStore, GetHealth, Result<Health, APIError>);

impl Handler<GetHealth> for SqliteStore {
    type Result = Result<Health, APIError>;

    fn handle(&mut self, _: GetHealth, _: &mut Self::Context) -> Self::Result {
        Ok(Health {
            ok: true,
            started_at: self.started_at,
        })
    }
}

trace_handler!(SqliteStore, GetPosts, Result<Vec<Post>, APIError>);

impl Handler<GetPosts> for SqliteStore {
    type Result = Result<Vec<Post>, APIError>;

    fn handle(&mut self, msg: GetPosts, _: &mut Self::Context) -> Self::Result {
        let mut query = match msg.category.as_deref() {
            Some(category) => {
                let mut query = self.connection.prepare(
                    "SELECT slug, title, category, tags, image FROM posts WHERE category = ? ORDER BY updated_at DESC, slug",
                )?;
                query.bind((1, category))?;
                query
            }
            None => self.connection.prepare(
                "SELECT slug, title, category, tags, image FROM posts ORDER BY updated_at DESC, slug",
            )?,
        };

        let mut posts = Vec::new();
        while sqlite::State::Row == query.next()? {
            posts.push(Self::read_post(&query)?);
        }

        Ok(posts)
    }
}

trace_handler!(SqliteStore, GetPost, Result<Post, APIError>);

impl Handler<GetPost> for SqliteStore {
    type Result = Result<Post, APIError>;

    fn handle(&mut self, msg: GetPost, _: &mut Self::Context) -> Self::Result {
        self.get_post(&msg.slug)
    }
}

trace_handler!(SqliteStore, StorePost, Result<Post, APIError>);

impl Handler<StorePost> for SqliteStore {
    type Result = Result<Post, APIError>;

    fn handle(&mut self, msg: StorePost, _: &mut Self::Context) -> Self::Result {
        self.upsert_post(&msg.post)?;
        self.get_post(&msg.post.slug)
    }
}
