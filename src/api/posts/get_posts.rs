use crate::api::APIError;
use crate::identity::{ResourceKind, canonical_identifier};
use crate::{models::*, telemetry::TraceMessageExt};
use actix_web::{get, web};
use tracing_batteries::prelude::*;

#[derive(Debug, Deserialize)]
pub struct PostsQuery {
    category: Option<String>,
}

#[tracing::instrument(err, skip(state), fields(otel.kind = "internal"))]
#[get("/api/v1/posts")]
pub async fn get_posts_v1(
    query: web::Query<PostsQuery>,
    state: web::Data<GlobalState>,
) -> Result<web::Json<Vec<PostV1>>, APIError> {
    let category = query
        .category
        .as_deref()
        .map(|c| canonical_identifier(c.trim(), ResourceKind::Category).to_string())
        .filter(|c| !c.is_empty());

    state
        .store
        .send(GetPosts { category }.trace())
        .await?
        .map(|posts| posts.into_iter().map(|p| p.into()).collect::<Vec<_>>())
        .map(web::Json)
}

#[cfg(test)]
mod tests {
    use crate::api::test::*;
    use crate::models::*;

    fn post(slug: &str, category: &str) -> StorePost {
        StorePost {
            post: Post {
                slug: slug.to_string(),
                title: slug.to_string(),
                category: category.to_string(),
                tags: vec![],
                image: String::new(),
            },
        }
    }

    #[actix_rt::test]
    async fn get_posts_v1() {
        test_log_init();

        test_state!(state = [post("one-piece", "manga"), post("frieren", "anime")]);

        let content: Vec<PostV1> =
            test_request!(GET "/api/v1/posts" => OK with content | state = state);
        assert_eq!(content.len(), 2);

        let content: Vec<PostV1> =
            test_request!(GET "/api/v1/posts?category=category/manga" => OK with content | state = state);
        assert_eq!(content.len(), 1);
        assert_eq!(content[0].slug, "one-piece");
        assert_eq!(content[0].url, "/blog/one-piece");
    }

    #[actix_rt::test]
    async fn legacy_rows_are_canonical() {
        test_log_init();

        test_state!(
            state = [StorePost {
                post: Post {
                    slug: "blog/jujutsu-kaisen".into(),
                    title: "Jujutsu Kaisen".into(),
                    category: "category/manga".into(),
                    tags: vec!["tag/curses".into()],
                    image: "https://boganto.com/uploads/sub/x.png".into(),
                },
            }]
        );

        let content: Vec<PostV1> =
            test_request!(GET "/api/v1/posts" => OK with content | state = state);
        assert_eq!(content.len(), 1);
        assert_eq!(content[0].slug, "jujutsu-kaisen");
        assert_eq!(content[0].url, "/blog/jujutsu-kaisen");
        assert_eq!(content[0].category, "manga");
        assert_eq!(content[0].tags, vec!["curses".to_string()]);
        assert_eq!(content[0].image, "uploads/sub/x.png");
    }
}
