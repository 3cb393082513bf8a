use crate::identity::{ResourceKind, canonical_identifier, route_path, sanitize_stored_path};

/// A blog post as it is held in the store. Values are kept exactly as they
/// were written, which for older rows means they may not be canonical.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image: String,
}

actor_message!(GetPosts(category: Option<String>) -> Vec<Post>);
actor_message!(GetPost(slug: String) -> Post);
actor_message!(StorePost(post: Post) -> Post);

impl Post {
    /// Assembles a post for storage with every identifier in canonical form.
    pub fn canonical(slug: &str, input: PostInputV1) -> Self {
        Self {
            slug: canonical_identifier(slug, ResourceKind::Blog).to_string(),
            title: input.title.trim().to_string(),
            category: canonical_identifier(input.category.trim(), ResourceKind::Category).to_string(),
            tags: canonical_tags(&input.tags),
            image: sanitize_stored_path(&input.image),
        }
    }
}

fn canonical_tags(tags: &[String]) -> Vec<String> {
    let mut canonical: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = canonical_identifier(tag.trim(), ResourceKind::Tag);
        if !tag.is_empty() && !canonical.iter().any(|t| t == tag) {
            canonical.push(tag.to_string());
        }
    }

    canonical
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostInputV1 {
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostV1 {
    pub slug: String,
    pub title: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image: String,
    pub url: String,
}

json_responder!(PostV1);

// Rows written before paths were canonicalised on write still pass through
// here, so everything is re-normalised on the way out.
impl From<Post> for PostV1 {
    fn from(state: Post) -> Self {
        let slug = canonical_identifier(&state.slug, ResourceKind::Blog).to_string();
        Self {
            url: route_path(&slug, ResourceKind::Blog),
            slug,
            title: state.title,
            category: canonical_identifier(state.category.trim(), ResourceKind::Category).to_string(),
            tags: canonical_tags(&state.tags),
            image: sanitize_stored_path(&state.image),
        }
    }
}
