use super::{ResourceKind, canonical_identifier};

/// Builds the navigable route for a resource, e.g. `/blog/one-piece`.
///
/// Routes are relative and identical in every execution context; use
/// [`super::ExecutionContext::absolute_url`] to qualify them. Tags are
/// trimmed and percent-encoded so that they survive as a single path segment,
/// slugs and categories are assumed to already be path-safe.
pub fn route_path(identifier: &str, kind: ResourceKind) -> String {
    match kind {
        ResourceKind::Tag => format!(
            "/{}/{}",
            kind.route_prefix(),
            urlencoding::encode(canonical_identifier(identifier.trim(), kind))
        ),
        _ => format!("/{}/{}", kind.route_prefix(), canonical_identifier(identifier, kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{Environment, ExecutionContext, normalize};

    #[test]
    fn blog_routes() {
        assert_eq!(route_path("one-piece", ResourceKind::Blog), "/blog/one-piece");
        assert_eq!(route_path("blog/one-piece", ResourceKind::Blog), "/blog/one-piece");
        assert_eq!(route_path("/blog/one-piece", ResourceKind::Blog), "/blog/one-piece");
        assert_eq!(route_path("/one-piece", ResourceKind::Blog), "/blog/one-piece");
        assert_eq!(route_path("//blog/one-piece", ResourceKind::Blog), "/blog/one-piece");
    }

    #[test]
    fn category_routes() {
        assert_eq!(route_path("manga", ResourceKind::Category), "/category/manga");
        assert_eq!(route_path("category/manga", ResourceKind::Category), "/category/manga");
    }

    #[test]
    fn tag_routes_are_encoded() {
        assert_eq!(route_path("shonen", ResourceKind::Tag), "/tag/shonen");
        assert_eq!(route_path("  slice of life ", ResourceKind::Tag), "/tag/slice%20of%20life");
        assert_eq!(route_path("tag/a&b", ResourceKind::Tag), "/tag/a%26b");
        assert_eq!(route_path("sci/fi", ResourceKind::Tag), "/tag/sci%2Ffi");
    }

    #[test]
    fn empty_identifier() {
        assert_eq!(route_path("", ResourceKind::Blog), "/blog/");
        assert_eq!(route_path("   ", ResourceKind::Tag), "/tag/");
    }

    #[test]
    fn routes_do_not_depend_on_context() {
        let env = Environment::default();
        let local = env.resolve(Some("localhost"));
        let production = env.resolve(Some("boganto.com"));
        assert_ne!(local, production);

        let route = route_path("one-piece", ResourceKind::Blog);
        assert_eq!(route, "/blog/one-piece");
        assert_eq!(
            local.absolute_url(&route),
            "http://localhost:8000/blog/one-piece"
        );
        assert_eq!(
            production.absolute_url(&route),
            "https://boganto.com/blog/one-piece"
        );
    }

    #[test]
    fn backend_slug_to_production_address() {
        let slug = normalize("blog/jujutsu-kaisen", ResourceKind::Blog);
        assert_eq!(slug, "jujutsu-kaisen");

        let route = route_path(slug, ResourceKind::Blog);
        assert_eq!(route, "/blog/jujutsu-kaisen");

        let url = ExecutionContext::Production("https://boganto.com".into()).absolute_url(&route);
        assert_eq!(url, "https://boganto.com/blog/jujutsu-kaisen");
        assert!(!url.contains("/blog/blog/"));
    }
}
