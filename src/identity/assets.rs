use super::{ExecutionContext, has_scheme, uploads_offset};

/// Turns a stored image path into something the browser can fetch.
///
/// Absolute values (anything with a URI scheme, or protocol-relative) are
/// returned untouched. Everything else is re-based onto its `uploads/`
/// segment, then made root-relative in production, where assets share the
/// page's origin, or fully qualified against the backend address otherwise.
pub fn resolve_asset(raw: &str, context: &ExecutionContext) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    if has_scheme(raw) || raw.starts_with("//") {
        return raw.to_string();
    }

    let path = raw.trim_start_matches('/');
    let path = match uploads_offset(path) {
        Some(offset) => path[offset..].to_string(),
        None => format!("uploads/{path}"),
    };

    match context {
        ExecutionContext::Production(_) => format!("/{path}"),
        ExecutionContext::Local(base) | ExecutionContext::Override(base) => {
            format!("{}/{path}", base.trim_end_matches('/'))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn production() -> ExecutionContext {
        ExecutionContext::Production("https://boganto.com".into())
    }

    fn local() -> ExecutionContext {
        ExecutionContext::Local("http://localhost:8000".into())
    }

    #[test]
    fn empty() {
        assert_eq!(resolve_asset("", &production()), "");
        assert_eq!(resolve_asset("  ", &local()), "");
    }

    #[test]
    fn production_is_root_relative() {
        assert_eq!(resolve_asset("uploads/x.png", &production()), "/uploads/x.png");
        assert_eq!(resolve_asset("/uploads/x.png", &production()), "/uploads/x.png");
        assert_eq!(
            resolve_asset("api/public/uploads/blogs/x.png", &production()),
            "/uploads/blogs/x.png"
        );
        assert_eq!(resolve_asset("blogs/x.png", &production()), "/uploads/blogs/x.png");
    }

    #[test]
    fn local_is_fully_qualified() {
        assert_eq!(
            resolve_asset("uploads/x.png", &local()),
            "http://localhost:8000/uploads/x.png"
        );
        assert_eq!(
            resolve_asset("/public/uploads/banners/x.png", &local()),
            "http://localhost:8000/uploads/banners/x.png"
        );
    }

    #[test]
    fn override_uses_its_base() {
        let ctx = ExecutionContext::Override("https://api.staging.boganto.com/".into());
        assert_eq!(
            resolve_asset("uploads/x.png", &ctx),
            "https://api.staging.boganto.com/uploads/x.png"
        );
    }

    #[test]
    fn absolute_passthrough() {
        for raw in [
            "https://cdn.example.com/x.png",
            "http://boganto.com/uploads/x.png",
            "//cdn.example.com/x.png",
        ] {
            assert_eq!(resolve_asset(raw, &production()), raw);
            assert_eq!(resolve_asset(raw, &local()), raw);
        }
    }

    #[test]
    fn uploads_must_be_a_whole_segment() {
        assert_eq!(
            resolve_asset("myuploads/x.png", &production()),
            "/uploads/myuploads/x.png"
        );
    }

    #[test]
    fn resolved_production_paths_are_stable() {
        let once = resolve_asset("/a/uploads/b/x.png", &production());
        assert_eq!(resolve_asset(&once, &production()), once);
    }
}
