/// The kinds of routable resource which carry a route-prefixed identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Blog,
    Category,
    Tag,
}

impl ResourceKind {
    pub fn route_prefix(&self) -> &'static str {
        match self {
            ResourceKind::Blog => "blog",
            ResourceKind::Category => "category",
            ResourceKind::Tag => "tag",
        }
    }

    pub fn from_route_prefix(prefix: &str) -> Option<Self> {
        match prefix.to_lowercase().as_str() {
            "blog" => Some(ResourceKind::Blog),
            "category" => Some(ResourceKind::Category),
            "tag" => Some(ResourceKind::Tag),
            _ => None,
        }
    }

    fn redundant_prefixes(&self) -> [&'static str; 2] {
        match self {
            ResourceKind::Blog => ["/blog/", "blog/"],
            ResourceKind::Category => ["/category/", "category/"],
            ResourceKind::Tag => ["/tag/", "tag/"],
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.route_prefix())
    }
}

/// Reduces a raw identifier to its canonical form by removing any route
/// prefix belonging to `kind`.
///
/// Prefixes are removed until none remain, so the result never starts with
/// one and normalizing twice is the same as normalizing once. Only the
/// prefixes of `kind` are considered: a slug of `category/manga` is left
/// alone. No decoding or case folding happens here.
pub fn normalize(raw: &str, kind: ResourceKind) -> &str {
    let prefixes = kind.redundant_prefixes();
    let mut current = raw;

    while let Some(rest) = prefixes.iter().find_map(|p| current.strip_prefix(p)) {
        current = rest;
    }

    current
}

/// Like [`normalize`], but also drops stray leading slashes (as left by a
/// doubled `/` in a request path) so the result can be used directly as a
/// single route segment or storage key.
pub fn canonical_identifier(raw: &str, kind: ResourceKind) -> &str {
    let mut current = raw;
    loop {
        let next = normalize(current.trim_start_matches('/'), kind);
        if next == current {
            return current;
        }
        current = next;
    }
}
