//! Tag descriptors and their markup serialization.

use std::fmt;

/// How a meta tag is keyed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaKey {
    /// `<meta name="..." content="...">`
    Name(String),
    /// `<meta property="..." content="...">` (Open Graph style)
    Property(String),
    /// `<meta http-equiv="..." content="...">`
    HttpEquiv(String),
    /// `<meta charset="...">` — the content is the charset itself.
    Charset,
}

/// One generated element, before serialization.
///
/// Produced fresh on every generation call and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagDescriptor {
    Title {
        text: String,
    },
    Meta {
        key: MetaKey,
        content: String,
    },
    Link {
        rel: String,
        href: String,
    },
    Script {
        script_type: String,
        /// Embedded verbatim — callers are responsible for its syntax.
        content: String,
    },
}

impl TagDescriptor {
    /// A `<title>` element.
    #[must_use]
    pub fn title(text: impl Into<String>) -> Self {
        Self::Title { text: text.into() }
    }

    /// A `name`-keyed meta tag.
    #[must_use]
    pub fn meta_name(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Meta {
            key: MetaKey::Name(name.into()),
            content: content.into(),
        }
    }

    /// A `property`-keyed meta tag.
    #[must_use]
    pub fn meta_property(property: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Meta {
            key: MetaKey::Property(property.into()),
            content: content.into(),
        }
    }

    /// An `http-equiv` meta tag.
    #[must_use]
    pub fn http_equiv(header: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Meta {
            key: MetaKey::HttpEquiv(header.into()),
            content: content.into(),
        }
    }

    /// A charset meta tag.
    #[must_use]
    pub fn charset(value: impl Into<String>) -> Self {
        Self::Meta {
            key: MetaKey::Charset,
            content: value.into(),
        }
    }

    /// A link tag.
    #[must_use]
    pub fn link(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self::Link {
            rel: rel.into(),
            href: href.into(),
        }
    }

    /// A JSON-LD script tag.
    #[must_use]
    pub fn json_ld(content: impl Into<String>) -> Self {
        Self::Script {
            script_type: "application/ld+json".to_string(),
            content: content.into(),
        }
    }

    /// Serializes to markup: one line per tag, three for script tags
    /// (open, content, close). Attributes render in fixed per-variant order;
    /// user text is escaped before insertion.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Title { text } => format!("<title>{}</title>", escape_text(text)),
            Self::Meta { key, content } => match key {
                MetaKey::Name(name) => format!(
                    "<meta name=\"{}\" content=\"{}\">",
                    escape_attr(name),
                    escape_attr(content)
                ),
                MetaKey::Property(property) => format!(
                    "<meta property=\"{}\" content=\"{}\">",
                    escape_attr(property),
                    escape_attr(content)
                ),
                MetaKey::HttpEquiv(header) => format!(
                    "<meta http-equiv=\"{}\" content=\"{}\">",
                    escape_attr(header),
                    escape_attr(content)
                ),
                MetaKey::Charset => format!("<meta charset=\"{}\">", escape_attr(content)),
            },
            Self::Link { rel, href } => format!(
                "<link rel=\"{}\" href=\"{}\">",
                escape_attr(rel),
                escape_attr(href)
            ),
            Self::Script {
                script_type,
                content,
            } => format!(
                "<script type=\"{}\">\n{}\n</script>",
                escape_attr(script_type),
                content
            ),
        }
    }
}

impl fmt::Display for TagDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Escapes text content: ampersands and angle brackets neutralized.
#[must_use]
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escapes attribute values: text escaping plus double quotes.
#[must_use]
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
