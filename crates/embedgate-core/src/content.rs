//! Content payload handed back on a successful redemption.

use serde::{Deserialize, Serialize};

/// A piece of embeddable content.
///
/// The gate treats this as an opaque value: it is resolved by the content
/// collaborator after access has been authorized and passed through to
/// the response unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentPayload {
    /// Inline HTML fragment.
    Html { html: String },

    /// A URL the client embeds (e.g. in an iframe).
    Url { url: String },

    /// Markdown source rendered client-side.
    Markdown { markdown: String },
}
