//! Entry naming rules shared by the builder and the live matcher.

use crate::dispatch::filters::TypecasterRegistry;
use crate::dispatch::node::{NodeKind, Wildcard};

/// Marker that turns an entry into a wildcard.
pub const WILDCARD_PREFIX: char = '%';

/// Routing slug for an entry: dynamic leaves lose their last extension.
pub fn slug_for(name: &str, kind: NodeKind) -> &str {
    match kind {
        NodeKind::Dynamic => name.rsplit_once('.').map_or(name, |(base, _)| base),
        NodeKind::Directory | NodeKind::Static => name,
    }
}

/// Parse the wildcard declared by `slug`, if it declares one.
///
/// Static leaves are never wildcards. Directories follow `%<var>[.<typecast>]`.
/// Dynamic leaves follow `%<var>[.<typecast>][.<ext>]`; a single trailing part
/// is a typecast when `typecasters` knows its name, else an extension.
pub fn parse_wildcard(
    slug: &str,
    kind: NodeKind,
    typecasters: &dyn TypecasterRegistry,
) -> Option<(Wildcard, Option<String>)> {
    if kind == NodeKind::Static {
        return None;
    }
    let decl = slug.strip_prefix(WILDCARD_PREFIX)?;
    if kind == NodeKind::Directory {
        let (name, typecast) = match decl.split_once('.') {
            Some((name, typecast)) => (name, Some(typecast.to_string())),
            None => (decl, None),
        };
        let wildcard = Wildcard {
            name: name.to_string(),
            typecast,
        };
        return Some((wildcard, None));
    }

    let mut parts = decl.splitn(3, '.');
    let name = parts.next().unwrap_or_default().to_string();
    let (typecast, extension) = match (parts.next(), parts.next()) {
        (Some(typecast), Some(ext)) => (Some(typecast), Some(ext)),
        (Some(ambiguous), None) if typecasters.is_typecaster(ambiguous) => (Some(ambiguous), None),
        (Some(ambiguous), None) => (None, Some(ambiguous)),
        (None, _) => (None, None),
    };
    let wildcard = Wildcard {
        name,
        typecast: typecast.map(str::to_string),
    };
    Some((wildcard, extension.map(str::to_string)))
}
