//! Shareable deep links that select one skill.
//!
//! A link is the fragment `skill=<percent-encoded name>`. Decoding is
//! lenient about where the fragment came from: a bare fragment, one with a
//! leading `#` or `?`, or a full URL are all accepted, and unrelated
//! `&`-separated parameters are ignored. The fragment is searched before the
//! query string.

use std::borrow::Cow;

use skilldex_common::{Catalog, CatalogEntry};

/// Parameter carrying the skill name.
pub const PARAM: &str = "skill";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeepLinkError {
    #[error("not a skill deep link")]
    Malformed,
    #[error("no skill named '{0}' in the catalog")]
    NotFound(String),
}

/// Fragment selecting `name`. Every byte outside `[A-Za-z0-9-_.~]` is
/// percent-encoded, so the name survives any URL context.
pub fn encode(name: &str) -> String {
    format!("{PARAM}={}", urlencoding::encode(name))
}

/// Recover the skill name from a link produced by [`encode`].
pub fn decode(link: &str) -> Option<String> {
    let link = link.trim();
    let (head, fragment) = match link.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (link, None),
    };
    let query = head.split_once('?').map_or(head, |(_, query)| query);
    fragment
        .into_iter()
        .chain(Some(query))
        .find_map(param_value)
        .and_then(|value| urlencoding::decode(value).ok())
        .map(Cow::into_owned)
}

fn param_value(params: &str) -> Option<&str> {
    params
        .split('&')
        .find_map(|pair| pair.strip_prefix(PARAM)?.strip_prefix('='))
}

/// Decode `link` and look the name up. A well-formed link naming a skill the
/// catalog does not have is [`DeepLinkError::NotFound`], never a panic.
pub fn resolve<'a>(catalog: &'a Catalog, link: &str) -> Result<&'a CatalogEntry, DeepLinkError> {
    let name = decode(link).ok_or(DeepLinkError::Malformed)?;
    catalog.get(&name).ok_or(DeepLinkError::NotFound(name))
}
