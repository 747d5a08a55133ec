use url::form_urlencoded;

use super::query::ListingQuery;

/// Query-string keys owned by the listing contract. Everything else in an
/// existing search string passes through untouched.
const MANAGED_KEYS: [&str; 5] = ["page", "per_page", "order_by", "tags", "search"];

/// Serialize a listing descriptor into a URL search string, starting from
/// the current one.
///
/// Pure and deterministic: unmanaged parameters are preserved in their
/// original order, managed keys are re-appended from the descriptor, and
/// empty `tags`/`search` remove their keys entirely so "no filter" and
/// "filter never set" produce the same URL. Applying the transform twice
/// with the same descriptor yields the same string as applying it once.
pub fn build_url_with_params(query: &ListingQuery, current_search: &str) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());

    for (key, value) in form_urlencoded::parse(current_search.as_bytes()) {
        if !MANAGED_KEYS.contains(&key.as_ref()) {
            out.append_pair(&key, &value);
        }
    }

    out.append_pair("page", &query.page.to_string());
    out.append_pair("per_page", &query.per_page.to_string());
    out.append_pair("order_by", query.order_by.as_str());

    if !query.tags.is_empty() {
        out.append_pair("tags", &query.tags.join(","));
    }
    if let Some(search) = query.search.as_deref() {
        if !search.is_empty() {
            out.append_pair("search", search);
        }
    }

    out.finish()
}
