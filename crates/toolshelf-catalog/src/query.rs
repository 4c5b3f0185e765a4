//! Read-only queries over a snapshot of the catalog.
//!
//! Every function borrows from the snapshot it is given and preserves the
//! persisted order unless stated otherwise. The filters accept any iterator
//! of borrowed tools so they can be chained.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;
use toolshelf_core::Tool;

pub const DEFAULT_PER_PAGE: usize = 15;

/// One page of a larger result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    pub items: Vec<&'a Tool>,
    /// 1-based page number actually served.
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

pub fn by_id<'a>(tools: &'a [Tool], id: &str) -> Option<&'a Tool> {
    tools.iter().find(|tool| tool.id == id)
}

/// Tools sharing at least one platform or category with `id`, the target
/// itself excluded. Empty when `id` is unknown.
pub fn related<'a>(tools: &'a [Tool], id: &str, limit: usize) -> Vec<&'a Tool> {
    let Some(target) = by_id(tools, id) else {
        return Vec::new();
    };

    tools
        .iter()
        .filter(|tool| tool.id != target.id && tool.shares_platform_or_category(target))
        .take(limit)
        .collect()
}

/// A uniform sample without replacement of up to `limit` tools other than
/// `exclude_id`.
pub fn random<'a, R: Rng + ?Sized>(
    tools: &'a [Tool],
    exclude_id: &str,
    limit: usize,
    rng: &mut R,
) -> Vec<&'a Tool> {
    let candidates: Vec<&Tool> = tools.iter().filter(|tool| tool.id != exclude_id).collect();
    candidates
        .choose_multiple(rng, limit)
        .copied()
        .collect()
}

/// Tools listing `tag` among their platforms or categories.
pub fn filter_by_platform_or_category<'a>(
    tools: impl IntoIterator<Item = &'a Tool>,
    tag: &str,
) -> Vec<&'a Tool> {
    tools
        .into_iter()
        .filter(|tool| tool.has_platform_or_category(tag))
        .collect()
}

/// Tools with a tag containing any of `terms`, ignoring case.
pub fn filter_by_tags<'a, S: AsRef<str>>(
    tools: impl IntoIterator<Item = &'a Tool>,
    terms: &[S],
) -> Vec<&'a Tool> {
    let terms: Vec<String> = terms
        .iter()
        .map(|term| term.as_ref().trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect();

    tools
        .into_iter()
        .filter(|tool| {
            tool.tags.iter().any(|tag| {
                let tag = tag.to_lowercase();
                terms.iter().any(|term| tag.contains(term.as_str()))
            })
        })
        .collect()
}

/// Free-text search over name, description and tags.
///
/// `text` is split on whitespace; a tool matches when any term is a
/// case-insensitive substring of one of those fields. Blank text matches
/// every tool.
pub fn search<'a>(tools: impl IntoIterator<Item = &'a Tool>, text: &str) -> Vec<&'a Tool> {
    let terms: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
    if terms.is_empty() {
        return tools.into_iter().collect();
    }

    tools
        .into_iter()
        .filter(|tool| {
            let name = tool.name.to_lowercase();
            let description = tool.description.to_lowercase();
            let tags: Vec<String> = tool.tags.iter().map(|tag| tag.to_lowercase()).collect();
            terms.iter().any(|term| {
                name.contains(term.as_str())
                    || description.contains(term.as_str())
                    || tags.iter().any(|tag| tag.contains(term.as_str()))
            })
        })
        .collect()
}

/// The `limit` most clicked tools. Ties keep persisted order.
pub fn popular<'a>(tools: &'a [Tool], limit: usize) -> Vec<&'a Tool> {
    let mut ranked: Vec<&Tool> = tools.iter().collect();
    ranked.sort_by(|a, b| b.clicks.cmp(&a.clicks));
    ranked.truncate(limit);
    ranked
}

/// Slices `tools` into 1-based pages.
///
/// A `per_page` of zero falls back to [`DEFAULT_PER_PAGE`]; a `page` of zero
/// is treated as the first page. Pages past the end are empty.
pub fn paginate<'a>(tools: &[&'a Tool], page: usize, per_page: usize) -> Page<'a> {
    let per_page = if per_page == 0 {
        DEFAULT_PER_PAGE
    } else {
        per_page
    };
    let page = page.max(1);
    let total = tools.len();

    let items = tools
        .iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .copied()
        .collect();

    Page {
        items,
        page,
        per_page,
        total,
        total_pages: total.div_ceil(per_page),
    }
}

/// Number of tools per platform.
pub fn platform_counts(tools: &[Tool]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for tool in tools {
        for platform in &tool.platforms {
            *counts.entry(platform.clone()).or_insert(0) += 1;
        }
    }
    counts
}
