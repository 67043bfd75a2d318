//! Reconciliation of practices against published posts.
//!
//! A practice is pending when its title has no exact, case-sensitive match
//! among the published title keys. Duplicated titles are kept as they are.

use std::collections::HashSet;

use crate::models::Titled;

/// Items from `items` whose title is not among `published`.
///
/// With `force_all` every item is returned unchanged.
pub fn reconcile<T: Titled>(items: Vec<T>, published: &[String], force_all: bool) -> Vec<T> {
    if force_all {
        return items;
    }

    let published: HashSet<&str> = published.iter().map(String::as_str).collect();
    items
        .into_iter()
        .filter(|item| {
            let pending = !published.contains(item.title());
            if pending {
                log::debug!("Not published: {}", item.title());
            }
            pending
        })
        .collect()
}
