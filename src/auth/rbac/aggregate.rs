//! Grouping of flat permission lists by module

use super::types::Capability;
use std::collections::BTreeMap;

/// Module name to its actions, in first-seen order without duplicates
pub type PermissionMap = BTreeMap<String, Vec<String>>;

/// Group capabilities by module
///
/// Actions keep the order in which they first appear in the input; repeated
/// (module, action) pairs are collapsed.
pub fn group_permissions<I>(permissions: I) -> PermissionMap
where
    I: IntoIterator,
    I::Item: Into<Capability>,
{
    let mut grouped = PermissionMap::new();

    for capability in permissions.into_iter().map(Into::into) {
        let actions = grouped.entry(capability.module).or_default();
        if !actions.contains(&capability.action) {
            actions.push(capability.action);
        }
    }

    grouped
}
