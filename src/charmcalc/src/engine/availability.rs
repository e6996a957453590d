//! Group pool sizes as seen from one rarity

use super::DataWarning;
use crate::tables::{CharmTables, GroupId};

/// Number of skills a slot of `group` draws from under `rarity`.
///
/// Never less than 1. Falls back to 1 when the group is unknown or the
/// rarity never draws from it.
pub fn pool_size(tables: &CharmTables, group: GroupId, rarity: &str) -> usize {
    resolve_pool_size(tables, group, rarity).0
}

pub(super) fn resolve_pool_size(
    tables: &CharmTables,
    group: GroupId,
    rarity: &str,
) -> (usize, Option<DataWarning>) {
    let Some(pool) = tables.group(group) else {
        tracing::warn!("Skill group {} not found, using pool size 1", group);
        return (1, Some(DataWarning::MissingGroup { group }));
    };

    match tables.rarity(rarity) {
        Some(entry) if entry.references_group(group) => (pool.len().max(1), None),
        Some(_) => {
            tracing::warn!(
                "Skill group {} is not drawn by {}, using pool size 1",
                group,
                rarity
            );
            (
                1,
                Some(DataWarning::GroupNotInRarity {
                    group,
                    rarity: rarity.to_string(),
                }),
            )
        }
        // Missing rarity is reported once by the aggregator
        None => (1, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::fixture::TablesBuilder;

    fn tables() -> CharmTables {
        TablesBuilder::new()
            .numbered_group(1, "a", 12)
            .numbered_group(2, "b", 5)
            .rarity("R", 1.0)
            .template("R", &[1], 12, &[])
            .build()
    }

    #[test]
    fn test_pool_size_of_used_group() {
        assert_eq!(pool_size(&tables(), 1, "R"), 12);
    }

    #[test]
    fn test_pool_size_fallbacks() {
        let tables = tables();
        // Group exists but the rarity never draws from it
        assert_eq!(
            resolve_pool_size(&tables, 2, "R"),
            (
                1,
                Some(DataWarning::GroupNotInRarity {
                    group: 2,
                    rarity: "R".to_string()
                })
            )
        );
        assert_eq!(
            resolve_pool_size(&tables, 9, "R"),
            (1, Some(DataWarning::MissingGroup { group: 9 }))
        );
        assert_eq!(pool_size(&tables, 1, "nope"), 1);
    }
}
