//! Palette search over the command table and recent history.

use crate::command::table::{CommandCategory, CommandEntry, CommandTable};

/// Non-empty group of matching entries.
#[derive(Debug, Clone)]
pub struct CommandGroup<'a> {
    pub category: CommandCategory,
    pub entries: Vec<&'a CommandEntry>,
}

/// Filters `table` by `query` and groups matches in fixed category order.
///
/// The `recent` group is resolved from `history` (most-recent-first command
/// ids), skipping ids the table does not know, capped at `recent_limit`.
/// Entries keep declaration order inside their group. Empty groups are
/// omitted.
pub fn search_commands<'a>(
    table: &'a CommandTable,
    history: &[String],
    recent_limit: usize,
    query: &str,
) -> Vec<CommandGroup<'a>> {
    let needle = query.trim().to_lowercase();
    let matches = |entry: &CommandEntry| needle.is_empty() || entry.matches_lowercase(&needle);

    let mut groups = Vec::with_capacity(CommandCategory::ORDER.len());
    for category in CommandCategory::ORDER {
        let entries = match category {
            CommandCategory::Recent => history
                .iter()
                .filter_map(|id| table.get(id))
                .take(recent_limit)
                .filter(|entry| matches(*entry))
                .collect::<Vec<_>>(),
            other => table
                .entries()
                .iter()
                .filter(|entry| entry.category == other && matches(*entry))
                .collect::<Vec<_>>(),
        };
        if !entries.is_empty() {
            groups.push(CommandGroup { category, entries });
        }
    }
    groups
}

/// Entries of `groups` in rendering order, as used by keyboard navigation.
pub fn flatten_groups<'a>(groups: &[CommandGroup<'a>]) -> Vec<&'a CommandEntry> {
    groups
        .iter()
        .flat_map(|group| group.entries.iter().copied())
        .collect()
}
