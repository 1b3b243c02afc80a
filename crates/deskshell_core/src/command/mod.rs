//! Command palette: static action table, search, and global shortcut.
//!
//! # Responsibility
//! - Hold the categorized table of invocable actions.
//! - Filter the table by free-text query in fixed category order.
//! - Own palette visibility and the `Mod+K` keyboard listener.
//!
//! # Invariants
//! - Categories are always iterated `recent`, `navigation`, `dialogs`, `actions`.
//! - Empty groups are omitted from results.
//! - Invoking an entry always closes the palette afterwards.

pub mod action;
pub mod dispatcher;
pub mod search;
pub mod table;
