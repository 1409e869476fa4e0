use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::constants::STASH_LABEL_PREFIX;

/// A stash created for a to-do item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StashRef {
    /// Reference accepted by `git stash pop`, e.g. `stash@{Tue Jan 14 19:13:06 2025}`.
    pub reference: String,
    /// The date label inside the braces.
    pub date: String,
}

impl StashRef {
    pub fn from_reference(reference: &str) -> Self {
        let date = reference
            .strip_prefix("stash@{")
            .and_then(|rest| rest.strip_suffix('}'))
            .unwrap_or(reference);

        Self {
            reference: reference.to_string(),
            date: date.to_string(),
        }
    }
}

/// Stash message used for an item.
pub fn stash_label(todo_id: i32) -> String {
    format!("{STASH_LABEL_PREFIX}{todo_id}")
}

fn label_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(&format!(r"{}([0-9]+)", regex::escape(STASH_LABEL_PREFIX))).ok())
        .as_ref()
}

/// Parse `git stash list --date=local` output into item stashes.
///
/// Lines without an item label are skipped. When an item has several
/// stashes, the newest one (listed first) wins.
pub fn parse_stash_list(output: &str) -> HashMap<i32, StashRef> {
    let mut stashes = HashMap::new();
    let Some(pattern) = label_pattern() else {
        return stashes;
    };

    for line in output.lines() {
        let Some(captures) = pattern.captures(line) else {
            continue;
        };
        let Ok(todo_id) = captures[1].parse::<i32>() else {
            continue;
        };
        let Some((head, _)) = line.split_once("}:") else {
            continue;
        };

        stashes
            .entry(todo_id)
            .or_insert_with(|| StashRef::from_reference(&format!("{head}}}")));
    }

    stashes
}
