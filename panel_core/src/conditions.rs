//! Screening condition catalog.
//!
//! The fixed set of medical conditions the questionnaire asks about.
//! Every entry except `none` is dangerous: selecting it alone forces a
//! session block, because the pump is not proven safe for those
//! conditions. Display labels for the ids are the hosting shell's
//! concern.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// One entry of the screening questionnaire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConditionEntry {
    pub id: &'static str,
    pub dangerous: bool,
}

static CATALOG: &[ConditionEntry] = &[
    ConditionEntry {
        id: "heart",
        dangerous: true,
    },
    ConditionEntry {
        id: "respiratory",
        dangerous: true,
    },
    ConditionEntry {
        id: "allergies",
        dangerous: true,
    },
    ConditionEntry {
        id: "neuro",
        dangerous: true,
    },
    ConditionEntry {
        id: "none",
        dangerous: false,
    },
];

/// Cached danger lookup - built once and reused across all submits
static DANGER_INDEX: Lazy<HashMap<&'static str, bool>> =
    Lazy::new(|| CATALOG.iter().map(|c| (c.id, c.dangerous)).collect());

/// The questionnaire entries, in display order.
pub fn condition_catalog() -> &'static [ConditionEntry] {
    CATALOG
}

/// Whether selecting `id` forces a block.
///
/// Ids outside the catalog cannot normally be selected; they are
/// treated as not dangerous, matching the decision rule which only
/// consults catalog entries.
pub fn is_dangerous(id: &str) -> bool {
    DANGER_INDEX.get(id).copied().unwrap_or(false)
}
