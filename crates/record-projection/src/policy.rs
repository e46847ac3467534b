//! Bounds and filters for a projection run.

use std::collections::BTreeSet;

/// Default cap on projected lines per sublist.
pub const DEFAULT_MAX_SUBLIST_LINES: usize = 1000;

/// Per-run projection policy, threaded explicitly into the projector.
///
/// There is no global configuration. The line cap keeps a single
/// projection inside the host's execution budget; the allow-lists let a
/// caller narrow a projection to the fields and sublists it cares about
/// (anything not listed is skipped silently, not reported as an error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionPolicy {
    pub max_sublist_lines: usize,
    pub field_allowlist: Option<BTreeSet<String>>,
    pub sublist_allowlist: Option<BTreeSet<String>>,
}

impl Default for ProjectionPolicy {
    fn default() -> Self {
        Self {
            max_sublist_lines: DEFAULT_MAX_SUBLIST_LINES,
            field_allowlist: None,
            sublist_allowlist: None,
        }
    }
}

impl ProjectionPolicy {
    pub fn with_max_sublist_lines(mut self, cap: usize) -> Self {
        self.max_sublist_lines = cap;
        self
    }

    pub fn with_field_allowlist<I>(mut self, field_ids: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.field_allowlist = Some(field_ids.into_iter().collect());
        self
    }

    pub fn with_sublist_allowlist<I>(mut self, sublist_ids: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.sublist_allowlist = Some(sublist_ids.into_iter().collect());
        self
    }

    pub(crate) fn admits_field(&self, field_id: &str) -> bool {
        self.field_allowlist
            .as_ref()
            .map_or(true, |allowed| allowed.contains(field_id))
    }

    pub(crate) fn admits_sublist(&self, sublist_id: &str) -> bool {
        self.sublist_allowlist
            .as_ref()
            .map_or(true, |allowed| allowed.contains(sublist_id))
    }
}
