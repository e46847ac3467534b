//! Typed view of the exposed request parameters.
//!
//! The wire names are fixed by the callers: `recordtype`, `recordid`,
//! `compareid`, plus optional comma-separated `fields`/`sublists`
//! allow-lists. A `format` parameter is accepted for compatibility but
//! JSON is the only rendering this repository performs; anything else
//! is a presentation concern outside this codebase.

use record_projection::ProjectionPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionRequest {
    pub record_type: String,
    pub record_id: String,
    /// Second record id; present switches to the comparison path.
    pub compare_id: Option<String>,
    pub fields: Option<Vec<String>>,
    pub sublists: Option<Vec<String>>,
}

impl InspectionRequest {
    pub fn new(record_type: impl Into<String>, record_id: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            record_id: record_id.into(),
            compare_id: None,
            fields: None,
            sublists: None,
        }
    }

    pub fn comparing(mut self, compare_id: impl Into<String>) -> Self {
        self.compare_id = Some(compare_id.into());
        self
    }

    /// Parse a `fields=a,b,c` style allow-list parameter. Empty segments
    /// are dropped; an all-empty parameter means "no filter".
    pub fn parse_list(raw: &str) -> Option<Vec<String>> {
        let ids: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(String::from)
            .collect();
        if ids.is_empty() {
            None
        } else {
            Some(ids)
        }
    }

    /// Narrow a base policy with this request's allow-lists.
    pub fn policy(&self, base: &ProjectionPolicy) -> ProjectionPolicy {
        let mut policy = base.clone();
        if let Some(fields) = &self.fields {
            policy = policy.with_field_allowlist(fields.iter().cloned());
        }
        if let Some(sublists) = &self.sublists {
            policy = policy.with_sublist_allowlist(sublists.iter().cloned());
        }
        policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_list_trims_and_drops_empties() {
        assert_eq!(
            InspectionRequest::parse_list("email, phone ,,balance"),
            Some(vec![
                "email".to_string(),
                "phone".to_string(),
                "balance".to_string()
            ])
        );
        assert_eq!(InspectionRequest::parse_list(""), None);
        assert_eq!(InspectionRequest::parse_list(" , "), None);
    }

    #[test]
    fn test_policy_narrowing() {
        let base = ProjectionPolicy::default().with_max_sublist_lines(50);
        let mut request = InspectionRequest::new("customer", "42");
        request.fields = InspectionRequest::parse_list("email");

        let policy = request.policy(&base);
        assert_eq!(policy.max_sublist_lines, 50);
        assert!(policy.field_allowlist.is_some());
        assert!(policy.sublist_allowlist.is_none());
    }
}
