//! ObservationScope for automatic begin/complete logging
//!
//! - Logs `{name}_BEGIN` on creation
//! - Logs `{name}_COMPLETE` on success
//! - Logs `{name}_FAILED` on explicit failure
//! - Logs `{name}_INCOMPLETE` when dropped unfinished, e.g. a cancelled request

use std::time::Instant;

/// A scope that logs start and completion of one unit of work
///
/// # Usage
///
/// ```ignore
/// let scope = ObservationScope::new("CATALOG_QUERY");
/// // ... do work ...
/// scope.complete(); // logs CATALOG_QUERY_COMPLETE
/// ```
pub struct ObservationScope<'a> {
    name: &'a str,
    completed: bool,
    fields: Vec<(&'a str, String)>,
    started: Instant,
}

/// Render fields as `k=v` pairs, sorted by key
fn render_fields(fields: &[(&str, String)]) -> String {
    let mut sorted: Vec<_> = fields.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);
    sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(" ")
}

impl<'a> ObservationScope<'a> {
    /// Create a new observation scope
    pub fn new(name: &'a str) -> Self {
        Self::with_fields(name, &[])
    }

    /// Create a new observation scope with fields repeated on every line
    pub fn with_fields(name: &'a str, fields: &[(&'a str, String)]) -> Self {
        let scope = Self {
            name,
            completed: false,
            fields: fields.to_vec(),
            started: Instant::now(),
        };
        tracing::debug!(
            event = %format!("{}_BEGIN", scope.name),
            fields = %render_fields(&scope.fields),
        );
        scope
    }

    /// Mark the scope as successfully completed
    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    /// Mark the scope as successfully completed with additional fields
    pub fn complete_with_fields(mut self, extra_fields: &[(&str, String)]) {
        self.completed = true;
        let mut all_fields: Vec<(&str, String)> = self.fields.clone();
        all_fields.extend(extra_fields.iter().cloned());

        tracing::info!(
            event = %format!("{}_COMPLETE", self.name),
            elapsed_ms = self.elapsed_ms(),
            fields = %render_fields(&all_fields),
        );
    }

    /// Mark the scope as failed with a reason
    pub fn fail(mut self, reason: &str) {
        self.completed = true;
        tracing::error!(
            event = %format!("{}_FAILED", self.name),
            elapsed_ms = self.elapsed_ms(),
            fields = %render_fields(&self.fields),
            reason,
        );
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        if !self.completed {
            tracing::warn!(
                event = %format!("{}_INCOMPLETE", self.name),
                elapsed_ms = self.elapsed_ms(),
                fields = %render_fields(&self.fields),
                reason = "scope dropped without completion",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_creation() {
        let scope = ObservationScope::new("TEST");
        assert!(!scope.is_completed());
    }

    #[test]
    fn test_scope_complete_with_extra_fields() {
        let scope = ObservationScope::with_fields("TEST", &[("page", "1".to_string())]);
        scope.complete_with_fields(&[("total", "7".to_string())]);
    }

    #[test]
    fn test_scope_fail() {
        let scope = ObservationScope::new("TEST");
        scope.fail("something went wrong");
    }

    #[test]
    fn test_scope_drop_without_complete() {
        let scope = ObservationScope::new("TEST");
        drop(scope);
    }

    #[test]
    fn test_render_fields_sorted() {
        let fields = vec![("sort", "LOW_PRICE".to_string()), ("page", "2".to_string())];
        assert_eq!(render_fields(&fields), "page=2 sort=LOW_PRICE");
    }
}
