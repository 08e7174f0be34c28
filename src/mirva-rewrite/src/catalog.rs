//! Catalog of registered materialized views.

use std::collections::HashMap;

use mirva_logical::LogicalPlan;

/// A registered view: its definition plan and its table plan.
#[derive(Debug, Clone)]
struct ViewEntry {
    /// The `CREATE MATERIALIZED VIEW AS ...` plan.
    definition: LogicalPlan,
    /// A scan over the materialized rows.
    table: LogicalPlan,
}

/// Catalog mapping base tables to candidate views and view names to their
/// plans.
///
/// The catalog is an explicit handle passed into `rewrite`; callers that
/// share one across threads wrap it in `Arc<RwLock<_>>` and register
/// through the write half. Candidate order is registration order, and the
/// rules commit the first candidate that matches.
#[derive(Debug, Default)]
pub struct ViewCatalog {
    views_by_table: HashMap<String, Vec<String>>,
    views: HashMap<String, ViewEntry>,
}

impl ViewCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view under every base table its definition scans.
    pub fn register_view(
        &mut self,
        name: impl Into<String>,
        definition: LogicalPlan,
        table: LogicalPlan,
    ) {
        let name = name.into();
        for base_table in definition.root().extract_tables() {
            let candidates = self.views_by_table.entry(base_table).or_default();
            if !candidates.contains(&name) {
                candidates.push(name.clone());
            }
        }
        self.views.insert(name, ViewEntry { definition, table });
    }

    /// Remove a view and its candidate entries.
    pub fn remove_view(&mut self, name: &str) {
        self.views.remove(name);
        for candidates in self.views_by_table.values_mut() {
            candidates.retain(|candidate| candidate != name);
        }
        self.views_by_table.retain(|_, candidates| !candidates.is_empty());
    }

    /// The candidate views whose definitions scan the given table, in
    /// registration order.
    pub fn candidate_views(&self, table: &str) -> Option<&[String]> {
        self.views_by_table.get(table).map(Vec::as_slice)
    }

    /// The view's definition plan.
    pub fn view_definition_plan(&self, name: &str) -> Option<&LogicalPlan> {
        self.views.get(name).map(|entry| &entry.definition)
    }

    /// The view's table plan.
    pub fn view_table_plan(&self, name: &str) -> Option<&LogicalPlan> {
        self.views.get(name).map(|entry| &entry.table)
    }

    /// Check if a view is registered.
    pub fn exists(&self, name: &str) -> bool {
        self.views.contains_key(name)
    }

    /// List all registered view names.
    pub fn list(&self) -> Vec<&str> {
        self.views.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirva_logical::{PlanBuilder, ProjectOp, ScanOp};

    fn simple_view(table: &str) -> (LogicalPlan, LogicalPlan) {
        let definition = PlanBuilder::scan(ScanOp::new(table))
            .project(ProjectOp::columns(["a"]))
            .build();
        let scan = PlanBuilder::scan(ScanOp::new("mv_store")).build();
        (definition, scan)
    }

    #[test]
    fn test_register_and_lookup() {
        let mut catalog = ViewCatalog::new();
        let (definition, table) = simple_view("t");
        catalog.register_view("mv1", definition, table);

        assert!(catalog.exists("mv1"));
        assert_eq!(catalog.candidate_views("t").unwrap(), ["mv1"]);
        assert!(catalog.candidate_views("u").is_none());
        assert!(catalog.view_definition_plan("mv1").is_some());
        assert!(catalog.view_table_plan("mv1").is_some());
    }

    #[test]
    fn test_candidates_keep_registration_order() {
        let mut catalog = ViewCatalog::new();
        for name in ["mv_b", "mv_a", "mv_c"] {
            let (definition, table) = simple_view("t");
            catalog.register_view(name, definition, table);
        }

        assert_eq!(
            catalog.candidate_views("t").unwrap(),
            ["mv_b", "mv_a", "mv_c"]
        );
    }

    #[test]
    fn test_remove_view() {
        let mut catalog = ViewCatalog::new();
        let (definition, table) = simple_view("t");
        catalog.register_view("mv1", definition, table);
        catalog.remove_view("mv1");

        assert!(!catalog.exists("mv1"));
        assert!(catalog.candidate_views("t").is_none());
    }
}
