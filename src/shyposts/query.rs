//! Model of the host's listing query, plus just enough evaluation to run a
//! listing in tests the way the host engine would.
//!
//! The plugin only ever *mutates* a [`ListingQuery`] (adding a metadata
//! predicate or an excluded-ID list); executing it against real storage is
//! the host's job. [`ListingQuery::apply_to`] reproduces the engine's
//! semantics over a candidate set so the exclusion logic is testable
//! end-to-end without a host.

use crate::error::Result;
use crate::model::PostId;
use crate::store::MetaStore;

/// Comparison a single metadata clause performs.
///
/// `NotEqual` follows the host engine's join semantics: a record with **no**
/// value under the key does not match, because there is nothing to compare.
/// That is exactly why exclusion needs the `NotExists` clause alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCompare {
    NotEqual,
    NotExists,
}

/// One predicate over a record's metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaClause {
    pub key: String,
    pub value: Option<String>,
    pub compare: MetaCompare,
}

impl MetaClause {
    pub fn not_equal(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: Some(value.to_string()),
            compare: MetaCompare::NotEqual,
        }
    }

    pub fn not_exists(key: &str) -> Self {
        Self {
            key: key.to_string(),
            value: None,
            compare: MetaCompare::NotExists,
        }
    }

    fn matches<S: MetaStore>(&self, store: &S, id: PostId) -> Result<bool> {
        let stored = store.get_meta(id, &self.key)?;
        Ok(match self.compare {
            MetaCompare::NotEqual => match (&stored, &self.value) {
                (Some(stored), Some(wanted)) => stored != wanted,
                // no stored value: nothing to compare against
                _ => false,
            },
            MetaCompare::NotExists => stored.is_none(),
        })
    }
}

/// How a multi-clause metadata query combines its clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    And,
    Or,
}

/// A metadata predicate tree (one level deep, like the host's).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaQuery {
    pub relation: Relation,
    pub clauses: Vec<MetaClause>,
}

impl MetaQuery {
    pub fn any_of(clauses: Vec<MetaClause>) -> Self {
        Self {
            relation: Relation::Or,
            clauses,
        }
    }

    pub fn all_of(clauses: Vec<MetaClause>) -> Self {
        Self {
            relation: Relation::And,
            clauses,
        }
    }

    fn matches<S: MetaStore>(&self, store: &S, id: PostId) -> Result<bool> {
        match self.relation {
            Relation::And => {
                for clause in &self.clauses {
                    if !clause.matches(store, id)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Relation::Or => {
                for clause in &self.clauses {
                    if clause.matches(store, id)? {
                        return Ok(true);
                    }
                }
                Ok(self.clauses.is_empty())
            }
        }
    }
}

/// The host's listing query as the plugin sees it at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    /// The request targets the site's designated front page
    pub is_front_page: bool,
    /// This query is the primary one for the request, not a sidebar or
    /// related-posts query sharing the page
    pub is_main_query: bool,
    pub meta_query: Option<MetaQuery>,
    pub excluded_ids: Vec<PostId>,
}

impl ListingQuery {
    /// The homepage's primary listing query.
    pub fn homepage_main() -> Self {
        Self {
            is_front_page: true,
            is_main_query: true,
            meta_query: None,
            excluded_ids: Vec::new(),
        }
    }

    /// A secondary query on some page (related posts, widgets).
    pub fn secondary(is_front_page: bool) -> Self {
        Self {
            is_front_page,
            is_main_query: false,
            meta_query: None,
            excluded_ids: Vec::new(),
        }
    }

    /// Evaluate the query over a candidate set, the way the host engine
    /// would: drop excluded IDs, then keep candidates matching the metadata
    /// predicate (if any).
    pub fn apply_to<S: MetaStore>(&self, candidates: &[PostId], store: &S) -> Result<Vec<PostId>> {
        let mut listed = Vec::with_capacity(candidates.len());
        for &id in candidates {
            if self.excluded_ids.contains(&id) {
                continue;
            }
            if let Some(meta_query) = &self.meta_query {
                if !meta_query.matches(store, id)? {
                    continue;
                }
            }
            listed.push(id);
        }
        Ok(listed)
    }
}
