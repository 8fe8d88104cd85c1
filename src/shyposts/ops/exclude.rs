use crate::config::ExclusionMode;
use crate::error::Result;
use crate::flag::{FLAG_ON, META_KEY};
use crate::index::ShyIndex;
use crate::query::{ListingQuery, MetaClause, MetaQuery};
use crate::transient::TransientStore;

/// The homepage filter. Mutates the listing query in place so the host
/// engine skips shy posts; returns whether an exclusion was applied.
///
/// Applies only to the front page's **main** query. Secondary queries on
/// the same page (related posts, widgets) pass through untouched, which is
/// what keeps shy posts reachable everywhere but the homepage listing.
pub fn run<T: TransientStore>(
    mode: ExclusionMode,
    index: &ShyIndex,
    cache: &T,
    query: &mut ListingQuery,
) -> Result<bool> {
    if !(query.is_front_page && query.is_main_query) {
        return Ok(false);
    }

    match mode {
        ExclusionMode::Predicate => {
            // Live exclusion: flag != "1" OR flag never saved. NotEqual alone
            // would drop every post that has no flag row.
            query.meta_query = Some(MetaQuery::any_of(vec![
                MetaClause::not_equal(META_KEY, FLAG_ON),
                MetaClause::not_exists(META_KEY),
            ]));
        }
        ExclusionMode::CachedIds => {
            query.excluded_ids = index.load(cache)?;
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PostId;
    use crate::transient::memory::InMemoryTransientStore;
    use chrono::Duration;

    fn index() -> ShyIndex {
        ShyIndex::new(Duration::days(365))
    }

    #[test]
    fn predicate_mode_sets_the_or_meta_query() {
        let cache = InMemoryTransientStore::new();
        let mut query = ListingQuery::homepage_main();

        let applied = run(ExclusionMode::Predicate, &index(), &cache, &mut query).unwrap();

        assert!(applied);
        let meta_query = query.meta_query.expect("meta query set");
        assert_eq!(meta_query.clauses.len(), 2);
        assert!(query.excluded_ids.is_empty());
    }

    #[test]
    fn cached_mode_copies_the_id_set() {
        let mut cache = InMemoryTransientStore::new();
        let idx = index();
        idx.apply(&mut cache, PostId(4), "1").unwrap();
        idx.apply(&mut cache, PostId(9), "1").unwrap();

        let mut query = ListingQuery::homepage_main();
        let applied = run(ExclusionMode::CachedIds, &idx, &cache, &mut query).unwrap();

        assert!(applied);
        assert_eq!(query.excluded_ids, vec![PostId(4), PostId(9)]);
        assert!(query.meta_query.is_none());
    }

    #[test]
    fn secondary_query_on_the_front_page_is_untouched() {
        let cache = InMemoryTransientStore::new();
        let mut query = ListingQuery::secondary(true);

        let applied = run(ExclusionMode::Predicate, &index(), &cache, &mut query).unwrap();

        assert!(!applied);
        assert_eq!(query, ListingQuery::secondary(true));
    }

    #[test]
    fn main_query_off_the_front_page_is_untouched() {
        let cache = InMemoryTransientStore::new();
        let mut query = ListingQuery {
            is_front_page: false,
            ..ListingQuery::homepage_main()
        };

        let applied = run(ExclusionMode::CachedIds, &index(), &cache, &mut query).unwrap();

        assert!(!applied);
        assert!(query.excluded_ids.is_empty());
    }

    #[test]
    fn cached_mode_with_cold_cache_excludes_nothing() {
        // Expired or never-built cache: the listing leaks shy posts rather
        // than paying for a rebuild on the request path
        let cache = InMemoryTransientStore::new();
        let mut query = ListingQuery::homepage_main();

        let applied = run(ExclusionMode::CachedIds, &index(), &cache, &mut query).unwrap();

        assert!(applied);
        assert!(query.excluded_ids.is_empty());
    }
}
