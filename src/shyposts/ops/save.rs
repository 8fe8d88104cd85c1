use crate::auth::{Capabilities, Nonces, SAVE_ACTION};
use crate::error::Result;
use crate::flag::{self, FLAG_OFF};
use crate::hooks::{SaveOutcome, SaveRequest, SkipReason};
use crate::index::ShyIndex;
use crate::store::MetaStore;
use crate::transient::TransientStore;
use crate::ui::sanitize_field;
use log::debug;

/// The save pipeline: capability check, nonce check, sanitize, persist the
/// flag, update the cache — in that order, stopping silently at the first
/// failed precondition. A skip touches neither flag nor cache.
pub fn run<S, T>(
    store: &mut S,
    cache: &mut T,
    index: &ShyIndex,
    caps: &dyn Capabilities,
    nonces: &mut Nonces,
    req: &SaveRequest,
) -> Result<SaveOutcome>
where
    S: MetaStore,
    T: TransientStore,
{
    if !caps.can_edit(req.user, req.post_id, req.kind) {
        debug!("save skipped for {}: missing edit capability", req.post_id);
        return Ok(SaveOutcome::Skipped(SkipReason::Capability));
    }

    let verified = req
        .nonce
        .as_deref()
        .is_some_and(|token| nonces.verify(SAVE_ACTION, token));
    if !verified {
        debug!("save skipped for {}: invalid nonce", req.post_id);
        return Ok(SaveOutcome::Skipped(SkipReason::Nonce));
    }

    // An unchecked checkbox never reaches the form data; that is a reset
    let value = match req.raw_value.as_deref() {
        Some(raw) => sanitize_field(raw),
        None => FLAG_OFF.to_string(),
    };

    flag::set_flag(store, req.post_id, &value)?;
    index.apply(cache, req.post_id, &value)?;

    Ok(SaveOutcome::Saved {
        shy: flag::is_shy(&value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AllowAll, Roster};
    use crate::model::{PostId, PostKind, UserId};
    use crate::store::memory::InMemoryMetaStore;
    use crate::transient::memory::InMemoryTransientStore;
    use chrono::Duration;

    struct Harness {
        store: InMemoryMetaStore,
        cache: InMemoryTransientStore,
        index: ShyIndex,
        nonces: Nonces,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                store: InMemoryMetaStore::new(),
                cache: InMemoryTransientStore::new(),
                index: ShyIndex::new(Duration::days(365)),
                nonces: Nonces::new(),
            }
        }

        fn request(&mut self, post: u64, checked: bool) -> SaveRequest {
            SaveRequest {
                post_id: PostId(post),
                kind: PostKind::Post,
                user: UserId(1),
                nonce: Some(self.nonces.issue(SAVE_ACTION)),
                raw_value: checked.then(|| "1".to_string()),
            }
        }

        fn save(&mut self, req: &SaveRequest) -> SaveOutcome {
            run(
                &mut self.store,
                &mut self.cache,
                &self.index,
                &AllowAll,
                &mut self.nonces,
                req,
            )
            .unwrap()
        }
    }

    #[test]
    fn checked_box_flags_post_and_fills_cache() {
        let mut h = Harness::new();
        let req = h.request(7, true);

        assert_eq!(h.save(&req), SaveOutcome::Saved { shy: true });
        assert_eq!(
            flag::get_flag(&h.store, PostId(7)).unwrap(),
            Some("1".to_string())
        );
        assert_eq!(h.index.load(&h.cache).unwrap(), vec![PostId(7)]);
    }

    #[test]
    fn unchecked_box_resets_flag_and_cache() {
        let mut h = Harness::new();
        let flag_on = h.request(7, true);
        h.save(&flag_on);

        let flag_off = h.request(7, false);
        assert_eq!(h.save(&flag_off), SaveOutcome::Saved { shy: false });
        assert_eq!(
            flag::get_flag(&h.store, PostId(7)).unwrap(),
            Some("0".to_string())
        );
        assert!(h.index.load(&h.cache).unwrap().is_empty());
    }

    #[test]
    fn missing_nonce_skips_without_touching_state() {
        let mut h = Harness::new();
        let mut req = h.request(7, true);
        req.nonce = None;

        assert_eq!(h.save(&req), SaveOutcome::Skipped(SkipReason::Nonce));
        assert_eq!(flag::get_flag(&h.store, PostId(7)).unwrap(), None);
        assert!(h.index.load(&h.cache).unwrap().is_empty());
    }

    #[test]
    fn forged_nonce_skips_without_touching_state() {
        let mut h = Harness::new();
        let mut req = h.request(7, true);
        req.nonce = Some("not-a-real-token".to_string());

        assert_eq!(h.save(&req), SaveOutcome::Skipped(SkipReason::Nonce));
        assert_eq!(flag::get_flag(&h.store, PostId(7)).unwrap(), None);
    }

    #[test]
    fn replayed_nonce_fails_the_second_save() {
        let mut h = Harness::new();
        let req = h.request(7, true);
        assert_eq!(h.save(&req), SaveOutcome::Saved { shy: true });

        // Same token again: already consumed
        let replay = SaveRequest {
            raw_value: None,
            ..req
        };
        assert_eq!(h.save(&replay), SaveOutcome::Skipped(SkipReason::Nonce));
        // First save's state is intact
        assert_eq!(h.index.load(&h.cache).unwrap(), vec![PostId(7)]);
    }

    #[test]
    fn capability_denial_skips_before_nonce_spend() {
        let mut h = Harness::new();
        let roster = Roster::new().grant_pages(UserId(1));
        let req = h.request(7, true); // PostKind::Post, user only has pages

        let outcome = run(
            &mut h.store,
            &mut h.cache,
            &h.index,
            &roster,
            &mut h.nonces,
            &req,
        )
        .unwrap();

        assert_eq!(outcome, SaveOutcome::Skipped(SkipReason::Capability));
        assert_eq!(flag::get_flag(&h.store, PostId(7)).unwrap(), None);
        // The token was never consumed
        assert!(h
            .nonces
            .verify(SAVE_ACTION, req.nonce.as_deref().unwrap()));
    }

    #[test]
    fn raw_input_is_sanitized_before_storage() {
        let mut h = Harness::new();
        let mut req = h.request(7, true);
        req.raw_value = Some("  1\n".to_string());

        assert_eq!(h.save(&req), SaveOutcome::Saved { shy: true });
        assert_eq!(
            flag::get_flag(&h.store, PostId(7)).unwrap(),
            Some("1".to_string())
        );
    }

    #[test]
    fn tampered_value_is_stored_but_not_shy() {
        let mut h = Harness::new();
        let mut req = h.request(7, true);
        req.raw_value = Some("<b>1</b>yes".to_string());

        assert_eq!(h.save(&req), SaveOutcome::Saved { shy: false });
        assert_eq!(
            flag::get_flag(&h.store, PostId(7)).unwrap(),
            Some("1yes".to_string())
        );
        assert!(h.index.load(&h.cache).unwrap().is_empty());
    }
}
