//! Save-precondition collaborators: the host's capability check and the
//! anti-forgery token registry. Failing either one makes the save a silent
//! skip; it never becomes an error (the host shows its own generic save
//! confirmation regardless).

use crate::model::{PostId, PostKind, UserId};
use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Form action the edit-screen nonce is issued for.
pub const SAVE_ACTION: &str = "shyposts_save";

/// How long an issued token stays valid. Matches the host facility's
/// roughly-a-day nonce lifetime.
const TOKEN_TTL_HOURS: i64 = 24;

/// The host's permission model. Pages and posts are checked under different
/// capabilities, so the kind travels with the query.
pub trait Capabilities {
    fn can_edit(&self, user: UserId, post: PostId, kind: PostKind) -> bool;
}

/// Grants everything. Suitable for embedded hosts that gate editing
/// upstream of this plugin.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

impl Capabilities for AllowAll {
    fn can_edit(&self, _user: UserId, _post: PostId, _kind: PostKind) -> bool {
        true
    }
}

/// Explicit per-user grants, by content kind.
#[derive(Debug, Default)]
pub struct Roster {
    post_editors: HashSet<UserId>,
    page_editors: HashSet<UserId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant_posts(mut self, user: UserId) -> Self {
        self.post_editors.insert(user);
        self
    }

    pub fn grant_pages(mut self, user: UserId) -> Self {
        self.page_editors.insert(user);
        self
    }
}

impl Capabilities for Roster {
    fn can_edit(&self, user: UserId, _post: PostId, kind: PostKind) -> bool {
        match kind {
            PostKind::Post => self.post_editors.contains(&user),
            PostKind::Page => self.page_editors.contains(&user),
        }
    }
}

/// Single-use anti-forgery tokens, issued per edit form and consumed on
/// verification. A token proves the save request originated from the
/// legitimate edit screen.
///
/// Tokens expire after [`TOKEN_TTL_HOURS`]; abandoned edit screens stop
/// counting against the registry once their tokens lapse, and each `issue`
/// prunes whatever has expired so the registry stays bounded by the number
/// of live edit screens.
#[derive(Debug)]
pub struct Nonces {
    ttl: Duration,
    issued: HashMap<String, HashMap<String, DateTime<Utc>>>,
}

impl Default for Nonces {
    fn default() -> Self {
        Self::new()
    }
}

impl Nonces {
    pub fn new() -> Self {
        Self {
            ttl: Duration::hours(TOKEN_TTL_HOURS),
            issued: HashMap::new(),
        }
    }

    /// Mint a fresh token for `action`. Rendered into the edit form.
    /// Expired tokens are pruned on the way.
    pub fn issue(&mut self, action: &str) -> String {
        self.prune();
        let token = Uuid::new_v4().to_string();
        self.issued
            .entry(action.to_string())
            .or_default()
            .insert(token.clone(), Utc::now() + self.ttl);
        token
    }

    /// Check and consume a token. A second verification of the same token
    /// fails, as does a token issued for a different action or one past
    /// its lifetime.
    pub fn verify(&mut self, action: &str, token: &str) -> bool {
        self.issued
            .get_mut(action)
            .and_then(|tokens| tokens.remove(token))
            .is_some_and(|expires_at| expires_at > Utc::now())
    }

    /// Live (unexpired) tokens currently outstanding for `action`.
    pub fn outstanding(&self, action: &str) -> usize {
        let now = Utc::now();
        self.issued.get(action).map_or(0, |tokens| {
            tokens.values().filter(|expires_at| **expires_at > now).count()
        })
    }

    fn prune(&mut self) {
        let now = Utc::now();
        for tokens in self.issued.values_mut() {
            tokens.retain(|_, expires_at| *expires_at > now);
        }
        self.issued.retain(|_, tokens| !tokens.is_empty());
    }

    /// Force a token's expiry into the past. Test hook for TTL behavior.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn expire(&mut self, action: &str, token: &str) {
        if let Some(expires_at) = self
            .issued
            .get_mut(action)
            .and_then(|tokens| tokens.get_mut(token))
        {
            *expires_at = Utc::now() - Duration::seconds(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_once() {
        let mut nonces = Nonces::new();
        let token = nonces.issue(SAVE_ACTION);

        assert!(nonces.verify(SAVE_ACTION, &token));
        assert!(!nonces.verify(SAVE_ACTION, &token));
    }

    #[test]
    fn token_is_bound_to_its_action() {
        let mut nonces = Nonces::new();
        let token = nonces.issue(SAVE_ACTION);
        assert!(!nonces.verify("some_other_form", &token));
    }

    #[test]
    fn unissued_token_fails() {
        let mut nonces = Nonces::new();
        assert!(!nonces.verify(SAVE_ACTION, "made-up"));
    }

    #[test]
    fn expired_token_fails_verification() {
        let mut nonces = Nonces::new();
        let token = nonces.issue(SAVE_ACTION);
        nonces.expire(SAVE_ACTION, &token);
        assert!(!nonces.verify(SAVE_ACTION, &token));
    }

    #[test]
    fn issuing_prunes_expired_tokens() {
        let mut nonces = Nonces::new();
        let stale = nonces.issue(SAVE_ACTION);
        nonces.expire(SAVE_ACTION, &stale);

        // Abandoned edit screens lapse; only the fresh token remains
        let fresh = nonces.issue(SAVE_ACTION);
        assert_eq!(nonces.outstanding(SAVE_ACTION), 1);
        assert!(!nonces.verify(SAVE_ACTION, &stale));
        assert!(nonces.verify(SAVE_ACTION, &fresh));
    }

    #[test]
    fn roster_distinguishes_posts_from_pages() {
        let roster = Roster::new().grant_posts(UserId(1)).grant_pages(UserId(2));

        assert!(roster.can_edit(UserId(1), PostId(1), PostKind::Post));
        assert!(!roster.can_edit(UserId(1), PostId(1), PostKind::Page));
        assert!(roster.can_edit(UserId(2), PostId(1), PostKind::Page));
        assert!(!roster.can_edit(UserId(3), PostId(1), PostKind::Post));
    }
}
