//! # Lifecycle Hooks
//!
//! Typed replacement for the host's string-keyed action/filter tables. A
//! plugin implements [`HostHooks`] — one method per named lifecycle event,
//! each with a narrow input/output contract — and the host registers it in
//! a [`HookRegistry`] once at startup. No hidden static state: whoever owns
//! the registry owns every registered service.
//!
//! Events and their host-side moments:
//!
//! | Event             | Fired when                                         |
//! |-------------------|----------------------------------------------------|
//! | `activate`        | The plugin is (re)enabled                          |
//! | `save_post`       | The edit form is submitted, before the host's save |
//! | `pre_get_posts`   | A listing query is built, before execution         |
//! | `protected_meta`  | A generic custom-field editor lists meta keys      |
//! | `render_meta_box` | The edit screen draws its sidebar boxes            |

use crate::error::Result;
use crate::model::{PostId, PostKind, UserId};
use crate::query::ListingQuery;
use crate::ui::MetaBox;

/// The edit-form submission as the save hook sees it.
#[derive(Debug, Clone)]
pub struct SaveRequest {
    pub post_id: PostId,
    pub kind: PostKind,
    pub user: UserId,
    /// Token from the form's hidden nonce field, if the form carried one
    pub nonce: Option<String>,
    /// Raw checkbox value; browsers omit unchecked checkboxes entirely
    pub raw_value: Option<String>,
}

/// Why a save was silently skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The user may not edit this record
    Capability,
    /// Missing, spent, or forged anti-forgery token
    Nonce,
}

/// What a save hook did with the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Flag written and cache updated
    Saved { shy: bool },
    /// Precondition failed; neither flag nor cache was touched
    Skipped(SkipReason),
}

/// Typed callbacks for the lifecycle events this plugin consumes.
pub trait HostHooks {
    /// Activation: rebuild derived state from scratch
    fn on_activate(&mut self) -> Result<()>;

    /// Pre-save: validate, persist the flag, update the cache
    fn on_save_post(&mut self, req: &SaveRequest) -> Result<SaveOutcome>;

    /// Listing-query construction: mutate the query in place.
    /// Returns whether an exclusion was applied.
    fn on_pre_get_posts(&mut self, query: &mut ListingQuery) -> Result<bool>;

    /// Whether `key` should be hidden from generic custom-field editors
    fn is_protected_meta(&self, key: &str) -> bool;

    /// Editor sidebar: produce the box for this post's edit screen
    fn on_render_meta_box(&mut self, post: PostId) -> Result<MetaBox>;
}

/// Host-side dispatch table. Owns every registered plugin and fires each
/// event at all of them, in registration order.
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Box<dyn HostHooks>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hooks: Box<dyn HostHooks>) {
        self.hooks.push(hooks);
    }

    pub fn activate(&mut self) -> Result<()> {
        for hook in &mut self.hooks {
            hook.on_activate()?;
        }
        Ok(())
    }

    pub fn save_post(&mut self, req: &SaveRequest) -> Result<Vec<SaveOutcome>> {
        let mut outcomes = Vec::with_capacity(self.hooks.len());
        for hook in &mut self.hooks {
            outcomes.push(hook.on_save_post(req)?);
        }
        Ok(outcomes)
    }

    pub fn pre_get_posts(&mut self, query: &mut ListingQuery) -> Result<()> {
        for hook in &mut self.hooks {
            hook.on_pre_get_posts(query)?;
        }
        Ok(())
    }

    pub fn is_protected_meta(&self, key: &str) -> bool {
        self.hooks.iter().any(|hook| hook.is_protected_meta(key))
    }

    pub fn render_meta_box(&mut self, post: PostId) -> Result<Vec<MetaBox>> {
        let mut boxes = Vec::with_capacity(self.hooks.len());
        for hook in &mut self.hooks {
            boxes.push(hook.on_render_meta_box(post)?);
        }
        Ok(boxes)
    }
}
