use crate::auth::{Nonces, SAVE_ACTION};
use crate::error::Result;
use crate::flag;
use crate::model::PostId;
use crate::store::MetaStore;
use crate::ui::MetaBox;

/// Build the edit-screen sidebar box for a post: a fresh single-use save
/// token and a checkbox reflecting the stored flag.
pub fn run<S: MetaStore>(store: &S, nonces: &mut Nonces, post: PostId) -> Result<MetaBox> {
    let token = nonces.issue(SAVE_ACTION);
    let value = flag::get_flag(store, post)?;
    Ok(MetaBox::new(token, value.as_deref()))
}
