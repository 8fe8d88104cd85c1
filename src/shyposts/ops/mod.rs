//! One module per lifecycle operation. Each exposes a `run` free function
//! generic over the storage traits, takes plain arguments, and returns a
//! structured result — no I/O, no host assumptions. The service object in
//! `plugin.rs` is a thin dispatcher over these.

pub mod activate;
pub mod exclude;
pub mod meta_box;
pub mod save;
