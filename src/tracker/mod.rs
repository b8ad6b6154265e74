//! Everything about tracked weeks: what a week looks like ([model]), how it is stored
//! ([storage]), how the active week is kept in sync ([store]), what is derived from it
//! ([metrics]) and how it is moved between machines ([transfer]).

pub mod metrics;
pub mod model;
pub mod storage;
pub mod store;
pub mod transfer;
