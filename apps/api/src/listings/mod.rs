// Job board core: the filter engine, posting submission, and the in-memory board.
// Everything here is synchronous and in-process; handlers are the only async edge.

pub mod filter;
pub mod handlers;
pub mod posting;
pub mod seed;
pub mod store;
pub mod summary;
