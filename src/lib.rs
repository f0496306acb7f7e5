//! Load KDL configuration files into typed records.
//!
//! Every failure comes back as a [`Failure`] value, and the file handle is
//! released before [`Loader::load`] returns, whatever the outcome.

pub mod outcome;
pub use outcome::{Failure, FailureKind, Outcome, chain, map_success};

pub mod handle;
pub use handle::{FsOpener, Opener, ResourceHandle};

pub mod schema;
pub use schema::{Fields, FromDocument, SchemaError};

pub mod loader;
pub use loader::{Loader, decode_str, load};

pub mod logging;

#[cfg(test)]
mod test;
