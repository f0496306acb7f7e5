use crate::{
    handle::{FsOpener, Opener, ResourceHandle},
    outcome::{Failure, Outcome, chain},
    schema::FromDocument,
};
use kdl::KdlDocument;
use std::{io::Read, path::Path};

/// Opens a configuration file, decodes it into `T`, and closes it again.
///
/// The opener decides what "open" means; [`FsOpener`] reads from disk.
#[derive(Debug, Clone, Default)]
pub struct Loader<O = FsOpener> {
    opener: O,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: Opener> Loader<O> {
    pub fn with_opener(opener: O) -> Self {
        Self { opener }
    }

    pub fn load<T: FromDocument>(&self, path: impl AsRef<Path>) -> Outcome<T> {
        let path = path.as_ref();

        // the handle is dropped when `decode_handle` returns, on every path
        chain(ResourceHandle::acquire(&self.opener, path), decode_handle)
    }
}

fn decode_handle<R: Read, T: FromDocument>(mut handle: ResourceHandle<R>) -> Outcome<T> {
    let bytes = handle.read_all()?;
    let text = String::from_utf8(bytes).map_err(Failure::decode_error)?;
    decode_str(&text)
}

/// Loads `path` from the filesystem.
pub fn load<T: FromDocument>(path: impl AsRef<Path>) -> Outcome<T> {
    Loader::new().load(path)
}

/// Decodes text that has already been read, with the same failure mapping
/// as [`Loader::load`].
pub fn decode_str<T: FromDocument>(text: &str) -> Outcome<T> {
    let doc = text.parse::<KdlDocument>().map_err(Failure::decode_error)?;
    T::from_document(&doc).map_err(Failure::decode_error)
}
