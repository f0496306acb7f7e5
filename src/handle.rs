use crate::outcome::{Failure, FailureKind, Outcome};
use std::{
    fs::{File, OpenOptions},
    io::{self, Read},
    path::{Path, PathBuf},
};

/// The OS-level open primitive.
///
/// Whatever `open` returns is released when it is dropped.
pub trait Opener {
    type Handle: Read;

    fn open(&self, path: &Path) -> io::Result<Self::Handle>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FsOpener;

impl Opener for FsOpener {
    type Handle = File;

    fn open(&self, path: &Path) -> io::Result<File> {
        OpenOptions::new().read(true).open(path)
    }
}

/// Read access to one opened resource.
///
/// The handle has a single owner and closes when it goes out of scope,
/// whichever way that scope is left.
#[derive(Debug)]
pub struct ResourceHandle<R: Read> {
    path: PathBuf,
    inner: R,
}

impl<R: Read> ResourceHandle<R> {
    pub fn acquire<O>(opener: &O, path: &Path) -> Outcome<Self>
    where
        O: Opener<Handle = R>,
    {
        if path.as_os_str().is_empty() {
            return Err(Failure::new(
                FailureKind::ResourceUnavailable,
                "cannot open an empty path",
            ));
        }

        let inner = opener
            .open(path)
            .map_err(|e| Failure::resource_unavailable(path, e))?;

        Ok(Self {
            path: path.to_path_buf(),
            inner,
        })
    }

    /// Reads the remaining bytes of the resource.
    pub fn read_all(&mut self) -> Outcome<Vec<u8>> {
        let mut bytes = Vec::new();
        self.inner
            .read_to_end(&mut bytes)
            .map_err(|e| Failure::unreadable(&self.path, e))?;
        Ok(bytes)
    }
}
