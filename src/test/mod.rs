use crate::{Fields, FromDocument, Opener, SchemaError};
use kdl::KdlDocument;
use std::{
    io::{self, Cursor, Read},
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};


#[derive(Debug, PartialEq)]
pub(crate) struct Sample {
    pub field: String,
}

impl FromDocument for Sample {
    fn from_document(doc: &KdlDocument) -> Result<Self, SchemaError> {
        let fields = Fields::new(doc, &["field"])?;
        Ok(Self {
            field: fields.string("field")?,
        })
    }
}

/// In-memory opener that counts how many handles it hands out and how many
/// get dropped.
#[derive(Debug, Default, Clone)]
pub(crate) struct CountingOpener {
    contents: Option<Vec<u8>>,
    fail_reads: bool,
    opens: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
}

impl CountingOpener {
    pub fn with_contents(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: Some(contents.into()),
            ..Self::default()
        }
    }

    pub fn missing() -> Self {
        Self::default()
    }

    pub fn broken_reads() -> Self {
        Self {
            contents: Some(Vec::new()),
            fail_reads: true,
            ..Self::default()
        }
    }

    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

pub(crate) struct CountingHandle {
    inner: Cursor<Vec<u8>>,
    fail_reads: bool,
    closes: Arc<AtomicUsize>,
}

impl Read for CountingHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.fail_reads {
            return Err(io::Error::other("device went away"));
        }
        self.inner.read(buf)
    }
}

impl Drop for CountingHandle {
    fn drop(&mut self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

impl Opener for CountingOpener {
    type Handle = CountingHandle;

    fn open(&self, _path: &Path) -> io::Result<CountingHandle> {
        let contents = self
            .contents
            .clone()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;

        self.opens.fetch_add(1, Ordering::SeqCst);

        Ok(CountingHandle {
            inner: Cursor::new(contents),
            fail_reads: self.fail_reads,
            closes: Arc::clone(&self.closes),
        })
    }
}
