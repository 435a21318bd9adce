//! Byte sources: a sliding window over the parsed bytes.
//!
//! A source exposes a window `[byte_offset, end_offset)` of materialized
//! bytes plus two operations: `more` appends bytes at the end (returning 0 at
//! end of input) and `less` releases bytes from the front. Backing storage is
//! one of five variants behind a tagged enum. Ownership is exclusive: a
//! parser consumes its source and drops it when closed.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use memmap2::Mmap;

use crate::error::{YeastError, YeastResult};

/// Growth quantum of the dynamic buffer. A good match for I/O operation size.
pub(crate) const DYNAMIC_BUFFER_SIZE: usize = 8 * 1024;

/// A growable byte buffer with front-release and gap reclamation.
///
/// Released bytes leave a gap at the front of the allocation. Once the gap is
/// at least as large as the retained data, the data is moved back to the
/// start; the copy never overlaps and total copying stays linear in the
/// number of bytes ever appended.
#[derive(Debug, Default)]
struct DynamicBuffer {
    buf: Vec<u8>,
    start: usize,
    released: u64,
}

impl DynamicBuffer {
    fn window(&self) -> &[u8] {
        &self.buf[self.start..]
    }

    fn byte_offset(&self) -> u64 {
        self.released
    }

    fn less(&mut self, size: usize) -> YeastResult<usize> {
        if size > self.buf.len() - self.start {
            return Err(YeastError::InvalidArgument("released more than the window holds"));
        }
        self.start += size;
        self.released += size as u64;
        let retained = self.buf.len() - self.start;
        if self.start >= retained {
            self.buf.copy_within(self.start.., 0);
            self.buf.truncate(retained);
            self.start = 0;
        }
        Ok(size)
    }

    /// Make room for `size` more bytes, growing in [`DYNAMIC_BUFFER_SIZE`]
    /// multiples, then fill from `reader`. Short reads are allowed; 0 means
    /// end of input.
    fn fill(&mut self, size: usize, reader: &mut dyn Read) -> YeastResult<usize> {
        if size == 0 {
            return Ok(0);
        }
        let len = self.buf.len();
        if len + size > self.buf.capacity() {
            let need = (len + size).div_ceil(DYNAMIC_BUFFER_SIZE) * DYNAMIC_BUFFER_SIZE;
            self.buf.reserve_exact(need - len);
        }
        self.buf.resize(len + size, 0);
        let appended = match reader.read(&mut self.buf[len..]) {
            Ok(n) => n,
            Err(err) => {
                self.buf.truncate(len);
                return Err(err.into());
            }
        };
        self.buf.truncate(len + appended);
        Ok(appended)
    }
}

/// A source of bytes for parsing.
#[derive(Debug)]
pub enum ByteSource<'src> {
    /// Borrowed static buffer (also covers strings). `more` is always 0.
    Slice { data: &'src [u8], released: usize },
    /// Owned buffer with gap reclamation and no backing input.
    Buffer(DynamicBufferSource),
    /// Streaming reads from a file.
    File(FileSource),
    /// Streaming reads from an arbitrary reader (pipes, standard input, ...).
    Read(ReadSource),
    /// The whole file mapped at open; the window spans the mapping.
    Mmap(MmapSource),
}

#[derive(Debug)]
pub struct DynamicBufferSource {
    inner: DynamicBuffer,
}

#[derive(Debug)]
pub struct FileSource {
    inner: DynamicBuffer,
    file: File,
}

pub struct ReadSource {
    inner: DynamicBuffer,
    reader: Box<dyn Read>,
}

impl std::fmt::Debug for ReadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadSource").field("inner", &self.inner).finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct MmapSource {
    map: Mmap,
    released: usize,
}

impl<'src> ByteSource<'src> {
    /// Wrap a memory buffer.
    #[must_use]
    pub fn from_slice(data: &'src [u8]) -> Self {
        ByteSource::Slice { data, released: 0 }
    }

    /// Wrap a string.
    #[must_use]
    pub fn from_str(data: &'src str) -> Self {
        Self::from_slice(data.as_bytes())
    }

    /// Take ownership of a byte buffer.
    #[must_use]
    pub fn from_vec(data: Vec<u8>) -> Self {
        ByteSource::Buffer(DynamicBufferSource {
            inner: DynamicBuffer { buf: data, start: 0, released: 0 },
        })
    }

    /// Stream from an arbitrary reader.
    #[must_use]
    pub fn from_reader<R: Read + 'static>(reader: R) -> Self {
        ByteSource::Read(ReadSource { inner: DynamicBuffer::default(), reader: Box::new(reader) })
    }

    /// Stream from an open file without mapping it.
    #[must_use]
    pub fn from_file_read(file: File) -> Self {
        ByteSource::File(FileSource { inner: DynamicBuffer::default(), file })
    }

    /// Map an open file into memory. Fails when the file cannot be mapped
    /// (zero length, pipe, ...).
    pub fn from_file_mmap(file: &File) -> YeastResult<Self> {
        // SAFETY: the mapping is read-only and the file is expected not to be
        // truncated while the parser runs; this mirrors the usual contract of
        // memory-mapped input.
        let map = unsafe { Mmap::map(file)? };
        Ok(ByteSource::Mmap(MmapSource { map, released: 0 }))
    }

    /// Map the file if possible, fall back to streaming reads otherwise.
    #[must_use]
    pub fn from_file(file: File) -> Self {
        match Self::from_file_mmap(&file) {
            Ok(source) => source,
            Err(_) => Self::from_file_read(file),
        }
    }

    /// Open a path. `"-"` means standard input.
    pub fn from_path<P: AsRef<Path>>(path: P) -> YeastResult<Self> {
        if path.as_ref() == Path::new("-") {
            return Ok(Self::from_reader(io::stdin()));
        }
        let file = File::open(path)?;
        Ok(Self::from_file(file))
    }

    /// The currently materialized bytes.
    #[must_use]
    pub fn window(&self) -> &[u8] {
        match self {
            ByteSource::Slice { data, released } => &data[*released..],
            ByteSource::Buffer(s) => s.inner.window(),
            ByteSource::File(s) => s.inner.window(),
            ByteSource::Read(s) => s.inner.window(),
            ByteSource::Mmap(s) => &s.map[s.released..],
        }
    }

    /// How many bytes were released before the start of the window.
    #[must_use]
    pub fn byte_offset(&self) -> u64 {
        match self {
            ByteSource::Slice { released, .. } => *released as u64,
            ByteSource::Buffer(s) => s.inner.byte_offset(),
            ByteSource::File(s) => s.inner.byte_offset(),
            ByteSource::Read(s) => s.inner.byte_offset(),
            ByteSource::Mmap(s) => s.released as u64,
        }
    }

    /// The absolute offset just past the last available byte.
    #[must_use]
    pub fn end_offset(&self) -> u64 {
        self.byte_offset() + self.window().len() as u64
    }

    /// Increase the window by up to `size` bytes at the end. Returns the
    /// actual increase; 0 signals end of input.
    pub fn more(&mut self, size: usize) -> YeastResult<usize> {
        match self {
            ByteSource::Slice { .. } | ByteSource::Buffer(_) | ByteSource::Mmap(_) => Ok(0),
            ByteSource::File(s) => s.inner.fill(size, &mut s.file),
            ByteSource::Read(s) => s.inner.fill(size, &mut s.reader),
        }
    }

    /// Release `size` bytes from the front of the window.
    pub fn less(&mut self, size: usize) -> YeastResult<usize> {
        match self {
            ByteSource::Slice { data, released } => {
                if size > data.len() - *released {
                    return Err(YeastError::InvalidArgument(
                        "released more than the window holds",
                    ));
                }
                *released += size;
                Ok(size)
            }
            ByteSource::Buffer(s) => s.inner.less(size),
            ByteSource::File(s) => s.inner.less(size),
            ByteSource::Read(s) => s.inner.less(size),
            ByteSource::Mmap(s) => {
                if size > s.map.len() - s.released {
                    return Err(YeastError::InvalidArgument(
                        "released more than the window holds",
                    ));
                }
                s.released += size;
                Ok(size)
            }
        }
    }
}
