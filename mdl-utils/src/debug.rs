//! `Debug` formatters for large buffers.
//!
//! Decoded models carry pixel buffers of several hundred kilobytes and vertex
//! pools with thousands of entries. Printing those verbatim makes `{:?}` output
//! useless, so structures opt into these formatters through
//! `#[debug(with = ...)]` from `custom_debug`.
//!
//! Enable the `debug-print-all` feature to get the full contents back.

use std::fmt;

/// Collections that can show a bounded prefix of their elements.
pub trait Preview {
    type Item: fmt::Debug;

    /// Total number of elements.
    fn total(&self) -> usize;

    /// Up to `n` leading elements.
    fn head(&self, n: usize) -> &[Self::Item];
}

impl<T: fmt::Debug> Preview for [T] {
    type Item = T;

    fn total(&self) -> usize {
        self.len()
    }

    fn head(&self, n: usize) -> &[T] {
        &self[..n.min(self.len())]
    }
}

impl<T: fmt::Debug> Preview for Vec<T> {
    type Item = T;

    fn total(&self) -> usize {
        self.len()
    }

    fn head(&self, n: usize) -> &[T] {
        self.as_slice().head(n)
    }
}

/// How many leading elements are shown before the output is cut off.
const PREVIEW_ELEMENTS: usize = 3;

/// How many leading bytes of a raw buffer are shown as hex.
const PREVIEW_BYTES: usize = 8;

/// Prints the first few elements of a slice followed by a count of the rest.
///
/// ```
/// use custom_debug::Debug;
/// use mdl_utils::debug;
///
/// #[derive(Debug)]
/// struct Pool {
///     #[debug(with = debug::trimmed_collection_fmt)]
///     items: Vec<u32>,
/// }
///
/// let pool = Pool { items: (0..10).collect() };
/// assert!(format!("{:?}", pool).contains("+ 7 elements"));
/// ```
#[cfg(not(feature = "debug-print-all"))]
pub fn trimmed_collection_fmt<C>(items: &C, f: &mut fmt::Formatter) -> fmt::Result
where
    C: Preview + ?Sized,
{
    let shown = items.head(PREVIEW_ELEMENTS);
    let hidden = items.total() - shown.len();

    if hidden == 0 {
        write!(f, "{:?}", shown)
    } else {
        write!(f, "{:?} + {} elements", shown, hidden)
    }
}

#[cfg(feature = "debug-print-all")]
pub fn trimmed_collection_fmt<C>(items: &C, f: &mut fmt::Formatter) -> fmt::Result
where
    C: Preview + ?Sized,
{
    write!(f, "{:?}", items.head(items.total()))
}

/// Prints a byte buffer as its length and a short hex prefix.
#[cfg(not(feature = "debug-print-all"))]
pub fn byte_buffer_fmt<B: AsRef<[u8]> + ?Sized>(bytes: &B, f: &mut fmt::Formatter) -> fmt::Result {
    let bytes = bytes.as_ref();
    write!(f, "<{} bytes", bytes.len())?;
    if !bytes.is_empty() {
        f.write_str(":")?;
        for byte in bytes.iter().take(PREVIEW_BYTES) {
            write!(f, " {:02x}", byte)?;
        }
        if bytes.len() > PREVIEW_BYTES {
            f.write_str(" ..")?;
        }
    }
    f.write_str(">")
}

#[cfg(feature = "debug-print-all")]
pub fn byte_buffer_fmt<B: AsRef<[u8]> + ?Sized>(bytes: &B, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{:02x?}", bytes.as_ref())
}
