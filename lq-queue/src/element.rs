//! Elements handed back to the caller by queue removal.

/// A value removed from a queue.
///
/// The element owns its string exclusively. Dropping it releases the
/// string; there is no separate free step to forget or repeat.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    value: String,
}

impl Element {
    #[inline]
    pub(crate) fn new(value: String) -> Self {
        Self { value }
    }

    /// Returns the stored string.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consumes the element, returning the stored string.
    #[inline]
    pub fn into_value(self) -> String {
        self.value
    }

    /// Copies the value into a fixed-size byte buffer.
    ///
    /// At most `buf.len() - 1` bytes are copied; the rest of the buffer is
    /// zero-filled, so the result is always NUL-terminated. Truncation is
    /// byte-wise and may split a multi-byte character. An empty buffer is
    /// left untouched.
    ///
    /// Returns the number of value bytes copied.
    ///
    /// # Example
    ///
    /// ```
    /// use lq_queue::{Queue, QueueStorage};
    ///
    /// let mut storage = QueueStorage::new();
    /// let mut queue: Queue = Queue::new();
    /// queue.insert_tail(&mut storage, "gerbil").unwrap();
    ///
    /// let mut buf = [0xffu8; 4];
    /// queue.remove_head(&mut storage, Some(&mut buf));
    /// assert_eq!(&buf, b"ger\0");
    /// ```
    pub fn copy_to(&self, buf: &mut [u8]) -> usize {
        let Some(limit) = buf.len().checked_sub(1) else {
            return 0;
        };
        let bytes = self.value.as_bytes();
        let n = bytes.len().min(limit);
        buf[..n].copy_from_slice(&bytes[..n]);
        buf[n..].fill(0);
        n
    }
}

impl AsRef<str> for Element {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl From<Element> for String {
    fn from(element: Element) -> Self {
        element.value
    }
}
