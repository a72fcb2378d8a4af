//! Bounded byte buffers used for every composed string.
//!
//! A [`BoundedBuffer`] is only ever built whole: the exact length of the
//! result is computed from its parts first, and the bytes are written only
//! when that length fits the capacity. There is no way to append to a
//! buffer after construction, so a partially written value cannot exist.

use thiserror::Error;

/// A composed string would exceed the fixed capacity of its destination.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{target} needs {required} bytes but its capacity is {capacity}")]
pub struct OverflowError {
    /// What was being composed, for diagnostics.
    pub target: &'static str,
    /// Exact length the composition would have produced.
    pub required: usize,
    /// Capacity of the destination.
    pub capacity: usize,
}

/// An owned byte string whose length never exceeds its capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedBuffer {
    bytes: Vec<u8>,
    capacity: usize,
}

impl BoundedBuffer {
    /// Concatenates `parts` into a new buffer of `capacity` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`OverflowError`] when the combined length exceeds `capacity`.
    /// Nothing is allocated or written in that case.
    pub fn compose(
        target: &'static str,
        capacity: usize,
        parts: &[&[u8]],
    ) -> Result<Self, OverflowError> {
        let required = parts
            .iter()
            .fold(0_usize, |total, part| total.saturating_add(part.len()));
        if required > capacity {
            return Err(OverflowError {
                target,
                required,
                capacity,
            });
        }

        let mut bytes = Vec::with_capacity(required);
        for part in parts {
            bytes.extend_from_slice(part);
        }
        Ok(Self { bytes, capacity })
    }

    /// Wraps bytes whose length the caller has already checked.
    pub(crate) fn prechecked(bytes: &[u8], capacity: usize) -> Self {
        debug_assert!(bytes.len() <= capacity, "prechecked buffer overflows");
        Self {
            bytes: bytes.to_vec(),
            capacity,
        }
    }

    /// Used length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` when no bytes are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Fixed capacity of the buffer.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// The used bytes, never the spare capacity.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
