//! Allocator error types.

use std::error::Error;
use std::fmt;

/// Errors reported by [`FreeListAllocator`](crate::FreeListAllocator).
///
/// Every error is returned to the immediate caller. The allocator never
/// retries and leaves its state untouched when it fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
  /// The request is smaller than a block that could later be freed.
  InvalidSize {
    /// Requested block size in bytes, header included.
    requested: usize,
    /// Smallest accepted block size.
    minimum: usize,
  },
  /// No free block is large enough for the request.
  OutOfMemory {
    /// Requested block size in bytes, header included.
    requested: usize,
    /// Size of the largest free block, `0` when the arena is full.
    largest_free: usize,
  },
  /// The arena cannot hold even a single minimum block.
  ArenaTooSmall {
    /// Arena capacity in bytes.
    capacity: usize,
    /// Smallest usable arena.
    minimum: usize,
  },
  /// The block was produced by a different allocator.
  ForeignBlock {
    /// Data offset carried by the rejected block.
    offset: usize,
  },
}

impl fmt::Display for AllocError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      Self::InvalidSize { requested, minimum } => {
        write!(f, "invalid size: requested {requested} bytes, minimum block is {minimum} bytes")
      }
      Self::OutOfMemory {
        requested,
        largest_free,
      } => {
        write!(
          f,
          "out of memory: requested {requested} bytes, largest free block {largest_free} bytes"
        )
      }
      Self::ArenaTooSmall { capacity, minimum } => {
        write!(f, "arena too small: {capacity} bytes, need at least {minimum} bytes")
      }
      Self::ForeignBlock { offset } => {
        write!(f, "block at offset {offset} belongs to another allocator")
      }
    }
  }
}

impl Error for AllocError {}
