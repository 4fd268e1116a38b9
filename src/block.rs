use std::{fmt, mem};

use crate::align;

/// Bytes reserved in front of every allocated block for its size word.
pub const HEADER_SIZE: usize = mem::size_of::<usize>();

/// Bytes a freed block needs on top of its header to hold a list link.
pub const LINK_SIZE: usize = mem::size_of::<usize>();

/// Smallest block `allocate` accepts. A freed block of this size can always
/// be described by a free-list record.
pub const MIN_BLOCK_SIZE: usize = align!(HEADER_SIZE + LINK_SIZE);

/// A live allocation handed out by [`FreeListAllocator::allocate`].
///
/// The handle is the only way to reach the data region and is consumed by
/// [`FreeListAllocator::deallocate`], so a block cannot be released twice.
///
/// ```text
///   start                   offset()
///   │                       │
///   ▼                       ▼
///   ┌───────────────────────┬──────────────────────────────┐
///   │ header: size (word)   │ data: size - HEADER_SIZE     │
///   └───────────────────────┴──────────────────────────────┘
///   ◄──────────────────────── size() ───────────────────────►
/// ```
///
/// [`FreeListAllocator::allocate`]: crate::FreeListAllocator::allocate
/// [`FreeListAllocator::deallocate`]: crate::FreeListAllocator::deallocate
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a Block leaks its region until the allocator is dropped"]
pub struct Block {
  pub(crate) owner: usize,
  pub(crate) start: usize,
  pub(crate) size: usize,
}

impl Block {
  pub(crate) fn new(
    owner: usize,
    start: usize,
    size: usize,
  ) -> Self {
    Self { owner, start, size }
  }

  /// Arena offset of the first data byte, just past the header.
  pub fn offset(&self) -> usize {
    self.start + HEADER_SIZE
  }

  /// Arena offset of the header.
  pub fn start(&self) -> usize {
    self.start
  }

  /// Total bytes of the block, header included.
  pub fn size(&self) -> usize {
    self.size
  }

  /// Usable bytes in the data region.
  pub fn len(&self) -> usize {
    self.size - HEADER_SIZE
  }

  /// Always `false`: every block is at least [`MIN_BLOCK_SIZE`] bytes.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl fmt::Display for Block {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "Block(start={}, size={}, data={})", self.start, self.size, self.offset())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_min_block_holds_header_and_link() {
    assert!(MIN_BLOCK_SIZE >= HEADER_SIZE + LINK_SIZE);
    assert_eq!(MIN_BLOCK_SIZE % mem::size_of::<usize>(), 0);
  }

  #[test]
  fn test_block_geometry() {
    let block = Block::new(0, 40, 30);

    assert_eq!(block.start(), 40);
    assert_eq!(block.offset(), 40 + HEADER_SIZE);
    assert_eq!(block.size(), 30);
    assert_eq!(block.len(), 30 - HEADER_SIZE);
    assert!(!block.is_empty());
  }
}
