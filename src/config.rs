//! Allocator configuration.

use crate::error::AllocError;
use crate::heap::FreeListAllocator;
use crate::policy::SearchMode;

/// Parameters for an allocator that owns a heap-backed arena.
///
/// Use [`FreeListAllocator::new`] directly to manage storage you already
/// have (a stack array, a borrowed slice, an [`MmapRegion`](crate::MmapRegion)).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeapConfig {
  /// Arena capacity in bytes.
  pub arena_size: usize,
  /// Placement policy, fixed for the allocator's lifetime.
  pub search_mode: SearchMode,
}

impl HeapConfig {
  /// Default arena size in bytes.
  pub const DEFAULT_ARENA_SIZE: usize = 128;

  pub fn new(arena_size: usize) -> Self {
    Self {
      arena_size,
      search_mode: SearchMode::default(),
    }
  }

  pub fn with_arena_size(
    mut self,
    arena_size: usize,
  ) -> Self {
    self.arena_size = arena_size;
    self
  }

  pub fn with_search_mode(
    mut self,
    search_mode: SearchMode,
  ) -> Self {
    self.search_mode = search_mode;
    self
  }

  /// Allocates a zeroed arena of `arena_size` bytes and binds an allocator
  /// to it.
  pub fn build(&self) -> Result<FreeListAllocator<Box<[u8]>>, AllocError> {
    let storage = vec![0u8; self.arena_size].into_boxed_slice();
    FreeListAllocator::new(storage, self.search_mode)
  }
}

impl Default for HeapConfig {
  fn default() -> Self {
    Self::new(Self::DEFAULT_ARENA_SIZE)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_config() {
    let config = HeapConfig::default();

    assert_eq!(config.arena_size, 128);
    assert_eq!(config.search_mode, SearchMode::BestFit);
  }

  #[test]
  fn test_build_uses_settings() {
    let heap = HeapConfig::default()
      .with_arena_size(256)
      .with_search_mode(SearchMode::FirstFit)
      .build()
      .unwrap();

    assert_eq!(heap.capacity(), 256);
    assert_eq!(heap.search_mode(), SearchMode::FirstFit);
    assert_eq!(heap.used(), 0);
  }

  #[test]
  fn test_build_rejects_tiny_arena() {
    let err = HeapConfig::new(4).build().unwrap_err();

    assert!(matches!(err, AllocError::ArenaTooSmall { capacity: 4, .. }));
  }
}
