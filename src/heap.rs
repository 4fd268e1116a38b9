use std::{
  fmt,
  sync::atomic::{AtomicUsize, Ordering},
};

use crate::{
  arena::Arena,
  block::{Block, HEADER_SIZE, MIN_BLOCK_SIZE},
  error::AllocError,
  free_list::FreeList,
  policy::SearchMode,
};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// Explicit free-list allocator over one fixed arena.
///
/// Free regions are kept in an address-ordered list. Allocation asks the
/// [`SearchMode`] for a block, splits off whatever is left, and stamps a
/// header with the block size. Deallocation reads that header back, puts
/// the region back in address order and merges it with touching neighbours.
///
/// Not thread safe: wrap it in a lock to share it.
pub struct FreeListAllocator<S> {
  id: usize,
  arena: Arena<S>,
  free: FreeList,
  used: usize,
  mode: SearchMode,
}

impl<S> FreeListAllocator<S>
where
  S: AsRef<[u8]> + AsMut<[u8]>,
{
  /// Binds `storage` to a new allocator whose free list is a single block
  /// spanning the whole arena.
  pub fn new(
    storage: S,
    mode: SearchMode,
  ) -> Result<Self, AllocError> {
    let arena = Arena::new(storage);
    let capacity = arena.capacity();

    if capacity < MIN_BLOCK_SIZE {
      return Err(AllocError::ArenaTooSmall {
        capacity,
        minimum: MIN_BLOCK_SIZE,
      });
    }

    let mut free = FreeList::new();
    let node = free.create(0, capacity);
    free.insert(None, node);

    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);

    log::debug!("allocator {} created: {} bytes, {}", id, capacity, mode);

    Ok(Self {
      id,
      arena,
      free,
      used: 0,
      mode,
    })
  }

  /// Carves a block of `size` bytes, header included.
  ///
  /// The returned block's data region is `size - HEADER_SIZE` bytes long,
  /// or a little more when the leftover was too small to split off.
  pub fn allocate(
    &mut self,
    size: usize,
  ) -> Result<Block, AllocError> {
    if size < MIN_BLOCK_SIZE {
      log::warn!("rejected allocation of {} bytes: below minimum {}", size, MIN_BLOCK_SIZE);
      return Err(AllocError::InvalidSize {
        requested: size,
        minimum: MIN_BLOCK_SIZE,
      });
    }

    let Some(candidate) = self.mode.find(&self.free, size) else {
      let largest_free = self.largest_free_block();
      log::warn!("out of memory: requested {} bytes, largest free {}", size, largest_free);
      return Err(AllocError::OutOfMemory {
        requested: size,
        largest_free,
      });
    };

    log::trace!(
      "{} picked free block at {} ({} bytes) for {} bytes",
      self.mode,
      candidate.offset,
      candidate.size,
      size
    );

    let leftover = candidate.size - size;

    let size = if leftover > HEADER_SIZE {
      let remainder = self.free.create(candidate.offset + size, leftover);
      self.free.insert(Some(candidate.node), remainder);
      log::trace!("split: {} bytes left free at {}", leftover, candidate.offset + size);
      size
    } else {
      candidate.size
    };

    self.free.remove(candidate.prev, candidate.node);

    self.arena.write_header(candidate.offset, size);
    self.used += size;

    let block = Block::new(self.id, candidate.offset, size);

    log::debug!("allocated {}; used={}", block, self.used);

    Ok(block)
  }

  /// Returns `block` to the free list and merges it with adjacent free
  /// regions.
  pub fn deallocate(
    &mut self,
    block: Block,
  ) -> Result<(), AllocError> {
    self.check_owner(&block)?;

    let start = block.start;
    let size = self.arena.read_header(start);
    debug_assert_eq!(size, block.size, "header of {block} was overwritten");

    let node = self.free.create(start, size);
    let (prev, _) = self.free.locate_insertion_point(start);
    self.free.insert(prev, node);

    self.used -= size;
    self.free.coalesce(prev, node);

    log::debug!("deallocated {}; used={}, free blocks={}", block, self.used, self.free.len());

    Ok(())
  }

  /// Data region of a live block.
  pub fn data(
    &self,
    block: &Block,
  ) -> Result<&[u8], AllocError> {
    self.check_owner(block)?;
    Ok(self.arena.data(block.start, block.size))
  }

  pub fn data_mut(
    &mut self,
    block: &Block,
  ) -> Result<&mut [u8], AllocError> {
    self.check_owner(block)?;
    Ok(self.arena.data_mut(block.start, block.size))
  }

  /// Read-only view of the free list and the `used` counter.
  pub fn inspect(&self) -> HeapSnapshot {
    HeapSnapshot {
      capacity: self.arena.capacity(),
      used: self.used,
      free_blocks: self
        .free
        .iter()
        .map(|entry| FreeBlockInfo {
          offset: entry.block.offset,
          size: entry.block.size,
        })
        .collect(),
    }
  }

  /// Bytes held by live blocks, headers included.
  pub fn used(&self) -> usize {
    self.used
  }

  pub fn capacity(&self) -> usize {
    self.arena.capacity()
  }

  pub fn free_bytes(&self) -> usize {
    self.arena.capacity() - self.used
  }

  pub fn search_mode(&self) -> SearchMode {
    self.mode
  }

  pub fn largest_free_block(&self) -> usize {
    self.free.iter().map(|entry| entry.block.size).max().unwrap_or(0)
  }

  /// Gives the storage back. Outstanding blocks become useless.
  pub fn into_inner(self) -> S {
    self.arena.into_inner()
  }

  fn check_owner(
    &self,
    block: &Block,
  ) -> Result<(), AllocError> {
    if block.owner != self.id {
      log::warn!("allocator {} refused {} owned by allocator {}", self.id, block, block.owner);
      return Err(AllocError::ForeignBlock {
        offset: block.offset(),
      });
    }

    Ok(())
  }
}

impl<S> fmt::Debug for FreeListAllocator<S>
where
  S: AsRef<[u8]> + AsMut<[u8]>,
{
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    f.debug_struct("FreeListAllocator")
      .field("id", &self.id)
      .field("capacity", &self.arena.capacity())
      .field("used", &self.used)
      .field("mode", &self.mode)
      .field("free_blocks", &self.free.len())
      .finish()
  }
}

/// A free region as reported by [`FreeListAllocator::inspect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FreeBlockInfo {
  pub offset: usize,
  pub size: usize,
}

/// Point-in-time view of an allocator's free list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeapSnapshot {
  pub capacity: usize,
  pub used: usize,
  /// Free regions in ascending address order.
  pub free_blocks: Vec<FreeBlockInfo>,
}

impl HeapSnapshot {
  pub fn len(&self) -> usize {
    self.free_blocks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.free_blocks.is_empty()
  }

  pub fn free_bytes(&self) -> usize {
    self.free_blocks.iter().map(|b| b.size).sum()
  }

  pub fn largest_free(&self) -> usize {
    self.free_blocks.iter().map(|b| b.size).max().unwrap_or(0)
  }
}

impl fmt::Display for HeapSnapshot {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    for (i, block) in self.free_blocks.iter().enumerate() {
      writeln!(f, "{}) offset={} size={}", i + 1, block.offset, block.size)?;
    }

    write!(f, "num_nodes={}, used={}", self.free_blocks.len(), self.used)
  }
}
