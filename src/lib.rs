//! # rfreelist - An Explicit Free-List Heap Allocator
//!
//! This crate provides a self-contained **free-list allocator** that manages
//! one fixed-size byte arena. It never falls back to the system allocator
//! for the memory it hands out: every block comes from the arena given at
//! construction and goes back to it on release.
//!
//! ## Overview
//!
//! Free regions are tracked in a singly linked list kept in ascending
//! address order. Allocation splits a free region, deallocation merges it
//! back with its neighbours:
//!
//! ```text
//!   Arena (128 bytes) after allocate(40), allocate(40), deallocate(first):
//!
//!   0             40            80                      128
//!   ┌─────────────┬─────────────┬────────────────────────┐
//!   │ free (40)   │ used (40)   │ free (48)              │
//!   └─────────────┴─────────────┴────────────────────────┘
//!         ▲                               ▲
//!         │                               │
//!       head ───────── next ──────────────┘
//!
//!   allocate(30) reuses the hole at 0 and leaves a 10 byte remainder:
//!
//!   0          30 40            80                      128
//!   ┌──────────┬──┬─────────────┬────────────────────────┐
//!   │ used(30) │f │ used (40)   │ free (48)              │
//!   └──────────┴──┴─────────────┴────────────────────────┘
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   rfreelist
//!   ├── align      - Alignment macros (align!, align_to!)
//!   ├── arena      - Owned byte region and header stamping
//!   ├── block      - Header layout and the Block handle
//!   ├── config     - HeapConfig for heap-backed arenas
//!   ├── error      - AllocError
//!   ├── free_list  - Address-ordered free list (internal)
//!   ├── heap       - FreeListAllocator, HeapSnapshot
//!   ├── mmap       - MmapRegion arena storage (unix)
//!   └── policy     - SearchMode: first-fit and best-fit
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rfreelist::{FreeListAllocator, SearchMode};
//!
//! let mut heap = FreeListAllocator::new([0u8; 128], SearchMode::BestFit).unwrap();
//!
//! // Sizes include the header.
//! let block = heap.allocate(40).unwrap();
//! heap.data_mut(&block).unwrap()[0] = 42;
//! assert_eq!(heap.data(&block).unwrap()[0], 42);
//!
//! heap.deallocate(block).unwrap();
//! assert_eq!(heap.used(), 0);
//! ```
//!
//! ## How It Works
//!
//! Each allocated block starts with a one-word header holding the block's
//! total size. The caller only ever sees the data region behind it:
//!
//! ```text
//!   Single Allocation:
//!   ┌───────────────────────┬────────────────────────────────┐
//!   │    Block Header       │         User Data              │
//!   │  ┌─────────────────┐  │                                │
//!   │  │ size: N         │  │  ┌──────────────────────────┐  │
//!   │  └─────────────────┘  │  │   N - HEADER_SIZE bytes  │  │
//!   │     HEADER_SIZE       │  └──────────────────────────┘  │
//!   └───────────────────────┴────────────────────────────────┘
//!                           ▲
//!                           └── Block::offset()
//! ```
//!
//! - **allocate(n)**: the [`SearchMode`] picks a free block of at least `n`
//!   bytes. If more than a header's worth is left over, the remainder takes
//!   the block's place in the list. Otherwise the block keeps the slack.
//! - **deallocate(block)**: the header is read back, the region is linked in
//!   at its address-ordered position (appending when it lies past every free
//!   block) and merged with free neighbours on either side.
//!
//! ## Limitations
//!
//! - **Single-threaded only**: No synchronization primitives
//! - **No alignment guarantees**: Data regions are aligned only as far as
//!   the requested sizes keep them
//! - **No compaction**: Fragmentation is only undone by coalescing
//!
//! ## Safety
//!
//! The allocator itself is safe code. Free-list links are slab indices and
//! blocks are addressed by arena offsets, never by raw pointers. Only
//! [`MmapRegion`] touches `unsafe` to map and unmap its pages.

pub mod align;
mod arena;
mod block;
mod config;
mod error;
mod free_list;
mod heap;
#[cfg(unix)]
mod mmap;
mod policy;

pub use block::{Block, HEADER_SIZE, LINK_SIZE, MIN_BLOCK_SIZE};
pub use config::HeapConfig;
pub use error::AllocError;
pub use heap::{FreeBlockInfo, FreeListAllocator, HeapSnapshot};
#[cfg(unix)]
pub use mmap::MmapRegion;
pub use policy::SearchMode;
