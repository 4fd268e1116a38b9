use std::fmt;

use crate::free_list::{FreeList, NodeId};

/// Strategy used to pick the free block that satisfies a request.
///
/// ```text
///   free list:   [ 48 ] ──► [ 24 ] ──► [ 32 ]        request: 24
///
///   FirstFit ─────► [ 48 ]        first block that is large enough
///   BestFit  ────────────────► [ 24 ]   smallest leftover, scans everything
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SearchMode {
  /// First block in address order that is large enough.
  FirstFit,
  /// Block with the smallest leftover; the lowest address wins ties.
  #[default]
  BestFit,
}

impl SearchMode {
  pub(crate) fn find(
    self,
    list: &FreeList,
    size: usize,
  ) -> Option<Candidate> {
    match self {
      Self::FirstFit => first_fit(list, size),
      Self::BestFit => best_fit(list, size),
    }
  }
}

impl fmt::Display for SearchMode {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      Self::FirstFit => f.write_str("first-fit"),
      Self::BestFit => f.write_str("best-fit"),
    }
  }
}

/// A free block chosen for a request, with its list predecessor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
  pub prev: Option<NodeId>,
  pub node: NodeId,
  pub offset: usize,
  pub size: usize,
}

pub fn first_fit(
  list: &FreeList,
  size: usize,
) -> Option<Candidate> {
  list.iter().find(|entry| entry.block.size >= size).map(|entry| Candidate {
    prev: entry.prev,
    node: entry.id,
    offset: entry.block.offset,
    size: entry.block.size,
  })
}

pub fn best_fit(
  list: &FreeList,
  size: usize,
) -> Option<Candidate> {
  let mut best: Option<Candidate> = None;

  for entry in list.iter() {
    if entry.block.size < size {
      continue;
    }

    // Strictly smaller only, so the earlier (lower) address keeps ties.
    if best.is_none_or(|b| entry.block.size < b.size) {
      best = Some(Candidate {
        prev: entry.prev,
        node: entry.id,
        offset: entry.block.offset,
        size: entry.block.size,
      });

      if entry.block.size == size {
        break;
      }
    }
  }

  best
}
