//! Address-ordered free list.
//!
//! Records live in a slab and link to each other by slab index, so the list
//! never stores raw addresses. Arena offsets only appear as data in each
//! record. Slots of removed records are recycled by later insertions.

/// Slab index of a free-list record.
pub type NodeId = usize;

/// A free region of the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FreeBlock {
  /// Arena offset where the region starts.
  pub offset: usize,
  /// Total bytes of the region.
  pub size: usize,
  next: Option<NodeId>,
}

impl FreeBlock {
  /// One past the last byte of the region.
  pub fn end(&self) -> usize {
    self.offset + self.size
  }
}

/// A record visited by [`FreeList::iter`], together with its predecessor.
#[derive(Clone, Copy, Debug)]
pub struct Entry<'a> {
  pub prev: Option<NodeId>,
  pub id: NodeId,
  pub block: &'a FreeBlock,
}

#[derive(Debug, Default)]
pub struct FreeList {
  nodes: Vec<FreeBlock>,
  vacant: Vec<NodeId>,
  head: Option<NodeId>,
  len: usize,
}

impl FreeList {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn head(&self) -> Option<NodeId> {
    self.head
  }

  pub fn len(&self) -> usize {
    self.len
  }

  pub fn get(
    &self,
    id: NodeId,
  ) -> &FreeBlock {
    &self.nodes[id]
  }

  pub fn next(
    &self,
    id: NodeId,
  ) -> Option<NodeId> {
    self.nodes[id].next
  }

  /// Creates an unlinked record for `size` bytes at `offset`.
  pub fn create(
    &mut self,
    offset: usize,
    size: usize,
  ) -> NodeId {
    let block = FreeBlock {
      offset,
      size,
      next: None,
    };

    match self.vacant.pop() {
      Some(id) => {
        self.nodes[id] = block;
        id
      }
      None => {
        self.nodes.push(block);
        self.nodes.len() - 1
      }
    }
  }

  /// Links `node` right after `prev`, or at the head when `prev` is `None`.
  ///
  /// Does not search: the caller keeps the list address ordered.
  pub fn insert(
    &mut self,
    prev: Option<NodeId>,
    node: NodeId,
  ) {
    match prev {
      None => {
        self.nodes[node].next = self.head;
        self.head = Some(node);
      }
      Some(prev) => {
        self.nodes[node].next = self.nodes[prev].next;
        self.nodes[prev].next = Some(node);
      }
    }

    self.len += 1;
  }

  /// Unlinks `node`, whose immediate predecessor is `prev`, and recycles its
  /// slot.
  pub fn remove(
    &mut self,
    prev: Option<NodeId>,
    node: NodeId,
  ) {
    let next = self.nodes[node].next.take();

    match prev {
      None => self.head = next,
      Some(prev) => self.nodes[prev].next = next,
    }

    self.vacant.push(node);
    self.len -= 1;
  }

  /// Finds where a region starting at `address` belongs.
  ///
  /// Returns the first record starting above `address` and its predecessor.
  /// When every record starts below `address` the predecessor is the tail
  /// and the successor is `None`, so inserting after it appends.
  pub fn locate_insertion_point(
    &self,
    address: usize,
  ) -> (Option<NodeId>, Option<NodeId>) {
    let mut prev = None;
    let mut current = self.head;

    while let Some(id) = current {
      if self.nodes[id].offset > address {
        break;
      }
      prev = current;
      current = self.nodes[id].next;
    }

    (prev, current)
  }

  /// Merges `node` with its successor and then with `prev` when they touch.
  ///
  /// Returns the record that now covers `node`'s bytes.
  pub fn coalesce(
    &mut self,
    prev: Option<NodeId>,
    node: NodeId,
  ) -> NodeId {
    if let Some(next) = self.nodes[node].next {
      if self.nodes[node].end() == self.nodes[next].offset {
        log::trace!(
          "merge free block at {} into {}",
          self.nodes[next].offset,
          self.nodes[node].offset
        );
        self.nodes[node].size += self.nodes[next].size;
        self.remove(Some(node), next);
      }
    }

    if let Some(prev) = prev {
      if self.nodes[prev].end() == self.nodes[node].offset {
        log::trace!(
          "merge free block at {} into {}",
          self.nodes[node].offset,
          self.nodes[prev].offset
        );
        self.nodes[prev].size += self.nodes[node].size;
        self.remove(Some(prev), node);
        return prev;
      }
    }

    node
  }

  pub fn iter(&self) -> Iter<'_> {
    Iter {
      list: self,
      prev: None,
      current: self.head(),
    }
  }
}

/// Walks the list in address order.
pub struct Iter<'a> {
  list: &'a FreeList,
  prev: Option<NodeId>,
  current: Option<NodeId>,
}

impl<'a> Iterator for Iter<'a> {
  type Item = Entry<'a>;

  fn next(&mut self) -> Option<Self::Item> {
    let id = self.current?;
    let entry = Entry {
      prev: self.prev,
      id,
      block: self.list.get(id),
    };

    self.prev = Some(id);
    self.current = self.list.next(id);

    Some(entry)
  }
}
