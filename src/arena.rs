use crate::block::HEADER_SIZE;

/// A fixed-size byte region owned by one allocator.
///
/// Any storage that exposes a byte slice works: `Vec<u8>`, `Box<[u8]>`,
/// `[u8; N]`, a borrowed `&mut [u8]` or an [`MmapRegion`](crate::MmapRegion).
/// The region is never resized or moved while the arena holds it.
pub struct Arena<S> {
  storage: S,
}

impl<S> Arena<S>
where
  S: AsRef<[u8]> + AsMut<[u8]>,
{
  pub fn new(storage: S) -> Self {
    Self { storage }
  }

  pub fn capacity(&self) -> usize {
    self.storage.as_ref().len()
  }

  pub fn into_inner(self) -> S {
    self.storage
  }

  /// Reads the size word stamped at `start`.
  pub fn read_header(
    &self,
    start: usize,
  ) -> usize {
    let mut word = [0u8; HEADER_SIZE];
    word.copy_from_slice(&self.storage.as_ref()[start..start + HEADER_SIZE]);
    usize::from_ne_bytes(word)
  }

  /// Stamps `size` into the header word at `start`.
  pub fn write_header(
    &mut self,
    start: usize,
    size: usize,
  ) {
    self.storage.as_mut()[start..start + HEADER_SIZE].copy_from_slice(&size.to_ne_bytes());
  }

  /// Data region of the block that starts at `start` and spans `size` bytes.
  pub fn data(
    &self,
    start: usize,
    size: usize,
  ) -> &[u8] {
    &self.storage.as_ref()[start + HEADER_SIZE..start + size]
  }

  pub fn data_mut(
    &mut self,
    start: usize,
    size: usize,
  ) -> &mut [u8] {
    &mut self.storage.as_mut()[start + HEADER_SIZE..start + size]
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_header_round_trip() {
    let mut arena = Arena::new(vec![0u8; 64]);

    arena.write_header(16, 40);

    assert_eq!(arena.read_header(16), 40);
    assert_eq!(arena.read_header(0), 0);
  }

  #[test]
  fn test_data_excludes_header() {
    let mut arena = Arena::new([0u8; 64]);

    arena.write_header(0, 24);
    arena.data_mut(0, 24).fill(0xAB);

    assert_eq!(arena.data(0, 24).len(), 24 - HEADER_SIZE);
    assert_eq!(arena.read_header(0), 24);
    assert_eq!(arena.into_inner()[24], 0);
  }

  #[test]
  fn test_borrowed_storage() {
    let mut bytes = [0u8; 32];

    {
      let mut arena = Arena::new(&mut bytes[..]);
      assert_eq!(arena.capacity(), 32);
      arena.write_header(8, 16);
    }

    assert_eq!(usize::from_ne_bytes(bytes[8..8 + HEADER_SIZE].try_into().unwrap()), 16);
  }
}
