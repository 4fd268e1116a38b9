use std::{io, ptr, slice};

use libc::{MAP_ANONYMOUS, MAP_FAILED, MAP_PRIVATE, PROT_READ, PROT_WRITE, _SC_PAGESIZE, c_void};

use crate::align_to;

/// An anonymous, private memory mapping reserved straight from the kernel.
///
/// Lets an allocator manage a region that never passes through the global
/// allocator. The length is rounded up to whole pages and the pages start
/// out zeroed. The mapping is released on drop.
///
/// ```text
///   mmap(NULL, len, PROT_READ | PROT_WRITE, MAP_PRIVATE | MAP_ANONYMOUS)
///
///   ┌────────────┬────────────┬────────────┐
///   │   page 0   │   page 1   │   page 2   │ ← len rounded to page size
///   └────────────┴────────────┴────────────┘
///   ▲
///   └── base
/// ```
pub struct MmapRegion {
  base: *mut u8,
  len: usize,
}

impl MmapRegion {
  /// Maps at least `len` bytes.
  pub fn new(len: usize) -> io::Result<Self> {
    if len == 0 {
      return Err(io::Error::new(io::ErrorKind::InvalidInput, "cannot map an empty region"));
    }

    let page = page_size();
    let len = align_to!(len, page);

    let address = unsafe {
      libc::mmap(
        ptr::null_mut(),
        len,
        PROT_READ | PROT_WRITE,
        MAP_PRIVATE | MAP_ANONYMOUS,
        -1,
        0,
      )
    };

    if address == MAP_FAILED {
      return Err(io::Error::last_os_error());
    }

    log::trace!("mapped {} bytes at {:?}", len, address);

    Ok(Self {
      base: address as *mut u8,
      len,
    })
  }

  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }
}

impl AsRef<[u8]> for MmapRegion {
  fn as_ref(&self) -> &[u8] {
    // The mapping stays valid and readable for `len` bytes until drop.
    unsafe { slice::from_raw_parts(self.base, self.len) }
  }
}

impl AsMut<[u8]> for MmapRegion {
  fn as_mut(&mut self) -> &mut [u8] {
    unsafe { slice::from_raw_parts_mut(self.base, self.len) }
  }
}

impl Drop for MmapRegion {
  fn drop(&mut self) {
    let rc = unsafe { libc::munmap(self.base as *mut c_void, self.len) };

    if rc != 0 {
      log::warn!("munmap of {} bytes at {:?} failed: {}", self.len, self.base, io::Error::last_os_error());
    }
  }
}

fn page_size() -> usize {
  let size = unsafe { libc::sysconf(_SC_PAGESIZE) };

  if size <= 0 { 4096 } else { size as usize }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_length_rounds_to_page() {
    let region = MmapRegion::new(100).unwrap();

    assert_eq!(region.len() % page_size(), 0);
    assert!(region.len() >= 100);
  }

  #[test]
  fn test_pages_are_zeroed_and_writable() {
    let mut region = MmapRegion::new(64).unwrap();

    assert!(region.as_ref().iter().all(|&b| b == 0));

    region.as_mut()[10] = 0x5A;
    assert_eq!(region.as_ref()[10], 0x5A);
  }

  #[test]
  fn test_empty_region_rejected() {
    let err = MmapRegion::new(0).err().unwrap();

    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
  }
}
