use rfreelist::{AllocError, Block, FreeListAllocator, HEADER_SIZE, HeapConfig, SearchMode};

/// A small record stored inside an allocated block.
struct Foo {
  a: i32,
  b: i32,
}

impl Foo {
  const SIZE: usize = 2 * std::mem::size_of::<i32>();

  fn write(
    &self,
    bytes: &mut [u8],
  ) {
    bytes[..4].copy_from_slice(&self.a.to_ne_bytes());
    bytes[4..8].copy_from_slice(&self.b.to_ne_bytes());
  }

  fn read(bytes: &[u8]) -> Self {
    let mut word = [0u8; 4];

    word.copy_from_slice(&bytes[..4]);
    let a = i32::from_ne_bytes(word);
    word.copy_from_slice(&bytes[4..8]);
    let b = i32::from_ne_bytes(word);

    Self { a, b }
  }
}

/// Prints the free list and the used counter after each step.
fn print_heap(
  label: &str,
  heap: &FreeListAllocator<Box<[u8]>>,
) {
  println!("[{}]\n{}\n", label, heap.inspect());
}

fn allocate(
  heap: &mut FreeListAllocator<Box<[u8]>>,
  label: &str,
  size: usize,
) -> Result<Block, AllocError> {
  let block = heap.allocate(size)?;
  print_heap(&format!("{label}: allocate({size}) -> {block}"), heap);
  Ok(block)
}

fn deallocate(
  heap: &mut FreeListAllocator<Box<[u8]>>,
  label: &str,
  block: Block,
) -> Result<(), AllocError> {
  let name = format!("{label}: deallocate({block})");
  heap.deallocate(block)?;
  print_heap(&name, heap);
  Ok(())
}

fn records(mode: SearchMode) -> Result<(), AllocError> {
  println!("==== two records, {mode} ====\n");

  let mut heap = HeapConfig::default().with_search_mode(mode).build()?;
  print_heap("start", &heap);

  let size = (Foo::SIZE + HEADER_SIZE).max(rfreelist::MIN_BLOCK_SIZE);
  let a = allocate(&mut heap, "a", size)?;
  let b = allocate(&mut heap, "b", size)?;

  Foo { a: 1, b: 12 }.write(heap.data_mut(&a)?);
  Foo { a: 2, b: 22 }.write(heap.data_mut(&b)?);

  let foo_a = Foo::read(heap.data(&a)?);
  let foo_b = Foo::read(heap.data(&b)?);
  println!("foo[a]: a={} b={}", foo_a.a, foo_a.b);
  println!("foo[b]: a={} b={}\n", foo_b.a, foo_b.b);

  deallocate(&mut heap, "b", b)?;
  deallocate(&mut heap, "a", a)?;

  Ok(())
}

fn hole_reuse(mode: SearchMode) -> Result<(), AllocError> {
  println!("==== hole reuse, {mode} ====\n");

  let mut heap = HeapConfig::default().with_search_mode(mode).build()?;

  let first = allocate(&mut heap, "first", 40)?;
  let second = allocate(&mut heap, "second", 40)?;
  deallocate(&mut heap, "first", first)?;
  let third = allocate(&mut heap, "third", 30)?;

  match heap.allocate(100) {
    Err(err) => println!("allocate(100) failed as expected: {err}\n"),
    Ok(block) => println!("allocate(100) unexpectedly succeeded: {block}\n"),
  }

  deallocate(&mut heap, "third", third)?;
  deallocate(&mut heap, "second", second)?;

  Ok(())
}

fn main() -> Result<(), AllocError> {
  records(SearchMode::BestFit)?;

  for mode in [SearchMode::FirstFit, SearchMode::BestFit] {
    hole_reuse(mode)?;
  }

  Ok(())
}
