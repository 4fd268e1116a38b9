use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rfreelist::{Block, FreeListAllocator, MIN_BLOCK_SIZE, SearchMode};

const ARENA_SIZE: usize = 64 * 1024;

/// Deterministic request sizes between MIN_BLOCK_SIZE and 256 bytes.
fn sizes(count: usize) -> Vec<usize> {
  let mut state = 0x2545_f491_u64;

  (0..count)
    .map(|_| {
      state ^= state << 13;
      state ^= state >> 7;
      state ^= state << 17;
      MIN_BLOCK_SIZE + (state % (256 - MIN_BLOCK_SIZE as u64)) as usize
    })
    .collect()
}

/// Fills the arena, then frees every other block so later requests have to
/// search a fragmented list.
fn fragmented(mode: SearchMode) -> (FreeListAllocator<Vec<u8>>, Vec<Block>) {
  let mut heap = FreeListAllocator::new(vec![0u8; ARENA_SIZE], mode).unwrap();
  let mut blocks = Vec::new();

  for size in sizes(1024) {
    let Ok(block) = heap.allocate(size) else { break };
    blocks.push(block);
  }

  let mut kept = Vec::new();
  for (i, block) in blocks.into_iter().enumerate() {
    if i % 2 == 0 {
      heap.deallocate(block).unwrap();
    } else {
      kept.push(block);
    }
  }

  (heap, kept)
}

/// Allocate-then-free of one block on a fragmented heap
fn bench_single_allocate(c: &mut Criterion) {
  let mut group = c.benchmark_group("single_allocate");

  for mode in [SearchMode::FirstFit, SearchMode::BestFit] {
    for size in [MIN_BLOCK_SIZE, 64, 200] {
      group.bench_with_input(BenchmarkId::new(mode.to_string(), size), &size, |b, &size| {
        let (mut heap, _kept) = fragmented(mode);

        b.iter(|| {
          let block = heap.allocate(black_box(size)).unwrap();
          heap.deallocate(block).unwrap();
        });
      });
    }
  }

  group.finish();
}

/// Mixed allocate/deallocate churn
fn bench_churn(c: &mut Criterion) {
  let mut group = c.benchmark_group("churn");
  let requests = sizes(512);

  for mode in [SearchMode::FirstFit, SearchMode::BestFit] {
    group.bench_function(mode.to_string(), |b| {
      b.iter(|| {
        let mut heap = FreeListAllocator::new(vec![0u8; ARENA_SIZE], mode).unwrap();
        let mut live: Vec<Block> = Vec::new();

        for (i, &size) in requests.iter().enumerate() {
          if let Ok(block) = heap.allocate(size) {
            live.push(block);
          }
          if i % 3 == 2 && !live.is_empty() {
            let block = live.swap_remove(i % live.len());
            heap.deallocate(block).unwrap();
          }
        }

        black_box(heap.inspect().len())
      });
    });
  }

  group.finish();
}

criterion_group!(benches, bench_single_allocate, bench_churn);
criterion_main!(benches);
