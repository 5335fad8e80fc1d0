//! Benchmarks comparing the containers against their std equivalents.
//!
//! Run with: cargo bench
//!
//! Grow-from-empty and preallocated variants are measured separately so
//! the growth policy's cost is visible.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use stowage::{Array, LinkedList, PriorityQueue, Queue, Stack};

const COUNT: usize = 10_000;

// ============================================================================
// Array push (preallocated)
// ============================================================================

fn bench_array_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("array_push");
    group.throughput(Throughput::Elements(COUNT as u64));

    // Pre-allocate ONCE, reuse via clear()
    let mut array = Array::<u64>::with_capacity(COUNT);
    let mut vec = Vec::<u64>::with_capacity(COUNT);

    group.bench_function("stowage", |b| {
        b.iter(|| {
            for i in 0..COUNT as u64 {
                array.push(black_box(i));
            }
            array.clear();
        });
    });

    group.bench_function("std-vec", |b| {
        b.iter(|| {
            for i in 0..COUNT as u64 {
                vec.push(black_box(i));
            }
            vec.clear();
        });
    });

    group.finish();
}

// ============================================================================
// Array push (grow from empty)
// ============================================================================

fn bench_array_push_growing(c: &mut Criterion) {
    let mut group = c.benchmark_group("array_push_growing");
    group.throughput(Throughput::Elements(COUNT as u64));

    group.bench_function("stowage", |b| {
        b.iter(|| {
            let mut array = Array::new();
            for i in 0..COUNT as u64 {
                array.push(black_box(i));
            }
            array
        });
    });

    group.bench_function("std-vec", |b| {
        b.iter(|| {
            let mut vec = Vec::new();
            for i in 0..COUNT as u64 {
                vec.push(black_box(i));
            }
            vec
        });
    });

    group.finish();
}

// ============================================================================
// Queue churn (steady-state ring reuse)
// ============================================================================

fn bench_queue_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_churn");

    const CYCLES: usize = 100_000;
    group.throughput(Throughput::Elements(CYCLES as u64 * 2)); // enqueue + dequeue

    // Half-full rings so front chases rear through the buffer
    let mut queue = Queue::<u64>::with_capacity(1024);
    for i in 0..512 {
        queue.enqueue(i);
    }
    let mut deque = std::collections::VecDeque::<u64>::with_capacity(1024);
    for i in 0..512 {
        deque.push_back(i);
    }

    group.bench_function("stowage", |b| {
        b.iter(|| {
            for i in 0..CYCLES as u64 {
                queue.enqueue(i);
                black_box(queue.dequeue().ok());
            }
        });
    });

    group.bench_function("std-vecdeque", |b| {
        b.iter(|| {
            for i in 0..CYCLES as u64 {
                deque.push_back(i);
                black_box(deque.pop_front());
            }
        });
    });

    group.finish();
}

// ============================================================================
// Stack push/pop cycle
// ============================================================================

fn bench_stack_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack_cycle");

    const CYCLES: usize = 100_000;
    group.throughput(Throughput::Elements(CYCLES as u64 * 2)); // push + pop

    let mut stack = Stack::<u64>::with_capacity(16);
    let mut vec = Vec::<u64>::with_capacity(16);

    group.bench_function("stowage", |b| {
        b.iter(|| {
            for i in 0..CYCLES as u64 {
                stack.push(i);
                black_box(stack.pop().ok());
            }
        });
    });

    group.bench_function("std-vec", |b| {
        b.iter(|| {
            for i in 0..CYCLES as u64 {
                vec.push(i);
                black_box(vec.pop());
            }
        });
    });

    group.finish();
}

// ============================================================================
// Heap fill + drain
// ============================================================================

fn bench_heap_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("heap_drain");
    group.throughput(Throughput::Elements(COUNT as u64 * 2)); // push + pop

    // Pseudo-random spread (deterministic) so the sift paths do real work
    let values: Vec<u64> = (0..COUNT as u64).map(|i| (i * 7919) % 10_007).collect();

    group.bench_function("stowage", |b| {
        b.iter(|| {
            let mut heap = PriorityQueue::with_capacity(COUNT);
            for &v in &values {
                heap.push(v);
            }
            while let Ok(v) = heap.pop() {
                black_box(v);
            }
        });
    });

    group.bench_function("std-binaryheap", |b| {
        b.iter(|| {
            let mut heap = std::collections::BinaryHeap::with_capacity(COUNT);
            for &v in &values {
                heap.push(v);
            }
            while let Some(v) = heap.pop() {
                black_box(v);
            }
        });
    });

    group.finish();
}

// ============================================================================
// Heapify vs repeated push
// ============================================================================

fn bench_heapify(c: &mut Criterion) {
    let mut group = c.benchmark_group("heapify");
    group.throughput(Throughput::Elements(COUNT as u64));

    let values: Vec<u64> = (0..COUNT as u64).map(|i| (i * 7919) % 10_007).collect();

    group.bench_function("collect", |b| {
        b.iter(|| {
            let heap: PriorityQueue<u64> = values.iter().copied().collect();
            black_box(heap.len())
        });
    });

    group.bench_function("push-loop", |b| {
        b.iter(|| {
            let mut heap = PriorityQueue::with_capacity(COUNT);
            for &v in &values {
                heap.push(v);
            }
            black_box(heap.len())
        });
    });

    group.finish();
}

// ============================================================================
// List end operations
// ============================================================================

fn bench_list_ends(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_ends");

    const CYCLES: usize = 10_000;
    group.throughput(Throughput::Elements(CYCLES as u64 * 2)); // push + pop

    group.bench_function("stowage", |b| {
        b.iter(|| {
            let mut list = LinkedList::new();
            for i in 0..CYCLES as u64 {
                list.push_back(i);
            }
            while let Some(v) = list.pop_front() {
                black_box(v);
            }
        });
    });

    group.bench_function("std-linkedlist", |b| {
        b.iter(|| {
            let mut list = std::collections::LinkedList::new();
            for i in 0..CYCLES as u64 {
                list.push_back(i);
            }
            while let Some(v) = list.pop_front() {
                black_box(v);
            }
        });
    });

    group.finish();
}

// ============================================================================
// List detach/reinsert (allocation-free node recycling)
// ============================================================================

fn bench_list_detach_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_detach_cycle");

    const CYCLES: usize = 100_000;
    group.throughput(Throughput::Elements(CYCLES as u64));

    let mut list: LinkedList<u64> = (0..64).collect();

    group.bench_function("detach-reattach", |b| {
        b.iter(|| {
            for _ in 0..CYCLES {
                let node = list.front_node().unwrap();
                // Safety: the handle was just produced by this list
                let detached = unsafe { list.detach(node) };
                black_box(list.push_back_node(detached));
            }
        });
    });

    group.bench_function("pop-repush", |b| {
        b.iter(|| {
            for _ in 0..CYCLES {
                let value = list.pop_front().unwrap();
                black_box(list.push_back(value));
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_array_push,
    bench_array_push_growing,
    bench_queue_churn,
    bench_stack_cycle,
    bench_heap_drain,
    bench_heapify,
    bench_list_ends,
    bench_list_detach_cycle,
);

criterion_main!(benches);
