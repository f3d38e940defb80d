//! DHAT heap profiler for lrukit.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::cell::Cell;
use std::rc::Rc;

use lrukit::events::{EventEmitter, ListenerHandle};
use lrukit::policy::lru::LruCache;

const CAPACITY: usize = 4096;

/// A hot window of half the capacity slides forward by an eighth per round,
/// so every round promotes most residents and evicts the keys left behind.
fn sliding_window(cache: &mut LruCache<u64, String>, rounds: usize) {
    let window = (cache.capacity() / 2) as u64;
    let step = (cache.capacity() / 8).max(1) as u64;

    for round in 0..rounds as u64 {
        let start = round * step;
        for key in start..start + window {
            if cache.get(&key).is_none() {
                cache.put(key, key.to_string());
            }
        }
    }
}

/// Cycles through twice the capacity in order. Every access misses under
/// LRU, so this is pure insert-and-evict churn through the arena free list.
fn oversized_scan(cache: &mut LruCache<u64, String>, passes: usize) {
    let span = (cache.capacity() * 2) as u64;
    for _ in 0..passes {
        for key in 0..span {
            if cache.get(&key).is_none() {
                cache.put(key, key.to_string());
            }
        }
    }
}

/// Drains a quarter of the cache from the LRU end, then refills with fresh
/// keys so freed slots are reused rather than grown.
fn drain_and_refill(cache: &mut LruCache<u64, String>, rounds: usize) {
    let batch = cache.capacity() / 4;
    let mut next_key = u64::MAX / 2;

    for _ in 0..rounds {
        for _ in 0..batch {
            cache.pop_lru();
        }
        for _ in 0..batch {
            cache.put(next_key, next_key.to_string());
            next_key += 1;
        }
    }
}

fn profile_lru() {
    println!("=== Profiling LRU ===");
    let mut cache = LruCache::new(CAPACITY);

    sliding_window(&mut cache, 64);
    oversized_scan(&mut cache, 4);
    drain_and_refill(&mut cache, 32);

    println!("  Final size: {}", cache.len());
    println!("  Approx bytes: {}", cache.approx_bytes());
}

/// Registration churn: persistent listeners plus a steady stream of one-shots.
fn profile_emitter() {
    println!("=== Profiling EventEmitter ===");
    let events = ["connect", "data", "drain", "close"];
    let rounds = 20_000;

    let emitter = EventEmitter::<u64>::new();
    let total = Rc::new(Cell::new(0u64));

    let persistent: Vec<ListenerHandle<u64>> = events
        .iter()
        .map(|event| {
            let sink = Rc::clone(&total);
            emitter.on_fn(*event, move |n| sink.set(sink.get().wrapping_add(*n)))
        })
        .collect();

    for round in 0..rounds {
        let event = events[round % events.len()];
        let sink = Rc::clone(&total);
        emitter.once_fn(event, move |n| sink.set(sink.get().wrapping_add(*n)));
        let _ = emitter.emit(event, &(round as u64));
    }

    for (event, handle) in events.iter().zip(&persistent) {
        emitter.off(event, handle);
    }

    println!("  Checksum: {}", total.get());
    println!("  Registered events: {}", emitter.event_names().len());
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("lrukit DHAT Heap Profiling");
    println!("==========================\n");

    profile_lru();
    profile_emitter();

    println!("\n==========================");
    println!("Profiling complete. Results written to dhat-heap.json");
}
