use lrukit::policy::lru::LruCache;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut cache: LruCache<u32, String> = LruCache::new(2);

    cache.put(1, "alpha".to_string());
    cache.put(2, "beta".to_string());

    if let Some(value) = cache.get(&1) {
        println!("hit 1: {}", value);
    }

    cache.put(3, "gamma".to_string());

    println!("contains 2? {}", cache.contains(&2));
    println!("mru -> lru: {:?}", cache.keys().collect::<Vec<_>>());
}

// Expected output:
// hit 1: alpha
// contains 2? false
// mru -> lru: [3, 1]
//
// Explanation: capacity=2; after get(&1), key 1 is MRU and key 2 is LRU.
// Inserting key 3 evicts key 2, so contains(2) is false.
// Run with RUST_LOG=lrukit=trace to see the eviction event.
