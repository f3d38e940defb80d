#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::policy::lru::LruCache;

// Fuzz arbitrary operation sequences on LruCache
//
// First byte picks the capacity; each following pair is (op, key). After
// every operation the cache must satisfy its index/list/capacity invariants.
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, rest)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap_byte % 32) + 1;
    let mut cache: LruCache<u8, u32> = LruCache::new(capacity);

    for (step, pair) in rest.chunks_exact(2).enumerate() {
        let op = pair[0] % 8;
        let key = pair[1];
        let value = step as u32;

        match op {
            0 | 1 => {
                // put
                let was_present = cache.contains(&key);
                let old_len = cache.len();
                let previous = cache.put(key, value);

                assert_eq!(previous.is_some(), was_present);
                assert_eq!(cache.recency_rank(&key), Some(0));
                if was_present || old_len < capacity {
                    assert_eq!(cache.len(), old_len + usize::from(!was_present));
                } else {
                    assert_eq!(cache.len(), capacity);
                }
            }
            2 | 3 => {
                // get
                let before: Vec<u8> = cache.keys().copied().collect();
                match cache.get(&key) {
                    Some(_) => assert_eq!(cache.recency_rank(&key), Some(0)),
                    None => assert_eq!(cache.keys().copied().collect::<Vec<_>>(), before),
                }
            }
            4 => {
                // peek
                let lru_before = cache.peek_lru().map(|(k, _)| *k);
                let _ = cache.peek(&key);
                assert_eq!(cache.peek_lru().map(|(k, _)| *k), lru_before);
            }
            5 => {
                // remove
                let was_present = cache.contains(&key);
                assert_eq!(cache.remove(&key).is_some(), was_present);
                assert!(!cache.contains(&key));
            }
            6 => {
                // pop_lru
                let expected = cache.peek_lru().map(|(k, v)| (*k, *v));
                assert_eq!(cache.pop_lru(), expected);
            }
            _ => {
                // touch
                let was_present = cache.contains(&key);
                assert_eq!(cache.touch(&key), was_present);
            }
        }

        assert!(cache.len() <= capacity);
        cache.check_invariants().unwrap();
    }
});
