use super::super::CredentialPool;
use std::sync::Arc;

fn create_test_pool(n: usize) -> CredentialPool {
    CredentialPool::from_secrets((1..=n).map(|i| format!("k{i}")))
}

#[test]
fn test_new_pool_is_empty() {
    let pool = CredentialPool::new();
    assert!(pool.is_empty());
    assert!(!pool.is_ready());
    assert_eq!(pool.acquire(), None);
}

#[test]
fn test_acquire_ties_break_by_insertion_order() {
    let pool = create_test_pool(2);

    assert_eq!(pool.acquire().as_deref(), Some("k1"));
    assert_eq!(pool.acquire().as_deref(), Some("k2"));
    assert_eq!(pool.acquire().as_deref(), Some("k1"));

    let usage = pool.usage_snapshot();
    assert_eq!(usage[0].requests, 2);
    assert_eq!(usage[1].requests, 1);
    assert!(usage.iter().all(|u| u.last_used.is_some()));
}

#[test]
fn test_sequential_acquires_stay_balanced() {
    let pool = create_test_pool(4);

    for _ in 0..23 {
        assert!(pool.acquire().is_some());
        let counts: Vec<u64> = pool.usage_snapshot().iter().map(|u| u.requests).collect();
        let max = counts.iter().max().copied().unwrap_or_default();
        let min = counts.iter().min().copied().unwrap_or_default();
        assert!(max - min <= 1, "unbalanced counts: {counts:?}");
    }
}

#[test]
fn test_retire_is_permanent() {
    let pool = create_test_pool(3);
    assert!(pool.retire("k2"));
    assert_eq!(pool.len(), 2);
    assert!(!pool.contains("k2"));

    for _ in 0..10 {
        assert_ne!(pool.acquire().as_deref(), Some("k2"));
    }
}

#[test]
fn test_retire_absent_is_noop() {
    let pool = create_test_pool(2);
    assert!(pool.retire("k1"));
    assert!(!pool.retire("k1"));
    assert!(!pool.retire("unknown"));
    assert_eq!(pool.len(), 1);
}

#[test]
fn test_retire_last_key_makes_pool_not_ready() {
    let pool = create_test_pool(1);
    assert!(pool.is_ready());
    pool.retire("k1");
    assert!(!pool.is_ready());
    assert_eq!(pool.acquire(), None);
}

#[test]
fn test_insert_rejects_duplicates() {
    let pool = CredentialPool::from_secrets(["k1", "k1", "k2"]);
    assert_eq!(pool.len(), 2);
    assert!(!pool.insert("k2"));
    assert!(pool.insert("k3"));
}

#[test]
fn test_snapshot_hides_secrets() {
    let secret = "gsk_abcdefghijklmnopqrstuvwxyz0123456789ABCD";
    let pool = CredentialPool::from_secrets([secret]);
    let usage = pool.usage_snapshot();
    assert_eq!(usage[0].preview, "gsk_abcd...");
    assert!(!usage[0].preview.contains("xyz"));
}

#[test]
fn test_concurrent_acquires_are_spread() {
    let pool = Arc::new(create_test_pool(4));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let pool = Arc::clone(&pool);
            std::thread::spawn(move || {
                for _ in 0..50 {
                    pool.acquire();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    let counts: Vec<u64> = pool.usage_snapshot().iter().map(|u| u.requests).collect();
    assert_eq!(counts.iter().sum::<u64>(), 400);
    assert!(counts.iter().all(|&c| c == 100), "counts: {counts:?}");
}
