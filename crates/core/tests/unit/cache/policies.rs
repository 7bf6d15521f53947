//! # Replacement Policy Tests
//!
//! Victim selection exercised through a two-way cache so the policies see
//! realistic line metadata, plus a scripted mock policy for forcing
//! evictions onto a chosen way.

use archlab_core::cache::policies::RandomPolicy;
use archlab_core::cache::Cache;
use archlab_core::config::{CacheConfig, CacheMapping, CacheReplacement, WritePolicy};

use crate::common::mocks::policy::MockPolicy;

// 1 KiB, 32 B lines, 2 ways: 16 sets, so addresses 0x200 apart share a set.
fn two_way(replacement: CacheReplacement) -> CacheConfig {
    CacheConfig {
        size: 1024,
        line_size: 32,
        associativity: 2,
        mapping: CacheMapping::SetAssociative,
        replacement,
        write_policy: WritePolicy::WriteThrough,
    }
}

fn touch(cache: &mut Cache, address: u32) {
    let mut buf = [0u8; 4];
    cache.read(address, &mut buf).unwrap();
}

#[test]
fn lru_evicts_least_recently_used_way() {
    let mut cache = Cache::new(two_way(CacheReplacement::Lru)).unwrap();
    touch(&mut cache, 0x0);
    touch(&mut cache, 0x200);
    touch(&mut cache, 0x0); // refresh 0x0
    touch(&mut cache, 0x400);

    assert!(cache.contains(0x0));
    assert!(!cache.contains(0x200));
    assert!(cache.contains(0x400));
}

#[test]
fn fifo_ignores_hits_when_picking_a_victim() {
    let mut cache = Cache::new(two_way(CacheReplacement::Fifo)).unwrap();
    touch(&mut cache, 0x0);
    touch(&mut cache, 0x200);
    touch(&mut cache, 0x0); // hit does not refresh the load time
    touch(&mut cache, 0x400);

    assert!(!cache.contains(0x0));
    assert!(cache.contains(0x200));
    assert!(cache.contains(0x400));
}

#[test]
fn lfu_evicts_least_frequently_used_way() {
    let mut cache = Cache::new(two_way(CacheReplacement::Lfu)).unwrap();
    touch(&mut cache, 0x0);
    touch(&mut cache, 0x0);
    touch(&mut cache, 0x0);
    touch(&mut cache, 0x200);
    touch(&mut cache, 0x400);

    assert!(cache.contains(0x0));
    assert!(!cache.contains(0x200));
}

#[test]
fn seeded_random_policies_agree() {
    let build = || {
        Cache::with_policy(
            two_way(CacheReplacement::Random),
            Box::new(RandomPolicy::with_seed(42)),
        )
        .unwrap()
    };
    let mut first = build();
    let mut second = build();

    for addr in [0x0, 0x200, 0x400, 0x600, 0x0, 0x400] {
        touch(&mut first, addr);
        touch(&mut second, addr);
    }

    for addr in [0x0, 0x200, 0x400, 0x600] {
        assert_eq!(first.contains(addr), second.contains(addr));
    }
}

#[test]
fn scripted_policy_controls_the_victim_way() {
    let mut mock = MockPolicy::new();
    mock.expect_select_victim().returning(|_| 1);

    let mut cache = Cache::with_policy(two_way(CacheReplacement::Lru), Box::new(mock)).unwrap();
    touch(&mut cache, 0x0); // way 0
    touch(&mut cache, 0x200); // way 1
    touch(&mut cache, 0x400); // evicts way 1 per the script

    assert!(cache.contains(0x0));
    assert!(!cache.contains(0x200));
    assert!(cache.contains(0x400));
}
