//! # Configuration Tests
//!
//! Defaults, JSON deserialization (including the accepted aliases) and the
//! validation rules for each subsystem section.

use archlab_core::config::{
    ArbitrationMethod, BusConfig, CacheConfig, CacheMapping, CacheReplacement, PageReplacement,
    VmConfig, WritePolicy,
};
use archlab_core::Config;
use rstest::rstest;

#[test]
fn default_config_validates() {
    let config = Config::default();
    config.cache.validate().unwrap();
    config.vm.validate().unwrap();
    config.bus.validate().unwrap();
}

#[test]
fn empty_json_yields_defaults() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config.cache.size, 1024);
    assert_eq!(config.vm.total_frames, 64);
    assert_eq!(config.bus.arbitration, ArbitrationMethod::RoundRobin);
}

#[test]
fn kebab_case_and_alias_names_accepted() {
    let cache: CacheConfig = serde_json::from_str(
        r#"{ "mapping": "direct", "replacement": "LRU", "write_policy": "write-back" }"#,
    )
    .unwrap();
    assert_eq!(cache.mapping, CacheMapping::DirectMapped);
    assert_eq!(cache.replacement, CacheReplacement::Lru);
    assert_eq!(cache.write_policy, WritePolicy::WriteBack);

    let vm: VmConfig = serde_json::from_str(r#"{ "replacement": "opt" }"#).unwrap();
    assert_eq!(vm.replacement, PageReplacement::Opt);
}

#[test]
fn auto_mapping_follows_associativity() {
    let direct = CacheConfig {
        associativity: 1,
        ..CacheConfig::default()
    };
    assert_eq!(direct.effective_mapping(), CacheMapping::DirectMapped);

    let set_assoc = CacheConfig {
        associativity: 4,
        ..CacheConfig::default()
    };
    assert_eq!(set_assoc.effective_mapping(), CacheMapping::SetAssociative);
}

#[rstest]
#[case::size_not_power_of_two(1000, 32, 1)]
#[case::line_not_power_of_two(1024, 48, 1)]
#[case::line_too_small(1024, 8, 1)]
#[case::line_too_large(4096, 512, 1)]
#[case::associativity_too_high(1024, 32, 16)]
#[case::associativity_not_power_of_two(1024, 32, 3)]
#[case::size_smaller_than_line(16, 32, 1)]
fn invalid_cache_geometry_rejected(#[case] size: u32, #[case] line_size: u32, #[case] ways: u32) {
    let config = CacheConfig {
        size,
        line_size,
        associativity: ways,
        ..CacheConfig::default()
    };
    assert!(config.validate().is_err());
}

#[rstest]
#[case::zero(0)]
#[case::above_max(257)]
fn invalid_frame_counts_rejected(#[case] frames: u32) {
    let config = VmConfig {
        total_frames: frames,
        ..VmConfig::default()
    };
    assert!(config.validate().is_err());
}

#[rstest]
#[case::ragged_data_width(12, 100, 4)]
#[case::zero_clock(32, 0, 4)]
#[case::zero_devices(32, 100, 0)]
#[case::too_many_devices(32, 100, 17)]
fn invalid_bus_configs_rejected(#[case] data_width: u32, #[case] clock: u32, #[case] devices: usize) {
    let config = BusConfig {
        data_width,
        clock_mhz: clock,
        max_devices: devices,
        ..BusConfig::default()
    };
    assert!(config.validate().is_err());
}
