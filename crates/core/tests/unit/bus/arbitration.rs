//! # Arbitration Tests
//!
//! The five strategies over a four-device bus, including the fairness and
//! bias scenarios from the lab handouts.

use archlab_core::common::constants::NO_MASTER;
use archlab_core::config::{ArbitrationMethod, BusConfig};
use archlab_core::bus::{Bus, DeviceType};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn four_device_bus(arbitration: ArbitrationMethod) -> Bus {
    let mut bus = Bus::new(BusConfig {
        arbitration,
        ..BusConfig::default()
    })
    .unwrap();
    for (priority, name) in [(2, "cpu"), (0, "dma"), (1, "disk"), (2, "nic")] {
        bus.add_device(DeviceType::Io, priority, name).unwrap();
    }
    bus
}

fn request_all(bus: &mut Bus) {
    for id in 0..4 {
        bus.request(id).unwrap();
    }
}

#[test]
fn no_requesters_yields_no_master() {
    let mut bus = four_device_bus(ArbitrationMethod::Chain);
    assert_eq!(bus.arbitrate(), NO_MASTER);
    assert_eq!(bus.current_master(), NO_MASTER);
    assert_eq!(bus.arbitration_count(), 0);
}

#[test]
fn chain_polling_favours_low_indices() {
    let mut bus = four_device_bus(ArbitrationMethod::Chain);

    // Devices 2 and 3 requesting: device 2 wins every round.
    for _ in 0..4 {
        bus.request(2).unwrap();
        bus.request(3).unwrap();
        assert_eq!(bus.arbitrate(), 2);
        bus.release(2).unwrap();
        bus.release(3).unwrap();
    }
}

#[test]
fn round_robin_cycles_through_all_requesters() {
    let mut bus = four_device_bus(ArbitrationMethod::RoundRobin);

    // Seed the history: grant device 3 first.
    bus.request(3).unwrap();
    assert_eq!(bus.arbitrate(), 3);
    bus.release(3).unwrap();

    // All requesting every round: grants wrap 0, 1, 2, 3, 0.
    for expected in [0, 1, 2, 3, 0] {
        request_all(&mut bus);
        let winner = bus.arbitrate();
        assert_eq!(winner, expected);
        for id in 0..4 {
            bus.release(id).unwrap();
        }
    }
}

#[test]
fn counter_polling_moves_past_each_winner() {
    let mut bus = four_device_bus(ArbitrationMethod::CounterPolling);

    request_all(&mut bus);
    assert_eq!(bus.arbitrate(), 0);
    for id in 0..4 {
        bus.release(id).unwrap();
    }

    // The counter now points past device 0.
    request_all(&mut bus);
    assert_eq!(bus.arbitrate(), 1);
}

#[rstest]
#[case::independent(ArbitrationMethod::IndependentRequest)]
#[case::priority(ArbitrationMethod::Priority)]
fn priority_methods_pick_the_smallest_rank(#[case] method: ArbitrationMethod) {
    let mut bus = four_device_bus(method);
    request_all(&mut bus);
    // Device 1 carries priority 0.
    assert_eq!(bus.arbitrate(), 1);
}

#[rstest]
#[case::independent(ArbitrationMethod::IndependentRequest)]
#[case::priority(ArbitrationMethod::Priority)]
fn priority_ties_break_by_scan_order(#[case] method: ArbitrationMethod) {
    let mut bus = four_device_bus(method);
    // Devices 0 and 3 share priority 2.
    bus.request(0).unwrap();
    bus.request(3).unwrap();
    assert_eq!(bus.arbitrate(), 0);
}

#[test]
fn winner_was_requesting_and_becomes_master() {
    let mut bus = four_device_bus(ArbitrationMethod::RoundRobin);
    bus.request(2).unwrap();

    let winner = bus.arbitrate();
    assert_eq!(winner, 2);
    assert_eq!(bus.current_master(), winner);

    let device = bus.device(winner).unwrap();
    assert!(device.bus_request);
    assert!(device.bus_grant);
}

#[test]
fn held_bus_is_not_rearbitrated() {
    let mut bus = four_device_bus(ArbitrationMethod::Chain);
    bus.request(1).unwrap();
    assert_eq!(bus.arbitrate(), 1);

    // A lower-index requester cannot steal the held bus.
    bus.request(0).unwrap();
    assert_eq!(bus.arbitrate(), 1);

    bus.release(1).unwrap();
    assert_eq!(bus.arbitrate(), 0);
}

#[test]
fn release_by_the_master_frees_the_bus() {
    let mut bus = four_device_bus(ArbitrationMethod::Chain);
    bus.request(0).unwrap();
    assert_eq!(bus.arbitrate(), 0);

    bus.release(0).unwrap();
    assert_eq!(bus.current_master(), NO_MASTER);
    assert_eq!(bus.arbitrate(), NO_MASTER);
}
