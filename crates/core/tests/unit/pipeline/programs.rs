//! # Whole-Program Tests
//!
//! End-to-end runs: the load-use demonstration program, termination
//! semantics and the derived throughput metrics.

use archlab_core::config::PipelineConfig;
use archlab_core::Pipeline;
use pretty_assertions::assert_eq;

use crate::common::asm;

fn fresh() -> Pipeline {
    Pipeline::new(PipelineConfig::default())
}

/// The classic load-use demonstration: a load feeding the next
/// instruction, then an independent load whose result chain doubles again.
fn hazard_demo() -> [u32; 4] {
    [
        asm::lw(1, 0, 0),   // r1 = 100
        asm::add(2, 1, 1),  // r2 = 200, stalls one cycle on r1
        asm::lw(3, 4, 0),   // r3 = 200
        asm::add(3, 2, 2),  // r3 = 400
    ]
}

#[test]
fn hazard_demo_runs_in_nine_cycles() {
    let mut pipeline = fresh();
    pipeline.load_program(&hazard_demo()).unwrap();
    pipeline.load_data(&[100, 200]).unwrap();
    let cycles = pipeline.run(0).unwrap();

    assert_eq!(pipeline.register(1), 100);
    assert_eq!(pipeline.register(3), 400);
    // Ideal fill-and-drain is n + stages - 1 = 8; the stall adds one.
    assert_eq!(cycles, 9);
    assert_eq!(pipeline.stats().stall_cycles, 1);
    assert_eq!(pipeline.stats().total_instructions, 4);
}

#[test]
fn clock_returns_false_only_when_drained() {
    let mut pipeline = fresh();
    pipeline.load_program(&[asm::addi(1, 0, 1)]).unwrap();

    // 1 instruction takes 5 cycles to retire.
    for _ in 0..5 {
        assert!(pipeline.clock().unwrap());
    }
    assert!(!pipeline.clock().unwrap());
    // The refused cycle is not counted.
    assert_eq!(pipeline.stats().total_cycles, 5);
    assert_eq!(pipeline.register(1), 1);
}

#[test]
fn empty_program_never_starts() {
    let mut pipeline = fresh();
    assert_eq!(pipeline.run(0).unwrap(), 0);
    assert_eq!(pipeline.stats().total_cycles, 0);
}

#[test]
fn run_honours_the_cycle_budget() {
    let mut pipeline = fresh();
    pipeline.load_program(&hazard_demo()).unwrap();
    pipeline.load_data(&[100, 200]).unwrap();

    assert_eq!(pipeline.run(3).unwrap(), 3);
    assert_eq!(pipeline.run(0).unwrap(), 6);
}

#[test]
fn metrics_follow_the_counters() {
    let mut pipeline = fresh();
    pipeline.load_program(&hazard_demo()).unwrap();
    pipeline.load_data(&[100, 200]).unwrap();
    pipeline.run(0).unwrap();

    let stats = pipeline.stats();
    let cpi = stats.cpi();
    assert!((cpi - 9.0 / 4.0).abs() < 1e-9);
    assert!((stats.ipc() - 4.0 / 9.0).abs() < 1e-9);
    // 4 instructions over 9 cycles of 5 stages.
    assert!((stats.efficiency() - 4.0 / 45.0 * 100.0).abs() < 1e-9);
}

#[test]
fn reset_keeps_the_loaded_program() {
    let mut pipeline = fresh();
    pipeline.load_program(&hazard_demo()).unwrap();
    pipeline.load_data(&[100, 200]).unwrap();
    pipeline.run(0).unwrap();

    pipeline.reset();
    assert_eq!(pipeline.pc(), 0);
    assert_eq!(pipeline.register(3), 0);
    assert_eq!(pipeline.stats().total_cycles, 0);

    pipeline.run(0).unwrap();
    assert_eq!(pipeline.register(3), 400);
}

#[test]
fn arithmetic_program_computes_through_the_alu() {
    let mut pipeline = fresh();
    let program = [
        asm::addi(1, 0, 6),
        asm::addi(2, 0, 7),
        asm::addi(5, 0, 0),
        asm::sub(3, 2, 1),  // r3 = 1
        asm::or(4, 1, 2),   // r4 = 7
        asm::and(5, 1, 2),  // r5 = 6
    ];
    pipeline.load_program(&program).unwrap();
    pipeline.run(0).unwrap();

    assert_eq!(pipeline.register(3), 1);
    assert_eq!(pipeline.register(4), 7);
    assert_eq!(pipeline.register(5), 6);
}
