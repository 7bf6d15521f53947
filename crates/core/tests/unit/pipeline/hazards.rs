//! # Hazard and Forwarding Tests
//!
//! Load-use interlock behaviour and the two forwarding paths, observed
//! through whole-program runs.

use archlab_core::config::PipelineConfig;
use archlab_core::Pipeline;
use pretty_assertions::assert_eq;

use crate::common::asm;

fn run(program: &[u32], data: &[u32]) -> Pipeline {
    let mut pipeline = Pipeline::new(PipelineConfig::default());
    pipeline.load_program(program).unwrap();
    pipeline.load_data(data).unwrap();
    pipeline.run(0).unwrap();
    pipeline
}

#[test]
fn independent_instructions_never_stall() {
    let program = [
        asm::addi(1, 0, 1),
        asm::addi(2, 0, 2),
        asm::addi(3, 0, 3),
    ];
    let pipeline = run(&program, &[]);

    assert_eq!(pipeline.stats().stall_cycles, 0);
    assert_eq!(pipeline.stats().total_cycles, 3 + 4);
    assert_eq!(pipeline.register(1), 1);
    assert_eq!(pipeline.register(2), 2);
    assert_eq!(pipeline.register(3), 3);
}

#[test]
fn load_use_costs_exactly_one_cycle() {
    let program = [asm::lw(1, 0, 0), asm::add(2, 1, 1)];
    let pipeline = run(&program, &[21]);

    assert_eq!(pipeline.stats().stall_cycles, 1);
    // n + stages - 1, plus the stall.
    assert_eq!(pipeline.stats().total_cycles, 2 + 4 + 1);
    assert_eq!(pipeline.register(2), 42);
}

#[test]
fn load_followed_by_unrelated_use_does_not_stall() {
    let program = [asm::lw(1, 0, 0), asm::add(2, 3, 3)];
    let pipeline = run(&program, &[21]);
    assert_eq!(pipeline.stats().stall_cycles, 0);
}

#[test]
fn ex_to_ex_forwarding_feeds_the_next_instruction() {
    let program = [asm::addi(1, 0, 5), asm::add(2, 1, 1)];
    let pipeline = run(&program, &[]);

    assert_eq!(pipeline.stats().stall_cycles, 0);
    assert_eq!(pipeline.register(2), 10);
}

#[test]
fn mem_to_ex_forwarding_bridges_a_one_instruction_gap() {
    let program = [
        asm::addi(1, 0, 5),
        asm::addi(4, 0, 1),
        asm::add(2, 1, 1),
    ];
    let pipeline = run(&program, &[]);
    assert_eq!(pipeline.register(2), 10);
}

#[test]
fn loaded_value_forwards_after_the_stall() {
    let program = [asm::lw(1, 4, 0), asm::add(2, 1, 1)];
    let pipeline = run(&program, &[7, 9]);
    assert_eq!(pipeline.register(1), 9);
    assert_eq!(pipeline.register(2), 18);
}

#[test]
fn writeback_reaches_decode_in_the_same_cycle() {
    // Three instructions apart: the value travels through the register
    // file, not the forwarding network.
    let program = [
        asm::addi(1, 0, 6),
        asm::addi(4, 0, 0),
        asm::addi(5, 0, 0),
        asm::add(2, 1, 1),
    ];
    let pipeline = run(&program, &[]);
    assert_eq!(pipeline.register(2), 12);
}

#[test]
fn register_zero_ignores_writes() {
    let program = [asm::addi(0, 0, 7), asm::add(1, 0, 0)];
    let pipeline = run(&program, &[]);
    assert_eq!(pipeline.register(0), 0);
    assert_eq!(pipeline.register(1), 0);
}

#[test]
fn store_after_load_writes_memory() {
    // Store data is read from the register file in ID, so the load's
    // value must have retired before the store decodes.
    let program = [
        asm::lw(1, 0, 0),
        asm::addi(2, 0, 8),
        asm::addi(3, 0, 0),
        asm::sw(1, 8, 0),
    ];
    let pipeline = run(&program, &[33, 0, 0]);
    assert_eq!(pipeline.data_word(8).unwrap(), 33);
}
