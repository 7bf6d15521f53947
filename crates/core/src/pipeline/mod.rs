//! Five-stage in-order pipeline simulator.
//!
//! The pipeline executes a MIPS-like teaching subset through the classic
//! IF, ID, EX, MEM, WB stages with:
//!
//! 1. **Latch snapshots** - every stage reads the pipeline registers as
//!    they stood at the end of the previous cycle, and all replacements are
//!    committed together at the end of the cycle.
//! 2. **Load-use interlock** - a one-cycle stall that freezes PC and IF/ID
//!    and injects a bubble into ID/EX.
//! 3. **Forwarding** - EX/MEM and MEM/WB results bypass the register file
//!    into EX, newest producer first.
//! 4. **Branch accounting** - a two-bit predictor and a branch-target
//!    buffer are trained when branches resolve in EX. The teaching subset
//!    never redirects fetch, so prediction affects statistics only.
//!
//! Execution ends when the fetch address reaches a zero word (or the end of
//! instruction memory) and all four pipeline registers have drained.

pub mod control;
pub mod latches;
pub mod predictor;
pub mod stages;

use tracing::debug;

use crate::common::constants::{
    DATA_MEMORY_SIZE, INSTRUCTION_MEMORY_SIZE, MAX_RUN_CYCLES, PIPELINE_STAGES,
};
use crate::common::error::Result;
use crate::config::PipelineConfig;
use crate::units::{Alu, RegisterFile, WordMemory};

pub use control::ControlSignals;
pub use latches::{ExMem, IdEx, IfId, MemWb};
pub use predictor::{BranchPredictor, PredictorStats};

/// Cycle and instruction counters plus derived throughput metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineStats {
    /// Cycles in which the pipeline did work.
    pub total_cycles: u64,
    /// Instructions that entered decode.
    pub total_instructions: u64,
    /// Cycles lost to load-use stalls.
    pub stall_cycles: u64,
}

impl PipelineStats {
    /// Cycles per instruction.
    #[must_use]
    pub fn cpi(&self) -> f64 {
        if self.total_instructions == 0 {
            0.0
        } else {
            self.total_cycles as f64 / self.total_instructions as f64
        }
    }

    /// Instructions per cycle.
    #[must_use]
    pub fn ipc(&self) -> f64 {
        if self.total_cycles == 0 {
            0.0
        } else {
            self.total_instructions as f64 / self.total_cycles as f64
        }
    }

    /// Stage utilisation in percent: retired work against the ideal of one
    /// instruction in each of the five stages every cycle.
    #[must_use]
    pub fn efficiency(&self) -> f64 {
        if self.total_cycles == 0 {
            0.0
        } else {
            self.total_instructions as f64 / (self.total_cycles * PIPELINE_STAGES) as f64 * 100.0
        }
    }
}

/// The five-stage pipeline with its architectural state.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    pc: u32,
    instruction_memory: WordMemory,
    data_memory: WordMemory,
    registers: RegisterFile,
    alu: Alu,
    predictor: BranchPredictor,
    if_id: IfId,
    id_ex: IdEx,
    ex_mem: ExMem,
    mem_wb: MemWb,
    stats: PipelineStats,
}

impl Pipeline {
    /// Creates an empty pipeline: PC at zero, zeroed memories and
    /// registers, all latches invalid.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            pc: 0,
            instruction_memory: WordMemory::new(INSTRUCTION_MEMORY_SIZE),
            data_memory: WordMemory::new(DATA_MEMORY_SIZE),
            registers: RegisterFile::new(),
            alu: Alu,
            predictor: BranchPredictor::new(),
            if_id: IfId::default(),
            id_ex: IdEx::default(),
            ex_mem: ExMem::default(),
            mem_wb: MemWb::default(),
            stats: PipelineStats::default(),
        }
    }

    /// Loads a program at address zero. A zero word terminates execution,
    /// so programs need no explicit halt.
    ///
    /// # Errors
    ///
    /// [`crate::SimError::AddressOutOfRange`] when the program exceeds
    /// instruction memory.
    pub fn load_program(&mut self, words: &[u32]) -> Result<()> {
        self.instruction_memory.load_words(words)
    }

    /// Preloads data memory starting at address zero.
    ///
    /// # Errors
    ///
    /// [`crate::SimError::AddressOutOfRange`] when the slice exceeds data
    /// memory.
    pub fn load_data(&mut self, words: &[u32]) -> Result<()> {
        self.data_memory.load_words(words)
    }

    /// Advances the pipeline one cycle.
    ///
    /// Returns `false`, without counting a cycle, once the program has
    /// finished: fetch has reached a zero word or the end of instruction
    /// memory and all four latches have drained.
    ///
    /// # Errors
    ///
    /// Division by zero and bad data-memory addresses abort the cycle.
    pub fn clock(&mut self) -> Result<bool> {
        if self.finished() {
            return Ok(false);
        }
        self.stats.total_cycles += 1;

        let stall = control::load_use_hazard(&self.id_ex, &self.if_id);

        // WB commits first so ID sees this cycle's register write.
        stages::writeback(&self.mem_wb, &mut self.registers);
        let next_mem_wb = stages::memory(&self.ex_mem, &mut self.data_memory)?;
        let next_ex_mem = stages::execute(
            &self.id_ex,
            &self.ex_mem,
            &self.mem_wb,
            self.alu,
            &mut self.predictor,
        )?;

        if stall {
            // Front of the pipeline freezes; the load in EX moves on and a
            // bubble takes its place in ID/EX.
            self.id_ex = IdEx::default();
            self.stats.stall_cycles += 1;
            debug!(pc = self.pc, "load-use stall");
        } else {
            let next_id_ex = stages::decode(&self.if_id, &self.registers);
            if next_id_ex.valid {
                self.stats.total_instructions += 1;
            }
            self.id_ex = next_id_ex;
            self.if_id = stages::fetch(
                &mut self.pc,
                &self.instruction_memory,
                &mut self.predictor,
            );
        }

        self.ex_mem = next_ex_mem;
        self.mem_wb = next_mem_wb;

        if self.config.debug_mode {
            debug!(
                cycle = self.stats.total_cycles,
                pc = self.pc,
                if_id = self.if_id.valid,
                id_ex = self.id_ex.valid,
                ex_mem = self.ex_mem.valid,
                mem_wb = self.mem_wb.valid,
                "cycle"
            );
        }

        Ok(true)
    }

    /// Runs until the program finishes or `max_cycles` cycles have
    /// elapsed; zero means the default cap of [`MAX_RUN_CYCLES`].
    ///
    /// # Returns
    ///
    /// The number of cycles executed by this call.
    ///
    /// # Errors
    ///
    /// Propagates the first cycle error.
    pub fn run(&mut self, max_cycles: u64) -> Result<u64> {
        let budget = if max_cycles == 0 {
            MAX_RUN_CYCLES
        } else {
            max_cycles
        };

        let mut executed = 0;
        while executed < budget && self.clock()? {
            executed += 1;
        }
        Ok(executed)
    }

    fn finished(&self) -> bool {
        let drained = !self.if_id.valid
            && !self.id_ex.valid
            && !self.ex_mem.valid
            && !self.mem_wb.valid;
        drained
            && self
                .instruction_memory
                .read_word(self.pc)
                .map_or(true, |word| word == 0)
    }

    /// Current fetch address.
    #[must_use]
    pub const fn pc(&self) -> u32 {
        self.pc
    }

    /// Reads architectural register `index` (masked to 5 bits).
    #[must_use]
    pub const fn register(&self, index: usize) -> u32 {
        self.registers.get(index)
    }

    /// Snapshot of all 32 registers.
    #[must_use]
    pub const fn registers(&self) -> [u32; 32] {
        self.registers.dump()
    }

    /// Reads a word of data memory.
    ///
    /// # Errors
    ///
    /// Misaligned or out-of-range addresses.
    pub fn data_word(&self, addr: u32) -> Result<u32> {
        self.data_memory.read_word(addr)
    }

    /// Cycle, instruction and stall counters.
    #[must_use]
    pub const fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    /// Branch-prediction counters.
    #[must_use]
    pub const fn predictor_stats(&self) -> &PredictorStats {
        self.predictor.stats()
    }

    /// Returns execution to the reset state: PC zero, registers and
    /// latches cleared, predictor and statistics reset. Loaded program and
    /// data memory contents are kept.
    pub fn reset(&mut self) {
        self.pc = 0;
        self.registers.reset();
        self.predictor.reset();
        self.if_id = IfId::default();
        self.id_ex = IdEx::default();
        self.ex_mem = ExMem::default();
        self.mem_wb = MemWb::default();
        self.stats = PipelineStats::default();
    }
}
