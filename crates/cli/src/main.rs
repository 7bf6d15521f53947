//! Architecture-lab simulator CLI.
//!
//! One entry point for the four subsystem simulators. Each subcommand
//! builds a simulator from the configuration (JSON file or defaults),
//! drives it with a small canned workload and prints the statistics the
//! lab exercises ask for:
//! 1. **cache** - address sweep with a configurable stride.
//! 2. **vm** - cyclic page-reference string through TLB and page table.
//! 3. **pipeline** - a short hazard-and-forwarding demonstration program.
//! 4. **bus** - arbitration rounds over four competing devices.

use clap::{Parser, Subcommand};
use std::{fs, process};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use archlab_core::bus::DeviceType;
use archlab_core::common::error::Result;
use archlab_core::{Bus, Cache, Config, Pipeline, VirtualMemory};

#[derive(Parser, Debug)]
#[command(
    name = "archlab",
    version,
    about = "Teaching simulators for a 32-bit RISC machine",
    long_about = "Simulate the cache, virtual memory, pipeline and bus of a \
                  hypothetical 32-bit RISC machine.\n\nExamples:\n  \
                  archlab cache --bytes 8192 --stride 4\n  \
                  archlab vm --pages 12 --accesses 100\n  \
                  archlab pipeline\n  \
                  archlab bus --rounds 8"
)]
struct Cli {
    /// JSON configuration file; defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sweep addresses through the cache and report hit rates.
    Cache {
        /// Bytes of address space to sweep.
        #[arg(long, default_value_t = 8192)]
        bytes: u32,

        /// Stride between accesses, in bytes.
        #[arg(long, default_value_t = 4)]
        stride: u32,

        /// Number of passes over the region.
        #[arg(long, default_value_t = 2)]
        passes: u32,
    },

    /// Run a page-reference string through the TLB and page table.
    Vm {
        /// Distinct virtual pages in the reference string.
        #[arg(long, default_value_t = 12)]
        pages: u32,

        /// Total page accesses.
        #[arg(long, default_value_t = 100)]
        accesses: u32,
    },

    /// Execute the built-in hazard demonstration program.
    Pipeline,

    /// Drive arbitration rounds over four competing devices.
    Bus {
        /// Arbitration rounds to run.
        #[arg(long, default_value_t = 8)]
        rounds: u32,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            process::exit(1);
        }
    };

    let outcome = match cli.command {
        Commands::Cache {
            bytes,
            stride,
            passes,
        } => cmd_cache(&config, bytes, stride, passes),
        Commands::Vm { pages, accesses } => cmd_vm(&config, pages, accesses),
        Commands::Pipeline => cmd_pipeline(&config),
        Commands::Bus { rounds } => cmd_bus(&config, rounds),
    };

    if let Err(error) = outcome {
        eprintln!("error: {error}");
        process::exit(1);
    }
}

/// Reads the JSON configuration file, falling back to defaults.
fn load_config(path: Option<&str>) -> std::result::Result<Config, String> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
    serde_json::from_str(&text).map_err(|e| format!("{path}: {e}"))
}

fn cmd_cache(config: &Config, bytes: u32, stride: u32, passes: u32) -> Result<()> {
    let mut cache = Cache::new(config.cache.clone())?;
    let stride = stride.max(1);
    debug!(bytes, stride, passes, "cache sweep");

    let mut buf = [0u8; 4];
    for _ in 0..passes {
        let mut addr = 0;
        while addr < bytes {
            let _ = cache.read(addr, &mut buf)?;
            addr += stride;
        }
    }

    let stats = cache.stats();
    println!(
        "Cache: {:?} mapping, {} bytes",
        cache.mapping(),
        config.cache.size
    );
    println!("  accesses: {}", stats.total_accesses);
    println!("  hits:     {} ({:.2}%)", stats.hits, stats.hit_rate() * 100.0);
    println!(
        "  misses:   {} ({:.2}%)",
        stats.misses,
        stats.miss_rate() * 100.0
    );
    Ok(())
}

fn cmd_vm(config: &Config, pages: u32, accesses: u32) -> Result<()> {
    let mut vm = VirtualMemory::new(config.vm.clone())?;
    debug!(pages, accesses, "page reference string");

    for i in 0..accesses {
        let page = i % pages.max(1);
        let _ = vm.translate_force((page << 12).into())?;
    }

    let stats = vm.stats();
    println!(
        "Virtual memory: {:?} replacement, {} frames",
        config.vm.replacement, config.vm.total_frames
    );
    println!("  accesses:     {}", stats.total_accesses);
    println!(
        "  TLB hits:     {} ({:.2}%)",
        stats.tlb_hits,
        stats.tlb_hit_rate() * 100.0
    );
    println!(
        "  page faults:  {} ({:.2}%)",
        stats.page_faults,
        stats.page_fault_rate() * 100.0
    );
    println!("  replacements: {}", stats.page_replacements);
    println!("  avg access:   {:.1} ns", vm.average_access_time_ns());
    Ok(())
}

fn cmd_pipeline(config: &Config) -> Result<()> {
    let mut pipeline = Pipeline::new(config.pipeline.clone());

    // lw r1,0(r0); add r2,r1,r1; lw r3,4(r0); add r3,r2,r2
    pipeline.load_program(&[0x8C01_0000, 0x0021_1020, 0x8C03_0004, 0x0042_1820])?;
    pipeline.load_data(&[100, 200])?;
    debug!("hazard demonstration program loaded");
    let cycles = pipeline.run(0)?;

    let stats = pipeline.stats();
    println!(
        "Pipeline: {cycles} cycles, {} instructions",
        stats.total_instructions
    );
    println!("  stalls:     {}", stats.stall_cycles);
    println!("  CPI:        {:.2}", stats.cpi());
    println!("  efficiency: {:.1}%", stats.efficiency());
    println!(
        "  r1 = {}, r2 = {}, r3 = {}",
        pipeline.register(1),
        pipeline.register(2),
        pipeline.register(3)
    );
    Ok(())
}

fn cmd_bus(config: &Config, rounds: u32) -> Result<()> {
    let mut bus = Bus::new(config.bus.clone())?;
    let cpu = bus.add_device(DeviceType::Cpu, 0, "cpu")?;
    let dma = bus.add_device(DeviceType::Dma, 1, "dma")?;
    let disk = bus.add_device(DeviceType::Io, 2, "disk")?;
    let nic = bus.add_device(DeviceType::Io, 3, "nic")?;
    debug!(rounds, ?config.bus.arbitration, "contention rounds");

    for round in 0..rounds {
        for id in [cpu, dma, disk, nic] {
            bus.request(id)?;
        }
        let winner = bus.arbitrate();
        let cycles = bus.write(winner, round * 64, 64)?;
        println!(
            "round {round}: device {winner} ({}) held the bus for {cycles} cycles",
            bus.device(winner)?.name
        );
        for id in [cpu, dma, disk, nic] {
            bus.release(id)?;
        }
    }

    let stats = bus.stats();
    println!(
        "Bus: {:?} arbitration, {:.0} MB/s peak",
        config.bus.arbitration,
        bus.bandwidth_mb_per_s()
    );
    println!("  transfers:   {}", stats.total_transfers);
    println!("  bytes:       {}", stats.bytes_transferred);
    println!("  utilisation: {:.1}%", stats.utilisation());
    Ok(())
}
