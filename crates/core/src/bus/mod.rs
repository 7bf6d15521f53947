//! System-bus simulator with multi-device arbitration.
//!
//! A bus owns up to 16 registered [`Device`]s and an [`Arbiter`]. Callers
//! drive it in rounds: raise requests, call [`Bus::arbitrate`], let the
//! winner transfer, release. The arbiter observes the request snapshot as
//! it stands at the call; requests raised mid-round are seen next round.
//!
//! Transfers are not modelled at the data level. A transfer occupies the
//! bus for a fixed number of cycles (four synchronous, six asynchronous)
//! and moves the byte and cycle counters the performance metrics are
//! computed from.

pub mod arbiter;
pub mod device;

use tracing::{debug, trace};

use crate::common::constants::NO_MASTER;
use crate::common::constants::{ASYNC_TRANSFER_CYCLES, SYNC_TRANSFER_CYCLES};
use crate::common::error::{Result, SimError};
use crate::config::{BusConfig, BusMode};

pub use arbiter::Arbiter;
pub use device::{Device, DeviceState, DeviceType};

/// Traffic and occupancy counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusStats {
    /// Completed transfers.
    pub total_transfers: u64,
    /// Bytes moved by completed transfers.
    pub bytes_transferred: u64,
    /// Cycles the bus spent occupied by transfers.
    pub busy_cycles: u64,
    /// All bus cycles, including arbitration rounds.
    pub total_cycles: u64,
}

impl BusStats {
    /// Fraction of bus cycles spent transferring, in percent.
    #[must_use]
    pub fn utilisation(&self) -> f64 {
        if self.total_cycles == 0 {
            0.0
        } else {
            self.busy_cycles as f64 / self.total_cycles as f64 * 100.0
        }
    }
}

/// A shared bus: registered devices, an arbiter and traffic counters.
#[derive(Debug, Clone)]
pub struct Bus {
    config: BusConfig,
    devices: Vec<Device>,
    arbiter: Arbiter,
    stats: BusStats,
}

impl Bus {
    /// Creates an empty bus from a validated configuration.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidParam`] when the configuration is rejected.
    pub fn new(config: BusConfig) -> Result<Self> {
        config.validate()?;
        let arbiter = Arbiter::new(config.arbitration);
        Ok(Self {
            config,
            devices: Vec::new(),
            arbiter,
            stats: BusStats::default(),
        })
    }

    /// Registers a device and returns its id.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidParam`] when the bus already carries
    /// `max_devices` devices.
    pub fn add_device(
        &mut self,
        device_type: DeviceType,
        priority: u8,
        name: impl Into<String>,
    ) -> Result<u8> {
        if self.devices.len() >= self.config.max_devices {
            return Err(SimError::InvalidParam(format!(
                "bus is full ({} devices)",
                self.config.max_devices
            )));
        }

        let id = self.devices.len() as u8;
        let device = Device::new(id, device_type, priority, name);
        debug!(id, ?device_type, priority, name = %device.name, "device added");
        self.devices.push(device);
        Ok(id)
    }

    /// Unregisters a device. Remaining devices are renumbered to keep ids
    /// equal to their scan position.
    ///
    /// # Errors
    ///
    /// [`SimError::NoDevice`] for an unknown id.
    pub fn remove_device(&mut self, device_id: u8) -> Result<()> {
        if usize::from(device_id) >= self.devices.len() {
            return Err(SimError::NoDevice(device_id));
        }
        if self.arbiter.current_master() == device_id {
            self.arbiter.clear_master();
        }
        let removed = self.devices.remove(usize::from(device_id));
        debug!(id = device_id, name = %removed.name, "device removed");
        for (index, device) in self.devices.iter_mut().enumerate() {
            device.id = index as u8;
        }
        Ok(())
    }

    /// Raises a device's request line.
    ///
    /// # Errors
    ///
    /// [`SimError::NoDevice`] for an unknown id.
    pub fn request(&mut self, device_id: u8) -> Result<()> {
        let now = self.stats.total_cycles;
        let device = self.device_mut(device_id)?;
        device.bus_request = true;
        device.state = DeviceState::Requesting;
        device.request_time = now;
        trace!(id = device_id, "bus requested");
        Ok(())
    }

    /// Drops a device's request and grant lines, freeing the bus when the
    /// device was its master.
    ///
    /// # Errors
    ///
    /// [`SimError::NoDevice`] for an unknown id.
    pub fn release(&mut self, device_id: u8) -> Result<()> {
        let device = self.device_mut(device_id)?;
        device.clear_lines();
        if self.arbiter.current_master() == device_id {
            self.arbiter.clear_master();
        }
        trace!(id = device_id, "bus released");
        Ok(())
    }

    /// Runs one arbitration round and grants the bus to the winner.
    ///
    /// Costs one bus cycle. Returns the winner's id, the incumbent
    /// master's id while the bus is held, or [`NO_MASTER`] when nothing is
    /// requesting. No requesters is not an error.
    pub fn arbitrate(&mut self) -> u8 {
        self.stats.total_cycles += 1;

        // A held bus is not re-arbitrated.
        if self.arbiter.current_master() != NO_MASTER {
            return self.arbiter.current_master();
        }

        let winner = self.arbiter.arbitrate(&self.devices);
        if winner != NO_MASTER {
            let now = self.stats.total_cycles;
            let device = &mut self.devices[usize::from(winner)];
            device.bus_grant = true;
            device.grant_time = now;
            device.state = DeviceState::UsingBus;
            debug!(id = winner, "bus granted");
        }
        winner
    }

    /// Performs a read transfer of `size` bytes by the granted device.
    ///
    /// # Errors
    ///
    /// See [`Self::write`].
    pub fn read(&mut self, device_id: u8, address: u32, size: u32) -> Result<u64> {
        self.transfer(device_id, address, size, false)
    }

    /// Performs a write transfer of `size` bytes by the granted device.
    ///
    /// # Errors
    ///
    /// [`SimError::NoDevice`] for an unknown id;
    /// [`SimError::DeviceBusy`] when another device holds the bus;
    /// [`SimError::ArbitrationFailed`] when the caller has not been
    /// granted the bus; [`SimError::AddressOutOfRange`] when the address
    /// does not fit the configured address width.
    pub fn write(&mut self, device_id: u8, address: u32, size: u32) -> Result<u64> {
        self.transfer(device_id, address, size, true)
    }

    fn transfer(&mut self, device_id: u8, address: u32, size: u32, is_write: bool) -> Result<u64> {
        if usize::from(device_id) >= self.devices.len() {
            return Err(SimError::NoDevice(device_id));
        }
        let master = self.arbiter.current_master();
        if master != NO_MASTER && master != device_id {
            return Err(SimError::DeviceBusy(device_id));
        }
        if master != device_id || !self.devices[usize::from(device_id)].bus_grant {
            return Err(SimError::ArbitrationFailed(device_id));
        }
        if self.config.addr_width < 32 && address >> self.config.addr_width != 0 {
            return Err(SimError::AddressOutOfRange(address));
        }

        let cycles = match self.config.mode {
            BusMode::Synchronous => SYNC_TRANSFER_CYCLES,
            BusMode::Asynchronous => ASYNC_TRANSFER_CYCLES,
        };

        self.stats.total_transfers += 1;
        self.stats.bytes_transferred += u64::from(size);
        self.stats.busy_cycles += cycles;
        self.stats.total_cycles += cycles;
        self.devices[usize::from(device_id)].operation_count += 1;

        trace!(id = device_id, address, size, is_write, cycles, "transfer");
        Ok(cycles)
    }

    /// Theoretical peak bandwidth in megabytes per second: bus width times
    /// clock frequency.
    #[must_use]
    pub fn bandwidth_mb_per_s(&self) -> f64 {
        f64::from(self.config.data_width / 8) * f64::from(self.config.clock_mhz)
    }

    /// Traffic counters.
    #[must_use]
    pub const fn stats(&self) -> &BusStats {
        &self.stats
    }

    /// Completed arbitration rounds that produced a winner.
    #[must_use]
    pub const fn arbitration_count(&self) -> u64 {
        self.arbiter.arbitration_count()
    }

    /// Device currently holding the bus, [`NO_MASTER`] when idle.
    #[must_use]
    pub const fn current_master(&self) -> u8 {
        self.arbiter.current_master()
    }

    /// Registered devices in scan order.
    #[must_use]
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Looks up a device by id.
    ///
    /// # Errors
    ///
    /// [`SimError::NoDevice`] for an unknown id.
    pub fn device(&self, device_id: u8) -> Result<&Device> {
        self.devices
            .get(usize::from(device_id))
            .ok_or(SimError::NoDevice(device_id))
    }

    /// Bus configuration.
    #[must_use]
    pub const fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Drops every request and grant, forgets the master and zeroes all
    /// counters. Registered devices stay.
    pub fn reset(&mut self) {
        for device in &mut self.devices {
            device.clear_lines();
            device.request_time = 0;
            device.grant_time = 0;
            device.operation_count = 0;
        }
        self.arbiter.reset();
        self.stats = BusStats::default();
        debug!("bus reset");
    }

    fn device_mut(&mut self, device_id: u8) -> Result<&mut Device> {
        self.devices
            .get_mut(usize::from(device_id))
            .ok_or(SimError::NoDevice(device_id))
    }
}
