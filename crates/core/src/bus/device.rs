//! Bus-attached devices.

use serde::{Deserialize, Serialize};

/// Kind of device attached to the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceType {
    /// A processor.
    Cpu,
    /// A memory module.
    Memory,
    /// A DMA engine.
    Dma,
    /// A peripheral controller.
    Io,
}

/// Lifecycle state of a device on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceState {
    /// Not using and not requesting the bus.
    #[default]
    Idle,
    /// Request raised, grant not yet received.
    Requesting,
    /// Current bus master.
    UsingBus,
    /// Granted but not yet transferring.
    Waiting,
    /// A transfer on this device failed.
    Error,
}

/// A device registered on the bus.
///
/// `priority` is numeric rank for the priority-style arbiters: lower values
/// win. Priorities need not be unique; ties fall back to scan order.
#[derive(Debug, Clone)]
pub struct Device {
    /// Index of the device on its bus.
    pub id: u8,
    /// Kind of device.
    pub device_type: DeviceType,
    /// Lifecycle state.
    pub state: DeviceState,
    /// Arbitration rank, lower wins.
    pub priority: u8,
    /// Request line raised.
    pub bus_request: bool,
    /// Grant line raised by the arbiter.
    pub bus_grant: bool,
    /// Bus cycle the current request was raised.
    pub request_time: u64,
    /// Bus cycle the current grant was issued.
    pub grant_time: u64,
    /// Completed transfers.
    pub operation_count: u64,
    /// Human-readable label.
    pub name: String,
}

impl Device {
    /// Creates an idle device.
    #[must_use]
    pub fn new(id: u8, device_type: DeviceType, priority: u8, name: impl Into<String>) -> Self {
        Self {
            id,
            device_type,
            state: DeviceState::Idle,
            priority,
            bus_request: false,
            bus_grant: false,
            request_time: 0,
            grant_time: 0,
            operation_count: 0,
            name: name.into(),
        }
    }

    /// Drops request and grant lines and returns the device to idle,
    /// keeping its operation count.
    pub fn clear_lines(&mut self) {
        self.bus_request = false;
        self.bus_grant = false;
        self.state = DeviceState::Idle;
    }
}
