//! Bus arbitration strategies.
//!
//! Five strategies over the same request snapshot:
//!
//! 1. **Chain polling** - linear scan from device 0; deterministic with a
//!    low-index bias.
//! 2. **Counter polling** - cyclic scan from a free-running counter; the
//!    counter moves past each winner, so grants spread over time.
//! 3. **Independent request** - numerically smallest priority wins, ties
//!    broken by scan order.
//! 4. **Round-robin** - cyclic scan starting after the previous winner.
//! 5. **Priority** - alias for independent request; kept as a distinct
//!    method name at the interface.

use crate::common::constants::NO_MASTER;
use crate::config::ArbitrationMethod;

use super::device::Device;

/// Arbiter state: the configured method and its bookkeeping.
#[derive(Debug, Clone)]
pub struct Arbiter {
    method: ArbitrationMethod,
    current_master: u8,
    last_granted: u8,
    counter: u8,
    arbitration_count: u64,
}

impl Arbiter {
    /// Creates an arbiter with no master and empty history.
    #[must_use]
    pub const fn new(method: ArbitrationMethod) -> Self {
        Self {
            method,
            current_master: NO_MASTER,
            last_granted: NO_MASTER,
            counter: 0,
            arbitration_count: 0,
        }
    }

    /// The configured arbitration method.
    #[must_use]
    pub const fn method(&self) -> ArbitrationMethod {
        self.method
    }

    /// Device currently holding the bus, [`NO_MASTER`] when idle.
    #[must_use]
    pub const fn current_master(&self) -> u8 {
        self.current_master
    }

    /// Completed arbitration rounds that produced a winner.
    #[must_use]
    pub const fn arbitration_count(&self) -> u64 {
        self.arbitration_count
    }

    /// Selects a winner among the requesting devices and records it as the
    /// current master.
    ///
    /// Returns [`NO_MASTER`] when nothing is requesting. Absence of
    /// requesters is not an error.
    pub fn arbitrate(&mut self, devices: &[Device]) -> u8 {
        let winner = match self.method {
            ArbitrationMethod::Chain => Self::select_chain(devices),
            ArbitrationMethod::CounterPolling => self.select_counter(devices),
            ArbitrationMethod::IndependentRequest | ArbitrationMethod::Priority => {
                Self::select_independent(devices)
            }
            ArbitrationMethod::RoundRobin => self.select_round_robin(devices),
        };

        match winner {
            Some(index) => {
                self.current_master = index as u8;
                self.arbitration_count += 1;
                self.current_master
            }
            None => NO_MASTER,
        }
    }

    /// Forgets the current master. Called when the master releases the bus
    /// or is removed.
    pub const fn clear_master(&mut self) {
        self.current_master = NO_MASTER;
    }

    /// Clears master, history and counters, keeping the method.
    pub const fn reset(&mut self) {
        self.current_master = NO_MASTER;
        self.last_granted = NO_MASTER;
        self.counter = 0;
        self.arbitration_count = 0;
    }

    fn select_chain(devices: &[Device]) -> Option<usize> {
        devices.iter().position(|device| device.bus_request)
    }

    fn select_counter(&mut self, devices: &[Device]) -> Option<usize> {
        let winner = Self::cyclic_scan(devices, usize::from(self.counter))?;
        self.counter = ((winner + 1) % devices.len()) as u8;
        Some(winner)
    }

    fn select_independent(devices: &[Device]) -> Option<usize> {
        devices
            .iter()
            .enumerate()
            .filter(|(_, device)| device.bus_request)
            .min_by_key(|(index, device)| (device.priority, *index))
            .map(|(index, _)| index)
    }

    fn select_round_robin(&mut self, devices: &[Device]) -> Option<usize> {
        let start = usize::from(self.last_granted.wrapping_add(1));
        let winner = Self::cyclic_scan(devices, start)?;
        self.last_granted = winner as u8;
        Some(winner)
    }

    // Walks all devices once starting at `start % len`, returning the
    // first requester.
    fn cyclic_scan(devices: &[Device], start: usize) -> Option<usize> {
        let len = devices.len();
        if len == 0 {
            return None;
        }
        (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&index| devices[index].bus_request)
    }
}
