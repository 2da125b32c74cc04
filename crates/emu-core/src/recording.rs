//! Bus wrapper that records every access.
//!
//! Cycle-accurate CPU tests compare the exact sequence of bus cycles an
//! instruction produces, dummy reads and writes included.

use std::fmt;

use crate::Bus;

/// Direction of a bus cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

impl AccessKind {
    /// Lower-case name as used by test corpora ("read" / "write").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

/// One observed bus cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusCycle {
    pub address: u16,
    pub value: u8,
    pub kind: AccessKind,
}

impl BusCycle {
    #[must_use]
    pub const fn read(address: u16, value: u8) -> Self {
        Self {
            address,
            value,
            kind: AccessKind::Read,
        }
    }

    #[must_use]
    pub const fn write(address: u16, value: u8) -> Self {
        Self {
            address,
            value,
            kind: AccessKind::Write,
        }
    }
}

impl fmt::Display for BusCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<5} ${:04X} = ${:02X}",
            self.kind.as_str(),
            self.address,
            self.value
        )
    }
}

/// Wraps a bus and logs every read and write passing through it.
///
/// `peek` is forwarded but not recorded: it is not a bus cycle.
pub struct RecordingBus<B> {
    inner: B,
    cycles: Vec<BusCycle>,
}

impl<B: Bus> RecordingBus<B> {
    #[must_use]
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            cycles: Vec::new(),
        }
    }

    /// Accesses recorded since creation or the last `clear`.
    #[must_use]
    pub fn cycles(&self) -> &[BusCycle] {
        &self.cycles
    }

    /// Forget recorded accesses.
    pub fn clear(&mut self) {
        self.cycles.clear();
    }

    /// The wrapped bus.
    #[must_use]
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// The wrapped bus, mutably. Accesses made through it are not recorded.
    pub fn inner_mut(&mut self) -> &mut B {
        &mut self.inner
    }

    #[must_use]
    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: Bus> Bus for RecordingBus<B> {
    fn read(&mut self, address: u16) -> u8 {
        let value = self.inner.read(address);
        self.cycles.push(BusCycle::read(address, value));
        value
    }

    fn write(&mut self, address: u16, value: u8) {
        self.inner.write(address, value);
        self.cycles.push(BusCycle::write(address, value));
    }

    fn peek(&self, address: u16) -> u8 {
        self.inner.peek(address)
    }
}
