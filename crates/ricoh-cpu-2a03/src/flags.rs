//! 6502 processor status register (P).
//!
//! Bit layout, from bit 7 down to bit 0: `N V U B D I Z C`.

use std::fmt;

/// Carry flag - set if operation resulted in carry/borrow.
pub const C: u8 = 0x01;

/// Zero flag - set if result is zero.
pub const Z: u8 = 0x02;

/// Interrupt disable - when set, IRQ interrupts are ignored.
pub const I: u8 = 0x04;

/// Decimal mode. Toggled by SED/CLD but has no effect on the 2A03 adder.
pub const D: u8 = 0x08;

/// Break flag - not a real flag, only appears when status is pushed.
/// Set when BRK/PHP push status, clear when IRQ/NMI push status.
pub const B: u8 = 0x10;

/// Unused bit - always pushed as 1.
pub const U: u8 = 0x20;

/// Overflow flag - set if signed arithmetic overflowed.
pub const V: u8 = 0x40;

/// Negative flag - set if result has bit 7 set.
pub const N: u8 = 0x80;

/// Bits a pull (PLP/RTI) takes from the stack. B and U keep their
/// in-register values.
const PULL_MASK: u8 = !(B | U);

/// Processor status register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Status(pub u8);

impl Status {
    /// Power-up status: only the unused bit set.
    #[must_use]
    pub const fn new() -> Self {
        Self(U)
    }

    /// Check if a flag is set.
    #[must_use]
    pub const fn is_set(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    /// Set a flag.
    pub fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }

    /// Clear a flag.
    pub fn clear(&mut self, flag: u8) {
        self.0 &= !flag;
    }

    /// Set or clear a flag based on condition.
    pub fn set_if(&mut self, flag: u8, condition: bool) {
        if condition {
            self.set(flag);
        } else {
            self.clear(flag);
        }
    }

    /// Clear N and Z, then set Z if `value` is zero and N if bit 7 is set.
    pub fn set_nz(&mut self, value: u8) {
        self.set_if(Z, value == 0);
        self.set_if(N, value & 0x80 != 0);
    }

    /// Byte to push: U forced to 1, B set for PHP/BRK and clear for IRQ/NMI.
    #[must_use]
    pub const fn to_push(self, brk: bool) -> u8 {
        let p = self.0 | U;
        if brk { p | B } else { p & !B }
    }

    /// Load a pulled byte (PLP/RTI). B and U are left as they are.
    pub fn pull(&mut self, value: u8) {
        self.0 = (value & PULL_MASK) | (self.0 & !PULL_MASK);
    }

    #[must_use]
    pub const fn carry(self) -> bool {
        self.is_set(C)
    }

    #[must_use]
    pub const fn zero(self) -> bool {
        self.is_set(Z)
    }

    #[must_use]
    pub const fn interrupt_disable(self) -> bool {
        self.is_set(I)
    }

    #[must_use]
    pub const fn decimal(self) -> bool {
        self.is_set(D)
    }

    #[must_use]
    pub const fn overflow(self) -> bool {
        self.is_set(V)
    }

    #[must_use]
    pub const fn negative(self) -> bool {
        self.is_set(N)
    }
}

impl fmt::Display for Status {
    /// Flags from bit 7 to bit 0, upper-case when set: `$24` is `nvUbdIzc`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const CLEAR: &[u8; 8] = b"nvubdizc";
        const SET: &[u8; 8] = b"NVUBDIZC";

        for i in 0..8 {
            let bit = 0x80 >> i;
            let letter = if self.0 & bit != 0 { SET[i] } else { CLEAR[i] };
            write!(f, "{}", char::from(letter))?;
        }
        Ok(())
    }
}
