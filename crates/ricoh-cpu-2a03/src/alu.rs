//! ALU operations for the 2A03.
//!
//! Each function takes the operands and the status register, updates the
//! flags the instruction affects and returns the result. The decimal flag is
//! never consulted: the 2A03's adder has no BCD mode.

use crate::flags::{C, N, Status, V, Z};

/// ADC: `a + value + C`.
#[must_use]
pub fn adc(p: &mut Status, a: u8, value: u8) -> u8 {
    let sum = u16::from(a) + u16::from(value) + u16::from(p.carry());
    let result = sum as u8;

    p.set_if(C, sum > 0xFF);
    p.set_if(V, (a ^ result) & (value ^ result) & 0x80 != 0);
    p.set_nz(result);
    result
}

/// SBC: `a - value - !C`, which is ADC of the complement.
#[must_use]
pub fn sbc(p: &mut Status, a: u8, value: u8) -> u8 {
    adc(p, a, !value)
}

/// CMP/CPX/CPY: flags of `reg - value`, registers untouched.
pub fn compare(p: &mut Status, reg: u8, value: u8) {
    p.set_if(C, reg >= value);
    p.set_nz(reg.wrapping_sub(value));
}

#[must_use]
pub fn asl(p: &mut Status, value: u8) -> u8 {
    let result = value << 1;
    p.set_if(C, value & 0x80 != 0);
    p.set_nz(result);
    result
}

#[must_use]
pub fn lsr(p: &mut Status, value: u8) -> u8 {
    let result = value >> 1;
    p.set_if(C, value & 0x01 != 0);
    p.set_nz(result);
    result
}

#[must_use]
pub fn rol(p: &mut Status, value: u8) -> u8 {
    let result = (value << 1) | u8::from(p.carry());
    p.set_if(C, value & 0x80 != 0);
    p.set_nz(result);
    result
}

#[must_use]
pub fn ror(p: &mut Status, value: u8) -> u8 {
    let result = (value >> 1) | (u8::from(p.carry()) << 7);
    p.set_if(C, value & 0x01 != 0);
    p.set_nz(result);
    result
}

#[must_use]
pub fn inc(p: &mut Status, value: u8) -> u8 {
    let result = value.wrapping_add(1);
    p.set_nz(result);
    result
}

#[must_use]
pub fn dec(p: &mut Status, value: u8) -> u8 {
    let result = value.wrapping_sub(1);
    p.set_nz(result);
    result
}

/// BIT: Z from `a & value`, N and V copied from bits 7 and 6 of `value`.
pub fn bit(p: &mut Status, a: u8, value: u8) {
    p.set_if(Z, a & value == 0);
    p.set_if(N, value & 0x80 != 0);
    p.set_if(V, value & 0x40 != 0);
}

/// ANC: AND, then C takes the value of N.
#[must_use]
pub fn anc(p: &mut Status, a: u8, value: u8) -> u8 {
    let result = a & value;
    p.set_nz(result);
    p.set_if(C, result & 0x80 != 0);
    result
}

/// ALR: AND, then LSR.
#[must_use]
pub fn alr(p: &mut Status, a: u8, value: u8) -> u8 {
    lsr(p, a & value)
}

/// ARR: AND, then ROR, with C and V taken from bits 6 and 5 of the result.
#[must_use]
pub fn arr(p: &mut Status, a: u8, value: u8) -> u8 {
    let result = ((a & value) >> 1) | (u8::from(p.carry()) << 7);
    p.set_nz(result);
    p.set_if(C, result & 0x40 != 0);
    p.set_if(V, ((result >> 6) ^ (result >> 5)) & 0x01 != 0);
    result
}

/// SBX: `(a & x) - value` without borrow in; C is set when nothing was
/// borrowed.
#[must_use]
pub fn sbx(p: &mut Status, a: u8, x: u8, value: u8) -> u8 {
    let and = a & x;
    let result = and.wrapping_sub(value);
    p.set_if(C, and >= value);
    p.set_nz(result);
    result
}
