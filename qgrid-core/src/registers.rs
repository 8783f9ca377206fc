//! Classical bit registers
//!
//! Registers are named, ordered bit arrays used as measurement
//! destinations and as the source of classical conditions. Bit 0 is the
//! least significant bit of the register value.

use crate::{QuantumError, Result};
use std::collections::BTreeMap;

/// A set of named classical registers
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassicalRegisters {
    registers: BTreeMap<String, Vec<bool>>,
}

impl ClassicalRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or recreate) a register of `len` zero bits
    pub fn create(&mut self, name: impl Into<String>, len: usize) {
        self.registers.insert(name.into(), vec![false; len]);
    }

    /// Check if a register exists
    pub fn contains(&self, name: &str) -> bool {
        self.registers.contains_key(name)
    }

    /// Number of bits in a register
    pub fn len_of(&self, name: &str) -> Result<usize> {
        self.bits(name).map(<[bool]>::len)
    }

    /// Number of registers
    pub fn len(&self) -> usize {
        self.registers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    /// Register names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registers.keys().map(String::as_str)
    }

    /// Raw bits of a register
    pub fn bits(&self, name: &str) -> Result<&[bool]> {
        self.registers
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| QuantumError::UnknownRegister(name.to_string()))
    }

    /// Set one bit, growing the register when `bit` is past its end
    pub fn set_bit(&mut self, name: &str, bit: usize, value: bool) -> Result<()> {
        let bits = self
            .registers
            .get_mut(name)
            .ok_or_else(|| QuantumError::UnknownRegister(name.to_string()))?;
        if bit >= bits.len() {
            bits.resize(bit + 1, false);
        }
        bits[bit] = value;
        Ok(())
    }

    /// Read one bit; bits past the end of the register read as 0
    pub fn bit(&self, name: &str, bit: usize) -> Result<bool> {
        Ok(self.bits(name)?.get(bit).copied().unwrap_or(false))
    }

    /// Integer value of a register, `Σ bit_i · 2^i`
    pub fn value(&self, name: &str) -> Result<u64> {
        let bits = self.bits(name)?;
        let mut value = 0u64;
        for (i, &set) in bits.iter().enumerate() {
            if !set {
                continue;
            }
            if i >= 64 {
                return Err(QuantumError::RegisterOverflow {
                    register: name.to_string(),
                    len: bits.len(),
                });
            }
            value |= 1 << i;
        }
        Ok(value)
    }

    /// Write an integer value into a register, least significant bit first
    ///
    /// The register grows when `value` needs more bits than it has.
    pub fn set_value(&mut self, name: &str, value: u64) -> Result<()> {
        let bits = self
            .registers
            .get_mut(name)
            .ok_or_else(|| QuantumError::UnknownRegister(name.to_string()))?;
        let needed = (u64::BITS - value.leading_zeros()) as usize;
        if needed > bits.len() {
            bits.resize(needed, false);
        }
        for (i, bit) in bits.iter_mut().enumerate() {
            *bit = i < 64 && (value >> i) & 1 == 1;
        }
        Ok(())
    }

    /// Zero every bit, keeping register names and lengths
    pub fn reset(&mut self) {
        for bits in self.registers.values_mut() {
            bits.iter_mut().for_each(|b| *b = false);
        }
    }

    /// Register names with their lengths
    pub fn layout(&self) -> BTreeMap<String, usize> {
        self.registers
            .iter()
            .map(|(name, bits)| (name.clone(), bits.len()))
            .collect()
    }
}
