// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Memory interface for the interpreter core
//!
//! The executor depends only on the [`Memory`] trait: typed 8/16/32-bit
//! reads and writes, each returning a [`Result`] so access faults can be
//! reported without tearing down the interpreter. Endianness and alignment
//! policy belong to the implementation; loads and stores of the same
//! implementation must agree on both.
//!
//! [`Ram`] is the reference implementation: a flat little-endian byte
//! array with strict alignment checking, sized and mapped from address 0.
//!
//! # Example
//!
//! ```
//! use ridge_core::core::memory::{Memory, Ram};
//!
//! let mut ram = Ram::new(4096);
//!
//! ram.write32(0x100, 0x12345678).unwrap();
//! assert_eq!(ram.read32(0x100).unwrap(), 0x12345678);
//!
//! // Little-endian byte order
//! assert_eq!(ram.read8(0x100).unwrap(), 0x78);
//! ```

use crate::core::error::{EmulatorError, Result};

#[cfg(test)]
mod tests;

/// Byte-addressable memory as consumed by the executor
///
/// Loads of 8 and 16 bits come in zero-extending (`read8`, `read16`) and
/// sign-extending (`read8_signed`, `read16_signed`) flavours; the executor
/// widens the returned value into a 32-bit register in both cases.
pub trait Memory {
    /// Read an 8-bit value
    fn read8(&self, address: u32) -> Result<u8>;

    /// Read a 16-bit value
    fn read16(&self, address: u32) -> Result<u16>;

    /// Read a 32-bit value
    fn read32(&self, address: u32) -> Result<u32>;

    /// Write an 8-bit value
    fn write8(&mut self, address: u32, value: u8) -> Result<()>;

    /// Write a 16-bit value
    fn write16(&mut self, address: u32, value: u16) -> Result<()>;

    /// Write a 32-bit value
    fn write32(&mut self, address: u32, value: u32) -> Result<()>;

    /// Read an 8-bit value as signed
    fn read8_signed(&self, address: u32) -> Result<i8> {
        Ok(self.read8(address)? as i8)
    }

    /// Read a 16-bit value as signed
    fn read16_signed(&self, address: u32) -> Result<i16> {
        Ok(self.read16(address)? as i16)
    }

    /// Read a 32-bit value as signed
    fn read32_signed(&self, address: u32) -> Result<i32> {
        Ok(self.read32(address)? as i32)
    }
}

/// Flat little-endian RAM mapped from address 0
///
/// Accesses must be naturally aligned (16-bit on even addresses, 32-bit on
/// multiples of four); violations return
/// [`EmulatorError::UnalignedAccess`]. Accesses past the end of the array
/// return [`EmulatorError::InvalidAddress`].
pub struct Ram {
    /// Backing storage
    data: Vec<u8>,
}

impl Ram {
    /// Default RAM size (2MB)
    pub const DEFAULT_SIZE: usize = 2 * 1024 * 1024;

    /// Create a RAM of `size` bytes, zero-initialised
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0u8; size],
        }
    }

    /// Create a RAM of [`Ram::DEFAULT_SIZE`] bytes
    pub fn with_default_size() -> Self {
        Self::new(Self::DEFAULT_SIZE)
    }

    /// Size of the RAM in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Copy `bytes` into RAM starting at `address`
    ///
    /// Used to place program images and test data. Fails with
    /// [`EmulatorError::InvalidAddress`] if the range does not fit.
    pub fn load(&mut self, address: u32, bytes: &[u8]) -> Result<()> {
        let start = address as usize;
        let end = start.checked_add(bytes.len());
        match end {
            Some(end) if end <= self.data.len() => {
                self.data[start..end].copy_from_slice(bytes);
                Ok(())
            }
            _ => Err(EmulatorError::InvalidAddress { address }),
        }
    }

    /// Validate alignment and bounds, returning the base index
    fn check_access(&self, address: u32, size: u32) -> Result<usize> {
        if address % size != 0 {
            return Err(EmulatorError::UnalignedAccess { address, size });
        }

        let start = address as usize;
        match start.checked_add(size as usize) {
            Some(end) if end <= self.data.len() => Ok(start),
            _ => Err(EmulatorError::InvalidAddress { address }),
        }
    }
}

impl Memory for Ram {
    fn read8(&self, address: u32) -> Result<u8> {
        let idx = self.check_access(address, 1)?;
        Ok(self.data[idx])
    }

    fn read16(&self, address: u32) -> Result<u16> {
        let idx = self.check_access(address, 2)?;
        let bytes = [self.data[idx], self.data[idx + 1]];
        Ok(u16::from_le_bytes(bytes))
    }

    fn read32(&self, address: u32) -> Result<u32> {
        let idx = self.check_access(address, 4)?;
        let bytes = [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ];
        Ok(u32::from_le_bytes(bytes))
    }

    fn write8(&mut self, address: u32, value: u8) -> Result<()> {
        let idx = self.check_access(address, 1)?;
        self.data[idx] = value;
        Ok(())
    }

    fn write16(&mut self, address: u32, value: u16) -> Result<()> {
        let idx = self.check_access(address, 2)?;
        self.data[idx..idx + 2].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    fn write32(&mut self, address: u32, value: u32) -> Result<()> {
        let idx = self.check_access(address, 4)?;
        self.data[idx..idx + 4].copy_from_slice(&value.to_le_bytes());
        Ok(())
    }
}
