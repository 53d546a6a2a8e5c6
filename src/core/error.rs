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

/// Interpreter error types
use std::fmt;

/// Result type for interpreter operations
pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Interpreter error types
///
/// A failed `step` returns one of these. Register writes performed before
/// the failure within the same step are not rolled back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmulatorError {
    /// Unaligned memory access error
    UnalignedAccess {
        /// The address that was accessed
        address: u32,
        /// The size of the access in bytes (2 for 16-bit, 4 for 32-bit)
        size: u32,
    },

    /// Invalid memory access (outside the mapped range)
    InvalidAddress {
        /// The address that was accessed
        address: u32,
    },

    /// The word does not decode to any known instruction
    ReservedInstruction {
        /// The raw instruction word
        word: u32,
    },

    /// Integer division with a zero divisor
    DivisionByZero {
        /// The raw instruction word
        word: u32,
    },

    /// A conditional trap instruction fired
    ///
    /// The trap is also recorded in the register file's exception slot.
    Trap {
        /// The raw instruction word
        word: u32,
    },

    /// The word decodes to an FPU instruction, which is not implemented
    UnimplementedFpu {
        /// The raw instruction word
        word: u32,
    },
}

impl fmt::Display for EmulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmulatorError::UnalignedAccess { address, size } => {
                write!(
                    f,
                    "Unaligned {}-bit access at address 0x{:08X}",
                    size * 8,
                    address
                )
            }
            EmulatorError::InvalidAddress { address } => {
                write!(f, "Invalid memory access at address 0x{:08X}", address)
            }
            EmulatorError::ReservedInstruction { word } => {
                write!(f, "Reserved or unknown instruction 0x{:08X}", word)
            }
            EmulatorError::DivisionByZero { word } => {
                write!(f, "Integer division by zero in instruction 0x{:08X}", word)
            }
            EmulatorError::Trap { word } => {
                write!(f, "Trap raised by instruction 0x{:08X}", word)
            }
            EmulatorError::UnimplementedFpu { word } => {
                write!(f, "FPU instruction 0x{:08X} is not implemented", word)
            }
        }
    }
}

impl std::error::Error for EmulatorError {}
