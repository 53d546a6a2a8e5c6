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

//! CPU (MIPS32 Release 6) state and execution
//!
//! The CPU side of the interpreter is split into:
//! - [`RegisterFile`]: the architectural state (GPRs, PC, delayed branch
//!   slot, exception record)
//! - [`instruction`]: the 32-bit instruction word and its typed views
//! - [`executor`]: the single-step fetch/decode/dispatch loop and the
//!   per-family instruction handlers

pub mod executor;
pub mod instruction;

mod tests;

pub use instruction::{Instruction, InstructionType};

/// Symbolic general-purpose register numbers
///
/// Conventional MIPS o32 names for the 32 general-purpose registers.
pub mod reg {
    pub const ZERO: u8 = 0;
    pub const AT: u8 = 1;
    pub const V0: u8 = 2;
    pub const V1: u8 = 3;
    pub const A0: u8 = 4;
    pub const A1: u8 = 5;
    pub const A2: u8 = 6;
    pub const A3: u8 = 7;
    pub const T0: u8 = 8;
    pub const T1: u8 = 9;
    pub const T2: u8 = 10;
    pub const T3: u8 = 11;
    pub const T4: u8 = 12;
    pub const T5: u8 = 13;
    pub const T6: u8 = 14;
    pub const T7: u8 = 15;
    pub const S0: u8 = 16;
    pub const S1: u8 = 17;
    pub const S2: u8 = 18;
    pub const S3: u8 = 19;
    pub const S4: u8 = 20;
    pub const S5: u8 = 21;
    pub const S6: u8 = 22;
    pub const S7: u8 = 23;
    pub const T8: u8 = 24;
    pub const T9: u8 = 25;
    pub const K0: u8 = 26;
    pub const K1: u8 = 27;
    pub const GP: u8 = 28;
    pub const SP: u8 = 29;
    pub const FP: u8 = 30;
    pub const RA: u8 = 31;
}

/// Register names indexed by register number, for diagnostics
pub static REGISTER_NAMES: [&str; 32] = [
    "$zero", "$at", "$v0", "$v1", "$a0", "$a1", "$a2", "$a3", "$t0", "$t1", "$t2", "$t3", "$t4",
    "$t5", "$t6", "$t7", "$s0", "$s1", "$s2", "$s3", "$s4", "$s5", "$s6", "$s7", "$t8", "$t9",
    "$k0", "$k1", "$gp", "$sp", "$fp", "$ra",
];

/// A register value with both of its architectural interpretations
///
/// The stored bit pattern is the same either way; `s` and `u` are the
/// two's-complement and unsigned readings of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register {
    /// Signed (two's-complement) view
    pub s: i32,
    /// Unsigned view
    pub u: u32,
}

impl From<u32> for Register {
    fn from(bits: u32) -> Self {
        Self {
            s: bits as i32,
            u: bits,
        }
    }
}

/// Exception cause kinds recorded by the register file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionCause {
    /// Conditional trap (TEQ/TNE/TGE/TGEU/TLT/TLTU)
    Trap,
}

/// A recorded exception: cause plus the raw word that raised it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exception {
    /// What kind of exception was raised
    pub cause: ExceptionCause,
    /// The raw instruction word
    pub raw: u32,
}

/// Architectural register state of the CPU
///
/// # Specifications
/// - 32 general-purpose 32-bit registers, `$zero` hardwired to 0
/// - 32-bit program counter
/// - One-slot delayed branch target committed by the next [`update_pc`]
/// - Most recent exception record, polled by the embedder
///
/// [`update_pc`]: RegisterFile::update_pc
///
/// # Example
/// ```
/// use ridge_core::core::cpu::{reg, RegisterFile};
///
/// let mut reg_file = RegisterFile::new();
/// reg_file.set_signed(reg::T0, -1);
/// assert_eq!(reg_file.get(reg::T0).s, -1);
/// assert_eq!(reg_file.get(reg::T0).u, 0xFFFF_FFFF);
/// assert_eq!(reg_file.get(reg::ZERO).u, 0); // $zero is always 0
/// ```
pub struct RegisterFile {
    /// General purpose registers (r0-r31)
    ///
    /// r0 is hardwired to always return 0
    regs: [u32; 32],

    /// Program counter
    pc: u32,

    /// Pending delayed branch target, committed by the next `update_pc`
    pending_branch: Option<u32>,

    /// Most recent exception
    exception: Option<Exception>,
}

impl RegisterFile {
    /// Create a new register file with all state zeroed
    pub fn new() -> Self {
        Self {
            regs: [0u32; 32],
            pc: 0,
            pending_branch: None,
            exception: None,
        }
    }

    /// Reset all state to the zero-initialised condition
    pub fn reset(&mut self) {
        self.regs = [0u32; 32];
        self.pc = 0;
        self.pending_branch = None;
        self.exception = None;
    }

    /// Read a general purpose register
    ///
    /// # Arguments
    /// - `index`: Register number (0-31)
    ///
    /// # Returns
    /// The register value under both interpretations. r0 always reads 0.
    #[inline(always)]
    pub fn get(&self, index: u8) -> Register {
        if index == 0 {
            Register::from(0)
        } else {
            Register::from(self.regs[index as usize])
        }
    }

    /// Write a general purpose register from a signed value
    ///
    /// Writes to r0 are dropped here, not at call sites.
    #[inline(always)]
    pub fn set_signed(&mut self, index: u8, value: i32) {
        if index != 0 {
            self.regs[index as usize] = value as u32;
        }
    }

    /// Write a general purpose register from an unsigned value
    ///
    /// Writes to r0 are dropped here, not at call sites.
    #[inline(always)]
    pub fn set_unsigned(&mut self, index: u8, value: u32) {
        if index != 0 {
            self.regs[index as usize] = value;
        }
    }

    /// Get the current PC value
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Set the PC directly
    ///
    /// Compact branches use this; legacy branches go through
    /// [`delayed_branch`](RegisterFile::delayed_branch) instead.
    pub fn set_pc(&mut self, pc: u32) {
        self.pc = pc;
    }

    /// Advance the PC by one instruction
    ///
    /// If a delayed branch is pending, its target is committed and the
    /// pending slot cleared; otherwise the PC advances by 4.
    ///
    /// # Example
    /// ```
    /// use ridge_core::core::cpu::RegisterFile;
    ///
    /// let mut reg_file = RegisterFile::new();
    /// reg_file.set_pc(0x1000);
    /// reg_file.delayed_branch(0x2000);
    ///
    /// reg_file.update_pc();
    /// assert_eq!(reg_file.pc(), 0x2000);
    ///
    /// reg_file.update_pc();
    /// assert_eq!(reg_file.pc(), 0x2004);
    /// ```
    pub fn update_pc(&mut self) {
        self.pc = match self.pending_branch.take() {
            Some(target) => target,
            None => self.pc.wrapping_add(4),
        };
    }

    /// Arm the delayed branch slot with `target`
    ///
    /// Exactly one later [`update_pc`](RegisterFile::update_pc) transfers
    /// control to `target`. Must not be called while a branch is already
    /// armed; an instruction schedules at most one branch.
    pub fn delayed_branch(&mut self, target: u32) {
        debug_assert!(
            self.pending_branch.is_none(),
            "delayed branch armed twice within one instruction"
        );
        self.pending_branch = Some(target);
    }

    /// Record an exception
    pub fn signal_exception(&mut self, cause: ExceptionCause, raw: u32) {
        self.exception = Some(Exception { cause, raw });
    }

    /// The most recent exception, if any
    pub fn exception(&self) -> Option<Exception> {
        self.exception
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
