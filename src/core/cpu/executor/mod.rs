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

//! Single-step instruction executor
//!
//! [`step`] advances the architectural state by one instruction: fetch the
//! word at PC, advance the PC, classify the word, and dispatch to the
//! handler for its family. Handlers live in one module per decoded family.
//!
//! Branch discipline: legacy jumps and branches arm the register file's
//! delayed branch slot, which the next `update_pc` commits; Release 6
//! compact branches write the PC directly. The two paths never mix.

use crate::core::cpu::instruction::{Instruction, InstructionType};
use crate::core::cpu::RegisterFile;
use crate::core::error::{EmulatorError, Result};
use crate::core::memory::Memory;

pub(in crate::core::cpu) mod itype;
pub(in crate::core::cpu) mod jtype;
pub(in crate::core::cpu) mod pcrel;
pub(in crate::core::cpu) mod regimm;
pub(in crate::core::cpu) mod rtype;
pub(in crate::core::cpu) mod special3;

/// Sign-extend a 16-bit immediate to 32 bits
///
/// Built from unsigned operations: the fill mask is replicated from the
/// top bit of the field, so the result matches a two's-complement widening
/// on every input.
#[inline(always)]
pub(in crate::core::cpu) fn sign_ext_imm16(imm: u16) -> u32 {
    let imm = imm as u32;
    (((!0u32) << 16) * ((imm >> 15) & 1)) | imm
}

/// Sign-extend a 21-bit immediate to 32 bits
#[inline(always)]
pub(in crate::core::cpu) fn sign_ext_imm21(imm: u32) -> u32 {
    (((!0u32) << 21) * ((imm >> 20) & 1)) | (imm & 0x001F_FFFF)
}

/// Sign-extend a 26-bit immediate to 32 bits
#[inline(always)]
pub(in crate::core::cpu) fn sign_ext_imm26(imm: u32) -> u32 {
    (((!0u32) << 26) * ((imm >> 25) & 1)) | (imm & 0x03FF_FFFF)
}

/// Arithmetic right shift built from unsigned operations
///
/// The sign fill is `(!0 << (32 - shift))` multiplied by the top bit of
/// `value`, OR-ed onto the logical shift. `shift` must be in 0..=31.
#[inline(always)]
pub(in crate::core::cpu) fn arithmetic_shift_right(value: u32, shift: u32) -> u32 {
    if shift == 0 {
        return value;
    }
    let fill = ((!0u32) << (32 - shift)) * ((value >> 31) & 1);
    fill | (value >> shift)
}

/// Execute one instruction
///
/// Performs the full per-instruction sequence:
/// 1. Fetch the 32-bit word at PC
/// 2. Advance the PC (committing any pending delayed branch)
/// 3. Classify the word
/// 4. Dispatch to the family handler
///
/// After the fetch the PC points at the following instruction, which is
/// the delay-slot address legacy branches compute their targets from.
/// PC-relative instructions instead use the address the word was fetched
/// from.
///
/// # Arguments
/// - `reg_file`: Architectural register state, mutated in place
/// - `memory`: Memory accessed by the fetch and by loads/stores
///
/// # Returns
/// `Ok(())` if the instruction completed; an error if the fetch failed,
/// the word did not decode, or the instruction itself failed (memory
/// fault, division by zero, trap taken, FPU encoding).
///
/// # Example
/// ```
/// use ridge_core::core::cpu::executor::step;
/// use ridge_core::core::cpu::{reg, RegisterFile};
/// use ridge_core::core::memory::{Memory, Ram};
///
/// let mut reg_file = RegisterFile::new();
/// let mut ram = Ram::with_default_size();
///
/// // ori $t0, $zero, 0xBEEF
/// ram.write32(0, 0x3408_BEEF).unwrap();
/// step(&mut reg_file, &mut ram).unwrap();
///
/// assert_eq!(reg_file.get(reg::T0).u, 0xBEEF);
/// assert_eq!(reg_file.pc(), 4);
/// ```
pub fn step<M: Memory>(reg_file: &mut RegisterFile, memory: &mut M) -> Result<()> {
    let fetch_pc = reg_file.pc();
    let word = memory.read32(fetch_pc)?;
    let instr = Instruction::new(word);

    reg_file.update_pc();

    match instr.classify()? {
        InstructionType::RType => rtype::execute(instr, reg_file),

        InstructionType::IType | InstructionType::LongImmIType => {
            itype::execute(instr, reg_file, memory)
        }

        InstructionType::JType => jtype::execute(instr, reg_file),

        InstructionType::RegimmIType => regimm::execute(instr, reg_file),

        InstructionType::Special3Bshfl => special3::execute_bshfl(instr, reg_file),
        InstructionType::Special3Ext => special3::execute_ext(instr, reg_file),
        InstructionType::Special3Ins => special3::execute_ins(instr, reg_file),

        InstructionType::PcRelType1 => pcrel::execute_type1(instr, fetch_pc, reg_file, memory),
        InstructionType::PcRelType2 => pcrel::execute_type2(instr, fetch_pc, reg_file),

        // TODO: execute FPU instructions once an FPU register file exists
        InstructionType::FpuRType | InstructionType::FpuTType | InstructionType::FpuBType => {
            log::warn!(
                "Unimplemented FPU instruction 0x{:08X} at PC=0x{:08X}",
                word,
                fetch_pc
            );
            Err(EmulatorError::UnimplementedFpu { word })
        }
    }
}
