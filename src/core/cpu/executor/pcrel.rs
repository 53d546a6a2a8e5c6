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

//! PC-relative instruction handlers
//!
//! All four instructions compute against `fetch_pc`, the address the
//! instruction itself was fetched from, not the already-advanced PC.
//! The result lands in the register named by the rs field.

use super::sign_ext_imm21;
use crate::core::cpu::instruction::{pcrel, Instruction};
use crate::core::cpu::RegisterFile;
use crate::core::error::{EmulatorError, Result};
use crate::core::memory::Memory;

/// Execute a PC-relative type-1 instruction (19-bit immediate)
pub(in crate::core::cpu) fn execute_type1<M: Memory>(
    instr: Instruction,
    fetch_pc: u32,
    reg_file: &mut RegisterFile,
    memory: &M,
) -> Result<()> {
    // Both instructions share the address calculation: the immediate is
    // shifted left by 2, sign-extended from 21 bits, and added to the
    // instruction's own address
    let address = sign_ext_imm21(instr.imm19() << 2).wrapping_add(fetch_pc);

    match instr.pcrel_funct1() {
        pcrel::ADDIUPC => reg_file.set_unsigned(instr.rs(), address),

        pcrel::LWPC => {
            let value = memory.read32(address)?;
            reg_file.set_unsigned(instr.rs(), value);
        }

        _ => return Err(EmulatorError::ReservedInstruction { word: instr.raw() }),
    }

    Ok(())
}

/// Execute a PC-relative type-2 instruction (16-bit immediate)
pub(in crate::core::cpu) fn execute_type2(
    instr: Instruction,
    fetch_pc: u32,
    reg_file: &mut RegisterFile,
) -> Result<()> {
    // The immediate occupies the upper half of the offset
    let address = ((instr.imm16() as u32) << 16).wrapping_add(fetch_pc);

    match instr.pcrel_funct2() {
        pcrel::AUIPC => reg_file.set_unsigned(instr.rs(), address),

        // Result aligned down to a 64K boundary
        pcrel::ALUIPC => reg_file.set_unsigned(instr.rs(), address & 0xFFFF_0000),

        _ => return Err(EmulatorError::ReservedInstruction { word: instr.raw() }),
    }

    Ok(())
}
