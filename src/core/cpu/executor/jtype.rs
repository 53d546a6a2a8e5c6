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

//! J-type instruction handler
//!
//! Legacy J/JAL combine the 26-bit target with the upper four PC bits and
//! go through the delay slot; the Release 6 BC/BALC compact branches are
//! PC-relative with a 26-bit offset and take effect immediately.

use super::sign_ext_imm26;
use crate::core::cpu::instruction::{opcode, Instruction};
use crate::core::cpu::{reg, RegisterFile};
use crate::core::error::{EmulatorError, Result};

/// Execute a J-type instruction
pub(in crate::core::cpu) fn execute(instr: Instruction, reg_file: &mut RegisterFile) -> Result<()> {
    let target = instr.jump_target();

    // Jump target: target << 2 into the current 256MB region
    let jta = (target << 2) | (reg_file.pc() & 0xF000_0000);

    match instr.op() {
        opcode::J => reg_file.delayed_branch(jta),
        opcode::JAL => {
            reg_file.set_unsigned(reg::RA, reg_file.pc());
            reg_file.delayed_branch(jta);
        }

        opcode::BC => {
            let dest = reg_file.pc().wrapping_add(sign_ext_imm26(target).wrapping_mul(4));
            reg_file.set_pc(dest);
        }
        opcode::BALC => {
            reg_file.set_unsigned(reg::RA, reg_file.pc());
            let dest = reg_file.pc().wrapping_add(sign_ext_imm26(target).wrapping_mul(4));
            reg_file.set_pc(dest);
        }

        _ => return Err(EmulatorError::ReservedInstruction { word: instr.raw() }),
    }

    Ok(())
}
