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

//! REGIMM instruction handler
//!
//! Sign-test branches against zero, keyed on the 5-bit sub-opcode that
//! occupies the rt field. Both use the delay slot.

use super::sign_ext_imm16;
use crate::core::cpu::instruction::{regimm, Instruction};
use crate::core::cpu::RegisterFile;
use crate::core::error::{EmulatorError, Result};

/// Execute a REGIMM branch
pub(in crate::core::cpu) fn execute(instr: Instruction, reg_file: &mut RegisterFile) -> Result<()> {
    let rs = reg_file.get(instr.rs());

    let branch_target = reg_file
        .pc()
        .wrapping_add(sign_ext_imm16(instr.imm16()).wrapping_mul(4));

    match instr.regimm_op() {
        regimm::BGEZ => {
            if rs.s >= 0 {
                reg_file.delayed_branch(branch_target);
            }
        }
        regimm::BLTZ => {
            if rs.s < 0 {
                reg_file.delayed_branch(branch_target);
            }
        }

        _ => return Err(EmulatorError::ReservedInstruction { word: instr.raw() }),
    }

    Ok(())
}
