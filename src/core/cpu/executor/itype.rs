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

//! I-type instruction handler
//!
//! Immediate arithmetic and logic, loads and stores, the legacy BEQ/BNE
//! branches, and the Release 6 "POP" opcodes, each of which multiplexes
//! several compact branches on the rs/rt register fields.
//!
//! POP sub-cases are selected by predicates over the register *fields*
//! (not the register values), evaluated in a fixed order: each later
//! predicate assumes the earlier ones failed. If no sub-case matches, the
//! instruction is a no-op. Compact branches write the PC directly; only
//! BLEZ/BGTZ (the rt=0 rows of POP06/POP07) use the delay slot.

use super::{sign_ext_imm16, sign_ext_imm21};
use crate::core::cpu::instruction::{opcode, Instruction};
use crate::core::cpu::{reg, RegisterFile};
use crate::core::error::{EmulatorError, Result};
use crate::core::memory::Memory;

/// Signed-add overflow as used by BOVC/BNVC
///
/// Defined as carry-out differing from bit 31 of the wrapped sum.
#[inline(always)]
fn signed_add_overflows(a: u32, b: u32) -> bool {
    let sum = a.wrapping_add(b);
    let carry = sum < a;
    carry != (sum >> 31 != 0)
}

/// Write the return address and take a compact branch
fn link_and_jump(reg_file: &mut RegisterFile, target: u32) {
    reg_file.set_unsigned(reg::RA, reg_file.pc());
    reg_file.set_pc(target);
}

/// Execute an I-type or long-immediate I-type instruction
pub(in crate::core::cpu) fn execute<M: Memory>(
    instr: Instruction,
    reg_file: &mut RegisterFile,
    memory: &mut M,
) -> Result<()> {
    let rs = reg_file.get(instr.rs());
    let rt = reg_file.get(instr.rt());

    // Branch targets are relative to the updated PC, which at this point
    // is the delay-slot address.
    let branch_target = reg_file
        .pc()
        .wrapping_add(sign_ext_imm16(instr.imm16()).wrapping_mul(4));

    // Loads and stores address rs + sign-extended offset
    let effective_address = rs.u.wrapping_add(sign_ext_imm16(instr.imm16()));

    match instr.op() {
        opcode::BEQ => {
            if rs.u == rt.u {
                reg_file.delayed_branch(branch_target);
            }
        }
        opcode::BNE => {
            if rs.u != rt.u {
                reg_file.delayed_branch(branch_target);
            }
        }

        opcode::ADDIU => {
            reg_file.set_unsigned(instr.rt(), rs.u.wrapping_add(sign_ext_imm16(instr.imm16())));
        }
        opcode::AUI => {
            reg_file.set_unsigned(instr.rt(), rs.u.wrapping_add((instr.imm16() as u32) << 16));
        }
        opcode::SLTI => {
            let imm = sign_ext_imm16(instr.imm16()) as i32;
            reg_file.set_unsigned(instr.rt(), (rs.s < imm) as u32);
        }
        opcode::SLTIU => {
            reg_file.set_unsigned(instr.rt(), (rs.u < sign_ext_imm16(instr.imm16())) as u32);
        }
        opcode::ANDI => reg_file.set_unsigned(instr.rt(), rs.u & instr.imm16() as u32),
        opcode::ORI => reg_file.set_unsigned(instr.rt(), rs.u | instr.imm16() as u32),
        opcode::XORI => reg_file.set_unsigned(instr.rt(), rs.u ^ instr.imm16() as u32),

        // Loads: sign-extending
        opcode::LB => {
            let value = memory.read8_signed(effective_address)?;
            reg_file.set_signed(instr.rt(), value as i32);
        }
        opcode::LH => {
            let value = memory.read16_signed(effective_address)?;
            reg_file.set_signed(instr.rt(), value as i32);
        }
        opcode::LW => {
            let value = memory.read32_signed(effective_address)?;
            reg_file.set_signed(instr.rt(), value);
        }

        // Loads: zero-extending
        opcode::LBU => {
            let value = memory.read8(effective_address)?;
            reg_file.set_unsigned(instr.rt(), value as u32);
        }
        opcode::LHU => {
            let value = memory.read16(effective_address)?;
            reg_file.set_unsigned(instr.rt(), value as u32);
        }

        // Stores
        opcode::SB => memory.write8(effective_address, rt.u as u8)?,
        opcode::SH => memory.write16(effective_address, rt.u as u16)?,
        opcode::SW => memory.write32(effective_address, rt.u)?,

        opcode::POP06 => {
            if instr.rt() == 0 {
                // BLEZ
                if rs.s <= 0 {
                    reg_file.delayed_branch(branch_target);
                }
            } else if instr.rs() == 0 {
                // BLEZALC
                if rt.s <= 0 {
                    link_and_jump(reg_file, branch_target);
                }
            } else if instr.rs() == instr.rt() {
                // BGEZALC
                if rt.s >= 0 {
                    link_and_jump(reg_file, branch_target);
                }
            } else {
                // BGEUC
                if rs.u >= rt.u {
                    reg_file.set_pc(branch_target);
                }
            }
        }
        opcode::POP07 => {
            if instr.rt() == 0 {
                // BGTZ
                if rs.s > 0 {
                    reg_file.delayed_branch(branch_target);
                }
            } else if instr.rs() == 0 {
                // BGTZALC
                if rt.s > 0 {
                    link_and_jump(reg_file, branch_target);
                }
            } else if instr.rs() == instr.rt() {
                // BLTZALC
                if rt.s < 0 {
                    link_and_jump(reg_file, branch_target);
                }
            } else {
                // BLTUC
                if rs.u < rt.u {
                    reg_file.set_pc(branch_target);
                }
            }
        }

        opcode::POP10 => {
            if instr.rs() == 0 && instr.rt() != 0 {
                // BEQZALC
                if rt.u == 0 {
                    link_and_jump(reg_file, branch_target);
                }
            } else if instr.rs() != 0 && instr.rt() != 0 && instr.rs() < instr.rt() {
                // BEQC
                if rs.u == rt.u {
                    reg_file.set_pc(branch_target);
                }
            } else {
                // BOVC (rs field >= rt field)
                if signed_add_overflows(rs.u, rt.u) {
                    reg_file.set_pc(branch_target);
                }
            }
        }
        opcode::POP30 => {
            if instr.rs() == 0 && instr.rt() != 0 {
                // BNEZALC
                if rt.u != 0 {
                    link_and_jump(reg_file, branch_target);
                }
            } else if instr.rs() != 0 && instr.rt() != 0 && instr.rs() < instr.rt() {
                // BNEC
                if rs.u != rt.u {
                    reg_file.set_pc(branch_target);
                }
            } else {
                // BNVC (rs field >= rt field)
                if !signed_add_overflows(rs.u, rt.u) {
                    reg_file.set_pc(branch_target);
                }
            }
        }

        opcode::POP26 => {
            if instr.rs() == 0 && instr.rt() != 0 {
                // BLEZC
                if rt.s <= 0 {
                    reg_file.set_pc(branch_target);
                }
            } else if instr.rs() == instr.rt() && instr.rs() != 0 {
                // BGEZC
                if rt.s >= 0 {
                    reg_file.set_pc(branch_target);
                }
            } else if instr.rs() != 0 && instr.rt() != 0 {
                // BGEC
                if rs.s >= rt.s {
                    reg_file.set_pc(branch_target);
                }
            }
        }
        opcode::POP27 => {
            if instr.rs() == 0 && instr.rt() != 0 {
                // BGTZC
                if rt.s > 0 {
                    reg_file.set_pc(branch_target);
                }
            } else if instr.rs() == instr.rt() && instr.rs() != 0 {
                // BLTZC
                if rt.s < 0 {
                    reg_file.set_pc(branch_target);
                }
            } else if instr.rs() != 0 && instr.rt() != 0 {
                // BLTC
                if rs.s < rt.s {
                    reg_file.set_pc(branch_target);
                }
            }
        }

        opcode::POP66 => {
            if instr.rs() == 0 {
                // JIC
                reg_file.set_pc(rt.u.wrapping_add(sign_ext_imm16(instr.imm16())));
            } else {
                // BEQZC: long-immediate form
                if rs.u == 0 {
                    let target = reg_file
                        .pc()
                        .wrapping_add(sign_ext_imm21(instr.imm21()).wrapping_mul(4));
                    reg_file.set_pc(target);
                }
            }
        }
        opcode::POP76 => {
            if instr.rs() == 0 {
                // JIALC
                reg_file.set_unsigned(reg::RA, reg_file.pc());
                reg_file.set_pc(rt.u.wrapping_add(sign_ext_imm16(instr.imm16())));
            } else {
                // BNEZC: long-immediate form
                if rs.u != 0 {
                    let target = reg_file
                        .pc()
                        .wrapping_add(sign_ext_imm21(instr.imm21()).wrapping_mul(4));
                    reg_file.set_pc(target);
                }
            }
        }

        _ => return Err(EmulatorError::ReservedInstruction { word: instr.raw() }),
    }

    Ok(())
}
