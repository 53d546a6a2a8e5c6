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

//! SPECIAL (R-type) instruction handler
//!
//! Register-register arithmetic, logic, shifts and rotates, the SOP
//! multiply/divide encodings, register jumps, conditional moves, leading
//! zero/one counts, and the conditional trap family.

use super::arithmetic_shift_right;
use crate::core::cpu::instruction::{func, Instruction};
use crate::core::cpu::{reg, ExceptionCause, RegisterFile};
use crate::core::error::{EmulatorError, Result};

/// Higher 32 bits of a signed 32x32 multiplication
#[inline(always)]
fn mul_high_signed(a: i32, b: i32) -> i32 {
    ((a as i64 * b as i64) >> 32) as i32
}

/// Higher 32 bits of an unsigned 32x32 multiplication
#[inline(always)]
fn mul_high_unsigned(a: u32, b: u32) -> u32 {
    ((a as u64 * b as u64) >> 32) as u32
}

/// Select between the two results multiplexed on a SOP shamt field
///
/// shamt = 2 selects the first (MUL/DIV class), anything else the second
/// (MUH/MOD class).
#[inline(always)]
fn sop_select<T>(shamt: u8, shamt2: T, shamt3: T) -> T {
    if shamt == 2 {
        shamt2
    } else {
        shamt3
    }
}

/// Record a trap and fail when `condition` holds; no-op otherwise
fn trap_on_cond(condition: bool, instr: Instruction, reg_file: &mut RegisterFile) -> Result<()> {
    if condition {
        reg_file.signal_exception(ExceptionCause::Trap, instr.raw());
        return Err(EmulatorError::Trap { word: instr.raw() });
    }
    Ok(())
}

/// Execute a SPECIAL instruction
///
/// Unless noted in the individual arms, the result of `rs op rt` is
/// written to `rd`.
pub(in crate::core::cpu) fn execute(instr: Instruction, reg_file: &mut RegisterFile) -> Result<()> {
    let rs = reg_file.get(instr.rs());
    let rt = reg_file.get(instr.rt());
    let rd = instr.rd();

    match instr.funct() {
        func::ADD => reg_file.set_signed(rd, rs.s.wrapping_add(rt.s)),
        func::ADDU => reg_file.set_unsigned(rd, rs.u.wrapping_add(rt.u)),
        func::SUB => reg_file.set_signed(rd, rs.s.wrapping_sub(rt.s)),
        func::SUBU => reg_file.set_unsigned(rd, rs.u.wrapping_sub(rt.u)),

        // Shamt: 2 = mul, 3 = muh
        func::SOP30 => {
            let value = sop_select(
                instr.shamt(),
                rs.s.wrapping_mul(rt.s),
                mul_high_signed(rs.s, rt.s),
            );
            reg_file.set_signed(rd, value);
        }
        // Shamt: 2 = mulu, 3 = muhu
        func::SOP31 => {
            let value = sop_select(
                instr.shamt(),
                rs.u.wrapping_mul(rt.u),
                mul_high_unsigned(rs.u, rt.u),
            );
            reg_file.set_unsigned(rd, value);
        }
        // Shamt: 2 = div, 3 = mod
        func::SOP32 => {
            if rt.s == 0 {
                return Err(EmulatorError::DivisionByZero { word: instr.raw() });
            }
            let value = sop_select(instr.shamt(), rs.s.wrapping_div(rt.s), rs.s.wrapping_rem(rt.s));
            reg_file.set_signed(rd, value);
        }
        // Shamt: 2 = divu, 3 = modu
        func::SOP33 => {
            if rt.u == 0 {
                return Err(EmulatorError::DivisionByZero { word: instr.raw() });
            }
            let value = sop_select(instr.shamt(), rs.u / rt.u, rs.u % rt.u);
            reg_file.set_unsigned(rd, value);
        }

        func::AND => reg_file.set_unsigned(rd, rs.u & rt.u),
        func::OR => reg_file.set_unsigned(rd, rs.u | rt.u),
        func::XOR => reg_file.set_unsigned(rd, rs.u ^ rt.u),
        func::NOR => reg_file.set_unsigned(rd, !(rs.u | rt.u)),

        func::JR => reg_file.delayed_branch(rs.u),
        func::JALR => {
            reg_file.set_unsigned(reg::RA, reg_file.pc());
            reg_file.delayed_branch(rs.u);
        }

        func::SLT => reg_file.set_unsigned(rd, (rs.s < rt.s) as u32),
        func::SLTU => reg_file.set_unsigned(rd, (rs.u < rt.u) as u32),

        func::SLL => reg_file.set_unsigned(rd, rt.u << instr.shamt()),
        // rt is shifted left by the lower 5 bits of rs
        func::SLLV => reg_file.set_unsigned(rd, rt.u << (rs.u & 0x1F)),

        func::SRA => reg_file.set_unsigned(rd, arithmetic_shift_right(rt.u, instr.shamt() as u32)),
        func::SRAV => reg_file.set_unsigned(rd, arithmetic_shift_right(rt.u, rs.u & 0x1F)),

        func::SRL => {
            // ROTR: rotate instead of shift if rs field bit 0 is set
            let value = if instr.rs() & 1 != 0 {
                rt.u.rotate_right(instr.shamt() as u32)
            } else {
                rt.u >> instr.shamt()
            };
            reg_file.set_unsigned(rd, value);
        }
        func::SRLV => {
            // ROTRV: rotate instead of shift if shamt field bit 0 is set
            let shift = rs.u & 0x1F;
            let value = if instr.shamt() & 1 != 0 {
                rt.u.rotate_right(shift)
            } else {
                rt.u >> shift
            };
            reg_file.set_unsigned(rd, value);
        }

        func::SELEQZ => reg_file.set_unsigned(rd, if rt.u == 0 { rs.u } else { 0 }),
        func::SELNEZ => reg_file.set_unsigned(rd, if rt.u != 0 { rs.u } else { 0 }),

        func::CLZ => reg_file.set_unsigned(rd, rs.u.leading_zeros()),
        func::CLO => reg_file.set_unsigned(rd, rs.u.leading_ones()),

        // Trap instructions
        func::TEQ => return trap_on_cond(rs.u == rt.u, instr, reg_file),
        func::TNE => return trap_on_cond(rs.u != rt.u, instr, reg_file),
        func::TGE => return trap_on_cond(rs.s >= rt.s, instr, reg_file),
        func::TGEU => return trap_on_cond(rs.u >= rt.u, instr, reg_file),
        func::TLT => return trap_on_cond(rs.s < rt.s, instr, reg_file),
        func::TLTU => return trap_on_cond(rs.u < rt.u, instr, reg_file),

        _ => return Err(EmulatorError::ReservedInstruction { word: instr.raw() }),
    }

    Ok(())
}
