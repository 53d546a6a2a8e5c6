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

//! MIPS32 Release 6 instruction word
//!
//! An [`Instruction`] is a raw 32-bit word plus typed views over its
//! bit-fields. Which view is meaningful depends on the instruction family,
//! determined by [`Instruction::classify`]:
//!
//! - R-type:            | op (6) | rs (5) | rt (5) | rd (5) | shamt (5) | funct (6) |
//! - I-type:            | op (6) | rs (5) | rt (5) | imm (16) |
//! - Long-imm I-type:   | op (6) | rs (5) | imm (21) |
//! - J-type:            | op (6) | target (26) |
//! - REGIMM I-type:     | op (6) | rs (5) | sub-op (5) | imm (16) |
//! - SPECIAL3 BSHFL:    | op (6) | rs (5) | rt (5) | rd (5) | funct (5) | minor (6) |
//! - SPECIAL3 EXT/INS:  | op (6) | rs (5) | rt (5) | msb (5) | lsb (5) | minor (6) |
//! - PC-relative t1:    | op (6) | rs (5) | funct (2) | imm (19) |
//! - PC-relative t2:    | op (6) | rs (5) | funct (5) | imm (16) |
//!
//! Opcode and function-field values live in the [`opcode`], [`func`],
//! [`regimm`], [`special3`], [`bshfl`], [`pcrel`] and [`fpu`] modules.

use crate::core::error::{EmulatorError, Result};

/// Major opcode values (bits 31..26)
pub mod opcode {
    pub const SPECIAL: u8 = 0x00;
    pub const REGIMM: u8 = 0x01;
    pub const J: u8 = 0x02;
    pub const JAL: u8 = 0x03;
    pub const BEQ: u8 = 0x04;
    pub const BNE: u8 = 0x05;
    pub const POP06: u8 = 0x06;
    pub const POP07: u8 = 0x07;
    pub const POP10: u8 = 0x08;
    pub const ADDIU: u8 = 0x09;
    pub const SLTI: u8 = 0x0A;
    pub const SLTIU: u8 = 0x0B;
    pub const ANDI: u8 = 0x0C;
    pub const ORI: u8 = 0x0D;
    pub const XORI: u8 = 0x0E;
    pub const AUI: u8 = 0x0F;
    pub const COP1: u8 = 0x11;
    pub const POP26: u8 = 0x16;
    pub const POP27: u8 = 0x17;
    pub const POP30: u8 = 0x18;
    pub const SPECIAL3: u8 = 0x1F;
    pub const LB: u8 = 0x20;
    pub const LH: u8 = 0x21;
    pub const LW: u8 = 0x23;
    pub const LBU: u8 = 0x24;
    pub const LHU: u8 = 0x25;
    pub const SB: u8 = 0x28;
    pub const SH: u8 = 0x29;
    pub const SW: u8 = 0x2B;
    pub const BC: u8 = 0x32;
    pub const POP66: u8 = 0x36;
    pub const BALC: u8 = 0x3A;
    pub const PCREL: u8 = 0x3B;
    pub const POP76: u8 = 0x3E;
}

/// SPECIAL function field values (bits 5..0)
pub mod func {
    pub const SLL: u8 = 0x00;
    pub const SRL: u8 = 0x02;
    pub const SRA: u8 = 0x03;
    pub const SLLV: u8 = 0x04;
    pub const SRLV: u8 = 0x06;
    pub const SRAV: u8 = 0x07;
    pub const JR: u8 = 0x08;
    pub const JALR: u8 = 0x09;
    pub const CLZ: u8 = 0x10;
    pub const CLO: u8 = 0x11;
    pub const SOP30: u8 = 0x18;
    pub const SOP31: u8 = 0x19;
    pub const SOP32: u8 = 0x1A;
    pub const SOP33: u8 = 0x1B;
    pub const ADD: u8 = 0x20;
    pub const ADDU: u8 = 0x21;
    pub const SUB: u8 = 0x22;
    pub const SUBU: u8 = 0x23;
    pub const AND: u8 = 0x24;
    pub const OR: u8 = 0x25;
    pub const XOR: u8 = 0x26;
    pub const NOR: u8 = 0x27;
    pub const SLT: u8 = 0x2A;
    pub const SLTU: u8 = 0x2B;
    pub const TGE: u8 = 0x30;
    pub const TGEU: u8 = 0x31;
    pub const TLT: u8 = 0x32;
    pub const TLTU: u8 = 0x33;
    pub const TEQ: u8 = 0x34;
    pub const SELEQZ: u8 = 0x35;
    pub const TNE: u8 = 0x36;
    pub const SELNEZ: u8 = 0x37;
}

/// REGIMM sub-opcode values (bits 20..16)
pub mod regimm {
    pub const BLTZ: u8 = 0x00;
    pub const BGEZ: u8 = 0x01;
}

/// SPECIAL3 minor function values (bits 5..0)
pub mod special3 {
    pub const EXT: u8 = 0x00;
    pub const INS: u8 = 0x04;
    pub const BSHFL: u8 = 0x20;
}

/// BSHFL function field values (bits 10..6)
///
/// ALIGN occupies four slots: the function field is really 3 bits with
/// the byte position packed into the low 2 bits.
pub mod bshfl {
    pub const BITSWAP: u8 = 0x00;
    pub const WSBH: u8 = 0x02;
    pub const ALIGN_0: u8 = 0x08;
    pub const ALIGN_1: u8 = 0x09;
    pub const ALIGN_2: u8 = 0x0A;
    pub const ALIGN_3: u8 = 0x0B;
    pub const SEB: u8 = 0x10;
    pub const SEH: u8 = 0x18;
}

/// PC-relative function values
///
/// Type-1 instructions carry a 2-bit function (bits 20..19) and a 19-bit
/// immediate; type-2 instructions carry a 5-bit function (bits 20..16)
/// and a 16-bit immediate.
pub mod pcrel {
    pub const ADDIUPC: u8 = 0x00;
    pub const LWPC: u8 = 0x01;
    pub const AUIPC: u8 = 0x1E;
    pub const ALUIPC: u8 = 0x1F;
}

/// COP1 rs-field values used to classify FPU instructions
pub mod fpu {
    pub const MFC1: u8 = 0x00;
    pub const CFC1: u8 = 0x02;
    pub const MFHC1: u8 = 0x03;
    pub const MTC1: u8 = 0x04;
    pub const CTC1: u8 = 0x06;
    pub const MTHC1: u8 = 0x07;
    pub const BC1EQZ: u8 = 0x09;
    pub const BC1NEZ: u8 = 0x0D;
    pub const FMT_S: u8 = 0x10;
    pub const FMT_D: u8 = 0x11;
    pub const FMT_W: u8 = 0x14;
    pub const FMT_L: u8 = 0x15;
}

/// Instruction family yielded by [`Instruction::classify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionType {
    /// SPECIAL register-register instructions
    RType,
    /// Immediate instructions, including loads, stores and branches
    IType,
    /// Immediate instructions with a 21-bit immediate (BEQZC/BNEZC)
    LongImmIType,
    /// Jump and compact-branch instructions with a 26-bit target
    JType,
    /// REGIMM branch instructions
    RegimmIType,
    /// SPECIAL3 byte/bit shuffle instructions
    Special3Bshfl,
    /// SPECIAL3 bit-field extract
    Special3Ext,
    /// SPECIAL3 bit-field insert
    Special3Ins,
    /// PC-relative with 19-bit immediate (ADDIUPC/LWPC)
    PcRelType1,
    /// PC-relative with 16-bit immediate (AUIPC/ALUIPC)
    PcRelType2,
    /// FPU arithmetic (recognised, not implemented)
    FpuRType,
    /// FPU transfer (recognised, not implemented)
    FpuTType,
    /// FPU branch (recognised, not implemented)
    FpuBType,
}

/// A 32-bit MIPS32r6 instruction word
///
/// # Example
/// ```
/// use ridge_core::core::cpu::instruction::{func, Instruction, InstructionType};
/// use ridge_core::core::cpu::reg;
///
/// // add $t0, $t5, $a0
/// let instr = Instruction::rtype(func::ADD, reg::T0, reg::T5, reg::A0, 0);
/// assert_eq!(instr.raw(), 0x01A4_4020);
/// assert_eq!(instr.classify().unwrap(), InstructionType::RType);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    raw: u32,
}

impl Instruction {
    /// Wrap a raw instruction word
    #[inline(always)]
    pub fn new(raw: u32) -> Self {
        Self { raw }
    }

    /// The raw 32-bit word
    #[inline(always)]
    pub fn raw(&self) -> u32 {
        self.raw
    }

    /// Major opcode (bits 31..26)
    #[inline(always)]
    pub fn op(&self) -> u8 {
        ((self.raw >> 26) & 0x3F) as u8
    }

    /// rs register field (bits 25..21)
    #[inline(always)]
    pub fn rs(&self) -> u8 {
        ((self.raw >> 21) & 0x1F) as u8
    }

    /// rt register field (bits 20..16)
    #[inline(always)]
    pub fn rt(&self) -> u8 {
        ((self.raw >> 16) & 0x1F) as u8
    }

    /// rd register field (bits 15..11)
    #[inline(always)]
    pub fn rd(&self) -> u8 {
        ((self.raw >> 11) & 0x1F) as u8
    }

    /// Shift amount field (bits 10..6)
    #[inline(always)]
    pub fn shamt(&self) -> u8 {
        ((self.raw >> 6) & 0x1F) as u8
    }

    /// Function field (bits 5..0)
    #[inline(always)]
    pub fn funct(&self) -> u8 {
        (self.raw & 0x3F) as u8
    }

    /// 16-bit immediate (bits 15..0)
    #[inline(always)]
    pub fn imm16(&self) -> u16 {
        (self.raw & 0xFFFF) as u16
    }

    /// 21-bit immediate of the long-immediate form (bits 20..0)
    #[inline(always)]
    pub fn imm21(&self) -> u32 {
        self.raw & 0x001F_FFFF
    }

    /// 19-bit immediate of the PC-relative type-1 form (bits 18..0)
    #[inline(always)]
    pub fn imm19(&self) -> u32 {
        self.raw & 0x0007_FFFF
    }

    /// 26-bit jump target field (bits 25..0)
    #[inline(always)]
    pub fn jump_target(&self) -> u32 {
        self.raw & 0x03FF_FFFF
    }

    /// BSHFL function field (bits 10..6)
    #[inline(always)]
    pub fn bshfl_funct(&self) -> u8 {
        self.shamt()
    }

    /// msbd field of EXT (bits 15..11)
    #[inline(always)]
    pub fn ext_msbd(&self) -> u8 {
        self.rd()
    }

    /// msb field of INS (bits 15..11)
    #[inline(always)]
    pub fn ins_msb(&self) -> u8 {
        self.rd()
    }

    /// lsb field of EXT/INS (bits 10..6)
    #[inline(always)]
    pub fn bitfield_lsb(&self) -> u8 {
        self.shamt()
    }

    /// REGIMM sub-opcode (bits 20..16)
    #[inline(always)]
    pub fn regimm_op(&self) -> u8 {
        self.rt()
    }

    /// PC-relative type-1 function (bits 20..19)
    #[inline(always)]
    pub fn pcrel_funct1(&self) -> u8 {
        ((self.raw >> 19) & 0x3) as u8
    }

    /// PC-relative type-2 function (bits 20..16)
    #[inline(always)]
    pub fn pcrel_funct2(&self) -> u8 {
        self.rt()
    }

    /// Determine the instruction family of this word
    ///
    /// # Returns
    /// The [`InstructionType`], or
    /// [`EmulatorError::ReservedInstruction`] if the word does not belong
    /// to any known encoding.
    pub fn classify(&self) -> Result<InstructionType> {
        match self.op() {
            opcode::SPECIAL => Ok(InstructionType::RType),

            opcode::REGIMM => Ok(InstructionType::RegimmIType),

            opcode::J | opcode::JAL | opcode::BC | opcode::BALC => Ok(InstructionType::JType),

            opcode::SPECIAL3 => match self.funct() {
                special3::EXT => Ok(InstructionType::Special3Ext),
                special3::INS => Ok(InstructionType::Special3Ins),
                special3::BSHFL => Ok(InstructionType::Special3Bshfl),
                _ => Err(EmulatorError::ReservedInstruction { word: self.raw }),
            },

            opcode::PCREL => match self.pcrel_funct2() {
                pcrel::AUIPC | pcrel::ALUIPC => Ok(InstructionType::PcRelType2),
                _ => match self.pcrel_funct1() {
                    pcrel::ADDIUPC | pcrel::LWPC => Ok(InstructionType::PcRelType1),
                    _ => Err(EmulatorError::ReservedInstruction { word: self.raw }),
                },
            },

            opcode::COP1 => match self.rs() {
                fpu::MFC1 | fpu::CFC1 | fpu::MFHC1 | fpu::MTC1 | fpu::CTC1 | fpu::MTHC1 => {
                    Ok(InstructionType::FpuTType)
                }
                fpu::BC1EQZ | fpu::BC1NEZ => Ok(InstructionType::FpuBType),
                fpu::FMT_S | fpu::FMT_D | fpu::FMT_W | fpu::FMT_L => Ok(InstructionType::FpuRType),
                _ => Err(EmulatorError::ReservedInstruction { word: self.raw }),
            },

            // JIC/JIALC read a 16-bit immediate; BEQZC/BNEZC the 21-bit form
            opcode::POP66 | opcode::POP76 => {
                if self.rs() == 0 {
                    Ok(InstructionType::IType)
                } else {
                    Ok(InstructionType::LongImmIType)
                }
            }

            opcode::BEQ
            | opcode::BNE
            | opcode::POP06
            | opcode::POP07
            | opcode::POP10
            | opcode::ADDIU
            | opcode::SLTI
            | opcode::SLTIU
            | opcode::ANDI
            | opcode::ORI
            | opcode::XORI
            | opcode::AUI
            | opcode::POP26
            | opcode::POP27
            | opcode::POP30
            | opcode::LB
            | opcode::LH
            | opcode::LW
            | opcode::LBU
            | opcode::LHU
            | opcode::SB
            | opcode::SH
            | opcode::SW => Ok(InstructionType::IType),

            _ => Err(EmulatorError::ReservedInstruction { word: self.raw }),
        }
    }

    // === Encode constructors ===

    /// Encode a SPECIAL register-register instruction
    pub fn rtype(funct: u8, rd: u8, rs: u8, rt: u8, shamt: u8) -> Self {
        Self::new(
            ((rs as u32 & 0x1F) << 21)
                | ((rt as u32 & 0x1F) << 16)
                | ((rd as u32 & 0x1F) << 11)
                | ((shamt as u32 & 0x1F) << 6)
                | (funct as u32 & 0x3F),
        )
    }

    /// Encode an immediate instruction
    pub fn itype(op: u8, rt: u8, rs: u8, imm: u16) -> Self {
        Self::new(
            ((op as u32 & 0x3F) << 26)
                | ((rs as u32 & 0x1F) << 21)
                | ((rt as u32 & 0x1F) << 16)
                | imm as u32,
        )
    }

    /// Encode a long-immediate instruction (21-bit immediate)
    pub fn itype_long(op: u8, rs: u8, imm: u32) -> Self {
        Self::new(((op as u32 & 0x3F) << 26) | ((rs as u32 & 0x1F) << 21) | (imm & 0x001F_FFFF))
    }

    /// Encode a jump instruction (26-bit target)
    pub fn jtype(op: u8, target: u32) -> Self {
        Self::new(((op as u32 & 0x3F) << 26) | (target & 0x03FF_FFFF))
    }

    /// Encode a REGIMM branch instruction
    pub fn regimm(sub_op: u8, rs: u8, imm: u16) -> Self {
        Self::new(
            ((opcode::REGIMM as u32) << 26)
                | ((rs as u32 & 0x1F) << 21)
                | ((sub_op as u32 & 0x1F) << 16)
                | imm as u32,
        )
    }

    /// Encode a SPECIAL3 BSHFL instruction
    pub fn bshfl(funct: u8, rd: u8, rs: u8, rt: u8) -> Self {
        Self::new(
            ((opcode::SPECIAL3 as u32) << 26)
                | ((rs as u32 & 0x1F) << 21)
                | ((rt as u32 & 0x1F) << 16)
                | ((rd as u32 & 0x1F) << 11)
                | ((funct as u32 & 0x1F) << 6)
                | special3::BSHFL as u32,
        )
    }

    /// Encode EXT: extract `size` bits starting at bit `pos` of rs into rt
    ///
    /// Requires `1 <= size` and `pos + size <= 32`.
    pub fn ext(rt: u8, rs: u8, pos: u8, size: u8) -> Self {
        Self::new(
            ((opcode::SPECIAL3 as u32) << 26)
                | ((rs as u32 & 0x1F) << 21)
                | ((rt as u32 & 0x1F) << 16)
                | (((size as u32 - 1) & 0x1F) << 11)
                | ((pos as u32 & 0x1F) << 6)
                | special3::EXT as u32,
        )
    }

    /// Encode INS: insert the low `size` bits of rs at bit `pos` of rt
    ///
    /// Requires `1 <= size` and `pos + size <= 32`.
    pub fn ins(rt: u8, rs: u8, pos: u8, size: u8) -> Self {
        let msb = pos as u32 + size as u32 - 1;
        Self::new(
            ((opcode::SPECIAL3 as u32) << 26)
                | ((rs as u32 & 0x1F) << 21)
                | ((rt as u32 & 0x1F) << 16)
                | ((msb & 0x1F) << 11)
                | ((pos as u32 & 0x1F) << 6)
                | special3::INS as u32,
        )
    }

    /// Encode a PC-relative type-1 instruction (19-bit immediate)
    pub fn pcrel19(funct: u8, rs: u8, imm: u32) -> Self {
        Self::new(
            ((opcode::PCREL as u32) << 26)
                | ((rs as u32 & 0x1F) << 21)
                | ((funct as u32 & 0x3) << 19)
                | (imm & 0x0007_FFFF),
        )
    }

    /// Encode a PC-relative type-2 instruction (16-bit immediate)
    pub fn pcrel16(funct: u8, rs: u8, imm: u16) -> Self {
        Self::new(
            ((opcode::PCREL as u32) << 26)
                | ((rs as u32 & 0x1F) << 21)
                | ((funct as u32 & 0x1F) << 16)
                | imm as u32,
        )
    }

    /// Encode an FPU arithmetic instruction
    pub fn fpu_rtype(fmt: u8, ft: u8, fs: u8, fd: u8, funct: u8) -> Self {
        Self::new(
            ((opcode::COP1 as u32) << 26)
                | ((fmt as u32 & 0x1F) << 21)
                | ((ft as u32 & 0x1F) << 16)
                | ((fs as u32 & 0x1F) << 11)
                | ((fd as u32 & 0x1F) << 6)
                | (funct as u32 & 0x3F),
        )
    }

    /// Encode an FPU transfer instruction (MFC1/MTC1/CFC1/...)
    pub fn fpu_ttype(sub_op: u8, rt: u8, fs: u8) -> Self {
        Self::new(
            ((opcode::COP1 as u32) << 26)
                | ((sub_op as u32 & 0x1F) << 21)
                | ((rt as u32 & 0x1F) << 16)
                | ((fs as u32 & 0x1F) << 11),
        )
    }

    /// Encode an FPU branch instruction (BC1EQZ/BC1NEZ)
    pub fn fpu_btype(sub_op: u8, ft: u8, offset: u16) -> Self {
        Self::new(
            ((opcode::COP1 as u32) << 26)
                | ((sub_op as u32 & 0x1F) << 21)
                | ((ft as u32 & 0x1F) << 16)
                | offset as u32,
        )
    }
}
