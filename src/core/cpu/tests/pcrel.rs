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

use super::super::executor::{pcrel as handler, step};
use super::super::instruction::{pcrel, Instruction};
use super::super::{reg, RegisterFile};
use crate::core::memory::{Memory, Ram};

#[test]
fn test_addiupc() {
    let mut reg_file = RegisterFile::new();
    let ram = Ram::new(64);

    handler::execute_type1(
        Instruction::pcrel19(pcrel::ADDIUPC, reg::T0, 0x10),
        0x1000,
        &mut reg_file,
        &ram,
    )
    .unwrap();
    assert_eq!(reg_file.get(reg::T0).u, 0x1040);
}

#[test]
fn test_addiupc_negative_offset() {
    let mut reg_file = RegisterFile::new();
    let ram = Ram::new(64);

    // All-ones immediate is -1, scaled by 4
    handler::execute_type1(
        Instruction::pcrel19(pcrel::ADDIUPC, reg::T0, 0x7_FFFF),
        0x1000,
        &mut reg_file,
        &ram,
    )
    .unwrap();
    assert_eq!(reg_file.get(reg::T0).u, 0x0FFC);
}

#[test]
fn test_lwpc() {
    let mut reg_file = RegisterFile::new();
    let mut ram = Ram::new(256);

    ram.write32(0x50, 0xCAFE_F00D).unwrap();

    handler::execute_type1(
        Instruction::pcrel19(pcrel::LWPC, reg::T0, 0x10),
        0x10,
        &mut reg_file,
        &ram,
    )
    .unwrap();
    assert_eq!(reg_file.get(reg::T0).u, 0xCAFE_F00D);
}

#[test]
fn test_lwpc_fault_propagates() {
    let mut reg_file = RegisterFile::new();
    let ram = Ram::new(64);

    let result = handler::execute_type1(
        Instruction::pcrel19(pcrel::LWPC, reg::T0, 0x10),
        0x1000,
        &mut reg_file,
        &ram,
    );
    assert!(result.is_err());
}

#[test]
fn test_auipc() {
    let mut reg_file = RegisterFile::new();

    handler::execute_type2(
        Instruction::pcrel16(pcrel::AUIPC, reg::T0, 0x1234),
        0x0000_5678,
        &mut reg_file,
    )
    .unwrap();
    assert_eq!(reg_file.get(reg::T0).u, 0x1234_5678);
}

#[test]
fn test_aluipc() {
    let mut reg_file = RegisterFile::new();

    handler::execute_type2(
        Instruction::pcrel16(pcrel::ALUIPC, reg::T0, 0x1234),
        0x0000_5678,
        &mut reg_file,
    )
    .unwrap();

    // Low 16 bits cleared
    assert_eq!(reg_file.get(reg::T0).u, 0x1234_0000);
}

#[test]
fn test_pcrel_base_is_instruction_address() {
    // Through a full step the base must be where the word was fetched,
    // not the updated PC
    let mut reg_file = RegisterFile::new();
    let mut ram = Ram::new(256);

    reg_file.set_pc(0x80);
    ram.write32(
        0x80,
        Instruction::pcrel19(pcrel::ADDIUPC, reg::T0, 0x4).raw(),
    )
    .unwrap();

    step(&mut reg_file, &mut ram).unwrap();

    assert_eq!(reg_file.get(reg::T0).u, 0x80 + 0x10);
    assert_eq!(reg_file.pc(), 0x84);
}
