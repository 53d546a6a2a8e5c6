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

//! Whole-program integration tests
//!
//! Each test assembles a small word program, drives `step` until a halt
//! instruction traps, and asserts the final architectural state. Programs
//! are halted with `teq $zero, $zero`, which always fires.

mod common;

use common::fixtures::{create_machine, execute_until_fault, load_test_program};
use ridge_core::core::cpu::executor::step;
use ridge_core::core::cpu::instruction::{func, opcode, regimm, Instruction};
use ridge_core::core::cpu::{reg, ExceptionCause, RegisterFile};
use ridge_core::core::memory::{Memory, Ram};

/// `teq $zero, $zero`: unconditional trap used to end programs
fn halt() -> u32 {
    Instruction::rtype(func::TEQ, reg::ZERO, reg::ZERO, reg::ZERO, 0).raw()
}

fn nop() -> u32 {
    0
}

#[test]
fn test_basic_initialization() {
    let (reg_file, ram) = create_machine();

    assert_eq!(reg_file.pc(), 0);
    assert_eq!(ram.size(), Ram::DEFAULT_SIZE);
}

#[test]
fn test_counting_loop_with_delay_slots() {
    let (mut reg_file, mut ram) = create_machine();

    // Sum 5 + 4 + 3 + 2 + 1 with a legacy bne loop
    let program = [
        Instruction::itype(opcode::ADDIU, reg::T0, reg::ZERO, 0).raw(),
        Instruction::itype(opcode::ADDIU, reg::T1, reg::ZERO, 5).raw(),
        // loop:
        Instruction::rtype(func::ADDU, reg::T0, reg::T0, reg::T1, 0).raw(),
        Instruction::itype(opcode::ADDIU, reg::T1, reg::T1, 0xFFFF).raw(),
        Instruction::itype(opcode::BNE, reg::ZERO, reg::T1, 0xFFFD).raw(),
        nop(), // delay slot
        halt(),
    ];
    load_test_program(&mut ram, 0, &program);

    let executed = execute_until_fault(&mut reg_file, &mut ram, 100);

    assert_eq!(reg_file.get(reg::T0).s, 15);
    assert_eq!(reg_file.get(reg::T1).s, 0);
    // 2 setup instructions + 5 iterations of 4
    assert_eq!(executed, 22);
    assert_eq!(
        reg_file.exception().map(|e| e.cause),
        Some(ExceptionCause::Trap)
    );
}

#[test]
fn test_counting_loop_with_compact_branch() {
    let (mut reg_file, mut ram) = create_machine();

    // The same loop with bnezc: no delay slot to fill
    let program = [
        Instruction::itype(opcode::ADDIU, reg::T0, reg::ZERO, 0).raw(),
        Instruction::itype(opcode::ADDIU, reg::T1, reg::ZERO, 5).raw(),
        // loop:
        Instruction::rtype(func::ADDU, reg::T0, reg::T0, reg::T1, 0).raw(),
        Instruction::itype(opcode::ADDIU, reg::T1, reg::T1, 0xFFFF).raw(),
        Instruction::itype_long(opcode::POP76, reg::T1, 0x1F_FFFD).raw(),
        halt(),
    ];
    load_test_program(&mut ram, 0, &program);

    execute_until_fault(&mut reg_file, &mut ram, 100);

    assert_eq!(reg_file.get(reg::T0).s, 15);
    assert_eq!(reg_file.get(reg::T1).s, 0);
}

#[test]
fn test_subroutine_call_and_return() {
    let (mut reg_file, mut ram) = create_machine();

    // Call a subroutine at 0x40 that sets $v0, then return. The link
    // register holds the delay-slot address, so the slot runs again on
    // the way out before the halt is reached.
    let program = [
        Instruction::jtype(opcode::JAL, 0x40 >> 2).raw(),
        Instruction::itype(opcode::ADDIU, reg::T3, reg::T3, 1).raw(), // delay slot
        halt(),
    ];
    load_test_program(&mut ram, 0, &program);

    let subroutine = [
        Instruction::itype(opcode::ADDIU, reg::V0, reg::ZERO, 99).raw(),
        Instruction::rtype(func::JR, reg::ZERO, reg::RA, reg::ZERO, 0).raw(),
        nop(), // delay slot
    ];
    load_test_program(&mut ram, 0x40, &subroutine);

    execute_until_fault(&mut reg_file, &mut ram, 100);

    assert_eq!(reg_file.get(reg::V0).u, 99);
    assert_eq!(reg_file.get(reg::RA).u, 0x04);
    assert_eq!(reg_file.get(reg::T3).u, 2);
}

#[test]
fn test_store_load_round_trip_program() {
    let (mut reg_file, mut ram) = create_machine();

    // Build 0x12345678 in $t1, store it, and read slices back
    let program = [
        Instruction::itype(opcode::ADDIU, reg::T0, reg::ZERO, 0x200).raw(),
        Instruction::itype(opcode::AUI, reg::T1, reg::ZERO, 0x1234).raw(),
        Instruction::itype(opcode::ORI, reg::T1, reg::T1, 0x5678).raw(),
        Instruction::itype(opcode::SW, reg::T1, reg::T0, 0).raw(),
        Instruction::itype(opcode::LHU, reg::T2, reg::T0, 0).raw(),
        Instruction::itype(opcode::LB, reg::T3, reg::T0, 3).raw(),
        halt(),
    ];
    load_test_program(&mut ram, 0, &program);

    execute_until_fault(&mut reg_file, &mut ram, 100);

    assert_eq!(ram.read32(0x200).unwrap(), 0x1234_5678);
    assert_eq!(reg_file.get(reg::T2).u, 0x5678);
    assert_eq!(reg_file.get(reg::T3).u, 0x12);
}

#[test]
fn test_bgez_guarded_absolute_value() {
    let (mut reg_file, mut ram) = create_machine();

    // abs($t0): skip the negation when the value is already non-negative
    let program = [
        Instruction::regimm(regimm::BGEZ, reg::T0, 2).raw(),
        nop(), // delay slot
        Instruction::rtype(func::SUB, reg::T0, reg::ZERO, reg::T0, 0).raw(),
        halt(),
    ];
    load_test_program(&mut ram, 0, &program);

    reg_file.set_signed(reg::T0, -42);
    execute_until_fault(&mut reg_file, &mut ram, 100);
    assert_eq!(reg_file.get(reg::T0).s, 42);

    let mut reg_file = RegisterFile::new();
    reg_file.set_signed(reg::T0, 17);
    execute_until_fault(&mut reg_file, &mut ram, 100);
    assert_eq!(reg_file.get(reg::T0).s, 17);
}

#[test]
fn test_branch_into_unmapped_memory_faults_on_next_step() {
    let (mut reg_file, mut ram) = create_machine();

    reg_file.set_unsigned(reg::T0, 0xF000_0000);
    load_test_program(
        &mut ram,
        0,
        &[
            Instruction::rtype(func::JR, reg::ZERO, reg::T0, reg::ZERO, 0).raw(),
            nop(),
        ],
    );

    // The jump itself and its delay slot execute fine
    step(&mut reg_file, &mut ram).unwrap();
    step(&mut reg_file, &mut ram).unwrap();
    assert_eq!(reg_file.pc(), 0xF000_0000);

    // The fetch from the bad target fails
    assert!(step(&mut reg_file, &mut ram).is_err());
}
