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

//! Test fixtures for common test scenarios

use ridge_core::core::cpu::executor::step;
use ridge_core::core::cpu::RegisterFile;
use ridge_core::core::memory::{Memory, Ram};

/// Create a register file and RAM pair for testing
#[allow(dead_code)]
pub fn create_machine() -> (RegisterFile, Ram) {
    let _ = env_logger::builder().is_test(true).try_init();
    (RegisterFile::new(), Ram::with_default_size())
}

/// Load a word program into memory at the specified address
#[allow(dead_code)]
pub fn load_test_program(ram: &mut Ram, start_addr: u32, program: &[u32]) {
    for (i, &instruction) in program.iter().enumerate() {
        let addr = start_addr + (i as u32 * 4);
        ram.write32(addr, instruction)
            .expect("Failed to write to memory");
    }
}

/// Execute instructions until `step` fails or `limit` is reached,
/// returning the number of completed steps
#[allow(dead_code)]
pub fn execute_until_fault(reg_file: &mut RegisterFile, ram: &mut Ram, limit: usize) -> usize {
    for executed in 0..limit {
        if step(reg_file, ram).is_err() {
            return executed;
        }
    }
    limit
}

/// Execute exactly `n` instructions, panicking on any failure
#[allow(dead_code)]
pub fn execute_n_instructions(reg_file: &mut RegisterFile, ram: &mut Ram, n: usize) {
    for i in 0..n {
        step(reg_file, ram).unwrap_or_else(|e| panic!("step {} failed: {}", i, e));
    }
}
