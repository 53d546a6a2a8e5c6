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

//! Core interpreter components
//!
//! This module contains the architectural pieces of the interpreter:
//! - CPU (register file, instruction word, single-step executor)
//! - Memory interface (byte-addressable contract plus a flat RAM)
//! - Error types shared by all of the above

pub mod cpu;
pub mod error;
pub mod memory;

// Re-export commonly used types
pub use cpu::executor::step;
pub use cpu::instruction::{Instruction, InstructionType};
pub use cpu::{Exception, ExceptionCause, Register, RegisterFile};
pub use error::{EmulatorError, Result};
pub use memory::{Memory, Ram};
