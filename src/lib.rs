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

//! MIPS32 Release 6 interpreter core library
//!
//! This library provides the user-mode integer execution core of a
//! MIPS32r6 interpreter: a register file, an abstract memory interface,
//! a typed instruction word, and a single-step executor.
//!
//! # Example
//!
//! ```
//! use ridge_core::core::cpu::executor::step;
//! use ridge_core::core::cpu::{reg, RegisterFile};
//! use ridge_core::core::memory::{Memory, Ram};
//!
//! let mut reg_file = RegisterFile::new();
//! let mut ram = Ram::with_default_size();
//!
//! // addiu $t0, $zero, 42
//! ram.write32(0x0000_0000, 0x2408_002A).unwrap();
//!
//! step(&mut reg_file, &mut ram).unwrap();
//! assert_eq!(reg_file.get(reg::T0).u, 42);
//! ```

pub mod core;
