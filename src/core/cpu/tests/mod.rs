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

//! CPU test modules
//!
//! Tests are organized into the following categories:
//! - `basic`: Register file state, zero register, PC and delay slot
//! - `decode`: Instruction encodings and family classification
//! - `rtype`: SPECIAL instructions (arithmetic, shifts, traps, jumps)
//! - `itype`: Immediate instructions, loads/stores, POP branch families
//! - `jtype_regimm`: J/JAL/BC/BALC and the REGIMM branches
//! - `special3`: BSHFL and the EXT/INS bit-field instructions
//! - `pcrel`: PC-relative address calculation instructions
//! - `step`: Fetch, dispatch, and whole-step behaviour







#[cfg(test)]
mod pcrel;
