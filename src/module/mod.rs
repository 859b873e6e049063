//! Module records and their pulse-update state machines.
//!
//! Modules never share state. Everything a module knows arrives as a
//! pulse from a caller, and everything it does leaves as a pulse to its
//! destinations.
//!
//! # Module structure
//!
//! | Sub-module | Contents |
//! |---|---|
//! | [`id`] | [`ModuleId`] newtype |
//! | [`gate`] | [`GateMemory`], [`InputMemory`] |
//! | [`kind`] | [`Module`] record + [`ModuleKind`] update rules |

pub mod gate;
pub mod id;
pub mod kind;

pub use gate::{GateMemory, InputMemory};
pub use id::ModuleId;
pub use kind::{Module, ModuleKind};
