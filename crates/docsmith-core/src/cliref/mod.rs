//! CLI command-reference compiler
//!
//! A separate driver in the same compiler family: it consumes a command
//! registry plus free-text help output from the external CLI binary and
//! emits one reference document. Generated content sits between literal
//! markers so hand-written trailing sections survive regeneration
//! byte-for-byte.
//!
//! Copyright (c) 2025 Docsmith Team
//! Licensed under the Apache-2.0 license

pub mod help;
pub mod reference;
pub mod registry;
pub mod runner;

pub use help::{parse_help, HelpOption, ParsedHelp};
pub use reference::{
    compile_reference, manual_section, merge_generated, CommandDoc, ReferenceOptions,
    GENERATED_END, GENERATED_START,
};
pub use registry::{load_registry, CommandRegistry, CommandSpec, HarnessSpec, TestInvocation};
pub use runner::{CommandOutput, CommandRunner, ProcessRunner};
