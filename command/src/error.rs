// terrapin/command/src/error.rs
//
// Copyright © 2020 The Terrapin Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The error taxonomy shared by every dispatch tier.

use crate::Command;
use std::io;
use thiserror::Error;

/// Everything that can go wrong between reading a command line and
/// finishing its execution. No variant is fatal to the engine loop.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The target exposes no operation for this verb and argument count.
    #[error("invalid command: {0}")]
    InvalidCommand(Command),

    /// The verb exists but an argument was unusable, or 3+ arguments
    /// were supplied.
    #[error("invalid argument: {0}")]
    InvalidArgument(Command),

    /// A script file could not be located under the data root.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// A script file was found but could not be read.
    #[error("failed to read {filename}: {source}")]
    IoFailure {
        filename: String,
        #[source]
        source: io::Error,
    },
}

impl CommandError {
    pub fn invalid_command(command: &Command) -> CommandError {
        CommandError::InvalidCommand(command.clone())
    }

    pub fn invalid_argument(command: &Command) -> CommandError {
        CommandError::InvalidArgument(command.clone())
    }

    pub fn file_not_found(filename: impl Into<String>) -> CommandError {
        CommandError::FileNotFound(filename.into())
    }

    pub fn io_failure(filename: impl Into<String>, source: io::Error) -> CommandError {
        CommandError::IoFailure {
            filename: filename.into(),
            source,
        }
    }

    /// The command that triggered the failure, when there was one.
    pub fn command(&self) -> Option<&Command> {
        match self {
            CommandError::InvalidCommand(command) => Some(command),
            CommandError::InvalidArgument(command) => Some(command),
            _ => None,
        }
    }

    /// The filename involved in a file-related failure.
    pub fn filename(&self) -> Option<&str> {
        match self {
            CommandError::FileNotFound(filename) => Some(filename),
            CommandError::IoFailure { filename, .. } => Some(filename),
            _ => None,
        }
    }
}
