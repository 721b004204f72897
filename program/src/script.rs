// terrapin/program/src/script.rs
//
// Copyright © 2020 The Terrapin Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Script files: one instruction per line, located under a data root.

use std::fs;
use std::path::{Path, PathBuf};
use terrapin_command::{Command, CommandError};

/// Locates and reads command scripts by filename. The root defaults to the
/// conventional `data` folder next to the executable's working directory.
#[derive(Clone, Debug)]
pub struct ScriptReader {
    root: PathBuf,
}

impl ScriptReader {
    pub fn new() -> ScriptReader {
        ScriptReader {
            root: PathBuf::from("data"),
        }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> ScriptReader {
        ScriptReader { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads a script into an instruction list. Blank lines and lines whose
    /// first character is `#` are dropped at load time; everything else
    /// parses as a command.
    pub fn read(&self, filename: &str) -> Result<Vec<Command>, CommandError> {
        let path = self.root.join(filename);
        if !path.is_file() {
            return Err(CommandError::file_not_found(filename));
        }
        let text =
            fs::read_to_string(&path).map_err(|err| CommandError::io_failure(filename, err))?;

        let mut instructions = Vec::new();
        for line in text.lines() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            instructions.push(Command::from_line(line));
        }
        Ok(instructions)
    }
}

impl Default for ScriptReader {
    fn default() -> ScriptReader {
        ScriptReader::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn read_skips_blanks_and_comments() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("square.logo")).unwrap();
        writeln!(file, "# a square").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "fd 100 rt 90").unwrap();
        writeln!(file, "fd 100").unwrap();
        drop(file);

        let reader = ScriptReader::with_root(dir.path());
        let instructions = reader.read("square.logo").unwrap();
        assert_eq!(instructions.len(), 2);
        assert_eq!(instructions[0].verb(), Some("fd"));
        assert_eq!(instructions[0].args(), ["100", "rt", "90"]);
    }

    #[test]
    fn missing_file_reports_the_requested_name() {
        let dir = tempfile::tempdir().unwrap();
        let reader = ScriptReader::with_root(dir.path());
        match reader.read("nope.logo") {
            Err(CommandError::FileNotFound(name)) => assert_eq!(name, "nope.logo"),
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }
}
