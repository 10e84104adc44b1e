// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::{HashMap, HashSet};

/// Prefix every option name starts with.
pub const OPTION_PREFIX: &str = "--";

/// Whether an option stands alone or takes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Consumes no following tokens.
    Flag,
    /// Consumes every following token up to the next option.
    Value,
}

/// An option accepted by a sub-command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub kind: OptionKind,
}

impl OptionSpec {
    pub const fn flag(name: &'static str) -> Self {
        Self {
            name,
            kind: OptionKind::Flag,
        }
    }

    pub const fn value(name: &'static str) -> Self {
        Self {
            name,
            kind: OptionKind::Value,
        }
    }
}

/// Malformed option usage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Duplicate option: {0}")]
    DuplicateOption(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),
}

/// Options read from the tokens following a sub-command.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Options {
    values: HashMap<&'static str, String>,
    flags: HashSet<&'static str>,
}

impl Options {
    /// Reads `tokens` left to right against `specs`.
    ///
    /// Value options take all following tokens without the option prefix, joined with
    /// single spaces, so `--title Meeting with Luke` reads as one title.
    pub fn read<S: AsRef<str>>(tokens: &[S], specs: &[OptionSpec]) -> Result<Self, TokenError> {
        let mut options = Self::default();
        let mut tokens = tokens.iter().map(AsRef::<str>::as_ref).peekable();

        while let Some(token) = tokens.next() {
            if !token.starts_with(OPTION_PREFIX) {
                return Err(TokenError::UnexpectedArgument(token.to_string()));
            }

            let spec = specs
                .iter()
                .find(|a| a.name == token)
                .ok_or_else(|| TokenError::UnknownOption(token.to_string()))?;

            if options.has(spec.name) {
                return Err(TokenError::DuplicateOption(spec.name.to_string()));
            }

            match spec.kind {
                OptionKind::Flag => {
                    options.flags.insert(spec.name);
                }
                OptionKind::Value => {
                    let mut chunks = Vec::new();
                    while let Some(chunk) = tokens.next_if(|a| !a.starts_with(OPTION_PREFIX)) {
                        chunks.push(chunk);
                    }

                    if chunks.is_empty() {
                        return Err(TokenError::MissingValue(spec.name.to_string()));
                    }
                    options.values.insert(spec.name, chunks.join(" "));
                }
            }
        }

        Ok(options)
    }

    /// The raw value of a value option, if it was given.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Whether a flag was given.
    pub fn flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    /// Whether an option of either kind was given.
    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name) || self.flags.contains(name)
    }
}
