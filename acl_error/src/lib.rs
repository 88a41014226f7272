use std::{fmt::Display, path::PathBuf};

use ansi_term::{
    Colour,
    Colour::{Blue, Red, White, Yellow},
};

pub mod ext;

pub type AclResult<T> = Result<T, AclError>;

#[derive(Debug, Clone)]
pub struct AclError {
    // Required
    level: ErrorLevel,
    message: String,

    // Optional
    path: Option<PathBuf>,
    notes: Vec<String>,
}

impl AclError {
    pub fn new(level: ErrorLevel, message: impl Display) -> Self {
        Self {
            level,
            message: message.to_string(),
            path: None,
            notes: Vec::new(),
        }
    }

    pub fn level(&self) -> ErrorLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn get_path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    pub fn get_notes(&self) -> &Vec<String> {
        self.notes.as_ref()
    }
}

impl std::fmt::Display for AclError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const HIGHLIGHT_COLOUR: Colour = Blue;

        // Write Message
        writeln!(f, "{}: {}", self.level(), self.message())?;

        // Output the path the error occurred at
        if let Some(path) = self.get_path() {
            writeln!(
                f,
                " {} {}",
                HIGHLIGHT_COLOUR.paint("-->"),
                path.to_string_lossy()
            )?;
        }

        for note in &self.notes {
            writeln!(f, "  {} {}", HIGHLIGHT_COLOUR.paint("= Note:"), note)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorLevel {
    Error,
    Warning,
    Note,
}

impl ErrorLevel {
    pub fn colour(&self) -> Colour {
        match self {
            ErrorLevel::Error => Red,
            ErrorLevel::Warning => Yellow,
            ErrorLevel::Note => White,
        }
    }
}

impl std::fmt::Display for ErrorLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorLevel::Error => "Error",
            ErrorLevel::Warning => "Warning",
            ErrorLevel::Note => "Note",
        };
        write!(f, "{}", self.colour().paint(s))
    }
}
