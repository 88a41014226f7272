use std::path::PathBuf;

use crate::AclError;

/// Trait Extension of `Result<T, AclError>` and `AclError` to add info
pub trait AclErrorExt<T> {
    fn with_path(self, path: impl Fn(&AclError) -> PathBuf) -> T;
    fn with_note(self, note: impl Fn(&AclError) -> String) -> T;
}

impl<T> AclErrorExt<Result<T, AclError>> for Result<T, AclError> {
    fn with_path(self, path: impl Fn(&AclError) -> PathBuf) -> Result<T, AclError> {
        match self {
            Ok(e) => Ok(e),
            Err(e) => Err(e.with_path(path)),
        }
    }

    fn with_note(self, note: impl Fn(&AclError) -> String) -> Result<T, AclError> {
        match self {
            Ok(e) => Ok(e),
            Err(e) => Err(e.with_note(note)),
        }
    }
}

impl AclErrorExt<AclError> for AclError {
    fn with_path(mut self, path: impl Fn(&AclError) -> PathBuf) -> AclError {
        self.path = Some(path(&self));
        self
    }

    fn with_note(mut self, note: impl Fn(&AclError) -> String) -> AclError {
        let note = note(&self);
        self.notes.push(note);
        self
    }
}
