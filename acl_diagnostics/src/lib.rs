use std::{sync::RwLock, vec};

use std::io::Write;

use acl_error::{AclError, ErrorLevel};
use ansi_term::Colour::Red;

pub struct Diagnostics {
    stages: RwLock<Vec<Vec<AclError>>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            stages: RwLock::new(vec![Vec::new()]),
        }
    }

    pub fn finish_stage(&self) -> Result<(), ()> {
        let fatal = self
            .stages
            .read()
            .unwrap()
            .last()
            .unwrap()
            .iter()
            .any(|e| e.level() == ErrorLevel::Error);

        if fatal {
            self.flush().unwrap();
            Err(())
        } else {
            self.stages.write().unwrap().push(Default::default());
            Ok(())
        }
    }

    pub fn push_error(&self, error: AclError) {
        self.stages
            .write()
            .unwrap()
            .last_mut()
            .unwrap()
            .push(error);
    }

    fn flush(&self) -> std::io::Result<()> {
        let stdout = std::io::stdout();
        let mut f = stdout.lock();

        let mut total_fatal = 0;
        for stage in self.stages.write().unwrap().iter_mut() {
            for err in stage.drain(..) {
                if err.level() == ErrorLevel::Error {
                    total_fatal += 1;
                }
                writeln!(f, "{}", err)?;
            }
        }

        writeln!(
            f,
            "{}: Stopped due to {} error{}",
            Red.paint("Error"),
            total_fatal,
            if total_fatal > 1 { "s" } else { "" }
        )?;

        Ok(())
    }
}

#[cfg(test)]
pub mod test {
    use acl_error::{AclError, ErrorLevel};

    use crate::Diagnostics;

    #[test]
    pub fn stage_passes_without_fatal_errors() {
        let diag = Diagnostics::new();
        diag.push_error(AclError::new(ErrorLevel::Note, "just a note"));
        diag.push_error(AclError::new(ErrorLevel::Warning, "a warning"));

        assert_eq!(diag.finish_stage(), Ok(()));
    }

    #[test]
    pub fn stage_fails_with_a_fatal_error() {
        let diag = Diagnostics::new();
        diag.push_error(AclError::new(ErrorLevel::Warning, "a warning"));
        diag.push_error(AclError::new(ErrorLevel::Error, "fatal"));

        assert_eq!(diag.finish_stage(), Err(()));
    }

    #[test]
    pub fn errors_accumulate_across_stages() {
        let diag = Diagnostics::new();
        diag.push_error(AclError::new(ErrorLevel::Note, "first stage"));
        assert_eq!(diag.finish_stage(), Ok(()));

        diag.push_error(AclError::new(ErrorLevel::Error, "second stage"));
        assert_eq!(diag.finish_stage(), Err(()));
    }
}
