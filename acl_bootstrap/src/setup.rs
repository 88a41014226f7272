use std::{
    fs,
    path::{Path, PathBuf},
};

use acl_config::AclConfig;
use acl_error::{ext::AclErrorExt, AclError, AclResult, ErrorLevel};
use anyhow::{anyhow, Result};
use clap::Args;
use glob::glob;
use log::info;

use crate::cli::CommandTrait;

#[derive(Debug, Args)]
pub struct Setup {
    /// Override the standard library source directory
    #[arg(long)]
    pub lib_dir: Option<PathBuf>,
    /// Mirror the source directory structure instead of flattening it
    #[arg(long)]
    pub preserve_tree: bool,
}

impl CommandTrait for Setup {
    type In = ();
    type Out = ();

    fn execute(&mut self, _: ()) -> Result<()> {
        let config = AclConfig::load(Path::new(".")).map_err(|e| anyhow!("{}", e))?;

        let home = homedir::my_home()
            .map_err(|e| anyhow!("Could not resolve the home directory: {}", e))?
            .ok_or_else(|| anyhow!("No home directory for the current user"))?;
        let dest = home.join(&config.setup.dest_suffix);

        let lib_dir = self
            .lib_dir
            .clone()
            .unwrap_or_else(|| config.setup.lib_dir.clone());

        let copied = install_std(&lib_dir, &dest, self.preserve_tree)
            .map_err(|e| anyhow!("{}", e))?;

        info!(
            "Installed {} file{} into {:?}",
            copied,
            if copied == 1 { "" } else { "s" },
            dest
        );
        Ok(())
    }
}

/// Copy every file below `lib_dir` into `dest`. The default mode flattens the
/// tree onto file basenames, so a later file wins over an earlier one with the
/// same name. `preserve_tree` mirrors the tree instead, replacing whatever was
/// installed before.
pub fn install_std(lib_dir: &Path, dest: &Path, preserve_tree: bool) -> AclResult<usize> {
    if preserve_tree {
        _ = fs::remove_dir_all(dest);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error(e, parent))?;
        }
        let skipped = copy_dir::copy_dir(lib_dir, dest).map_err(|e| {
            AclError::new(ErrorLevel::Error, "Failed to mirror the standard library")
                .with_path(|_| lib_dir.to_path_buf())
                .with_note(|_| e.to_string())
        })?;
        if let Some(e) = skipped.first() {
            return Err(
                AclError::new(ErrorLevel::Error, "Failed to mirror the standard library")
                    .with_path(|_| lib_dir.to_path_buf())
                    .with_note(|_| e.to_string()),
            );
        }
        return Ok(library_files(dest)?.len());
    }

    fs::create_dir_all(dest).map_err(|e| io_error(e, dest))?;

    let mut copied = 0;
    for src in library_files(lib_dir)? {
        let Some(name) = src.file_name() else {
            continue;
        };
        let target = dest.join(name);
        info!("Copying {:?} to {:?}", src, target);

        let contents = fs::read_to_string(&src).map_err(|e| io_error(e, &src))?;
        fs::write(&target, contents).map_err(|e| io_error(e, &target))?;
        copied += 1;
    }

    Ok(copied)
}

/// Every file below `root`, in deterministic traversal order.
fn library_files(root: &Path) -> AclResult<Vec<PathBuf>> {
    let pattern = format!("{}/**/*", root.display());

    let mut files = Vec::new();
    for entry in glob(&pattern).map_err(|e| {
        AclError::new(ErrorLevel::Error, "Invalid library directory")
            .with_path(|_| root.to_path_buf())
            .with_note(|_| e.to_string())
    })? {
        if let Ok(path) = entry {
            if path.is_file() {
                files.push(path);
            }
        }
    }

    Ok(files)
}

fn io_error(e: std::io::Error, path: &Path) -> AclError {
    AclError::new(ErrorLevel::Error, "Failed to copy the standard library")
        .with_path(|_| path.to_path_buf())
        .with_note(|_| e.to_string())
}

#[cfg(test)]
pub mod test {
    use std::fs;
    use std::path::Path;

    use crate::setup::install_std;

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    pub fn flattens_onto_basenames() {
        let root = tempfile::tempdir().unwrap();
        let lib = root.path().join("lib");
        let dest = root.path().join("dest");
        write(&lib.join("a.acl"), "root copy");
        write(&lib.join("sub/a.acl"), "nested copy");

        let copied = install_std(&lib, &dest, false).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(dest.read_dir().unwrap().count(), 1);
        // Traversal is lexicographic, so the nested file lands last
        assert_eq!(fs::read_to_string(dest.join("a.acl")).unwrap(), "nested copy");
    }

    #[test]
    pub fn rerun_overwrites_existing_files() {
        let root = tempfile::tempdir().unwrap();
        let lib = root.path().join("lib");
        let dest = root.path().join("dest");
        write(&lib.join("io.acl"), "v1");

        install_std(&lib, &dest, false).unwrap();
        write(&lib.join("io.acl"), "v2");
        install_std(&lib, &dest, false).unwrap();

        assert_eq!(fs::read_to_string(dest.join("io.acl")).unwrap(), "v2");
    }

    #[test]
    pub fn rerun_keeps_stale_files() {
        let root = tempfile::tempdir().unwrap();
        let lib = root.path().join("lib");
        let dest = root.path().join("dest");
        write(&lib.join("io.acl"), "v1");
        write(&dest.join("stale.acl"), "old");

        install_std(&lib, &dest, false).unwrap();

        assert!(dest.join("stale.acl").exists());
    }

    #[test]
    pub fn preserve_tree_mirrors_the_source() {
        let root = tempfile::tempdir().unwrap();
        let lib = root.path().join("lib");
        let dest = root.path().join("dest");
        write(&lib.join("a.acl"), "root copy");
        write(&lib.join("sub/a.acl"), "nested copy");

        let copied = install_std(&lib, &dest, true).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(dest.join("a.acl")).unwrap(), "root copy");
        assert_eq!(
            fs::read_to_string(dest.join("sub/a.acl")).unwrap(),
            "nested copy"
        );
    }

    #[test]
    pub fn non_text_file_aborts_the_run() {
        let root = tempfile::tempdir().unwrap();
        let lib = root.path().join("lib");
        let dest = root.path().join("dest");
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join("a.bin"), [0xff, 0xfe, 0x00, 0x01]).unwrap();
        write(&lib.join("z.acl"), "never copied");

        install_std(&lib, &dest, false).unwrap_err();

        assert!(!dest.join("z.acl").exists());
    }

    #[test]
    pub fn empty_library_copies_nothing() {
        let root = tempfile::tempdir().unwrap();
        let lib = root.path().join("lib");
        let dest = root.path().join("dest");
        fs::create_dir_all(&lib).unwrap();

        assert_eq!(install_std(&lib, &dest, false).unwrap(), 0);
        assert!(dest.is_dir());
    }
}
