// ============================================================================
// madmeasurer-core/src/mount.rs
// ============================================================================
//
// MOUNT SCOPE: Filesystem Access to Disc Content
//
// Several steps need the files of a disc: playlist sizes, disc.inf,
// measurement sidecars. A BDMV folder already is that filesystem root. An
// ISO image has to be mounted first, and must be released again on every
// exit path, which MountGuard does from Drop.
//
// Image mounting is implemented for Windows (PowerShell Mount-DiskImage).
// On other platforms images are never mounted and the guard has no root;
// anything that needs disc files is skipped for them.

use std::path::{Path, PathBuf};

use log::debug;

use crate::disc::is_image_path;

/// Scoped access to the content of one disc.
#[derive(Debug)]
pub struct MountGuard {
    /// Image to dismount on drop.
    mounted_image: Option<PathBuf>,
    root: Option<PathBuf>,
}

impl MountGuard {
    /// Makes the disc content reachable if `needed`.
    ///
    /// Folders are used in place. Images are mounted only when needed; a
    /// failed mount is logged and leaves the guard without a root.
    pub fn acquire(disc_path: &Path, needed: bool) -> Self {
        if !is_image_path(disc_path) {
            return Self {
                mounted_image: None,
                root: Some(disc_path.to_path_buf()),
            };
        }
        if !needed {
            debug!("{} does not need to be mounted", disc_path.display());
            return Self::unmounted();
        }
        Self::mount(disc_path)
    }

    fn unmounted() -> Self {
        Self {
            mounted_image: None,
            root: None,
        }
    }

    #[cfg(windows)]
    fn mount(image: &Path) -> Self {
        let image = std::path::absolute(image).unwrap_or_else(|_| image.to_path_buf());
        match windows::mount(&image) {
            Ok(root) => {
                if root.join("BDMV").join("index.bdmv").exists() {
                    log::info!("Mounted {} on {}", image.display(), root.display());
                    Self {
                        mounted_image: Some(image),
                        root: Some(root),
                    }
                } else {
                    log::error!("{} does not contain a BD folder", image.display());
                    Self {
                        mounted_image: Some(image),
                        root: None,
                    }
                }
            }
            Err(e) => {
                log::error!("Unable to mount {}: {}", image.display(), e);
                Self::unmounted()
            }
        }
    }

    #[cfg(not(windows))]
    fn mount(image: &Path) -> Self {
        log::warn!(
            "Mounting images is only supported on Windows, {} will be processed without disc files",
            image.display()
        );
        Self::unmounted()
    }

    /// Filesystem root of the disc content, if reachable.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Whether an image was mounted by this guard.
    pub fn is_mounted(&self) -> bool {
        self.mounted_image.is_some()
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        if let Some(image) = self.mounted_image.take() {
            release(&image);
        }
    }
}

#[cfg(windows)]
fn release(image: &Path) {
    match windows::dismount(image) {
        Ok(()) => log::info!("Dismounted {}", image.display()),
        Err(e) => log::error!("Unable to dismount {}: {}", image.display(), e),
    }
}

#[cfg(not(windows))]
fn release(image: &Path) {
    log::warn!("No dismount available for {}", image.display());
}

#[cfg(windows)]
mod windows {
    use std::path::{Path, PathBuf};
    use std::process::Command;

    use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};

    fn powershell(script: String) -> CoreResult<String> {
        log::debug!("Triggering : PowerShell {}", script);
        let output = Command::new("PowerShell")
            .arg(&script)
            .output()
            .map_err(|e| command_start_error(format!("PowerShell {script}"), e))?;
        if !output.status.success() {
            return Err(command_failed_error(
                format!("PowerShell {script}"),
                output.status,
                String::from_utf8_lossy(&output.stderr),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    pub(super) fn mount(image: &Path) -> CoreResult<PathBuf> {
        let letter = powershell(format!(
            "((Mount-DiskImage {} -PassThru) | Get-Volume).DriveLetter",
            image.display()
        ))?;
        if letter.is_empty() {
            return Err(CoreError::Mount(format!(
                "no drive letter assigned to {}",
                image.display()
            )));
        }
        Ok(PathBuf::from(format!("{letter}:\\")))
    }

    pub(super) fn dismount(image: &Path) -> CoreResult<()> {
        powershell(format!("Dismount-DiskImage {}", image.display())).map(|_| ())
    }
}
