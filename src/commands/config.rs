use anyhow::{Result, bail};
use log::debug;
use std::path::PathBuf;

use crate::runtime::Runtime;

/// Settings shared by every dump-reading command.
pub struct Config<R: Runtime> {
    pub runtime: R,
    pub dump_root: PathBuf,
}

impl<R: Runtime> Config<R> {
    /// Use `dump_root` if given (flag or `PKGREQ_DUMP`), else the current
    /// directory. The directory must exist.
    pub fn new(runtime: R, dump_root: Option<PathBuf>) -> Result<Self> {
        let dump_root = match dump_root {
            Some(path) => path,
            None => runtime.current_dir()?,
        };
        if !runtime.is_dir(&dump_root) {
            bail!("Dump directory {:?} does not exist", dump_root);
        }
        debug!("Using dump directory {:?}", dump_root);

        Ok(Self { runtime, dump_root })
    }
}
