//! Terminal output helpers
//!
//! Long listings (`log`, `global-log`) go through the `minus` pager when
//! stdout is an interactive terminal. Everything else, and every listing
//! when `NO_PAGER` is set or output is redirected, goes straight to stdout.

use derive_new::new;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Environment variable disabling the pager
pub const NO_PAGER_ENV_VAR: &str = "NO_PAGER";

/// Wrapper that implements `Write` for the minus pager
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn stdout_is_terminal() -> bool {
    io::stdout().is_terminal()
}

pub fn pager_enabled() -> bool {
    stdout_is_terminal() && std::env::var_os(NO_PAGER_ENV_VAR).is_none()
}

/// Writer for a command's output, plus the pager to hand it to once done
pub fn output_writer(paged: bool) -> (Box<dyn Write>, Option<Pager>) {
    if paged && pager_enabled() {
        let pager = Pager::new();
        (Box::new(PagerWriter::new(pager.clone())), Some(pager))
    } else {
        (Box::new(io::stdout()), None)
    }
}

/// Display everything written to the pager
pub fn page_all(pager: Pager) -> anyhow::Result<()> {
    minus::page_all(pager).map_err(|error| anyhow::anyhow!("pager failed: {error}"))
}
