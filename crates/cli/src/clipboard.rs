//! Terminal clipboard using the OSC 52 escape sequence.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use filecat_core::clipboard::Clipboard;
use filecat_core::error::ClipboardError;
use std::io::Write;

/// Asks the terminal on the other end of `out` to place text on the system
/// clipboard. Works over SSH; terminals that ignore OSC 52 drop it silently.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        write!(self.out, "\x1b]52;c;{}\x07", STANDARD.encode(text))?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_base64_payload() {
        let mut clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.copy("C:/shared/a.txt").unwrap();
        let written = String::from_utf8(clipboard.into_inner()).unwrap();
        assert_eq!(written, "\x1b]52;c;Qzovc2hhcmVkL2EudHh0\x07");
    }
}
