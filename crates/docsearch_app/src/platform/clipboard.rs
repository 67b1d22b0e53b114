//! System clipboard and text-selection access.

use arboard::Clipboard;

pub struct SystemClipboard {
    inner: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, arboard::Error> {
        Ok(Self {
            inner: Clipboard::new()?,
        })
    }

    /// Clipboard text, `None` when the clipboard holds no text.
    pub fn read_text(&mut self) -> Result<Option<String>, arboard::Error> {
        match self.inner.get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// The currently highlighted text (X11/Wayland primary selection).
    #[cfg(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    ))]
    pub fn read_selection(&mut self) -> Result<Option<String>, arboard::Error> {
        use arboard::{GetExtLinux, LinuxClipboardKind};

        match self
            .inner
            .get()
            .clipboard(LinuxClipboardKind::Primary)
            .text()
        {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Other platforms expose no selection to outside processes.
    #[cfg(not(all(
        unix,
        not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
    )))]
    pub fn read_selection(&mut self) -> Result<Option<String>, arboard::Error> {
        Err(arboard::Error::ClipboardNotSupported)
    }

    /// Replaces the clipboard text.
    ///
    /// On X11 and Wayland the text is served by this process. Without a
    /// clipboard manager it is gone once `docsearch` exits; `copy` stays
    /// alive while the "View Sources" notification is pending, at most
    /// 10 seconds. Blocking until another owner takes over
    /// (`SetExtLinux::wait`) would hold the command open indefinitely.
    pub fn write_text(&mut self, text: &str) -> Result<(), arboard::Error> {
        self.inner.set_text(text)
    }
}
