//=========================================================================
// Host Context
//=========================================================================
//
// Host resources states may touch during init and event handling.
//
// Contains:
// - window: logical window description plus requests states make of it
//   (resize, quit), picked up by the engine loop after each tick
// - options: the process-wide option store and its bindings
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::options::{OptionName, Options, WindowSize};

//=== HostWindow ==========================================================

/// Window as seen from the logic thread.
///
/// Size reflects the latest `WindowResized` event. States do not touch the
/// real window; they record requests that the engine forwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostWindow {
    width: u32,
    height: u32,
    title: String,
    resize_request: Option<(u32, u32)>,
    quit_requested: bool,
}

impl HostWindow {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            title: title.into(),
            resize_request: None,
            quit_requested: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Records the size reported by the platform.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Asks the platform to resize the window.
    pub fn request_resize(&mut self, width: u32, height: u32) {
        self.resize_request = Some((width, height));
    }

    /// Takes the pending resize request, if any.
    pub fn take_resize_request(&mut self) -> Option<(u32, u32)> {
        self.resize_request.take()
    }

    /// Asks the engine to stop after the current tick.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

//=== HostContext =========================================================

/// Host resources shared by every state on a stack.
#[derive(Debug)]
pub struct HostContext {
    pub window: HostWindow,
    pub options: Options,
}

impl HostContext {
    pub fn new(window: HostWindow, options: Options) -> Self {
        Self { window, options }
    }

    /// Window size from the `WindowSize` option, falling back to the
    /// current window size.
    pub fn preferred_window_size(&self) -> WindowSize {
        self.options
            .get::<WindowSize>(OptionName::WindowSize)
            .copied()
            .unwrap_or(WindowSize {
                width: self.window.width,
                height: self.window.height,
            })
    }
}

impl Default for HostContext {
    fn default() -> Self {
        Self::new(HostWindow::new("", 0, 0), Options::new())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_request_is_taken_once() {
        let mut window = HostWindow::new("test", 640, 480);
        window.request_resize(800, 600);

        assert_eq!(window.take_resize_request(), Some((800, 600)));
        assert_eq!(window.take_resize_request(), None);
        assert_eq!((window.width(), window.height()), (640, 480));
    }

    #[test]
    fn quit_request_sticks() {
        let mut window = HostWindow::new("test", 1, 1);
        assert!(!window.quit_requested());

        window.request_quit();

        assert!(window.quit_requested());
    }

    #[test]
    fn preferred_size_falls_back_to_window() {
        let mut host = HostContext::new(HostWindow::new("test", 320, 200), Options::new());
        assert_eq!(
            host.preferred_window_size(),
            WindowSize { width: 320, height: 200 }
        );

        host.options
            .set(OptionName::WindowSize, WindowSize { width: 480, height: 544 });
        assert_eq!(
            host.preferred_window_size(),
            WindowSize { width: 480, height: 544 }
        );
    }
}
