//! NovaBrowse UI layer.
//!
//! The GUI toolkit is an external collaborator: the session manager talks to
//! it only through [`chrome::ChromeView`]. `HeadlessChrome` is the in-process
//! implementation used by the command-line shell and the tests.

pub mod chrome;
pub mod dialogs;
pub mod headless;
