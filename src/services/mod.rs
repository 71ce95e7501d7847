//! Services for file I/O and other operations shared between the TUI and
//! tests.

pub mod layout_file;

pub use layout_file::LayoutService;
