// ABOUTME: UI components for the TUI: layout, IDE dialogs, and help overlay

pub mod help;
pub mod ide_dialog;
pub mod layout;
pub mod management_dialog;

pub use help::HelpComponent;
pub use ide_dialog::IdeDialogComponent;
pub use layout::LayoutComponent;
pub use management_dialog::ManagementDialogComponent;
