//! Application-wide constants.

/// Display name of the application
pub const APP_NAME: &str = "Courtside";

/// Binary name as installed on the user's system
pub const APP_BINARY_NAME: &str = "courtside";

/// Number of tag buttons rendered per grid row
pub const BUTTONS_PER_ROW: usize = 5;

/// Maximum length of a button label (longer labels are truncated on import)
pub const MAX_LABEL_LEN: usize = 32;

/// Default color assigned to buttons without an explicit color
pub const DEFAULT_BUTTON_COLOR: &str = "#3f51b5";

/// Label of the single button seeded into a fresh registry
pub const DEFAULT_BUTTON_LABEL: &str = "Pick and Roll";
