//! Exit codes for tltctl

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when the state file cannot be written
pub const EXIT_STORAGE_ERROR: i32 = 74;

/// Exit code when the configuration is unreadable or invalid
pub const EXIT_CONFIG_ERROR: i32 = 78;
