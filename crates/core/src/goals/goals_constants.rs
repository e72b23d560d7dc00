/// Category assigned to newly created goals.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Status labels
pub const STATUS_COMPLETE: &str = "Complete";
pub const STATUS_INCOMPLETE: &str = "Incomplete";

/// Messages handed to the error sink
pub const REFRESH_FAILED_MESSAGE: &str = "There was an error loading the goals.";
pub const ADD_FAILED_MESSAGE: &str = "There was an error adding the goal.";
pub const EDIT_FAILED_MESSAGE: &str = "There was an error editing the goal.";
