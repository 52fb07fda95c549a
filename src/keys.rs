//! Reserved keys shared with structured sinks
//!
//! These names are part of the output contract: log pipelines filter and
//! index on them, so they are fixed at compile time.

/// Key of the first entry attached without an explicit key.
pub const FIRST_KEY: &str = "root";

/// Key of every later message attached without an explicit key.
pub const MESSAGE_KEY: &str = "msg";

/// Key of every later value attached without an explicit key.
pub const VALUE_KEY: &str = "data";

/// Key under which the static error is written.
pub const ERROR_KEY: &str = "error";

/// Key of the dictionary that groups the whole context when it is emitted.
pub const INSERTED_KEY: &str = "errcontext";
