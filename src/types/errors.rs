use std::fmt;

// === TabError ===

/// Errors related to tab session operations.
#[derive(Debug, PartialEq)]
pub enum TabError {
    /// Tab with the given ID was not found.
    NotFound(String),
    /// The provided tab index is out of bounds.
    InvalidIndex(usize),
}

impl fmt::Display for TabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabError::NotFound(id) => write!(f, "Tab not found: {}", id),
            TabError::InvalidIndex(index) => write!(f, "Invalid tab index: {}", index),
        }
    }
}

impl std::error::Error for TabError {}

// === StorageError ===

/// Errors raised by the persistence store.
#[derive(Debug)]
pub enum StorageError {
    /// Database operation failed.
    DatabaseError(String),
    /// The database handle could not be released cleanly.
    Closed(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::DatabaseError(msg) => write!(f, "Storage database error: {}", msg),
            StorageError::Closed(msg) => write!(f, "Storage close failed: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::DatabaseError(err.to_string())
    }
}

// === ConfigError ===

/// Errors related to the shell configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading or writing the config file.
    IoError(String),
    /// Failed to serialize or deserialize the config file.
    SerializationError(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "Config I/O error: {}", msg),
            ConfigError::SerializationError(msg) => {
                write!(f, "Config serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// === CommandError ===

/// Errors produced while decoding or dispatching shell commands.
#[derive(Debug)]
pub enum CommandError {
    /// The command line is not valid JSON or misses required fields.
    Parse(String),
    /// The command name is not recognized.
    UnknownCommand(String),
    /// A command argument was rejected.
    InvalidArgument(String),
    /// The store failed while serving the command.
    Storage(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Parse(msg) => write!(f, "Command parse error: {}", msg),
            CommandError::UnknownCommand(cmd) => write!(f, "Unknown command: {}", cmd),
            CommandError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CommandError::Storage(msg) => write!(f, "Command storage error: {}", msg),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<TabError> for CommandError {
    fn from(err: TabError) -> Self {
        CommandError::InvalidArgument(err.to_string())
    }
}

impl From<StorageError> for CommandError {
    fn from(err: StorageError) -> Self {
        CommandError::Storage(err.to_string())
    }
}
