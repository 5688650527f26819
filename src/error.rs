use std::fmt;

/// Top-level application error type
#[derive(Debug)]
pub enum AppError {
    /// Browser / session errors
    Browser(BrowserError),
    /// Metadata store errors
    Metadata(MetadataError),
    /// File copy / note errors
    File(FileError),
    /// Page render errors
    Render(RenderError),
    /// Batch submission errors
    Batch(BatchError),
    /// Configuration errors
    Config(ConfigError),
    /// Anything else (wraps third-party errors)
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Browser(e) => write!(f, "browser error: {}", e),
            AppError::Metadata(e) => write!(f, "metadata error: {}", e),
            AppError::File(e) => write!(f, "file error: {}", e),
            AppError::Render(e) => write!(f, "render error: {}", e),
            AppError::Batch(e) => write!(f, "batch error: {}", e),
            AppError::Config(e) => write!(f, "config error: {}", e),
            AppError::Other(msg) => write!(f, "error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Browser(e) => Some(e),
            AppError::Metadata(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Render(e) => Some(e),
            AppError::Batch(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// Browser and authenticated-session errors
#[derive(Debug)]
pub enum BrowserError {
    /// Launching the headless browser failed
    LaunchFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Creating a page failed
    PageCreationFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Navigation failed
    NavigationFailed {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// A browser protocol command failed
    CommandFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Credentials were rejected by the login surface
    LoginRejected,
}

impl fmt::Display for BrowserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserError::LaunchFailed { source } => {
                write!(f, "failed to launch headless browser: {}", source)
            }
            BrowserError::PageCreationFailed { source } => {
                write!(f, "failed to create page: {}", source)
            }
            BrowserError::NavigationFailed { url, source } => {
                write!(f, "navigation to {} failed: {}", url, source)
            }
            BrowserError::CommandFailed { source } => {
                write!(f, "browser command failed: {}", source)
            }
            BrowserError::LoginRejected => {
                write!(f, "login failed, still on the login page (check credentials)")
            }
        }
    }
}

impl std::error::Error for BrowserError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BrowserError::LaunchFailed { source }
            | BrowserError::PageCreationFailed { source }
            | BrowserError::NavigationFailed { source, .. }
            | BrowserError::CommandFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            BrowserError::LoginRejected => None,
        }
    }
}

/// Metadata store errors
#[derive(Debug)]
pub enum MetadataError {
    /// A per-record lookup failed; the record's remaining steps are skipped
    LookupFailed {
        record_id: String,
    },
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataError::LookupFailed { record_id } => {
                write!(f, "document lookup failed for record {}", record_id)
            }
        }
    }
}

impl std::error::Error for MetadataError {}

/// File copy and note errors
#[derive(Debug)]
pub enum FileError {
    /// Source file does not exist on network storage
    NotFound {
        path: String,
    },
    /// Copying a source file into the destination folder failed
    CopyFailed {
        path: String,
        dest: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Creating a destination folder failed
    CreateDirFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Writing a file failed
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Reading a file failed
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML parsing failed
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound { path } => write!(f, "file not found: {}", path),
            FileError::CopyFailed { path, dest, source } => {
                write!(f, "failed to copy {} to {}: {}", path, dest, source)
            }
            FileError::CreateDirFailed { path, source } => {
                write!(f, "failed to create folder {}: {}", path, source)
            }
            FileError::WriteFailed { path, source } => {
                write!(f, "failed to write {}: {}", path, source)
            }
            FileError::ReadFailed { path, source } => {
                write!(f, "failed to read {}: {}", path, source)
            }
            FileError::TomlParseFailed { path, source } => {
                write!(f, "failed to parse TOML {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::CopyFailed { source, .. }
            | FileError::CreateDirFailed { source, .. }
            | FileError::WriteFailed { source, .. }
            | FileError::ReadFailed { source, .. }
            | FileError::TomlParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            FileError::NotFound { .. } => None,
        }
    }
}

/// Page render errors, all local to a single render request
#[derive(Debug)]
pub enum RenderError {
    /// Navigation did not reach a loaded state within the bounded timeout
    Timeout {
        url: String,
        seconds: u64,
    },
    /// The page redirected back to the login surface
    SessionExpired {
        url: String,
    },
    /// Navigation itself failed
    NavigationFailed {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Capturing the rendered page as a PDF failed
    CaptureFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Timeout { url, seconds } => {
                write!(f, "navigation to {} timed out after {}s", url, seconds)
            }
            RenderError::SessionExpired { url } => {
                write!(
                    f,
                    "session expired: page for {} was redirected to the login page",
                    url
                )
            }
            RenderError::NavigationFailed { url, source } => {
                write!(f, "navigation to {} failed: {}", url, source)
            }
            RenderError::CaptureFailed { path, source } => {
                write!(f, "failed to save PDF {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::NavigationFailed { source, .. }
            | RenderError::CaptureFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// Batch submission errors
#[derive(Debug)]
pub enum BatchError {
    /// An empty batch was submitted; nothing was enqueued
    EmptyBatch,
    /// The worker-pool intake is no longer accepting jobs
    IntakeClosed,
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchError::EmptyBatch => write!(f, "batch contains no record jobs"),
            BatchError::IntakeClosed => write!(f, "worker pool intake is closed"),
        }
    }
}

impl std::error::Error for BatchError {}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    /// A required environment variable is missing
    EnvVarNotFound {
        var_name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EnvVarNotFound { var_name } => {
                write!(f, "environment variable {} is not set", var_name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ========== conversions from common error types ==========
// No manual From<AppError> for anyhow::Error is needed; anyhow covers every
// std::error::Error implementor automatically.

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(BrowserError::CommandFailed {
            source: Box::new(err),
        })
    }
}

impl From<BatchError> for AppError {
    fn from(err: BatchError) -> Self {
        AppError::Batch(err)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: String::new(), // TOML errors carry no path of their own
            source: Box::new(err),
        })
    }
}

// ========== convenience constructors ==========

impl AppError {
    pub fn lookup_failed(record_id: impl Into<String>) -> Self {
        AppError::Metadata(MetadataError::LookupFailed {
            record_id: record_id.into(),
        })
    }

    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result type alias ==========

/// Application result type
pub type AppResult<T> = Result<T, AppError>;
