use thiserror::Error;

/// Validation failures raised while turning an upload into a numeric series.
///
/// Every variant is a client-side problem with the uploaded file; none of them
/// is recoverable within the same request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("File must have a .csv extension (got '{filename}').")]
    InvalidExtension { filename: String },

    #[error("Empty file.")]
    EmptyFile,

    /// `size` is the number of bytes received, which callers may cap at `limit + 1`.
    #[error("File too large (limit is {limit} bytes).")]
    FileTooLarge { size: usize, limit: usize },

    #[error("CSV parse error: {0}")]
    ParseError(String),

    #[error("CSV contains no rows.")]
    NoRows,

    #[error("Not enough rows for analysis: found {found}, need at least {min}.")]
    TooFewRows { found: usize, min: usize },

    #[error("Missing required time/flux columns (accepted: {time_aliases} / {flux_aliases}).")]
    MissingColumns {
        time_aliases: String,
        flux_aliases: String,
    },

    #[error("Column `{column}` is entirely non-numeric.")]
    NonNumericColumn { column: String },

    #[error("Insufficient valid numeric rows after cleaning: {valid} remain, need at least {min}.")]
    InsufficientValidRows { valid: usize, min: usize },
}

/// Process-level error: a message plus the exit code the binary should return.
///
/// Exit codes:
/// - `2`: bad input (validation, usage, unreadable files)
/// - `4`: internal failure (details are logged, never shown)
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
    client: bool,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
            client: exit_code == 2,
        }
    }

    /// An unclassified failure. The detail goes to the log; callers only ever
    /// see a generic message.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!(%detail, "internal failure");
        Self {
            exit_code: 4,
            message: "Internal error while analyzing the light curve.".to_string(),
            client: false,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    /// `true` for rejections caused by the caller's input (400-class),
    /// `false` for internal defects (500-class).
    pub fn is_client_error(&self) -> bool {
        self.client
    }
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        AppError::new(2, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .field("client", &self.client)
            .finish()
    }
}

impl std::error::Error for AppError {}
