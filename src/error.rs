use thiserror::Error;

pub type ScaleResult<T> = Result<T, ScaleError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScaleError {
    #[error("malformed kline type `{spec}`: {reason}")]
    MalformedSpec { spec: String, reason: String },

    #[error("invalid minutes bucket in `{spec}`: {reason}")]
    InvalidMinutesBucket { spec: String, reason: String },

    #[error("cannot parse date `{input}` at index {index}: {reason}")]
    DateParse {
        index: usize,
        input: String,
        reason: String,
    },

    #[error("unsupported value kind `{kind}` at index {index}")]
    UnsupportedValueKind { index: usize, kind: &'static str },

    #[error("minutes option {configured} disagrees with kline type suffix {parsed}")]
    MinutesMismatch { configured: u32, parsed: u32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid visible window [{min}, {max}] for {len} values")]
    InvalidWindow { min: usize, max: usize, len: usize },
}
