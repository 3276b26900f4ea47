use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}

impl From<solana_program::program_error::ProgramError> for SdkError {
    fn from(err: solana_program::program_error::ProgramError) -> Self {
        SdkError::InvalidParameters(err.to_string())
    }
}

impl From<ureq::Error> for SdkError {
    fn from(err: ureq::Error) -> Self {
        SdkError::RpcError(err.to_string())
    }
}

impl From<std::io::Error> for SdkError {
    fn from(err: std::io::Error) -> Self {
        SdkError::RpcError(err.to_string())
    }
}

impl From<bincode::Error> for SdkError {
    fn from(err: bincode::Error) -> Self {
        SdkError::SerializationError(err.to_string())
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
