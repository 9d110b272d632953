use std::fmt::Display;

use crate::huffman::CodingError;

#[derive(Debug)]
pub enum Error {
    Coding(CodingError),
    FailedToReadStandardInput(std::io::Error),
    FailedToWriteOutput(std::io::Error),
    WorkerDisconnected(usize),
}

impl From<CodingError> for Error {
    fn from(error: CodingError) -> Self {
        Self::Coding(error)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Coding(error) => write!(f, "{}", error),
            Self::FailedToReadStandardInput(error) => {
                write!(f, "Failed to read from standard input: {}", error)
            }
            Self::FailedToWriteOutput(error) => {
                write!(f, "Failed to write output: {}", error)
            }
            Self::WorkerDisconnected(missing) => {
                write!(
                    f,
                    "Worker thread terminated before delivering {} result(s)",
                    missing
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Coding(error) => Some(error),
            Self::FailedToReadStandardInput(error) | Self::FailedToWriteOutput(error) => {
                Some(error)
            }
            Self::WorkerDisconnected(_) => None,
        }
    }
}
