// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! GL error codes and the typed failures they map to.

use thiserror::Error;

/// Result alias used by every operation of the [`Gl20`](crate::Gl20) contract.
pub type GlResult<T> = std::result::Result<T, GlError>;

/// A typed failure raised by the interception layer or by a backend.
///
/// The first five variants correspond one-to-one to the error codes a GL
/// context can report through `glGetError`. They carry no payload: the
/// operation that triggered them has to be correlated with the call log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlError {
    /// `GL_INVALID_ENUM`: an enumerated argument was out of range.
    #[error("GL_INVALID_ENUM: an unacceptable value was specified for an enumerated argument")]
    InvalidEnum,

    /// `GL_INVALID_VALUE`: a numeric argument was out of range.
    #[error("GL_INVALID_VALUE: a numeric argument is out of range")]
    InvalidValue,

    /// `GL_INVALID_OPERATION`: the operation is not allowed in the current state.
    #[error("GL_INVALID_OPERATION: the specified operation is not allowed in the current state")]
    InvalidOperation,

    /// `GL_INVALID_FRAMEBUFFER_OPERATION`: the bound framebuffer is not complete.
    #[error("GL_INVALID_FRAMEBUFFER_OPERATION: the framebuffer object is not complete")]
    InvalidFramebufferOperation,

    /// `GL_OUT_OF_MEMORY`: not enough memory is left to execute the command.
    #[error("GL_OUT_OF_MEMORY: there is not enough memory left to execute the command")]
    OutOfMemory,

    /// The error-state query returned a non-zero code outside the known set.
    #[error("unrecognized GL error code 0x{0:04X}")]
    Unrecognized(u32),

    /// The backend itself failed to carry out an operation.
    #[error("backend failure in {operation}: {message}")]
    Backend {
        /// GL name of the operation that failed.
        operation: &'static str,
        /// Backend-provided description.
        message: String,
    },
}

impl GlError {
    /// Returns the GL error code for this failure, if it has one.
    pub fn code(&self) -> Option<u32> {
        match self {
            GlError::InvalidEnum => Some(ErrorCode::InvalidEnum.raw()),
            GlError::InvalidValue => Some(ErrorCode::InvalidValue.raw()),
            GlError::InvalidOperation => Some(ErrorCode::InvalidOperation.raw()),
            GlError::InvalidFramebufferOperation => {
                Some(ErrorCode::InvalidFramebufferOperation.raw())
            }
            GlError::OutOfMemory => Some(ErrorCode::OutOfMemory.raw()),
            GlError::Unrecognized(code) => Some(*code),
            GlError::Backend { .. } => None,
        }
    }
}

/// The closed set of codes returned by the GL error-state query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode {
    /// `GL_NO_ERROR`, the sentinel meaning the error state is clear.
    NoError = 0,
    /// `GL_INVALID_ENUM`
    InvalidEnum = 0x0500,
    /// `GL_INVALID_VALUE`
    InvalidValue = 0x0501,
    /// `GL_INVALID_OPERATION`
    InvalidOperation = 0x0502,
    /// `GL_OUT_OF_MEMORY`
    OutOfMemory = 0x0505,
    /// `GL_INVALID_FRAMEBUFFER_OPERATION`
    InvalidFramebufferOperation = 0x0506,
}

impl ErrorCode {
    /// Every recognized code, the sentinel first.
    pub const ALL: [ErrorCode; 6] = [
        ErrorCode::NoError,
        ErrorCode::InvalidEnum,
        ErrorCode::InvalidValue,
        ErrorCode::InvalidOperation,
        ErrorCode::OutOfMemory,
        ErrorCode::InvalidFramebufferOperation,
    ];

    /// Decodes a raw code. Returns `None` for values outside the known set.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(ErrorCode::NoError),
            0x0500 => Some(ErrorCode::InvalidEnum),
            0x0501 => Some(ErrorCode::InvalidValue),
            0x0502 => Some(ErrorCode::InvalidOperation),
            0x0505 => Some(ErrorCode::OutOfMemory),
            0x0506 => Some(ErrorCode::InvalidFramebufferOperation),
            _ => None,
        }
    }

    /// The raw GL value of this code.
    pub fn raw(self) -> u32 {
        self as u32
    }

    /// Maps the code to its typed failure, `None` for the no-error sentinel.
    pub fn into_error(self) -> Option<GlError> {
        match self {
            ErrorCode::NoError => None,
            ErrorCode::InvalidEnum => Some(GlError::InvalidEnum),
            ErrorCode::InvalidValue => Some(GlError::InvalidValue),
            ErrorCode::InvalidOperation => Some(GlError::InvalidOperation),
            ErrorCode::OutOfMemory => Some(GlError::OutOfMemory),
            ErrorCode::InvalidFramebufferOperation => Some(GlError::InvalidFramebufferOperation),
        }
    }

    /// Maps any raw code to a failure. Unknown non-zero codes become
    /// [`GlError::Unrecognized`] instead of being dropped.
    pub fn error_for_raw(raw: u32) -> Option<GlError> {
        match Self::from_raw(raw) {
            Some(code) => code.into_error(),
            None => Some(GlError::Unrecognized(raw)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_code_round_trips_through_raw() {
        for code in ErrorCode::ALL {
            assert_eq!(ErrorCode::from_raw(code.raw()), Some(code));
        }
    }

    #[test]
    fn no_error_maps_to_nothing() {
        assert_eq!(ErrorCode::NoError.into_error(), None);
        assert_eq!(ErrorCode::error_for_raw(0), None);
    }

    #[test]
    fn recognized_codes_map_to_matching_failures() {
        assert_eq!(ErrorCode::error_for_raw(0x0500), Some(GlError::InvalidEnum));
        assert_eq!(ErrorCode::error_for_raw(0x0501), Some(GlError::InvalidValue));
        assert_eq!(
            ErrorCode::error_for_raw(0x0502),
            Some(GlError::InvalidOperation)
        );
        assert_eq!(ErrorCode::error_for_raw(0x0505), Some(GlError::OutOfMemory));
        assert_eq!(
            ErrorCode::error_for_raw(0x0506),
            Some(GlError::InvalidFramebufferOperation)
        );
    }

    #[test]
    fn unknown_codes_are_not_dropped() {
        let err = ErrorCode::error_for_raw(0x0503).unwrap();
        assert_eq!(err, GlError::Unrecognized(0x0503));
        assert_eq!(format!("{err}"), "unrecognized GL error code 0x0503");
        assert_eq!(err.code(), Some(0x0503));
    }

    #[test]
    fn failures_report_their_code() {
        assert_eq!(GlError::OutOfMemory.code(), Some(0x0505));
        let backend = GlError::Backend {
            operation: "glFlush",
            message: "context lost".to_string(),
        };
        assert_eq!(backend.code(), None);
        assert_eq!(
            format!("{backend}"),
            "backend failure in glFlush: context lost"
        );
    }
}
