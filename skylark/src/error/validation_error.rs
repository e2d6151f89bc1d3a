//! Response decoding errors.

use thiserror::Error;

/// Errors while decoding a successful response.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The body was not valid JSON for the destination type.
    #[error(transparent)]
    JsonParse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_decoder_message() {
        let json_err = serde_json::from_str::<u32>("\"text\"").unwrap_err();
        let expected = json_err.to_string();
        let err = ValidationError::JsonParse(json_err);
        assert_eq!(err.to_string(), expected);
    }
}
