use thiserror::Error;

/// Conversion-layer failures. `UnsupportedOperation` and
/// `UnsupportedFormat` are programming-error class and always propagate;
/// parse failures are reported as `false` from `fill_typed_value` instead and
/// never show up here.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("{converter} doesn't support {operation}")]
    UnsupportedOperation {
        converter: &'static str,
        operation: &'static str,
    },

    #[error("attr format not supported: {format}")]
    UnsupportedFormat { format: String },

    #[error("can't coerce {value:?} to {target}")]
    Malformed {
        value: String,
        target: &'static str,
    },
}

impl ConvertError {
    pub fn unsupported_operation(converter: &'static str, operation: &'static str) -> Self {
        Self::UnsupportedOperation {
            converter,
            operation,
        }
    }

    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    pub fn malformed(value: impl Into<String>, target: &'static str) -> Self {
        Self::Malformed {
            value: value.into(),
            target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_operation_display() {
        let err = ConvertError::unsupported_operation("FromFilePath", "as_int");
        assert_eq!(err.to_string(), "FromFilePath doesn't support as_int");
    }

    #[test]
    fn test_malformed_display() {
        let err = ConvertError::malformed("zz", "color");
        assert_eq!(err.to_string(), "can't coerce \"zz\" to color");
    }
}
