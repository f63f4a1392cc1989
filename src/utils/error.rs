use thiserror::Error;

#[derive(Error, Debug)]
pub enum SampleError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Not a class file: bad magic 0x{found:08X}")]
    BadMagic { found: u32 },

    #[error("Unexpected end of class data at offset {offset} (wanted {wanted} bytes)")]
    UnexpectedEof { offset: usize, wanted: usize },

    #[error("Invalid constant pool tag {tag} at index {index}")]
    InvalidConstantTag { tag: u8, index: u16 },

    #[error("Constant pool index {index} is not a valid {expected} entry")]
    InvalidConstantIndex { index: u16, expected: &'static str },

    #[error("Invalid method descriptor: {descriptor}")]
    InvalidDescriptor { descriptor: String },
}

impl SampleError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SampleError::TomlError(_)
                | SampleError::ConfigError { .. }
                | SampleError::InvalidConfigValueError { .. }
                | SampleError::MissingConfigError { .. }
        )
    }

    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            SampleError::BadMagic { .. }
                | SampleError::UnexpectedEof { .. }
                | SampleError::InvalidConstantTag { .. }
                | SampleError::InvalidConstantIndex { .. }
                | SampleError::InvalidDescriptor { .. }
        )
    }

    /// 根據錯誤類型決定退出碼
    pub fn exit_code(&self) -> i32 {
        if self.is_config_error() {
            2
        } else if self.is_decode_error() {
            3
        } else {
            1
        }
    }
}

pub type Result<T> = std::result::Result<T, SampleError>;
