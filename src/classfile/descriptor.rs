use crate::utils::error::{Result, SampleError};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
    Object(String),
    Array(Box<FieldType>),
}

impl FieldType {
    /// Local variable slots taken by a value of this type.
    pub fn slot_size(&self) -> usize {
        match self {
            FieldType::Long | FieldType::Double => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Byte => write!(f, "byte"),
            FieldType::Char => write!(f, "char"),
            FieldType::Double => write!(f, "double"),
            FieldType::Float => write!(f, "float"),
            FieldType::Int => write!(f, "int"),
            FieldType::Long => write!(f, "long"),
            FieldType::Short => write!(f, "short"),
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Object(name) => write!(f, "{}", name.replace('/', ".")),
            FieldType::Array(inner) => write!(f, "{}[]", inner),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub params: Vec<FieldType>,
    /// `None` for `void`.
    pub ret: Option<FieldType>,
}

impl MethodDescriptor {
    pub fn parse(descriptor: &str) -> Result<Self> {
        let bad = || SampleError::InvalidDescriptor {
            descriptor: descriptor.to_string(),
        };

        let rest = descriptor.strip_prefix('(').ok_or_else(bad)?;
        let (params_part, ret_part) = rest.split_once(')').ok_or_else(bad)?;

        let mut params = Vec::new();
        let mut cursor = params_part;
        while !cursor.is_empty() {
            let (field, remaining) = parse_field(cursor).ok_or_else(bad)?;
            params.push(field);
            cursor = remaining;
        }

        let ret = if ret_part == "V" {
            None
        } else {
            match parse_field(ret_part) {
                Some((field, "")) => Some(field),
                _ => return Err(bad()),
            }
        };

        Ok(Self { params, ret })
    }

    pub fn param_slots(&self) -> usize {
        self.params.iter().map(FieldType::slot_size).sum()
    }
}

/// Array types may have at most this many dimensions.
pub const MAX_ARRAY_DIMENSIONS: usize = 255;

/// Parses one field type off the front of `input`.
fn parse_field(input: &str) -> Option<(FieldType, &str)> {
    let dimensions = input.bytes().take_while(|b| *b == b'[').count();
    if dimensions > MAX_ARRAY_DIMENSIONS {
        return None;
    }

    let (mut field, rest) = parse_element(&input[dimensions..])?;
    for _ in 0..dimensions {
        field = FieldType::Array(Box::new(field));
    }
    Some((field, rest))
}

/// Parses a non-array field type off the front of `input`.
fn parse_element(input: &str) -> Option<(FieldType, &str)> {
    let mut chars = input.chars();
    let head = chars.next()?;
    let rest = chars.as_str();

    let field = match head {
        'B' => FieldType::Byte,
        'C' => FieldType::Char,
        'D' => FieldType::Double,
        'F' => FieldType::Float,
        'I' => FieldType::Int,
        'J' => FieldType::Long,
        'S' => FieldType::Short,
        'Z' => FieldType::Boolean,
        'L' => {
            let (name, after) = rest.split_once(';')?;
            if name.is_empty() {
                return None;
            }
            return Some((FieldType::Object(name.to_string()), after));
        }
        _ => return None,
    };
    Some((field, rest))
}

/// Argument slots for a method, counting the receiver of instance methods.
pub fn arg_slots(descriptor: &str, is_static: bool) -> Result<usize> {
    let parsed = MethodDescriptor::parse(descriptor)?;
    let receiver = if is_static { 0 } else { 1 };
    Ok(parsed.param_slots() + receiver)
}
