use crate::classfile::descriptor::arg_slots;
use crate::utils::error::{Result, SampleError};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tag")]
pub enum Constant {
    Utf8 {
        value: String,
    },
    Integer {
        value: i32,
    },
    Float {
        value: f32,
    },
    Long {
        value: i64,
    },
    Double {
        value: f64,
    },
    Class {
        name_index: u16,
    },
    String {
        string_index: u16,
    },
    Fieldref {
        class_index: u16,
        name_and_type_index: u16,
    },
    Methodref {
        class_index: u16,
        name_and_type_index: u16,
    },
    InterfaceMethodref {
        class_index: u16,
        name_and_type_index: u16,
    },
    NameAndType {
        name_index: u16,
        descriptor_index: u16,
    },
    MethodHandle {
        reference_kind: u8,
        reference_index: u16,
    },
    MethodType {
        descriptor_index: u16,
    },
    InvokeDynamic {
        bootstrap_method_attr_index: u16,
        name_and_type_index: u16,
    },
    /// Second slot of a Long or Double.
    Unusable,
}

impl Constant {
    pub fn tag_name(&self) -> &'static str {
        match self {
            Constant::Utf8 { .. } => "Utf8",
            Constant::Integer { .. } => "Integer",
            Constant::Float { .. } => "Float",
            Constant::Long { .. } => "Long",
            Constant::Double { .. } => "Double",
            Constant::Class { .. } => "Class",
            Constant::String { .. } => "String",
            Constant::Fieldref { .. } => "Fieldref",
            Constant::Methodref { .. } => "Methodref",
            Constant::InterfaceMethodref { .. } => "InterfaceMethodref",
            Constant::NameAndType { .. } => "NameAndType",
            Constant::MethodHandle { .. } => "MethodHandle",
            Constant::MethodType { .. } => "MethodType",
            Constant::InvokeDynamic { .. } => "InvokeDynamic",
            Constant::Unusable => "Unusable",
        }
    }

    pub fn is_wide(&self) -> bool {
        matches!(self, Constant::Long { .. } | Constant::Double { .. })
    }
}

/// A resolved field, method or interface method reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberRef<'a> {
    pub class_name: &'a str,
    pub name: &'a str,
    pub descriptor: &'a str,
}

/// 1-based constant pool. Slot 0 is never valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstantPool {
    entries: Vec<Constant>,
}

impl ConstantPool {
    pub fn new(entries: Vec<Constant>) -> Self {
        Self { entries }
    }

    /// Number of slots, including unusable halves of wide constants.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: u16) -> Option<&Constant> {
        let slot = usize::from(index).checked_sub(1)?;
        self.entries.get(slot)
    }

    /// Usable entries with their pool indices.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &Constant)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, c)| !matches!(c, Constant::Unusable))
            .map(|(slot, c)| (slot as u16 + 1, c))
    }

    pub fn utf8(&self, index: u16) -> Result<&str> {
        match self.get(index) {
            Some(Constant::Utf8 { value }) => Ok(value),
            _ => Err(invalid(index, "Utf8")),
        }
    }

    pub fn class_name(&self, index: u16) -> Result<&str> {
        match self.get(index) {
            Some(Constant::Class { name_index }) => self.utf8(*name_index),
            _ => Err(invalid(index, "Class")),
        }
    }

    pub fn name_and_type(&self, index: u16) -> Result<(&str, &str)> {
        match self.get(index) {
            Some(Constant::NameAndType {
                name_index,
                descriptor_index,
            }) => Ok((self.utf8(*name_index)?, self.utf8(*descriptor_index)?)),
            _ => Err(invalid(index, "NameAndType")),
        }
    }

    pub fn member_ref(&self, index: u16) -> Result<MemberRef<'_>> {
        match self.get(index) {
            Some(
                Constant::Fieldref {
                    class_index,
                    name_and_type_index,
                }
                | Constant::Methodref {
                    class_index,
                    name_and_type_index,
                }
                | Constant::InterfaceMethodref {
                    class_index,
                    name_and_type_index,
                },
            ) => {
                let class_name = self.class_name(*class_index)?;
                let (name, descriptor) = self.name_and_type(*name_and_type_index)?;
                Ok(MemberRef {
                    class_name,
                    name,
                    descriptor,
                })
            }
            _ => Err(invalid(index, "member reference")),
        }
    }

    /// Human-readable one-line rendering of an entry, resolving indices
    /// where possible.
    pub fn describe(&self, index: u16) -> Option<String> {
        let constant = self.get(index)?;
        let detail = match constant {
            Constant::Utf8 { value } => format!("{:?}", value),
            Constant::Integer { value } => value.to_string(),
            Constant::Float { value } => format!("{}f", value),
            Constant::Long { value } => format!("{}L", value),
            Constant::Double { value } => format!("{}d", value),
            Constant::Class { .. } => self.class_name(index).ok()?.to_string(),
            Constant::String { string_index } => {
                format!("{:?}", self.utf8(*string_index).ok()?)
            }
            Constant::Fieldref { .. }
            | Constant::Methodref { .. }
            | Constant::InterfaceMethodref { .. } => {
                let member = self.member_ref(index).ok()?;
                format!("{}.{}:{}", member.class_name, member.name, member.descriptor)
            }
            Constant::NameAndType { .. } => {
                let (name, descriptor) = self.name_and_type(index).ok()?;
                format!("{}:{}", name, descriptor)
            }
            Constant::MethodHandle {
                reference_kind,
                reference_index,
            } => format!("kind={} #{}", reference_kind, reference_index),
            Constant::MethodType { descriptor_index } => {
                self.utf8(*descriptor_index).ok()?.to_string()
            }
            Constant::InvokeDynamic {
                bootstrap_method_attr_index,
                name_and_type_index,
            } => format!(
                "bootstrap={} #{}",
                bootstrap_method_attr_index, name_and_type_index
            ),
            Constant::Unusable => return None,
        };
        Some(detail)
    }
}

fn invalid(index: u16, expected: &'static str) -> SampleError {
    SampleError::InvalidConstantIndex { index, expected }
}

/// Where a set of access flags appears; a few bits mean different things
/// on classes, fields and methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagTarget {
    Class,
    Field,
    Method,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AccessFlags(pub u16);

impl AccessFlags {
    pub const PUBLIC: u16 = 0x0001;
    pub const PRIVATE: u16 = 0x0002;
    pub const PROTECTED: u16 = 0x0004;
    pub const STATIC: u16 = 0x0008;
    pub const FINAL: u16 = 0x0010;
    pub const SUPER: u16 = 0x0020;
    pub const SYNCHRONIZED: u16 = 0x0020;
    pub const VOLATILE: u16 = 0x0040;
    pub const BRIDGE: u16 = 0x0040;
    pub const TRANSIENT: u16 = 0x0080;
    pub const VARARGS: u16 = 0x0080;
    pub const NATIVE: u16 = 0x0100;
    pub const INTERFACE: u16 = 0x0200;
    pub const ABSTRACT: u16 = 0x0400;
    pub const STRICT: u16 = 0x0800;
    pub const SYNTHETIC: u16 = 0x1000;
    pub const ANNOTATION: u16 = 0x2000;
    pub const ENUM: u16 = 0x4000;

    pub fn contains(&self, flag: u16) -> bool {
        self.0 & flag != 0
    }

    pub fn is_public(&self) -> bool {
        self.contains(Self::PUBLIC)
    }

    pub fn is_private(&self) -> bool {
        self.contains(Self::PRIVATE)
    }

    pub fn is_protected(&self) -> bool {
        self.contains(Self::PROTECTED)
    }

    pub fn is_static(&self) -> bool {
        self.contains(Self::STATIC)
    }

    pub fn is_final(&self) -> bool {
        self.contains(Self::FINAL)
    }

    pub fn is_super(&self) -> bool {
        self.contains(Self::SUPER)
    }

    pub fn is_interface(&self) -> bool {
        self.contains(Self::INTERFACE)
    }

    pub fn is_abstract(&self) -> bool {
        self.contains(Self::ABSTRACT)
    }

    pub fn is_synthetic(&self) -> bool {
        self.contains(Self::SYNTHETIC)
    }

    pub fn is_annotation(&self) -> bool {
        self.contains(Self::ANNOTATION)
    }

    pub fn is_enum(&self) -> bool {
        self.contains(Self::ENUM)
    }

    /// Names of the set flags in declaration order.
    pub fn names_for(&self, target: FlagTarget) -> Vec<&'static str> {
        let table: &[(u16, &'static str)] = match target {
            FlagTarget::Class => &[
                (Self::PUBLIC, "public"),
                (Self::FINAL, "final"),
                (Self::SUPER, "super"),
                (Self::INTERFACE, "interface"),
                (Self::ABSTRACT, "abstract"),
                (Self::SYNTHETIC, "synthetic"),
                (Self::ANNOTATION, "annotation"),
                (Self::ENUM, "enum"),
            ],
            FlagTarget::Field => &[
                (Self::PUBLIC, "public"),
                (Self::PRIVATE, "private"),
                (Self::PROTECTED, "protected"),
                (Self::STATIC, "static"),
                (Self::FINAL, "final"),
                (Self::VOLATILE, "volatile"),
                (Self::TRANSIENT, "transient"),
                (Self::SYNTHETIC, "synthetic"),
                (Self::ENUM, "enum"),
            ],
            FlagTarget::Method => &[
                (Self::PUBLIC, "public"),
                (Self::PRIVATE, "private"),
                (Self::PROTECTED, "protected"),
                (Self::STATIC, "static"),
                (Self::FINAL, "final"),
                (Self::SYNCHRONIZED, "synchronized"),
                (Self::BRIDGE, "bridge"),
                (Self::VARARGS, "varargs"),
                (Self::NATIVE, "native"),
                (Self::ABSTRACT, "abstract"),
                (Self::STRICT, "strict"),
                (Self::SYNTHETIC, "synthetic"),
            ],
        };

        table
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeInfo {
    pub name_index: u16,
    pub info: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberInfo {
    pub access_flags: AccessFlags,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub attributes: Vec<AttributeInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassFile {
    pub minor_version: u16,
    pub major_version: u16,
    pub constant_pool: ConstantPool,
    pub access_flags: AccessFlags,
    pub this_class: u16,
    pub super_class: u16,
    pub interfaces: Vec<u16>,
    pub fields: Vec<MemberInfo>,
    pub methods: Vec<MemberInfo>,
    pub attributes: Vec<AttributeInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolEntry {
    pub index: u16,
    #[serde(flatten)]
    pub constant: Constant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSummary {
    pub name: String,
    pub descriptor: String,
    pub access: Vec<&'static str>,
    pub attributes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg_slots: Option<usize>,
}

impl MemberSummary {
    /// `name` + `descriptor`, e.g. `add(IJ)D`.
    pub fn signature(&self) -> String {
        format!("{}{}", self.name, self.descriptor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassSummary {
    pub name: String,
    pub super_name: Option<String>,
    pub version: String,
    pub access: Vec<&'static str>,
    pub interfaces: Vec<String>,
    pub fields: Vec<MemberSummary>,
    pub methods: Vec<MemberSummary>,
    pub attributes: Vec<String>,
    pub constant_pool: Vec<PoolEntry>,
}

impl ClassFile {
    pub fn this_class_name(&self) -> Result<&str> {
        self.constant_pool.class_name(self.this_class)
    }

    /// `None` only for `java/lang/Object`, whose super_class is 0.
    pub fn super_class_name(&self) -> Result<Option<&str>> {
        if self.super_class == 0 {
            return Ok(None);
        }
        self.constant_pool.class_name(self.super_class).map(Some)
    }

    pub fn interface_names(&self) -> Result<Vec<&str>> {
        self.interfaces
            .iter()
            .map(|index| self.constant_pool.class_name(*index))
            .collect()
    }

    pub fn member_name(&self, member: &MemberInfo) -> Result<&str> {
        self.constant_pool.utf8(member.name_index)
    }

    pub fn member_descriptor(&self, member: &MemberInfo) -> Result<&str> {
        self.constant_pool.utf8(member.descriptor_index)
    }

    pub fn find_method(&self, name: &str, descriptor: &str) -> Option<&MemberInfo> {
        self.methods.iter().find(|method| {
            self.member_name(method).ok() == Some(name)
                && self.member_descriptor(method).ok() == Some(descriptor)
        })
    }

    pub fn attribute_names(&self, attributes: &[AttributeInfo]) -> Result<Vec<String>> {
        attributes
            .iter()
            .map(|attr| self.constant_pool.utf8(attr.name_index).map(str::to_string))
            .collect()
    }

    fn summarize_member(&self, member: &MemberInfo, target: FlagTarget) -> Result<MemberSummary> {
        let name = self.member_name(member)?.to_string();
        let descriptor = self.member_descriptor(member)?.to_string();
        let arg_slots = match target {
            FlagTarget::Method => Some(arg_slots(&descriptor, member.access_flags.is_static())?),
            _ => None,
        };

        Ok(MemberSummary {
            name,
            descriptor,
            access: member.access_flags.names_for(target),
            attributes: self.attribute_names(&member.attributes)?,
            arg_slots,
        })
    }

    /// Fully resolved view of the class, suitable for printing or JSON.
    pub fn summary(&self) -> Result<ClassSummary> {
        let fields = self
            .fields
            .iter()
            .map(|f| self.summarize_member(f, FlagTarget::Field))
            .collect::<Result<Vec<_>>>()?;
        let methods = self
            .methods
            .iter()
            .map(|m| self.summarize_member(m, FlagTarget::Method))
            .collect::<Result<Vec<_>>>()?;

        Ok(ClassSummary {
            name: self.this_class_name()?.to_string(),
            super_name: self.super_class_name()?.map(str::to_string),
            version: format!("{}.{}", self.major_version, self.minor_version),
            access: self.access_flags.names_for(FlagTarget::Class),
            interfaces: self
                .interface_names()?
                .into_iter()
                .map(str::to_string)
                .collect(),
            fields,
            methods,
            attributes: self.attribute_names(&self.attributes)?,
            constant_pool: self
                .constant_pool
                .iter()
                .map(|(index, constant)| PoolEntry {
                    index,
                    constant: constant.clone(),
                })
                .collect(),
        })
    }
}
