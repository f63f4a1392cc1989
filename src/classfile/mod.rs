//! Reading compiled JVM class files: the byte-level reader, the parsed
//! structure with its constant pool, and method descriptor parsing.

pub mod descriptor;
pub mod model;
pub mod reader;

pub use descriptor::{arg_slots, FieldType, MethodDescriptor};
pub use model::{
    AccessFlags, AttributeInfo, ClassFile, ClassSummary, Constant, ConstantPool, FlagTarget,
    MemberInfo, MemberRef, MemberSummary, PoolEntry,
};
pub use reader::{load_class_file, parse_class, ByteReader, ClassReader};
