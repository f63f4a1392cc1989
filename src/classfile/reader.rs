use crate::classfile::model::{
    AccessFlags, AttributeInfo, ClassFile, Constant, ConstantPool, MemberInfo,
};
use crate::utils::error::{Result, SampleError};
use std::path::Path;

pub const CLASS_MAGIC: u32 = 0xCAFE_BABE;

/// Big-endian cursor over class file bytes.
pub struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        if self.remaining() < length {
            return Err(SampleError::UnexpectedEof {
                offset: self.offset,
                wanted: length,
            });
        }
        let slice = &self.data[self.offset..self.offset + length];
        self.offset += length;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.bytes(N)?);
        Ok(buf)
    }

    pub fn u1(&mut self) -> Result<u8> {
        Ok(self.array::<1>()?[0])
    }

    pub fn u2(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.array()?))
    }

    pub fn u4(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.array()?))
    }

    pub fn u8(&mut self) -> Result<u64> {
        Ok(u64::from_be_bytes(self.array()?))
    }

    pub fn f4(&mut self) -> Result<f32> {
        Ok(f32::from_be_bytes(self.array()?))
    }

    pub fn f8(&mut self) -> Result<f64> {
        Ok(f64::from_be_bytes(self.array()?))
    }
}

pub struct ClassReader<'a> {
    reader: ByteReader<'a>,
}

impl<'a> ClassReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: ByteReader::new(data),
        }
    }

    pub fn read(mut self) -> Result<ClassFile> {
        let magic = self.reader.u4()?;
        if magic != CLASS_MAGIC {
            return Err(SampleError::BadMagic { found: magic });
        }

        let minor_version = self.reader.u2()?;
        let major_version = self.reader.u2()?;
        let constant_pool = self.read_constant_pool()?;
        let access_flags = AccessFlags(self.reader.u2()?);
        let this_class = self.reader.u2()?;
        let super_class = self.reader.u2()?;

        let interfaces_count = self.reader.u2()?;
        let interfaces = (0..interfaces_count)
            .map(|_| self.reader.u2())
            .collect::<Result<Vec<_>>>()?;

        let fields = self.read_members()?;
        let methods = self.read_members()?;
        let attributes = self.read_attributes()?;

        if self.reader.remaining() > 0 {
            tracing::warn!(
                "{} trailing bytes after class structure",
                self.reader.remaining()
            );
        }

        let class_file = ClassFile {
            minor_version,
            major_version,
            constant_pool,
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            attributes,
        };

        // this_class 必須指向 Class 常數
        class_file.this_class_name()?;
        Ok(class_file)
    }

    fn read_constant_pool(&mut self) -> Result<ConstantPool> {
        let count = self.reader.u2()?;
        let mut entries = Vec::with_capacity(usize::from(count.saturating_sub(1)));

        let mut index: u16 = 1;
        while index < count {
            let tag = self.reader.u1()?;
            let constant = match tag {
                1 => {
                    let length = self.reader.u2()?;
                    let raw = self.reader.bytes(usize::from(length))?;
                    Constant::Utf8 {
                        value: decode_modified_utf8(raw),
                    }
                }
                3 => Constant::Integer {
                    value: self.reader.u4()? as i32,
                },
                4 => Constant::Float {
                    value: self.reader.f4()?,
                },
                5 => Constant::Long {
                    value: self.reader.u8()? as i64,
                },
                6 => Constant::Double {
                    value: self.reader.f8()?,
                },
                7 => Constant::Class {
                    name_index: self.reader.u2()?,
                },
                8 => Constant::String {
                    string_index: self.reader.u2()?,
                },
                9 => Constant::Fieldref {
                    class_index: self.reader.u2()?,
                    name_and_type_index: self.reader.u2()?,
                },
                10 => Constant::Methodref {
                    class_index: self.reader.u2()?,
                    name_and_type_index: self.reader.u2()?,
                },
                11 => Constant::InterfaceMethodref {
                    class_index: self.reader.u2()?,
                    name_and_type_index: self.reader.u2()?,
                },
                12 => Constant::NameAndType {
                    name_index: self.reader.u2()?,
                    descriptor_index: self.reader.u2()?,
                },
                15 => Constant::MethodHandle {
                    reference_kind: self.reader.u1()?,
                    reference_index: self.reader.u2()?,
                },
                16 => Constant::MethodType {
                    descriptor_index: self.reader.u2()?,
                },
                18 => Constant::InvokeDynamic {
                    bootstrap_method_attr_index: self.reader.u2()?,
                    name_and_type_index: self.reader.u2()?,
                },
                _ => return Err(SampleError::InvalidConstantTag { tag, index }),
            };

            let wide = constant.is_wide();
            entries.push(constant);
            index += 1;

            // long / double 佔兩個位置
            if wide {
                if index >= count {
                    return Err(SampleError::InvalidConstantIndex {
                        index: index - 1,
                        expected: "two-slot Long or Double",
                    });
                }
                entries.push(Constant::Unusable);
                index += 1;
            }
        }

        tracing::debug!("Read constant pool with {} slots", entries.len());
        Ok(ConstantPool::new(entries))
    }

    fn read_members(&mut self) -> Result<Vec<MemberInfo>> {
        let count = self.reader.u2()?;
        let mut members = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            let access_flags = AccessFlags(self.reader.u2()?);
            let name_index = self.reader.u2()?;
            let descriptor_index = self.reader.u2()?;
            let attributes = self.read_attributes()?;
            members.push(MemberInfo {
                access_flags,
                name_index,
                descriptor_index,
                attributes,
            });
        }
        Ok(members)
    }

    fn read_attributes(&mut self) -> Result<Vec<AttributeInfo>> {
        let count = self.reader.u2()?;
        let mut attributes = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            let name_index = self.reader.u2()?;
            let length = self.reader.u4()? as usize;
            let info = self.reader.bytes(length)?.to_vec();
            attributes.push(AttributeInfo { name_index, info });
        }
        Ok(attributes)
    }
}

/// Parses a complete class file from memory.
pub fn parse_class(data: &[u8]) -> Result<ClassFile> {
    ClassReader::new(data).read()
}

/// Reads and parses a class file from disk.
pub fn load_class_file<P: AsRef<Path>>(path: P) -> Result<ClassFile> {
    let path = path.as_ref();
    tracing::debug!("Loading class file {}", path.display());
    let data = std::fs::read(path)?;
    parse_class(&data)
}

/// Decodes the JVM's modified UTF-8: `C0 80` encodes NUL and supplementary
/// characters arrive as surrogate pairs. Malformed sequences become U+FFFD.
pub fn decode_modified_utf8(raw: &[u8]) -> String {
    let mut units: Vec<u16> = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        let b = raw[i];
        let continuation = |at: usize| raw.get(at).copied().filter(|c| c & 0xC0 == 0x80);

        if b & 0x80 == 0 {
            units.push(u16::from(b));
            i += 1;
        } else if b & 0xE0 == 0xC0 {
            match continuation(i + 1) {
                Some(b2) => {
                    units.push((u16::from(b & 0x1F) << 6) | u16::from(b2 & 0x3F));
                    i += 2;
                }
                None => {
                    units.push(0xFFFD);
                    i += 1;
                }
            }
        } else if b & 0xF0 == 0xE0 {
            match (continuation(i + 1), continuation(i + 2)) {
                (Some(b2), Some(b3)) => {
                    units.push(
                        (u16::from(b & 0x0F) << 12)
                            | (u16::from(b2 & 0x3F) << 6)
                            | u16::from(b3 & 0x3F),
                    );
                    i += 3;
                }
                _ => {
                    units.push(0xFFFD);
                    i += 1;
                }
            }
        } else {
            units.push(0xFFFD);
            i += 1;
        }
    }

    String::from_utf16_lossy(&units)
}
