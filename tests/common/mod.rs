#![allow(dead_code)]

/// Assembles class file bytes for tests, handing out constant pool indices
/// as entries are added.
pub struct ClassBuilder {
    pool: Vec<u8>,
    next_index: u16,
    access_flags: u16,
    this_class: u16,
    super_class: u16,
    interfaces: Vec<u16>,
    fields: Vec<Vec<u8>>,
    methods: Vec<Vec<u8>>,
    attributes: Vec<Vec<u8>>,
}

impl ClassBuilder {
    pub fn new() -> Self {
        Self {
            pool: Vec::new(),
            next_index: 1,
            access_flags: 0,
            this_class: 0,
            super_class: 0,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            attributes: Vec::new(),
        }
    }

    fn push_entry(&mut self, bytes: &[u8], slots: u16) -> u16 {
        let index = self.next_index;
        self.pool.extend_from_slice(bytes);
        self.next_index += slots;
        index
    }

    pub fn utf8(&mut self, value: &str) -> u16 {
        let mut bytes = vec![1];
        bytes.extend_from_slice(&(value.len() as u16).to_be_bytes());
        bytes.extend_from_slice(value.as_bytes());
        self.push_entry(&bytes, 1)
    }

    pub fn class(&mut self, name: &str) -> u16 {
        let name_index = self.utf8(name);
        let mut bytes = vec![7];
        bytes.extend_from_slice(&name_index.to_be_bytes());
        self.push_entry(&bytes, 1)
    }

    pub fn string(&mut self, value: &str) -> u16 {
        let string_index = self.utf8(value);
        let mut bytes = vec![8];
        bytes.extend_from_slice(&string_index.to_be_bytes());
        self.push_entry(&bytes, 1)
    }

    pub fn integer(&mut self, value: i32) -> u16 {
        let mut bytes = vec![3];
        bytes.extend_from_slice(&value.to_be_bytes());
        self.push_entry(&bytes, 1)
    }

    pub fn long(&mut self, value: i64) -> u16 {
        let mut bytes = vec![5];
        bytes.extend_from_slice(&value.to_be_bytes());
        self.push_entry(&bytes, 2)
    }

    pub fn double(&mut self, value: f64) -> u16 {
        let mut bytes = vec![6];
        bytes.extend_from_slice(&value.to_be_bytes());
        self.push_entry(&bytes, 2)
    }

    pub fn name_and_type(&mut self, name: &str, descriptor: &str) -> u16 {
        let name_index = self.utf8(name);
        let descriptor_index = self.utf8(descriptor);
        let mut bytes = vec![12];
        bytes.extend_from_slice(&name_index.to_be_bytes());
        bytes.extend_from_slice(&descriptor_index.to_be_bytes());
        self.push_entry(&bytes, 1)
    }

    fn member_ref(&mut self, tag: u8, class_index: u16, name: &str, descriptor: &str) -> u16 {
        let nat = self.name_and_type(name, descriptor);
        let mut bytes = vec![tag];
        bytes.extend_from_slice(&class_index.to_be_bytes());
        bytes.extend_from_slice(&nat.to_be_bytes());
        self.push_entry(&bytes, 1)
    }

    pub fn field_ref(&mut self, class_index: u16, name: &str, descriptor: &str) -> u16 {
        self.member_ref(9, class_index, name, descriptor)
    }

    pub fn method_ref(&mut self, class_index: u16, name: &str, descriptor: &str) -> u16 {
        self.member_ref(10, class_index, name, descriptor)
    }

    pub fn interface_method_ref(&mut self, class_index: u16, name: &str, descriptor: &str) -> u16 {
        self.member_ref(11, class_index, name, descriptor)
    }

    pub fn float(&mut self, value: f32) -> u16 {
        let mut bytes = vec![4];
        bytes.extend_from_slice(&value.to_be_bytes());
        self.push_entry(&bytes, 1)
    }

    pub fn method_handle(&mut self, reference_kind: u8, reference_index: u16) -> u16 {
        let mut bytes = vec![15, reference_kind];
        bytes.extend_from_slice(&reference_index.to_be_bytes());
        self.push_entry(&bytes, 1)
    }

    pub fn method_type(&mut self, descriptor: &str) -> u16 {
        let descriptor_index = self.utf8(descriptor);
        let mut bytes = vec![16];
        bytes.extend_from_slice(&descriptor_index.to_be_bytes());
        self.push_entry(&bytes, 1)
    }

    pub fn invoke_dynamic(&mut self, bootstrap_index: u16, name: &str, descriptor: &str) -> u16 {
        let nat = self.name_and_type(name, descriptor);
        let mut bytes = vec![18];
        bytes.extend_from_slice(&bootstrap_index.to_be_bytes());
        bytes.extend_from_slice(&nat.to_be_bytes());
        self.push_entry(&bytes, 1)
    }

    /// Appends raw bytes as a pool entry, for malformed-input tests.
    pub fn raw_entry(&mut self, bytes: &[u8]) -> u16 {
        self.push_entry(bytes, 1)
    }

    pub fn access(mut self, flags: u16) -> Self {
        self.access_flags = flags;
        self
    }

    pub fn this_class(&mut self, name: &str) {
        self.this_class = self.class(name);
    }

    pub fn super_class(&mut self, name: &str) {
        self.super_class = self.class(name);
    }

    pub fn interface(&mut self, name: &str) {
        let index = self.class(name);
        self.interfaces.push(index);
    }

    fn member(&mut self, flags: u16, name: &str, descriptor: &str, attrs: &[(&str, &[u8])]) -> Vec<u8> {
        let name_index = self.utf8(name);
        let descriptor_index = self.utf8(descriptor);
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&flags.to_be_bytes());
        bytes.extend_from_slice(&name_index.to_be_bytes());
        bytes.extend_from_slice(&descriptor_index.to_be_bytes());
        bytes.extend_from_slice(&(attrs.len() as u16).to_be_bytes());
        for (attr_name, info) in attrs {
            bytes.extend(self.attribute_bytes(attr_name, info));
        }
        bytes
    }

    fn attribute_bytes(&mut self, name: &str, info: &[u8]) -> Vec<u8> {
        let name_index = self.utf8(name);
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&name_index.to_be_bytes());
        bytes.extend_from_slice(&(info.len() as u32).to_be_bytes());
        bytes.extend_from_slice(info);
        bytes
    }

    pub fn field(&mut self, flags: u16, name: &str, descriptor: &str) {
        let bytes = self.member(flags, name, descriptor, &[]);
        self.fields.push(bytes);
    }

    pub fn method(&mut self, flags: u16, name: &str, descriptor: &str, code: &[u8]) {
        let bytes = self.member(flags, name, descriptor, &[("Code", code)]);
        self.methods.push(bytes);
    }

    pub fn attribute(&mut self, name: &str, info: &[u8]) {
        let bytes = self.attribute_bytes(name, info);
        self.attributes.push(bytes);
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&0xCAFE_BABEu32.to_be_bytes());
        out.extend_from_slice(&0u16.to_be_bytes());
        out.extend_from_slice(&52u16.to_be_bytes());
        out.extend_from_slice(&self.next_index.to_be_bytes());
        out.extend_from_slice(&self.pool);
        out.extend_from_slice(&self.access_flags.to_be_bytes());
        out.extend_from_slice(&self.this_class.to_be_bytes());
        out.extend_from_slice(&self.super_class.to_be_bytes());

        out.extend_from_slice(&(self.interfaces.len() as u16).to_be_bytes());
        for index in &self.interfaces {
            out.extend_from_slice(&index.to_be_bytes());
        }
        for group in [&self.fields, &self.methods, &self.attributes] {
            out.extend_from_slice(&(group.len() as u16).to_be_bytes());
            for bytes in group {
                out.extend_from_slice(bytes);
            }
        }
        out
    }
}

/// A class shaped like the compiled sample: three fields, a constructor,
/// the static `add` helper and `main`, plus wide constants in the pool.
pub fn sample_class_bytes() -> Vec<u8> {
    let mut builder = ClassBuilder::new().access(0x0021);
    builder.this_class("Test");
    builder.super_class("java/lang/Object");
    let object = builder.super_class;
    builder.method_ref(object, "<init>", "()V");
    builder.long(20);
    builder.double(30.0);
    builder.integer(10);

    builder.field(0x0002, "a", "I");
    builder.field(0x000A, "b", "J");
    builder.field(0x0002, "c", "Ljava/lang/String;");

    builder.method(0x0000, "<init>", "()V", &[0x2A, 0xB7, 0x00, 0x08, 0xB1]);
    builder.method(0x000C, "add", "(IJ)D", &[0x1A, 0x85, 0x1F, 0x61, 0x8A, 0xAF]);
    builder.method(0x0009, "main", "([Ljava/lang/String;)V", &[0xB1]);

    builder.string("Test.java");
    builder.attribute("SourceFile", &[0x00, 0x01]);
    builder.build()
}

/// Index of the Long constant inside [`sample_class_bytes`].
pub const SAMPLE_LONG_INDEX: u16 = 9;
