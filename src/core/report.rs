use crate::classfile::{load_class_file, ClassFile, ClassSummary, MemberSummary};
use crate::config::{DumpSettings, OutputFormat};
use crate::core::Result;
use std::fmt::Write as _;
use std::io::Write;

/// Loads the configured class file and writes its report to `out`.
pub fn dump_class<W: Write>(settings: &DumpSettings, out: &mut W) -> Result<ClassSummary> {
    let class = load_class_file(&settings.class_path)?;
    let summary = class.summary()?;
    tracing::info!(
        "Parsed {} ({} constants, {} fields, {} methods)",
        summary.name,
        summary.constant_pool.len(),
        summary.fields.len(),
        summary.methods.len()
    );

    let rendered = match settings.format {
        OutputFormat::Text => render_text(&class, &summary, settings),
        OutputFormat::Json => render_json(&summary, settings)?,
    };
    out.write_all(rendered.as_bytes())?;
    out.flush()?;

    Ok(summary)
}

pub fn render_text(class: &ClassFile, summary: &ClassSummary, settings: &DumpSettings) -> String {
    let mut text = String::new();

    // writeln! 寫入 String 不會失敗
    let _ = writeln!(text, "this class {}", summary.name);
    if let Some(super_name) = &summary.super_name {
        let _ = writeln!(text, "super class {}", super_name);
    }
    let _ = writeln!(text, "version {}", summary.version);
    let _ = writeln!(text, "access {}", summary.access.join(" "));
    if !summary.interfaces.is_empty() {
        let _ = writeln!(text, "interfaces {}", summary.interfaces.join(", "));
    }

    if settings.show_members {
        let _ = writeln!(text, "fields");
        for field in &summary.fields {
            write_member(&mut text, field, settings.show_attributes);
        }
        let _ = writeln!(text, "methods");
        for method in &summary.methods {
            write_member(&mut text, method, settings.show_attributes);
        }
    }

    if settings.show_attributes && !summary.attributes.is_empty() {
        let _ = writeln!(text, "attributes {}", summary.attributes.join(", "));
    }

    if settings.show_constant_pool {
        let _ = writeln!(text, "constant pool");
        for entry in &summary.constant_pool {
            let detail = class
                .constant_pool
                .describe(entry.index)
                .unwrap_or_default();
            let _ = writeln!(
                text,
                "  #{} = {:<18} {}",
                entry.index,
                entry.constant.tag_name(),
                detail
            );
        }
    }

    text
}

fn write_member(text: &mut String, member: &MemberSummary, show_attributes: bool) {
    let mut line = String::from("  ");
    for flag in &member.access {
        line.push_str(flag);
        line.push(' ');
    }
    match member.arg_slots {
        Some(slots) => {
            let _ = write!(line, "{} [args={}]", member.signature(), slots);
        }
        None => {
            let _ = write!(line, "{} {}", member.name, member.descriptor);
        }
    }
    if show_attributes && !member.attributes.is_empty() {
        let _ = write!(line, " {{{}}}", member.attributes.join(", "));
    }
    let _ = writeln!(text, "{}", line);
}

pub fn render_json(summary: &ClassSummary, settings: &DumpSettings) -> Result<String> {
    let mut value = serde_json::to_value(summary)?;
    if let Some(object) = value.as_object_mut() {
        if !settings.show_constant_pool {
            object.remove("constant_pool");
        }
        if !settings.show_members {
            object.remove("fields");
            object.remove("methods");
        }
        if !settings.show_attributes {
            object.remove("attributes");
        }
    }

    let mut rendered = serde_json::to_string_pretty(&value)?;
    rendered.push('\n');
    Ok(rendered)
}
