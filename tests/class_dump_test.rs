mod common;

use anyhow::Result;
use classfile_sample::{dump_class, DumpSettings, OutputFormat};
use common::sample_class_bytes;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn write_sample(dir: &Path) -> Result<String> {
    let path = dir.join("Test.class");
    std::fs::write(&path, sample_class_bytes())?;
    Ok(path.to_string_lossy().into_owned())
}

fn settings(class_path: String, format: OutputFormat) -> DumpSettings {
    DumpSettings {
        class_path,
        format,
        show_constant_pool: true,
        show_members: true,
        show_attributes: false,
    }
}

#[test]
fn test_text_dump() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let class_path = write_sample(temp_dir.path())?;

    let mut out = Vec::new();
    let summary = dump_class(&settings(class_path, OutputFormat::Text), &mut out)?;
    let text = String::from_utf8(out)?;

    assert_eq!(summary.name, "Test");
    assert!(text.starts_with("this class Test\n"));
    assert!(text.contains("super class java/lang/Object"));
    assert!(text.contains("access public super"));
    assert!(text.contains("  protected static add(IJ)D [args=3]"));
    assert!(text.contains("  private static b J"));
    assert!(text.contains("#2 = Class"));
    assert!(text.contains("#8 = Methodref"));
    assert!(text.contains("java/lang/Object.<init>:()V"));
    assert!(text.contains("#9 = Long"));
    assert!(!text.contains("#10 ="));
    assert!(text.contains("#11 = Double"));
    Ok(())
}

#[test]
fn test_text_dump_sections_can_be_hidden() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let class_path = write_sample(temp_dir.path())?;

    let mut hidden = settings(class_path, OutputFormat::Text);
    hidden.show_constant_pool = false;
    hidden.show_members = false;
    hidden.show_attributes = true;

    let mut out = Vec::new();
    dump_class(&hidden, &mut out)?;
    let text = String::from_utf8(out)?;

    assert!(!text.contains("constant pool"));
    assert!(!text.contains("methods"));
    assert!(text.contains("attributes SourceFile"));
    Ok(())
}

#[test]
fn test_json_dump() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let class_path = write_sample(temp_dir.path())?;

    let mut out = Vec::new();
    dump_class(&settings(class_path, OutputFormat::Json), &mut out)?;
    let json: serde_json::Value = serde_json::from_slice(&out)?;

    assert_eq!(json["name"], "Test");
    assert_eq!(json["super_name"], "java/lang/Object");
    assert_eq!(json["version"], "52.0");
    assert_eq!(json["methods"][1]["name"], "add");
    assert_eq!(json["methods"][1]["arg_slots"], 3);
    assert!(json["fields"][0].get("arg_slots").is_none());
    assert_eq!(json["constant_pool"][0]["tag"], "Utf8");
    assert_eq!(json["constant_pool"][0]["value"], "Test");
    assert!(json.get("attributes").is_none());
    Ok(())
}

#[test]
fn test_class_dump_binary() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let class_path = write_sample(temp_dir.path())?;

    let output = Command::new(env!("CARGO_BIN_EXE_class_dump"))
        .arg(&class_path)
        .arg("--no-constant-pool")
        .env_remove("RUST_LOG")
        .output()?;

    assert!(output.status.success());
    let text = String::from_utf8(output.stdout)?;
    assert!(text.starts_with("this class Test\n"));
    assert!(!text.contains("constant pool"));
    Ok(())
}

#[test]
fn test_class_dump_binary_with_toml_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let class_path = write_sample(temp_dir.path())?;
    let config_path = temp_dir.path().join("dump.toml");
    std::fs::write(
        &config_path,
        format!(
            "[input]\nclass_path = '{}'\n\n[output]\nformat = \"json\"\n",
            class_path
        ),
    )?;

    let output = Command::new(env!("CARGO_BIN_EXE_class_dump"))
        .arg("--config")
        .arg(&config_path)
        .env_remove("RUST_LOG")
        .output()?;

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["name"], "Test");
    Ok(())
}

#[test]
fn test_class_dump_exit_codes() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let bin = env!("CARGO_BIN_EXE_class_dump");

    // 缺少路徑: 配置錯誤
    let no_path = Command::new(bin).env_remove("RUST_LOG").output()?;
    assert_eq!(no_path.status.code(), Some(2));

    // 檔案不存在: IO 錯誤
    let missing = Command::new(bin)
        .arg(temp_dir.path().join("Missing.class"))
        .env_remove("RUST_LOG")
        .output()?;
    assert_eq!(missing.status.code(), Some(1));

    // 設定檔不存在: 配置錯誤
    let missing_config = Command::new(bin)
        .arg("--config")
        .arg(temp_dir.path().join("absent.toml"))
        .env_remove("RUST_LOG")
        .output()?;
    assert_eq!(missing_config.status.code(), Some(2));

    // 不是 class 檔: 解碼錯誤
    let bogus_path = temp_dir.path().join("Bogus.class");
    std::fs::write(&bogus_path, b"not a class file")?;
    let bogus = Command::new(bin)
        .arg(&bogus_path)
        .env_remove("RUST_LOG")
        .output()?;
    assert_eq!(bogus.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&bogus.stderr).contains("bad magic"));
    Ok(())
}
