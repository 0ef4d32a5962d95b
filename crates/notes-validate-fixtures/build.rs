use std::env;
use std::fs;
use std::path::PathBuf;

use protoc_gen_notes_validate::{PluginOptions, generate_from_descriptor_set};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let proto_dir = "proto";
    let types_proto_dir = "../notes-validate-types/proto";
    let proto_file = "test/v1/test.proto";

    println!("cargo:rerun-if-changed={proto_dir}/{proto_file}");

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let descriptor_path = out_dir.join("test_descriptor_set.bin");

    prost_build::Config::new()
        .file_descriptor_set_path(&descriptor_path)
        .compile_protos(
            &[format!("{proto_dir}/{proto_file}")],
            &[proto_dir, types_proto_dir],
        )?;

    let descriptor_set = fs::read(&descriptor_path)?;
    let generated =
        generate_from_descriptor_set(&descriptor_set, &[proto_file], &PluginOptions::default())?;

    for file in generated {
        let path = out_dir.join(&file.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, file.content)?;
    }

    Ok(())
}
