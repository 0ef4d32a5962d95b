//! Plugin protocol plumbing: decoding `CodeGeneratorRequest`s into a
//! descriptor pool and encoding results as a `CodeGeneratorResponse`.
//!
//! `prost_types` drops unknown fields, which would lose the
//! `validate.rules` extension on field options. The request's files are
//! therefore kept as raw bytes and loaded through `prost-reflect`, which
//! preserves extension values.

use prost::Message;
use prost::encoding::{WireType, decode_key, decode_varint, encode_key, encode_varint};
use prost_reflect::DescriptorPool;
use prost_types::compiler::CodeGeneratorResponse;
use prost_types::compiler::code_generator_response::{Feature, File};

use crate::config::PluginOptions;
use crate::emit::GeneratedFile;
use crate::error::Error;

// Wire format tag numbers for FileDescriptorSet.
const SET_FILE: u32 = 1;

// Wire format tag numbers for FileDescriptorProto.
mod file_tags {
    pub const NAME: u32 = 1;
    pub const SYNTAX: u32 = 12;
}

/// `CodeGeneratorRequest` with `proto_file` left undecoded.
#[derive(Clone, PartialEq, Message)]
struct RawCodeGeneratorRequest {
    #[prost(string, repeated, tag = "1")]
    file_to_generate: Vec<String>,
    #[prost(string, optional, tag = "2")]
    parameter: Option<String>,
    #[prost(bytes = "vec", repeated, tag = "15")]
    proto_file: Vec<Vec<u8>>,
}

/// A decoded plugin request.
#[derive(Debug, Clone)]
pub struct PluginRequest {
    /// Files protoc asked for output for, in request order.
    pub files_to_generate: Vec<String>,
    pub options: PluginOptions,
    /// Every file of the request, including imports.
    pub pool: DescriptorPool,
}

/// Decode an encoded `CodeGeneratorRequest`.
///
/// # Errors
///
/// Fails when the bytes are not a request, when the parameter string is
/// invalid, or when the descriptors cannot be loaded.
pub fn decode_request(bytes: &[u8]) -> Result<PluginRequest, Error> {
    let raw = RawCodeGeneratorRequest::decode(bytes)?;
    let options = PluginOptions::from_parameter(raw.parameter.as_deref().unwrap_or_default())?;
    let pool = pool_from_files(&raw.proto_file)?;

    tracing::debug!(
        files = raw.file_to_generate.len(),
        descriptors = raw.proto_file.len(),
        "decoded CodeGeneratorRequest"
    );

    Ok(PluginRequest {
        files_to_generate: raw.file_to_generate,
        options,
        pool,
    })
}

/// Load a pool from encoded `FileDescriptorProto`s, dependencies first.
///
/// # Errors
///
/// See [`pool_from_descriptor_set`].
pub fn pool_from_files<B: AsRef<[u8]>>(files: &[B]) -> Result<DescriptorPool, Error> {
    let mut set = Vec::new();
    for file in files {
        let file = file.as_ref();
        encode_key(SET_FILE, WireType::LengthDelimited, &mut set);
        encode_varint(file.len() as u64, &mut set);
        set.extend_from_slice(file);
    }
    pool_from_descriptor_set(&set)
}

/// Load a pool from an encoded `FileDescriptorSet`.
///
/// # Errors
///
/// Rejects files using editions syntax, which `prost-reflect` cannot load,
/// and fails on malformed or inconsistent descriptors.
pub fn pool_from_descriptor_set(bytes: &[u8]) -> Result<DescriptorPool, Error> {
    for file in split_descriptor_set(bytes)? {
        let header = scan_file(file)?;
        if header.syntax == Some(b"editions".as_slice()) {
            let file = header
                .name
                .map(|name| String::from_utf8_lossy(name).into_owned())
                .unwrap_or_default();
            return Err(Error::UnsupportedEditions { file });
        }
    }

    Ok(DescriptorPool::decode(bytes)?)
}

/// Encode generation results, or the error that stopped generation.
#[must_use]
pub fn build_response(result: Result<Vec<GeneratedFile>, Error>) -> CodeGeneratorResponse {
    let mut response = CodeGeneratorResponse {
        supported_features: Some(Feature::Proto3Optional as u64),
        ..Default::default()
    };

    match result {
        Ok(files) => {
            response.file = files
                .into_iter()
                .map(|file| File {
                    name: Some(file.name),
                    content: Some(file.content),
                    ..Default::default()
                })
                .collect();
        }
        Err(err) => response.error = Some(err.to_string()),
    }

    response
}

/// The `name` and `syntax` of an encoded `FileDescriptorProto`.
struct FileHeader<'a> {
    name: Option<&'a [u8]>,
    syntax: Option<&'a [u8]>,
}

fn split_descriptor_set(bytes: &[u8]) -> Result<Vec<&[u8]>, Error> {
    let mut cursor = bytes;
    let mut files = Vec::new();

    while !cursor.is_empty() {
        let (tag, wire_type) = decode_key(&mut cursor).map_err(malformed)?;
        if (tag, wire_type) == (SET_FILE, WireType::LengthDelimited) {
            files.push(take_len_delimited(&mut cursor)?);
        } else {
            skip_wire_value(&mut cursor, wire_type)?;
        }
    }

    Ok(files)
}

fn scan_file(bytes: &[u8]) -> Result<FileHeader<'_>, Error> {
    let mut cursor = bytes;
    let mut header = FileHeader {
        name: None,
        syntax: None,
    };

    while !cursor.is_empty() {
        let (tag, wire_type) = decode_key(&mut cursor).map_err(malformed)?;
        match (tag, wire_type) {
            (file_tags::NAME, WireType::LengthDelimited) => {
                header.name = Some(take_len_delimited(&mut cursor)?);
            }
            (file_tags::SYNTAX, WireType::LengthDelimited) => {
                header.syntax = Some(take_len_delimited(&mut cursor)?);
            }
            _ => skip_wire_value(&mut cursor, wire_type)?,
        }
    }

    Ok(header)
}

fn malformed(err: prost::DecodeError) -> Error {
    Error::MalformedDescriptorSet(err.to_string())
}

fn take_len_delimited<'a>(cursor: &mut &'a [u8]) -> Result<&'a [u8], Error> {
    let len = usize::try_from(decode_varint(cursor).map_err(malformed)?)
        .map_err(|_| Error::MalformedDescriptorSet("length overflows usize".to_string()))?;
    if cursor.len() < len {
        return Err(Error::MalformedDescriptorSet(format!(
            "length {len} exceeds remaining {} bytes",
            cursor.len()
        )));
    }
    let remaining: &'a [u8] = *cursor;
    let (value, rest) = remaining.split_at(len);
    *cursor = rest;
    Ok(value)
}

fn skip_wire_value(cursor: &mut &[u8], wire_type: WireType) -> Result<(), Error> {
    let width = match wire_type {
        WireType::Varint => {
            decode_varint(cursor).map_err(malformed)?;
            return Ok(());
        }
        WireType::LengthDelimited => {
            take_len_delimited(cursor)?;
            return Ok(());
        }
        WireType::ThirtyTwoBit => 4,
        WireType::SixtyFourBit => 8,
        WireType::StartGroup | WireType::EndGroup => {
            return Err(Error::MalformedDescriptorSet(
                "unexpected group in descriptor".to_string(),
            ));
        }
    };

    if cursor.len() < width {
        return Err(Error::MalformedDescriptorSet("truncated fixed-width value".to_string()));
    }
    *cursor = &cursor[width..];
    Ok(())
}
