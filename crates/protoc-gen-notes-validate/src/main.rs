use std::io::{self, Read, Write};
use std::process::ExitCode;

use prost::Message;

fn main() -> ExitCode {
    protoc_gen_notes_validate::logging::init_logging();

    let mut input = Vec::new();
    if let Err(err) = io::stdin().read_to_end(&mut input) {
        tracing::error!(error = %err, "failed to read CodeGeneratorRequest from stdin");
        return ExitCode::FAILURE;
    }

    let response = protoc_gen_notes_validate::generate_from_bytes(&input);

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(&response.encode_to_vec())
        .and_then(|()| stdout.flush())
    {
        tracing::error!(error = %err, "failed to write CodeGeneratorResponse to stdout");
        return ExitCode::FAILURE;
    }

    if response.error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
