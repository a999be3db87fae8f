use crate::domain::container::Container;
use crate::domain::errors::CodecError;
use crate::ports::inbound::ContainerCodec;
use bincode::{ErrorKind, Options};

pub const MAGIC: &[u8; 4] = b"VRSC";
pub const FORMAT_VERSION: u8 = 1;

const HEADER_LEN: usize = MAGIC.len() + 1;
/// Upper bound on a decoded body; certificates are a few KiB.
const MAX_BODY_LEN: u64 = 1024 * 1024;

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_limit(MAX_BODY_LEN)
        .reject_trailing_bytes()
}

fn map_decode_error(err: bincode::Error) -> CodecError {
    match *err {
        ErrorKind::Io(ref io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
            CodecError::Truncated
        }
        ErrorKind::InvalidTagEncoding(_)
        | ErrorKind::InvalidBoolEncoding(_)
        | ErrorKind::InvalidCharEncoding
        | ErrorKind::InvalidUtf8Encoding(_) => CodecError::TypeMismatch(err.to_string()),
        _ => CodecError::Malformed(err.to_string()),
    }
}

/// Default container codec using bincode behind a magic/version header.
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeContainerCodec;

impl BincodeContainerCodec {
    pub fn new() -> Self {
        Self
    }
}

impl ContainerCodec for BincodeContainerCodec {
    fn encode(&self, container: &Container) -> Result<Vec<u8>, CodecError> {
        let body = options()
            .serialize(container)
            .map_err(|e| CodecError::Encoding(e.to_string()))?;
        let mut out = Vec::with_capacity(HEADER_LEN + body.len());
        out.extend_from_slice(MAGIC);
        out.push(FORMAT_VERSION);
        out.extend(body);
        Ok(out)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Container, CodecError> {
        if bytes.len() < HEADER_LEN {
            return if MAGIC.starts_with(bytes) {
                Err(CodecError::Truncated)
            } else {
                Err(CodecError::BadMagic)
            };
        }
        let (header, body) = bytes.split_at(HEADER_LEN);
        if &header[..MAGIC.len()] != MAGIC {
            return Err(CodecError::BadMagic);
        }
        if header[MAGIC.len()] != FORMAT_VERSION {
            return Err(CodecError::UnsupportedVersion(header[MAGIC.len()]));
        }
        options().deserialize(body).map_err(map_decode_error)
    }
}
