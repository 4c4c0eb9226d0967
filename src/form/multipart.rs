use crate::core::value::FieldValue;
use crate::form::payload::FormPayload;
use ::multipart::client::lazy::Multipart;
use std::io::{self, Cursor, Read};

/// A fully serialized `multipart/form-data` request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBody {
    /// `multipart/form-data; boundary=...`
    pub content_type: String,
    pub bytes: Vec<u8>,
}

// Boundary for payloads without parts.
const EMPTY_BOUNDARY: &str = "workout-form-empty";

pub fn encode(payload: &FormPayload) -> io::Result<EncodedBody> {
    if payload.is_empty() {
        return Ok(EncodedBody {
            content_type: format!("multipart/form-data; boundary={EMPTY_BOUNDARY}"),
            bytes: format!("--{EMPTY_BOUNDARY}--\r\n").into_bytes(),
        });
    }

    let mut multipart = Multipart::new();

    for (name, value) in payload {
        match value {
            FieldValue::Text(text) => {
                multipart.add_text(name.as_str(), text.as_str());
            }
            FieldValue::Binary(file) => {
                let mime = file
                    .content_type
                    .as_deref()
                    .and_then(|content_type| content_type.parse::<mime::Mime>().ok())
                    .unwrap_or(mime::APPLICATION_OCTET_STREAM);
                multipart.add_stream(
                    name.as_str(),
                    Cursor::new(file.bytes.as_slice()),
                    Some(file.filename.as_str()),
                    Some(mime),
                );
            }
        }
    }

    let mut prepared = multipart.prepare().map_err(|err| err.error)?;
    let content_type = format!("multipart/form-data; boundary={}", prepared.boundary());

    let mut bytes = Vec::new();
    prepared.read_to_end(&mut bytes)?;

    Ok(EncodedBody {
        content_type,
        bytes,
    })
}
