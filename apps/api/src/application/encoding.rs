#![allow(dead_code)]

use base64::{prelude::BASE64_STANDARD, Engine};
use tracing::debug;

use crate::application::attachment::{Attachment, AttachmentSource};
use crate::application::error::EncodingError;

/// An attachment in the relay's transport encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAttachment {
    pub filename: String,
    pub content_type: String,
    /// Standard base64, padded.
    pub content: String,
    pub size_bytes: usize,
}

/// Reads the attachment fully into memory and base64-encodes it.
pub async fn encode_attachment(attachment: &Attachment) -> Result<EncodedAttachment, EncodingError> {
    let data = match &attachment.source {
        AttachmentSource::Memory(bytes) => bytes.to_vec(),
        AttachmentSource::Path(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| EncodingError::Unreadable {
                    filename: attachment.filename.clone(),
                    source,
                })?
        }
    };

    debug!(
        filename = %attachment.filename,
        bytes = data.len(),
        "Attachment encoded"
    );

    Ok(EncodedAttachment {
        filename: attachment.filename.clone(),
        content_type: attachment.content_type.clone(),
        content: BASE64_STANDARD.encode(&data),
        size_bytes: data.len(),
    })
}
