//! Secret directory name derivation.
//!
//! The name for a `(field, form)` pair is a salted one-way hash, so the
//! directory location is deterministic for everyone holding the server
//! secret and unguessable for everyone else. The inputs are framed with a
//! separator byte that cannot appear in identifiers, so shifting
//! characters between field and form id can never produce the same digest
//! input.

use formkit_types::{FieldId, FormId};
use sha2::{Digest, Sha256};

/// Separator framing the hash inputs. 0x1f (ASCII unit separator) does not
/// occur in practical identifiers.
const FRAME: [u8; 1] = [0x1f];

/// Derives the secret directory name for a field/form pair.
///
/// Equal pairs always derive equal names; all files uploaded for the pair
/// share one directory.
#[must_use]
pub fn secret_dir_name(field_id: &FieldId, form_id: &FormId, server_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(field_id.as_str().as_bytes());
    hasher.update(FRAME);
    hasher.update(form_id.as_str().as_bytes());
    hasher.update(FRAME);
    hasher.update(server_secret.as_bytes());
    hex::encode(hasher.finalize())
}
