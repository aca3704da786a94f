//! Loading signature and public key material from disk

use crate::error::{Error, Result};
use rekord_crypto::armor;
use rekord_types::Encoded;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read a key or signature file and classify it as armored or binary
///
/// The armor probe rewinds the file, so the returned payload is the complete
/// file contents either way. `what` names the input in errors and logs.
pub fn load_key_material(path: &Path, what: &'static str) -> Result<Encoded> {
    let io_error = |source| Error::Io {
        what,
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(io_error)?;
    let class = armor::probe(&mut file).map_err(io_error)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(io_error)?;

    tracing::info!(what, path = %path.display(), encoding = %class, "loaded {}", what);
    Ok(Encoded::new(class, bytes))
}
