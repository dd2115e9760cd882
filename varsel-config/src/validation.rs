//! Custom validation functions shared across settings modules.

use validator::ValidationError;

/// Processor names end up in every log line, so keep them short and
/// printable: at most 64 bytes of graphic ASCII (spaces allowed).
pub fn validate_processor_name(name: &str) -> Result<(), ValidationError> {
    let valid = !name.is_empty()
        && name.len() <= 64
        && name.chars().all(|c| c.is_ascii_graphic() || c == ' ');

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_processor_name"))
    }
}
