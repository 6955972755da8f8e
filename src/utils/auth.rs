use crate::core::error::Error;

/// Compares without short-circuiting on the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

pub(crate) fn authorize(key: Option<&str>, secret: &str) -> Result<(), Error> {
    match key {
        Some(key) if constant_time_eq(key.as_bytes(), secret.as_bytes()) => Ok(()),
        _ => Err(Error::InvalidKey),
    }
}
