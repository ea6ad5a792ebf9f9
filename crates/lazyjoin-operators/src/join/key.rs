//! Key-extraction contract.
//!
//! A key function maps an element to a hashable key. It must be a pure,
//! deterministic function of its input: the index is built once and probed
//! with keys computed later, so a key that changes between calls breaks
//! matching.

use std::convert::Infallible;

pub trait KeyFn<T> {
    type Key;
    type Error: std::error::Error + Send + Sync + 'static;

    fn extract(&mut self, item: &T) -> Result<Self::Key, Self::Error>;
}

/// Key function that cannot fail.
#[derive(Debug, Clone, Copy)]
pub struct Pure<F>(pub F);

impl<T, K, F> KeyFn<T> for Pure<F>
where
    F: FnMut(&T) -> K,
{
    type Key = K;
    type Error = Infallible;

    fn extract(&mut self, item: &T) -> Result<K, Infallible> {
        Ok((self.0)(item))
    }
}

/// Key function returning `Result`; an `Err` aborts the traversal that hit it.
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(pub F);

impl<T, K, E, F> KeyFn<T> for Fallible<F>
where
    F: FnMut(&T) -> Result<K, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Key = K;
    type Error = E;

    fn extract(&mut self, item: &T) -> Result<K, E> {
        (self.0)(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_key() {
        let mut k = Pure(|s: &&str| s.len());
        assert_eq!(k.extract(&"four").unwrap(), 4);
    }

    #[test]
    fn test_fallible_key_passes_errors_through() {
        let mut k = Fallible(|s: &&str| s.parse::<i32>());
        assert_eq!(k.extract(&"12").unwrap(), 12);
        assert!(k.extract(&"twelve").is_err());
    }
}
