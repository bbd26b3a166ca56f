//! Built-in sequence collaborator
//!
//! [`BuiltinCatalog`] answers fetch tickets for a handful of well-known OEIS
//! entries without touching the network. Terms are generated at construction
//! from the engine's own sequences.

use super::external::{FetchError, OeisId, Resolved};
use super::{Recurrence, A037992, A193651};
use crate::number::is_prime;
use num_bigint::BigInt;
use rustc_hash::FxHashMap;

/// Anything that can turn an identifier into a list of terms.
pub trait SequenceSource {
    fn fetch(&self, id: &OeisId) -> Result<Resolved, FetchError>;
}

#[derive(Debug, Clone)]
pub struct BuiltinCatalog {
    entries: FxHashMap<String, Resolved>,
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        let mut catalog = BuiltinCatalog {
            entries: FxHashMap::default(),
        };

        let mut fibonacci = Recurrence::fibonacci();
        catalog.insert(
            "A000045",
            "Fibonacci numbers",
            (0..50).map(|_| fibonacci.advance()).collect(),
        );

        let mut pell = Recurrence::pell();
        catalog.insert(
            "A000129",
            "Pell numbers",
            (0..50).map(|_| pell.advance()).collect(),
        );

        catalog.insert(
            "A000040",
            "The prime numbers",
            (2..1000u32)
                .map(BigInt::from)
                .filter(is_prime)
                .collect(),
        );

        let mut factorial = BigInt::from(1);
        let mut factorials = vec![factorial.clone()];
        for n in 1..=20u32 {
            factorial *= n;
            factorials.push(factorial.clone());
        }
        catalog.insert("A000142", "Factorial numbers", factorials);

        let mut a037992 = A037992::new();
        catalog.insert(
            "A037992",
            "Smallest number with 2^n divisors",
            (0..20).map(|_| a037992.advance()).collect(),
        );

        let mut a193651 = A193651::new();
        catalog.insert(
            "A193651",
            "Ceiling of half the product of the first n odd numbers",
            (0..20).map(|_| a193651.advance()).collect(),
        );

        catalog
    }

    fn insert(&mut self, id: &str, name: &str, values: Vec<BigInt>) {
        self.entries.insert(
            id.to_string(),
            Resolved {
                name: name.to_string(),
                values,
            },
        );
    }

    /// Identifiers the catalog can answer for, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceSource for BuiltinCatalog {
    fn fetch(&self, id: &OeisId) -> Result<Resolved, FetchError> {
        match self.entries.get(id.as_str()) {
            Some(resolved) if resolved.values.is_empty() => Err(FetchError::Empty {
                id: id.to_string(),
            }),
            Some(resolved) => Ok(resolved.clone()),
            None => Err(FetchError::UnknownSequence { id: id.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetch(id: &str) -> Result<Resolved, FetchError> {
        BuiltinCatalog::new().fetch(&OeisId::parse(id).unwrap())
    }

    #[test]
    fn test_known_ids() {
        assert_eq!(
            BuiltinCatalog::new().ids(),
            vec!["A000040", "A000045", "A000129", "A000142", "A037992", "A193651"]
        );
    }

    #[test]
    fn test_primes_below_thousand() {
        let primes = fetch("a000040").unwrap().values;
        assert_eq!(primes.len(), 168);
        assert_eq!(primes[0], BigInt::from(2));
        assert_eq!(primes[167], BigInt::from(997));
    }

    #[test]
    fn test_factorials() {
        let factorials = fetch("A000142").unwrap().values;
        assert_eq!(factorials.len(), 21);
        assert_eq!(factorials[20].to_string(), "2432902008176640000");
    }

    #[test]
    fn test_fibonacci_entry() {
        let resolved = fetch("A000045").unwrap();
        assert_eq!(resolved.name, "Fibonacci numbers");
        assert_eq!(resolved.values.len(), 50);
        assert_eq!(resolved.values[10], BigInt::from(55));
    }

    #[test]
    fn test_unknown_id() {
        assert_eq!(
            fetch("A999999").unwrap_err(),
            FetchError::UnknownSequence {
                id: "A999999".to_string()
            }
        );
    }
}
