//! Soft-fail results
//!
//! Adapters that must degrade instead of failing return [`Outcome`] rather than
//! `Result`, so the two error policies are visible at every call site.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    /// The data was fetched and normalized
    Loaded(T),
    /// The data could not be produced; `reason` is for logs and "no data" banners
    Unavailable { reason: String },
}

impl<T> Outcome<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Discard the reason
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Self::Loaded(value) => Outcome::Loaded(value),
            Self::Unavailable { reason } => Outcome::Unavailable {
                reason: reason.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_option() {
        assert_eq!(Outcome::Loaded(3).into_option(), Some(3));
        assert_eq!(Outcome::<i32>::unavailable("gone").into_option(), None);
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let json = serde_json::to_value(Outcome::<u8>::unavailable("no genomic info")).unwrap();
        assert_eq!(json["status"], "unavailable");
        assert_eq!(json["reason"], "no genomic info");
    }
}
