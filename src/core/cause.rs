use crate::utils::error::BoxError;
use std::error::Error;
use std::fmt;

/// Several errors that failed side by side, bundled into one.
///
/// `source()` reports the first bundled error; cause searches look at all of them.
#[derive(Debug)]
pub struct AggregateError {
    message: String,
    errors: Vec<BoxError>,
}

impl AggregateError {
    pub fn new(message: impl Into<String>, errors: Vec<BoxError>) -> Self {
        Self {
            message: message.into(),
            errors,
        }
    }

    pub fn errors(&self) -> &[BoxError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} errors)", self.message, self.errors.len())
    }
}

impl Error for AggregateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.errors.first().map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

/// The outgoing edges of one node in an error's cause graph.
#[derive(Debug, Clone, Copy)]
pub enum Causes<'a> {
    Single(Option<&'a (dyn Error + 'static)>),
    Aggregate(&'a [BoxError]),
}

pub fn causes_of<'a>(err: &'a (dyn Error + 'static)) -> Causes<'a> {
    match err.downcast_ref::<AggregateError>() {
        Some(aggregate) => Causes::Aggregate(aggregate.errors()),
        None => Causes::Single(err.source()),
    }
}

/// True when `err`, any error in its `source()` chain, or any error bundled
/// in an [`AggregateError`] along the way has the concrete type `T`.
///
/// Matching is on the exact type: an error that merely wraps or resembles
/// a `T` does not count unless the `T` itself is reachable as a cause.
pub fn is_caused_by<T>(err: &(dyn Error + 'static)) -> bool
where
    T: Error + 'static,
{
    find_cause::<T>(err).is_some()
}

/// First error of type `T` in depth-first order, starting with `err` itself.
pub fn find_cause<'a, T>(err: &'a (dyn Error + 'static)) -> Option<&'a T>
where
    T: Error + 'static,
{
    if let Some(found) = err.downcast_ref::<T>() {
        return Some(found);
    }
    match causes_of(err) {
        Causes::Aggregate(errors) => errors
            .iter()
            .find_map(|inner| find_cause::<T>(inner.as_ref())),
        Causes::Single(Some(inner)) => find_cause::<T>(inner),
        Causes::Single(None) => None,
    }
}

/// Method-call form of [`is_caused_by`] and [`find_cause`].
pub trait CausedBy {
    fn is_caused_by<T: Error + 'static>(&self) -> bool;
    fn find_cause<T: Error + 'static>(&self) -> Option<&T>;
}

impl<E> CausedBy for E
where
    E: Error + 'static,
{
    fn is_caused_by<T: Error + 'static>(&self) -> bool {
        is_caused_by::<T>(self)
    }

    fn find_cause<T: Error + 'static>(&self) -> Option<&T> {
        find_cause::<T>(self)
    }
}

impl CausedBy for dyn Error + 'static {
    fn is_caused_by<T: Error + 'static>(&self) -> bool {
        is_caused_by::<T>(self)
    }

    fn find_cause<T: Error + 'static>(&self) -> Option<&T> {
        find_cause::<T>(self)
    }
}

impl CausedBy for dyn Error + Send + Sync + 'static {
    fn is_caused_by<T: Error + 'static>(&self) -> bool {
        is_caused_by::<T>(self)
    }

    fn find_cause<T: Error + 'static>(&self) -> Option<&T> {
        find_cause::<T>(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("leaf")]
    struct Leaf;

    #[derive(Debug, thiserror::Error)]
    #[error("other")]
    struct Other;

    #[test]
    fn test_causes_of_dispatches_on_aggregate() {
        let aggregate = AggregateError::new("batch", vec![Box::new(Leaf), Box::new(Other)]);
        assert_eq!(aggregate.len(), 2);
        match causes_of(&aggregate) {
            Causes::Aggregate(errors) => assert_eq!(errors.len(), 2),
            Causes::Single(_) => panic!("expected aggregate"),
        }
        assert!(matches!(causes_of(&Leaf), Causes::Single(None)));
    }

    #[test]
    fn test_aggregate_display_and_source() {
        let aggregate = AggregateError::new("batch failed", vec![Box::new(Other), Box::new(Leaf)]);
        assert_eq!(aggregate.to_string(), "batch failed (2 errors)");
        assert_eq!(aggregate.source().map(|e| e.to_string()).as_deref(), Some("other"));
        assert!(AggregateError::new("none", Vec::new()).source().is_none());
    }

    #[test]
    fn test_empty_aggregate_matches_nothing() {
        let aggregate = AggregateError::new("none", Vec::new());
        assert!(aggregate.is_empty());
        assert_eq!(aggregate.len(), 0);
        assert!(!aggregate.is_caused_by::<Leaf>());
        assert!(aggregate.is_caused_by::<AggregateError>());
    }
}
