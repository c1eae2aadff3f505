//! # Error classification.
//!
//! A [`Classifier`] maps the outcome of an attempt to a [`Verdict`]. The loop
//! never calls a classifier itself; the [`check_error`](crate::strategy::check_error)
//! strategy does, continuing only on [`Verdict::Retry`].
//!
//! - [`DefaultClassifier`] `None → Succeed`, anything else `→ Retry`
//! - [`Whitelist`] retry only the listed failures, fail on the rest
//! - [`Blacklist`] fail on the listed failures, retry the rest
//! - any `Fn(Option<&E>) -> Verdict` closure

/// What to do with the outcome of an attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The attempt succeeded; nothing to retry.
    Succeed,
    /// The failure is transient; another attempt may succeed.
    Retry,
    /// The failure is permanent; stop.
    Fail,
}

/// Maps an attempt's failure (or its absence) to a [`Verdict`].
pub trait Classifier<E>: Send {
    /// Classifies `err`; `None` means the attempt succeeded.
    fn classify(&self, err: Option<&E>) -> Verdict;
}

impl<E, F> Classifier<E> for F
where
    F: Fn(Option<&E>) -> Verdict + Send,
{
    fn classify(&self, err: Option<&E>) -> Verdict {
        self(err)
    }
}

/// Retries every failure.
///
/// # Example
/// ```
/// use retryvisor::classifier::{Classifier, DefaultClassifier, Verdict};
///
/// let c = DefaultClassifier;
/// assert_eq!(Classifier::<&str>::classify(&c, None), Verdict::Succeed);
/// assert_eq!(c.classify(Some(&"error")), Verdict::Retry);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultClassifier;

impl<E> Classifier<E> for DefaultClassifier {
    fn classify(&self, err: Option<&E>) -> Verdict {
        match err {
            None => Verdict::Succeed,
            Some(_) => Verdict::Retry,
        }
    }
}

/// Retries only failures equal to one of the listed values.
#[derive(Clone, Debug, Default)]
pub struct Whitelist<E> {
    errors: Vec<E>,
}

impl<E> Whitelist<E> {
    /// Creates a whitelist from the retryable failures.
    pub fn new(errors: impl IntoIterator<Item = E>) -> Self {
        Self {
            errors: errors.into_iter().collect(),
        }
    }
}

impl<E: PartialEq + Send> Classifier<E> for Whitelist<E> {
    fn classify(&self, err: Option<&E>) -> Verdict {
        match err {
            None => Verdict::Succeed,
            Some(e) if self.errors.contains(e) => Verdict::Retry,
            Some(_) => Verdict::Fail,
        }
    }
}

/// Fails on failures equal to one of the listed values, retries the rest.
#[derive(Clone, Debug, Default)]
pub struct Blacklist<E> {
    errors: Vec<E>,
}

impl<E> Blacklist<E> {
    /// Creates a blacklist from the permanent failures.
    pub fn new(errors: impl IntoIterator<Item = E>) -> Self {
        Self {
            errors: errors.into_iter().collect(),
        }
    }
}

impl<E: PartialEq + Send> Classifier<E> for Blacklist<E> {
    fn classify(&self, err: Option<&E>) -> Verdict {
        match err {
            None => Verdict::Succeed,
            Some(e) if self.errors.contains(e) => Verdict::Fail,
            Some(_) => Verdict::Retry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Net {
        Timeout,
        Refused,
        BadRequest,
    }

    #[test]
    fn test_default_classifier() {
        let c = DefaultClassifier;
        assert_eq!(Classifier::<Net>::classify(&c, None), Verdict::Succeed);
        assert_eq!(c.classify(Some(&Net::BadRequest)), Verdict::Retry);
    }

    #[test]
    fn test_whitelist() {
        let c = Whitelist::new([Net::Timeout, Net::Refused]);
        assert_eq!(c.classify(None), Verdict::Succeed);
        assert_eq!(c.classify(Some(&Net::Timeout)), Verdict::Retry);
        assert_eq!(c.classify(Some(&Net::BadRequest)), Verdict::Fail);
    }

    #[test]
    fn test_blacklist() {
        let c = Blacklist::new([Net::BadRequest]);
        assert_eq!(c.classify(None), Verdict::Succeed);
        assert_eq!(c.classify(Some(&Net::Refused)), Verdict::Retry);
        assert_eq!(c.classify(Some(&Net::BadRequest)), Verdict::Fail);
    }

    #[test]
    fn test_closure_classifier() {
        let c = |err: Option<&Net>| match err {
            Some(Net::Timeout) => Verdict::Retry,
            Some(_) => Verdict::Fail,
            None => Verdict::Succeed,
        };
        assert_eq!(c.classify(Some(&Net::Timeout)), Verdict::Retry);
        assert_eq!(c.classify(Some(&Net::Refused)), Verdict::Fail);
    }
}
