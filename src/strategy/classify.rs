use async_trait::async_trait;

use crate::breaker::Breaker;
use crate::classifier::{Classifier, Verdict};
use crate::strategy::Strategy;

/// Continues only when the classifier returns [`Verdict::Retry`] for the failure.
#[derive(Clone, Debug)]
pub struct CheckError<C> {
    classifier: C,
}

/// Creates a [`CheckError`] around `classifier`.
///
/// # Example
/// ```
/// use retryvisor::classifier::Whitelist;
/// use retryvisor::strategy::check_error;
///
/// // only "busy" is worth another attempt
/// let _strategy = check_error(Whitelist::new(["busy"]));
/// ```
pub fn check_error<C>(classifier: C) -> CheckError<C> {
    CheckError { classifier }
}

#[async_trait]
impl<E, C> Strategy<E> for CheckError<C>
where
    E: Sync,
    C: Classifier<E>,
{
    async fn check(&mut self, _attempt: u32, err: &E, _breaker: &dyn Breaker) -> bool {
        self.classifier.classify(Some(err)) == Verdict::Retry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Gate;
    use crate::classifier::{Blacklist, DefaultClassifier};

    #[tokio::test]
    async fn test_default_classifier_always_retries() {
        let gate = Gate::new();
        let mut s = check_error(DefaultClassifier);
        assert!(s.check(0, &"anything", &gate).await);
    }

    #[tokio::test]
    async fn test_blacklisted_failure_stops() {
        let gate = Gate::new();
        let mut s = check_error(Blacklist::new([404u16]));
        assert!(!s.check(0, &404u16, &gate).await);
        assert!(s.check(0, &503u16, &gate).await);
    }
}
