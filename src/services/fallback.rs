use std::{fmt::Display, future::Future, pin::Pin};

use crate::{error::AttemptError, models::BookRecord};

type AttemptFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, AttemptError>> + Send + 'a>>;

/// Whether a successfully decoded payload actually carries content
pub trait Usable {
    fn is_usable(&self) -> bool;
}

impl<T> Usable for Vec<T> {
    fn is_usable(&self) -> bool {
        !self.is_empty()
    }
}

impl Usable for BookRecord {
    fn is_usable(&self) -> bool {
        true
    }
}

/// Which step of a policy produced the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Attempt(&'static str),
    Substitute,
}

impl Source {
    pub fn label(&self) -> &'static str {
        match self {
            Source::Attempt(label) => *label,
            Source::Substitute => "substitute",
        }
    }

    pub fn is_substitute(&self) -> bool {
        matches!(self, Source::Substitute)
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The single value a policy resolves to, tagged with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: Source,
}

struct Attempt<'a, T> {
    label: &'static str,
    run: Box<dyn FnOnce() -> AttemptFuture<'a, T> + Send + 'a>,
}

/// Ordered attempts plus a substitute
///
/// Attempts run one at a time in the order they were added. The first one to
/// return a usable value wins and the rest are never started. Each attempt runs
/// at most once per resolution.
pub struct ResolutionPolicy<'a, T> {
    name: &'static str,
    attempts: Vec<Attempt<'a, T>>,
}

impl<'a, T> ResolutionPolicy<'a, T>
where
    T: Usable + Send + 'a,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attempts: Vec::new(),
        }
    }

    /// Appends an attempt at the lowest priority so far
    pub fn attempt<F, Fut>(mut self, label: &'static str, run: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = Result<T, AttemptError>> + Send + 'a,
    {
        self.attempts.push(Attempt {
            label,
            run: Box::new(move || Box::pin(run()) as AttemptFuture<'a, T>),
        });
        self
    }

    /// Runs the attempts and returns the first usable result, if any
    pub async fn first_usable(self) -> Option<Resolved<T>> {
        let policy = self.name;

        for Attempt { label, run } in self.attempts {
            match run().await {
                Ok(value) if value.is_usable() => {
                    tracing::debug!(policy, attempt = label, "Resolution attempt succeeded");
                    return Some(Resolved {
                        value,
                        source: Source::Attempt(label),
                    });
                }
                Ok(_) => log_failure(policy, label, &AttemptError::Empty),
                Err(e) => log_failure(policy, label, &e),
            }
        }

        None
    }

    /// Runs the attempts, falling back to `substitute` when none is usable
    pub async fn resolve<S>(self, substitute: S) -> Resolved<T>
    where
        S: FnOnce() -> T + Send,
    {
        let policy = self.name;

        match self.first_usable().await {
            Some(resolved) => resolved,
            None => {
                tracing::warn!(policy, "All resolution attempts failed, serving substitute");
                Resolved {
                    value: substitute(),
                    source: Source::Substitute,
                }
            }
        }
    }
}

fn log_failure(policy: &'static str, attempt: &'static str, error: &AttemptError) {
    if matches!(error, AttemptError::Unconfigured) {
        tracing::debug!(policy, attempt, "Skipping attempt, upstream not configured");
    } else {
        tracing::warn!(policy, attempt, error = %error, "Resolution attempt failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    #[test]
    fn test_first_success_wins_and_skips_rest() {
        let log = Mutex::new(Vec::new());
        let calls = &log;

        let resolved = tokio_test::block_on(
            ResolutionPolicy::<Vec<i32>>::new("test")
                .attempt("a", move || async move {
                    calls.lock().unwrap().push("a");
                    Err(AttemptError::BadStatus(StatusCode::INTERNAL_SERVER_ERROR))
                })
                .attempt("b", move || async move {
                    calls.lock().unwrap().push("b");
                    Ok(vec![2])
                })
                .attempt("c", move || async move {
                    calls.lock().unwrap().push("c");
                    Ok(vec![3])
                })
                .resolve(|| vec![0]),
        );

        assert_eq!(resolved.value, vec![2]);
        assert_eq!(resolved.source, Source::Attempt("b"));
        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_result_falls_through() {
        let resolved = tokio_test::block_on(
            ResolutionPolicy::<Vec<i32>>::new("test")
                .attempt("empty", || async { Ok(Vec::new()) })
                .attempt("full", || async { Ok(vec![7]) })
                .resolve(Vec::new),
        );

        assert_eq!(resolved.value, vec![7]);
        assert_eq!(resolved.source.label(), "full");
    }

    #[test]
    fn test_substitute_only_when_everything_fails() {
        let resolved = tokio_test::block_on(
            ResolutionPolicy::<Vec<i32>>::new("test")
                .attempt("down", || async { Err(AttemptError::Timeout) })
                .attempt("empty", || async { Ok(Vec::new()) })
                .resolve(|| vec![42]),
        );

        assert_eq!(resolved.value, vec![42]);
        assert!(resolved.source.is_substitute());
        assert_eq!(resolved.source.to_string(), "substitute");
    }

    #[test]
    fn test_no_attempts_yields_substitute() {
        let resolved =
            tokio_test::block_on(ResolutionPolicy::<Vec<i32>>::new("test").resolve(|| vec![1]));
        assert_eq!(resolved.value, vec![1]);
        assert!(resolved.source.is_substitute());
    }

    #[test]
    fn test_first_usable_none_when_all_fail() {
        let resolved = tokio_test::block_on(
            ResolutionPolicy::<Vec<i32>>::new("test")
                .attempt("down", || async {
                    Err(AttemptError::Unconfigured)
                })
                .first_usable(),
        );
        assert!(resolved.is_none());
    }
}
