//! Matchers used in tests in multiple crates within the workspace.

use std::{error::Error, fmt::Debug, marker::PhantomData};

use googletest::{
    description::Description,
    matcher::{Matcher, MatcherBase, MatcherResult},
};

/// Creates a matcher against an `anyhow::Error` whose chain of causes includes an error of type
/// `E` that matches `inner`.
///
/// Algorithms return typed errors (configuration, process, binding failures) inside
/// `anyhow::Error`, often beneath added context, so the whole chain is searched rather than only
/// the outermost error.
pub fn error_in_chain<E, M>(inner: M) -> ErrorInChain<E, M> {
    ErrorInChain {
        inner,
        phantom_e: PhantomData,
    }
}

pub struct ErrorInChain<E, M> {
    inner: M,
    phantom_e: PhantomData<E>,
}

impl<E, M> ErrorInChain<E, M>
where
    E: Error + 'static,
{
    fn type_name() -> &'static str {
        std::any::type_name::<E>()
    }

    fn causes<'a>(actual: &'a anyhow::Error) -> impl Iterator<Item = &'a E> {
        actual.chain().filter_map(|cause| cause.downcast_ref::<E>())
    }
}

impl<E, M> MatcherBase for ErrorInChain<E, M> {}

impl<E, M> Matcher<&anyhow::Error> for ErrorInChain<E, M>
where
    E: Error + Debug + 'static,
    M: for<'e> Matcher<&'e E>,
{
    fn matches(&self, actual: &anyhow::Error) -> MatcherResult {
        Self::causes(actual)
            .any(|cause| self.inner.matches(cause).is_match())
            .into()
    }

    fn explain_match(&self, actual: &anyhow::Error) -> Description {
        match Self::causes(actual).next() {
            Some(cause) => Description::new()
                .text(format!("which has a cause of type {}", Self::type_name()))
                .nested(self.inner.explain_match(cause)),
            None => Description::new().text(format!(
                "which has no cause of type {} in: {actual:#}",
                Self::type_name()
            )),
        }
    }

    fn describe(&self, matcher_result: MatcherResult) -> Description {
        match matcher_result {
            MatcherResult::Match => format!(
                "has a cause of type {} which {}",
                Self::type_name(),
                self.inner.describe(MatcherResult::Match)
            )
            .into(),
            MatcherResult::NoMatch => format!(
                "has no cause of type {} which {}",
                Self::type_name(),
                self.inner.describe(MatcherResult::Match)
            )
            .into(),
        }
    }
}
