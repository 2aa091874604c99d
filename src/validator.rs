// Copyright 2026 Grzegorz Blach
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Expected-value matching for client data fields.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use crate::types::{BoxError, ContextField, Error, Result};

type PredicateFn = dyn Fn(String) -> BoxFuture<'static, std::result::Result<bool, BoxError>>
    + Send
    + Sync;

/// An expected value for an observed client data field.
///
/// Either a literal that the observed value must equal, or a predicate that
/// decides. Predicates are asynchronous so they can consult a database or a
/// remote allow-list.
///
/// # Example
///
/// ```
/// # use passki_rp::Validator;
/// let exact = Validator::exact("https://example.com");
/// let any = Validator::any_of(["https://example.com", "https://www.example.com"]);
/// let custom = Validator::from_fn(|origin| origin.ends_with(".example.com"));
/// # let _ = (exact, any, custom);
/// ```
#[derive(Clone)]
pub enum Validator {
    /// The observed value must equal this string.
    Exact(String),
    /// The observed value must be accepted by this predicate.
    Predicate(Arc<PredicateFn>),
}

impl Validator {
    /// Accepts exactly `value`.
    pub fn exact(value: impl Into<String>) -> Self {
        Validator::Exact(value.into())
    }

    /// Accepts any of `values`.
    pub fn any_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed: Arc<[String]> = values.into_iter().map(Into::into).collect();
        Self::from_fn(move |value| allowed.iter().any(|a| a == value))
    }

    /// Wraps a synchronous predicate.
    pub fn from_fn<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Validator::Predicate(Arc::new(move |value: String| {
            futures::future::ready(Ok::<_, BoxError>(predicate(&value))).boxed()
        }))
    }

    /// Wraps an asynchronous, fallible predicate.
    ///
    /// An error returned by the predicate aborts verification.
    pub fn from_async<F, Fut, E>(predicate: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<bool, E>> + Send + 'static,
        E: Into<BoxError> + 'static,
    {
        Validator::Predicate(Arc::new(move |value: String| {
            predicate(value)
                .map(|res| res.map_err(Into::<BoxError>::into))
                .boxed()
        }))
    }

    /// Evaluates the validator against an observed value.
    pub async fn is_satisfied_by(&self, value: &str) -> std::result::Result<bool, BoxError> {
        match self {
            Validator::Exact(expected) => Ok(expected == value),
            Validator::Predicate(predicate) => predicate(value.to_string()).await,
        }
    }

    /// Fails with [`Error::UnexpectedContext`] unless `value` is accepted.
    pub(crate) async fn require(&self, field: ContextField, value: &str) -> Result<()> {
        let accepted = self
            .is_satisfied_by(value)
            .await
            .map_err(|source| Error::Validator { field, source })?;
        if !accepted {
            tracing::debug!(%field, observed = value, "client data rejected by validator");
            return Err(Error::UnexpectedContext {
                field,
                observed: value.to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Validator::Exact(value) => f.debug_tuple("Exact").field(value).finish(),
            Validator::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<&str> for Validator {
    fn from(value: &str) -> Self {
        Validator::exact(value)
    }
}

impl From<String> for Validator {
    fn from(value: String) -> Self {
        Validator::Exact(value)
    }
}
