//! Offloading hash and verify work to Tokio's blocking pool
//!
//! Argon2 is deliberately slow; running it on an async worker would stall
//! every other task scheduled there.

use crate::primitive::Primitive;
use crate::secret::Secret;
use crate::{PasswordError, PasswordHasher, Result};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use zeroize::Zeroizing;

/// Awaitable result of an offloaded password operation
pub struct AsyncPasswordResult<T> {
    receiver: oneshot::Receiver<Result<T>>,
    on_dropped: fn() -> PasswordError,
}

impl<T: Send + 'static> AsyncPasswordResult<T> {
    /// Run `work` on the blocking pool.
    ///
    /// Must be called from within a Tokio runtime.
    fn spawn<F>(work: F, on_dropped: fn() -> PasswordError) -> Self
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        tokio::task::spawn_blocking(move || {
            let _ = tx.send(work());
        });
        Self {
            receiver: rx,
            on_dropped,
        }
    }

    /// A result that is already available
    #[must_use]
    pub fn ready(result: Result<T>) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        Self {
            receiver: rx,
            on_dropped: || PasswordError::hashing("result already consumed"),
        }
    }
}

impl<T> Future for AsyncPasswordResult<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err((self.on_dropped)())),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<P: Primitive + 'static> PasswordHasher<P> {
    /// [`PasswordHasher::hash`] on the blocking pool.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn hash_async<'a>(&self, password: impl Into<Secret<'a>>) -> AsyncPasswordResult<String> {
        let secret = match password.into().to_bytes(self.encoding()) {
            Ok(secret) => secret,
            Err(e) => return AsyncPasswordResult::ready(Err(e)),
        };
        let hasher = self.clone();
        AsyncPasswordResult::spawn(
            move || hasher.hash_secret(&secret, None),
            || PasswordError::hashing("hashing task was dropped"),
        )
    }

    /// [`PasswordHasher::verify`] on the blocking pool.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn verify_async<'a>(
        &self,
        hash: impl AsRef<[u8]>,
        password: impl Into<Secret<'a>>,
    ) -> AsyncPasswordResult<bool> {
        let secret = match password.into().to_bytes(self.encoding()) {
            Ok(secret) => secret,
            Err(e) => return AsyncPasswordResult::ready(Err(e)),
        };
        let hash = Zeroizing::new(hash.as_ref().to_vec());
        let hasher = self.clone();
        AsyncPasswordResult::spawn(
            move || hasher.verify_secret(&hash, &secret),
            || PasswordError::verification("verification task was dropped"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::CHEAPEST;
    use crate::{ErrorKind, Runtime, TextEncoding};

    fn cheap() -> PasswordHasher {
        PasswordHasher::from_parameters(CHEAPEST, Runtime::Native).expect("cheapest is valid")
    }

    #[tokio::test]
    async fn hash_and_verify_off_the_runtime() {
        let hasher = cheap();
        let encoded = hasher.hash_async("hunter2").await.expect("hash");
        assert!(hasher.verify_async(&encoded, "hunter2").await.expect("verify"));

        let err = hasher
            .verify_async(&encoded, "hunter3")
            .await
            .expect_err("wrong password");
        assert_eq!(err, PasswordError::VerifyMismatch);
    }

    #[tokio::test]
    async fn invalid_hash_is_reported_asynchronously() {
        let err = cheap()
            .verify_async("$bcrypt$2b$10$abc", "hunter2")
            .await
            .expect_err("not argon2");
        assert_eq!(err.kind(), ErrorKind::InvalidHash);
    }

    #[tokio::test]
    async fn encoding_errors_resolve_immediately() {
        let hasher = PasswordHasher::builder(Runtime::Native)
            .time_cost(1)
            .memory_cost(8)
            .parallelism(1)
            .encoding(TextEncoding::Ascii)
            .build()
            .expect("valid");
        let err = hasher.hash_async("pässword").await.expect_err("not ascii");
        assert_eq!(err.kind(), ErrorKind::PasswordEncoding);
    }

    #[tokio::test]
    async fn ready_result_resolves() {
        let value = AsyncPasswordResult::ready(Ok(7u32)).await.expect("ready");
        assert_eq!(value, 7);
    }
}
