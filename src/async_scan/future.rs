//! Async feed future.
//!
//! # Example
//!
//! ```ignore
//! use csvscan::{scan_async, ScanConfig};
//! use tokio_util::compat::TokioAsyncReadCompatExt;
//!
//! async fn demo() -> Result<(), csvscan::ScanError> {
//!     let file = tokio::fs::File::open("ratings.csv").await?;
//!     let agg = scan_async(file.compat(), ScanConfig::new("110")).await?;
//!     println!("mean {}", agg.mean()?);
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::aggregate::Aggregate;
use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::scanner::Scanner;

pin_project! {
    /// A future that scans an async reader to its end.
    ///
    /// Each poll reads into the scanner's buffer and processes the complete
    /// lines before returning, so dropping the future between polls leaves
    /// the scanner with whole records counted and nothing half-parsed.
    #[must_use = "futures do nothing unless polled"]
    pub struct FeedFuture<'a, R> {
        #[pin]
        reader: R,
        scanner: &'a mut Scanner,
    }
}

impl Scanner {
    /// Async counterpart of [`Scanner::feed`].
    ///
    /// Pass `&mut reader` to keep ownership of the reader.
    pub fn feed_async<R: AsyncRead>(&mut self, reader: R) -> FeedFuture<'_, R> {
        FeedFuture {
            reader,
            scanner: self,
        }
    }
}

impl<R: AsyncRead> Future for FeedFuture<'_, R> {
    type Output = Result<(), ScanError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        loop {
            if let Err(e) = this.scanner.ensure_room() {
                return Poll::Ready(Err(e));
            }

            let n = match this.reader.as_mut().poll_read(cx, this.scanner.spare_mut()) {
                Poll::Ready(Ok(n)) => n,
                Poll::Ready(Err(e)) if e.kind() == ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => return Poll::Ready(Err(e.into())),
                Poll::Pending => return Poll::Pending,
            };

            if n == 0 {
                return Poll::Ready(this.scanner.finish_source());
            }

            if let Err(e) = this.scanner.absorb(n) {
                return Poll::Ready(Err(e));
            }
        }
    }
}

/// Scans an async reader with a fresh scanner and returns the aggregate.
pub async fn scan_async<R: AsyncRead>(reader: R, config: ScanConfig) -> Result<Aggregate, ScanError> {
    let mut scanner = Scanner::new(config)?;
    scanner.feed_async(reader).await?;
    Ok(scanner.result())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::io::Cursor;

    #[tokio::test]
    async fn test_scan_async_concrete_scenario() {
        let reader = Cursor::new(b"1,110,4.5\n2,200,3.0\n3,110,3.5\n".to_vec());
        let agg = scan_async(reader, ScanConfig::new("110").with_buffer_capacity(12))
            .await
            .unwrap();
        assert_eq!(agg, Aggregate::new(8.0, 2));
    }

    #[tokio::test]
    async fn test_feed_async_borrowed_reader() {
        let mut reader = Cursor::new(b"1,110,2.0".to_vec());
        let mut scanner = Scanner::new(ScanConfig::new("110")).unwrap();
        scanner.feed_async(&mut reader).await.unwrap();
        assert_eq!(scanner.result().mean().unwrap(), 2.0);
        assert_eq!(reader.position(), 9);
    }

    #[tokio::test]
    async fn test_scan_async_record_too_large() {
        let reader = Cursor::new(b"1,110,4.5\n".to_vec());
        let err = scan_async(reader, ScanConfig::new("110").with_buffer_capacity(4))
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::RecordTooLarge { offset: 0, .. }));
    }
}
