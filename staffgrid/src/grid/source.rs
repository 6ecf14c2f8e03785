//! Data sources and the subscription adapter.
//!
//! A grid is fed either a plain collection or a push-based stream of
//! collections. The adapter normalizes both into a single "current
//! collection" and owns the subscription for stream sources.

use std::fmt;

use futures::FutureExt;
use futures::StreamExt;
use futures::stream::BoxStream;
use tokio::sync::watch;

/// A push-based stream of whole collections.
pub type RowStream<T> = BoxStream<'static, Vec<T>>;

/// What a grid displays.
pub enum DataSource<T> {
    /// No data.
    Empty,
    /// A fixed collection.
    Rows(Vec<T>),
    /// A stream whose every emission replaces the current collection.
    Stream(RowStream<T>),
}

impl<T> DataSource<T> {
    /// Wraps any stream of collections.
    pub fn stream<S>(stream: S) -> Self
    where
        S: futures::Stream<Item = Vec<T>> + Send + 'static,
    {
        DataSource::Stream(stream.boxed())
    }

    fn kind(&self) -> &'static str {
        match self {
            DataSource::Empty => "empty",
            DataSource::Rows(_) => "rows",
            DataSource::Stream(_) => "stream",
        }
    }
}

impl<T> Default for DataSource<T> {
    fn default() -> Self {
        DataSource::Empty
    }
}

impl<T> From<Vec<T>> for DataSource<T> {
    fn from(rows: Vec<T>) -> Self {
        DataSource::Rows(rows)
    }
}

impl<T> From<Option<Vec<T>>> for DataSource<T> {
    fn from(rows: Option<Vec<T>>) -> Self {
        rows.map(DataSource::Rows).unwrap_or(DataSource::Empty)
    }
}

impl<T> fmt::Debug for DataSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Rows(rows) => write!(f, "DataSource::Rows({} rows)", rows.len()),
            other => write!(f, "DataSource::{}", other.kind()),
        }
    }
}

/// Exposes a `watch` channel as a stream of its values.
///
/// The current value is yielded first, then every later value. Intermediate
/// values sent between polls collapse into the most recent one. The stream
/// ends when the sender is dropped.
pub fn watch_stream<T>(rx: watch::Receiver<Vec<T>>) -> RowStream<T>
where
    T: Clone + Send + Sync + 'static,
{
    futures::stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let value = rx.borrow_and_update().clone();
        Some((value, (rx, false)))
    })
    .boxed()
}

/// An active subscription to a stream source.
///
/// Dropping the subscription releases the stream.
struct Subscription<T> {
    id: u64,
    stream: RowStream<T>,
}

/// Normalizes a [`DataSource`] into the current collection.
pub(crate) struct SourceAdapter<T> {
    subscription: Option<Subscription<T>>,
    current: Vec<T>,
    bound: bool,
    next_subscription_id: u64,
}

impl<T> SourceAdapter<T> {
    pub fn new() -> Self {
        Self {
            subscription: None,
            current: Vec::new(),
            bound: false,
            next_subscription_id: 0,
        }
    }

    /// The latest materialized collection.
    pub fn current(&self) -> &[T] {
        &self.current
    }

    /// Returns `true` once a non-empty source was bound.
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Returns `true` while a stream subscription is active.
    #[cfg(test)]
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Binds a new source, releasing the previous subscription first.
    ///
    /// Plain collections become current immediately. For streams, every
    /// emission that is already available is applied before returning.
    pub fn bind(&mut self, source: DataSource<T>) {
        self.release();
        log::debug!("Binding {:?} source", source);
        match source {
            DataSource::Empty => {
                self.current = Vec::new();
                self.bound = false;
            }
            DataSource::Rows(rows) => {
                self.current = rows;
                self.bound = true;
            }
            DataSource::Stream(stream) => {
                self.next_subscription_id += 1;
                let id = self.next_subscription_id;
                log::debug!("Subscribing to stream source #{}", id);
                self.subscription = Some(Subscription { id, stream });
                self.bound = true;
                self.poll();
            }
        }
    }

    /// Applies every emission that is ready without waiting.
    ///
    /// Returns `true` if the current collection was replaced.
    pub fn poll(&mut self) -> bool {
        let mut replaced = false;
        while let Some(sub) = self.subscription.as_mut() {
            match sub.stream.next().now_or_never() {
                Some(Some(rows)) => {
                    self.current = rows;
                    replaced = true;
                }
                Some(None) => {
                    log::debug!("Stream source #{} completed", sub.id);
                    self.subscription = None;
                }
                None => break,
            }
        }
        replaced
    }

    /// Waits for the next emission and applies it.
    ///
    /// Returns `true` if the collection was replaced, `false` if the stream
    /// completed. Never resolves while no stream is subscribed.
    pub async fn next(&mut self) -> bool {
        let Some(sub) = self.subscription.as_mut() else {
            return futures::future::pending().await;
        };
        match sub.stream.next().await {
            Some(rows) => {
                self.current = rows;
                true
            }
            None => {
                log::debug!("Stream source #{} completed", sub.id);
                self.subscription = None;
                false
            }
        }
    }

    /// Releases the active subscription, if any.
    pub fn release(&mut self) {
        if let Some(sub) = self.subscription.take() {
            log::debug!("Releasing stream source #{}", sub.id);
        }
    }
}
