//! Bounded, fail-fast connection pool.

use crate::error::{BackendError, BackendResult};
use parking_lot::Mutex;

type Connector<T> = Box<dyn Fn() -> BackendResult<T> + Send + Sync>;

/// A bounded pool of connections.
///
/// Connections are created lazily through the connector and handed out
/// one per caller. When every slot is in use, `acquire` fails
/// immediately with [`BackendError::PoolExhausted`] instead of
/// blocking; callers treat that as a retryable backend error.
///
/// A checked-out connection is scoped to one backend round trip: the
/// guard returns it to the pool on drop, unless the caller poisoned it
/// after a connection-level failure, in which case the slot is freed
/// and the connection discarded.
pub(crate) struct ConnectionPool<T> {
    connect: Connector<T>,
    capacity: usize,
    inner: Mutex<PoolInner<T>>,
}

struct PoolInner<T> {
    idle: Vec<T>,
    in_use: usize,
}

impl<T> ConnectionPool<T> {
    /// Creates a pool holding at most `capacity` connections.
    pub(crate) fn new(
        capacity: usize,
        connect: impl Fn() -> BackendResult<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            connect: Box::new(connect),
            capacity: capacity.max(1),
            inner: Mutex::new(PoolInner {
                idle: Vec::new(),
                in_use: 0,
            }),
        }
    }

    /// Checks out a connection, creating one if a slot is free.
    ///
    /// # Errors
    ///
    /// Fails with [`BackendError::PoolExhausted`] when all slots are in
    /// use, or with the connector's error when a fresh connection
    /// cannot be established (the slot is released again).
    pub(crate) fn acquire(&self) -> BackendResult<PooledConnection<'_, T>> {
        let mut inner = self.inner.lock();
        if let Some(conn) = inner.idle.pop() {
            inner.in_use += 1;
            return Ok(PooledConnection::new(self, conn));
        }
        if inner.in_use >= self.capacity {
            return Err(BackendError::PoolExhausted {
                capacity: self.capacity,
            });
        }
        inner.in_use += 1;
        drop(inner);

        match (self.connect)() {
            Ok(conn) => Ok(PooledConnection::new(self, conn)),
            Err(err) => {
                self.inner.lock().in_use -= 1;
                Err(err)
            }
        }
    }

    fn release(&self, conn: Option<T>) {
        let mut inner = self.inner.lock();
        inner.in_use -= 1;
        if let Some(conn) = conn {
            inner.idle.push(conn);
        }
    }
}

/// RAII guard for a checked-out connection.
pub(crate) struct PooledConnection<'a, T> {
    pool: &'a ConnectionPool<T>,
    conn: Option<T>,
    poisoned: bool,
}

impl<T: std::fmt::Debug> std::fmt::Debug for PooledConnection<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledConnection")
            .field("conn", &self.conn)
            .field("poisoned", &self.poisoned)
            .finish_non_exhaustive()
    }
}

impl<'a, T> PooledConnection<'a, T> {
    fn new(pool: &'a ConnectionPool<T>, conn: T) -> Self {
        Self {
            pool,
            conn: Some(conn),
            poisoned: false,
        }
    }

    /// Marks the connection as broken; it will be discarded instead of
    /// returned to the pool.
    pub(crate) fn poison(&mut self) {
        self.poisoned = true;
    }

    /// Returns a mutable reference to the underlying connection.
    pub(crate) fn get_mut(&mut self) -> &mut T {
        self.conn.as_mut().expect("connection taken before drop")
    }
}

impl<T> Drop for PooledConnection<'_, T> {
    fn drop(&mut self) {
        let conn = if self.poisoned {
            None
        } else {
            self.conn.take()
        };
        self.pool.release(conn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_pool(capacity: usize) -> (ConnectionPool<usize>, Arc<AtomicUsize>) {
        let created = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&created);
        let pool = ConnectionPool::new(capacity, move || {
            Ok(counter.fetch_add(1, Ordering::SeqCst))
        });
        (pool, created)
    }

    #[test]
    fn pool_fails_fast_when_exhausted() {
        let (pool, _) = counting_pool(2);

        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();

        let err = pool.acquire().unwrap_err();
        assert!(matches!(err, BackendError::PoolExhausted { capacity: 2 }));
        assert!(err.is_retryable());

        drop(a);
        drop(b);
    }

    #[test]
    fn pool_reuses_released_connections() {
        let (pool, created) = counting_pool(1);

        {
            let mut conn = pool.acquire().unwrap();
            assert_eq!(*conn.get_mut(), 0);
        }
        {
            let mut conn = pool.acquire().unwrap();
            assert_eq!(*conn.get_mut(), 0);
        }
        assert_eq!(created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn pool_discards_poisoned_connections() {
        let (pool, created) = counting_pool(1);

        {
            let mut conn = pool.acquire().unwrap();
            conn.poison();
        }
        {
            let mut conn = pool.acquire().unwrap();
            // A fresh connection was created to replace the poisoned one.
            assert_eq!(*conn.get_mut(), 1);
        }
        assert_eq!(created.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn pool_releases_slot_on_connect_failure() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let pool: ConnectionPool<usize> = ConnectionPool::new(1, move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(BackendError::Protocol("refused".into()))
            } else {
                Ok(7)
            }
        });

        assert!(pool.acquire().is_err());
        // The failed attempt must not leak its slot.
        let mut conn = pool.acquire().unwrap();
        assert_eq!(*conn.get_mut(), 7);
    }

    #[test]
    fn pool_capacity_is_at_least_one() {
        let (pool, _) = counting_pool(0);
        assert!(pool.acquire().is_ok());
    }
}
