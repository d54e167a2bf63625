use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, TryLockError};

use crate::detection::domain::classifier::ClassifierError;

/// Fixed set of interchangeable, individually locked handles.
///
/// A caller takes the first idle handle, starting from a rotating offset,
/// and only blocks when every handle is busy. With one handle per worker,
/// concurrent callers never wait on each other.
pub struct HandlePool<T> {
    handles: Vec<Mutex<T>>,
    next: AtomicUsize,
}

impl<T> HandlePool<T> {
    pub fn new(handles: Vec<T>) -> Result<Self, &'static str> {
        if handles.is_empty() {
            return Err("handle pool needs at least one handle");
        }
        Ok(Self {
            handles: handles.into_iter().map(Mutex::new).collect(),
            next: AtomicUsize::new(0),
        })
    }

    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Runs `f` with exclusive access to one handle.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R, ClassifierError> {
        let n = self.handles.len();
        let start = self.next.fetch_add(1, Ordering::Relaxed) % n;
        for offset in 0..n {
            match self.handles[(start + offset) % n].try_lock() {
                Ok(mut guard) => return Ok(f(&mut guard)),
                Err(TryLockError::WouldBlock) => continue,
                Err(TryLockError::Poisoned(_)) => return Err("classifier handle poisoned".into()),
            }
        }
        let mut guard = self.handles[start]
            .lock()
            .map_err(|_| "classifier handle poisoned")?;
        Ok(f(&mut guard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::time::Duration;

    #[test]
    fn test_empty_pool_rejected() {
        assert!(HandlePool::<u8>::new(vec![]).is_err());
    }

    #[test]
    fn test_with_returns_closure_value() {
        let pool = HandlePool::new(vec![41]).unwrap();
        let value = pool.with(|h| *h + 1).unwrap();
        assert_eq!(value, 42);
        assert_eq!(pool.size(), 1);
    }

    #[test]
    fn test_calls_rotate_across_idle_handles() {
        let pool = HandlePool::new(vec![0u32; 3]).unwrap();
        for _ in 0..6 {
            pool.with(|h| *h += 1).unwrap();
        }
        for handle in &pool.handles {
            assert_eq!(*handle.lock().unwrap(), 2);
        }
    }

    #[test]
    fn test_one_handle_per_caller_runs_concurrently() {
        let pool = HandlePool::new(vec![(); 4]).unwrap();
        // Every caller holds its handle until all four are inside.
        let inside = Barrier::new(4);
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| pool.with(|_| inside.wait()).unwrap());
            }
        });
    }

    #[test]
    fn test_busy_pool_blocks_instead_of_failing() {
        let pool = HandlePool::new(vec![0u32]).unwrap();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    pool.with(|h| {
                        std::thread::sleep(Duration::from_millis(5));
                        *h += 1;
                    })
                    .unwrap()
                });
            }
        });
        assert_eq!(pool.with(|h| *h).unwrap(), 4);
    }
}
