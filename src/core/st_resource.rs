//! # Single-Threaded Resource

use std::{
    fmt,
    rc::Rc,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// A single-threaded, reference-counted resource with interior mutability.
///
/// `StResource` is how the world, the player host objects and the mass-break
/// statistics are shared between the code that handles an event and the tasks that
/// run on later ticks. It wraps an `Rc<RwLock<T>>`; `T` may be unsized, which lets a
/// concrete world be viewed through a `dyn Dimension` handle while the session keeps
/// its concrete handle.
///
/// # Type Parameters
/// - `T`: The type of the contained resource, may be unsized
///
/// # Examples
///
/// ## Cloning and Shared Ownership
/// ```
/// use mass_break::core::StResource;
///
/// let resource = StResource::new(vec![1, 2, 3]);
/// let clone = resource.clone();
///
/// // All clones share the same underlying data
/// clone.get_mut().push(4);
/// assert_eq!(resource.get().len(), 4);
/// assert!(resource.ptr_eq(&clone));
/// ```
///
/// # Poisoning
/// A panic while a guard is held poisons the lock. The guard is recovered instead
/// of propagating the poison, so one failed batch never locks the world for every
/// batch that follows it.
///
/// # Panics
/// Acquiring a write guard while any other guard on the same resource is alive
/// deadlocks or panics, as with any `RwLock` used from a single thread. Keep guards
/// short-lived.
pub struct StResource<T: ?Sized> {
    /// The shared value.
    pub resource: Rc<RwLock<T>>,
}

impl<T> StResource<T> {
    /// Creates a new `StResource` containing the given value.
    ///
    /// # Arguments
    /// * `resource` - The value to be stored in the resource
    pub fn new(resource: T) -> Self {
        Self {
            resource: Rc::new(RwLock::new(resource)),
        }
    }
}

impl<T: ?Sized> StResource<T> {
    /// Wraps an already shared value.
    ///
    /// This is the entry point for unsized handles: coerce the `Rc` first, then
    /// wrap it.
    pub fn from_shared(resource: Rc<RwLock<T>>) -> Self {
        Self { resource }
    }

    /// Returns a read-only guard that allows reading the contained value.
    pub fn get(&self) -> RwLockReadGuard<'_, T> {
        self.resource.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a mutable guard that allows modifying the contained value.
    pub fn get_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.resource.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `true` when both handles point at the same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.resource, &other.resource)
    }

    /// Number of live handles to the value.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.resource)
    }
}

impl<T: ?Sized> Clone for StResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for StResource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StResource")
            .field("handles", &self.handle_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_value() {
        let resource = StResource::new(String::from("oak"));
        let clone = resource.clone();
        clone.get_mut().push_str("_log");

        assert_eq!(&*resource.get(), "oak_log");
        assert_eq!(resource.handle_count(), 2);
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let resource = StResource::new(1);
        let clone = resource.clone();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = clone.get_mut();
            panic!("batch exploded");
        }));
        assert!(result.is_err());

        *resource.get_mut() += 1;
        assert_eq!(*resource.get(), 2);
    }

    #[test]
    fn unsized_handles_point_at_the_same_value() {
        trait Named {
            fn name(&self) -> &str;
        }
        struct Log;
        impl Named for Log {
            fn name(&self) -> &str {
                "log"
            }
        }

        let concrete = StResource::new(Log);
        let shared: Rc<RwLock<dyn Named>> = concrete.resource.clone();
        let erased = StResource::from_shared(shared);

        assert_eq!(erased.get().name(), "log");
        assert_eq!(concrete.handle_count(), 2);
    }
}
