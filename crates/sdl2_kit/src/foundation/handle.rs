//! Exclusive native handle ownership
//!
//! Every wrapper in the crate owns exactly one native handle through [`Owned`].
//! The handle is either null (default, moved out, failed creation) or a live
//! native handle, and it is released exactly once when the owner drops.
//!
//! [`View`] is the borrowed counterpart: it aliases a handle owned elsewhere and
//! never releases anything. [`Borrowed`] lifts a view back into a shared
//! wrapper value whose drop is suppressed. [`BorrowedMut`] is the exclusive
//! form handed out by an owner borrowed mutably; it never exposes `&mut` to the
//! wrapper, so the alias cannot be moved out with `mem::take` or `mem::swap`.

use std::fmt;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ops::Deref;
use std::ptr::{self, NonNull};

/// A native object type that knows its matching teardown call
///
/// Implemented on the raw pointee type of each backend (`SDL_Window`,
/// `Mix_Chunk`, the headless structs, ...).
pub trait NativeResource {
    /// Short human readable kind, used in log output
    const KIND: &'static str;

    /// Release the native object
    ///
    /// # Safety
    /// `raw` must come from the matching creation call of the same backend and
    /// must not have been released already.
    unsafe fn release(raw: NonNull<Self>);
}

/// Owning, move-only native handle
///
/// Dropping a non-null handle calls [`NativeResource::release`] once. Moving
/// the handle out with [`std::mem::take`] leaves a null handle behind whose drop
/// does nothing.
pub struct Owned<T: NativeResource> {
    raw: Option<NonNull<T>>,
    _owns: PhantomData<T>,
}

impl<T: NativeResource> Owned<T> {
    /// A handle that owns nothing
    pub const fn null() -> Self {
        Self {
            raw: None,
            _owns: PhantomData,
        }
    }

    /// Take ownership of a raw pointer returned by a creation call
    ///
    /// A null pointer produces an invalid handle, which is how failed creation
    /// calls are represented.
    ///
    /// # Safety
    /// A non-null `ptr` must be a live handle of the right backend that nobody
    /// else will release.
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        Self {
            raw: NonNull::new(ptr),
            _owns: PhantomData,
        }
    }

    /// True iff a native handle is held
    pub fn is_valid(&self) -> bool {
        self.raw.is_some()
    }

    /// The held handle, if any
    pub fn get(&self) -> Option<NonNull<T>> {
        self.raw
    }

    /// Raw pointer for interop; null when invalid. Ownership is not transferred.
    pub fn as_raw(&self) -> *mut T {
        self.raw.map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    /// Give up ownership without releasing
    pub fn into_raw(self) -> *mut T {
        let this = ManuallyDrop::new(self);
        this.as_raw()
    }

    /// Borrow the handle as a non-owning view
    pub fn view(&self) -> View<'_, T> {
        View {
            raw: self.raw,
            _owner: PhantomData,
        }
    }
}

impl<T: NativeResource> Default for Owned<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: NativeResource> Drop for Owned<T> {
    fn drop(&mut self) {
        if let Some(raw) = self.raw.take() {
            log::trace!("releasing {} {:p}", T::KIND, raw);
            // SAFETY: the handle came from `from_raw`, whose contract makes us
            // the only owner, and `take` guarantees a single release.
            unsafe { T::release(raw) }
        }
    }
}

impl<T: NativeResource> fmt::Debug for Owned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Owned<{}>({:p})", T::KIND, self.as_raw())
    }
}

/// Non-owning alias of a native handle
///
/// The lifetime ties the view to whatever lent it. Views obtained from a
/// native lookup (window by id, grabbed window) are created unsafely because
/// nothing tracks the real owner.
pub struct View<'a, T> {
    raw: Option<NonNull<T>>,
    _owner: PhantomData<&'a T>,
}

impl<'a, T> View<'a, T> {
    /// A view of nothing
    pub const fn null() -> Self {
        Self {
            raw: None,
            _owner: PhantomData,
        }
    }

    /// Alias a raw handle
    ///
    /// # Safety
    /// The handle must stay alive for `'a`.
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        Self {
            raw: NonNull::new(ptr),
            _owner: PhantomData,
        }
    }

    /// True iff the view points at a handle
    pub fn is_valid(&self) -> bool {
        self.raw.is_some()
    }

    /// The aliased handle, if any
    pub fn get(&self) -> Option<NonNull<T>> {
        self.raw
    }

    /// Raw pointer; null when invalid
    pub fn as_raw(&self) -> *mut T {
        self.raw.map_or(ptr::null_mut(), NonNull::as_ptr)
    }
}

impl<T> Clone for View<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for View<'_, T> {}

impl<T> PartialEq for View<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for View<'_, T> {}

impl<T> fmt::Debug for View<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "View({:p})", self.as_raw())
    }
}

/// A wrapper value that aliases a handle owned elsewhere
///
/// Dereferences to `&W` only, so the `&self` operations are available and
/// dropping it never releases the handle. The alias cannot be moved out:
///
/// ```compile_fail
/// use sdl2_kit::render::Window;
/// use sdl2_kit::Headless;
///
/// let owner = Window::<Headless>::default();
/// let mut alias = Window::borrow_view(owner.view());
/// let stolen = std::mem::take(&mut *alias);
/// ```
pub struct Borrowed<'a, W> {
    inner: ManuallyDrop<W>,
    _owner: PhantomData<&'a ()>,
}

impl<W> Borrowed<'_, W> {
    /// Suppress the drop of `inner`
    pub(crate) fn new(inner: W) -> Self {
        Self {
            inner: ManuallyDrop::new(inner),
            _owner: PhantomData,
        }
    }
}

impl<W> Deref for Borrowed<'_, W> {
    type Target = W;

    fn deref(&self) -> &W {
        &self.inner
    }
}

impl<W: fmt::Debug> fmt::Debug for Borrowed<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Borrowed").field(&*self.inner).finish()
    }
}

/// Exclusive alias of a handle owned elsewhere
///
/// Obtained through a `&mut` borrow of the owner, so at most one exists at a
/// time. Mutating operations are forwarded by inherent impls next to each
/// wrapper type.
pub struct BorrowedMut<'a, W> {
    inner: ManuallyDrop<W>,
    _owner: PhantomData<&'a mut ()>,
}

impl<W> BorrowedMut<'_, W> {
    /// Suppress the drop of `inner`
    pub(crate) fn new(inner: W) -> Self {
        Self {
            inner: ManuallyDrop::new(inner),
            _owner: PhantomData,
        }
    }

    /// Mutable access for forwarding; never hand this out of the crate
    pub(crate) fn inner_mut(&mut self) -> &mut W {
        &mut self.inner
    }
}

impl<W> Deref for BorrowedMut<'_, W> {
    type Target = W;

    fn deref(&self) -> &W {
        &self.inner
    }
}

impl<W: fmt::Debug> fmt::Debug for BorrowedMut<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BorrowedMut").field(&*self.inner).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    thread_local! {
        static RELEASED: Cell<usize> = const { Cell::new(0) };
    }

    struct Token(u32);

    impl NativeResource for Token {
        const KIND: &'static str = "token";

        unsafe fn release(raw: NonNull<Self>) {
            RELEASED.with(|r| r.set(r.get() + 1));
            // SAFETY: every token was boxed by `token`
            drop(unsafe { Box::from_raw(raw.as_ptr()) });
        }
    }

    fn released() -> usize {
        RELEASED.with(Cell::get)
    }

    fn token(value: u32) -> Owned<Token> {
        // SAFETY: fresh box owned by nobody else
        unsafe { Owned::from_raw(Box::into_raw(Box::new(Token(value)))) }
    }

    #[test]
    fn test_default_is_invalid_and_drop_is_noop() {
        let before = released();
        let handle = Owned::<Token>::default();
        assert!(!handle.is_valid());
        assert!(handle.as_raw().is_null());
        drop(handle);
        assert_eq!(released(), before);
    }

    #[test]
    fn test_from_raw_keeps_exact_pointer() {
        let raw = Box::into_raw(Box::new(Token(7)));
        // SAFETY: fresh box owned by nobody else
        let handle = unsafe { Owned::from_raw(raw) };
        assert!(handle.is_valid());
        assert_eq!(handle.as_raw(), raw);
        // SAFETY: the handle is live
        assert_eq!(unsafe { (*handle.as_raw()).0 }, 7);
    }

    #[test]
    fn test_null_pointer_gives_invalid_handle() {
        // SAFETY: null is accepted
        let handle = unsafe { Owned::<Token>::from_raw(ptr::null_mut()) };
        assert!(!handle.is_valid());
    }

    #[test]
    fn test_take_transfers_and_releases_once() {
        let before = released();
        let mut a = token(1);
        let raw = a.as_raw();

        let b = std::mem::take(&mut a);
        assert!(!a.is_valid());
        assert_eq!(b.as_raw(), raw);

        drop(a);
        assert_eq!(released(), before);
        drop(b);
        assert_eq!(released(), before + 1);
    }

    #[test]
    fn test_self_assignment_does_not_release() {
        let before = released();
        let mut a = token(2);
        let raw = a.as_raw();

        a = std::mem::take(&mut a);
        assert!(a.is_valid());
        assert_eq!(a.as_raw(), raw);
        assert_eq!(released(), before);

        drop(a);
        assert_eq!(released(), before + 1);
    }

    #[test]
    fn test_assigning_over_valid_handle_releases_old_one() {
        let before = released();
        let mut a = token(3);
        let b = token(4);
        let raw_b = b.as_raw();

        a = b;
        assert_eq!(released(), before + 1);
        assert_eq!(a.as_raw(), raw_b);
    }

    #[test]
    fn test_into_raw_skips_release() {
        let before = released();
        let raw = token(5).into_raw();
        assert_eq!(released(), before);
        // Hand it back so the test does not leak
        // SAFETY: the raw pointer came from `into_raw`
        drop(unsafe { Owned::from_raw(raw) });
        assert_eq!(released(), before + 1);
    }

    #[test]
    fn test_view_aliases_without_releasing() {
        let before = released();
        let handle = token(6);
        let view = handle.view();
        let copy = view;
        assert!(copy.is_valid());
        assert_eq!(copy.as_raw(), handle.as_raw());
        assert_eq!(view, copy);
        assert_eq!(released(), before);
        assert!(!View::<Token>::null().is_valid());
    }

    #[test]
    fn test_borrowed_never_releases() {
        let before = released();
        let handle = token(8);
        {
            // SAFETY: `handle` outlives the alias
            let alias = Borrowed::new(unsafe { Owned::from_raw(handle.as_raw()) });
            assert_eq!(alias.as_raw(), handle.as_raw());
        }
        assert_eq!(released(), before);
        drop(handle);
        assert_eq!(released(), before + 1);
    }

    #[test]
    fn test_borrowed_mut_forwards_without_releasing() {
        let before = released();
        let mut handle = token(9);
        {
            // SAFETY: `handle` outlives the alias
            let mut alias = BorrowedMut::new(unsafe { Owned::from_raw(handle.as_raw()) });
            assert_eq!(alias.as_raw(), handle.as_raw());
            assert_eq!(alias.inner_mut().get(), handle.get());
        }
        assert!(handle.is_valid());
        assert_eq!(released(), before);
        drop(std::mem::take(&mut handle));
        assert_eq!(released(), before + 1);
    }
}
