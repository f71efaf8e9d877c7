//! Owned flat storage for tensor elements.
//!
//! The storage is exclusively owned by one tensor: clones deep-copy the buffer
//! and moves transfer it. Views alias it only through borrows of the owning
//! tensor, so the buffer can never be reallocated while a view is alive.

use crate::error::TensorError;

/// Contiguous, exclusively owned element buffer.
#[derive(Clone, PartialEq)]
pub struct TensorStorage<T> {
    data: Vec<T>,
}

impl<T> TensorStorage<T> {
    /// Creates a new storage from a vector, taking ownership of its buffer.
    #[inline]
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Returns the pointer to the first element.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Returns the mutable pointer to the first element.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }

    /// Returns the storage data as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the storage data as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Returns the number of elements in the storage.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the storage holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the element at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if `offset` is past the end of the buffer.
    #[inline]
    pub fn get(&self, offset: usize) -> Result<&T, TensorError> {
        let len = self.data.len();
        self.data
            .get(offset)
            .ok_or_else(|| TensorError::index_out_of_range(offset, len))
    }

    /// Returns the element at `offset` mutably.
    #[inline]
    pub fn get_mut(&mut self, offset: usize) -> Result<&mut T, TensorError> {
        let len = self.data.len();
        self.data
            .get_mut(offset)
            .ok_or_else(|| TensorError::index_out_of_range(offset, len))
    }

    /// Resizes the buffer to `len` elements, reallocating only if the length changes.
    ///
    /// Returns true if the buffer length changed.
    pub fn resize(&mut self, len: usize, value: T) -> bool
    where
        T: Clone,
    {
        if len == self.data.len() {
            return false;
        }
        self.data.resize(len, value);
        true
    }

    /// Releases all elements and the backing allocation.
    pub fn clear(&mut self) {
        self.data = Vec::new();
    }

    /// Consumes the storage and returns the data as a vector.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T> std::fmt::Debug for TensorStorage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TensorStorage")
            .field("ptr", &self.data.as_ptr())
            .field("len", &self.data.len())
            .field("capacity", &self.data.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tensor_storage_from_vec() {
        let storage = TensorStorage::from_vec(vec![1, 2, 3, 4, 5]);
        assert_eq!(storage.as_slice(), &[1, 2, 3, 4, 5]);
        assert_eq!(storage.len(), 5);
        assert!(!storage.is_empty());
        assert!(!storage.as_ptr().is_null());
    }

    #[test]
    fn test_tensor_storage_get() {
        let storage = TensorStorage::from_vec(vec![1, 2, 3]);
        assert_eq!(storage.get(2), Ok(&3));
        assert_eq!(storage.get(3), Err(TensorError::index_out_of_range(3, 3)));
    }

    #[test]
    fn test_tensor_storage_mutability() -> Result<(), TensorError> {
        let mut storage = TensorStorage::from_vec(vec![1, 2, 3, 4]);
        *storage.get_mut(0)? = 10;
        storage.as_mut_slice()[1] = 20;
        assert_eq!(storage.as_slice(), &[10, 20, 3, 4]);
        Ok(())
    }

    #[test]
    fn test_tensor_storage_resize_keeps_buffer() {
        let mut storage = TensorStorage::from_vec(vec![1.0_f32; 12]);
        let ptr = storage.as_ptr();
        assert!(!storage.resize(12, 0.0));
        assert_eq!(storage.as_ptr(), ptr);
        assert!(storage.resize(6, 0.0));
        assert_eq!(storage.len(), 6);
    }

    #[test]
    fn test_tensor_storage_clone_is_deep() {
        let mut a = TensorStorage::from_vec(vec![1, 2, 3]);
        let b = a.clone();
        a.as_mut_slice()[0] = 9;
        assert_eq!(b.as_slice(), &[1, 2, 3]);
        assert_ne!(a.as_ptr(), b.as_ptr());
    }

    #[test]
    fn test_tensor_storage_clear() {
        let mut storage = TensorStorage::from_vec(vec![1, 2, 3]);
        storage.clear();
        assert!(storage.is_empty());
        assert_eq!(storage.into_vec(), Vec::<i32>::new());
    }
}
