// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use crate::buffer::{ArrayData, Element, ElementType};
use crate::errors::BufferError;

/// Handle to a typed buffer whose storage may be shared.
///
/// Cloning a `Buffer` (or calling [`Buffer::share`]) aliases the same storage,
/// which is how zero-copy links hand an output to an input. [`Buffer::deep_copy`]
/// produces independent storage. The engine is single-threaded, so sharing is
/// `Rc<RefCell<_>>`.
#[derive(Clone)]
pub struct Buffer {
    storage: Rc<RefCell<ArrayData>>,
}

impl Buffer {
    pub fn new(data: ArrayData) -> Self {
        Self {
            storage: Rc::new(RefCell::new(data)),
        }
    }

    pub fn zeroed(element_type: ElementType, len: usize) -> Self {
        Self::new(ArrayData::zeroed(element_type, len))
    }

    pub fn from_vec<T: Element>(values: Vec<T>) -> Self {
        Self::new(ArrayData::from_vec(values))
    }

    pub fn element_type(&self) -> ElementType {
        self.storage.borrow().element_type()
    }

    pub fn len(&self) -> usize {
        self.storage.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Another handle onto the same storage.
    pub fn share(&self) -> Buffer {
        self.clone()
    }

    pub fn shares_storage_with(&self, other: &Buffer) -> bool {
        Rc::ptr_eq(&self.storage, &other.storage)
    }

    /// Independent copy of the current contents.
    pub fn deep_copy(&self) -> Buffer {
        Buffer::new(self.snapshot())
    }

    /// Owned copy of the current contents.
    pub fn snapshot(&self) -> ArrayData {
        self.storage.borrow().clone()
    }

    pub fn slice<T: Element>(&self) -> Result<Ref<'_, [T]>, BufferError> {
        let data = self.storage.borrow();
        let actual = data.element_type();
        Ref::filter_map(data, T::slice).map_err(|_| BufferError::TypeMismatch {
            expected: T::TYPE,
            actual,
        })
    }

    pub fn slice_mut<T: Element>(&self) -> Result<RefMut<'_, [T]>, BufferError> {
        let data = self.storage.borrow_mut();
        let actual = data.element_type();
        RefMut::filter_map(data, T::slice_mut).map_err(|_| BufferError::TypeMismatch {
            expected: T::TYPE,
            actual,
        })
    }

    pub fn to_vec<T: Element>(&self) -> Vec<T> {
        self.storage.borrow().to_vec()
    }

    /// Deep, type-converting copy of this buffer into `dest` at `offset`.
    pub fn copy_into(&self, dest: &Buffer, offset: usize) -> Result<(), BufferError> {
        if self.shares_storage_with(dest) {
            if offset == 0 {
                return Ok(());
            }
            let source = self.snapshot();
            return source.copy_into(&mut dest.storage.borrow_mut(), offset);
        }
        self.storage
            .borrow()
            .copy_into(&mut dest.storage.borrow_mut(), offset)
    }

    pub fn fill_zero(&self) {
        self.storage.borrow_mut().fill_zero();
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.storage.borrow();
        f.debug_struct("Buffer")
            .field("element_type", &data.element_type())
            .field("len", &data.len())
            .field("shared", &(Rc::strong_count(&self.storage) > 1))
            .finish()
    }
}

impl From<ArrayData> for Buffer {
    fn from(data: ArrayData) -> Self {
        Buffer::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_aliases_storage() {
        let source = Buffer::from_vec(vec![1.0_f32, 2.0, 3.0, 4.0]);
        let alias = source.share();
        assert!(alias.shares_storage_with(&source));

        source.slice_mut::<f32>().unwrap()[0] = 9.0;
        assert_eq!(alias.to_vec::<f32>(), vec![9.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let source = Buffer::from_vec(vec![1_u32, 2]);
        let copy = source.deep_copy();
        assert!(!copy.shares_storage_with(&source));

        source.slice_mut::<u32>().unwrap()[1] = 7;
        assert_eq!(copy.to_vec::<u32>(), vec![1, 2]);
    }

    #[test]
    fn test_copy_into_with_conversion() {
        let source = Buffer::from_vec(vec![1_i16, 2]);
        let dest = Buffer::zeroed(ElementType::Real64, 3);
        source.copy_into(&dest, 1).unwrap();
        assert_eq!(dest.to_vec::<f64>(), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_copy_into_self_is_a_no_op() {
        let source = Buffer::from_vec(vec![4_i32, 5]);
        let alias = source.share();
        source.copy_into(&alias, 0).unwrap();
        assert_eq!(alias.to_vec::<i32>(), vec![4, 5]);
    }

    #[test]
    fn test_slice_type_mismatch() {
        let buffer = Buffer::zeroed(ElementType::Byte, 2);
        assert!(buffer.slice::<f32>().is_err());
        assert!(buffer.slice_mut::<u8>().is_ok());
    }
}
