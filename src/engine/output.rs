// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::buffer::{ArrayData, Buffer, ElementType};
use crate::engine::LinkKey;
use crate::errors::{NetworkError, NetworkResult};

/// A named output of a region: one typed buffer plus the keys of the links
/// reading from it.
///
/// Outgoing links are owned by their destination inputs; the output only
/// remembers which ones exist.
#[derive(Debug)]
pub struct Output {
    region: String,
    name: String,
    data_type: ElementType,
    buffer: Buffer,
    links: Vec<LinkKey>,
}

impl Output {
    pub fn new(region: impl Into<String>, name: impl Into<String>, data_type: ElementType) -> Self {
        Self {
            region: region.into(),
            name: name.into(),
            data_type,
            buffer: Buffer::zeroed(data_type, 0),
            links: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn data_type(&self) -> ElementType {
        self.data_type
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn links(&self) -> &[LinkKey] {
        &self.links
    }

    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }

    /// Size the buffer to `count` zeroed elements. A buffer that already has
    /// that size is kept as is, so restored values and the handles links hold
    /// stay valid across re-initialization.
    pub(crate) fn initialize(&mut self, count: usize) {
        if self.buffer.len() == count && self.buffer.element_type() == self.data_type {
            return;
        }
        self.buffer = Buffer::zeroed(self.data_type, count);
    }

    /// Replace the buffer with saved contents.
    pub(crate) fn restore(&mut self, data: ArrayData) -> NetworkResult<()> {
        if data.element_type() != self.data_type {
            return Err(NetworkError::OutputTypeMismatch {
                region: self.region.clone(),
                output: self.name.clone(),
                expected: self.data_type.to_string(),
                actual: data.element_type().to_string(),
            });
        }
        self.buffer = Buffer::new(data);
        Ok(())
    }

    pub(crate) fn add_link(&mut self, key: LinkKey) {
        if !self.links.contains(&key) {
            self.links.push(key);
        }
    }

    pub(crate) fn remove_link(&mut self, key: &LinkKey) -> bool {
        let before = self.links.len();
        self.links.retain(|existing| existing != key);
        self.links.len() != before
    }

    pub(crate) fn clear_links(&mut self) {
        self.links.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_keeps_matching_buffer() {
        let mut output = Output::new("a", "out", ElementType::Real32);
        output.initialize(3);
        output.buffer().slice_mut::<f32>().unwrap()[1] = 5.0;
        let handle = output.buffer().share();

        output.initialize(3);
        assert!(output.buffer().shares_storage_with(&handle));
        assert_eq!(output.buffer().to_vec::<f32>(), vec![0.0, 5.0, 0.0]);

        output.initialize(4);
        assert!(!output.buffer().shares_storage_with(&handle));
        assert_eq!(output.buffer().to_vec::<f32>(), vec![0.0; 4]);
    }

    #[test]
    fn test_restore_checks_type() {
        let mut output = Output::new("a", "out", ElementType::Int32);
        assert!(output.restore(ArrayData::from_vec(vec![1_i32, 2])).is_ok());
        assert_eq!(output.len(), 2);
        assert!(matches!(
            output.restore(ArrayData::from_vec(vec![1.0_f64])),
            Err(NetworkError::OutputTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_link_bookkeeping() {
        let mut output = Output::new("a", "out", ElementType::Int32);
        let key = LinkKey::new("a", "out", "b", "in");
        output.add_link(key.clone());
        output.add_link(key.clone());
        assert_eq!(output.links().len(), 1);
        assert!(output.remove_link(&key));
        assert!(!output.remove_link(&key));
        assert!(!output.has_links());
    }
}
