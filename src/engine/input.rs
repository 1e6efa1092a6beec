// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::buffer::{Buffer, ElementType};
use crate::engine::{Link, LinkKey};
use crate::errors::{NetworkError, NetworkResult};

/// Source buffers of every output in a network, keyed by `(region, output)`.
pub type SourceBuffers = HashMap<(String, String), Buffer>;

/// A named input of a region.
///
/// Owns its incoming links in insertion order. After initialization its buffer
/// is the concatenation of every link's source: link `i` writes at the sum of
/// the widths of links `0..i`.
#[derive(Debug)]
pub struct Input {
    region: String,
    name: String,
    data_type: ElementType,
    links: Vec<Link>,
    buffer: Buffer,
    initialized: bool,
}

impl Input {
    pub fn new(region: impl Into<String>, name: impl Into<String>, data_type: ElementType) -> Self {
        Self {
            region: region.into(),
            name: name.into(),
            data_type,
            links: Vec::new(),
            buffer: Buffer::zeroed(data_type, 0),
            initialized: false,
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

    /// The input's current data. Under zero-copy this is a shared handle to
    /// the source output.
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn find_link(&self, key: &LinkKey) -> Option<&Link> {
        self.links.iter().find(|link| link.key() == key)
    }

    pub(crate) fn find_link_mut(&mut self, key: &LinkKey) -> Option<&mut Link> {
        self.links.iter_mut().find(|link| link.key() == key)
    }

    pub(crate) fn links_mut(&mut self) -> &mut [Link] {
        &mut self.links
    }

    fn describe(&self) -> String {
        format!("{}.{}", self.region, self.name)
    }

    pub(crate) fn add_link(&mut self, mut link: Link) -> NetworkResult<()> {
        if self.initialized {
            return Err(NetworkError::InputInitialized {
                input: self.describe(),
            });
        }
        if self.find_link(link.key()).is_some() {
            return Err(NetworkError::DuplicateLink(link.key().to_string()));
        }
        link.bind();
        self.links.push(link);
        Ok(())
    }

    pub(crate) fn remove_link(&mut self, key: &LinkKey) -> NetworkResult<Link> {
        if self.initialized {
            return Err(NetworkError::InputInitialized {
                input: self.describe(),
            });
        }
        let position = self
            .links
            .iter()
            .position(|link| link.key() == key)
            .ok_or_else(|| NetworkError::UnknownLink(key.to_string()))?;
        Ok(self.links.remove(position))
    }

    /// Detach every link; used when the owning region goes away.
    pub(crate) fn take_links(&mut self) -> Vec<Link> {
        std::mem::take(&mut self.links)
    }

    /// Assign offsets and zero-copy eligibility to every link and allocate the
    /// concatenated buffer.
    ///
    /// `expected` is the region spec's fixed width, or 0 when the width follows the
    /// links. Already-initialized inputs are left alone.
    pub(crate) fn initialize(
        &mut self,
        sources: &SourceBuffers,
        expected: usize,
        zero_copy_enabled: bool,
    ) -> NetworkResult<()> {
        if self.initialized {
            return Ok(());
        }

        let mut resolved = Vec::with_capacity(self.links.len());
        for link in &self.links {
            let key = link.key();
            let source = sources
                .get(&(key.src_region.clone(), key.src_output.clone()))
                .ok_or_else(|| NetworkError::UnknownOutput {
                    region: key.src_region.clone(),
                    output: key.src_output.clone(),
                })?;
            resolved.push(source.share());
        }

        let total: usize = resolved.iter().map(Buffer::len).sum();
        if expected != 0 && !self.links.is_empty() && total != expected {
            return Err(NetworkError::InputWidthMismatch {
                region: self.region.clone(),
                input: self.name.clone(),
                expected,
                actual: total,
            });
        }

        let single = self.links.len() == 1;
        let mut offset = 0;
        for (link, source) in self.links.iter_mut().zip(resolved) {
            let width = source.len();
            let zero_copy =
                zero_copy_enabled && single && source.element_type() == self.data_type;
            link.initialize(source, offset, zero_copy)?;
            offset += width;
        }

        self.buffer = Buffer::zeroed(self.data_type, total);
        self.initialized = true;
        Ok(())
    }

    pub(crate) fn uninitialize(&mut self) {
        self.initialized = false;
        for link in &mut self.links {
            link.uninitialize();
        }
    }

    /// Pull this iteration's data from every link, in order.
    pub(crate) fn prepare(&mut self) -> NetworkResult<()> {
        for link in &self.links {
            link.compute(&mut self.buffer)?;
        }
        Ok(())
    }
}
