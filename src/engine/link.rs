// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::VecDeque;
use std::fmt;

use crate::buffer::{ArrayData, Buffer};
use crate::errors::{BundleError, NetworkError, NetworkResult};

/// Identity of a link: its two endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkKey {
    pub src_region: String,
    pub src_output: String,
    pub dest_region: String,
    pub dest_input: String,
}

impl LinkKey {
    pub fn new(
        src_region: impl Into<String>,
        src_output: impl Into<String>,
        dest_region: impl Into<String>,
        dest_input: impl Into<String>,
    ) -> Self {
        Self {
            src_region: src_region.into(),
            src_output: src_output.into(),
            dest_region: dest_region.into(),
            dest_input: dest_input.into(),
        }
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}-->{}.{}",
            self.src_region, self.src_output, self.dest_region, self.dest_input
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Constructed but not attached to its ports.
    Unbound,
    /// Attached to both ports; offset not yet assigned.
    Bound,
    /// Offset and zero-copy eligibility fixed; ready to move data.
    Initialized,
}

/// A directed data channel from one output to one input.
///
/// A link with propagation delay `D > 0` keeps a queue of exactly `D` deep
/// copies of its source. The front of the queue is what the destination sees
/// this iteration; [`Link::shift_buffered_data`] advances the queue once per
/// iteration, after every region has computed.
pub struct Link {
    key: LinkKey,
    link_type: String,
    link_params: String,
    delay: usize,
    queue: VecDeque<Buffer>,
    restored: bool,
    source: Option<Buffer>,
    offset: usize,
    zero_copy: bool,
    state: LinkState,
}

impl Link {
    pub fn new(
        key: LinkKey,
        link_type: impl Into<String>,
        link_params: impl Into<String>,
        delay: usize,
    ) -> Self {
        Self {
            key,
            link_type: link_type.into(),
            link_params: link_params.into(),
            delay,
            queue: VecDeque::with_capacity(delay + 1),
            restored: false,
            source: None,
            offset: 0,
            zero_copy: false,
            state: LinkState::Unbound,
        }
    }

    pub fn key(&self) -> &LinkKey {
        &self.key
    }

    pub fn link_type(&self) -> &str {
        &self.link_type
    }

    pub fn link_params(&self) -> &str {
        &self.link_params
    }

    pub fn delay(&self) -> usize {
        self.delay
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_zero_copy(&self) -> bool {
        self.zero_copy
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Number of snapshots currently queued.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub(crate) fn bind(&mut self) {
        self.state = LinkState::Bound;
    }

    /// Back to `Bound`; the delay queue survives so a re-initialization
    /// doesn't lose in-flight data.
    pub(crate) fn uninitialize(&mut self) {
        if self.state == LinkState::Initialized {
            self.state = LinkState::Bound;
        }
        self.source = None;
    }

    /// Fix this link's offset into the destination and attach the source
    /// buffer.
    ///
    /// A queue restored from a bundle is kept and must match the source in
    /// element type and width, entry by entry. Otherwise the queue survives
    /// only if it is full and every entry still matches; anything else is
    /// replaced by `D` zeroed snapshots.
    pub(crate) fn initialize(
        &mut self,
        source: Buffer,
        offset: usize,
        zero_copy: bool,
    ) -> NetworkResult<()> {
        if self.delay > 0 {
            let mismatch = self.queue.iter().position(|queued| {
                queued.len() != source.len() || queued.element_type() != source.element_type()
            });
            if self.restored && !self.queue.is_empty() {
                if let Some(index) = mismatch {
                    let queued = &self.queue[index];
                    return Err(BundleError::Malformed(format!(
                        "link {} buffered snapshot {} is {} x {:?}, source is {} x {:?}",
                        self.key,
                        index,
                        queued.len(),
                        queued.element_type(),
                        source.len(),
                        source.element_type()
                    ))
                    .into());
                }
            } else if mismatch.is_some() || self.queue.len() != self.delay {
                self.queue.clear();
                for _ in 0..self.delay {
                    self.queue
                        .push_back(Buffer::zeroed(source.element_type(), source.len()));
                }
            }
        }
        self.restored = false;
        self.source = Some(source);
        self.offset = offset;
        self.zero_copy = zero_copy;
        self.state = LinkState::Initialized;
        Ok(())
    }

    /// Width of the source output. Zero before initialization.
    pub fn source_len(&self) -> usize {
        self.source.as_ref().map_or(0, Buffer::len)
    }

    fn current_source(&self) -> NetworkResult<&Buffer> {
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| NetworkError::LinkNotInitialized(self.key.to_string()))?;
        if self.delay == 0 {
            return Ok(source);
        }
        self.queue
            .front()
            .ok_or_else(|| NetworkError::LinkNotInitialized(self.key.to_string()))
    }

    /// Move this iteration's data into `dest`.
    ///
    /// With zero-copy the destination handle is replaced by a shared handle to
    /// the source storage. Otherwise the source is converted and copied into
    /// `dest` at this link's offset.
    pub(crate) fn compute(&self, dest: &mut Buffer) -> NetworkResult<()> {
        let source = self.current_source()?;
        if self.zero_copy {
            *dest = source.share();
            return Ok(());
        }
        source.copy_into(dest, self.offset)?;
        Ok(())
    }

    /// Push a snapshot of the source and drop the oldest entry.
    pub(crate) fn shift_buffered_data(&mut self) -> NetworkResult<()> {
        if self.delay == 0 {
            return Ok(());
        }
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| NetworkError::LinkNotInitialized(self.key.to_string()))?;
        self.queue.push_back(source.deep_copy());
        while self.queue.len() > self.delay {
            self.queue.pop_front();
        }
        Ok(())
    }

    /// Every queued snapshot except the newest, oldest first.
    ///
    /// The newest entry always equals the source output at the end of an
    /// iteration, so it is rebuilt from the restored output on load.
    pub fn delay_buffer_snapshot(&self) -> Vec<ArrayData> {
        let keep = self.queue.len().saturating_sub(1);
        self.queue
            .iter()
            .take(keep)
            .map(Buffer::snapshot)
            .collect()
    }

    /// Refill the queue from a saved snapshot list of `D - 1` entries. An
    /// empty list restarts the queue from zeros.
    pub(crate) fn restore_delay_buffer(&mut self, snapshots: Vec<ArrayData>) -> NetworkResult<()> {
        if !snapshots.is_empty() && snapshots.len() + 1 != self.delay {
            return Err(BundleError::Malformed(format!(
                "link {} has delay {} but {} buffered snapshots (expected {})",
                self.key,
                self.delay,
                snapshots.len(),
                self.delay.saturating_sub(1)
            ))
            .into());
        }
        self.queue = snapshots.into_iter().map(Buffer::new).collect();
        self.restored = true;
        Ok(())
    }
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Link")
            .field("key", &self.key.to_string())
            .field("delay", &self.delay)
            .field("offset", &self.offset)
            .field("zero_copy", &self.zero_copy)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::ElementType;

    fn key() -> LinkKey {
        LinkKey::new("a", "out", "b", "in")
    }

    #[test]
    fn test_key_display() {
        assert_eq!(key().to_string(), "a.out-->b.in");
    }

    #[test]
    fn test_state_progression() {
        let mut link = Link::new(key(), "", "", 0);
        assert_eq!(link.state(), LinkState::Unbound);
        link.bind();
        assert_eq!(link.state(), LinkState::Bound);
        link.initialize(Buffer::zeroed(ElementType::Real32, 2), 0, false).unwrap();
        assert_eq!(link.state(), LinkState::Initialized);
        link.uninitialize();
        assert_eq!(link.state(), LinkState::Bound);
    }

    #[test]
    fn test_compute_before_initialize_fails() {
        let link = Link::new(key(), "", "", 0);
        let mut dest = Buffer::zeroed(ElementType::Real32, 2);
        assert!(matches!(
            link.compute(&mut dest),
            Err(NetworkError::LinkNotInitialized(_))
        ));
    }

    #[test]
    fn test_copy_at_offset_with_conversion() {
        let source = Buffer::from_vec(vec![7_i32, 8]);
        let mut link = Link::new(key(), "", "", 0);
        link.initialize(source, 1, false).unwrap();

        let mut dest = Buffer::zeroed(ElementType::Real64, 4);
        link.compute(&mut dest).unwrap();
        assert_eq!(dest.to_vec::<f64>(), vec![0.0, 7.0, 8.0, 0.0]);
    }

    #[test]
    fn test_copy_overflow_is_capacity_error() {
        let mut link = Link::new(key(), "", "", 0);
        link.initialize(Buffer::from_vec(vec![1.0_f32, 2.0, 3.0]), 2, false).unwrap();

        let mut dest = Buffer::zeroed(ElementType::Real32, 4);
        let err = link.compute(&mut dest).unwrap_err();
        assert_eq!(err.kind(), crate::errors::ErrorKind::Capacity);
    }

    #[test]
    fn test_zero_copy_shares_storage() {
        let source = Buffer::from_vec(vec![1.0_f32, 2.0]);
        let mut link = Link::new(key(), "", "", 0);
        link.initialize(source.share(), 0, true).unwrap();

        let mut dest = Buffer::zeroed(ElementType::Real32, 2);
        link.compute(&mut dest).unwrap();
        assert!(dest.shares_storage_with(&source));
    }

    #[test]
    fn test_delay_queue_shift_register() {
        let source = Buffer::from_vec(vec![0_i32]);
        let mut link = Link::new(key(), "", "", 2);
        link.initialize(source.share(), 0, false).unwrap();
        assert_eq!(link.queued(), 2);

        let mut seen = Vec::new();
        for value in 1..=5 {
            let mut dest = Buffer::zeroed(ElementType::Int32, 1);
            source.slice_mut::<i32>().unwrap()[0] = value;
            link.compute(&mut dest).unwrap();
            seen.push(dest.to_vec::<i32>()[0]);
            link.shift_buffered_data().unwrap();
            assert_eq!(link.queued(), 2);
        }
        assert_eq!(seen, vec![0, 0, 1, 2, 3]);
    }

    #[test]
    fn test_snapshot_and_restore_keep_all_but_newest() {
        let source = Buffer::from_vec(vec![0_i32]);
        let mut link = Link::new(key(), "", "", 3);
        link.initialize(source.share(), 0, false).unwrap();
        for value in 1..=3 {
            source.slice_mut::<i32>().unwrap()[0] = value;
            link.shift_buffered_data().unwrap();
        }

        let snapshots = link.delay_buffer_snapshot();
        assert_eq!(
            snapshots,
            vec![ArrayData::from_vec(vec![1_i32]), ArrayData::from_vec(vec![2_i32])]
        );

        let mut restored = Link::new(key(), "", "", 3);
        restored.restore_delay_buffer(snapshots).unwrap();
        restored.initialize(source.share(), 0, false).unwrap();
        assert_eq!(restored.queued(), 2);
        restored.shift_buffered_data().unwrap();
        assert_eq!(restored.queued(), 3);

        let mut dest = Buffer::zeroed(ElementType::Int32, 1);
        restored.compute(&mut dest).unwrap();
        assert_eq!(dest.to_vec::<i32>(), vec![1]);
    }

    #[test]
    fn test_restore_rejects_full_queue() {
        let mut link = Link::new(key(), "", "", 1);
        let err = link
            .restore_delay_buffer(vec![ArrayData::from_vec(vec![1_i32])])
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_restore_rejects_short_queue() {
        let mut link = Link::new(key(), "", "", 3);
        let err = link
            .restore_delay_buffer(vec![ArrayData::from_vec(vec![1_i32])])
            .unwrap_err();
        assert!(matches!(err, NetworkError::Bundle(BundleError::Malformed(_))));
        assert_eq!(link.queued(), 0);
    }

    #[test]
    fn test_restored_queue_must_match_source_shape() {
        let source = Buffer::from_vec(vec![0_i32, 0]);
        let mut link = Link::new(key(), "", "", 3);
        link.restore_delay_buffer(vec![
            ArrayData::from_vec(vec![1_i32, 1]),
            ArrayData::from_vec(vec![2_i32]),
        ])
        .unwrap();

        let err = link.initialize(source.share(), 0, false).unwrap_err();
        assert!(matches!(err, NetworkError::Bundle(BundleError::Malformed(_))));
        assert_eq!(link.state(), LinkState::Unbound);
    }

    #[test]
    fn test_reinitialize_keeps_full_queue() {
        let source = Buffer::from_vec(vec![0_i32]);
        let mut link = Link::new(key(), "", "", 2);
        link.initialize(source.share(), 0, false).unwrap();
        for value in [7, 8] {
            source.slice_mut::<i32>().unwrap()[0] = value;
            link.shift_buffered_data().unwrap();
        }

        link.uninitialize();
        link.initialize(source.share(), 0, false).unwrap();
        assert_eq!(link.queued(), 2);
        assert_eq!(
            link.delay_buffer_snapshot(),
            vec![ArrayData::from_vec(vec![7_i32])]
        );
    }
}
