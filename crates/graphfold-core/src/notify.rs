//! Visibility-change notification
//!
//! A graph that changes visibility reports the inclusive full-index range it
//! touched to every registered listener, handing itself in as the predicate so
//! each listener can re-read visibility before `notify` returns.

use tracing::trace;

use crate::compaction::CompactionMap;
use crate::error::Result;
use crate::graph::NodeVisibility;
use crate::model::FullIndex;

/// Callback for "visibility may have changed inside `[up_index, down_index]`".
pub trait UpdateListener {
    fn update(
        &mut self,
        visibility: &dyn NodeVisibility,
        up_index: FullIndex,
        down_index: FullIndex,
    ) -> Result<()>;
}

impl UpdateListener for CompactionMap {
    fn update(
        &mut self,
        visibility: &dyn NodeVisibility,
        up_index: FullIndex,
        down_index: FullIndex,
    ) -> Result<()> {
        CompactionMap::update(self, up_index, down_index, |i| visibility.node_is_visible(i))?;
        Ok(())
    }
}

/// Registration point for listeners. Dispatch is synchronous and in
/// registration order; the first failing listener aborts the dispatch.
#[derive(Default)]
pub struct ListenerController<'a> {
    listeners: Vec<&'a mut dyn UpdateListener>,
}

impl<'a> ListenerController<'a> {
    pub fn new() -> Self {
        ListenerController {
            listeners: Vec::new(),
        }
    }

    pub fn add_listener(&mut self, listener: &'a mut dyn UpdateListener) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn notify(
        &mut self,
        visibility: &dyn NodeVisibility,
        up_index: FullIndex,
        down_index: FullIndex,
    ) -> Result<()> {
        trace!(
            "Dispatching visibility change [{}, {}] to {} listeners",
            up_index.0,
            down_index.0,
            self.listeners.len()
        );
        for listener in self.listeners.iter_mut() {
            listener.update(visibility, up_index, down_index)?;
        }
        Ok(())
    }
}
