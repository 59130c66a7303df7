use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec2;
use log::{info, warn};
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use crate::compute::{ComputeHost, ComputeMode};
use crate::models::link::{resolve_links, Link, LinkSpec};
use crate::models::node::{NodeMeta, NodeSpec};
use crate::models::node_store::NodeStore;
use crate::models::simulation_params::SimulationParams;
use crate::sim::frame::FrameState;
use crate::types::viewport::Viewport;

/// Errors surfaced by the layout facade.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A frame is already in flight. The buffer has exactly one owner and
    /// right now that owner is the compute context.
    #[error("frame already in flight")]
    FrameInFlight,
    /// No frame has been dispatched, so there is nothing to complete.
    #[error("no frame in flight")]
    NoFrameInFlight,
    /// The compute context is gone; the instance must be rebuilt.
    #[error("compute context unavailable")]
    ComputeGone,
}

/// The one component the embedding application touches.
///
/// Builds the node store and link table from raw input, drives the
/// per-frame transfer protocol against the compute host, and republishes
/// node metadata, the live position buffer and the stable flag. Supplying
/// new input means constructing a new instance; graphs are replaced
/// wholesale, never diffed.
pub struct LayoutService {
    meta: Arc<[NodeMeta]>,
    index: HashMap<String, u32>,
    links: Arc<[Link]>,
    params: SimulationParams,
    viewport: Viewport,
    host: ComputeHost,
    frame: Option<FrameState>,
    pending: Option<oneshot::Receiver<FrameState>>,
    reheat_latched: bool,
    stable: bool,
}

impl LayoutService {
    /// Initialize with default parameters on the offloaded strategy,
    /// falling back to synchronous execution if no thread is available.
    pub fn new(nodes: &[NodeSpec], links: &[LinkSpec], viewport: Viewport) -> Self {
        Self::with_params(
            nodes,
            links,
            viewport,
            SimulationParams::default(),
            ComputeMode::Offloaded,
        )
    }

    pub fn with_params(
        nodes: &[NodeSpec],
        link_specs: &[LinkSpec],
        viewport: Viewport,
        params: SimulationParams,
        mode: ComputeMode,
    ) -> Self {
        let store = NodeStore::build(nodes, viewport);
        let (buffer, meta, index) = store.into_parts();
        let links: Arc<[Link]> = resolve_links(link_specs, &index).into();
        let mut frame = FrameState::new(buffer);

        let (host, synchronous) = match mode {
            ComputeMode::Offloaded => {
                match ComputeHost::offloaded(Arc::clone(&links), params, viewport) {
                    Ok(host) => (host, false),
                    Err(err) => {
                        warn!(
                            "No isolated compute context available ({}); \
                             falling back to synchronous layout",
                            err
                        );
                        (ComputeHost::inline(Arc::clone(&links), params, viewport), true)
                    }
                }
            }
            ComputeMode::Inline => (ComputeHost::inline(Arc::clone(&links), params, viewport), true),
        };

        if synchronous {
            // a synchronous layout presents as already settled; reheat
            // re-animates it on the caller's schedule
            frame.cooling.force_stable(&params);
        }
        let stable = frame.cooling.is_stable();

        info!(
            "Layout initialized: {} nodes, {} links, offloaded={}",
            meta.len(),
            links.len(),
            host.is_offloaded()
        );

        Self {
            meta: meta.into(),
            index,
            links,
            params,
            viewport,
            host,
            frame: Some(frame),
            pending: None,
            reheat_latched: false,
            stable,
        }
    }

    /// Dispatch one frame to the compute host.
    ///
    /// Returns `Ok(true)` when a frame went out, `Ok(false)` when the
    /// simulation is stable and idling. The buffer moves to the compute
    /// context; until the frame completes, [`positions`](Self::positions)
    /// returns `None` and a second request is rejected.
    pub fn request_frame(&mut self) -> Result<bool, LayoutError> {
        if self.pending.is_some() {
            return Err(LayoutError::FrameInFlight);
        }
        let frame = self.frame.take().ok_or(LayoutError::FrameInFlight)?;
        if frame.cooling.is_stable() {
            // idle until reheated
            self.frame = Some(frame);
            return Ok(false);
        }
        match self.host.dispatch(frame) {
            Ok(receiver) => {
                self.pending = Some(receiver);
                Ok(true)
            }
            Err(frame) => {
                self.frame = Some(frame);
                Err(LayoutError::ComputeGone)
            }
        }
    }

    /// Non-blocking poll for the in-flight frame. `Ok(true)` once the
    /// frame has come back and the buffer is readable again.
    pub fn try_complete_frame(&mut self) -> Result<bool, LayoutError> {
        let receiver = self
            .pending
            .as_mut()
            .ok_or(LayoutError::NoFrameInFlight)?;
        match receiver.try_recv() {
            Ok(frame) => {
                self.pending = None;
                self.install(frame);
                Ok(true)
            }
            Err(TryRecvError::Empty) => Ok(false),
            Err(TryRecvError::Closed) => {
                self.pending = None;
                Err(LayoutError::ComputeGone)
            }
        }
    }

    /// Await the in-flight frame.
    pub async fn complete_frame(&mut self) -> Result<(), LayoutError> {
        let receiver = self.pending.take().ok_or(LayoutError::NoFrameInFlight)?;
        match receiver.await {
            Ok(frame) => {
                self.install(frame);
                Ok(())
            }
            Err(_) => Err(LayoutError::ComputeGone),
        }
    }

    /// Request and await one frame. Returns the post-frame stable flag.
    pub async fn tick(&mut self) -> Result<bool, LayoutError> {
        if self.request_frame()? {
            self.complete_frame().await?;
        }
        Ok(self.stable)
    }

    fn install(&mut self, mut frame: FrameState) {
        if self.reheat_latched {
            frame.cooling.reheat(&self.params);
            self.reheat_latched = false;
        }
        self.stable = frame.cooling.is_stable();
        self.frame = Some(frame);
    }

    /// Raise alpha back to the reheat level so the layout resumes motion.
    /// Safe to call at any time; never needs the buffer. If a frame is in
    /// flight the reheat is applied when it returns.
    pub fn reheat(&mut self) {
        match self.frame.as_mut() {
            Some(frame) => frame.cooling.reheat(&self.params),
            None => self.reheat_latched = true,
        }
        self.stable = false;
    }

    pub fn is_stable(&self) -> bool {
        self.stable
    }

    /// Current alpha, or `None` while the frame is in flight.
    pub fn alpha(&self) -> Option<f32> {
        self.frame.as_ref().map(|frame| frame.cooling.alpha())
    }

    /// Immutable node metadata, index-aligned with the position buffer and
    /// stable for the lifetime of the instance.
    pub fn metadata(&self) -> &[NodeMeta] {
        &self.meta
    }

    /// The live stride-6 buffer, or `None` exactly while ownership is
    /// transferred to the compute context.
    pub fn positions(&self) -> Option<&[f32]> {
        self.frame.as_ref().map(|frame| frame.buffer.as_slice())
    }

    /// Position of one slot, when the buffer is held locally.
    pub fn position_of(&self, slot: u32) -> Option<Vec2> {
        let frame = self.frame.as_ref()?;
        frame
            .slots()
            .get(slot as usize)
            .map(|s| s.position.as_vec2())
    }

    /// Slot index for an external node identity.
    pub fn slot_of(&self, id: &str) -> Option<u32> {
        self.index.get(id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.meta.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Tear down the instance. Dropping is equivalent: the compute thread
    /// observes the closed command channel and exits without draining.
    pub fn destroy(self) {}
}
