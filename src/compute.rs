//! Execution strategies for the per-frame computation.
//!
//! The offloaded strategy runs frames on a dedicated compute thread
//! reachable only through channels: the frame state moves into each
//! command and moves back in the reply, so neither side ever holds a
//! usable reference while the other does. The inline strategy runs the
//! identical frame function synchronously for hosts that cannot spare a
//! thread. Frame logic exists once, in [`crate::sim::frame::step`].

use std::io;
use std::sync::Arc;
use std::thread;

use log::debug;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};

use crate::models::link::Link;
use crate::models::simulation_params::SimulationParams;
use crate::sim::frame::{self, FrameState};
use crate::sim::spatial_grid::SpatialGrid;
use crate::types::viewport::Viewport;

/// Which execution strategy a layout instance uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeMode {
    /// Dedicated compute thread driven by the frame transfer protocol.
    Offloaded,
    /// Synchronous stepping in the caller's own context. The layout is
    /// reported stable immediately; reheat still animates, one frame per
    /// tick, on the caller's schedule.
    Inline,
}

enum FrameCommand {
    Step {
        frame: FrameState,
        reply: oneshot::Sender<FrameState>,
    },
}

enum Strategy {
    Offloaded {
        commands: mpsc::Sender<FrameCommand>,
    },
    Inline {
        grid: SpatialGrid,
        links: Arc<[Link]>,
        params: SimulationParams,
        viewport: Viewport,
    },
}

/// The concurrency boundary around one frame of simulation.
///
/// Constructed once per layout instance. Dropping the host closes the
/// command channel; the compute thread observes that and exits without
/// draining, since no frame outcome matters after teardown.
pub struct ComputeHost {
    strategy: Strategy,
}

impl ComputeHost {
    /// Start the offloaded strategy. The link table is shared read-only
    /// with the compute thread; params and viewport are copied, and the
    /// thread owns its own reusable spatial grid.
    pub fn offloaded(
        links: Arc<[Link]>,
        params: SimulationParams,
        viewport: Viewport,
    ) -> io::Result<Self> {
        // capacity 1: frames are strictly sequential, and a second
        // in-flight frame cannot exist because no second buffer exists
        let (commands, receiver) = mpsc::channel(1);
        thread::Builder::new()
            .name("layout-physics".into())
            .spawn(move || run_worker(receiver, links, params, viewport))?;
        Ok(Self {
            strategy: Strategy::Offloaded { commands },
        })
    }

    /// The synchronous strategy, used as the fallback when no thread can
    /// be spawned or when selected explicitly.
    pub fn inline(links: Arc<[Link]>, params: SimulationParams, viewport: Viewport) -> Self {
        Self {
            strategy: Strategy::Inline {
                grid: SpatialGrid::new(params.max_repulsion_distance),
                links,
                params,
                viewport,
            },
        }
    }

    pub fn is_offloaded(&self) -> bool {
        matches!(self.strategy, Strategy::Offloaded { .. })
    }

    /// Dispatch one frame.
    ///
    /// Offloaded: the state moves to the compute thread and the returned
    /// receiver yields it back when the frame completes. Inline: the
    /// frame is computed before returning and the receiver is already
    /// resolved. On dispatch failure the frame is handed back unchanged
    /// so the buffer is never lost.
    pub fn dispatch(
        &mut self,
        mut frame: FrameState,
    ) -> Result<oneshot::Receiver<FrameState>, FrameState> {
        let (reply, receiver) = oneshot::channel();
        match &mut self.strategy {
            Strategy::Offloaded { commands } => {
                match commands.try_send(FrameCommand::Step { frame, reply }) {
                    Ok(()) => Ok(receiver),
                    Err(TrySendError::Full(cmd)) | Err(TrySendError::Closed(cmd)) => {
                        let FrameCommand::Step { frame, .. } = cmd;
                        Err(frame)
                    }
                }
            }
            Strategy::Inline {
                grid,
                links,
                params,
                viewport,
            } => {
                frame::step(&mut frame, links, grid, params, *viewport);
                // the receiver is held right here; the send cannot fail
                let _ = reply.send(frame);
                Ok(receiver)
            }
        }
    }
}

fn run_worker(
    mut commands: mpsc::Receiver<FrameCommand>,
    links: Arc<[Link]>,
    params: SimulationParams,
    viewport: Viewport,
) {
    let mut grid = SpatialGrid::new(params.max_repulsion_distance);
    debug!("Layout compute thread started");
    while let Some(FrameCommand::Step { mut frame, reply }) = commands.blocking_recv() {
        frame::step(&mut frame, &links, &mut grid, &params, viewport);
        if reply.send(frame).is_err() {
            // facade dropped mid-frame; nothing is left to own the buffer
            break;
        }
    }
    debug!("Layout compute thread exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::node::{NodeSlot, STRIDE};
    use crate::types::vec2::Vec2Data;

    fn frame_with_positions(positions: &[(f32, f32)]) -> FrameState {
        let mut buffer = vec![0.0f32; positions.len() * STRIDE];
        {
            let slots: &mut [NodeSlot] = bytemuck::cast_slice_mut(&mut buffer);
            for (slot, &(x, y)) in slots.iter_mut().zip(positions) {
                slot.position = Vec2Data::new(x, y);
                slot.velocity = Vec2Data::zero();
                slot.radius = 10.0;
                slot.kind_tag = 3.0;
            }
        }
        FrameState::new(buffer)
    }

    fn test_links() -> Arc<[Link]> {
        vec![Link::new(0, 1, 1.0)].into()
    }

    #[tokio::test]
    async fn test_offloaded_round_trip() {
        let params = SimulationParams::default();
        let viewport = Viewport::new(800.0, 600.0);
        let mut host = ComputeHost::offloaded(test_links(), params, viewport).unwrap();
        let frame = frame_with_positions(&[(380.0, 300.0), (420.0, 300.0)]);

        let receiver = host.dispatch(frame).unwrap();
        let frame = receiver.await.unwrap();

        assert_eq!(frame.node_count(), 2);
        assert!(frame.cooling.alpha() < 1.0);
    }

    #[tokio::test]
    async fn test_fallback_equivalence() {
        let params = SimulationParams::default();
        let viewport = Viewport::new(800.0, 600.0);
        let positions = [(380.0, 300.0), (420.0, 300.0), (400.0, 340.0)];

        let mut offloaded = ComputeHost::offloaded(test_links(), params, viewport).unwrap();
        let off_frame = offloaded
            .dispatch(frame_with_positions(&positions))
            .unwrap()
            .await
            .unwrap();

        let mut inline = ComputeHost::inline(test_links(), params, viewport);
        let mut inline_receiver = inline.dispatch(frame_with_positions(&positions)).unwrap();
        let inline_frame = inline_receiver.try_recv().unwrap();

        // identical inputs through either strategy, identical output
        assert_eq!(off_frame.buffer, inline_frame.buffer);
        assert_eq!(off_frame.cooling.alpha(), inline_frame.cooling.alpha());
    }

    #[tokio::test]
    async fn test_inline_dispatch_resolves_immediately() {
        let params = SimulationParams::default();
        let viewport = Viewport::new(800.0, 600.0);
        let mut host = ComputeHost::inline(test_links(), params, viewport);

        let mut receiver = host
            .dispatch(frame_with_positions(&[(380.0, 300.0), (420.0, 300.0)]))
            .unwrap();

        assert!(receiver.try_recv().is_ok());
    }
}
