use crate::{render_mode::ParseRenderModeError, topology::TopologyError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("position buffer length {0} is not a multiple of 3")]
    PositionLength(usize),
    #[error(transparent)]
    Topology(#[from] TopologyError),
    #[error(transparent)]
    RenderMode(#[from] ParseRenderModeError),
}
