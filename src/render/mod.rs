pub(crate) mod backend;
pub(crate) mod cpu;
pub(crate) mod frame;
pub(crate) mod passes;
pub(crate) mod pipeline;
pub(crate) mod plan;
pub(crate) mod recording;
pub(crate) mod transform;
