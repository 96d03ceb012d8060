//! Host configuration.

use std::str::FromStr;

use crate::bootstrap::BootstrapConfig;
use crate::driver::FrameErrorPolicy;
use crate::window::WindowConfig;

/// Everything the native host needs to bootstrap and drive an engine.
#[derive(Debug, Clone, Default)]
pub struct HostConfig {
    pub window: WindowConfig,

    /// Surface identifier, context type and construction mode.
    pub bootstrap: BootstrapConfig,

    /// Reaction to a failing frame.
    pub frame_errors: FrameErrorPolicy,

    /// Where the per-frame delta is shown.
    pub readout: DeltaReadout,
}

/// Destination of the frame-delta readout.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum DeltaReadout {
    /// Overwrite the window title with the delta in milliseconds.
    #[default]
    WindowTitle,
    /// Trace-level log lines only.
    Log,
}

impl FromStr for DeltaReadout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(DeltaReadout::WindowTitle),
            "log" => Ok(DeltaReadout::Log),
            other => Err(format!("unknown readout `{other}` (expected `title` or `log`)")),
        }
    }
}
