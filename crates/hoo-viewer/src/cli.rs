//! Command-line arguments.

use clap::Parser;
use winit::dpi::LogicalSize;

use hoo_host::{ConstructionMode, DeltaReadout, FrameErrorPolicy, HostConfig};

use crate::clear::ClearSettings;

/// hoo viewer command-line arguments.
///
/// Every value is optional; unset values keep the defaults.
#[derive(Parser, Debug, Default)]
#[command(name = "hoo-viewer", about = "Drives a demo engine at the display refresh rate")]
pub struct CliArgs {
    /// Identifier the window surface is registered under.
    #[arg(long)]
    pub surface_id: Option<String>,

    /// Context type requested from the surface (webgpu, webgl2).
    #[arg(long)]
    pub context_type: Option<String>,

    /// Engine construction path (sync, async).
    #[arg(long)]
    pub construction: Option<ConstructionMode>,

    /// Reaction to a failing frame (continue, halt, escalate).
    #[arg(long)]
    pub on_frame_error: Option<FrameErrorPolicy>,

    /// Where the frame delta is shown (title, log).
    #[arg(long)]
    pub readout: Option<DeltaReadout>,

    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Frames per color cycle of the demo engine.
    #[arg(long)]
    pub cycle_frames: Option<u64>,

    /// Make the demo engine fail from this frame on.
    #[arg(long)]
    pub fail_after: Option<u64>,

    /// Log filter (env_logger syntax, e.g. "debug" or "hoo_host=trace").
    #[arg(long)]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Apply CLI overrides to a host config.
    pub fn apply_cli_overrides(&self, config: &mut HostConfig) {
        if let Some(ref id) = self.surface_id {
            config.bootstrap.surface_id = id.clone();
        }
        if let Some(ref ty) = self.context_type {
            config.bootstrap.context_type = ty.clone();
        }
        if let Some(mode) = self.construction {
            config.bootstrap.construction = mode;
        }
        if let Some(policy) = self.on_frame_error {
            config.frame_errors = policy;
        }
        if let Some(readout) = self.readout {
            config.readout = readout;
        }

        let size = config.window.initial_size;
        config.window.initial_size = LogicalSize::new(
            self.width.map_or(size.width, f64::from),
            self.height.map_or(size.height, f64::from),
        );
    }

    /// Demo engine settings with CLI overrides applied.
    pub fn clear_settings(&self) -> ClearSettings {
        let mut settings = ClearSettings::default();
        if let Some(n) = self.cycle_frames {
            settings.cycle_frames = n;
        }
        settings.fail_after = self.fail_after;
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_keeps_defaults() {
        let args = CliArgs::parse_from(["hoo-viewer"]);
        let mut config = HostConfig::default();
        args.apply_cli_overrides(&mut config);

        assert_eq!(config.bootstrap.surface_id, "mainCanvas");
        assert_eq!(config.bootstrap.context_type, "webgpu");
        assert_eq!(config.window.initial_size, LogicalSize::new(1280.0, 720.0));
        assert_eq!(args.clear_settings().cycle_frames, 600);
    }

    #[test]
    fn test_cli_override() {
        let args = CliArgs::parse_from([
            "hoo-viewer",
            "--surface-id",
            "preview",
            "--context-type",
            "webgl2",
            "--construction",
            "sync",
            "--on-frame-error",
            "continue",
            "--readout",
            "log",
            "--width",
            "640",
        ]);
        let mut config = HostConfig::default();
        args.apply_cli_overrides(&mut config);

        assert_eq!(config.bootstrap.surface_id, "preview");
        assert_eq!(config.bootstrap.context_type, "webgl2");
        assert_eq!(config.bootstrap.construction, ConstructionMode::Sync);
        assert_eq!(config.frame_errors, FrameErrorPolicy::LogAndContinue);
        assert_eq!(config.readout, DeltaReadout::Log);
        assert_eq!(config.window.initial_size, LogicalSize::new(640.0, 720.0));
    }

    #[test]
    fn test_demo_engine_overrides() {
        let args = CliArgs::parse_from(["hoo-viewer", "--cycle-frames", "120", "--fail-after", "10"]);
        let settings = args.clear_settings();
        assert_eq!(settings.cycle_frames, 120);
        assert_eq!(settings.fail_after, Some(10));
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        assert!(CliArgs::try_parse_from(["hoo-viewer", "--on-frame-error", "retry"]).is_err());
    }
}
