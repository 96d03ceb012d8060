use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::bootstrap::{self, BootstrapStage};
use crate::config::{DeltaReadout, HostConfig};
use crate::device::GpuContext;
use crate::diagnostics::{DeltaDisplay, LogDisplay};
use crate::driver::{FrameDriver, StepOutcome};
use crate::engine::EngineModule;
use crate::schedule::{FrameScheduler, StopToken};
use crate::surface::{ContextKind, SurfaceHost};
use crate::time::{FrameDelta, SystemClock};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Title shown until the first frame overwrites it with the delta readout.
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "hoo".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Windows registered as drawing surfaces, keyed by identifier.
#[derive(Default)]
pub struct WindowSurfaces {
    windows: HashMap<String, Arc<Window>>,
}

impl WindowSurfaces {
    pub fn register(&mut self, id: impl Into<String>, window: Arc<Window>) {
        self.windows.insert(id.into(), window);
    }
}

impl SurfaceHost for WindowSurfaces {
    type Surface = Arc<Window>;
    type Context = GpuContext;

    fn lookup(&self, id: &str) -> Option<Arc<Window>> {
        self.windows.get(id).cloned()
    }

    fn request_context(&self, surface: &Arc<Window>, kind: ContextKind) -> Option<GpuContext> {
        GpuContext::new(surface.clone(), kind)
    }
}

/// Maps the scheduling primitive onto `Window::request_redraw`.
struct RedrawScheduler<'a>(&'a Window);

impl FrameScheduler for RedrawScheduler<'_> {
    fn request_frame(&mut self) {
        self.0.request_redraw();
    }
}

/// Anything with a title the delta readout can overwrite.
trait TitleTarget {
    fn set_title(&self, title: &str);
}

impl TitleTarget for Arc<Window> {
    fn set_title(&self, title: &str) {
        Window::set_title(self, title);
    }
}

/// Readout selected by [`DeltaReadout`].
enum HostDisplay<T = Arc<Window>> {
    Title(T),
    Log(LogDisplay),
}

impl<T> HostDisplay<T> {
    fn select(readout: DeltaReadout, target: T) -> Self {
        match readout {
            DeltaReadout::WindowTitle => HostDisplay::Title(target),
            DeltaReadout::Log => HostDisplay::Log(LogDisplay),
        }
    }
}

impl<T: TitleTarget> DeltaDisplay for HostDisplay<T> {
    fn publish(&mut self, delta: FrameDelta) {
        match self {
            HostDisplay::Title(target) => target.set_title(&delta.to_string()),
            HostDisplay::Log(sink) => sink.publish(delta),
        }
    }
}

/// Entry point for the native host.
pub struct Runtime;

impl Runtime {
    /// Opens the window, bootstraps `module` against it and drives the engine
    /// until the window closes or the driver stops.
    ///
    /// Bootstrap failures and escalated frame failures are returned.
    pub fn run<M>(config: HostConfig, module: M) -> Result<()>
    where
        M: EngineModule<Context = GpuContext>,
    {
        Self::run_with_stop(config, module, StopToken::new())
    }

    /// Like [`run`](Self::run), stopping once `stop` is set.
    pub fn run_with_stop<M>(config: HostConfig, module: M, stop: StopToken) -> Result<()>
    where
        M: EngineModule<Context = GpuContext>,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, module, stop);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        if let Some(driver) = &state.driver {
            log::info!("frame loop ended after {} frames ({} failed)", driver.frames(), driver.failures());
        }

        match state.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct AppState<M>
where
    M: EngineModule<Context = GpuContext>,
{
    config: HostConfig,
    module: M,
    surfaces: WindowSurfaces,
    window: Option<Arc<Window>>,
    driver: Option<FrameDriver<M::Engine, SystemClock, HostDisplay>>,
    stop: StopToken,
    failure: Option<anyhow::Error>,
}

impl<M> AppState<M>
where
    M: EngineModule<Context = GpuContext>,
{
    fn new(config: HostConfig, module: M, stop: StopToken) -> Self {
        Self {
            config,
            module,
            surfaces: WindowSurfaces::default(),
            window: None,
            driver: None,
            stop,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        self.stop.stop();
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>> {
        let attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(self.config.window.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let window = Arc::new(window);
        self.surfaces
            .register(self.config.bootstrap.surface_id.clone(), window.clone());
        Ok(window)
    }

    /// Runs the bootstrap to completion and installs the driver.
    fn start(&mut self, window: Arc<Window>) -> Result<()> {
        let bootstrapped = pollster::block_on(bootstrap::bootstrap(
            &self.surfaces,
            &mut self.module,
            &self.config.bootstrap,
            &SystemClock,
            |stage: BootstrapStage| log::info!("bootstrap: {stage}"),
        ))
        .context("engine bootstrap failed")?;

        let display = HostDisplay::select(self.config.readout, window.clone());

        let driver = FrameDriver::from_bootstrap(bootstrapped, SystemClock, display)
            .with_policy(self.config.frame_errors)
            .with_stop_token(self.stop.clone());

        self.driver = Some(driver);
        self.window = Some(window.clone());

        // Initial Scheduled state: the first iteration runs on the next redraw.
        window.request_redraw();
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(driver), Some(window)) = (self.driver.as_mut(), self.window.as_ref()) else {
            return;
        };

        let mut scheduler = RedrawScheduler(window);
        match driver.step(&mut scheduler) {
            Ok(StepOutcome::Advanced(_)) | Ok(StepOutcome::Failed(_)) => {}
            Ok(StepOutcome::Stopped) => {
                log::info!("frame driver stopped");
                event_loop.exit();
            }
            Err(err) => self.fail(event_loop, anyhow::Error::new(err).context("frame loop aborted")),
        }
    }
}

impl<M> ApplicationHandler for AppState<M>
where
    M: EngineModule<Context = GpuContext>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Bootstrap runs once per process; later resumes reuse the engine.
        if self.driver.is_some() || self.failure.is_some() {
            return;
        }

        let started = self
            .create_window(event_loop)
            .and_then(|window| self.start(window));

        if let Err(err) = started {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.stop.is_stopped() {
            event_loop.exit();
            return;
        }

        // Frames are driven by redraw requests only.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.window.as_ref().is_none_or(|w| w.id() != window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.stop.stop();
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                self.stop.stop();
                event_loop.exit();
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}
