//! One-shot startup: surface → engine module → engine instance.

use std::fmt;
use std::time::Instant;

use crate::engine::{ConstructionMode, EngineModule};
use crate::error::{BootstrapError, EngineInitError, ModuleLoadError};
use crate::surface::{self, SurfaceHost};
use crate::time::Clock;

/// Bootstrap steps, in execution order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum BootstrapStage {
    AcquireSurface,
    LoadModule,
    ConstructEngine,
}

impl fmt::Display for BootstrapStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BootstrapStage::AcquireSurface => "acquire surface",
            BootstrapStage::LoadModule => "load engine module",
            BootstrapStage::ConstructEngine => "construct engine",
        })
    }
}

/// Parameters of a bootstrap run.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Identifier of the drawing surface to bind.
    pub surface_id: String,

    /// Context type requested from the surface (`webgpu`, `webgl2`).
    pub context_type: String,

    /// Construction entry point.
    pub construction: ConstructionMode,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            surface_id: surface::DEFAULT_SURFACE_ID.to_string(),
            context_type: surface::DEFAULT_CONTEXT_TYPE.to_string(),
            construction: ConstructionMode::default(),
        }
    }
}

/// A successfully constructed engine and the moment bootstrap finished.
#[derive(Debug)]
pub struct Bootstrapped<E> {
    pub engine: E,
    pub completed_at: Instant,
}

/// Awaits module initialization.
pub async fn load_engine_module<M: EngineModule>(module: &mut M) -> Result<(), ModuleLoadError> {
    module.initialize().await
}

/// Constructs the engine through the entry point selected by `mode`.
pub async fn construct_engine<M: EngineModule>(
    module: &mut M,
    context: M::Context,
    mode: ConstructionMode,
) -> Result<M::Engine, EngineInitError> {
    match mode {
        ConstructionMode::Async => module.construct_async(context).await,
        ConstructionMode::Sync => module.construct(context),
    }
}

/// Runs the bootstrap sequence.
///
/// Stages run strictly in order and the first failure aborts the rest; the
/// engine is only returned when every stage succeeded. `observe` is invoked as
/// each stage begins.
pub async fn bootstrap<H, M, C>(
    host: &H,
    module: &mut M,
    config: &BootstrapConfig,
    clock: &C,
    mut observe: impl FnMut(BootstrapStage),
) -> Result<Bootstrapped<M::Engine>, BootstrapError>
where
    H: SurfaceHost<Context = M::Context> + ?Sized,
    M: EngineModule,
    C: Clock + ?Sized,
{
    observe(BootstrapStage::AcquireSurface);
    log::debug!(
        "bootstrap: acquiring `{}` context from surface `{}`",
        config.context_type,
        config.surface_id
    );
    let context = surface::acquire_surface(host, &config.surface_id, &config.context_type)?;

    observe(BootstrapStage::LoadModule);
    log::debug!("bootstrap: loading engine module");
    load_engine_module(module).await?;

    observe(BootstrapStage::ConstructEngine);
    log::debug!("bootstrap: constructing engine ({:?})", config.construction);
    let engine = construct_engine(module, context, config.construction).await?;

    let completed_at = clock.now();
    log::info!("bootstrap complete; engine bound to `{}`", config.surface_id);

    Ok(Bootstrapped { engine, completed_at })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::engine::Engine;
    use crate::error::{FrameAdvanceError, SurfaceUnavailable};
    use crate::surface::ContextKind;
    use crate::time::ManualClock;

    #[derive(Debug, Clone, Eq, PartialEq)]
    enum Call {
        Lookup(String),
        Context(ContextKind),
        Initialize,
        ConstructAsync,
        ConstructSync,
    }

    type Log = Rc<RefCell<Vec<Call>>>;

    struct FakeHost {
        surfaces: Vec<&'static str>,
        log: Log,
    }

    impl SurfaceHost for FakeHost {
        type Surface = String;
        type Context = String;

        fn lookup(&self, id: &str) -> Option<String> {
            self.log.borrow_mut().push(Call::Lookup(id.to_string()));
            self.surfaces.iter().find(|s| **s == id).map(|s| s.to_string())
        }

        fn request_context(&self, surface: &String, kind: ContextKind) -> Option<String> {
            self.log.borrow_mut().push(Call::Context(kind));
            Some(format!("{surface}:{kind}"))
        }
    }

    #[derive(Debug)]
    struct FakeEngine;

    impl Engine for FakeEngine {
        fn advance_frame(&mut self) -> Result<(), FrameAdvanceError> {
            Ok(())
        }
    }

    struct FakeModule {
        fail_load: bool,
        fail_construct: bool,
        bound_to: Option<String>,
        log: Log,
        /// Advanced by 10ms on initialize and 20ms on construction when set.
        clock: Option<Rc<ManualClock>>,
    }

    impl FakeModule {
        fn new(log: &Log) -> Self {
            Self { fail_load: false, fail_construct: false, bound_to: None, log: log.clone(), clock: None }
        }

        fn tick(&self, by: Duration) {
            if let Some(clock) = &self.clock {
                clock.advance(by);
            }
        }
    }

    impl EngineModule for FakeModule {
        type Context = String;
        type Engine = FakeEngine;

        async fn initialize(&mut self) -> Result<(), ModuleLoadError> {
            self.log.borrow_mut().push(Call::Initialize);
            self.tick(Duration::from_millis(10));
            if self.fail_load {
                return Err(ModuleLoadError::new("network failure"));
            }
            Ok(())
        }

        async fn construct_async(&mut self, context: String) -> Result<FakeEngine, EngineInitError> {
            self.log.borrow_mut().push(Call::ConstructAsync);
            self.tick(Duration::from_millis(20));
            if self.fail_construct {
                return Err(EngineInitError::new("no compatible adapter"));
            }
            self.bound_to = Some(context);
            Ok(FakeEngine)
        }

        fn construct(&mut self, context: String) -> Result<FakeEngine, EngineInitError> {
            self.log.borrow_mut().push(Call::ConstructSync);
            self.tick(Duration::from_millis(20));
            self.bound_to = Some(context);
            Ok(FakeEngine)
        }
    }

    fn host(log: &Log) -> FakeHost {
        FakeHost { surfaces: vec!["mainCanvas"], log: log.clone() }
    }

    fn run(
        host: &FakeHost,
        module: &mut FakeModule,
        config: &BootstrapConfig,
        clock: &ManualClock,
    ) -> (Result<Bootstrapped<FakeEngine>, BootstrapError>, Vec<BootstrapStage>) {
        let mut stages = Vec::new();
        let result = pollster::block_on(bootstrap(host, module, config, clock, |s| stages.push(s)));
        (result, stages)
    }

    #[test]
    fn stages_run_in_order_and_bind_the_surface() {
        let log = Log::default();
        let clock = ManualClock::new();
        let mut module = FakeModule::new(&log);

        let (result, stages) = run(&host(&log), &mut module, &BootstrapConfig::default(), &clock);

        assert!(result.is_ok());
        assert_eq!(
            stages,
            [BootstrapStage::AcquireSurface, BootstrapStage::LoadModule, BootstrapStage::ConstructEngine]
        );
        assert_eq!(
            *log.borrow(),
            [
                Call::Lookup("mainCanvas".into()),
                Call::Context(ContextKind::WebGpu),
                Call::Initialize,
                Call::ConstructAsync,
            ]
        );
        assert_eq!(module.bound_to.as_deref(), Some("mainCanvas:webgpu"));
    }

    #[test]
    fn completion_time_is_read_after_construction() {
        let log = Log::default();
        let clock = Rc::new(ManualClock::new());
        let start = clock.now();
        let mut module = FakeModule { clock: Some(clock.clone()), ..FakeModule::new(&log) };

        let (result, _) = run(&host(&log), &mut module, &BootstrapConfig::default(), &clock);

        let completed_at = result.unwrap().completed_at;
        assert_eq!(completed_at, clock.now());
        assert_eq!(completed_at - start, Duration::from_millis(30));
    }

    #[test]
    fn sync_construction_also_finishes_before_completion_time() {
        let log = Log::default();
        let clock = Rc::new(ManualClock::new());
        let start = clock.now();
        let mut module = FakeModule { clock: Some(clock.clone()), ..FakeModule::new(&log) };
        let config = BootstrapConfig { construction: ConstructionMode::Sync, ..Default::default() };

        let (result, _) = run(&host(&log), &mut module, &config, &clock);

        assert_eq!(result.unwrap().completed_at - start, Duration::from_millis(30));
    }

    #[test]
    fn missing_surface_aborts_before_module_load() {
        let log = Log::default();
        let host = FakeHost { surfaces: vec![], log: log.clone() };
        let mut module = FakeModule::new(&log);

        let (result, stages) = run(&host, &mut module, &BootstrapConfig::default(), &ManualClock::new());

        let err = result.unwrap_err();
        assert!(matches!(
            err,
            BootstrapError::SurfaceUnavailable(SurfaceUnavailable::MissingSurface { .. })
        ));
        assert_eq!(stages, [BootstrapStage::AcquireSurface]);
        assert!(!log.borrow().contains(&Call::Initialize));
    }

    #[test]
    fn module_load_failure_never_constructs() {
        let log = Log::default();
        let mut module = FakeModule::new(&log);
        module.fail_load = true;

        let (result, _) = run(&host(&log), &mut module, &BootstrapConfig::default(), &ManualClock::new());

        let err = result.unwrap_err();
        assert_eq!(err.stage(), BootstrapStage::LoadModule);
        assert!(!log.borrow().contains(&Call::ConstructAsync));
        assert!(module.bound_to.is_none());
    }

    #[test]
    fn construction_failure_is_engine_init_error() {
        let log = Log::default();
        let mut module = FakeModule::new(&log);
        module.fail_construct = true;

        let (result, _) = run(&host(&log), &mut module, &BootstrapConfig::default(), &ManualClock::new());
        assert!(matches!(result, Err(BootstrapError::EngineInit(_))));
    }

    #[test]
    fn sync_mode_uses_only_the_blocking_constructor() {
        let log = Log::default();
        let mut module = FakeModule::new(&log);
        let config = BootstrapConfig { construction: ConstructionMode::Sync, ..Default::default() };

        let (result, _) = run(&host(&log), &mut module, &config, &ManualClock::new());

        assert!(result.is_ok());
        let calls = log.borrow();
        assert!(calls.contains(&Call::ConstructSync));
        assert!(!calls.contains(&Call::ConstructAsync));
    }

    #[test]
    fn custom_surface_and_context_are_honoured() {
        let log = Log::default();
        let host = FakeHost { surfaces: vec!["preview"], log: log.clone() };
        let mut module = FakeModule::new(&log);
        let config = BootstrapConfig {
            surface_id: "preview".into(),
            context_type: "webgl2".into(),
            ..Default::default()
        };

        let (result, _) = run(&host, &mut module, &config, &ManualClock::new());

        assert!(result.is_ok());
        assert_eq!(module.bound_to.as_deref(), Some("preview:webgl2"));
    }
}
