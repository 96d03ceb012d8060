//! Drawing-surface lookup and context acquisition.

use std::fmt;
use std::str::FromStr;

use crate::error::SurfaceUnavailable;

/// Identifier the host registers its main drawing surface under.
pub const DEFAULT_SURFACE_ID: &str = "mainCanvas";

/// Context type requested from the surface by default.
pub const DEFAULT_CONTEXT_TYPE: &str = "webgpu";

/// Kind of rendering context a surface can hand out.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ContextKind {
    /// Any primary wgpu backend (Vulkan, Metal, DX12, browser WebGPU).
    WebGpu,
    /// The GL backend only.
    WebGl2,
}

impl ContextKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContextKind::WebGpu => "webgpu",
            ContextKind::WebGl2 => "webgl2",
        }
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContextKind {
    type Err = SurfaceUnavailable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "webgpu" => Ok(ContextKind::WebGpu),
            "webgl2" => Ok(ContextKind::WebGl2),
            other => Err(SurfaceUnavailable::UnknownContextType {
                context_type: other.to_string(),
            }),
        }
    }
}

/// Host-side registry of drawing surfaces.
pub trait SurfaceHost {
    /// Reference to a registered surface element.
    type Surface;

    /// Rendering context obtained from a surface.
    type Context;

    /// Finds the surface registered under `id`.
    fn lookup(&self, id: &str) -> Option<Self::Surface>;

    /// Requests a context of `kind` from `surface`.
    ///
    /// `None` means the host cannot provide that kind for this surface.
    fn request_context(&self, surface: &Self::Surface, kind: ContextKind) -> Option<Self::Context>;
}

/// Resolves `id` and requests a `context_type` context from it.
pub fn acquire_surface<H: SurfaceHost + ?Sized>(
    host: &H,
    id: &str,
    context_type: &str,
) -> Result<H::Context, SurfaceUnavailable> {
    let kind: ContextKind = context_type.parse()?;

    let surface = host.lookup(id).ok_or_else(|| SurfaceUnavailable::MissingSurface {
        id: id.to_string(),
    })?;

    host.request_context(&surface, kind)
        .ok_or_else(|| SurfaceUnavailable::ContextUnsupported {
            id: id.to_string(),
            context_type: kind.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One surface, supporting only WebGPU.
    struct OneCanvas;

    impl SurfaceHost for OneCanvas {
        type Surface = &'static str;
        type Context = (&'static str, ContextKind);

        fn lookup(&self, id: &str) -> Option<Self::Surface> {
            (id == DEFAULT_SURFACE_ID).then_some(DEFAULT_SURFACE_ID)
        }

        fn request_context(&self, surface: &Self::Surface, kind: ContextKind) -> Option<Self::Context> {
            (kind == ContextKind::WebGpu).then_some((*surface, kind))
        }
    }

    #[test]
    fn valid_surface_and_context_are_acquired() {
        let ctx = acquire_surface(&OneCanvas, "mainCanvas", "webgpu").unwrap();
        assert_eq!(ctx, ("mainCanvas", ContextKind::WebGpu));
    }

    #[test]
    fn unknown_identifier_is_missing_surface() {
        let err = acquire_surface(&OneCanvas, "sideCanvas", "webgpu").unwrap_err();
        assert!(matches!(err, SurfaceUnavailable::MissingSurface { ref id } if id == "sideCanvas"));
    }

    #[test]
    fn unrecognised_context_type_is_rejected() {
        for ty in ["2d", "WebGPU", ""] {
            let err = acquire_surface(&OneCanvas, "mainCanvas", ty).unwrap_err();
            assert!(matches!(err, SurfaceUnavailable::UnknownContextType { .. }), "{ty}");
        }
    }

    #[test]
    fn context_refused_by_host_is_unsupported() {
        let err = acquire_surface(&OneCanvas, "mainCanvas", "webgl2").unwrap_err();
        assert!(matches!(
            err,
            SurfaceUnavailable::ContextUnsupported { ref context_type, .. } if context_type == "webgl2"
        ));
    }

    #[test]
    fn context_kind_round_trips_through_its_name() {
        for kind in [ContextKind::WebGpu, ContextKind::WebGl2] {
            assert_eq!(kind.as_str().parse::<ContextKind>().unwrap(), kind);
        }
    }
}
