/// Bloch Web - WASM canvas frontend for the Bloch sphere visualiser
///
/// Draws onto an HTML `<canvas>` through `CanvasRenderingContext2d` and
/// drives the animation with `requestAnimationFrame`.
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use bloch_core::{
    Animator, BlochError, BlochResult, Color, DrawingSurface, Point2D, Stroke, VisualiserConfig,
};
use tracing::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Canvas id used by [`load_visualiser`]
pub const DEFAULT_CANVAS_ID: &str = "maincanvas";

/// `imageSmoothingQuality` value applied to every context
pub const IMAGE_SMOOTHING_QUALITY: &str = "high";

#[wasm_bindgen]
extern "C" {
    /// The slice of `CanvasRenderingContext2D` that web-sys does not bind
    #[wasm_bindgen(js_name = CanvasRenderingContext2D)]
    type SmoothingContext;

    #[wasm_bindgen(method, setter = imageSmoothingQuality)]
    fn set_image_smoothing_quality(this: &SmoothingContext, quality: &str);
}

/// Drawing surface backed by a canvas 2D context
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        context
            .unchecked_ref::<SmoothingContext>()
            .set_image_smoothing_quality(IMAGE_SMOOTHING_QUALITY);
        Self { context }
    }

    /// Look up `<canvas id=canvas_id>` and take its 2D context
    pub fn from_canvas_id(canvas_id: &str) -> BlochResult<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| BlochError::Surface("no document available".into()))?;

        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| BlochError::SurfaceNotFound(canvas_id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| BlochError::Surface(format!("element '{canvas_id}' is not a canvas")))?;

        let context = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or_else(|| BlochError::Surface("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| BlochError::Surface("unexpected context type".into()))?;

        Ok(Self::new(context))
    }

    fn trace(&self, path: &[Point2D]) {
        self.context.begin_path();
        if let Some((first, rest)) = path.split_first() {
            self.context.move_to(first.x, first.y);
            for p in rest {
                self.context.line_to(p.x, p.y);
            }
        }
    }

    fn apply_stroke(&self, stroke: &Stroke) {
        self.context.set_stroke_style_str(&stroke.color.to_css());
        self.context.set_line_width(stroke.width);
    }
}

fn js_error(value: JsValue) -> BlochError {
    BlochError::Surface(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

impl DrawingSurface for CanvasSurface {
    fn fill_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    ) -> BlochResult<()> {
        self.context.set_fill_style_str(&color.to_css());
        self.context.fill_rect(x, y, width, height);
        Ok(())
    }

    fn stroke_path(&mut self, path: &[Point2D], stroke: &Stroke) -> BlochResult<()> {
        self.apply_stroke(stroke);
        self.trace(path);
        self.context.stroke();
        Ok(())
    }

    fn fill_path(&mut self, path: &[Point2D], color: Color) -> BlochResult<()> {
        self.context.set_fill_style_str(&color.to_css());
        self.trace(path);
        self.context.fill();
        Ok(())
    }

    fn fill_circle(&mut self, centre: Point2D, radius: f64, color: Color) -> BlochResult<()> {
        self.context.set_fill_style_str(&color.to_css());
        self.context.begin_path();
        self.context
            .arc(centre.x, centre.y, radius, 0.0, TAU)
            .map_err(js_error)?;
        self.context.fill();
        Ok(())
    }

    fn stroke_circle(
        &mut self,
        centre: Point2D,
        radius: f64,
        stroke: &Stroke,
    ) -> BlochResult<()> {
        self.apply_stroke(stroke);
        self.context.begin_path();
        self.context
            .arc(centre.x, centre.y, radius, 0.0, TAU)
            .map_err(js_error)?;
        self.context.stroke();
        Ok(())
    }
}

fn request_animation_frame(callback: &Closure<dyn FnMut(f64)>) -> BlochResult<()> {
    web_sys::window()
        .ok_or_else(|| BlochError::Surface("no window available".into()))?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(js_error)?;
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

#[wasm_bindgen]
pub struct BlochVisualiser {
    canvas_id: String,
    config: VisualiserConfig,
    animator: Option<Rc<RefCell<Animator<CanvasSurface>>>>,
}

#[wasm_bindgen]
impl BlochVisualiser {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> BlochVisualiser {
        BlochVisualiser {
            canvas_id: canvas_id.to_string(),
            config: VisualiserConfig::default(),
            animator: None,
        }
    }

    /// Replace the default view with a TOML config
    #[wasm_bindgen(js_name = configure)]
    pub fn configure(&mut self, toml: &str) -> Result<(), JsValue> {
        self.config = VisualiserConfig::from_toml_str(toml).map_err(to_js)?;
        Ok(())
    }

    /// Acquire the canvas and enter the animation loop
    pub fn start(&mut self) -> Result<(), JsValue> {
        let surface = CanvasSurface::from_canvas_id(&self.canvas_id).map_err(to_js)?;
        let animator = Rc::new(RefCell::new(Animator::new(
            self.config.scene(),
            self.config.throttle(),
            surface,
        )));
        self.animator = Some(animator.clone());
        info!(canvas = %self.canvas_id, "visualiser started");

        // The closure holds a handle to itself so every frame can reschedule.
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let handle = callback.clone();
        *callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            if let Err(e) = animator.borrow_mut().tick(timestamp) {
                // not rescheduling ends the loop
                error!("animation stopped: {e}");
                return;
            }
            if let Some(cb) = handle.borrow().as_ref() {
                if let Err(e) = request_animation_frame(cb) {
                    error!("failed to schedule frame: {e}");
                }
            }
        }));

        if let Some(cb) = callback.borrow().as_ref() {
            request_animation_frame(cb).map_err(to_js)?;
        }
        Ok(())
    }

    /// Feed a timestamp by hand, e.g. when the host owns the frame loop
    #[wasm_bindgen(js_name = renderAt)]
    pub fn render_at(&mut self, timestamp: f64) -> Result<bool, JsValue> {
        if self.animator.is_none() {
            let surface = CanvasSurface::from_canvas_id(&self.canvas_id).map_err(to_js)?;
            self.animator = Some(Rc::new(RefCell::new(Animator::new(
                self.config.scene(),
                self.config.throttle(),
                surface,
            ))));
        }
        match &self.animator {
            Some(animator) => animator.borrow_mut().tick(timestamp).map_err(to_js),
            None => Ok(false),
        }
    }

    /// Accumulated animation time in milliseconds
    #[wasm_bindgen(getter)]
    pub fn time(&self) -> f64 {
        self.animator
            .as_ref()
            .map(|a| a.borrow().throttle().time())
            .unwrap_or(0.0)
    }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Start a visualiser on the page's `maincanvas` element
#[wasm_bindgen(js_name = loadVisualiser)]
pub fn load_visualiser() -> Result<BlochVisualiser, JsValue> {
    let mut visualiser = BlochVisualiser::new(DEFAULT_CANVAS_ID);
    visualiser.start()?;
    Ok(visualiser)
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothing_quality_is_high() {
        assert!(["low", "medium", "high"].contains(&IMAGE_SMOOTHING_QUALITY));
        assert_eq!(IMAGE_SMOOTHING_QUALITY, "high");
    }
}
