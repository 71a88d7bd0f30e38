use std::cell::{Cell, RefCell};
use std::rc::Rc;

use exoviz::{CursorStyle, InputEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlCanvasElement, MouseEvent, Window};

type Sink = Rc<dyn Fn(InputEvent)>;

struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    fn attach(target: EventTarget, kind: &'static str, f: impl FnMut(web_sys::Event) + 'static) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(web_sys::Event)>);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self { target, kind, closure })
    }

    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Canvas and window listeners feeding the input queue.
pub struct DomBindings {
    canvas: HtmlCanvasElement,
    listeners: Vec<Listener>,
}

impl DomBindings {
    pub fn attach(window: &Window, canvas: HtmlCanvasElement, sink: Sink) -> Result<Self, JsValue> {
        let mut listeners = Vec::with_capacity(4);

        let on_resize = {
            let sink = Rc::clone(&sink);
            let canvas = canvas.clone();
            move |_: web_sys::Event| {
                let (width, height) = css_size(&canvas);
                sink(InputEvent::Resize { width, height });
            }
        };
        listeners.push(Listener::attach(window.clone().into(), "resize", on_resize)?);

        let on_move = {
            let sink = Rc::clone(&sink);
            let canvas = canvas.clone();
            move |event: web_sys::Event| {
                if let Some((x, y)) = to_ndc(&canvas, &event) {
                    sink(InputEvent::PointerMove { x, y });
                }
            }
        };
        listeners.push(Listener::attach(canvas.clone().into(), "mousemove", on_move)?);

        let on_leave = {
            let sink = Rc::clone(&sink);
            move |_: web_sys::Event| sink(InputEvent::PointerLeave)
        };
        listeners.push(Listener::attach(canvas.clone().into(), "mouseleave", on_leave)?);

        let on_click = {
            let canvas = canvas.clone();
            move |event: web_sys::Event| {
                if let Some((x, y)) = to_ndc(&canvas, &event) {
                    sink(InputEvent::Click { x, y });
                }
            }
        };
        listeners.push(Listener::attach(canvas.clone().into(), "click", on_click)?);

        Ok(Self { canvas, listeners })
    }

    pub fn set_cursor(&self, cursor: CursorStyle) {
        let _ = self.canvas.style().set_property("cursor", cursor.as_css());
    }

    pub fn surface_size(&self) -> (f32, f32) {
        css_size(&self.canvas)
    }

    pub fn detach(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        self.set_cursor(CursorStyle::Default);
    }
}

impl Drop for DomBindings {
    fn drop(&mut self) {
        self.detach();
    }
}

fn css_size(canvas: &HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    (rect.width() as f32, rect.height() as f32)
}

/// Client coordinates to normalized device coordinates, y up.
fn to_ndc(canvas: &HtmlCanvasElement, event: &web_sys::Event) -> Option<(f32, f32)> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    let rect = canvas.get_bounding_client_rect();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    let x = (mouse.client_x() as f64 - rect.left()) / rect.width() * 2.0 - 1.0;
    let y = -((mouse.client_y() as f64 - rect.top()) / rect.height() * 2.0 - 1.0);
    Some((x as f32, y as f32))
}

/// Tracks whether a frame callback is on the stack, so work that would
/// drop the running `FrameLoop` closure can wait until it has returned.
#[derive(Debug, Default)]
pub struct FrameGuard {
    active: Cell<bool>,
    deferred: Cell<bool>,
}

impl FrameGuard {
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        self.active.set(true);
        let result = f();
        self.active.set(false);
        result
    }

    pub fn in_frame(&self) -> bool {
        self.active.get()
    }

    /// Inside a frame: remember the request and return `true`.
    /// Outside: return `false`, the caller may act now.
    pub fn defer(&self) -> bool {
        if self.active.get() {
            self.deferred.set(true);
        }
        self.active.get()
    }

    /// True once after a deferred request.
    pub fn take_deferred(&self) -> bool {
        self.deferred.replace(false)
    }
}

type FrameClosure = Closure<dyn FnMut(f64)>;

/// `requestAnimationFrame` loop. The callback gets the frame delta in
/// seconds and returns `false` to stop.
pub struct FrameLoop {
    window: Window,
    handle: Rc<RefCell<Option<i32>>>,
    closure: Rc<RefCell<Option<FrameClosure>>>,
}

impl FrameLoop {
    pub fn start(window: Window, mut frame: impl FnMut(f32) -> bool + 'static) -> Result<Self, JsValue> {
        let handle = Rc::new(RefCell::new(None));
        let closure: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));

        let last = Rc::new(RefCell::new(None::<f64>));
        let next = {
            let window = window.clone();
            let handle = Rc::clone(&handle);
            let closure = Rc::clone(&closure);
            move |now: f64| {
                let dt = last.borrow_mut().replace(now).map_or(0.0, |prev| ((now - prev) / 1000.0) as f32);
                if !frame(dt) {
                    handle.borrow_mut().take();
                    return;
                }
                if let Some(cb) = closure.borrow().as_ref() {
                    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        Ok(id) => *handle.borrow_mut() = Some(id),
                        Err(err) => log::error!("requestAnimationFrame failed: {err:?}"),
                    }
                }
            }
        };
        *closure.borrow_mut() = Some(Closure::wrap(Box::new(next) as Box<dyn FnMut(f64)>));

        let id = match closure.borrow().as_ref() {
            Some(cb) => window.request_animation_frame(cb.as_ref().unchecked_ref())?,
            None => return Err(JsValue::from_str("frame closure missing")),
        };
        *handle.borrow_mut() = Some(id);

        Ok(Self { window, handle, closure })
    }

    pub fn stop(&mut self) {
        if let Some(id) = self.handle.borrow_mut().take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // Breaks the closure's reference to itself.
        self.closure.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_inside_frame_is_deferred() {
        let guard = FrameGuard::default();
        let deferred = guard.run(|| guard.in_frame() && guard.defer());
        assert!(deferred);
        assert!(!guard.in_frame());
        assert!(guard.take_deferred());
        assert!(!guard.take_deferred());
    }

    #[test]
    fn request_outside_frame_runs_now() {
        let guard = FrameGuard::default();
        guard.run(|| ());
        assert!(!guard.defer());
        assert!(!guard.take_deferred());
    }
}
