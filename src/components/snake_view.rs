use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlImageElement, MouseEvent, TouchEvent, WheelEvent};
use yew::prelude::*;

use crate::config::ViewConfig;
use crate::model::SnakeState;
use crate::render::{
    BackingSize, CanvasSurface, Frame, SpriteSheet, apply_backing_size, load_sprites, render_scene,
};
use crate::state::{Camera, GestureController, Point};
use crate::util::clog;

use super::view_controls::ViewControls;

#[derive(Properties, PartialEq, Clone)]
pub struct SnakeViewProps {
    pub world: Option<Rc<SnakeState>>,
    pub config: Rc<ViewConfig>,
}

/// Canvas-local CSS pixel position of a client coordinate.
fn local_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Point {
    let rect = canvas.get_bounding_client_rect();
    Point::new(client_x as f64 - rect.left(), client_y as f64 - rect.top())
}

fn touch_points(canvas: &HtmlCanvasElement, e: &TouchEvent) -> Vec<Point> {
    let list = e.touches();
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| local_point(canvas, t.client_x(), t.client_y()))
        .collect()
}

#[function_component(SnakeView)]
pub fn snake_view(props: &SnakeViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let camera = use_mut_ref(|| Camera::new(props.config.initial_cell_size));
    let gestures = use_mut_ref(|| GestureController::new(props.config.zoom_limits()));
    let world_ref = use_mut_ref(|| props.world.clone());
    let sprites = use_mut_ref(SpriteSheet::<HtmlImageElement>::default);
    let size = use_mut_ref(BackingSize::default);
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let located = use_mut_ref(|| false);
    // one data-quality warning per snapshot
    let degraded_warned = use_mut_ref(|| false);

    // Mount: size the canvas, build the draw closure, attach listeners, load sprites.
    {
        let canvas_ref = canvas_ref.clone();
        let camera = camera.clone();
        let gestures = gestures.clone();
        let world_ref = world_ref.clone();
        let sprites = sprites.clone();
        let size = size.clone();
        let draw_ref = draw_ref.clone();
        let degraded_warned = degraded_warned.clone();
        let config = props.config.clone();
        use_effect_with((), move |_| {
            let mut listeners: Vec<EventListener> = Vec::new();
            let window = web_sys::window();
            let canvas = canvas_ref.cast::<HtmlCanvasElement>();
            let surface = canvas.as_ref().map(CanvasSurface::from_canvas);
            if let (Some(window), Some(canvas), Some(Ok(surface))) = (window, canvas, surface) {
                let surface = Rc::new(RefCell::new(surface));

                let draw_closure: Rc<dyn Fn()> = {
                    let canvas = canvas.clone();
                    let surface = surface.clone();
                    let camera = camera.clone();
                    let world_ref = world_ref.clone();
                    let sprites = sprites.clone();
                    let size = size.clone();
                    let degraded_warned = degraded_warned.clone();
                    let config = config.clone();
                    Rc::new(move || {
                        if !canvas.is_connected() {
                            return;
                        }
                        let sz = *size.borrow();
                        let cam = *camera.borrow();
                        let world = world_ref.borrow();
                        let sheet = sprites.borrow();
                        let stats = render_scene(
                            &mut *surface.borrow_mut(),
                            &Frame {
                                camera: &cam,
                                width: sz.css_width,
                                height: sz.css_height,
                                world: world.as_deref(),
                                sprites: &sheet,
                                label_reference: config.label_reference_size,
                                apple_scale: config.apple_scale,
                            },
                        );
                        let mut warned = degraded_warned.borrow_mut();
                        if stats.degraded > 0 && !*warned {
                            *warned = true;
                            gloo::console::warn!(format!(
                                "snake has {} segment(s) without a unit step to a neighbour; drawing straight fallback",
                                stats.degraded
                            ));
                        }
                    })
                };
                *draw_ref.borrow_mut() = Some(draw_closure.clone());

                let apply_size = {
                    let canvas = canvas.clone();
                    let surface = surface.clone();
                    let size = size.clone();
                    move || {
                        let measured = BackingSize::measure(&canvas);
                        if let Err(err) = apply_backing_size(&canvas, surface.borrow().context(), measured) {
                            gloo::console::warn!(format!("resize: {err}"));
                        }
                        *size.borrow_mut() = measured;
                        clog(&format!(
                            "canvas {}x{} @{}",
                            measured.pixel_width, measured.pixel_height, measured.dpr
                        ));
                    }
                };
                apply_size();
                draw_closure();

                // Resize
                {
                    let draw = draw_closure.clone();
                    listeners.push(EventListener::new(&window, "resize", move |_| {
                        apply_size();
                        draw();
                    }));
                }

                // Wheel: one discrete zoom step per event, default scroll suppressed
                {
                    let canvas_w = canvas.clone();
                    let camera = camera.clone();
                    let gestures = gestures.clone();
                    let draw = draw_closure.clone();
                    let factor = config.wheel_zoom_factor;
                    listeners.push(EventListener::new_with_options(
                        &canvas,
                        "wheel",
                        EventListenerOptions::enable_prevent_default(),
                        move |event| {
                            let Some(e) = event.dyn_ref::<WheelEvent>() else {
                                return;
                            };
                            e.prevent_default();
                            let at = local_point(&canvas_w, e.client_x(), e.client_y());
                            let changed =
                                gestures
                                    .borrow()
                                    .wheel(at, e.delta_y(), factor, &mut camera.borrow_mut());
                            if changed {
                                draw();
                            }
                        },
                    ));
                }

                // Mouse drag
                {
                    let gestures = gestures.clone();
                    listeners.push(EventListener::new(&canvas, "mousedown", move |event| {
                        if let Some(e) = event.dyn_ref::<MouseEvent>() {
                            gestures
                                .borrow_mut()
                                .mouse_down(e.button(), Point::new(e.client_x() as f64, e.client_y() as f64));
                        }
                    }));
                }
                {
                    let camera = camera.clone();
                    let gestures = gestures.clone();
                    let draw = draw_closure.clone();
                    listeners.push(EventListener::new(&canvas, "mousemove", move |event| {
                        let Some(e) = event.dyn_ref::<MouseEvent>() else {
                            return;
                        };
                        let at = Point::new(e.client_x() as f64, e.client_y() as f64);
                        let changed = gestures.borrow_mut().mouse_move(at, &mut camera.borrow_mut());
                        if changed {
                            draw();
                        }
                    }));
                }
                {
                    let gestures = gestures.clone();
                    listeners.push(EventListener::new(&window, "mouseup", move |_| {
                        gestures.borrow_mut().mouse_up();
                    }));
                }
                {
                    let gestures = gestures.clone();
                    listeners.push(EventListener::new(&canvas, "mouseleave", move |_| {
                        gestures.borrow_mut().mouse_up();
                    }));
                }

                // Touch: single finger drags, two fingers pinch
                {
                    let canvas_t = canvas.clone();
                    let camera = camera.clone();
                    let gestures = gestures.clone();
                    listeners.push(EventListener::new_with_options(
                        &canvas,
                        "touchstart",
                        EventListenerOptions::enable_prevent_default(),
                        move |event| {
                            let Some(e) = event.dyn_ref::<TouchEvent>() else {
                                return;
                            };
                            e.prevent_default();
                            let pts = touch_points(&canvas_t, e);
                            gestures.borrow_mut().touch_start(&pts, &camera.borrow());
                        },
                    ));
                }
                {
                    let canvas_t = canvas.clone();
                    let camera = camera.clone();
                    let gestures = gestures.clone();
                    let draw = draw_closure.clone();
                    listeners.push(EventListener::new_with_options(
                        &canvas,
                        "touchmove",
                        EventListenerOptions::enable_prevent_default(),
                        move |event| {
                            let Some(e) = event.dyn_ref::<TouchEvent>() else {
                                return;
                            };
                            e.prevent_default();
                            let pts = touch_points(&canvas_t, e);
                            let changed = gestures.borrow_mut().touch_move(&pts, &mut camera.borrow_mut());
                            if changed {
                                draw();
                            }
                        },
                    ));
                }
                for name in ["touchend", "touchcancel"] {
                    let canvas_t = canvas.clone();
                    let camera = camera.clone();
                    let gestures = gestures.clone();
                    listeners.push(EventListener::new(&canvas, name, move |event| {
                        if let Some(e) = event.dyn_ref::<TouchEvent>() {
                            let pts = touch_points(&canvas_t, e);
                            gestures.borrow_mut().touch_end(&pts, &camera.borrow());
                        }
                    }));
                }

                // Sprites: skipped by the renderer until the whole batch is in
                {
                    let sprites = sprites.clone();
                    let draw = draw_closure.clone();
                    load_sprites(
                        config.assets.clone(),
                        Rc::new(move |result| match result {
                            Ok(sheet) => {
                                *sprites.borrow_mut() = sheet;
                                clog("sprites loaded");
                                draw();
                            }
                            Err(err) => gloo::console::error!(err.to_string()),
                        }),
                    );
                }
            } else {
                gloo::console::error!("snake view: canvas or 2d context unavailable");
            }

            let draw_ref = draw_ref.clone();
            move || {
                draw_ref.borrow_mut().take();
                drop(listeners);
            }
        });
    }

    // Snapshot: swap in the new world, centre on the first one, redraw
    {
        let camera = camera.clone();
        let world_ref = world_ref.clone();
        let size = size.clone();
        let draw_ref = draw_ref.clone();
        let located = located.clone();
        let degraded_warned = degraded_warned.clone();
        let world = props.world.clone();
        use_effect_with(world, move |world| {
            *world_ref.borrow_mut() = world.clone();
            *degraded_warned.borrow_mut() = false;
            if let Some(state) = world {
                let mut done = located.borrow_mut();
                if !*done {
                    let sz = *size.borrow();
                    *done = camera.borrow_mut().locate(&state.snake, sz.css_width, sz.css_height);
                }
            }
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
            || ()
        });
    }

    let redraw = {
        let draw_ref = draw_ref.clone();
        move || {
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
        }
    };
    let zoom_step = |zoom_in: bool| {
        let camera = camera.clone();
        let size = size.clone();
        let redraw = redraw.clone();
        let limits = props.config.zoom_limits();
        let factor = props.config.wheel_zoom_factor;
        Callback::from(move |_| {
            let sz = *size.borrow();
            let centre = Point::new(sz.css_width * 0.5, sz.css_height * 0.5);
            let ratio = if zoom_in { factor } else { 1.0 / factor };
            if camera.borrow_mut().zoom_by_ratio(centre, ratio, limits.min, limits.max) {
                redraw();
            }
        })
    };
    let on_locate = {
        let camera = camera.clone();
        let size = size.clone();
        let world_ref = world_ref.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| {
            let Some(state) = world_ref.borrow().clone() else {
                return;
            };
            let sz = *size.borrow();
            if camera.borrow_mut().locate(&state.snake, sz.css_width, sz.css_height) {
                redraw();
            }
        })
    };
    let can_locate = props.world.as_ref().is_some_and(|w| !w.snake.is_empty());

    html! {
        <>
            <canvas
                ref={canvas_ref}
                style="touch-action:none; display:block; width:100%; height:100%; position:absolute; top:0; left:0; z-index:1;"
            ></canvas>
            <ViewControls
                on_zoom_in={zoom_step(true)}
                on_zoom_out={zoom_step(false)}
                on_locate={on_locate}
                can_locate={can_locate}
            />
        </>
    }
}
