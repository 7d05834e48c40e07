//! Browser glue: canvas setup, pointer/touch wiring, status overlays and the
//! confetti loop. All gameplay decisions live in [`crate::engine`]; this
//! module only feeds it samples and renders whatever comes back.

mod confetti;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, MouseEvent, TouchEvent, window,
};

use crate::engine::{Engine, Evaluation, Outcome};
use crate::geometry::Point;
use crate::scoring::color_for_score;
use crate::store::LocalStorageStore;
use confetti::{ConfettiBurst, Lcg};

const CANVAS_ID: &str = "pc-canvas";
const RESULT_ID: &str = "pc-result";
const HIGH_SCORE_ID: &str = "pc-high-score";

const OVERLAY_STYLE: &str = "position:fixed; left:50%; transform:translateX(-50%); \
    font-family:'Fira Code', monospace; padding:4px 12px; background:rgba(0,0,0,0.35); \
    border:1px solid #333; border-radius:6px; z-index:30;";

struct GameState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    engine: Engine<LocalStorageStore>,
    confetti: Option<ConfettiBurst>,
    confetti_loop_running: bool,
    rng: Lcg,
}

thread_local! {
    static GAME_STATE: RefCell<Option<GameState>> = RefCell::new(None);
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub fn start() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Create / reuse the full-window drawing canvas
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(CANVAS_ID);
        c.set_attribute(
            "style",
            "position:fixed; left:0; top:0; background:#111; cursor:crosshair; touch-action:none; z-index:10;",
        )
        .ok();
        doc.body().unwrap().append_child(&c)?;
        c
    };
    fit_canvas(&canvas);
    let ctx: CanvasRenderingContext2d = canvas.get_context("2d")?.unwrap().dyn_into()?;
    apply_stroke_style(&ctx);

    let engine = Engine::new(LocalStorageStore);
    let high_score = engine.high_score();

    // Status overlay (top center)
    if doc.get_element_by_id(RESULT_ID).is_none() {
        if let Some(body) = doc.body() {
            let div = doc.create_element("div")?;
            div.set_id(RESULT_ID);
            div.set_text_content(Some("Keep drawing..."));
            div.set_attribute(
                "style",
                &format!("{OVERLAY_STYLE} top:18px; font-size:18px; font-weight:bold; color:gray;"),
            )
            .ok();
            body.append_child(&div)?;
        }
    }
    // High-score overlay, below the status line
    if doc.get_element_by_id(HIGH_SCORE_ID).is_none() {
        if let Some(body) = doc.body() {
            let div = doc.create_element("div")?;
            div.set_id(HIGH_SCORE_ID);
            div.set_text_content(Some(&format!("🏆 High Score: {high_score:.2} / 100")));
            div.set_attribute(
                "style",
                &format!("{OVERLAY_STYLE} top:58px; font-size:14px; color:#ffd166;"),
            )
            .ok();
            body.append_child(&div)?;
        }
    }

    let seed = win.performance().map(|p| p.now()).unwrap_or(0.0);
    GAME_STATE.with(|cell| {
        cell.replace(Some(GameState {
            canvas: canvas.clone(),
            ctx,
            engine,
            confetti: None,
            confetti_loop_running: false,
            rng: Lcg::new(seed as u32),
        }))
    });

    // Mouse wiring: offset coordinates are already canvas-local
    {
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            evt.prevent_default();
            handle_start(Point::new(f64::from(evt.offset_x()), f64::from(evt.offset_y())));
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            evt.prevent_default();
            handle_move(Point::new(f64::from(evt.offset_x()), f64::from(evt.offset_y())));
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            evt.prevent_default();
            handle_end();
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Touch wiring: client coordinates mapped through the canvas rect
    {
        let canvas_touch = canvas.clone();
        let closure = Closure::wrap(Box::new(move |evt: TouchEvent| {
            evt.prevent_default();
            if let Some(p) = touch_point(&evt, &canvas_touch) {
                handle_start(p);
            }
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let canvas_touch = canvas.clone();
        let closure = Closure::wrap(Box::new(move |evt: TouchEvent| {
            evt.prevent_default();
            if let Some(p) = touch_point(&evt, &canvas_touch) {
                handle_move(p);
            }
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: TouchEvent| {
            evt.prevent_default();
            handle_end();
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Window resize: refit the canvas and repaint the current path. Resizing
    // resets the 2d context state, so the stroke style must be reapplied.
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            GAME_STATE.with(|cell| {
                if let Some(st) = cell.borrow_mut().as_mut() {
                    fit_canvas(&st.canvas);
                    apply_stroke_style(&st.ctx);
                    redraw(st);
                }
            });
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

fn fit_canvas(canvas: &HtmlCanvasElement) {
    if let Some(win) = window() {
        let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);
    }
}

fn apply_stroke_style(ctx: &CanvasRenderingContext2d) {
    ctx.set_line_width(5.0);
    ctx.set_line_cap("round");
}

fn touch_point(evt: &TouchEvent, canvas: &HtmlCanvasElement) -> Option<Point> {
    let touch = evt.touches().get(0)?;
    let rect = canvas.get_bounding_client_rect();
    Some(Point::new(
        f64::from(touch.client_x()) - rect.left(),
        f64::from(touch.client_y()) - rect.top(),
    ))
}

// --- Event handlers ----------------------------------------------------------

fn handle_start(p: Point) {
    GAME_STATE.with(|cell| {
        if let Some(st) = cell.borrow_mut().as_mut() {
            let discarded_previous = st.engine.on_gesture_start(p);
            if discarded_previous {
                st.ctx.clear_rect(
                    0.0,
                    0.0,
                    st.canvas.width() as f64,
                    st.canvas.height() as f64,
                );
            }
            show_status("Keep drawing...", "gray");
        }
    });
}

fn handle_move(p: Point) {
    let celebrate = GAME_STATE.with(|cell| {
        if let Some(st) = cell.borrow_mut().as_mut() {
            if let Some(eval) = st.engine.on_sample(p) {
                redraw(st);
                render_evaluation(&eval);
                return eval.celebrate;
            }
        }
        false
    });
    // Outside the state borrow: the confetti loop re-enters GAME_STATE.
    if celebrate {
        launch_celebration();
    }
}

fn handle_end() {
    GAME_STATE.with(|cell| {
        if let Some(st) = cell.borrow_mut().as_mut() {
            if let Some(eval) = st.engine.on_gesture_end() {
                match eval.outcome {
                    Outcome::Final { score } => show_status(
                        &format!("Final Accuracy: {score:.2} / 100 ⏸️ Finger lifted."),
                        &color_for_score(score).to_css(),
                    ),
                    Outcome::InsufficientData => {
                        show_status("Too short to calculate accuracy.", "gray");
                    }
                    _ => {}
                }
            }
        }
    });
}

fn render_evaluation(eval: &Evaluation) {
    match eval.outcome {
        Outcome::InsufficientData => show_status("Keep drawing...", "gray"),
        Outcome::Live { score } => show_status(
            &format!("Live Accuracy: {score:.2} / 100"),
            &color_for_score(score).to_css(),
        ),
        Outcome::WrongDirection => show_status(
            "❌ Wrong Way! Please draw in a consistent direction.",
            "red",
        ),
        Outcome::TooSmall { score } => show_status(
            &format!("Live Accuracy: {score:.2} / 100 ❌ Too small! Try a bigger circle."),
            &color_for_score(score).to_css(),
        ),
        Outcome::Completed { score } => show_status(
            &format!("Live Accuracy: {score:.2} / 100 🎯 Circle completed!"),
            &color_for_score(score).to_css(),
        ),
        Outcome::Final { score } => show_status(
            &format!("Final Accuracy: {score:.2} / 100 ⏸️ Finger lifted."),
            &color_for_score(score).to_css(),
        ),
    }
    if let Some(best) = eval.new_high_score {
        update_high_score_display(best);
    }
}

// --- Rendering ---------------------------------------------------------------

/// Clear and restroke the whole path, each segment in the capture color of
/// its destination point.
fn redraw(st: &GameState) {
    st.ctx.clear_rect(
        0.0,
        0.0,
        st.canvas.width() as f64,
        st.canvas.height() as f64,
    );
    let path = st.engine.path();
    for pair in path.windows(2) {
        if let Some(color) = &pair[1].color {
            st.ctx.set_stroke_style_str(&color.to_css());
        }
        line(
            &st.ctx,
            pair[0].pos.x,
            pair[0].pos.y,
            pair[1].pos.x,
            pair[1].pos.y,
        );
    }
}

fn line(ctx: &CanvasRenderingContext2d, x1: f64, y1: f64, x2: f64, y2: f64) {
    ctx.begin_path();
    ctx.move_to(x1, y1);
    ctx.line_to(x2, y2);
    ctx.stroke();
}

fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

fn show_status(text: &str, color: &str) {
    if let Some(doc) = document() {
        if let Some(el) = doc.get_element_by_id(RESULT_ID) {
            el.set_text_content(Some(text));
            el.set_attribute(
                "style",
                &format!("{OVERLAY_STYLE} top:18px; font-size:18px; font-weight:bold; color:{color};"),
            )
            .ok();
        }
    }
}

fn update_high_score_display(value: f64) {
    if let Some(doc) = document() {
        if let Some(el) = doc.get_element_by_id(HIGH_SCORE_ID) {
            el.set_text_content(Some(&format!("🏆 High Score: {value:.2} / 100")));
        }
    }
}

// --- Confetti loop -----------------------------------------------------------

fn launch_celebration() {
    let now = window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    let start_loop = GAME_STATE.with(|cell| {
        if let Some(st) = cell.borrow_mut().as_mut() {
            st.confetti = Some(ConfettiBurst::new(now));
            if st.confetti_loop_running {
                false
            } else {
                st.confetti_loop_running = true;
                true
            }
        } else {
            false
        }
    });
    if start_loop {
        start_confetti_loop();
    }
}

/// Self-rescheduling animation frame loop; stops once the burst drains.
fn start_confetti_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        let keep_going = GAME_STATE.with(|cell| {
            if let Some(st) = cell.borrow_mut().as_mut() {
                confetti_tick(st, ts)
            } else {
                false
            }
        });
        if keep_going {
            if let Some(w) = window() {
                let _ = w
                    .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

fn confetti_tick(st: &mut GameState, now: f64) -> bool {
    let width = st.canvas.width() as f64;
    let height = st.canvas.height() as f64;
    let active = match st.confetti.as_mut() {
        Some(burst) => burst.update(now, width, height, &mut st.rng),
        None => false,
    };
    redraw(st);
    if active {
        if let Some(burst) = &st.confetti {
            burst.draw(&st.ctx);
        }
        true
    } else {
        st.confetti = None;
        st.confetti_loop_running = false;
        false
    }
}
