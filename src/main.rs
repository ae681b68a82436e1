//! TapCard Plus waitlist site entry point
//!
//! Handles platform-specific initialization and runs the page loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, HtmlInputElement,
        MouseEvent,
    };

    use tapcard_waitlist::anim::{RippleField, TiltState};
    use tapcard_waitlist::consts::*;
    use tapcard_waitlist::form::{FormModel, SubmitError, SubmitStatus};
    use tapcard_waitlist::net;
    use tapcard_waitlist::page::Route;

    /// App instance owning all page state
    struct App {
        form: FormModel,
        tilt: TiltState,
        /// Present only while the confirmation page is showing
        ripples: Option<RippleField>,
        route: Route,
        last_time: f64,
        /// False when the visitor prefers reduced motion
        animations_enabled: bool,
    }

    impl App {
        fn new(animations_enabled: bool) -> Self {
            Self {
                form: FormModel::default(),
                tilt: TiltState::new(),
                ripples: None,
                route: Route::Home,
                last_time: 0.0,
                animations_enabled,
            }
        }

        /// Advance animators by one frame
        fn update(&mut self, dt: f32) {
            if !self.animations_enabled {
                return;
            }
            if self.route == Route::Home {
                self.tilt.step(dt);
            }
            if let Some(field) = &mut self.ripples {
                field.advance(dt);
            }
        }

        /// Apply animator output to the DOM
        fn render(&self) {
            if !self.animations_enabled {
                return;
            }
            if self.route == Route::Home {
                self.apply_card_transform();
            }
            if self.ripples.is_some() {
                self.draw_ripples();
            }
        }

        fn apply_card_transform(&self) {
            // Skip the style write once the card is at rest
            if self.tilt.settled() {
                return;
            }
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();
            if let Some(card) = document
                .get_element_by_id("hero-card")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let _ = card
                    .style()
                    .set_property("transform", &self.tilt.css_transform());
            }
        }

        fn draw_ripples(&self) {
            let Some(field) = &self.ripples else { return };
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();
            let Some((ctx, w, h)) = ripple_context(&document) else {
                return;
            };

            ctx.clear_rect(0.0, 0.0, w, h);
            ctx.set_line_width(RIPPLE_LINE_WIDTH);
            let (r, g, b) = RIPPLE_RGB;
            for ripple in field.ripples() {
                ctx.begin_path();
                let _ = ctx.arc(
                    ripple.pos.x as f64,
                    ripple.pos.y as f64,
                    ripple.radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                );
                ctx.set_stroke_style_str(&format!("rgba({r}, {g}, {b}, {:.3})", ripple.alpha));
                ctx.stroke();
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("TapCard Plus waitlist site starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let reduced_motion = window
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .map(|query| query.matches())
            .unwrap_or(false);
        if reduced_motion {
            log::info!("Reduced motion requested, decorative animation disabled");
        }

        let app = Rc::new(RefCell::new(App::new(!reduced_motion)));

        // Land on whatever route the hash points at
        let hash = window.location().hash().unwrap_or_default();
        apply_route(&app, &document, Route::from_hash(&hash));

        setup_waitlist_form(&document, app.clone());
        setup_tilt_handlers(&document, app.clone());
        setup_route_listener(app.clone());
        setup_resize_handler(app.clone());

        // Start page loop
        request_animation_frame(app);

        log::info!("TapCard Plus waitlist site running!");
    }

    /// Show the container for `route`, hide the other, and manage the ripple
    /// field's lifetime (created on entering the confirmation page, dropped
    /// on leaving it).
    fn apply_route(app: &Rc<RefCell<App>>, document: &Document, route: Route) {
        for r in [Route::Home, Route::ThankYou] {
            if let Some(el) = document.get_element_by_id(r.container_id()) {
                let _ = el.set_attribute("class", if r == route { "page" } else { "page hidden" });
            }
        }

        let mut a = app.borrow_mut();
        a.route = route;
        match route {
            Route::ThankYou => {
                if a.animations_enabled && a.ripples.is_none() {
                    let bounds = resize_ripple_canvas(document);
                    let seed = js_sys::Date::now() as u64;
                    a.ripples = Some(RippleField::new(seed, bounds));
                    log::info!("Confirmation page entered (ripple seed: {seed})");
                }
            }
            Route::Home => {
                if a.ripples.take().is_some() {
                    if let Some((ctx, w, h)) = ripple_context(document) {
                        ctx.clear_rect(0.0, 0.0, w, h);
                    }
                }
            }
        }
    }

    /// Size the ripple canvas to the viewport, returning the new bounds
    fn resize_ripple_canvas(document: &Document) -> Vec2 {
        let window = web_sys::window().unwrap();
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        if let Some(canvas) = ripple_canvas(document) {
            canvas.set_width(w as u32);
            canvas.set_height(h as u32);
        }
        Vec2::new(w as f32, h as f32)
    }

    fn ripple_canvas(document: &Document) -> Option<HtmlCanvasElement> {
        document
            .get_element_by_id("ripple-canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
    }

    fn ripple_context(document: &Document) -> Option<(CanvasRenderingContext2d, f64, f64)> {
        let canvas = ripple_canvas(document)?;
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some((ctx, canvas.width() as f64, canvas.height() as f64))
    }

    fn input_value(document: &Document, id: &str) -> String {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    }

    /// Update the submit button label and error message for `status`
    fn update_form_dom(document: &Document, status: SubmitStatus) {
        if let Some(btn) = document.get_element_by_id("waitlist-submit") {
            btn.set_text_content(Some(status.button_label()));
        }
        if let Some(msg) = document.get_element_by_id("form-error") {
            let _ = msg.set_attribute(
                "class",
                if status.shows_error() {
                    "form-error"
                } else {
                    "form-error hidden"
                },
            );
        }
    }

    fn setup_waitlist_form(document: &Document, app: Rc<RefCell<App>>) {
        let Some(form) = document.get_element_by_id("waitlist-form") else {
            log::error!("waitlist form missing from page");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            event.prevent_default();
            let document = web_sys::window().unwrap().document().unwrap();

            let email = input_value(&document, "email");
            let name = input_value(&document, "name");

            let entry = app.borrow_mut().form.begin_submit(email, name);
            let Some(entry) = entry else {
                log::warn!("Submission already in flight, ignoring");
                return;
            };
            update_form_dom(&document, SubmitStatus::Submitting);
            log::info!("Submitting waitlist entry");

            let app = app.clone();
            spawn_local(async move {
                let result = match entry.to_json() {
                    Ok(body) => net::post_json(WAITLIST_ENDPOINT, &body).await,
                    Err(err) => Err(SubmitError::Transport(err.to_string())),
                };

                let status = {
                    let mut a = app.borrow_mut();
                    a.form.complete(result);
                    a.form.status()
                };

                let document = web_sys::window().unwrap().document().unwrap();
                update_form_dom(&document, status);

                if status == SubmitStatus::Success {
                    log::info!("Waitlist entry accepted");
                    schedule_redirect();
                }
            });
        });
        let _ = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// After the fixed delay, move to the confirmation route. The hashchange
    /// listener does the actual page swap.
    fn schedule_redirect() {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move || {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_hash(Route::ThankYou.hash());
            }
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            REDIRECT_DELAY_MS,
        );
        closure.forget();
    }

    fn setup_tilt_handlers(document: &Document, app: Rc<RefCell<App>>) {
        let Some(card) = document.get_element_by_id("hero-card") else {
            log::error!("hero card missing from page");
            return;
        };

        // Pointer over the card drives the rotation targets
        {
            let app = app.clone();
            let card_clone = card.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = card_clone.get_bounding_client_rect();
                let local = Vec2::new(
                    event.client_x() as f32 - rect.left() as f32,
                    event.client_y() as f32 - rect.top() as f32,
                );
                let size = Vec2::new(rect.width() as f32, rect.height() as f32);
                app.borrow_mut().tilt.pointer_moved(local, size);
            });
            let _ =
                card.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer exit: both rotations return to rest
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().tilt.pointer_left();
            });
            let _ = card
                .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Scroll drives the vertical drift
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let scroll_y = web_sys::window()
                    .and_then(|w| w.scroll_y().ok())
                    .unwrap_or(0.0);
                app.borrow_mut().tilt.scrolled(scroll_y as f32);
            });
            let _ =
                window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_route_listener(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();
            let hash = window.location().hash().unwrap_or_default();
            let route = Route::from_hash(&hash);
            log::info!("Route changed: {route:?}");
            apply_route(&app, &document, route);
        });
        let _ =
            window.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Keep the ripple canvas matched to the viewport
    fn setup_resize_handler(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut a = app.borrow_mut();
            if a.route != Route::ThankYou {
                return;
            }
            let document = web_sys::window().unwrap().document().unwrap();
            let bounds = resize_ripple_canvas(&document);
            if let Some(field) = &mut a.ripples {
                field.set_bounds(bounds);
            }
        });
        let _ =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            page_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn page_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            // Calculate delta time, clamped so a stalled tab doesn't jump
            let dt = if a.last_time > 0.0 {
                (((time - a.last_time) / 1000.0) as f32).min(MAX_FRAME_DT)
            } else {
                1.0 / 60.0
            };
            a.last_time = time;

            a.update(dt);
            a.render();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("TapCard Plus waitlist site (native) starting...");
    log::info!("This is a browser app - run with `trunk serve` for the web version");

    println!("\nRunning animation smoke check...");
    smoke_check();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_check() {
    use glam::Vec2;
    use tapcard_waitlist::anim::{RippleField, TiltState};

    let mut tilt = TiltState::new();
    tilt.pointer_moved(Vec2::new(420.0, 0.0), Vec2::new(420.0, 260.0));
    for _ in 0..300 {
        tilt.step(1.0 / 60.0);
    }
    let (rx, ry, _) = tilt.current();
    assert!(rx > 0.0 && ry > 0.0, "tilt should settle off-center");

    let mut field = RippleField::new(42, Vec2::new(1280.0, 720.0));
    for _ in 0..1200 {
        field.advance(1.0 / 60.0);
    }
    assert!(field.is_exhausted(), "ripples should fade out");

    println!("✓ Animation smoke check passed!");
}
