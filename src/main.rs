//! Gap Drop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use gap_drop::host::{self, HostMessage};
    use gap_drop::renderer::SdfRenderState;
    use gap_drop::sim::{GameEvent, GameState, Steer, Viewport, tick};

    /// Cooperative scheduler owning the pending animation-frame request.
    ///
    /// Ticks stop the moment the handle is cancelled; no orphaned frame can
    /// fire after game-over or teardown.
    struct FrameScheduler {
        pending: Option<i32>,
    }

    impl FrameScheduler {
        fn new() -> Self {
            Self { pending: None }
        }

        fn schedule(&mut self, callback: &Closure<dyn FnMut(f64)>) {
            let window = web_sys::window().expect("no window");
            self.pending = window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .ok();
        }

        fn cancel(&mut self) {
            if let Some(handle) = self.pending.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(handle);
                }
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<SdfRenderState>,
        scheduler: FrameScheduler,
        /// The per-frame callback; stored so reset can resume scheduling
        frame_callback: Option<Closure<dyn FnMut(f64)>>,
    }

    impl Game {
        fn new(seed: u64, viewport: Viewport) -> Self {
            Self {
                state: GameState::new(seed, viewport),
                render_state: None,
                scheduler: FrameScheduler::new(),
                frame_callback: None,
            }
        }

        fn schedule_next(&mut self) {
            if let Some(ref callback) = self.frame_callback {
                self.scheduler.schedule(callback);
            }
        }

        /// Render the current frame. Skipped as a no-op until the drawing
        /// surface is ready.
        fn render(&mut self, time: f64) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state, time) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update score display and game-over overlay in the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.is_game_over() {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    /// One animation frame: tick, notify, draw, reschedule
    fn on_frame(game: &Rc<RefCell<Game>>, time: f64) {
        let mut g = game.borrow_mut();

        let events = tick(&mut g.state);
        for event in events {
            if let GameEvent::GameOver { score } = event {
                log::info!("Game over at score {}", score);
            }
            host::notify(&HostMessage::from(event));
        }

        g.render(time);
        g.update_hud();

        if g.state.is_game_over() {
            g.scheduler.cancel();
        } else {
            g.schedule_next();
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gap Drop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Canvas backing store matches its CSS size; the simulation runs in
        // the same pixel coordinates the shader sees.
        let width = canvas.client_width() as u32;
        let height = canvas.client_height() as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let viewport = Viewport::new(width as f32, height as f32);
        let game = Rc::new(RefCell::new(Game::new(seed, viewport)));

        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        let render_state = SdfRenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_keyboard(game.clone());
        setup_touch_buttons(&document, game.clone());
        setup_restart_button(&document, game.clone());
        setup_resize(&canvas, game.clone());

        // Create the frame callback and kick off the loop
        {
            let game_clone = game.clone();
            let callback = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                on_frame(&game_clone, time);
            });
            let mut g = game.borrow_mut();
            g.frame_callback = Some(callback);
            g.schedule_next();
        }

        log::info!("Gap Drop running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.state.press(Steer::Left),
                    "ArrowRight" => g.state.press(Steer::Right),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                // Releasing a key that is not the active direction is a no-op
                match event.key().as_str() {
                    "ArrowLeft" => g.state.release(Steer::Left),
                    "ArrowRight" => g.state.release(Steer::Right),
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// On-screen buttons expose the same controller surface as the keyboard
    fn setup_touch_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("btn-left") {
            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::PointerEvent| {
                    game.borrow_mut().state.start_moving_left();
                });
                let _ = btn.add_event_listener_with_callback(
                    "pointerdown",
                    closure.as_ref().unchecked_ref(),
                );
                closure.forget();
            }
            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::PointerEvent| {
                    game.borrow_mut().state.stop_moving();
                });
                let _ = btn
                    .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("btn-right") {
            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::PointerEvent| {
                    game.borrow_mut().state.start_moving_right();
                });
                let _ = btn.add_event_listener_with_callback(
                    "pointerdown",
                    closure.as_ref().unchecked_ref(),
                );
                closure.forget();
            }
            {
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::PointerEvent| {
                    game.borrow_mut().state.stop_moving();
                });
                let _ = btn
                    .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_restart_button(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.scheduler.cancel();
                g.state.reset();
                g.update_hud();
                g.schedule_next();
                log::info!("Game reset");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let width = canvas.client_width() as u32;
            let height = canvas.client_height() as u32;
            canvas.set_width(width);
            canvas.set_height(height);

            let mut g = game.borrow_mut();
            g.state.resize(width as f32, height as f32);
            if let Some(ref mut render_state) = g.render_state {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use gap_drop::sim::{GameEvent, GameState, Viewport, tick};

    env_logger::init();
    log::info!("Gap Drop (native) starting...");
    log::info!("Native mode runs a headless smoke simulation - run with `trunk serve` for the web version");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut state = GameState::new(seed, Viewport::new(400.0, 600.0));

    // Autopilot: steer toward the gap center, stop when lined up
    loop {
        let target = state.gap.x + state.gap.width / 2.0;
        let delta = target - state.ball.pos.x;
        if delta < -2.5 {
            state.start_moving_left();
        } else if delta > 2.5 {
            state.start_moving_right();
        } else {
            state.stop_moving();
        }

        for event in tick(&mut state) {
            match event {
                GameEvent::ScoreIncrease { score } => {
                    println!("passed gap, score {} (speed {:.1})", score, state.speed)
                }
                GameEvent::GameOver { score } => println!("game over at score {}", score),
            }
        }

        if state.is_game_over() || state.score >= 10 {
            break;
        }
    }

    println!("smoke simulation done after {} ticks", state.time_ticks);
}
