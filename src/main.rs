//! Ball Game entry point
//!
//! Binds host input and frames to the round controller. The web build drives
//! a DOM page; the native build plays a scripted headless session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement};

    use ball_game::RoundController;
    use ball_game::view::{RoundView, hud};

    /// DOM elements the view is rendered into
    struct Hud {
        ball: HtmlElement,
        hits: HtmlElement,
        misses: HtmlElement,
        game_over: HtmlElement,
        pause_btn: Element,
    }

    impl Hud {
        fn find(document: &Document) -> Option<Self> {
            let html = |id: &str| {
                document
                    .get_element_by_id(id)
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            };
            Some(Self {
                ball: html("ball")?,
                hits: html("hits")?,
                misses: html("misses")?,
                game_over: html("game-over")?,
                pause_btn: document.get_element_by_id("pause-btn")?,
            })
        }

        fn render(&self, view: &RoundView) {
            let style = self.ball.style();
            let size = view.ball_radius * 2.0;
            let _ = style.set_property("left", &format!("{}px", view.ball_pos.x - view.ball_radius));
            let _ = style.set_property("top", &format!("{}px", view.ball_pos.y - view.ball_radius));
            let _ = style.set_property("width", &format!("{size}px"));
            let _ = style.set_property("height", &format!("{size}px"));
            let _ = style.set_property("background", hud::FOREGROUND_COLOR);
            let _ = style.set_property(
                "display",
                if view.ball_visible { "block" } else { "none" },
            );

            for (el, text) in [(&self.hits, view.hits_label()), (&self.misses, view.misses_label())] {
                el.set_text_content(Some(&text));
                let _ = el.style().set_property("font-size", &format!("{}px", hud::SCORE_FONT_SIZE));
                let _ = el.style().set_property("color", hud::FOREGROUND_COLOR);
            }
            self.pause_btn.set_text_content(Some(view.pause_label()));

            let label = self.game_over.style();
            let (x, y) = hud::GAME_OVER_POS;
            let _ = label.set_property("left", &format!("{x}px"));
            let _ = label.set_property("top", &format!("{}px", y - hud::GAME_OVER_FONT_SIZE));
            let _ = label.set_property("font-size", &format!("{}px", hud::GAME_OVER_FONT_SIZE));
            let _ = label.set_property(
                "display",
                if view.game_over_visible { "block" } else { "none" },
            );
        }
    }

    /// Game instance holding all state
    struct Game {
        controller: RoundController,
        hud: Hud,
    }

    impl Game {
        fn render(&self) {
            self.hud.render(&self.controller.view());
        }

        fn log_events(&mut self) {
            for event in self.controller.drain_events() {
                log::debug!("{:?}", event);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };
        let Some(elements) = Hud::find(&document) else {
            log::warn!("Missing HUD elements (#ball, #hits, #misses, #game-over, #pause-btn)");
            return;
        };
        if let Some(el) = document.get_element_by_id("game-over") {
            el.set_text_content(Some(hud::GAME_OVER_TEXT));
        }

        let seed = js_sys::Date::now() as u64;
        log::info!("Ball Game starting with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            controller: RoundController::new(seed),
            hud: elements,
        }));
        game.borrow().render();

        bind_click(&document, "ball", game.clone(), |c| {
            c.on_ball_clicked();
        });
        bind_click(&document, "pause-btn", game.clone(), |c| c.on_pause_toggled());
        bind_click(&document, "reset-btn", game.clone(), |c| c.on_reset_requested());

        start_frame_loop(game);
    }

    /// Forward clicks on `id` to a controller handler, then re-render
    fn bind_click(
        document: &Document,
        id: &str,
        game: Rc<RefCell<Game>>,
        handler: fn(&mut RoundController),
    ) {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Missing #{} element", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let mut g = game.borrow_mut();
            handler(&mut g.controller);
            g.log_events();
            g.render();
        });
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(f: &Closure<dyn FnMut()>) {
        if let Some(window) = web_sys::window() {
            let _ = window.request_animation_frame(f.as_ref().unchecked_ref());
        }
    }

    /// One controller tick per browser frame. Frames arriving while the clock
    /// is stopped are dropped by the controller.
    fn start_frame_loop(game: Rc<RefCell<Game>>) {
        let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();

        *g.borrow_mut() = Some(Closure::new(move || {
            {
                let mut game = game.borrow_mut();
                if game.controller.frame_tick() {
                    game.log_events();
                    game.render();
                }
            }
            if let Some(cb) = f.borrow().as_ref() {
                request_animation_frame(cb);
            }
        }));

        if let Some(cb) = g.borrow().as_ref() {
            request_animation_frame(cb);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Ball Game (native) starting...");
    log::info!("Native mode plays a headless session - serve the wasm build for the real game");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_nanos() as u64;
    let view = headless::play(seed, 3)?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session through the same handlers the web shim uses
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use anyhow::{Result, ensure};
    use ball_game::{GameConfig, GamePhase, RoundController, RoundView};

    /// Frames per round before the scripted click lands
    const CLICK_AFTER_FRAMES: u32 = 30;
    /// Generous cap so a broken bounds check cannot spin forever
    const MAX_FRAMES: u32 = 100_000;

    /// Hit `hits` balls, pause and resume once, then let every ball escape
    pub fn play(seed: u64, hits: u32) -> Result<RoundView> {
        let mut controller = RoundController::with_config(GameConfig::default(), seed)?;
        log::info!("Headless session with seed {}", seed);

        for _ in 0..hits {
            for _ in 0..CLICK_AFTER_FRAMES {
                controller.frame_tick();
            }
            controller.on_ball_clicked();
        }

        controller.on_pause_toggled();
        controller.frame_tick();
        controller.on_pause_toggled();

        let mut frames = 0;
        while controller.phase() != GamePhase::GameOver {
            ensure!(frames < MAX_FRAMES, "session did not end after {} frames", frames);
            controller.frame_tick();
            frames += 1;
        }

        for event in controller.drain_events() {
            log::debug!("{:?}", event);
        }
        Ok(controller.view())
    }

}
