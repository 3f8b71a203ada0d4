//! Browser composition root (wasm32 only)
//!
//! Binds the show to the page canvas, keeps one animation frame loop running
//! for the life of the page, and wires the PIN page, route sections, reveal
//! sequence, memory cards and music toggle to their DOM elements.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlCanvasElement, HtmlInputElement};

use crate::audio::{BackgroundMusic, ClipPlayer};
use crate::flow::{Memory, PinError, PinForm, PinGate, PinStage, RevealEvent, RevealSequence, Route};
use crate::renderer::CanvasSurface;
use crate::settings::ShowConfig;
use crate::sim::FireworksShow;

type Show = FireworksShow<CanvasSurface>;

/// Handle to the fireworks show bound to a canvas
#[derive(Clone)]
pub struct WebController {
    show: Rc<RefCell<Show>>,
}

impl WebController {
    pub fn start(&self) {
        self.show.borrow_mut().start();
    }

    pub fn stop(&self) {
        self.show.borrow_mut().stop();
    }

    pub fn is_active(&self) -> bool {
        self.show.borrow().is_active()
    }

    pub fn is_attached(&self) -> bool {
        self.show.borrow().is_attached()
    }
}

/// Bind a show to `canvas`. Never fails: without a 2D context the returned
/// controller is detached and every call on it is a no-op.
pub fn attach(canvas: HtmlCanvasElement, config: &ShowConfig) -> WebController {
    let seed = js_sys::Date::now() as u64;
    let show = match CanvasSurface::new(canvas) {
        Ok(surface) => FireworksShow::new(surface, config, seed),
        Err(e) => {
            log::warn!("{}; fireworks disabled", e);
            return WebController {
                show: Rc::new(RefCell::new(FireworksShow::detached())),
            };
        }
    };
    let show = Rc::new(RefCell::new(show));

    fit_to_window(&show);
    setup_resize(show.clone());

    // Runs while hidden too so a restart paints on the very next frame
    let frame_show = show.clone();
    start_loop(move |now| {
        frame_show.borrow_mut().tick(now);
    });

    log::info!("Fireworks attached with seed: {}", seed);
    WebController { show }
}

fn fit_to_window(show: &Rc<RefCell<Show>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let width = window.inner_width().ok().and_then(|v| v.as_f64());
    let height = window.inner_height().ok().and_then(|v| v.as_f64());
    if let (Some(w), Some(h)) = (width, height) {
        show.borrow_mut().resize(w as f32, h as f32);
    }
}

fn setup_resize(show: Rc<RefCell<Show>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    listen(&window, "resize", move |_event| fit_to_window(&show));
}

/// Call `frame` with the wall clock (ms) on every animation frame, forever
fn start_loop(frame: impl FnMut(f64) + 'static) {
    let frame: Rc<RefCell<dyn FnMut(f64)>> = Rc::new(RefCell::new(frame));
    request_animation_frame(frame);
}

fn request_animation_frame(frame: Rc<RefCell<dyn FnMut(f64)>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |_time: f64| {
        (frame.borrow_mut())(js_sys::Date::now());
        request_animation_frame(frame);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn listen(target: &EventTarget, event: &str, handler: impl FnMut(web_sys::Event) + 'static) {
    let closure = Closure::<dyn FnMut(_)>::new(handler);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Page state behind the DOM
struct Page {
    document: Document,
    config: ShowConfig,
    route: Route,
    pin: PinForm,
    reveal: RevealSequence,
    controller: WebController,
    music: BackgroundMusic,
    clips: ClipPlayer,
    /// Last music state written to the toggle button
    music_label: Option<bool>,
}

impl Page {
    fn new(
        document: Document,
        config: ShowConfig,
        controller: WebController,
        music: BackgroundMusic,
    ) -> Self {
        Self {
            document,
            pin: PinForm::new(PinGate::new(config.pin.clone())),
            reveal: RevealSequence::new(config.countdown_secs, config.next_button_delay_secs),
            config,
            route: Route::Home,
            controller,
            music,
            clips: ClipPlayer::new(),
            music_label: None,
        }
    }

    fn set_hidden(&self, id: &str, hidden: bool) {
        if let Some(el) = self.document.get_element_by_id(id) {
            let cl = el.class_list();
            let _ = if hidden {
                cl.add_1("hidden")
            } else {
                cl.remove_1("hidden")
            };
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_disabled(&self, id: &str, disabled: bool) {
        if let Some(el) = self.document.get_element_by_id(id) {
            let _ = if disabled {
                el.set_attribute("disabled", "")
            } else {
                el.remove_attribute("disabled")
            };
        }
    }

    fn pin_input(&self) -> Option<HtmlInputElement> {
        self.document
            .get_element_by_id("pin-input")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    }

    fn pin_value(&self) -> String {
        self.pin_input().map(|i| i.value()).unwrap_or_default()
    }

    /// Switch to `route` unless already there
    fn navigate(&mut self, route: Route) {
        if route != self.route {
            self.enter(route);
        }
    }

    fn enter(&mut self, route: Route) {
        if self.route == Route::Fireworks {
            self.controller.stop();
            self.music.pause();
        }
        self.route = route;

        for other in Route::ALL {
            self.set_hidden(other.section_id(), other != route);
        }
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_hash(route.path());
        }

        match route {
            Route::Home => self.reset_pin_page(),
            Route::Fireworks => self.begin_reveal(),
            Route::Wishes => {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
            }
        }
        log::info!("Route: {}", route.path());
    }

    fn reset_pin_page(&mut self) {
        self.pin.reset();
        if let Some(input) = self.pin_input() {
            input.set_value("");
        }
        self.set_text("pin-message", "");
        self.sync_pin_page();
    }

    /// Show the pieces of the PIN page that match its current stage
    fn sync_pin_page(&self) {
        let stage = self.pin.stage();
        self.set_hidden("pin-welcome", stage != PinStage::Welcome);
        self.set_hidden("pin-card", stage == PinStage::Welcome);
        self.set_disabled("pin-input", self.pin.is_input_locked());

        let accepted = stage == PinStage::Accepted;
        self.set_hidden("pin-submit", accepted);
        self.set_hidden("pin-next", !accepted);
        self.set_text(
            "pin-submit",
            if self.pin.is_input_locked() {
                "Verifying..."
            } else {
                "Verify PIN"
            },
        );
        self.set_disabled("pin-submit", !self.pin.can_submit(&self.pin_value()));
    }

    fn begin_pin_entry(&mut self) {
        self.pin.begin();
        self.sync_pin_page();
        if let Some(input) = self.pin_input() {
            let _ = input.focus();
        }
    }

    fn submit_pin(&mut self) {
        let input = self.pin_value();
        if self.pin.submit(&input, js_sys::Date::now()) {
            self.sync_pin_page();
        }
    }

    fn show_pin_verdict(&self, verdict: Result<(), PinError>) {
        let (text, class) = match verdict {
            Ok(()) => (PinGate::SUCCESS_MESSAGE.to_string(), "success"),
            Err(e) => (e.to_string(), "error"),
        };
        self.set_text("pin-message", &text);
        if let Some(el) = self.document.get_element_by_id("pin-message") {
            let _ = el.set_attribute("class", class);
        }
        self.sync_pin_page();
    }

    fn leave_pin_page(&mut self) {
        let chime = self.config.success_sound_url.clone();
        self.clips.restart(&chime);
        self.navigate(Route::Fireworks);
    }

    /// The countdown starts as soon as the fireworks page opens
    fn begin_reveal(&mut self) {
        self.reveal =
            RevealSequence::new(self.config.countdown_secs, self.config.next_button_delay_secs);
        self.controller.stop();
        self.set_hidden("countdown", false);
        self.set_hidden("greeting", true);
        self.set_hidden("fireworks-next", true);
        let event = self.reveal.start(js_sys::Date::now());
        self.apply(event);
    }

    fn apply(&mut self, event: RevealEvent) {
        match event {
            RevealEvent::Countdown(n) => self.set_text("countdown", &n.to_string()),
            RevealEvent::ShowFireworks => {
                self.set_hidden("countdown", true);
                self.set_hidden("greeting", false);
                self.controller.start();
            }
            RevealEvent::ShowNextButton => self.set_hidden("fireworks-next", false),
        }
    }

    fn play_memory(&mut self, index: usize) {
        let Some(url) = self.config.memories.get(index).map(|m| m.clip_url.clone()) else {
            return;
        };
        let action = self.clips.toggle(&url);
        log::debug!("Memory {}: {:?}", index, action);
    }

    fn frame(&mut self, now: f64) {
        match self.route {
            Route::Home => {
                if let Some(verdict) = self.pin.advance(now) {
                    self.show_pin_verdict(verdict);
                }
            }
            Route::Fireworks => {
                for event in self.reveal.advance(now) {
                    self.apply(event);
                }
            }
            Route::Wishes => {}
        }

        let playing = self.music.is_playing();
        if self.music_label != Some(playing) {
            self.music_label = Some(playing);
            self.set_text("music-toggle", if playing { "Music: on" } else { "Music: off" });
        }
    }
}

/// Set up the page. Called once from the wasm entry point.
pub fn run() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    log::info!("Heartburst starting...");

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Some(canvas) = document
        .get_element_by_id("fireworks-canvas")
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
    else {
        log::error!("No #fireworks-canvas element on the page");
        return;
    };

    let config = ShowConfig::from_json_or_default(canvas.get_attribute("data-config").as_deref());
    let controller = attach(canvas, &config);
    let music = BackgroundMusic::new(config.music_url.clone(), config.music_volume);
    let page = Rc::new(RefCell::new(Page::new(
        document.clone(),
        config,
        controller,
        music,
    )));

    setup_pin_page(&document, page.clone());
    setup_buttons(&document, page.clone());
    setup_memories(&document, page.clone());
    setup_hash_routing(page.clone());

    let initial = Route::from_path(&window.location().hash().unwrap_or_default());
    page.borrow_mut().enter(initial);

    start_loop(move |now| page.borrow_mut().frame(now));

    log::info!("Heartburst running!");
}

fn setup_pin_page(document: &Document, page: Rc<RefCell<Page>>) {
    if let Some(btn) = document.get_element_by_id("pin-start") {
        let p = page.clone();
        listen(&btn, "click", move |_event| p.borrow_mut().begin_pin_entry());
    }

    if let Some(input) = document.get_element_by_id("pin-input") {
        let p = page.clone();
        listen(&input, "input", move |_event| p.borrow().sync_pin_page());
    }

    if let Some(form) = document.get_element_by_id("pin-form") {
        let p = page.clone();
        listen(&form, "submit", move |event| {
            event.prevent_default();
            p.borrow_mut().submit_pin();
        });
    }

    if let Some(btn) = document.get_element_by_id("pin-next") {
        listen(&btn, "click", move |event| {
            event.prevent_default();
            page.borrow_mut().leave_pin_page();
        });
    }
}

fn setup_buttons(document: &Document, page: Rc<RefCell<Page>>) {
    if let Some(btn) = document.get_element_by_id("fireworks-next") {
        let p = page.clone();
        listen(&btn, "click", move |_event| {
            p.borrow_mut().navigate(Route::Wishes);
        });
    }

    if let Some(btn) = document.get_element_by_id("music-toggle") {
        listen(&btn, "click", move |_event| page.borrow().music.toggle());
    }
}

/// Build one card per memory into `#memory-grid` and bind its click
fn setup_memories(document: &Document, page: Rc<RefCell<Page>>) {
    let Some(grid) = document.get_element_by_id("memory-grid") else {
        return;
    };
    let memories = page.borrow().config.memories.clone();

    for (index, memory) in memories.iter().enumerate() {
        let Ok(card) = memory_card(document, memory) else {
            log::warn!("Failed to build memory card {}", index);
            continue;
        };
        let p = page.clone();
        listen(&card, "click", move |_event| p.borrow_mut().play_memory(index));
        let _ = grid.append_child(&card);
    }
}

fn memory_card(document: &Document, memory: &Memory) -> Result<Element, JsValue> {
    let card = document.create_element("div")?;
    card.set_class_name("memory-card");

    let img = document.create_element("img")?;
    img.set_attribute("src", &memory.image)?;
    img.set_attribute("alt", "Memory")?;
    card.append_child(&img)?;

    let date = document.create_element("p")?;
    date.set_class_name("memory-date");
    date.set_text_content(Some(&memory.date));
    card.append_child(&date)?;

    let text = document.create_element("p")?;
    text.set_class_name("memory-text");
    text.set_text_content(Some(&memory.text));
    card.append_child(&text)?;

    Ok(card)
}

fn setup_hash_routing(page: Rc<RefCell<Page>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    listen(&window, "hashchange", move |_event| {
        let hash = web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default();
        page.borrow_mut().navigate(Route::from_path(&hash));
    });
}
