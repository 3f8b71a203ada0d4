//! Background music and memory clips
//!
//! One looping track behind the whole page, plus a clip player for the memory
//! cards and the PIN chime. In the browser these wrap `<audio>` elements;
//! elsewhere they only track state so the page flow can be exercised headless.

use std::cell::Cell;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use web_sys::HtmlAudioElement;

/// Looping background track
pub struct BackgroundMusic {
    url: String,
    volume: f32,
    /// Set only once playback has actually started
    playing: Rc<Cell<bool>>,
    /// Bumped by `pause` so a play request still in flight cannot resurrect
    /// the playing flag
    generation: Rc<Cell<u32>>,
    #[cfg(target_arch = "wasm32")]
    element: Option<HtmlAudioElement>,
}

impl BackgroundMusic {
    pub fn new(url: impl Into<String>, volume: f32) -> Self {
        let url = url.into();
        let volume = volume.clamp(0.0, 1.0);

        #[cfg(target_arch = "wasm32")]
        let element = match HtmlAudioElement::new_with_src(&url) {
            Ok(el) => {
                el.set_loop(true);
                el.set_volume(volume as f64);
                Some(el)
            }
            Err(e) => {
                log::warn!("Failed to create audio element - music disabled: {:?}", e);
                None
            }
        };

        Self {
            url,
            volume,
            playing: Rc::new(Cell::new(false)),
            generation: Rc::new(Cell::new(0)),
            #[cfg(target_arch = "wasm32")]
            element,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        #[cfg(target_arch = "wasm32")]
        if let Some(el) = &self.element {
            el.set_volume(self.volume as f64);
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing.get()
    }

    /// Ticket for a play request; only the latest one may mark playback
    fn begin_play(&self) -> u32 {
        self.generation.get()
    }

    fn confirm_play(playing: &Cell<bool>, generation: &Cell<u32>, ticket: u32) {
        if generation.get() == ticket {
            playing.set(true);
        }
    }

    /// Start playback. Browsers may refuse without a user gesture; that is
    /// logged and the track stays paused.
    #[cfg(target_arch = "wasm32")]
    pub fn play(&self) {
        let Some(el) = &self.element else {
            return;
        };
        let promise = match el.play() {
            Ok(promise) => promise,
            Err(e) => {
                log::warn!("Music play failed: {:?}", e);
                return;
            }
        };
        let ticket = self.begin_play();
        let playing = Rc::clone(&self.playing);
        let generation = Rc::clone(&self.generation);
        wasm_bindgen_futures::spawn_local(async move {
            match wasm_bindgen_futures::JsFuture::from(promise).await {
                Ok(_) => Self::confirm_play(&playing, &generation, ticket),
                Err(e) => log::warn!("Music play failed: {:?}", e),
            }
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&self) {
        let ticket = self.begin_play();
        Self::confirm_play(&self.playing, &self.generation, ticket);
    }

    pub fn pause(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(el) = &self.element {
            let _ = el.pause();
        }
        self.generation.set(self.generation.get().wrapping_add(1));
        self.playing.set(false);
    }

    /// Pause if playing, otherwise try to play
    pub fn toggle(&self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }
}

/// What a clip toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipAction {
    /// Started playing (a new source always starts from the top)
    Play,
    /// Paused and rewound to the start
    Stop,
}

/// Single-voice player for short clips
pub struct ClipPlayer {
    src: Option<String>,
    paused: bool,
    #[cfg(target_arch = "wasm32")]
    element: Option<HtmlAudioElement>,
}

impl Default for ClipPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipPlayer {
    pub fn new() -> Self {
        #[cfg(target_arch = "wasm32")]
        let element = match HtmlAudioElement::new() {
            Ok(el) => Some(el),
            Err(e) => {
                log::warn!("Failed to create clip player - clips disabled: {:?}", e);
                None
            }
        };

        Self {
            src: None,
            paused: true,
            #[cfg(target_arch = "wasm32")]
            element,
        }
    }

    /// Current source, if any clip was ever loaded
    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn is_paused(&self) -> bool {
        #[cfg(target_arch = "wasm32")]
        if let Some(el) = &self.element {
            return el.paused();
        }
        self.paused
    }

    /// Card click: load `url` if it is not the current source, then play if
    /// paused, otherwise stop and rewind
    pub fn toggle(&mut self, url: &str) -> ClipAction {
        if self.src.as_deref() != Some(url) {
            self.load(url);
        }
        if self.is_paused() {
            self.start();
            ClipAction::Play
        } else {
            self.stop();
            ClipAction::Stop
        }
    }

    /// Play `url` from the top regardless of the current state
    pub fn restart(&mut self, url: &str) {
        if self.src.as_deref() != Some(url) {
            self.load(url);
        } else {
            self.stop();
        }
        self.start();
    }

    fn load(&mut self, url: &str) {
        self.src = Some(url.to_string());
        // Loading a new source drops any playback in progress
        self.paused = true;
        #[cfg(target_arch = "wasm32")]
        if let Some(el) = &self.element {
            el.set_src(url);
            el.load();
        }
    }

    fn start(&mut self) {
        self.paused = false;
        #[cfg(target_arch = "wasm32")]
        if let Some(el) = &self.element {
            match el.play() {
                Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                        log::warn!("Clip play failed: {:?}", e);
                    }
                }),
                Err(e) => log::warn!("Clip play failed: {:?}", e),
            }
        }
    }

    fn stop(&mut self) {
        self.paused = true;
        #[cfg(target_arch = "wasm32")]
        if let Some(el) = &self.element {
            let _ = el.pause();
            el.set_current_time(0.0);
        }
    }
}
