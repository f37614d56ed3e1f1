pub mod runner;
pub mod storage;
pub mod surface;

use std::cell::RefCell;

use card_engine::{CardConfig, InputEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, MediaQueryListEvent, Window,
};

pub use runner::CardRunner;
pub use storage::BrowserSession;
pub use surface::DomSurface;

/// Section whose visibility starts the intro.
const SURPRISE_SECTION: &str = "surprise";
const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

thread_local! {
    static RUNNER: RefCell<Option<CardRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the card. Calls made before `card_init` are logged and dropped.
fn with_runner<R>(f: impl FnOnce(&mut CardRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("card not initialized, call card_init() first");
                None
            }
        }
    })
}

/// Build the card against the current page. `config_json` overrides any
/// subset of the default timings and tuning.
#[wasm_bindgen]
pub fn card_init(config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json {
        Some(json) => CardConfig::from_json(&json).map_err(|err| JsValue::from_str(&err.to_string()))?,
        None => CardConfig::default(),
    };
    let threshold = config.intro_threshold;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

    let mut surface = DomSurface::new(window.clone(), document.clone());
    if let Some(observer) = observe_surprise_section(&document, threshold)? {
        surface.set_observer(observer);
    }
    let session = BrowserSession::new(&window);
    let reduced_motion = watch_motion_preference(&window)?;

    let mut runner = CardRunner::new(config, surface, session);
    runner.init(reduced_motion);
    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));

    log::info!("birthday card: initialized");
    Ok(())
}

fn observe_surprise_section(document: &Document, threshold: f32) -> Result<Option<IntersectionObserver>, JsValue> {
    let Some(section) = document.get_element_by_id(SURPRISE_SECTION) else {
        log::warn!("#{SURPRISE_SECTION} missing, intro will only start from reduced motion or a replay");
        return Ok(None);
    };

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    let (intersecting, ratio) = (entry.is_intersecting(), entry.intersection_ratio());
                    with_runner(|r| r.intersect(intersecting, ratio));
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold as f64));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    observer.observe(&section);
    // The observer lives for the page; the callback must too.
    callback.forget();
    Ok(Some(observer))
}

/// Read the current motion preference and subscribe to changes.
fn watch_motion_preference(window: &Window) -> Result<bool, JsValue> {
    let Some(query) = window.match_media(REDUCED_MOTION_QUERY)? else {
        return Ok(false);
    };

    let callback = Closure::<dyn FnMut(MediaQueryListEvent)>::new(|event: MediaQueryListEvent| {
        let reduced = event.matches();
        with_runner(|r| r.push_input(InputEvent::MotionPreference { reduced }));
    });
    query.add_event_listener_with_callback("change", callback.as_ref().unchecked_ref())?;
    callback.forget();

    Ok(query.matches())
}

#[wasm_bindgen]
pub fn card_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn card_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn card_pointer_enter(id: &str) {
    with_runner(|r| r.pointer_enter(id));
}

#[wasm_bindgen]
pub fn card_pointer_leave(id: &str) {
    with_runner(|r| r.pointer_leave(id));
}

#[wasm_bindgen]
pub fn card_touch_start(x: f32, y: f32, id: Option<String>) {
    with_runner(|r| r.touch_start(x, y, id.as_deref()));
}

#[wasm_bindgen]
pub fn card_click(id: &str) {
    with_runner(|r| r.click(id));
}

#[wasm_bindgen]
pub fn card_key_down(key: &str, id: Option<String>) {
    with_runner(|r| r.key_down(key, id.as_deref()));
}

#[wasm_bindgen]
pub fn card_scroll(y: f32) {
    with_runner(|r| r.push_input(InputEvent::Scroll { y }));
}

#[wasm_bindgen]
pub fn card_animation_end(id: &str) {
    with_runner(|r| r.animation_end(id));
}

/// Current stage as its numeric code, or -1 before init.
#[wasm_bindgen]
pub fn card_stage() -> i32 {
    with_runner(|r| r.stage().code() as i32).unwrap_or(-1)
}
