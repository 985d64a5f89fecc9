//! Web Speech API bindings
//!
//! Recognition is reached through `js_sys::Reflect` because web-sys does not
//! expose the prefixed `webkitSpeechRecognition` constructor. Synthesis uses
//! the typed web-sys bindings.

use chat_session_lib::VoiceEvent;
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::SpeechSynthesisUtterance;
use yew::Callback;

const RECOGNITION_CONSTRUCTORS: [&str; 2] = ["SpeechRecognition", "webkitSpeechRecognition"];
const RECOGNITION_LANGUAGE: &str = "en-US";

fn recognition_constructor() -> Option<Function> {
    let window = web_sys::window()?;
    RECOGNITION_CONSTRUCTORS
        .iter()
        .filter_map(|name| Reflect::get(&window, &JsValue::from_str(name)).ok())
        .find_map(|ctor| ctor.dyn_into::<Function>().ok())
}

pub fn recognition_supported() -> bool {
    recognition_constructor().is_some()
}

pub fn synthesis_supported() -> bool {
    web_sys::window()
        .map(|w| Reflect::has(&w, &JsValue::from_str("speechSynthesis")).unwrap_or(false))
        .unwrap_or(false)
}

/// Speak `text`, cutting off anything still being spoken
pub fn speak(text: &str) {
    let Some(synth) = web_sys::window().and_then(|w| w.speech_synthesis().ok()) else {
        return;
    };
    let utterance = match SpeechSynthesisUtterance::new_with_text(text) {
        Ok(u) => u,
        Err(e) => {
            log::warn!("Failed to create utterance: {:?}", e);
            return;
        }
    };
    utterance.set_rate(0.9);
    utterance.set_pitch(1.0);
    utterance.set_volume(1.0);

    synth.cancel();
    synth.speak(&utterance);
}

fn get(target: &JsValue, key: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

fn set(target: &JsValue, key: &str, value: &JsValue) {
    if Reflect::set(target, &JsValue::from_str(key), value).is_err() {
        log::warn!("Failed to set speech recognition property {}", key);
    }
}

/// Concatenated (interim, final) transcripts from a `SpeechRecognitionEvent`
fn transcripts(event: &JsValue) -> (String, String) {
    let mut interim = String::new();
    let mut final_text = String::new();

    let results = get(event, "results");
    let start = get(event, "resultIndex").as_f64().unwrap_or(0.0) as u32;
    let len = get(&results, "length").as_f64().unwrap_or(0.0) as u32;

    for i in start..len {
        let result = Reflect::get_u32(&results, i).unwrap_or(JsValue::UNDEFINED);
        let best = Reflect::get_u32(&result, 0).unwrap_or(JsValue::UNDEFINED);
        let transcript = get(&best, "transcript").as_string().unwrap_or_default();

        if get(&result, "isFinal").as_bool().unwrap_or(false) {
            final_text.push_str(&transcript);
        } else {
            interim.push_str(&transcript);
        }
    }

    (interim, final_text)
}

type Handler = Closure<dyn FnMut(JsValue)>;

/// A continuous recognition session that reports through `VoiceEvent`s.
///
/// Restart policy lives in the controller; this only starts and stops the
/// engine and forwards what it says.
pub struct SpeechRecognizer {
    recognition: JsValue,
    _handlers: Vec<Handler>,
}

impl SpeechRecognizer {
    pub fn new(on_event: Callback<VoiceEvent>) -> Option<Self> {
        let ctor = recognition_constructor()?;
        let recognition = match Reflect::construct(&ctor, &Array::new()) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Speech recognition unavailable: {:?}", e);
                return None;
            }
        };

        set(&recognition, "continuous", &JsValue::TRUE);
        set(&recognition, "interimResults", &JsValue::TRUE);
        set(&recognition, "lang", &JsValue::from_str(RECOGNITION_LANGUAGE));

        let mut handlers = Vec::new();

        let cb = on_event.clone();
        handlers.push(Self::attach(&recognition, "onstart", move |_| {
            cb.emit(VoiceEvent::Started)
        }));

        let cb = on_event.clone();
        handlers.push(Self::attach(&recognition, "onresult", move |event| {
            let (interim, final_text) = transcripts(&event);
            if !interim.is_empty() {
                cb.emit(VoiceEvent::Interim(interim));
            }
            if !final_text.is_empty() {
                cb.emit(VoiceEvent::Final(final_text));
            }
        }));

        let cb = on_event.clone();
        handlers.push(Self::attach(&recognition, "onerror", move |event| {
            let code = get(&event, "error")
                .as_string()
                .unwrap_or_else(|| "unknown".to_string());
            log::error!("Speech recognition error: {}", code);
            cb.emit(VoiceEvent::Error(code));
        }));

        let cb = on_event;
        handlers.push(Self::attach(&recognition, "onend", move |_| {
            cb.emit(VoiceEvent::Ended)
        }));

        Some(Self {
            recognition,
            _handlers: handlers,
        })
    }

    fn attach(recognition: &JsValue, key: &str, f: impl FnMut(JsValue) + 'static) -> Handler {
        let handler = Closure::wrap(Box::new(f) as Box<dyn FnMut(JsValue)>);
        set(recognition, key, handler.as_ref());
        handler
    }

    fn call(&self, method: &str) -> Result<(), String> {
        let f: Function = get(&self.recognition, method)
            .dyn_into()
            .map_err(|_| format!("recognition.{} is not a function", method))?;
        f.call0(&self.recognition)
            .map(|_| ())
            .map_err(|e| format!("{:?}", e))
    }

    pub fn start(&self) -> Result<(), String> {
        self.call("start")
    }

    pub fn stop(&self) {
        if let Err(e) = self.call("stop") {
            log::warn!("Failed to stop speech recognition: {}", e);
        }
    }
}

impl Drop for SpeechRecognizer {
    fn drop(&mut self) {
        // Detach handlers before the closures are freed
        for key in ["onstart", "onresult", "onerror", "onend"] {
            set(&self.recognition, key, &JsValue::NULL);
        }
        let _ = self.call("abort");
    }
}
