use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Event, HtmlAudioElement};
use yew::ComponentLink;

use soundboard::playback::PlayToken;
use soundboard::SoundId;

use crate::utils::js_reason;
use crate::{App, Msg};

/// Plays the `<audio>` elements of the board and reports their events back
/// to the application.
pub struct SoundPlayer {
    link: ComponentLink<App>,
    listeners: Vec<Closure<dyn FnMut(Event)>>,
}

impl SoundPlayer {
    pub fn new(link: ComponentLink<App>) -> Self {
        Self {
            link,
            listeners: vec![],
        }
    }

    pub fn find(&self, sound: &SoundId) -> Option<HtmlAudioElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id(sound.as_str())?
            .dyn_into::<HtmlAudioElement>()
            .ok()
    }

    fn listen<F>(&mut self, audio: &HtmlAudioElement, event: &str, to_msg: F)
    where
        F: Fn() -> Msg + 'static,
    {
        let link = self.link.clone();
        let callback = Closure::wrap(Box::new(move |_: Event| link.send_message(to_msg()))
            as Box<dyn FnMut(Event)>);
        if let Err(e) = audio.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
            log::error!("cannot listen to {} events: {}", event, js_reason(&e));
        }
        self.listeners.push(callback);
    }

    pub fn prepare(&mut self, sound: &SoundId, audio: &HtmlAudioElement) {
        let id = sound.clone();
        self.listen(audio, "play", move || Msg::Started(id.clone()));
        let id = sound.clone();
        self.listen(audio, "ended", move || Msg::Ended(id.clone()));
        let id = sound.clone();
        let element = audio.clone();
        self.listen(audio, "error", move || Msg::MediaFailed(id.clone(), media_error(&element)));
        let id = sound.clone();
        self.listen(audio, "canplaythrough", move || Msg::Ready(id.clone()));

        audio.set_preload("auto");
        audio.set_volume(1.0);
        audio.load();
    }

    pub fn play(&self, sound: &SoundId, audio: &HtmlAudioElement, token: PlayToken) {
        let id = sound.clone();
        match audio.play() {
            Ok(promise) => {
                let link = self.link.clone();
                spawn_local(async move {
                    let msg = match JsFuture::from(promise).await {
                        Ok(_) => Msg::PlayResolved(id, token),
                        Err(e) => Msg::PlayRejected(id, token, js_reason(&e)),
                    };
                    link.send_message(msg);
                });
            }
            Err(e) => self.link.send_message(Msg::PlayRejected(id, token, js_reason(&e))),
        }
    }

    pub fn pause(&self, audio: &HtmlAudioElement) {
        if let Err(e) = audio.pause() {
            log::warn!("cannot pause {}: {}", audio.id(), js_reason(&e));
        }
    }

    pub fn rewind(&self, audio: &HtmlAudioElement) {
        audio.set_current_time(0.0);
    }
}

fn media_error(audio: &HtmlAudioElement) -> String {
    match audio.error() {
        Some(error) => format!("media error {}: {}", error.code(), error.message()),
        None => "unknown media error".to_owned(),
    }
}
