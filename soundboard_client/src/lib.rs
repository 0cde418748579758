#![recursion_limit = "512"]

mod components;
mod pwa;
mod sound_player;
mod utils;
mod web_host;

use anyhow::{anyhow, Context};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, TouchEvent};
use yew::{html, Component, ComponentLink, Html, ShouldRender};

use soundboard::board::{BoardConfig, PageConfig};
use soundboard::gesture::{Point, TouchOrigin};
use soundboard::host::{Deferred, Surface, TimerId};
use soundboard::playback::PlayToken;
use soundboard::{Controller, SoundId};

use crate::components::notice::NoticeBox;
use crate::components::page_nav::PageNav;
use crate::utils::{first_touch, js_reason, on_control};
use crate::web_host::WebHost;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

const BOARD: &str = include_str!("../board.json");

pub struct App {
    link: ComponentLink<Self>,
    board: Controller<WebHost>,
    _visibility: Option<Closure<dyn FnMut(Event)>>,
}

pub enum Msg {
    Init,
    Tap(SoundId),
    Press(SoundId),
    Release(SoundId),
    SelectPage(usize),
    TrackTap(f64),
    TouchStart(Point, TouchOrigin),
    TouchMove(Point),
    TouchEnd(Option<Point>),
    TouchCancel,
    PlayResolved(SoundId, PlayToken),
    PlayRejected(SoundId, PlayToken, String),
    Started(SoundId),
    Ended(SoundId),
    MediaFailed(SoundId, String),
    Ready(SoundId),
    Timeout(TimerId, Deferred),
    VisibilityChanged(bool),
    CloseNotice,
    Ignore,
}

fn load_board(link: &ComponentLink<App>) -> anyhow::Result<Controller<WebHost>> {
    let config = BoardConfig::from_json(BOARD).context("invalid board.json")?;
    let board = Controller::new(WebHost::new(link.clone()), config)?;
    Ok(board)
}

/// Reports every change of the document visibility.
fn watch_visibility(link: &ComponentLink<App>) -> anyhow::Result<Closure<dyn FnMut(Event)>> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| anyhow!("no document"))?;
    let watched = document.clone();
    let link = link.clone();
    let callback = Closure::wrap(Box::new(move |_: Event| {
        link.send_message(Msg::VisibilityChanged(watched.hidden()))
    }) as Box<dyn FnMut(Event)>);
    document
        .add_event_listener_with_callback("visibilitychange", callback.as_ref().unchecked_ref())
        .map_err(|e| anyhow!("cannot watch visibility: {}", js_reason(&e)))?;
    Ok(callback)
}

fn touch_origin(event: &TouchEvent) -> TouchOrigin {
    if on_control(event) {
        TouchOrigin::Control
    } else {
        TouchOrigin::Board
    }
}

impl App {
    fn view_page(&self, number: usize, page: &PageConfig) -> Html {
        let classes = self.board.host().classes();
        html! {
            <section class=classes.classes(&Surface::Page(number), &["page"])
                     aria-label=page.name.clone()>
            {
                for page.sounds.iter().map(|sound| {
                    let id = sound.id.clone();
                    let tapped = id.clone();
                    let pressed = id.clone();
                    let released = id.clone();
                    let cancelled = id.clone();
                    html! {
                        <button class=classes.classes(&Surface::Button(id.clone()), &["sound-button"])
                                data-sound=id.to_string()
                                onclick=self.link.callback(move |_| Msg::Tap(tapped.clone()))
                                ontouchstart=self.link.callback(move |_: TouchEvent| Msg::Press(pressed.clone()))
                                ontouchend=self.link.callback(move |event: TouchEvent| {
                                    // the synthetic click would play the sound twice
                                    event.prevent_default();
                                    Msg::Tap(released.clone())
                                })
                                ontouchcancel=self.link.callback(move |_: TouchEvent| Msg::Release(cancelled.clone()))>
                            { &sound.label }
                        </button>
                    }
                })
            }
            </section>
        }
    }

    fn view_audio_bank(&self) -> Html {
        html! {
            <div class="audio-bank">
            {
                for self.board.board().sounds().filter_map(|sound| {
                    sound.src.as_ref().map(|src| html! {
                        <audio id=sound.id.to_string() src=src.clone() preload="auto"></audio>
                    })
                })
            }
            </div>
        }
    }

    fn view_nav(&self) -> Html {
        let count = self.board.page_count();
        if count < 2 {
            return html! {};
        }
        let classes = self.board.host().classes();
        let indicators = (1..=count)
            .map(|page| classes.classes(&Surface::Indicator(page), &["page-dot"]))
            .collect::<Vec<_>>();
        html! {
            <PageNav
                indicators=indicators
                current=self.board.current_page()
                on_select=self.link.callback(Msg::SelectPage)
                on_track=self.link.callback(Msg::TrackTap) />
        }
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_: Self::Properties, link: ComponentLink<Self>) -> Self {
        let board = load_board(&link).unwrap_or_else(|e| {
            log::error!("{:#}, using the default board", e);
            Controller::with_default_board(WebHost::new(link.clone()))
        });
        let _visibility = watch_visibility(&link)
            .map_err(|e| log::warn!("{:#}", e))
            .ok();
        App {
            board,
            link,
            _visibility,
        }
    }

    fn rendered(&mut self, first_render: bool) {
        // audio elements are in the document from now on
        if first_render {
            self.link.send_message(Msg::Init);
        }
    }

    fn update(&mut self, msg: Self::Message) -> ShouldRender {
        match msg {
            Msg::Init => self.board.init(),
            Msg::Tap(sound) => {
                self.board.release(&sound);
                if let Err(e) = self.board.request_play(&sound) {
                    log::debug!("{}", e);
                }
            }
            Msg::Press(sound) => self.board.press(&sound),
            Msg::Release(sound) => self.board.release(&sound),
            Msg::SelectPage(page) => {
                self.board.navigate_to(page);
            }
            Msg::TrackTap(fraction) => {
                self.board.select_track_position(fraction);
            }
            Msg::TouchStart(point, origin) => self.board.touch_start(point, origin),
            Msg::TouchMove(point) => {
                self.board.touch_move(point);
                return false;
            }
            Msg::TouchEnd(point) => {
                self.board.touch_end(point);
            }
            Msg::TouchCancel => self.board.touch_cancel(),
            Msg::PlayResolved(sound, token) => self.board.play_resolved(&sound, token),
            Msg::PlayRejected(sound, token, reason) => {
                self.board.play_rejected(&sound, token, &reason)
            }
            Msg::Started(sound) => self.board.sound_started(&sound),
            Msg::Ended(sound) => self.board.sound_ended(&sound),
            Msg::MediaFailed(sound, reason) => self.board.sound_failed(&sound, &reason),
            Msg::Ready(sound) => {
                log::debug!("sound {} ready to play", sound);
                return false;
            }
            Msg::Timeout(timer, task) => {
                if !self.board.host_mut().finish_timer(timer) {
                    return false;
                }
                self.board.fire(task);
            }
            Msg::VisibilityChanged(hidden) => self.board.visibility_changed(hidden),
            Msg::CloseNotice => self.board.host_mut().close_notice(),
            Msg::Ignore => return false,
        }
        true
    }

    fn change(&mut self, _: Self::Properties) -> ShouldRender {
        false
    }

    fn view(&self) -> Html {
        html! {
            <main class="soundboard">
                <h1>{ &self.board.board().title }</h1>
                <div class="board"
                     ontouchstart=self.link.callback(|event: TouchEvent| {
                         match first_touch(&event.touches()) {
                             Some(point) => Msg::TouchStart(point, touch_origin(&event)),
                             None => Msg::Ignore,
                         }
                     })
                     ontouchmove=self.link.callback(|event: TouchEvent| {
                         match first_touch(&event.touches()) {
                             Some(point) => Msg::TouchMove(point),
                             None => Msg::Ignore,
                         }
                     })
                     ontouchend=self.link.callback(|event: TouchEvent| {
                         Msg::TouchEnd(first_touch(&event.changed_touches()))
                     })
                     ontouchcancel=self.link.callback(|_: TouchEvent| Msg::TouchCancel)>
                {
                    for self.board.board().pages.iter().enumerate().map(|(idx, page)| {
                        self.view_page(idx + 1, page)
                    })
                }
                </div>
                { self.view_nav() }
                { self.view_audio_bank() }
                { match self.board.host().notice() {
                    Some(message) => html! {
                        <NoticeBox
                            message=message.to_owned()
                            on_close=self.link.callback(|_| Msg::CloseNotice) />
                    },
                    None => html! {},
                }}
            </main>
        }
    }
}

#[wasm_bindgen]
pub fn run_app() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    pwa::register_service_worker("/sw.js");
    yew::start_app::<App>();
    Ok(())
}
