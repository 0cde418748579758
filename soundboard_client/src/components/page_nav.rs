use web_sys::MouseEvent;
use yew::{html, Callback, Component, ComponentLink, Html, Properties, ShouldRender};

use crate::utils::click_fraction;

pub enum Msg {
    Select(usize),
    Track(f64),
}

#[derive(Clone, Properties)]
pub struct Props {
    /// Classes of each page dot, first page first
    pub indicators: Vec<Vec<&'static str>>,
    pub current: usize,
    pub on_select: Callback<usize>,
    pub on_track: Callback<f64>,
}

/// Page dots and the slider track under the board.
pub struct PageNav {
    link: ComponentLink<Self>,
    props: Props,
}

impl Component for PageNav {
    type Message = Msg;
    type Properties = Props;

    fn create(props: Self::Properties, link: ComponentLink<Self>) -> Self {
        PageNav { link, props }
    }

    fn update(&mut self, msg: Self::Message) -> ShouldRender {
        match msg {
            Msg::Select(page) => self.props.on_select.emit(page),
            Msg::Track(fraction) => self.props.on_track.emit(fraction),
        }
        false
    }

    fn change(&mut self, props: Self::Properties) -> ShouldRender {
        self.props = props;
        true
    }

    fn view(&self) -> Html {
        let count = self.props.indicators.len().max(1);
        let thumb_style = format!(
            "width: {}%; left: {}%",
            100.0 / count as f64,
            100.0 * (self.props.current.saturating_sub(1)) as f64 / count as f64
        );
        html! {
            <nav class="page-nav">
                <div class="page-dots">
                {
                    for self.props.indicators.iter().enumerate().map(|(idx, classes)| {
                        let page = idx + 1;
                        html! {
                            <button class=classes.clone()
                                    title=format!("{}", page)
                                    onclick=self.link.callback(move |_| Msg::Select(page))></button>
                        }
                    })
                }
                </div>
                <div class="slider-track"
                     onclick=self.link.callback(|event: MouseEvent| Msg::Track(click_fraction(&event)))>
                    <div class="slider-thumb" style=thumb_style></div>
                </div>
            </nav>
        }
    }
}
