use yew::{html, Callback, Component, ComponentLink, Html, Properties, ShouldRender};

pub enum Msg {
    Close,
}

#[derive(Clone, Properties)]
pub struct Props {
    pub message: String,
    pub on_close: Callback<()>,
}

/// Modal error message, dismissed with its button.
pub struct NoticeBox {
    link: ComponentLink<Self>,
    message: String,
    on_close: Callback<()>,
}

impl Component for NoticeBox {
    type Message = Msg;
    type Properties = Props;

    fn create(props: Self::Properties, link: ComponentLink<Self>) -> Self {
        NoticeBox {
            link,
            message: props.message,
            on_close: props.on_close,
        }
    }

    fn update(&mut self, msg: Self::Message) -> ShouldRender {
        match msg {
            Msg::Close => self.on_close.emit(()),
        }
        false
    }

    fn change(&mut self, props: Self::Properties) -> ShouldRender {
        self.on_close = props.on_close;
        if self.message != props.message {
            self.message = props.message;
            true
        } else {
            false
        }
    }

    fn view(&self) -> Html {
        html! {
          <div class="notify-wrapper">
            <div class="error notify">
                <div>
                { &self.message }
                </div>
                <div class="toolbar">
                    <button class="btn-error" onclick=self.link.callback(|_| Msg::Close)>{"Ok"}</button>
                </div>
            </div>
          </div>
        }
    }
}
