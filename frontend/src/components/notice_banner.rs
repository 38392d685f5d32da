use yew::prelude::*;
use web_sys::MouseEvent;

#[derive(Properties, PartialEq)]
pub struct NoticeBannerProps {
    pub message: Option<String>,
    pub on_dismiss: Callback<()>,
}

/// Dismissible error line above the filters; renders nothing without a message
#[function_component(NoticeBanner)]
pub fn notice_banner(props: &NoticeBannerProps) -> Html {
    let Some(message) = props.message.clone() else {
        return html! {};
    };

    let onclick = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(()))
    };

    html! {
        <div class="error-message" role="alert">
            <span>{ message }</span>
            <button type="button" class="close-button" aria-label="Dismiss" {onclick}>
                {"×"}
            </button>
        </div>
    }
}
