use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LoadingOverlayProps {
    pub show: bool,
}

#[function_component]
pub fn LoadingOverlay(props: &LoadingOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    html! {
        <div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(255,255,255,0.5); z-index:50;">
            <div style="color:#4b5563; display:flex; align-items:center; gap:8px;">{"Loading..."}</div>
        </div>
    }
}
