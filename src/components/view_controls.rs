use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ViewControlsProps {
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    pub on_locate: Callback<()>,
    /// Locate needs a snake to centre on.
    pub can_locate: bool,
}

#[function_component(ViewControls)]
pub fn view_controls(props: &ViewControlsProps) -> Html {
    let zi = {
        let cb = props.on_zoom_in.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let zo = {
        let cb = props.on_zoom_out.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let locate = {
        let cb = props.on_locate.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <>
            <div style="position:absolute; right:12px; bottom:20px; z-index:9999; display:flex; flex-direction:column; gap:6px;">
                <button onclick={zi} style="width:36px; height:36px; border-radius:8px; background:#000; color:#fff; font-size:18px;">{"+"}</button>
                <button onclick={zo} style="width:36px; height:36px; border-radius:8px; background:#000; color:#fff; font-size:18px;">{"-"}</button>
            </div>
            <div style="position:absolute; bottom:20px; left:50%; transform:translateX(-50%); z-index:9999;">
                <button
                    onclick={locate}
                    disabled={!props.can_locate}
                    style="background:#000; color:#fff; border-radius:8px; padding:15px 25px; cursor:pointer; font-size:16px;"
                >
                    {"Locate Snake"}
                </button>
            </div>
        </>
    }
}
