use wasm_bindgen::JsValue;
use yew::prelude::*;

use crate::model::GoldenAppleSpawn;
use crate::util::{explorer_link, short_tx_id};

#[derive(Properties, PartialEq, Clone)]
pub struct GoldenAppleNotificationProps {
    pub spawn: GoldenAppleSpawn,
    pub explorer_url: String,
    pub on_close: Callback<()>,
}

fn local_time(unix_secs: i64) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(unix_secs as f64 * 1000.0));
    String::from(date.to_locale_string("default", &JsValue::UNDEFINED))
}

#[function_component]
pub fn GoldenAppleNotification(props: &GoldenAppleNotificationProps) -> Html {
    let close = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let row_style = "display:flex; justify-content:space-between; align-items:center; font-size:14px; margin:4px 0;";
    let spawn = &props.spawn;
    html! {
        <div style="position:fixed; bottom:16px; right:64px; width:320px; background:linear-gradient(to right, #fef9c3, #fef08a); border-radius:8px; box-shadow:0 6px 18px rgba(0,0,0,0.2); overflow:hidden;">
            <div style="padding:16px;">
                <div style="display:flex; justify-content:space-between; align-items:flex-start; margin-bottom:12px;">
                    <h3 style="margin:0; font-size:14px; font-weight:600; color:#713f12;">{"Golden Apple Spawned!"}</h3>
                    <button onclick={close} style="background:none; border:none; color:#a16207; cursor:pointer;">{"✕"}</button>
                </div>
                <div style={row_style}>
                    <span style="color:#854d0e;">{"Transaction"}</span>
                    <a href={explorer_link(&props.explorer_url, &spawn.tx_id)} target="_blank" rel="noopener noreferrer"
                        style="font-family:monospace; color:#2563eb;">
                        { short_tx_id(&spawn.tx_id) }
                    </a>
                </div>
                <div style={row_style}>
                    <span style="color:#854d0e;">{"Amount"}</span>
                    <span style="font-family:monospace; color:#713f12;">{ format!("{} SOL", spawn.amount) }</span>
                </div>
                <div style={row_style}>
                    <span style="color:#854d0e;">{"Time"}</span>
                    <span style="color:#713f12;">{ local_time(spawn.time) }</span>
                </div>
            </div>
            <div style="height:4px; background:linear-gradient(to right, #facc15, #eab308);"></div>
        </div>
    }
}
