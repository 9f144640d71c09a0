use yew::prelude::*;

use crate::model::Transaction;
use crate::util::{explorer_link, short_tx_id, time_ago};

#[derive(Properties, PartialEq, Clone)]
pub struct TransactionCardProps {
    /// Newest first.
    pub transactions: Vec<Transaction>,
    pub explorer_url: String,
    pub now_secs: i64,
    #[prop_or_default]
    pub error: Option<String>,
}

#[function_component]
pub fn TransactionCard(props: &TransactionCardProps) -> Html {
    let rows = props.transactions.iter().map(|tx| {
        html! {
            <li key={tx.tx_id.clone()} style="display:flex; justify-content:space-between; gap:12px; padding:4px 0; border-bottom:1px solid #e5e7eb; font-size:13px;">
                <a href={explorer_link(&props.explorer_url, &tx.tx_id)} target="_blank" rel="noopener noreferrer"
                    style="font-family:monospace; color:#2563eb;">
                    { short_tx_id(&tx.tx_id) }
                </a>
                <span style="font-variant-numeric:tabular-nums;">{ format!("{} SOL", tx.amount) }</span>
                <span style="opacity:0.7;">{ time_ago(props.now_secs, tx.time) }</span>
            </li>
        }
    });
    html! {
        <div style="background:rgba(255,255,255,0.95); border:1px solid #d1d5db; border-radius:8px; padding:10px 14px; width:320px; max-height:280px; overflow-y:auto; box-shadow:0 4px 12px rgba(0,0,0,0.08);">
            <div style="font-weight:600; margin-bottom:6px;">{"Recent Transactions"}</div>
            { match &props.error {
                Some(err) => html! { <div style="color:#b91c1c; font-size:12px;">{ err.clone() }</div> },
                None => html! {},
            } }
            { if props.transactions.is_empty() {
                html! { <div style="font-size:12px; opacity:0.6;">{"No transactions yet"}</div> }
            } else {
                html! { <ul style="list-style:none; margin:0; padding:0;">{ for rows }</ul> }
            } }
        </div>
    }
}
