use std::rc::Rc;

use gloo::timers::callback::Interval;
use yew::prelude::*;

use super::{
    golden_apple_notification::GoldenAppleNotification, loading_overlay::LoadingOverlay,
    snake_view::SnakeView, transaction_card::TransactionCard,
};
use crate::config::ViewConfig;
use crate::error::FeedError;
use crate::feed::{StateFeed, WebSocketFeed};
use crate::model::SnakeState;
use crate::util::{clog, now_secs, set_debug_log};

/// What the page knows about the remote world.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedState {
    pub world: Option<Rc<SnakeState>>,
    /// Cleared by the first snapshot or the first error.
    pub loading: bool,
    pub error: Option<String>,
    /// Golden apple tx the user closed; a new spawn shows again.
    pub dismissed_tx: Option<String>,
}

pub enum FeedAction {
    Snapshot(SnakeState),
    Failed(FeedError),
    DismissGolden,
}

impl Reducible for FeedState {
    type Action = FeedAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            FeedAction::Snapshot(state) => {
                next.world = Some(Rc::new(state));
                next.loading = false;
                next.error = None;
            }
            // last good world stays on screen
            FeedAction::Failed(err) => {
                next.loading = false;
                next.error = Some(err.to_string());
            }
            FeedAction::DismissGolden => {
                next.dismissed_tx = next
                    .world
                    .as_ref()
                    .and_then(|w| w.golden_spawn())
                    .map(|s| s.tx_id.clone());
            }
        }
        Rc::new(next)
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| {
        let cfg = ViewConfig::load();
        set_debug_log(cfg.debug_log);
        cfg
    });
    let feed = use_reducer(|| FeedState {
        loading: true,
        ..Default::default()
    });
    let now = use_state(now_secs);

    // Feed subscription lives as long as the page
    {
        let feed = feed.clone();
        let url = config.feed_url.clone();
        use_effect_with((), move |_| {
            clog(&format!("subscribing to {url}"));
            let on_snapshot = {
                let feed = feed.clone();
                Rc::new(move |state: SnakeState| feed.dispatch(FeedAction::Snapshot(state)))
            };
            let on_error = Rc::new(move |err: FeedError| {
                gloo::console::error!(format!("feed: {err}"));
                feed.dispatch(FeedAction::Failed(err));
            });
            let subscription = WebSocketFeed::new(url).subscribe(on_snapshot, on_error);
            move || drop(subscription)
        });
    }
    // Relative times on the transaction card
    {
        let now = now.clone();
        use_effect_with((), move |_| {
            let tick = Interval::new(1_000, move || now.set(now_secs()));
            move || drop(tick)
        });
    }

    let world = feed.world.clone();
    let golden = world
        .as_ref()
        .and_then(|w| w.golden_spawn())
        .filter(|s| feed.dismissed_tx.as_deref() != Some(s.tx_id.as_str()))
        .cloned();
    let transactions = world
        .as_ref()
        .map(|w| w.recent_transactions())
        .unwrap_or_default();
    let on_close = {
        let feed = feed.clone();
        Callback::from(move |_| feed.dispatch(FeedAction::DismissGolden))
    };

    html! {
        <div style="position:fixed; inset:0; overflow:hidden; background:#fff;">
            <SnakeView world={world} config={config.clone()} />
            <div style="position:absolute; top:16px; left:16px; z-index:10;">
                <TransactionCard
                    transactions={transactions}
                    explorer_url={config.explorer_url.clone()}
                    now_secs={*now}
                    error={feed.error.clone()}
                />
            </div>
            { match golden {
                Some(spawn) => html! {
                    <div style="position:relative; z-index:20;">
                        <GoldenAppleNotification
                            spawn={spawn}
                            explorer_url={config.explorer_url.clone()}
                            on_close={on_close}
                        />
                    </div>
                },
                None => html! {},
            } }
            <LoadingOverlay show={feed.loading} />
        </div>
    }
}
