//! Stats Bar Component
//!
//! Total / completed / pending counters, animated towards each new value.

use leptos::prelude::*;

use crate::config::COUNTER_ANIMATION_MS;
use crate::context::AppContext;
use crate::counter::CounterTween;
use crate::list::TodoStats;
use crate::store::AppStateStoreFields;

#[component]
pub fn StatsBar() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = ctx.store;

    let stats = Memo::new(move |_| TodoStats::of(&store.todos().read()));

    view! {
        <div class="stats">
            <div class="stat-item total">
                <AnimatedCounter value=Signal::derive(move || stats.get().total) />
                <span class="stat-label">"Total"</span>
            </div>
            <div class="stat-item completed">
                <AnimatedCounter value=Signal::derive(move || stats.get().completed) />
                <span class="stat-label">"Done"</span>
            </div>
            <div class="stat-item pending">
                <AnimatedCounter value=Signal::derive(move || stats.get().pending) />
                <span class="stat-label">"Pending"</span>
            </div>
        </div>
    }
}

/// Integer that eases from the displayed value to `value` on every change
#[component]
pub fn AnimatedCounter(#[prop(into)] value: Signal<usize>) -> impl IntoView {
    let displayed = RwSignal::new(0i64);
    // Bumped per tween so a newer one cancels frames of the older
    let generation = StoredValue::new(0u64);

    Effect::new(move |_| {
        let target = value.get() as i64;
        let tween = CounterTween::new(displayed.get_untracked(), target, COUNTER_ANIMATION_MS);
        if tween.is_noop() {
            return;
        }
        generation.update_value(|g| *g += 1);
        animate(tween, js_sys::Date::now(), generation.get_value(), displayed, generation);
    });

    view! { <span class="stat-number">{move || displayed.get()}</span> }
}

fn animate(
    tween: CounterTween,
    started_at: f64,
    run: u64,
    displayed: RwSignal<i64>,
    generation: StoredValue<u64>,
) {
    request_animation_frame(move || {
        if generation.try_get_value() != Some(run) {
            return;
        }
        let elapsed = js_sys::Date::now() - started_at;
        displayed.set(tween.value_at(elapsed));
        if !tween.is_finished(elapsed) {
            animate(tween, started_at, run, displayed, generation);
        }
    });
}
