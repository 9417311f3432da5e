use crate::config::PRICE_FLOOR;
use crate::filter::{FilterState, PricePair};
use crate::navigation::BrowserNavigator;
use crate::range::PriceRange;
use log::warn;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Filter selection initialized once from the page URL.
#[hook]
pub fn use_filter_state() -> UseStateHandle<FilterState> {
    // Read once; later edits stay in memory until applied.
    use_state(|| match FilterState::from_navigator(&BrowserNavigator) {
        Ok(state) => state,
        Err(e) => {
            warn!("{}, starting with an empty filter", e);
            FilterState::default()
        }
    })
}

/// State and callbacks for the two price inputs of a range slider.
#[derive(Clone)]
pub struct PriceRangeInput {
    pub range: PriceRange,
    /// Text currently shown in the lower / upper number fields.
    pub min_text: String,
    pub max_text: String,
    /// Apply raw input text immediately (slider thumbs).
    pub on_min_input: Callback<InputEvent>,
    pub on_max_input: Callback<InputEvent>,
    /// Track typing in the number fields without applying it.
    pub on_min_text: Callback<InputEvent>,
    pub on_max_text: Callback<InputEvent>,
    /// Apply whatever was typed in the number fields.
    pub on_min_commit: Callback<()>,
    pub on_max_commit: Callback<()>,
}

#[derive(Clone, Copy)]
enum Bound {
    Min,
    Max,
}

/// Custom hook binding a [`PriceRange`] to its inputs. Every applied change
/// is reported through `on_change`.
#[hook]
pub fn use_price_range(
    initial: PricePair,
    ceiling: i64,
    on_change: Callback<PricePair>,
) -> PriceRangeInput {
    // Range state plus the raw text of each number field.
    let range_handle = use_state(|| PriceRange::new(initial, PRICE_FLOOR, ceiling));
    let (seed_min, seed_max) = (range_handle.min_price(), range_handle.max_price());
    let min_text_handle = use_state(move || seed_min.to_string());
    let max_text_handle = use_state(move || seed_max.to_string());

    let apply = {
        // Clone handles for the closure.
        let range_handle = range_handle.clone();
        let min_text_handle = min_text_handle.clone();
        let max_text_handle = max_text_handle.clone();
        let on_change = on_change.clone();
        Callback::from(move |(bound, text): (Bound, String)| {
            let mut range = (*range_handle).clone();
            let price = match bound {
                Bound::Min => range.min_trigger(&text),
                Bound::Max => range.max_trigger(&text),
            };
            // Canonical text, the typed value may have been clamped
            min_text_handle.set(range.min_price().to_string());
            max_text_handle.set(range.max_price().to_string());
            range_handle.set(range);
            on_change.emit(price);
        })
    };

    // Current value of the input that fired the event.
    let input_value = |e: InputEvent| -> String {
        let input: HtmlInputElement = e.target_unchecked_into();
        input.value()
    };

    // Slider thumbs apply on every move.
    let on_min_input = apply.reform(move |e: InputEvent| (Bound::Min, input_value(e)));
    let on_max_input = apply.reform(move |e: InputEvent| (Bound::Max, input_value(e)));

    // Number fields only track their text until committed.
    let on_min_text = {
        let min_text_handle = min_text_handle.clone();
        Callback::from(move |e: InputEvent| min_text_handle.set(input_value(e)))
    };
    let on_max_text = {
        let max_text_handle = max_text_handle.clone();
        Callback::from(move |e: InputEvent| max_text_handle.set(input_value(e)))
    };

    let on_min_commit = {
        // Read the text handle at commit time, not at render time.
        let min_text_handle = min_text_handle.clone();
        apply.reform(move |_: ()| (Bound::Min, (*min_text_handle).clone()))
    };
    let on_max_commit = {
        let max_text_handle = max_text_handle.clone();
        apply.reform(move |_: ()| (Bound::Max, (*max_text_handle).clone()))
    };

    // Keep the ceiling in sync if the page reports a new highest price
    {
        let range_handle = range_handle.clone();
        let max_text_handle = max_text_handle.clone();
        use_effect_with(ceiling, move |&ceiling| {
            if range_handle.ceiling() != ceiling {
                let mut range = (*range_handle).clone();
                range.set_ceiling(ceiling);
                max_text_handle.set(range.max_price().to_string());
                range_handle.set(range);
            }
            || ()
        });
    }

    PriceRangeInput {
        // Snapshot the handles for this render.
        range: (*range_handle).clone(),
        min_text: (*min_text_handle).clone(),
        max_text: (*max_text_handle).clone(),
        on_min_input,
        on_max_input,
        on_min_text,
        on_max_text,
        on_min_commit,
        on_max_commit,
    }
}
