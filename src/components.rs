//! Yew components for the storefront widgets.
//!
//! Each component owns one of the state machines from this crate and only
//! translates DOM events into calls on it.

use crate::carousel::{DynamicCarousel, StaticCarousel};
use crate::config::FilterOption;
use crate::filter::{FilterKind, PricePair, SortOption, TokenSet};
use crate::hooks::{use_filter_state, use_price_range};
use crate::navigation::{BrowserNavigator, Navigator, Redirector};
use crate::query::page_links;
use crate::view::DomView;
use crate::zoom::{zoom_in, zoom_out, Bounds};
use log::{error, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlSelectElement};
use yew::prelude::*;

/// Filter panel: color and size toggles, price range, sorting, apply/clear.
#[derive(Properties, PartialEq)]
pub struct FilterPanelProps {
    pub colors: Vec<FilterOption>,
    pub sizes: Vec<FilterOption>,
    /// Slider ceiling, the highest price on the page.
    pub max_price: i64,
}

#[function_component(FilterPanel)]
pub fn filter_panel(props: &FilterPanelProps) -> Html {
    let filter = use_filter_state();
    let known_sorting = filter.sort_option();

    let on_toggle = {
        // Clone the handle for the closure.
        let filter = filter.clone();
        Callback::from(move |(kind, token): (FilterKind, String)| {
            let mut state = (*filter).clone();
            state.toggle_filter(kind, &token);
            filter.set(state);
        })
    };

    // The slider reports every applied change back into the selection.
    let on_price_change = {
        let filter = filter.clone();
        Callback::from(move |price: PricePair| {
            let mut state = (*filter).clone();
            state.set_price(price);
            filter.set(state);
        })
    };

    let on_sort_change = {
        let filter = filter.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut state = (*filter).clone();
            state.set_sorting(select.value());
            filter.set(state);
        })
    };

    // Navigation leaves the page, only failures come back here.
    let on_apply = {
        let filter = filter.clone();
        Callback::from(move |_: MouseEvent| {
            if let Err(e) = filter.apply_and_navigate(&Redirector::new(BrowserNavigator)) {
                error!("Could not apply filters: {}", e);
            }
        })
    };

    let on_clear = {
        let filter = filter.clone();
        Callback::from(move |_: MouseEvent| {
            if let Err(e) = filter.reset_and_navigate(&Redirector::new(BrowserNavigator)) {
                error!("Could not clear filters: {}", e);
            }
        })
    };

    html! {
        <div class="filters">
            <div class="filter-group">
                <h4>{ "Color" }</h4>
                { render_options(FilterKind::Color, &props.colors, filter.tokens(FilterKind::Color), &on_toggle) }
            </div>
            <div class="filter-group">
                <h4>{ "Size" }</h4>
                { render_options(FilterKind::Size, &props.sizes, filter.tokens(FilterKind::Size), &on_toggle) }
            </div>
            <div class="filter-group">
                <h4>{ "Price" }</h4>
                <PriceRangeSlider
                    initial={filter.price}
                    ceiling={props.max_price}
                    on_change={on_price_change}
                />
            </div>
            <div class="filter-group">
                <label for="sorting">{ "Sort by:" }</label>
                <select id="sorting" onchange={on_sort_change}>
                    // Unset or unknown sorting keeps the server's default order
                    <option value="" selected={known_sorting.is_none()}>{ "default" }</option>
                    { SortOption::ALL.iter().map(|option| {
                        html! {
                            <option
                                value={option.as_param()}
                                selected={known_sorting == Some(*option)}
                            >
                                { option.label() }
                            </option>
                        }
                    }).collect::<Html>() }
                </select>
            </div>
            <div class="filter-actions">
                <button class="btn-primary" onclick={on_apply}>{ "Apply" }</button>
                <button class="btn-secondary" onclick={on_clear}>{ "Clear all" }</button>
            </div>
        </div>
    }
}

/// Renders one toggle button per option, highlighting the selected ones.
fn render_options(
    kind: FilterKind,
    options: &[FilterOption],
    selected: &TokenSet,
    on_toggle: &Callback<(FilterKind, String)>,
) -> Html {
    options
        .iter()
        .map(|option| {
            let is_selected = selected.contains(&option.value);
            let token = option.value.clone();
            let onclick = on_toggle.reform(move |_: MouseEvent| (kind, token.clone()));
            let swatch = option
                .hex_code
                .as_ref()
                .map(|hex| format!("background-color: {};", hex));
            html! {
                <button
                    class={classes!("filter-option", is_selected.then_some("selected"))}
                    title={option.label.clone()}
                    {onclick}
                >
                    if let Some(style) = swatch {
                        <span class="swatch" {style}></span>
                    }
                    { &option.label }
                </button>
            }
        })
        .collect::<Html>()
}

/// Two-thumb price slider with matching number fields.
#[derive(Properties, PartialEq)]
pub struct PriceRangeSliderProps {
    pub initial: PricePair,
    pub ceiling: i64,
    pub on_change: Callback<PricePair>,
}

#[function_component(PriceRangeSlider)]
pub fn price_range_slider(props: &PriceRangeSliderProps) -> Html {
    let input = use_price_range(props.initial, props.ceiling, props.on_change.clone());
    let range = &input.range;
    let fill_style = format!("left: {}%; right: {}%;", range.min_thumb(), range.max_thumb());

    html! {
        <div class="price-range">
            <div class="price-range-track">
                <input type="range"
                    class="thumb thumb-min"
                    min={range.floor().to_string()}
                    max={range.ceiling().to_string()}
                    step="1"
                    value={range.min_price().to_string()}
                    oninput={input.on_min_input.clone()}
                />
                <input type="range"
                    class="thumb thumb-max"
                    min={range.floor().to_string()}
                    max={range.ceiling().to_string()}
                    step="1"
                    value={range.max_price().to_string()}
                    oninput={input.on_max_input.clone()}
                />
                <div class="price-range-bar">
                    <div class="price-range-fill" style={fill_style}></div>
                </div>
            </div>
            <div class="price-range-fields">
                <input type="number"
                    class="price-min"
                    value={input.min_text.clone()}
                    oninput={input.on_min_text.clone()}
                    onchange={input.on_min_commit.reform(|_: Event| ())}
                />
                <span>{ "-" }</span>
                <input type="number"
                    class="price-max"
                    value={input.max_text.clone()}
                    oninput={input.on_max_text.clone()}
                    onchange={input.on_max_commit.reform(|_: Event| ())}
                />
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CarouselProps {
    pub images: Vec<String>,
}

/// Width of the first image in the strip, if any.
fn first_item_width(container: &Element) -> Option<f64> {
    container
        .query_selector("img")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|img| img.offset_width() as f64)
}

/// Re-read the container geometry; the page may have been resized.
fn measure(carousel: &mut StaticCarousel, container_ref: &NodeRef) {
    if let Some(container) = container_ref.cast::<Element>() {
        carousel.update_max_offset(
            container.scroll_width() as f64,
            container.client_width() as f64,
        );
        carousel.update_item_width(first_item_width(&container));
    }
}

#[function_component(StaticCarouselView)]
pub fn static_carousel(props: &CarouselProps) -> Html {
    let container_ref = use_node_ref();
    let strip_ref = use_node_ref();
    let carousel = use_state(StaticCarousel::default);

    // Measure once the images are in the DOM, and again when they change
    {
        let carousel = carousel.clone();
        let container_ref = container_ref.clone();
        use_effect_with(props.images.len(), move |_| {
            let mut next = (*carousel).clone();
            measure(&mut next, &container_ref);
            next.reset();
            carousel.set(next);
            || ()
        });
    }

    // Move the strip whenever the offset changes
    {
        let carousel = carousel.clone();
        let strip_ref = strip_ref.clone();
        use_effect_with(carousel.offset(), move |_| {
            if let Some(strip) = strip_ref.cast::<HtmlElement>() {
                carousel.present(&mut DomView::new(strip));
            }
            || ()
        });
    }

    // Paging re-measures first; the page may have been resized.
    let page = |step: fn(&mut StaticCarousel)| {
        let carousel = carousel.clone();
        let container_ref = container_ref.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*carousel).clone();
            measure(&mut next, &container_ref);
            step(&mut next);
            carousel.set(next);
        })
    };

    html! {
        <div class="static-carousel">
            <button class="carousel-prev"
                disabled={!carousel.can_decrease()}
                onclick={page(StaticCarousel::decrease)}
            >{ "‹" }</button>
            <div class="carousel-viewport" ref={container_ref.clone()}>
                <div class="carousel-strip" ref={strip_ref}>
                    { props.images.iter().map(|src| html! {
                        <img src={src.clone()} loading="lazy" />
                    }).collect::<Html>() }
                </div>
            </div>
            <button class="carousel-next"
                disabled={!carousel.can_increase()}
                onclick={page(StaticCarousel::increase)}
            >{ "›" }</button>
        </div>
    }
}

#[function_component(DynamicCarouselView)]
pub fn dynamic_carousel(props: &CarouselProps) -> Html {
    let main_ref = use_node_ref();
    let images = props.images.clone();
    let carousel = use_state(move || DynamicCarousel::new(images));

    // Swap the main image when the index changes
    {
        let carousel = carousel.clone();
        let main_ref = main_ref.clone();
        use_effect_with(carousel.current(), move |_| {
            if let Some(img) = main_ref.cast::<HtmlElement>() {
                carousel.present(&mut DomView::new(img));
            }
            || ()
        });
    }

    let step = |mv: fn(&mut DynamicCarousel)| {
        let carousel = carousel.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*carousel).clone();
            mv(&mut next);
            carousel.set(next);
        })
    };

    html! {
        <div class="dynamic-carousel">
            <div class="carousel-main">
                <button class="carousel-prev" onclick={step(DynamicCarousel::previous)}>{ "‹" }</button>
                <img class="carousel-image" ref={main_ref} />
                <button class="carousel-next" onclick={step(DynamicCarousel::next)}>{ "›" }</button>
            </div>
            <div class="carousel-thumbnails">
                { carousel.images().iter().enumerate().map(|(idx, src)| {
                    let onclick = {
                        let carousel = carousel.clone();
                        Callback::from(move |_: MouseEvent| {
                            let mut next = (*carousel).clone();
                            if next.pick(idx) {
                                carousel.set(next);
                            }
                        })
                    };
                    html! {
                        <img
                            class={classes!("thumbnail", (idx == carousel.current()).then_some("active"))}
                            src={src.clone()}
                            {onclick}
                        />
                    }
                }).collect::<Html>() }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ZoomImageProps {
    pub src: String,
    #[prop_or_default]
    pub alt: String,
}

/// Product image magnified around the pointer while hovered.
#[function_component(ZoomImage)]
pub fn zoom_image(props: &ZoomImageProps) -> Html {
    let img_ref = use_node_ref();

    // Enter and move share a handler: re-anchor the zoom at the pointer.
    let on_pointer = {
        let img_ref = img_ref.clone();
        Callback::from(move |e: MouseEvent| {
            let hovered = e
                .current_target()
                .and_then(|target| target.dyn_into::<Element>().ok());
            if let (Some(img), Some(hovered)) = (img_ref.cast::<HtmlElement>(), hovered) {
                let rect = hovered.get_bounding_client_rect();
                let bounds = Bounds {
                    left: rect.left(),
                    top: rect.top(),
                };
                zoom_in(e.client_x() as f64, e.client_y() as f64, bounds)
                    .apply(&mut DomView::new(img));
            }
        })
    };

    let on_leave = {
        let img_ref = img_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(img) = img_ref.cast::<HtmlElement>() {
                zoom_out().apply(&mut DomView::new(img));
            }
        })
    };

    html! {
        <div class="zoom-container"
            onmouseenter={on_pointer.clone()}
            onmousemove={on_pointer}
            onmouseleave={on_leave}
        >
            <img class="zoom-image" ref={img_ref} src={props.src.clone()} alt={props.alt.clone()} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PagerProps {
    pub page_count: usize,
}

/// Numbered links to the listing's pages, keeping the active filters.
#[function_component(Pager)]
pub fn pager(props: &PagerProps) -> Html {
    let links = match BrowserNavigator.location() {
        Ok(current) => page_links(&current, props.page_count),
        Err(e) => {
            warn!("{}, not rendering the pager", e);
            Vec::new()
        }
    };

    html! {
        <nav class="pager">
            { links.into_iter().map(|link| html! {
                <a
                    class={classes!("page-link", link.current.then_some("current"))}
                    href={link.href}
                >
                    { link.page.to_string() }
                </a>
            }).collect::<Html>() }
        </nav>
    }
}
