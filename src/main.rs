//! Entry point: mounts each widget into its host element on the server-rendered page.

use log::info;
use storefront_widgets::components::{
    CarouselProps, DynamicCarouselView, FilterPanel, FilterPanelProps, Pager, PagerProps,
    StaticCarouselView, ZoomImage, ZoomImageProps,
};
use storefront_widgets::config::{
    PageConfig, DYNAMIC_CAROUSEL_HOST, FILTER_PANEL_HOST, PAGER_HOST, STATIC_CAROUSEL_HOST,
    ZOOM_HOST,
};
use web_sys::Element;

fn host(id: &str) -> Option<Element> {
    let element = gloo_utils::document().get_element_by_id(id);
    if element.is_none() {
        info!("No #{} on this page, skipping", id);
    }
    element
}

/// Entry point: reads the page config and renders every widget that has a host.
fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();
    let config = PageConfig::load();

    if let Some(root) = host(FILTER_PANEL_HOST) {
        let props = FilterPanelProps {
            colors: config.colors.clone(),
            sizes: config.sizes.clone(),
            max_price: config.price_ceiling(),
        };
        yew::Renderer::<FilterPanel>::with_root_and_props(root, props).render();
    }

    if let Some(root) = host(STATIC_CAROUSEL_HOST) {
        let props = CarouselProps {
            images: config.carousel_images.clone(),
        };
        yew::Renderer::<StaticCarouselView>::with_root_and_props(root, props).render();
    }

    if let Some(root) = host(DYNAMIC_CAROUSEL_HOST) {
        let props = CarouselProps {
            images: config.carousel_images.clone(),
        };
        yew::Renderer::<DynamicCarouselView>::with_root_and_props(root, props).render();
    }

    if let Some(root) = host(PAGER_HOST) {
        let props = PagerProps {
            page_count: config.page_count,
        };
        yew::Renderer::<Pager>::with_root_and_props(root, props).render();
    }

    if let (Some(root), Some(src)) = (host(ZOOM_HOST), config.zoom_image.clone()) {
        let props = ZoomImageProps {
            src,
            alt: String::new(),
        };
        yew::Renderer::<ZoomImage>::with_root_and_props(root, props).render();
    }
}
