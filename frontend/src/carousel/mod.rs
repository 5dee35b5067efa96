pub mod track;

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Node, Window};

use crate::config::CarouselConfig;
use crate::error::{UiError, UiResult};
use crate::utils::dom;
use track::{parse_px, Direction, Layout, Motion, Track};

const TRACK_SELECTOR: &str = ".slider-track";
const SLIDE_SELECTOR: &str = ".journey-card";
const CONTAINER_SELECTOR: &str = ".slider-container";
const DOTS_SELECTOR: &str = ".slider-dots";
const PREV_SELECTOR: &str = ".prev-btn";
const NEXT_SELECTOR: &str = ".next-btn";

/// The looping "journey" slider: cloned edges, dots, arrows and autoplay.
pub struct Carousel {
    window: Window,
    track_element: HtmlElement,
    first_slide: HtmlElement,
    dots: Vec<Element>,
    state: RefCell<Track>,
    autoplay: RefCell<Option<Interval>>,
    config: CarouselConfig,
}

impl Carousel {
    /// Builds the carousel from the slides already on the page. Returns
    /// `Ok(None)` when the page has no slider or the slider has no slides.
    pub fn mount(
        window: &Window,
        document: &Document,
        config: &CarouselConfig,
    ) -> UiResult<Option<Rc<Self>>> {
        let Some(track_element) = dom::query::<HtmlElement>(document, TRACK_SELECTOR)? else {
            log::debug!("No slider track on this page");
            return Ok(None);
        };
        let originals = dom::query_all_within::<HtmlElement>(&track_element, SLIDE_SELECTOR)?;
        let Some(state) = Track::new(originals.len()) else {
            log::debug!("Slider track has no slides, carousel disabled");
            return Ok(None);
        };
        let first_slide = originals[0].clone();

        let first_node: &Node = &first_slide;
        for source in state.leading_sources() {
            let copy = clone_slide(&originals[source])?;
            track_element.insert_before(&copy, Some(first_node))?;
        }
        for source in state.trailing_sources() {
            let copy = clone_slide(&originals[source])?;
            track_element.append_child(&copy)?;
        }

        let dots = match dom::query::<Element>(document, DOTS_SELECTOR)? {
            Some(container) => build_dots(document, &container, state.slides())?,
            None => Vec::new(),
        };

        let carousel = Rc::new(Self {
            window: window.clone(),
            track_element,
            first_slide,
            dots,
            state: RefCell::new(state),
            autoplay: RefCell::new(None),
            config: config.clone(),
        });

        carousel.render(Motion::Instant);
        carousel.bind(document)?;
        carousel.start_autoplay();
        log::debug!(
            "Carousel ready with {} slides",
            carousel.state.borrow().slides()
        );
        Ok(Some(carousel))
    }

    pub fn advance(&self, direction: Direction) {
        let motion = self.state.borrow_mut().advance(direction);
        if let Some(motion) = motion {
            self.render(motion);
        }
    }

    pub fn jump_to(&self, real_index: usize) {
        let motion = self.state.borrow_mut().jump_to(real_index);
        if let Some(motion) = motion {
            self.render(motion);
        }
    }

    /// Re-measures and repositions without moving to another slide.
    pub fn resync(&self) {
        let motion = self.state.borrow_mut().resync();
        self.render(motion);
    }

    fn settle(&self) {
        let motion = self.state.borrow_mut().settle();
        if let Some(motion) = motion {
            self.render(motion);
        }
    }

    /// (Re)starts autoplay from a full period.
    pub fn start_autoplay(self: &Rc<Self>) {
        let carousel = Rc::downgrade(self);
        let interval = Interval::new(self.config.autoplay_ms, move || {
            if let Some(carousel) = carousel.upgrade() {
                carousel.advance(Direction::Forward);
            }
        });
        // Replacing the handle drops, and so cancels, the previous interval.
        self.autoplay.replace(Some(interval));
    }

    pub fn stop_autoplay(&self) {
        self.autoplay.borrow_mut().take();
    }

    fn render(&self, motion: Motion) {
        if let Err(e) = self.try_render(motion) {
            log::warn!("Failed to position carousel: {}", e);
        }
    }

    fn try_render(&self, motion: Motion) -> UiResult<()> {
        let layout = self.measure()?;
        let offset = self.state.borrow().offset(&layout, &self.config);
        let transition = match motion {
            Motion::Animated => self.config.transition.as_str(),
            Motion::Instant => "none",
        };
        dom::set_style(&self.track_element, "transition", transition)?;
        dom::set_style(
            &self.track_element,
            "transform",
            &format!("translateX({}px)", offset),
        )?;
        self.update_dots()
    }

    fn measure(&self) -> UiResult<Layout> {
        let gap = self
            .window
            .get_computed_style(&self.track_element)?
            .and_then(|style| style.get_property_value("column-gap").ok())
            .and_then(|value| parse_px(&value))
            .unwrap_or(self.config.gap_fallback_px);
        let wrapper_width = self
            .track_element
            .parent_element()
            .and_then(|parent| parent.dyn_into::<HtmlElement>().ok())
            .map_or(0.0, |parent| f64::from(parent.offset_width()));
        Ok(Layout {
            slide_width: f64::from(self.first_slide.offset_width()),
            gap,
            wrapper_width,
            viewport_width: dom::viewport_width(&self.window)?,
        })
    }

    fn update_dots(&self) -> UiResult<()> {
        let active = self.state.borrow().active_dot();
        for (i, dot) in self.dots.iter().enumerate() {
            if i == active {
                dom::add_class(dot, "active")?;
            } else {
                dom::remove_class(dot, "active")?;
            }
        }
        Ok(())
    }

    fn bind(self: &Rc<Self>, document: &Document) -> UiResult<()> {
        for (i, dot) in self.dots.iter().enumerate() {
            let carousel = self.clone();
            dom::listen::<web_sys::Event, _>(dot, "click", move |_| {
                carousel.jump_to(i);
                carousel.start_autoplay();
            })?;
        }

        for (selector, direction) in [
            (NEXT_SELECTOR, Direction::Forward),
            (PREV_SELECTOR, Direction::Backward),
        ] {
            if let Some(button) = dom::query::<Element>(document, selector)? {
                let carousel = self.clone();
                dom::listen::<web_sys::Event, _>(&button, "click", move |_| {
                    carousel.advance(direction);
                    carousel.start_autoplay();
                })?;
            }
        }

        if let Some(container) = dom::query::<Element>(document, CONTAINER_SELECTOR)? {
            let carousel = self.clone();
            dom::listen::<web_sys::Event, _>(&container, "mouseenter", move |_| {
                carousel.stop_autoplay();
            })?;
            let carousel = self.clone();
            dom::listen::<web_sys::Event, _>(&container, "mouseleave", move |_| {
                carousel.start_autoplay();
            })?;
        }

        let carousel = self.clone();
        dom::listen::<web_sys::Event, _>(&self.track_element, "transitionend", move |event| {
            // Slides run their own hover transitions; only the track's own counts.
            if dom::targets(&event, &carousel.track_element) {
                carousel.settle();
            }
        })?;

        // Widths change with the viewport, and again once images have loaded.
        for event in ["resize", "load"] {
            let carousel = self.clone();
            dom::listen::<web_sys::Event, _>(&self.window, event, move |_| carousel.resync())?;
        }
        Ok(())
    }
}

fn clone_slide(slide: &HtmlElement) -> UiResult<HtmlElement> {
    let copy = slide
        .clone_node_with_deep(true)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| UiError::UnexpectedElement("HtmlElement"))?;
    dom::add_class(&copy, "clone")?;
    copy.set_attribute("aria-hidden", "true")?;
    Ok(copy)
}

fn build_dots(document: &Document, container: &Element, count: usize) -> UiResult<Vec<Element>> {
    (0..count)
        .map(|i| -> UiResult<Element> {
            let dot = document.create_element("div")?;
            dom::add_class(&dot, "dot")?;
            if i == 0 {
                dom::add_class(&dot, "active")?;
            }
            container.append_child(&dot)?;
            Ok(dot)
        })
        .collect()
}
