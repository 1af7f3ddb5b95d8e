//! Animated "neural network" canvas background.
//!
//! A fixed set of drifting nodes bounces around the viewport; pairs closer
//! than the link distance are joined by lines that fade with distance. The
//! simulation is plain data so it can be stepped and checked off-browser.

use std::f64::consts::TAU;

use folio_theme::ColorMode;
use rand::Rng;

use crate::config::NeuralConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Phase driving the radius and halo oscillation
    pub pulse: f64,
}

/// A pair of nodes within link distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    /// `1.0` when touching, approaching `0.0` at the link distance
    pub strength: f64,
}

#[derive(Debug, Clone)]
pub struct Network {
    nodes: Vec<Node>,
    width: f64,
    height: f64,
    link_distance: f64,
    pulse_speed: f64,
}

impl Network {
    /// Scatter `count` nodes over a `width` x `height` area.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        count: usize,
        width: f64,
        height: f64,
        config: &NeuralConfig,
    ) -> Self {
        let nodes = (0..count)
            .map(|_| Node {
                x: rng.gen::<f64>() * width,
                y: rng.gen::<f64>() * height,
                vx: (rng.gen::<f64>() - 0.5) * config.max_speed,
                vy: (rng.gen::<f64>() - 0.5) * config.max_speed,
                pulse: rng.gen::<f64>() * TAU,
            })
            .collect();

        Self::from_nodes(nodes, width, height, config)
    }

    pub fn from_nodes(nodes: Vec<Node>, width: f64, height: f64, config: &NeuralConfig) -> Self {
        Self {
            nodes,
            width,
            height,
            link_distance: config.link_distance,
            pulse_speed: config.pulse_speed,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Advance one frame: move, bounce off the edges, clamp, pulse.
    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for node in &mut self.nodes {
            node.x += node.vx;
            node.y += node.vy;
            node.pulse += self.pulse_speed;

            if node.x < 0.0 || node.x > width {
                node.vx = -node.vx;
            }
            if node.y < 0.0 || node.y > height {
                node.vy = -node.vy;
            }

            node.x = node.x.clamp(0.0, width.max(0.0));
            node.y = node.y.clamp(0.0, height.max(0.0));
        }
    }

    /// All pairs closer than the link distance, `from < to`.
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        for (i, a) in self.nodes.iter().enumerate() {
            for (offset, b) in self.nodes[i + 1..].iter().enumerate() {
                let distance = (a.x - b.x).hypot(a.y - b.y);
                if distance < self.link_distance {
                    links.push(Link {
                        from: i,
                        to: i + 1 + offset,
                        strength: 1.0 - distance / self.link_distance,
                    });
                }
            }
        }
        links
    }
}

/// Stroke and fill colors for a rendered theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub line: String,
    pub node: String,
    pub halo: String,
}

impl Palette {
    pub fn for_mode(mode: ColorMode) -> Self {
        let (r, g, b) = match mode {
            ColorMode::Dark => (154, 160, 255),
            ColorMode::Light => (122, 122, 196),
        };
        Self {
            line: format!("rgba({}, {}, {}, 0.7)", r, g, b),
            node: format!("rgba({}, {}, {}, 0.7)", r, g, b),
            halo: format!("rgba({}, {}, {}, 0.5)", r, g, b),
        }
    }
}

/// Per-node drawing parameters derived from the pulse phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    pub radius: f64,
    pub alpha: f64,
    pub halo_radius: f64,
    /// Zero during the negative half of the pulse
    pub halo_alpha: f64,
}

impl NodeStyle {
    pub fn for_node(node: &Node, config: &NeuralConfig) -> Self {
        let wave = node.pulse.sin();
        let radius = config.node_radius + wave;
        Self {
            radius,
            alpha: config.opacity + wave * 0.1,
            halo_radius: radius * 2.0,
            halo_alpha: (wave * 0.2).max(0.0),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::NeuralBackground;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use folio_theme::ColorMode;
    use gloo_events::EventListener;
    use gloo_render::{request_animation_frame, AnimationFrame};
    use wasm_bindgen::JsCast;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, VisibilityState, Window,
    };

    use super::{Network, NodeStyle, Palette};
    use crate::config::NeuralConfig;
    use crate::dom::media_matches;
    use crate::error::{FxError, Result};

    const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

    struct Animation {
        window: Window,
        document: Document,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        /// Element whose `data-theme` picks the palette
        theme_source: Element,
        config: NeuralConfig,
        network: RefCell<Network>,
        /// Pending frame; dropping it cancels the request
        frame: RefCell<Option<AnimationFrame>>,
    }

    impl Animation {
        fn viewport(&self) -> (f64, f64) {
            let width = self
                .window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            let height = self
                .window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            (width, height)
        }

        /// Fit the canvas to the viewport and scatter a fresh node set.
        fn reset(&self) {
            let (width, height) = self.viewport();
            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
            let count = self.config.node_count_for(width);
            *self.network.borrow_mut() =
                Network::generate(&mut rand::thread_rng(), count, width, height, &self.config);
        }

        fn schedule(self: &Rc<Self>) {
            if self.frame.borrow().is_some() {
                return;
            }
            // Weak so a pending frame never keeps a dropped background alive
            let weak = Rc::downgrade(self);
            let handle = request_animation_frame(move |_| {
                if let Some(animation) = weak.upgrade() {
                    animation.on_frame();
                }
            });
            *self.frame.borrow_mut() = Some(handle);
        }

        fn cancel(&self) {
            self.frame.borrow_mut().take();
        }

        fn on_frame(self: &Rc<Self>) {
            self.frame.borrow_mut().take();
            if self.document.visibility_state() != VisibilityState::Visible {
                return;
            }
            self.network.borrow_mut().step();
            self.draw();
            self.schedule();
        }

        fn draw(&self) {
            let network = self.network.borrow();
            let (width, height) = network.size();
            let ctx = &self.ctx;
            let mode = ColorMode::from_attribute(
                self.theme_source.get_attribute("data-theme").as_deref(),
            );
            let palette = Palette::for_mode(mode);
            let nodes = network.nodes();

            ctx.clear_rect(0.0, 0.0, width, height);

            ctx.set_stroke_style_str(&palette.line);
            ctx.set_line_width(self.config.connection_width);
            for link in network.links() {
                let (a, b) = (&nodes[link.from], &nodes[link.to]);
                ctx.set_global_alpha(link.strength * self.config.opacity);
                ctx.begin_path();
                ctx.move_to(a.x, a.y);
                ctx.line_to(b.x, b.y);
                ctx.stroke();
            }

            for node in nodes {
                let style = NodeStyle::for_node(node, &self.config);

                ctx.set_fill_style_str(&palette.node);
                ctx.set_global_alpha(style.alpha);
                ctx.begin_path();
                let _ = ctx.arc(node.x, node.y, style.radius.max(0.0), 0.0, TAU);
                ctx.fill();

                if style.halo_alpha > 0.0 {
                    ctx.set_fill_style_str(&palette.halo);
                    ctx.set_global_alpha(style.halo_alpha);
                    ctx.begin_path();
                    let _ = ctx.arc(node.x, node.y, style.halo_radius.max(0.0), 0.0, TAU);
                    ctx.fill();
                }
            }

            ctx.set_global_alpha(1.0);
        }
    }

    /// Running background animation. Dropping it stops the frame loop.
    pub struct NeuralBackground {
        animation: Rc<Animation>,
        _listeners: Vec<EventListener>,
    }

    impl NeuralBackground {
        /// Returns `None` when there is no canvas or the user prefers
        /// reduced motion.
        pub fn install(
            window: &Window,
            document: &Document,
            theme_source: Element,
            config: &NeuralConfig,
        ) -> Result<Option<Self>> {
            if media_matches(window, REDUCED_MOTION_QUERY) {
                tracing::info!("Reduced motion requested; neural background disabled");
                return Ok(None);
            }
            let Some(canvas) = document.get_element_by_id(&config.canvas_id) else {
                tracing::debug!("No #{} element; neural background skipped", config.canvas_id);
                return Ok(None);
            };
            let canvas = canvas
                .dyn_into::<HtmlCanvasElement>()
                .map_err(|_| FxError::Dom("canvas element"))?;
            let ctx = canvas
                .get_context("2d")?
                .ok_or(FxError::Dom("2d context"))?
                .dyn_into::<CanvasRenderingContext2d>()
                .map_err(|_| FxError::Dom("2d context"))?;

            let animation = Rc::new(Animation {
                window: window.clone(),
                document: document.clone(),
                canvas,
                ctx,
                theme_source,
                config: config.clone(),
                network: RefCell::new(Network::from_nodes(Vec::new(), 0.0, 0.0, config)),
                frame: RefCell::new(None),
            });

            let mut listeners = Vec::new();

            let a = Rc::downgrade(&animation);
            listeners.push(EventListener::new(window, "resize", move |_| {
                if let Some(a) = a.upgrade() {
                    a.reset();
                }
            }));

            let a = Rc::downgrade(&animation);
            listeners.push(EventListener::new(document, "visibilitychange", move |_| {
                let Some(a) = a.upgrade() else {
                    return;
                };
                if a.document.visibility_state() == VisibilityState::Visible {
                    a.schedule();
                } else {
                    a.cancel();
                }
            }));

            animation.reset();
            animation.schedule();
            tracing::debug!(
                "Neural background running with {} nodes",
                animation.network.borrow().nodes().len()
            );

            Ok(Some(Self {
                animation,
                _listeners: listeners,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn node(x: f64, y: f64, vx: f64, vy: f64) -> Node {
        Node {
            x,
            y,
            vx,
            vy,
            pulse: 0.0,
        }
    }

    #[test]
    fn test_generate_stays_in_bounds() {
        let config = NeuralConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let network = Network::generate(&mut rng, 200, 800.0, 600.0, &config);

        assert_eq!(network.nodes().len(), 200);
        for n in network.nodes() {
            assert!((0.0..=800.0).contains(&n.x));
            assert!((0.0..=600.0).contains(&n.y));
            assert!(n.vx.abs() <= 0.25 && n.vy.abs() <= 0.25);
            assert!((0.0..TAU).contains(&n.pulse));
        }
    }

    #[test]
    fn test_generate_zero_sized_viewport() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut network = Network::generate(&mut rng, 10, 0.0, 0.0, &NeuralConfig::default());
        network.step();
        assert!(network.nodes().iter().all(|n| n.x == 0.0 && n.y == 0.0));
    }

    #[test]
    fn test_step_moves_and_pulses() {
        let config = NeuralConfig::default();
        let mut network =
            Network::from_nodes(vec![node(10.0, 10.0, 0.25, -0.125)], 100.0, 100.0, &config);
        network.step();

        let n = &network.nodes()[0];
        assert_eq!((n.x, n.y), (10.25, 9.875));
        assert!((n.pulse - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_step_bounces_and_clamps() {
        let config = NeuralConfig::default();
        let mut network = Network::from_nodes(
            vec![node(99.9, 0.1, 0.25, -0.25)],
            100.0,
            100.0,
            &config,
        );
        network.step();

        let n = &network.nodes()[0];
        assert_eq!((n.x, n.y), (100.0, 0.0));
        assert_eq!((n.vx, n.vy), (-0.25, 0.25));

        network.step();
        let n = &network.nodes()[0];
        assert_eq!((n.x, n.y), (99.75, 0.25));
    }

    #[test]
    fn test_links_within_distance() {
        let config = NeuralConfig::default();
        let network = Network::from_nodes(
            vec![
                node(0.0, 0.0, 0.0, 0.0),
                node(90.0, 120.0, 0.0, 0.0), // 150 away: not linked
                node(30.0, 40.0, 0.0, 0.0),  // 50 from the first
            ],
            500.0,
            500.0,
            &config,
        );

        let links = network.links();
        assert_eq!(links.len(), 2);

        assert_eq!((links[0].from, links[0].to), (0, 2));
        assert!((links[0].strength - (1.0 - 50.0 / 150.0)).abs() < 1e-12);

        // 1 -> 2 is exactly 100 apart
        assert_eq!((links[1].from, links[1].to), (1, 2));
        assert!((links[1].strength - (1.0 - 100.0 / 150.0)).abs() < 1e-12);
    }

    #[test]
    fn test_palette_follows_mode() {
        let dark = Palette::for_mode(ColorMode::Dark);
        let light = Palette::for_mode(ColorMode::Light);
        assert_eq!(dark.line, "rgba(154, 160, 255, 0.7)");
        assert_eq!(light.halo, "rgba(122, 122, 196, 0.5)");
        assert_ne!(dark, light);
    }

    #[test]
    fn test_node_style_pulse() {
        let config = NeuralConfig::default();
        let mut n = node(0.0, 0.0, 0.0, 0.0);

        n.pulse = std::f64::consts::FRAC_PI_2;
        let peak = NodeStyle::for_node(&n, &config);
        assert!((peak.radius - 4.0).abs() < 1e-12);
        assert!((peak.alpha - 0.5).abs() < 1e-12);
        assert!((peak.halo_radius - 8.0).abs() < 1e-12);
        assert!((peak.halo_alpha - 0.2).abs() < 1e-12);

        n.pulse = -std::f64::consts::FRAC_PI_2;
        let trough = NodeStyle::for_node(&n, &config);
        assert!((trough.radius - 2.0).abs() < 1e-12);
        assert_eq!(trough.halo_alpha, 0.0);
    }
}
