//! Mount/unmount lifecycle of the animated backdrop
//!
//! Mounting builds a fresh orb field, hooks pointer and resize events,
//! registers the region observers and starts the frame loop. Unmounting
//! undoes all of that exactly once; nothing survives into the next mount.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::animation::{ColorAnimator, ColorTween};
use crate::config::BackdropConfig;
use crate::host::{
    BackdropSink, EventHandler, FrameLoop, Host, HostEvent, HostEventKind, ListenerId,
};
use crate::math::{Rgba, Vec2};
use crate::particles::{Orb, OrbField};
use crate::render::{Scene, Surface};
use crate::scroll::ScrollColorizer;

/// The drawing surface and background element to mount onto
pub struct MountTarget {
    pub surface: Box<dyn Surface>,
    pub backdrop: Box<dyn BackdropSink>,
}

struct Mounted {
    scene: Rc<RefCell<Scene>>,
    frame_loop: FrameLoop,
    listeners: Vec<ListenerId>,
    colorizer: ScrollColorizer,
}

/// Floating-orb background with scroll-linked backdrop colors
pub struct Backdrop {
    config: BackdropConfig,
    host: Host,
    seed: u64,
    mounted: Option<Mounted>,
}

impl Backdrop {
    pub fn new(config: BackdropConfig, host: Host) -> Self {
        Self {
            config,
            host,
            seed: 0x5eed,
            mounted: None,
        }
    }

    /// Seed for the orb layout of the next mount
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Start rendering onto `target`.
    ///
    /// Returns false without touching anything if already mounted or if
    /// there is nothing to draw on.
    pub fn mount(&mut self, target: Option<MountTarget>) -> bool {
        if self.mounted.is_some() {
            log::debug!("backdrop already mounted");
            return false;
        }
        let Some(MountTarget { mut surface, backdrop }) = target else {
            log::debug!("no drawing surface, backdrop disabled");
            return false;
        };

        let viewport = self.host.events.viewport();
        surface.resize(viewport);

        let field = OrbField::initialize(self.config.orb_count, viewport, self.config.orbs, self.seed);
        self.seed = next_seed(self.seed);

        let initial = self.host.theme.resolve().pick(Rgba::WHITE, Rgba::BLACK);
        let fade = Rc::new(RefCell::new(ColorTween::new(initial)));
        let scene = Rc::new(RefCell::new(Scene::new(
            field,
            surface,
            backdrop,
            fade.clone(),
            self.config.palette,
            self.config.glow_radius,
        )));
        scene.borrow_mut().sync_backdrop();

        let listeners = self.listen(&scene);

        let animator: Rc<dyn ColorAnimator> = fade;
        let colorizer = ScrollColorizer::register(
            &self.config.regions,
            self.config.transition,
            self.host.regions.clone(),
            self.host.theme.clone(),
            animator,
        );

        let frame_loop = FrameLoop::new(self.host.scheduler.clone());
        let weak = Rc::downgrade(&scene);
        let theme_source = self.host.theme.clone();
        frame_loop.start(move |timestamp| {
            if let Some(scene) = weak.upgrade() {
                scene.borrow_mut().frame(timestamp, theme_source.resolve());
            }
        });

        log::debug!(
            "backdrop mounted: {} orbs, {} listeners, {} regions",
            self.config.orb_count,
            listeners.len(),
            colorizer.observer_count()
        );

        self.mounted = Some(Mounted {
            scene,
            frame_loop,
            listeners,
            colorizer,
        });
        true
    }

    fn listen(&self, scene: &Rc<RefCell<Scene>>) -> Vec<ListenerId> {
        let on_pointer: EventHandler = {
            let scene = Rc::downgrade(scene);
            Box::new(move |event: HostEvent| {
                if let HostEvent::PointerMove { x, y } = event {
                    with_scene(&scene, |s| s.set_pointer(Vec2::new(x, y)));
                }
            })
        };
        let on_resize: EventHandler = {
            let scene = Rc::downgrade(scene);
            Box::new(move |event: HostEvent| {
                if let HostEvent::Resize(viewport) = event {
                    with_scene(&scene, |s| s.resize(viewport));
                }
            })
        };

        [
            (HostEventKind::PointerMove, on_pointer),
            (HostEventKind::Resize, on_resize),
        ]
        .into_iter()
        .filter_map(|(kind, handler)| {
            let id = self.host.events.listen(kind, handler);
            if id.is_none() {
                log::warn!("could not listen for {:?} events", kind);
            }
            id
        })
        .collect()
    }

    /// Stop rendering and release every host registration. Returns false
    /// if nothing was mounted.
    pub fn unmount(&mut self) -> bool {
        let Some(mut mounted) = self.mounted.take() else {
            return false;
        };

        mounted.frame_loop.stop();
        for id in mounted.listeners.drain(..) {
            self.host.events.unlisten(id);
        }
        mounted.colorizer.dispose();

        log::debug!("backdrop unmounted");
        true
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Orbs of the current mount (empty when unmounted)
    pub fn orbs(&self) -> Vec<Orb> {
        self.mounted
            .as_ref()
            .map(|m| m.scene.borrow().field().orbs().to_vec())
            .unwrap_or_default()
    }

    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }
}

impl Drop for Backdrop {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn with_scene(scene: &Weak<RefCell<Scene>>, f: impl FnOnce(&mut Scene)) {
    if let Some(scene) = scene.upgrade() {
        f(&mut *scene.borrow_mut());
    }
}

/// splitmix64 step so each mount gets a new layout
fn next_seed(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
