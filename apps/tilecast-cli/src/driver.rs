use tilecast_common::GameConfig;
use tilecast_input::{InputState, KeyBindings};
use tilecast_kernel::{FrameClock, FrameStats, GameEvent, GameState, Hud, HudTracker, StepReport};
use tilecast_render::{RenderView, Renderer};

/// Frames kept in the rolling timing window.
const STATS_WINDOW: usize = 120;

/// Renders nothing. For runs that only need the simulation.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl Renderer for Headless {
    type Output = ();

    fn render(&self, _state: &GameState, _view: &RenderView) {}
}

/// Everything one frame produced.
#[derive(Debug)]
pub struct FrameOutput<O> {
    pub image: O,
    pub dt: f32,
    pub report: StepReport,
    /// New HUD values, present only when they changed.
    pub hud: Option<Hud>,
    pub events: Vec<GameEvent>,
}

/// The update-then-render loop body. Owns the game and feeds it from any
/// timing source: call [`FrameDriver::tick`] once per host frame.
pub struct FrameDriver<R> {
    state: GameState,
    input: InputState,
    clock: FrameClock,
    stats: FrameStats,
    hud: HudTracker,
    renderer: R,
    view: RenderView,
}

impl<R: Renderer> FrameDriver<R> {
    pub fn new(config: GameConfig, renderer: R) -> Self {
        Self {
            state: GameState::new(config),
            input: InputState::new(KeyBindings::default()),
            clock: FrameClock::new(),
            stats: FrameStats::new(STATS_WINDOW),
            hud: HudTracker::new(),
            renderer,
            view: RenderView::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// The HUD values last published to the host.
    pub fn hud(&self) -> Option<Hud> {
        self.hud.last()
    }

    /// The host lost focus: release held keys, drop a queued shot and make
    /// the next frame start from a zero delta.
    pub fn focus_lost(&mut self) {
        self.input.clear();
        self.clock.restart();
        tracing::debug!(tick = self.state.tick(), "focus lost, input released");
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Run one frame at host time `now_secs`: simulate, then render.
    pub fn tick(&mut self, now_secs: f64) -> FrameOutput<R::Output> {
        let dt = self.clock.tick(now_secs);
        self.stats.record(dt);

        let intent = self.input.take_intent();
        let report = self.state.step(&intent, dt);

        let view = RenderView {
            muzzle_flash: report.shot.is_some(),
            ..self.view
        };
        let image = self.renderer.render(&self.state, &view);

        let hud = self.hud.observe(Hud::of(&self.state));
        let events = self.state.drain_events();
        tracing::trace!(tick = self.state.tick(), dt, events = events.len(), "frame done");

        FrameOutput {
            image,
            dt,
            report,
            hud,
            events,
        }
    }
}
