use std::cell::RefCell;
use std::rc::Rc;

use common::games::snake::{
    GameState, InputEvent, Key, PlacementError, SnakeGame, TerminationReason, TickClock,
};
use common::warn;
use eframe::egui;

use super::canvas::Canvas;
use super::input;

/// How the session ended, read by `main` once the window is gone.
pub type SessionOutcome = Rc<RefCell<Option<Result<TerminationReason, PlacementError>>>>;

pub struct SnakeApp {
    game: SnakeGame,
    canvas: Canvas,
    clock: TickClock,
    outcome: SessionOutcome,
}

impl SnakeApp {
    pub fn new(mut game: SnakeGame, outcome: SessionOutcome) -> Self {
        let settings = game.settings();
        let mut canvas = Canvas::new(settings.cell_size, settings.palette.background);
        game.render_full(&mut canvas);

        Self {
            game,
            canvas,
            clock: TickClock::new(),
            outcome,
        }
    }

    fn collect_input(&mut self, ctx: &egui::Context) {
        let (events, close_requested) =
            ctx.input(|i| (input::translate(&i.events), i.viewport().close_requested()));

        if close_requested
            || events
                .iter()
                .any(|e| matches!(e, InputEvent::Quit | InputEvent::KeyDown(Key::Escape)))
        {
            self.game.quit();
            return;
        }
        self.canvas.push_events(events);
    }

    fn step(&mut self) {
        if self.game.is_terminated() || !self.clock.poll(self.game.speed()) {
            return;
        }

        if let Err(err) = self.game.tick(&mut self.canvas) {
            warn!("Game stopped: {}", err);
            *self.outcome.borrow_mut() = Some(Err(err));
            self.game.quit();
        }
    }

    fn finish(&mut self, ctx: &egui::Context) {
        let GameState::Terminated(reason) = self.game.state() else {
            return;
        };
        let mut outcome = self.outcome.borrow_mut();
        if outcome.is_none() {
            *outcome = Some(Ok(reason));
        }
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

impl eframe::App for SnakeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.collect_input(ctx);
        self.step();

        if let Some(title) = self.canvas.take_title() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
        }

        let grid = self.game.grid();
        let board = egui::vec2(grid.width() as f32, grid.height() as f32);
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(self.canvas.background()))
            .show(ctx, |ui| {
                let (response, painter) = ui.allocate_painter(board, egui::Sense::hover());
                self.canvas.paint(&painter, response.rect.min);
            });

        self.finish(ctx);
        if !self.game.is_terminated() {
            ctx.request_repaint_after(self.clock.time_until_next(self.game.speed()));
        }
    }
}
