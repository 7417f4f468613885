//! Script replay
//!
//! Raw mouse/touch steps go through a [`PointerTracker`] exactly as the
//! kiosk browser would feed them, then into the drag controller.

use std::time::Instant;

use anyhow::Context;
use rand::Rng;
use serde::Serialize;

use fq_drag::{
    DragConfig, FeedbackCue, HeadlessHost, ItemId, PlacementEvent, PlacementModel,
    PlacementOutcome, PlacementSnapshot, PointerDragController, ZoneId,
};
use fq_input::{Point, PointerEvent, PointerTracker, Rect, TouchInput, TouchPhase};
use fq_quiz::{Question, QuestionBoard};

use crate::script::{Device, ScreenLayout, Step};

/// What a replay produced
#[derive(Debug, Serialize)]
pub struct Report {
    pub question: String,
    pub outcomes: Vec<PlacementOutcome>,
    pub cues: Vec<FeedbackCue>,
    pub events: Vec<PlacementEvent>,
    /// Zone still showing the rejected flash when the script ended
    pub flashing: Option<ZoneId>,
    pub snapshot: PlacementSnapshot,
}

pub struct Replay {
    question: String,
    device: Device,
    tracker: PointerTracker,
    controller: PointerDragController<QuestionBoard, HeadlessHost>,
    outcomes: Vec<PlacementOutcome>,
}

impl Replay {
    pub fn new<R: Rng + ?Sized>(
        question: &Question,
        layout: &ScreenLayout,
        device: Device,
        config: DragConfig,
        rng: &mut R,
    ) -> anyhow::Result<Self> {
        let board = QuestionBoard::for_question(question, &config, rng)
            .with_context(|| format!("Failed to set up question {}", question.id()))?;

        let mut host = HeadlessHost::new();
        host.set_viewport(layout.viewport);
        for placement in &layout.targets {
            host.set_rect(placement.target.clone(), placement.rect);
        }

        let targets = board.drop_targets();
        let mut controller = PointerDragController::new(board, host, config);
        controller.set_targets(targets);

        Ok(Self {
            question: question.id().to_string(),
            device,
            tracker: PointerTracker::new(),
            controller,
            outcomes: Vec::new(),
        })
    }

    #[cfg(test)]
    pub fn controller(&self) -> &PointerDragController<QuestionBoard, HeadlessHost> {
        &self.controller
    }

    pub fn step(&mut self, step: &Step) {
        tracing::trace!("Step {:?}", step);

        match step {
            Step::Press {
                item,
                bounds,
                finger,
                ..
            } => {
                if let Some(position) = step.point() {
                    self.press(item, position, *bounds, *finger);
                }
            }
            Step::Move { finger, .. } | Step::Release { finger, .. } => {
                let Some(position) = step.point() else {
                    return;
                };
                let lifted = matches!(step, Step::Release { .. });
                for event in self.pointer_events(position, *finger, lifted) {
                    self.dispatch(&event);
                }
            }
            Step::Blur => {
                for event in self.tracker.cancel_all() {
                    self.dispatch(&event);
                }
            }
            Step::Escape => {
                self.controller.cancel_drag();
            }
            Step::Reflow { target, rect } => {
                let host = self.controller.host_mut();
                match rect {
                    Some(rect) => host.set_rect(target.clone(), *rect),
                    None => {
                        host.remove_rect(target);
                    }
                }
            }
        }
    }

    pub fn run(mut self, steps: &[Step]) -> Report {
        for step in steps {
            self.step(step);
        }
        self.finish()
    }

    pub fn finish(mut self) -> Report {
        let flashing = self
            .controller
            .flash()
            .active_zone(Instant::now())
            .cloned();
        let host = self.controller.host_mut();
        let cues = host.drain_cues();
        let events = host.drain_events();

        Report {
            question: self.question,
            outcomes: self.outcomes,
            cues,
            events,
            flashing,
            snapshot: self.controller.model().snapshot(),
        }
    }

    fn press(&mut self, item: &ItemId, position: Point, bounds: Rect, finger: u64) {
        let press = match self.device {
            Device::Mouse => self.tracker.mouse_down(position, 1),
            Device::Touch => self
                .tracker
                .touch(&TouchInput::single(TouchPhase::Start, finger, position.x, position.y))
                .into_iter()
                .next(),
        };

        // Refused presses (locked item, second finger) do nothing
        if let Some(press) = press {
            let _ = self.controller.begin_pointer_drag(item, &press, bounds);
        }
    }

    fn pointer_events(&mut self, position: Point, finger: u64, lifted: bool) -> Vec<PointerEvent> {
        match (self.device, lifted) {
            (Device::Mouse, false) => self.tracker.mouse_move(position).into_iter().collect(),
            (Device::Mouse, true) => self.tracker.mouse_up(position).into_iter().collect(),
            (Device::Touch, lifted) => {
                let phase = if lifted { TouchPhase::End } else { TouchPhase::Move };
                self.tracker
                    .touch(&TouchInput::single(phase, finger, position.x, position.y))
            }
        }
    }

    fn dispatch(&mut self, event: &PointerEvent) {
        let response = self.controller.handle_pointer(event);
        if let Some(outcome) = response.outcome {
            if let Some(notice) = &outcome.event {
                tracing::info!("Question {}: {:?}", self.question, notice);
            }
            self.outcomes.push(outcome);
        }
    }
}
